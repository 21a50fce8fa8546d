//! Corpus sources: where the per-context line lists come from.
//!
//! The engines only see [`ContextCorpus`] values. Directory layouts, file
//! naming and decoding live here so a failure in one file is reported for
//! that context alone.

use std::fs;
use std::path::{Path, PathBuf};

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ToponymError};
use crate::text::{name_code, street_key};

/// The lines of one context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextCorpus {
    /// Context key the lines belong to.
    pub context: String,
    /// Raw lines in source order.
    pub lines: Vec<String>,
}

impl ContextCorpus {
    /// Create a corpus from anything yielding string-like lines.
    pub fn new<S, I>(context: S, lines: I) -> Self
    where
        S: Into<String>,
        I: IntoIterator,
        I::Item: Into<String>,
    {
        ContextCorpus {
            context: context.into(),
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }
}

/// A supplier of per-context corpora.
pub trait CorpusSource: Send + Sync {
    /// Read every context. Each item is either a corpus or the error that
    /// prevented reading that context.
    fn corpora(&self) -> Vec<Result<ContextCorpus>>;

    /// Human-readable description used in logs.
    fn description(&self) -> String;
}

/// Counters reported after training an engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingReport {
    /// Contexts that were built.
    pub contexts_built: usize,
    /// Contexts skipped because their source could not be read.
    pub contexts_failed: usize,
    /// Distinct terms or names indexed.
    pub terms: usize,
    /// Index entries created (dictionary keys or suffixes).
    pub entries: usize,
}

impl TrainingReport {
    /// Accumulate another report into this one.
    pub fn merge(&mut self, other: TrainingReport) {
        self.contexts_built += other.contexts_built;
        self.contexts_failed += other.contexts_failed;
        self.terms += other.terms;
        self.entries += other.entries;
    }
}

/// Read every corpus of `source`, merging corpora that share a context.
///
/// Unreadable contexts are logged and counted; the returned corpora keep the
/// order in which their context first appeared.
pub fn collect_corpora(source: &dyn CorpusSource) -> (Vec<ContextCorpus>, usize) {
    let mut corpora: Vec<ContextCorpus> = Vec::new();
    let mut positions: AHashMap<String, usize> = AHashMap::new();
    let mut failed = 0;
    for corpus in source.corpora() {
        match corpus {
            Ok(corpus) => match positions.get(&corpus.context) {
                Some(&position) => corpora[position].lines.extend(corpus.lines),
                None => {
                    positions.insert(corpus.context.clone(), corpora.len());
                    corpora.push(corpus);
                }
            },
            Err(e) => {
                log::warn!("Could not read corpus from {}: {e}", source.description());
                failed += 1;
            }
        }
    }
    (corpora, failed)
}

/// Corpora held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    corpora: Vec<ContextCorpus>,
}

impl InMemorySource {
    /// Create an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the lines of one context.
    pub fn with_context<S, I>(mut self, context: S, lines: I) -> Self
    where
        S: Into<String>,
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.corpora.push(ContextCorpus::new(context, lines));
        self
    }
}

impl CorpusSource for InMemorySource {
    fn corpora(&self) -> Vec<Result<ContextCorpus>> {
        self.corpora.iter().cloned().map(Ok).collect()
    }

    fn description(&self) -> String {
        format!("in-memory ({} contexts)", self.corpora.len())
    }
}

/// How a file in a flat directory names its context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContextKeyStyle {
    /// File name without extension (`MLA.txt` -> `MLA`).
    FileStem,
    /// Full file name.
    FileName,
    /// Name code of the title-cased file name (`cordoba` -> code of `Cordoba`).
    NameCode,
}

impl ContextKeyStyle {
    fn key_for(self, path: &Path) -> Option<String> {
        match self {
            ContextKeyStyle::FileStem => path.file_stem().map(|s| s.to_string_lossy().into_owned()),
            ContextKeyStyle::FileName => path.file_name().map(|s| s.to_string_lossy().into_owned()),
            ContextKeyStyle::NameCode => path
                .file_name()
                .map(|s| name_code(&s.to_string_lossy()).to_string()),
        }
    }
}

/// A directory holding one file per context.
#[derive(Debug, Clone)]
pub struct FlatDirectorySource {
    dir: PathBuf,
    keys: ContextKeyStyle,
}

impl FlatDirectorySource {
    /// Create a source over `dir`, naming contexts with `keys`.
    pub fn new<P: Into<PathBuf>>(dir: P, keys: ContextKeyStyle) -> Self {
        FlatDirectorySource {
            dir: dir.into(),
            keys,
        }
    }
}

impl CorpusSource for FlatDirectorySource {
    fn corpora(&self) -> Vec<Result<ContextCorpus>> {
        let files = match sorted_entries(&self.dir) {
            Ok(files) => files,
            Err(e) => return vec![Err(e)],
        };

        files
            .into_iter()
            .filter(|path| !path.is_dir())
            .map(|path| {
                let context = self.keys.key_for(&path).ok_or_else(|| {
                    ToponymError::source_unavailable(format!("{}: no file name", path.display()))
                })?;
                Ok(ContextCorpus {
                    context,
                    lines: read_lines(&path)?,
                })
            })
            .collect()
    }

    fn description(&self) -> String {
        self.dir.display().to_string()
    }
}

/// A two-level directory: one sub-directory per state, one file per city.
///
/// The context of each file is `"{stateCode}-{cityCode}"`.
#[derive(Debug, Clone)]
pub struct NestedDirectorySource {
    dir: PathBuf,
}

impl NestedDirectorySource {
    /// Create a source over `dir`.
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        NestedDirectorySource { dir: dir.into() }
    }
}

impl CorpusSource for NestedDirectorySource {
    fn corpora(&self) -> Vec<Result<ContextCorpus>> {
        let states = match sorted_entries(&self.dir) {
            Ok(states) => states,
            Err(e) => return vec![Err(e)],
        };

        let mut corpora = Vec::new();
        for state_dir in states {
            let state = file_name(&state_dir);
            let cities = match sorted_entries(&state_dir) {
                Ok(cities) => cities,
                Err(e) => {
                    corpora.push(Err(e));
                    continue;
                }
            };
            for city_file in cities {
                let city = file_name(&city_file);
                corpora.push(read_lines(&city_file).map(|lines| ContextCorpus {
                    context: street_key(&state, &city),
                    lines,
                }));
            }
        }
        corpora
    }

    fn description(&self) -> String {
        self.dir.display().to_string()
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Directory entries sorted by path, so contexts are visited deterministically.
fn sorted_entries(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).map_err(|e| {
        ToponymError::source_unavailable(format!("{}: {e}", dir.display()))
    })?;

    let mut paths = Vec::new();
    for entry in entries {
        let entry = entry
            .map_err(|e| ToponymError::source_unavailable(format!("{}: {e}", dir.display())))?;
        paths.push(entry.path());
    }
    paths.sort();
    Ok(paths)
}

/// Read a file as lines, skipping (and logging) lines that are not valid UTF-8.
pub fn read_lines(path: &Path) -> Result<Vec<String>> {
    let bytes = fs::read(path)
        .map_err(|e| ToponymError::source_unavailable(format!("{}: {e}", path.display())))?;
    Ok(decode_lines(&bytes, &path.display().to_string()))
}

fn decode_lines(bytes: &[u8], origin: &str) -> Vec<String> {
    let mut segments: Vec<&[u8]> = bytes.split(|&b| b == b'\n').collect();
    // A trailing newline does not start another line.
    if segments.last().is_some_and(|last| last.is_empty()) {
        segments.pop();
    }

    let mut lines = Vec::with_capacity(segments.len());
    for (line_number, segment) in segments.into_iter().enumerate() {
        let segment = segment.strip_suffix(b"\r").unwrap_or(segment);
        match std::str::from_utf8(segment) {
            Ok(line) => lines.push(line.to_string()),
            Err(e) => {
                let error =
                    ToponymError::malformed_entry(format!("{origin}:{}: {e}", line_number + 1));
                log::warn!("{error}");
            }
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_file(dir: &Path, name: &str, contents: &[u8]) {
        let mut file = File::create(dir.join(name)).unwrap();
        file.write_all(contents).unwrap();
    }

    #[test]
    fn test_decode_lines() {
        let lines = decode_lines(b"cordoba\r\nbuenos aires\n\nsanta fe\n", "test");
        assert_eq!(lines, vec!["cordoba", "buenos aires", "", "santa fe"]);

        assert!(decode_lines(b"", "test").is_empty());
        assert_eq!(decode_lines(b"salta", "test"), vec!["salta"]);
    }

    #[test]
    fn test_decode_lines_skips_invalid_utf8() {
        let lines = decode_lines(b"salta\n\xff\xfe\njujuy\n", "test");
        assert_eq!(lines, vec!["salta", "jujuy"]);
    }

    #[test]
    fn test_in_memory_source() {
        let source = InMemorySource::new()
            .with_context("MLA", ["cordoba", "salta"])
            .with_context("MLC", vec!["santiago".to_string()]);

        let corpora: Vec<ContextCorpus> =
            source.corpora().into_iter().map(|c| c.unwrap()).collect();
        assert_eq!(corpora.len(), 2);
        assert_eq!(corpora[0].context, "MLA");
        assert_eq!(corpora[0].lines, vec!["cordoba", "salta"]);
        assert_eq!(corpora[1].context, "MLC");
    }

    #[test]
    fn test_flat_directory_key_styles() {
        let dir = TempDir::new().unwrap();
        write_file(dir.path(), "MLA.txt", b"cordoba\nsalta\n");

        let stem = FlatDirectorySource::new(dir.path(), ContextKeyStyle::FileStem);
        let corpora = stem.corpora();
        assert_eq!(corpora.len(), 1);
        let corpus = corpora.into_iter().next().unwrap().unwrap();
        assert_eq!(corpus.context, "MLA");
        assert_eq!(corpus.lines, vec!["cordoba", "salta"]);

        let name = FlatDirectorySource::new(dir.path(), ContextKeyStyle::FileName);
        assert_eq!(name.corpora()[0].as_ref().unwrap().context, "MLA.txt");

        let code = FlatDirectorySource::new(dir.path(), ContextKeyStyle::NameCode);
        assert_eq!(
            code.corpora()[0].as_ref().unwrap().context,
            name_code("MLA.txt").to_string()
        );
    }

    #[test]
    fn test_flat_directory_missing() {
        let dir = TempDir::new().unwrap();
        let source = FlatDirectorySource::new(dir.path().join("missing"), ContextKeyStyle::FileStem);
        let corpora = source.corpora();
        assert_eq!(corpora.len(), 1);
        assert!(matches!(corpora[0], Err(ToponymError::SourceUnavailable(_))));
    }

    #[test]
    fn test_flat_directory_ignores_subdirectories() {
        let dir = TempDir::new().unwrap();
        write_file(dir.path(), "MLA", b"cordoba\n");
        fs::create_dir(dir.path().join("nested")).unwrap();

        let source = FlatDirectorySource::new(dir.path(), ContextKeyStyle::FileStem);
        let corpora = source.corpora();
        assert_eq!(corpora.len(), 1);
        assert_eq!(corpora[0].as_ref().unwrap().context, "MLA");
    }

    #[test]
    fn test_nested_directory() {
        let dir = TempDir::new().unwrap();
        let state = dir.path().join("cordoba");
        fs::create_dir(&state).unwrap();
        write_file(&state, "rio cuarto", b"sobremonte\nconstitucion\n");
        write_file(&state, "villa maria", b"san martin\n");
        // A stray file at the state level is reported, not fatal.
        write_file(dir.path(), "README", b"streets\n");

        let source = NestedDirectorySource::new(dir.path());
        let corpora = source.corpora();
        assert_eq!(corpora.len(), 3);
        assert!(corpora[0].is_err());

        let rio_cuarto = corpora[1].as_ref().unwrap();
        assert_eq!(rio_cuarto.context, street_key("cordoba", "rio cuarto"));
        assert_eq!(rio_cuarto.lines, vec!["sobremonte", "constitucion"]);

        let villa_maria = corpora[2].as_ref().unwrap();
        assert_eq!(villa_maria.context, street_key("cordoba", "villa maria"));
    }

    #[test]
    fn test_collect_corpora_merges_contexts() {
        let dir = TempDir::new().unwrap();
        let source = InMemorySource::new()
            .with_context("MLA", ["cordoba"])
            .with_context("MLC", ["santiago"])
            .with_context("MLA", ["mendoza"]);
        let (corpora, failed) = collect_corpora(&source);
        assert_eq!(failed, 0);
        assert_eq!(corpora.len(), 2);
        assert_eq!(corpora[0].lines, vec!["cordoba", "mendoza"]);

        let missing = FlatDirectorySource::new(dir.path().join("missing"), ContextKeyStyle::FileName);
        let (corpora, failed) = collect_corpora(&missing);
        assert!(corpora.is_empty());
        assert_eq!(failed, 1);
    }

    #[test]
    fn test_collect_corpora_keeps_first_appearance_order() {
        let mut source = InMemorySource::new();
        for round in 0..3 {
            for state in 0..500 {
                source = source.with_context(format!("state-{state}"), [format!("street {round}")]);
            }
        }
        let (corpora, failed) = collect_corpora(&source);
        assert_eq!(failed, 0);
        assert_eq!(corpora.len(), 500);
        for (state, corpus) in corpora.iter().enumerate() {
            assert_eq!(corpus.context, format!("state-{state}"));
            assert_eq!(corpus.lines, vec!["street 0", "street 1", "street 2"]);
        }
    }

    #[test]
    fn test_training_report_merge() {
        let mut report = TrainingReport {
            contexts_built: 1,
            contexts_failed: 0,
            terms: 10,
            entries: 40,
        };
        report.merge(TrainingReport {
            contexts_built: 2,
            contexts_failed: 1,
            terms: 5,
            entries: 15,
        });
        assert_eq!(report.contexts_built, 3);
        assert_eq!(report.contexts_failed, 1);
        assert_eq!(report.terms, 15);
        assert_eq!(report.entries, 55);
    }
}
