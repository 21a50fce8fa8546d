//! Generalized suffix array answering "which names contain this substring".
//!
//! Every suffix of every stored name is recorded as a `(name, byte offset)`
//! pair starting on a character boundary, then the pairs are sorted by the
//! suffix text. All suffixes starting with a query form one contiguous run of
//! that order, found with two binary searches; the names owning the run are
//! exactly the names containing the query.

use ahash::AHashMap;
use bit_vec::BitVec;
use rayon::prelude::*;

/// Above this many suffixes the sort runs on the rayon pool.
const PARALLEL_SORT_THRESHOLD: usize = 4096;

/// Position of a suffix: owning name and byte offset of its first character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SuffixEntry {
    name_id: u32,
    offset: u32,
}

/// Collects the names of one context before the suffix array is built.
#[derive(Debug, Default)]
pub struct SuffixIndexBuilder {
    entries: AHashMap<Box<str>, u64>,
    next_entry: u64,
}

impl SuffixIndexBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a name under the next entry number.
    ///
    /// Names are trimmed and lower-cased; blank names are ignored. A name seen
    /// again moves to the new entry number.
    pub fn insert(&mut self, name: &str) {
        let name = name.trim();
        if name.is_empty() {
            return;
        }
        self.next_entry += 1;
        self.entries
            .insert(name.to_lowercase().into_boxed_str(), self.next_entry);
    }

    /// Number of distinct names collected so far.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no name has been collected.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Freeze the collected names into a searchable index.
    pub fn build(self) -> SuffixIndex {
        let mut numbered: Vec<(u64, Box<str>)> = self
            .entries
            .into_iter()
            .map(|(name, entry)| (entry, name))
            .collect();
        numbered.sort_unstable_by_key(|(entry, _)| *entry);
        let names: Vec<Box<str>> = numbered.into_iter().map(|(_, name)| name).collect();

        let mut suffixes: Vec<SuffixEntry> = names
            .iter()
            .enumerate()
            .flat_map(|(name_id, name)| {
                name.char_indices().map(move |(offset, _)| SuffixEntry {
                    name_id: name_id as u32,
                    offset: offset as u32,
                })
            })
            .collect();

        let suffix = |entry: &SuffixEntry| &names[entry.name_id as usize][entry.offset as usize..];
        if suffixes.len() > PARALLEL_SORT_THRESHOLD {
            suffixes.par_sort_unstable_by(|a, b| suffix(a).cmp(suffix(b)));
        } else {
            suffixes.sort_unstable_by(|a, b| suffix(a).cmp(suffix(b)));
        }

        SuffixIndex { names, suffixes }
    }
}

/// Read-only substring index over the names of one context.
#[derive(Debug, Clone, Default)]
pub struct SuffixIndex {
    /// Names in entry-number order; a name's position is its id.
    names: Vec<Box<str>>,
    /// Suffixes sorted by their text.
    suffixes: Vec<SuffixEntry>,
}

impl SuffixIndex {
    /// Build an index from names in entry order.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut builder = SuffixIndexBuilder::new();
        for name in names {
            builder.insert(name.as_ref());
        }
        builder.build()
    }

    fn suffix(&self, entry: &SuffixEntry) -> &str {
        &self.names[entry.name_id as usize][entry.offset as usize..]
    }

    /// All stored names containing `query`, compared case-insensitively.
    ///
    /// Names come back lower-cased, in entry order, each at most once. An
    /// empty query matches every name.
    pub fn containing(&self, query: &str) -> Vec<&str> {
        let query = query.to_lowercase();
        if query.is_empty() {
            return self.names.iter().map(|name| &**name).collect();
        }

        let start = self
            .suffixes
            .partition_point(|entry| self.suffix(entry) < query.as_str());
        let len = self.suffixes[start..]
            .partition_point(|entry| self.suffix(entry).starts_with(query.as_str()));

        let mut matched = BitVec::from_elem(self.names.len(), false);
        for entry in &self.suffixes[start..start + len] {
            matched.set(entry.name_id as usize, true);
        }

        matched
            .iter()
            .zip(&self.names)
            .filter_map(|(hit, name)| hit.then_some(&**name))
            .collect()
    }

    /// Name stored under `id`.
    pub fn get(&self, id: usize) -> Option<&str> {
        self.names.get(id).map(|name| &**name)
    }

    /// Number of names.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the index holds no name.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Number of suffixes indexed.
    pub fn suffix_count(&self) -> usize {
        self.suffixes.len()
    }
}
