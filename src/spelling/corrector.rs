//! Spelling corrector: trains one deletion dictionary per context and corrects
//! free-text names against it.

use std::time::Instant;

use rayon::ThreadPoolBuilder;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ToponymError};
use crate::source::{ContextCorpus, CorpusSource, TrainingReport, collect_corpora};
use crate::spelling::dictionary::{
    AdmissionPolicy, ContextDictionary, DeletionIndex, DictionarySettings, Insertion, WordId,
};
use crate::spelling::lookup::{SuggestItem, Verbosity};

/// Configuration for the spelling corrector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorrectorConfig {
    /// Maximum number of deletes indexed per term at training time.
    pub max_edit_distance: usize,
    /// Edit distance allowed when correcting a whole input.
    pub lookup_distance: usize,
    /// Edit distance allowed when correcting a single token of a multi-word input.
    pub token_distance: usize,
    /// How many competing suggestions lookups keep.
    pub verbosity: Verbosity,
    /// Origin admission for shared delete keys. Derived from `verbosity` when unset.
    pub admission: Option<AdmissionPolicy>,
    /// Maximum number of distinct terms per context.
    pub max_terms_per_context: usize,
    /// Build contexts on a thread pool.
    pub parallel_training: bool,
    /// Size of the training thread pool. Defaults to the number of CPUs.
    pub training_threads: Option<usize>,
}

impl Default for CorrectorConfig {
    fn default() -> Self {
        CorrectorConfig {
            max_edit_distance: 2,
            lookup_distance: 3,
            token_distance: 2,
            verbosity: Verbosity::All,
            admission: None,
            max_terms_per_context: WordId::MAX as usize,
            parallel_training: true,
            training_threads: None,
        }
    }
}

impl CorrectorConfig {
    /// Effective admission policy: keep every origin only when every suggestion is wanted.
    pub fn admission_policy(&self) -> AdmissionPolicy {
        self.admission.unwrap_or(match self.verbosity {
            Verbosity::All => AdmissionPolicy::KeepAll,
            Verbosity::Top | Verbosity::Closest => AdmissionPolicy::KeepBest,
        })
    }

    /// Dictionary settings derived from this configuration.
    pub fn dictionary_settings(&self) -> DictionarySettings {
        DictionarySettings {
            max_edit_distance: self.max_edit_distance,
            admission: self.admission_policy(),
            max_terms: self.max_terms_per_context,
        }
    }

    /// Check the configuration for values training cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.max_edit_distance == 0 {
            return Err(ToponymError::invalid_config(
                "max_edit_distance must be greater than zero",
            ));
        }
        if self.max_terms_per_context == 0 {
            return Err(ToponymError::invalid_config(
                "max_terms_per_context must be greater than zero",
            ));
        }
        if self.max_terms_per_context > WordId::MAX as usize {
            return Err(ToponymError::invalid_config(format!(
                "max_terms_per_context must be at most {}",
                WordId::MAX
            )));
        }
        if self.training_threads == Some(0) {
            return Err(ToponymError::invalid_config(
                "training_threads must be greater than zero",
            ));
        }
        Ok(())
    }
}

/// Main spelling corrector.
///
/// A corrector is trained once and read-only afterwards; share it behind an
/// `Arc` to serve lookups from several threads.
#[derive(Debug, Clone)]
pub struct SpellingCorrector {
    index: DeletionIndex,
    config: CorrectorConfig,
    report: TrainingReport,
}

impl SpellingCorrector {
    /// Train a corrector on every context of `source`.
    ///
    /// Contexts whose source cannot be read are logged and skipped.
    pub fn train(config: CorrectorConfig, source: &dyn CorpusSource) -> Result<Self> {
        config.validate()?;
        log::info!("Training spelling corrector from {}", source.description());

        let (corpora, contexts_failed) = collect_corpora(source);
        let mut report = TrainingReport {
            contexts_failed,
            ..Default::default()
        };

        let settings = config.dictionary_settings();
        let built: Vec<(String, ContextDictionary)> = if config.parallel_training {
            let threads = config.training_threads.unwrap_or_else(num_cpus::get);
            let pool = ThreadPoolBuilder::new()
                .num_threads(threads)
                .thread_name(|i| format!("spelling-train-{i}"))
                .build()
                .map_err(|e| ToponymError::other(format!("Failed to create thread pool: {e}")))?;
            pool.install(|| {
                corpora
                    .into_par_iter()
                    .map(|corpus| build_context(corpus, settings))
                    .collect()
            })
        } else {
            corpora
                .into_iter()
                .map(|corpus| build_context(corpus, settings))
                .collect()
        };

        let mut index = DeletionIndex::new(settings);
        for (context, dictionary) in built {
            report.contexts_built += 1;
            report.terms += dictionary.term_count();
            report.entries += dictionary.entry_count();
            index.add_context(context, dictionary);
        }

        log::info!(
            "Spelling corrector trained: {} contexts ({} failed), {} words, {} entries",
            report.contexts_built,
            report.contexts_failed,
            report.terms,
            report.entries
        );

        Ok(SpellingCorrector {
            index,
            config,
            report,
        })
    }

    /// Look up `query` in `context` with the configured verbosity.
    pub fn lookup(&self, query: &str, context: &str, max_distance: usize) -> Vec<SuggestItem> {
        self.index
            .lookup(query, context, max_distance, self.config.verbosity)
    }

    /// Correct `input` in `context`.
    ///
    /// Returns the best matching dictionary term, or `input` unchanged when
    /// nothing qualifies. Never fails.
    pub fn correct(&self, input: &str, context: &str) -> String {
        match self.try_correct(input, context) {
            Ok(Some(correction)) => correction,
            Ok(None) => input.to_string(),
            Err(e) => {
                log::debug!("There was a problem trying to correct spelling of {input:?}: {e}");
                input.to_string()
            }
        }
    }

    /// Correct `input` in `context`, reporting why correction was impossible.
    ///
    /// The whole input is tried first. A multi-word input that matches nothing
    /// is then corrected token by token, and the rejoined tokens are looked up
    /// again. `Ok(None)` means no strategy produced a suggestion.
    pub fn try_correct(&self, input: &str, context: &str) -> Result<Option<String>> {
        let dictionary = self
            .index
            .context(context)
            .ok_or_else(|| ToponymError::unknown_context(context))?;
        let verbosity = self.config.verbosity;
        let query = input.to_lowercase();

        let best = |text: &str, max_distance: usize| {
            dictionary
                .lookup(text, max_distance, verbosity)
                .into_iter()
                .next()
                .map(|item| item.term)
        };

        if let Some(term) = best(&query, self.config.lookup_distance) {
            return Ok(Some(term));
        }

        let tokens: Vec<&str> = query.split(' ').collect();
        if tokens.len() > 1 {
            let joined = tokens
                .iter()
                .map(|&token| {
                    best(token, self.config.token_distance).unwrap_or_else(|| token.to_string())
                })
                .collect::<Vec<_>>()
                .join(" ");
            log::debug!("Retrying {query:?} token by token as {joined:?}");
            return Ok(best(&joined, self.config.lookup_distance));
        }

        Ok(None)
    }

    /// Whether `term` is a known term of `context`.
    pub fn is_correct(&self, term: &str, context: &str) -> bool {
        self.index
            .context(context)
            .is_some_and(|dictionary| dictionary.contains(term))
    }

    /// The underlying deletion index.
    pub fn index(&self) -> &DeletionIndex {
        &self.index
    }

    /// The configuration the corrector was trained with.
    pub fn config(&self) -> &CorrectorConfig {
        &self.config
    }

    /// Counters collected while training.
    pub fn report(&self) -> TrainingReport {
        self.report
    }
}

/// Build the dictionary of one context.
///
/// Every line is lower-cased and inserted as a whole and token by token.
fn build_context(corpus: ContextCorpus, settings: DictionarySettings) -> (String, ContextDictionary) {
    let started = Instant::now();
    let mut dictionary = ContextDictionary::new(settings);
    let mut words = 0usize;
    let mut capacity_reported = false;

    for line in &corpus.lines {
        let line = line.to_lowercase();
        let terms = line.split(' ').chain(std::iter::once(line.as_str()));
        for term in terms.filter(|term| !term.is_empty()) {
            match dictionary.insert(term) {
                Insertion::Added(_) => words += 1,
                Insertion::Incremented => {}
                Insertion::Rejected => {
                    if !capacity_reported {
                        let error = ToponymError::capacity_exceeded(format!(
                            "context {} is full at {} terms",
                            corpus.context,
                            dictionary.term_count()
                        ));
                        log::warn!("{error}");
                        capacity_reported = true;
                    }
                }
            }
        }
    }

    log::info!(
        "Dictionary {}: {} words, {} entries, edit distance={} in {}ms",
        corpus.context,
        words,
        dictionary.entry_count(),
        settings.max_edit_distance,
        started.elapsed().as_millis()
    );

    (corpus.context, dictionary)
}
