//! Autocomplete over state, city and street names.

use std::time::Instant;

use ahash::AHashMap;
use rayon::ThreadPoolBuilder;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ToponymError};
use crate::source::{ContextCorpus, CorpusSource, TrainingReport, collect_corpora};
use crate::suggest::suffix::{SuffixIndex, SuffixIndexBuilder};
use crate::text::{name_code, title_case};

/// Configuration for the suggestor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuggestorConfig {
    /// Attach a name code to every suggestion by default.
    pub include_codes: bool,
    /// Build contexts on a thread pool.
    pub parallel_training: bool,
    /// Size of the training thread pool. Defaults to the number of CPUs.
    pub training_threads: Option<usize>,
}

impl Default for SuggestorConfig {
    fn default() -> Self {
        SuggestorConfig {
            include_codes: true,
            parallel_training: true,
            training_threads: None,
        }
    }
}

impl SuggestorConfig {
    /// Check the configuration for values training cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.training_threads == Some(0) {
            return Err(ToponymError::invalid_config(
                "suggestor training_threads must be greater than zero",
            ));
        }
        Ok(())
    }
}

/// A name offered for a partial query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    /// Title-cased display name.
    pub name: String,
    /// Decimal name code, when requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash_code: Option<String>,
}

impl Suggestion {
    /// Create a suggestion for a stored name, optionally carrying its code.
    pub fn new(name: &str, with_code: bool) -> Self {
        let name = title_case(name);
        let hash_code = with_code.then(|| name_code(&name).to_string());
        Suggestion { name, hash_code }
    }
}

/// Substring suggestor holding one suffix index per context.
#[derive(Debug, Clone, Default)]
pub struct Suggestor {
    indexes: AHashMap<String, SuffixIndex>,
    config: SuggestorConfig,
}

impl Suggestor {
    /// Create an empty suggestor.
    pub fn new(config: SuggestorConfig) -> Self {
        Suggestor {
            indexes: AHashMap::new(),
            config,
        }
    }

    /// Index every context of `source`.
    ///
    /// A context already present is replaced. Contexts whose source cannot be
    /// read are logged and counted in the report.
    pub fn train(&mut self, source: &dyn CorpusSource) -> Result<TrainingReport> {
        self.config.validate()?;
        let started = Instant::now();
        let (corpora, contexts_failed) = collect_corpora(source);

        let built: Vec<(String, SuffixIndex)> = if self.config.parallel_training {
            let threads = self.config.training_threads.unwrap_or_else(num_cpus::get);
            let pool = ThreadPoolBuilder::new()
                .num_threads(threads)
                .thread_name(|i| format!("suggest-train-{i}"))
                .build()
                .map_err(|e| ToponymError::other(format!("Failed to create thread pool: {e}")))?;
            pool.install(|| corpora.into_par_iter().map(build_context).collect())
        } else {
            corpora.into_iter().map(build_context).collect()
        };

        let mut report = TrainingReport {
            contexts_failed,
            ..Default::default()
        };
        for (context, index) in built {
            report.contexts_built += 1;
            report.terms += index.len();
            report.entries += index.suffix_count();
            if self.indexes.insert(context.clone(), index).is_some() {
                log::debug!("Suggestion context {context} replaced");
            }
        }

        log::info!(
            "Suggestor trained from {}: {} contexts ({} failed), {} names in {}ms",
            source.description(),
            report.contexts_built,
            report.contexts_failed,
            report.terms,
            started.elapsed().as_millis()
        );
        Ok(report)
    }

    /// Add a single pre-built index under `context`.
    pub fn add_context(&mut self, context: impl Into<String>, index: SuffixIndex) {
        self.indexes.insert(context.into(), index);
    }

    /// Names of `context` containing `query`, title-cased, in entry order.
    ///
    /// Codes are attached as configured. Unknown contexts yield no suggestions.
    pub fn suggest(&self, query: &str, context: &str) -> Vec<Suggestion> {
        self.suggest_with_codes(query, context, self.config.include_codes)
    }

    /// Like [`Suggestor::suggest`], choosing explicitly whether codes are attached.
    pub fn suggest_with_codes(&self, query: &str, context: &str, with_codes: bool) -> Vec<Suggestion> {
        match self.indexes.get(context) {
            Some(index) => index
                .containing(query)
                .into_iter()
                .map(|name| Suggestion::new(name, with_codes))
                .collect(),
            None => {
                log::debug!("Collection data was not found: {context}");
                Vec::new()
            }
        }
    }

    /// Index of `context`, if built.
    pub fn context(&self, context: &str) -> Option<&SuffixIndex> {
        self.indexes.get(context)
    }

    /// Keys of every built context.
    pub fn contexts(&self) -> impl Iterator<Item = &str> {
        self.indexes.keys().map(String::as_str)
    }

    /// Number of built contexts.
    pub fn context_count(&self) -> usize {
        self.indexes.len()
    }

    /// The suggestor's configuration.
    pub fn config(&self) -> &SuggestorConfig {
        &self.config
    }
}

fn build_context(corpus: ContextCorpus) -> (String, SuffixIndex) {
    let mut builder = SuffixIndexBuilder::new();
    for line in &corpus.lines {
        builder.insert(line);
    }
    (corpus.context, builder.build())
}
