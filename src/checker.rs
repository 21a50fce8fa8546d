//! The checker: one explicitly constructed service bundling both engines.
//!
//! A [`Checker`] is built once from a [`CheckerConfig`] and is read-only
//! afterwards. It is `Send + Sync`; wrap it in an `Arc` to share it between
//! request handlers.
//!
//! # Examples
//!
//! ```
//! use toponym::checker::Checker;
//! use toponym::config::CheckerConfig;
//! use toponym::source::InMemorySource;
//!
//! let spelling = InMemorySource::new().with_context("MLA", ["cordoba", "buenos aires"]);
//! let states = InMemorySource::new().with_context("MLA", ["Cordoba", "Buenos Aires"]);
//! let checker = Checker::from_sources(CheckerConfig::default(), &spelling, &[&states]).unwrap();
//!
//! assert_eq!(checker.correct("cordba", "MLA"), "cordoba");
//! assert_eq!(checker.suggest("aires", "MLA")[0].name, "Buenos Aires");
//! ```

use serde::{Deserialize, Serialize};

use crate::config::CheckerConfig;
use crate::error::Result;
use crate::source::{
    ContextKeyStyle, CorpusSource, FlatDirectorySource, InMemorySource, NestedDirectorySource,
    TrainingReport,
};
use crate::spelling::corrector::SpellingCorrector;
use crate::spelling::levenshtein::damerau_levenshtein_distance;
use crate::spelling::lookup::SuggestItem;
use crate::suggest::suggestor::{Suggestion, Suggestor};

/// Training counters of both engines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckerReport {
    /// Spelling corrector counters.
    pub spelling: TrainingReport,
    /// Suggestor counters, all tiers together.
    pub suggestions: TrainingReport,
}

/// Spelling corrector and suggestor trained from the same configuration.
#[derive(Debug, Clone)]
pub struct Checker {
    corrector: SpellingCorrector,
    suggestor: Suggestor,
    report: CheckerReport,
}

impl Checker {
    /// Train both engines from the directories named in `config`.
    ///
    /// Missing directories are logged and leave their tier empty.
    pub fn from_config(config: CheckerConfig) -> Result<Self> {
        config.validate()?;

        let spelling: Box<dyn CorpusSource> = match &config.spelling_names_dir {
            Some(dir) => Box::new(FlatDirectorySource::new(dir, ContextKeyStyle::FileStem)),
            None => {
                log::warn!("No spelling names directory configured");
                Box::new(InMemorySource::new())
            }
        };

        let mut tiers: Vec<Box<dyn CorpusSource>> = Vec::new();
        if let Some(dir) = &config.suggestor_states_dir {
            tiers.push(Box::new(FlatDirectorySource::new(dir, ContextKeyStyle::FileName)));
        }
        if let Some(dir) = &config.suggestor_cities_dir {
            tiers.push(Box::new(FlatDirectorySource::new(dir, ContextKeyStyle::NameCode)));
        }
        if let Some(dir) = &config.suggestor_streets_dir {
            tiers.push(Box::new(NestedDirectorySource::new(dir)));
        }
        let tiers: Vec<&dyn CorpusSource> = tiers.iter().map(|tier| tier.as_ref()).collect();

        Self::from_sources(config, spelling.as_ref(), &tiers)
    }

    /// Train the corrector on `spelling` and the suggestor on every tier of `suggestions`.
    pub fn from_sources(
        config: CheckerConfig,
        spelling: &dyn CorpusSource,
        suggestions: &[&dyn CorpusSource],
    ) -> Result<Self> {
        config.validate()?;
        let CheckerConfig {
            corrector,
            suggestor,
            ..
        } = config;

        let corrector = SpellingCorrector::train(corrector, spelling)?;

        let mut report = CheckerReport {
            spelling: corrector.report(),
            ..Default::default()
        };
        let mut suggestor = Suggestor::new(suggestor);
        for tier in suggestions {
            report.suggestions.merge(suggestor.train(*tier)?);
        }

        Ok(Checker {
            corrector,
            suggestor,
            report,
        })
    }

    /// Correct `text` in `context`, returning it unchanged when nothing matches.
    pub fn correct(&self, text: &str, context: &str) -> String {
        self.corrector.correct(text, context)
    }

    /// Suggestions for `query` in `context`, with codes as configured.
    pub fn suggest(&self, query: &str, context: &str) -> Vec<Suggestion> {
        self.suggestor.suggest(query, context)
    }

    /// Suggestions for `query` in `context`, choosing whether codes are attached.
    pub fn suggest_with_codes(&self, query: &str, context: &str, with_codes: bool) -> Vec<Suggestion> {
        self.suggestor.suggest_with_codes(query, context, with_codes)
    }

    /// Ranked spelling suggestions for `term` within `max_distance` edits.
    pub fn lookup(&self, term: &str, context: &str, max_distance: usize) -> Vec<SuggestItem> {
        self.corrector.lookup(&term.to_lowercase(), context, max_distance)
    }

    /// Damerau-Levenshtein distance between `a` and `b`.
    pub fn distance(&self, a: &str, b: &str) -> usize {
        damerau_levenshtein_distance(a, b)
    }

    /// The spelling corrector.
    pub fn corrector(&self) -> &SpellingCorrector {
        &self.corrector
    }

    /// The suggestor.
    pub fn suggestor(&self) -> &Suggestor {
        &self.suggestor
    }

    /// Training counters.
    pub fn report(&self) -> CheckerReport {
        self.report
    }
}
