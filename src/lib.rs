//! # Toponym
//!
//! Spelling correction and autocomplete for geographic names (states, cities
//! and streets), partitioned by context.
//!
//! ## Features
//!
//! - Deletion-indexed spelling correction bounded by edit distance
//! - True Damerau-Levenshtein verification of every candidate
//! - Multi-word fallback that corrects token by token
//! - Substring suggestions backed by a per-context suffix array
//! - Parallel per-context training
//!
//! ## Example
//!
//! ```
//! use toponym::prelude::*;
//!
//! let source = InMemorySource::new().with_context("MLA", ["cordoba", "buenos aires", "santa fe"]);
//! let corrector = SpellingCorrector::train(CorrectorConfig::default(), &source).unwrap();
//!
//! assert_eq!(corrector.correct("cordba", "MLA"), "cordoba");
//! assert_eq!(corrector.correct("cordba", "MLB"), "cordba");
//! ```

pub mod checker;
pub mod cli;
pub mod config;
pub mod error;
pub mod source;
pub mod spelling;
pub mod suggest;
pub mod text;

pub mod prelude {
    pub use crate::checker::{Checker, CheckerReport};
    pub use crate::config::CheckerConfig;
    pub use crate::error::{Result, ToponymError};
    pub use crate::source::{
        ContextCorpus, ContextKeyStyle, CorpusSource, FlatDirectorySource, InMemorySource,
        NestedDirectorySource, TrainingReport,
    };
    pub use crate::spelling::{
        AdmissionPolicy, CorrectorConfig, SpellingCorrector, SuggestItem, Verbosity,
        damerau_levenshtein_distance,
    };
    pub use crate::suggest::{Suggestion, Suggestor, SuggestorConfig};
    pub use crate::text::{name_code, state_key, street_key, title_case};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
