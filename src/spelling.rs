//! Spelling correction for place names.
//!
//! Terms are indexed per context through their deletion closure, so a query is
//! matched by probing its own deletes instead of enumerating every possible
//! edit. Candidates are verified with a true Damerau-Levenshtein distance.

pub mod corrector;
pub mod dictionary;
pub mod levenshtein;
pub mod lookup;

// Re-export commonly used types
pub use corrector::{CorrectorConfig, SpellingCorrector};
pub use dictionary::{
    AdmissionPolicy, ContextDictionary, DeletionIndex, DictionaryEntry, DictionarySettings,
    Insertion, WordId, delete_closure,
};
pub use levenshtein::damerau_levenshtein_distance;
pub use lookup::{SuggestItem, Verbosity};
