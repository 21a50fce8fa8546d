//! Substring suggestions for autocomplete.

pub mod suffix;
pub mod suggestor;

// Re-export commonly used types
pub use suffix::{SuffixIndex, SuffixIndexBuilder};
pub use suggestor::{Suggestion, Suggestor, SuggestorConfig};
