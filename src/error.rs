//! Error types for the Toponym library.
//!
//! Build-time failures (missing corpus directories, unreadable files, bad lines)
//! are represented by [`ToponymError`] and reported per context. Query-time
//! operations never surface these to callers; they degrade to empty or identity
//! results instead.
//!
//! # Examples
//!
//! ```
//! use toponym::error::{ToponymError, Result};
//!
//! fn load() -> Result<()> {
//!     Err(ToponymError::source_unavailable("/data/names/MLA"))
//! }
//!
//! match load() {
//!     Ok(_) => println!("loaded"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use thiserror::Error;

/// The main error type for Toponym operations.
#[derive(Error, Debug)]
pub enum ToponymError {
    /// A corpus or name-list location is missing or unreadable
    #[error("Source unavailable: {0}")]
    SourceUnavailable(String),

    /// A single corpus line could not be decoded or inserted
    #[error("Malformed entry: {0}")]
    MalformedEntry(String),

    /// Term count for a context would overflow the identifier space
    #[error("Capacity exceeded: {0}")]
    CapacityExceeded(String),

    /// A query named a context with no built index
    #[error("Unknown context: {0}")]
    UnknownContext(String),

    /// Invalid configuration values
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),
}

/// Result type alias for operations that may fail with ToponymError.
pub type Result<T> = std::result::Result<T, ToponymError>;

impl ToponymError {
    /// Create a new source-unavailable error.
    pub fn source_unavailable<S: Into<String>>(msg: S) -> Self {
        ToponymError::SourceUnavailable(msg.into())
    }

    /// Create a new malformed-entry error.
    pub fn malformed_entry<S: Into<String>>(msg: S) -> Self {
        ToponymError::MalformedEntry(msg.into())
    }

    /// Create a new capacity-exceeded error.
    pub fn capacity_exceeded<S: Into<String>>(msg: S) -> Self {
        ToponymError::CapacityExceeded(msg.into())
    }

    /// Create a new unknown-context error.
    pub fn unknown_context<S: Into<String>>(context: S) -> Self {
        ToponymError::UnknownContext(context.into())
    }

    /// Create a new invalid config error.
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        ToponymError::InvalidConfig(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        ToponymError::Other(msg.into())
    }
}
