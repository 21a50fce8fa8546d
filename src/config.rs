//! Checker configuration: corpus locations and engine settings.
//!
//! A configuration is read from a JSON file and the four corpus locations can
//! be overridden from the environment:
//!
//! ```json
//! {
//!   "spelling_names_dir": "/data/spelling",
//!   "suggestor_states_dir": "/data/states",
//!   "suggestor_cities_dir": "/data/cities",
//!   "suggestor_streets_dir": "/data/streets",
//!   "corrector": { "max_edit_distance": 2, "verbosity": "all" },
//!   "suggestor": { "include_codes": true }
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, ToponymError};
use crate::spelling::corrector::CorrectorConfig;
use crate::suggest::suggestor::SuggestorConfig;

/// Environment variable overriding [`CheckerConfig::spelling_names_dir`].
pub const ENV_SPELLING_NAMES_DIR: &str = "TOPONYM_SPELLING_NAMES_DIR";
/// Environment variable overriding [`CheckerConfig::suggestor_states_dir`].
pub const ENV_SUGGESTOR_STATES_DIR: &str = "TOPONYM_SUGGESTOR_STATES_DIR";
/// Environment variable overriding [`CheckerConfig::suggestor_cities_dir`].
pub const ENV_SUGGESTOR_CITIES_DIR: &str = "TOPONYM_SUGGESTOR_CITIES_DIR";
/// Environment variable overriding [`CheckerConfig::suggestor_streets_dir`].
pub const ENV_SUGGESTOR_STREETS_DIR: &str = "TOPONYM_SUGGESTOR_STREETS_DIR";

/// Configuration of a [`Checker`](crate::checker::Checker).
///
/// Every corpus location is optional; an engine tier without a location is
/// simply left empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckerConfig {
    /// Directory with one spelling corpus file per site (`MLA`, `MLB`, ...).
    pub spelling_names_dir: Option<PathBuf>,
    /// Directory with one state-name list per site.
    pub suggestor_states_dir: Option<PathBuf>,
    /// Directory with one city-name list per state.
    pub suggestor_cities_dir: Option<PathBuf>,
    /// Directory with one sub-directory per state holding one street list per city.
    pub suggestor_streets_dir: Option<PathBuf>,
    /// Spelling corrector settings.
    pub corrector: CorrectorConfig,
    /// Suggestor settings.
    pub suggestor: SuggestorConfig,
}

impl CheckerConfig {
    /// Load a configuration from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            ToponymError::invalid_config(format!("Failed to read {}: {e}", path.display()))
        })?;
        Self::from_json_str(&content)
    }

    /// Parse a configuration from JSON text.
    pub fn from_json_str(content: &str) -> Result<Self> {
        let config: CheckerConfig = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply the `TOPONYM_*` environment variables on top of this configuration.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides read through `lookup`, keyed by environment variable name.
    ///
    /// Empty values are ignored.
    pub fn with_overrides_from<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| {
            lookup(key)
                .filter(|value| !value.is_empty())
                .map(PathBuf::from)
        };
        if let Some(dir) = read(ENV_SPELLING_NAMES_DIR) {
            self.spelling_names_dir = Some(dir);
        }
        if let Some(dir) = read(ENV_SUGGESTOR_STATES_DIR) {
            self.suggestor_states_dir = Some(dir);
        }
        if let Some(dir) = read(ENV_SUGGESTOR_CITIES_DIR) {
            self.suggestor_cities_dir = Some(dir);
        }
        if let Some(dir) = read(ENV_SUGGESTOR_STREETS_DIR) {
            self.suggestor_streets_dir = Some(dir);
        }
        self
    }

    /// Check the configuration for values the engines cannot work with.
    pub fn validate(&self) -> Result<()> {
        self.corrector.validate()?;
        self.suggestor.validate()
    }
}
