use anyhow::{Context, Result};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::suffix_array::DEFAULT_PARALLEL_SORT_THRESHOLD;

const APP_NAME: &str = "argot";
const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown timezone location: {0}")]
    InvalidLocation(String),
}

/// Application configuration stored in the user config directory
///
/// Every field has a default, so a partial file only overrides what it names.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppConfig {
    /// Phrases per generated text
    #[serde(default = "default_sentence_length")]
    pub sentence_length: usize,

    /// Words per phrase
    #[serde(default = "default_k")]
    pub k: usize,

    /// IANA timezone the logs were written in
    #[serde(default = "default_location")]
    pub location: String,

    /// Suffix count above which sorting runs in parallel
    #[serde(default = "default_parallel_sort_threshold")]
    pub parallel_sort_threshold: usize,
}

fn default_sentence_length() -> usize {
    12
}

fn default_k() -> usize {
    2
}

fn default_location() -> String {
    "America/Vancouver".to_string()
}

fn default_parallel_sort_threshold() -> usize {
    DEFAULT_PARALLEL_SORT_THRESHOLD
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            sentence_length: default_sentence_length(),
            k: default_k(),
            location: default_location(),
            parallel_sort_threshold: default_parallel_sort_threshold(),
        }
    }
}

impl AppConfig {
    /// Load config from the user config directory, or return default if not found
    pub fn load() -> Result<Self> {
        match get_config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load config from `path`, or return default if the file does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: AppConfig = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// Timezone named by `location`
    pub fn timezone(&self) -> Result<Tz, ConfigError> {
        parse_location(&self.location)
    }
}

/// Resolve an IANA location name such as `Europe/Berlin`
pub fn parse_location(name: &str) -> Result<Tz, ConfigError> {
    name.parse::<Tz>()
        .map_err(|_| ConfigError::InvalidLocation(name.to_string()))
}

/// Get the path to the config file, if the platform has a config directory
pub fn get_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|base| base.join(APP_NAME).join(CONFIG_FILE))
}
