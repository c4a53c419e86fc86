use std::path::Path;

use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use crate::cli::{ConnectArgs, DEFAULT_URL};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unable to load config file {path}: {reason}")]
    Unreadable { path: String, reason: String },

    #[error("invalid config file {path}: {reason}")]
    Invalid { path: String, reason: String },
}

/// Settings loadable from a TOML config file.
///
/// Unknown keys are rejected so a typo fails loudly instead of silently
/// falling back to defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub url: Option<String>,
    pub key_file: Option<String>,
}

impl FileConfig {
    /// Load from a TOML file; a missing file yields the empty config.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            info!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path).map_err(|err| ConfigError::Unreadable {
            path: path.display().to_string(),
            reason: err.to_string(),
        })?;
        toml::from_str(&raw).map_err(|err| ConfigError::Invalid {
            path: path.display().to_string(),
            reason: err.to_string(),
        })
    }
}

/// Settings a command runs with, after merging all sources.
///
/// Priority: command-line flags, then the config file, then built-in
/// defaults.
#[derive(Debug)]
pub struct ResolvedConfig {
    pub url: String,
    pub key_file: Option<String>,
}

impl ResolvedConfig {
    pub fn merge(connect: &ConnectArgs, key_file_flag: Option<&str>, file: &FileConfig) -> Self {
        Self {
            url: connect
                .url
                .clone()
                .or_else(|| file.url.clone())
                .unwrap_or_else(|| DEFAULT_URL.to_string()),
            key_file: key_file_flag
                .map(str::to_string)
                .or_else(|| file.key_file.clone()),
        }
    }
}
