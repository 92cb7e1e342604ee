//! Glossary configuration.
//!
//! Settings come from an optional JSON file, then environment variables, then
//! whatever the caller (usually the CLI) overrides explicitly.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::repository::DEFAULT_API_URL;

pub const APP_DIR_NAME: &str = "glossary";
pub const DEFAULT_DB_FILE_NAME: &str = "glossary.sqlite";

pub const ENV_SOURCE: &str = "GLOSSARY_SOURCE";
pub const ENV_DB_PATH: &str = "GLOSSARY_DB_PATH";
pub const ENV_BUNDLE_PATH: &str = "GLOSSARY_BUNDLE_PATH";
pub const ENV_API_URL: &str = "GLOSSARY_API_URL";

/// Which repository backend serves the glossary
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Embedded SQLite database file
    Sqlite,
    /// Remote HTTP endpoint with in-memory cache
    #[default]
    Remote,
    /// Static JSON bundle
    Bundled,
}

impl std::str::FromStr for SourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sqlite" => Ok(SourceKind::Sqlite),
            "remote" => Ok(SourceKind::Remote),
            "bundled" => Ok(SourceKind::Bundled),
            other => Err(format!("Unknown glossary source: {}", other)),
        }
    }
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceKind::Sqlite => write!(f, "sqlite"),
            SourceKind::Remote => write!(f, "remote"),
            SourceKind::Bundled => write!(f, "bundled"),
        }
    }
}

/// Error types for configuration loading
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("Failed to read config file: {0}")]
    Read(String),
    /// Config file is not valid JSON for this schema
    #[error("Failed to parse config file: {0}")]
    Parse(String),
    /// An environment override has an unusable value
    #[error("Invalid value for {name}: {message}")]
    InvalidEnv { name: String, message: String },
    /// A required setting is missing
    #[error("Missing setting: {0}")]
    Missing(String),
}

/// Glossary settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GlossaryConfig {
    /// Backend to read terms from
    pub source: SourceKind,
    /// SQLite database file; defaults to the user data directory
    pub db_path: Option<PathBuf>,
    /// JSON bundle file for the bundled backend
    pub bundle_path: Option<PathBuf>,
    /// Glossary endpoint for the remote backend
    pub api_url: String,
    /// Request timeout for the remote backend; 0 disables it
    pub request_timeout_secs: u64,
}

impl Default for GlossaryConfig {
    fn default() -> Self {
        Self {
            source: SourceKind::default(),
            db_path: None,
            bundle_path: None,
            api_url: DEFAULT_API_URL.to_string(),
            request_timeout_secs: 30,
        }
    }
}

impl GlossaryConfig {
    /// Load settings from a JSON file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        crate::debug!("Loading glossary config from {:?}", path);

        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Read(format!("{}: {}", path.display(), e)))?;
        serde_json::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load from `path` when given, otherwise start from defaults, then
    /// apply environment overrides
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        config.with_env_overrides()
    }

    /// Apply `GLOSSARY_*` environment variables on top of these settings
    pub fn with_env_overrides(mut self) -> Result<Self, ConfigError> {
        if let Some(source) = env_value(ENV_SOURCE) {
            self.source = source.parse().map_err(|message| ConfigError::InvalidEnv {
                name: ENV_SOURCE.to_string(),
                message,
            })?;
        }
        if let Some(path) = env_value(ENV_DB_PATH) {
            self.db_path = Some(PathBuf::from(path));
        }
        if let Some(path) = env_value(ENV_BUNDLE_PATH) {
            self.bundle_path = Some(PathBuf::from(path));
        }
        if let Some(url) = env_value(ENV_API_URL) {
            self.api_url = url;
        }
        Ok(self)
    }

    /// Database path, falling back to `<data dir>/glossary/glossary.sqlite`
    pub fn resolved_db_path(&self) -> Result<PathBuf, ConfigError> {
        if let Some(path) = &self.db_path {
            return Ok(path.clone());
        }
        dirs::data_dir()
            .map(|dir| dir.join(APP_DIR_NAME).join(DEFAULT_DB_FILE_NAME))
            .ok_or_else(|| ConfigError::Missing("dbPath (no user data directory)".to_string()))
    }

    /// Bundle path; required for the bundled backend
    pub fn resolved_bundle_path(&self) -> Result<PathBuf, ConfigError> {
        self.bundle_path
            .clone()
            .ok_or_else(|| ConfigError::Missing("bundlePath".to_string()))
    }

    /// Request timeout, `None` when disabled
    pub fn request_timeout(&self) -> Option<Duration> {
        (self.request_timeout_secs > 0).then(|| Duration::from_secs(self.request_timeout_secs))
    }
}

fn env_value(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.trim().is_empty())
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
