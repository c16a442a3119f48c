//! CLI configuration: TOML file plus environment overrides.
//!
//! Lookup order for the file: `--config`, then `$SPRINTDESK_CONFIG`, then
//! built-in defaults. `$SPRINTDESK_BASE_URL` and `$SPRINTDESK_TOKEN_PATH`
//! override whatever the file says.

use serde::{Deserialize, Serialize};
use sprintdesk_transport::DEFAULT_BASE_URL;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

pub const CONFIG_ENV: &str = "SPRINTDESK_CONFIG";
pub const BASE_URL_ENV: &str = "SPRINTDESK_BASE_URL";
pub const TOKEN_PATH_ENV: &str = "SPRINTDESK_TOKEN_PATH";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_TOKEN_FILE: &str = ".sprintdesk/token.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {reason}")]
    Parse { path: String, reason: String },

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SprintDeskConfig {
    pub base_url: String,
    pub token_path: PathBuf,
    pub timeout_secs: u64,
}

impl SprintDeskConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    fn validate(self) -> Result<Self, ConfigError> {
        if self.base_url.trim().is_empty() {
            return Err(ConfigError::Invalid("base_url must not be empty".to_string()));
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "timeout_secs must be positive".to_string(),
            ));
        }
        Ok(self)
    }
}

/// On-disk shape; every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub base_url: Option<String>,
    pub token_path: Option<PathBuf>,
    pub timeout_secs: Option<u64>,
}

impl ConfigFile {
    pub fn parse(raw: &str, origin: &str) -> Result<Self, ConfigError> {
        toml::from_str(raw).map_err(|e| ConfigError::Parse {
            path: origin.to_string(),
            reason: e.message().to_string(),
        })
    }
}

/// Effective config and the file it came from, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedConfig {
    pub config: SprintDeskConfig,
    pub source: Option<PathBuf>,
}

pub fn load(explicit: Option<&Path>) -> Result<LoadedConfig, ConfigError> {
    load_with(explicit, |key| std::env::var(key).ok())
}

/// `env` stands in for the process environment.
pub fn load_with<F>(explicit: Option<&Path>, env: F) -> Result<LoadedConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let source = explicit
        .map(Path::to_path_buf)
        .or_else(|| non_empty(env(CONFIG_ENV)).map(PathBuf::from));

    let file = match &source {
        Some(path) => {
            let origin = path.display().to_string();
            let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
                path: origin.clone(),
                source,
            })?;
            ConfigFile::parse(&raw, &origin)?
        }
        None => ConfigFile::default(),
    };

    let mut config = SprintDeskConfig {
        base_url: file
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        token_path: file
            .token_path
            .unwrap_or_else(|| default_token_path(&env)),
        timeout_secs: file.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS),
    };

    if let Some(base_url) = non_empty(env(BASE_URL_ENV)) {
        config.base_url = base_url;
    }
    if let Some(token_path) = non_empty(env(TOKEN_PATH_ENV)) {
        config.token_path = PathBuf::from(token_path);
    }

    Ok(LoadedConfig {
        config: config.validate()?,
        source,
    })
}

fn default_token_path<F>(env: F) -> PathBuf
where
    F: Fn(&str) -> Option<String>,
{
    match non_empty(env("HOME")) {
        Some(home) => Path::new(&home).join(DEFAULT_TOKEN_FILE),
        None => PathBuf::from(DEFAULT_TOKEN_FILE),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
