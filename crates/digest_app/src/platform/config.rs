//! Application settings.
//!
//! Read from `./digest.ron` (or the file named by `DIGEST_CONFIG`). Every field
//! is optional in the file; `DIGEST_API_KEY`, `DIGEST_ENDPOINT` and
//! `DIGEST_DATA_DIR` override the file when set.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use digest_engine::{SummarySettings, DEFAULT_API_HOST, DEFAULT_ENDPOINT};
use digest_logging::digest_info;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const DEFAULT_CONFIG_FILENAME: &str = "digest.ron";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {path:?}: {message}")]
    Parse { path: PathBuf, message: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub endpoint: String,
    pub api_key: Option<String>,
    pub api_host: Option<String>,
    pub summary_length: u32,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    /// Directory holding the storage slots (`articles.json`).
    pub data_dir: PathBuf,
    pub log_file: PathBuf,
    /// Mirror log output to stderr.
    pub log_to_terminal: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        let defaults = SummarySettings::default();
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: None,
            api_host: Some(DEFAULT_API_HOST.to_string()),
            summary_length: defaults.summary_length,
            connect_timeout_secs: defaults.connect_timeout.as_secs(),
            request_timeout_secs: defaults.request_timeout.as_secs(),
            data_dir: PathBuf::from("data"),
            log_file: PathBuf::from("digest.log"),
            log_to_terminal: false,
        }
    }
}

impl AppConfig {
    pub fn summary_settings(&self) -> SummarySettings {
        SummarySettings {
            endpoint: self.endpoint.clone(),
            api_key: self.api_key.clone(),
            api_host: self.api_host.clone(),
            summary_length: self.summary_length,
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
        }
    }

    fn apply_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let present = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        if let Some(key) = present("DIGEST_API_KEY") {
            self.api_key = Some(key);
        }
        if let Some(endpoint) = present("DIGEST_ENDPOINT") {
            self.endpoint = endpoint;
        }
        if let Some(dir) = present("DIGEST_DATA_DIR") {
            self.data_dir = PathBuf::from(dir);
        }
        self
    }
}

/// Loads the config file (defaults if absent) and applies environment overrides.
pub fn load() -> Result<AppConfig, ConfigError> {
    let path = std::env::var_os("DIGEST_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILENAME));
    let config = load_file(&path)?;
    Ok(config.apply_overrides(|name| std::env::var(name).ok()))
}

fn load_file(path: &Path) -> Result<AppConfig, ConfigError> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            digest_info!("No config at {:?}; using defaults", path);
            return Ok(AppConfig::default());
        }
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    parse(&text).map_err(|message| ConfigError::Parse {
        path: path.to_path_buf(),
        message,
    })
}

fn parse(text: &str) -> Result<AppConfig, String> {
    ron::from_str(text).map_err(|err| err.to_string())
}
