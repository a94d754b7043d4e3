//! Application configuration: a RON file, CLI overrides and the token from the environment.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use scribe_engine::{validate_stage_path, ConnectionSettings, DownloadSettings};
use scribe_logging::scribe_info;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_CONFIG_FILENAME: &str = "stage_scribe.ron";
pub const TOKEN_ENV: &str = "SNOWFLAKE_TOKEN";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not parse config {path:?}: {message}")]
    Parse { path: PathBuf, message: String },
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub bind: String,
    pub stage_path: String,
    pub model: String,
    pub render_math: bool,
    pub connection: ConnectionConfig,
    pub download: DownloadConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:8501".to_string(),
            stage_path: "demo_text_extraction.sample_images.image_files".to_string(),
            model: "claude-3-5-sonnet".to_string(),
            render_math: true,
            connection: ConnectionConfig::default(),
            download: DownloadConfig::default(),
        }
    }
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectionConfig {
    pub account_url: String,
    /// Usually left out of the file and supplied through `SNOWFLAKE_TOKEN`.
    #[serde(skip_serializing)]
    pub token: String,
    pub token_type: String,
    pub warehouse: Option<String>,
    pub database: Option<String>,
    pub schema: Option<String>,
    pub role: Option<String>,
    pub connect_timeout_secs: u64,
    pub statement_timeout_secs: u64,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        let defaults = ConnectionSettings::default();
        Self {
            account_url: defaults.account_url,
            token: defaults.token,
            token_type: defaults.token_type,
            warehouse: None,
            database: None,
            schema: None,
            role: None,
            connect_timeout_secs: defaults.connect_timeout.as_secs(),
            statement_timeout_secs: defaults.statement_timeout.as_secs(),
        }
    }
}

impl std::fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Same shape as the engine's settings, which already redact the token.
        std::fmt::Debug::fmt(&self.to_settings(), f)
    }
}

impl ConnectionConfig {
    fn to_settings(&self) -> ConnectionSettings {
        ConnectionSettings {
            account_url: self.account_url.clone(),
            token: self.token.clone(),
            token_type: self.token_type.clone(),
            warehouse: self.warehouse.clone(),
            database: self.database.clone(),
            schema: self.schema.clone(),
            role: self.role.clone(),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            statement_timeout: Duration::from_secs(self.statement_timeout_secs),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DownloadConfig {
    pub request_timeout_secs: u64,
    pub max_bytes: u64,
    pub url_expiry_secs: u32,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        let defaults = DownloadSettings::default();
        Self {
            request_timeout_secs: defaults.request_timeout.as_secs(),
            max_bytes: defaults.max_bytes,
            url_expiry_secs: defaults.url_expiry_secs,
        }
    }
}

impl AppConfig {
    pub fn connection_settings(&self) -> ConnectionSettings {
        self.connection.to_settings()
    }

    pub fn download_settings(&self) -> DownloadSettings {
        DownloadSettings {
            connect_timeout: Duration::from_secs(self.connection.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.download.request_timeout_secs),
            max_bytes: self.download.max_bytes,
            url_expiry_secs: self.download.url_expiry_secs,
        }
    }

    /// A non-empty token from the environment wins over the file.
    pub fn apply_token(&mut self, token: Option<String>) {
        if let Some(token) = token.filter(|t| !t.trim().is_empty()) {
            self.connection.token = token.trim().to_string();
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.connection.account_url.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "connection.account_url must be set".to_string(),
            ));
        }
        if self.model.trim().is_empty() {
            return Err(ConfigError::Invalid("model must be set".to_string()));
        }
        validate_stage_path(&self.stage_path)
            .map_err(|err| ConfigError::Invalid(err.to_string()))?;
        Ok(())
    }
}

/// Loads `path`, or `./stage_scribe.ron` when no path is given.
///
/// An explicit path must exist; a missing default file means built-in defaults.
pub fn load(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let (path, explicit) = match path {
        Some(path) => (path.to_path_buf(), true),
        None => (PathBuf::from(DEFAULT_CONFIG_FILENAME), false),
    };

    let content = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(err) if !explicit && err.kind() == std::io::ErrorKind::NotFound => {
            scribe_info!("No config file at {:?}; using defaults", path);
            return Ok(AppConfig::default());
        }
        Err(source) => return Err(ConfigError::Read { path, source }),
    };

    let config: AppConfig = ron::from_str(&content).map_err(|err| ConfigError::Parse {
        path: path.clone(),
        message: err.to_string(),
    })?;
    scribe_info!("Loaded config from {:?}", path);
    Ok(config)
}
