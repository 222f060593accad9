//! Configuration module for groupdrive.

use serde::Deserialize;
use std::path::Path;

use crate::group::DEFAULT_MAX_CODE_ATTEMPTS;
use crate::{DriveError, Result};

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct WebConfig {
    /// Host address to bind.
    #[serde(default = "default_web_host")]
    pub host: String,
    /// Port number for the HTTP API.
    #[serde(default = "default_web_port")]
    pub port: u16,
    /// CORS allowed origins (empty = any origin, no credentials).
    #[serde(default)]
    pub cors_origins: Vec<String>,
    /// Whether to serve the browser UI as static files.
    #[serde(default)]
    pub serve_static: bool,
    /// Path to static files directory.
    #[serde(default = "default_static_path")]
    pub static_path: String,
}

fn default_web_host() -> String {
    "0.0.0.0".to_string()
}

fn default_web_port() -> u16 {
    3001
}

fn default_static_path() -> String {
    "web/dist".to_string()
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            host: default_web_host(),
            port: default_web_port(),
            cors_origins: vec![],
            serve_static: false,
            static_path: default_static_path(),
        }
    }
}

/// Uploaded file storage configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Root directory for group uploads.
    #[serde(default = "default_uploads_path")]
    pub uploads_path: String,
    /// Maximum upload size in megabytes.
    #[serde(default = "default_max_upload_size")]
    pub max_upload_size_mb: u64,
}

fn default_uploads_path() -> String {
    "uploads".to_string()
}

fn default_max_upload_size() -> u64 {
    50
}

impl StorageConfig {
    /// Maximum upload size in bytes.
    pub fn max_upload_size_bytes(&self) -> u64 {
        self.max_upload_size_mb * 1024 * 1024
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            uploads_path: default_uploads_path(),
            max_upload_size_mb: default_max_upload_size(),
        }
    }
}

/// Group configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct GroupsConfig {
    /// How many random codes to try before group creation fails.
    #[serde(default = "default_max_code_attempts")]
    pub max_code_attempts: usize,
}

fn default_max_code_attempts() -> usize {
    DEFAULT_MAX_CODE_ATTEMPTS
}

impl Default for GroupsConfig {
    fn default() -> Self {
        Self {
            max_code_attempts: default_max_code_attempts(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Path to the log file (empty = console only).
    #[serde(default)]
    pub file: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: String::new(),
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// HTTP server configuration.
    #[serde(default)]
    pub web: WebConfig,
    /// Storage configuration.
    #[serde(default)]
    pub storage: StorageConfig,
    /// Group configuration.
    #[serde(default)]
    pub groups: GroupsConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(DriveError::Io)?;
        Self::parse(&content)
    }

    /// Load configuration from a TOML file and apply environment variable overrides.
    pub fn load_with_env<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| DriveError::Config(format!("config parse error: {e}")))
    }

    /// Apply environment variable overrides to the configuration.
    ///
    /// Supported environment variables:
    /// - `GROUPDRIVE_PORT`: Override the HTTP port
    /// - `GROUPDRIVE_UPLOADS_PATH`: Override the uploads directory
    pub fn apply_env_overrides(&mut self) {
        if let Ok(port) = std::env::var("GROUPDRIVE_PORT") {
            match port.parse() {
                Ok(port) => self.web.port = port,
                Err(_) => tracing::warn!(value = %port, "Ignoring invalid GROUPDRIVE_PORT"),
            }
        }

        if let Ok(path) = std::env::var("GROUPDRIVE_UPLOADS_PATH") {
            if !path.is_empty() {
                self.storage.uploads_path = path;
            }
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.storage.uploads_path.trim().is_empty() {
            return Err(DriveError::Config(
                "storage.uploads_path must not be empty".to_string(),
            ));
        }
        if self.storage.max_upload_size_mb == 0 {
            return Err(DriveError::Config(
                "storage.max_upload_size_mb must be greater than 0".to_string(),
            ));
        }
        if self.groups.max_code_attempts == 0 {
            return Err(DriveError::Config(
                "groups.max_code_attempts must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}
