//! Configuration management
//!
//! This module handles loading and parsing configuration for the muzeum client.
//! Configuration can be loaded from:
//! - muzeum.yml file
//! - Environment variables (override file settings)
//!
//! Missing optional values are filled with sensible defaults.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Museum API connection
    #[serde(default)]
    pub api: ApiConfig,
    /// Stored session (token storage)
    #[serde(default)]
    pub session: SessionConfig,
    /// Booking wizard limits
    #[serde(default)]
    pub booking: BookingConfig,
    /// Image payloads for exhibits, exhibitions and donations
    #[serde(default)]
    pub media: MediaConfig,
}

/// Museum API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL including the API prefix, e.g. `http://localhost:8080/api/v1`
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8080/api/v1".to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

/// Session storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// File holding the persisted key/value session store
    #[serde(default = "default_store_path")]
    pub store_path: PathBuf,
    /// Key under which the session token is stored
    #[serde(default = "default_token_key")]
    pub token_key: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            store_path: default_store_path(),
            token_key: default_token_key(),
        }
    }
}

fn default_store_path() -> PathBuf {
    PathBuf::from("data/session.json")
}

fn default_token_key() -> String {
    "token".to_string()
}

/// Booking configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BookingConfig {
    /// Upper bound on party size. `None` leaves the limit to the server.
    #[serde(default)]
    pub max_guests: Option<u32>,
}

/// Image payload configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaConfig {
    /// Maximum image size in bytes (default: 5MB)
    #[serde(default = "default_max_file_size")]
    pub max_file_size: u64,
    /// Allowed image MIME types
    #[serde(default = "default_allowed_types")]
    pub allowed_types: Vec<String>,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            max_file_size: default_max_file_size(),
            allowed_types: default_allowed_types(),
        }
    }
}

fn default_max_file_size() -> u64 {
    5 * 1024 * 1024 // 5MB
}

fn default_allowed_types() -> Vec<String> {
    vec![
        "image/jpeg".to_string(),
        "image/png".to_string(),
        "image/gif".to_string(),
        "image/webp".to_string(),
    ]
}

impl MediaConfig {
    /// Check if a MIME type is allowed
    pub fn is_type_allowed(&self, mime_type: &str) -> bool {
        self.allowed_types.iter().any(|t| t == mime_type)
    }

    /// Guess a MIME type from a file extension
    pub fn mime_for_extension(extension: &str) -> Option<&'static str> {
        match extension.to_lowercase().as_str() {
            "jpg" | "jpeg" => Some("image/jpeg"),
            "png" => Some("image/png"),
            "gif" => Some("image/gif"),
            "webp" => Some("image/webp"),
            "svg" => Some("image/svg+xml"),
            "bmp" => Some("image/bmp"),
            _ => None,
        }
    }
}

/// Error type for configuration parsing
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    FileRead {
        path: String,
        source: std::io::Error,
    },
    #[error("Failed to parse config file '{path}': {message}")]
    ParseError {
        path: String,
        message: String,
    },
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

impl Config {
    /// Load configuration from file
    ///
    /// If the file doesn't exist, returns default configuration.
    /// If the file exists but is invalid YAML, returns an error with details.
    pub fn load(path: &std::path::Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.display().to_string(),
            source: e,
        })?;

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = serde_yaml::from_str(&content).map_err(|e| {
            ConfigError::ParseError {
                path: path.display().to_string(),
                message: format_yaml_error(&e),
            }
        })?;

        Ok(config)
    }

    /// Load configuration from file with environment variable overrides,
    /// then validate the result.
    ///
    /// Environment variables follow the pattern:
    /// - MUZEUM_API_BASE_URL
    /// - MUZEUM_API_TIMEOUT_SECONDS
    /// - MUZEUM_SESSION_STORE_PATH
    /// - MUZEUM_SESSION_TOKEN_KEY
    /// - MUZEUM_BOOKING_MAX_GUESTS
    /// - MUZEUM_MEDIA_MAX_FILE_SIZE
    pub fn load_with_env(path: &std::path::Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Apply environment variable overrides to the configuration
    fn apply_env_overrides(&mut self) {
        if let Ok(base_url) = std::env::var("MUZEUM_API_BASE_URL") {
            self.api.base_url = base_url;
        }
        if let Ok(timeout) = std::env::var("MUZEUM_API_TIMEOUT_SECONDS") {
            if let Ok(timeout) = timeout.parse::<u64>() {
                self.api.timeout_seconds = timeout;
            }
        }

        if let Ok(path) = std::env::var("MUZEUM_SESSION_STORE_PATH") {
            self.session.store_path = PathBuf::from(path);
        }
        if let Ok(key) = std::env::var("MUZEUM_SESSION_TOKEN_KEY") {
            self.session.token_key = key;
        }

        if let Ok(max) = std::env::var("MUZEUM_BOOKING_MAX_GUESTS") {
            if let Ok(max) = max.parse::<u32>() {
                self.booking.max_guests = Some(max);
            }
        }

        if let Ok(size) = std::env::var("MUZEUM_MEDIA_MAX_FILE_SIZE") {
            if let Ok(size) = size.parse::<u64>() {
                self.media.max_file_size = size;
            }
        }
    }

    /// Check values that serde cannot reject on its own
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = self.api.base_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::ValidationError(format!(
                "api.base_url must start with http:// or https://, got '{}'",
                self.api.base_url
            )));
        }
        if self.api.timeout_seconds == 0 {
            return Err(ConfigError::ValidationError(
                "api.timeout_seconds must be greater than zero".to_string(),
            ));
        }
        if self.session.token_key.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "session.token_key cannot be empty".to_string(),
            ));
        }
        if self.booking.max_guests == Some(0) {
            return Err(ConfigError::ValidationError(
                "booking.max_guests must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Format YAML parsing error with location and context
fn format_yaml_error(e: &serde_yaml::Error) -> String {
    if let Some(location) = e.location() {
        format!(
            "at line {}, column {}: {}",
            location.line(),
            location.column(),
            e
        )
    } else {
        e.to_string()
    }
}

// Tests touching MUZEUM_* variables share this lock.
#[cfg(test)]
static CONFIG_ENV_MUTEX: std::sync::Mutex<()> = std::sync::Mutex::new(());
