//! Image payloads
//!
//! Images travel inside JSON bodies as `data:<mime>;base64,<payload>` URLs.
//! This module turns local files into such URLs after checking the type
//! allow-list and size limit from `MediaConfig`.

use data_encoding::BASE64;
use std::path::{Path, PathBuf};

use crate::config::MediaConfig;

/// Error types for image handling
#[derive(Debug, thiserror::Error)]
pub enum MediaError {
    #[error("Failed to read image '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Cannot tell the image type of '{0}'")]
    UnknownType(String),

    #[error("Image type not allowed: {0}")]
    TypeNotAllowed(String),

    #[error("Image too large: {size} bytes (limit {max})")]
    TooLarge { size: u64, max: u64 },

    #[error("Image is empty")]
    Empty,

    #[error("Malformed data URL")]
    MalformedDataUrl,
}

impl MediaError {
    /// Message suitable for end users (Polish UI)
    pub fn user_message(&self) -> String {
        match self {
            MediaError::Read { path, .. } => {
                format!("Nie można odczytać pliku {}.", path.display())
            }
            MediaError::UnknownType(_) | MediaError::TypeNotAllowed(_) => {
                "Nieobsługiwany format obrazu.".to_string()
            }
            MediaError::TooLarge { max, .. } => {
                format!("Obraz jest za duży (maksymalnie {} KB).", max / 1024)
            }
            MediaError::Empty => "Plik obrazu jest pusty.".to_string(),
            MediaError::MalformedDataUrl => "Nieprawidłowy obraz.".to_string(),
        }
    }
}

/// Build a `data:` URL
pub fn data_url(mime_type: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime_type, BASE64.encode(bytes))
}

/// Split a base64 `data:` URL into MIME type and bytes
pub fn parse_data_url(url: &str) -> Option<(String, Vec<u8>)> {
    let rest = url.strip_prefix("data:")?;
    let (header, payload) = rest.split_once(',')?;
    let mime_type = header.strip_suffix(";base64")?;
    let bytes = BASE64.decode(payload.trim().as_bytes()).ok()?;
    Some((mime_type.to_string(), bytes))
}

/// Encodes images for upload
#[derive(Debug, Clone)]
pub struct MediaService {
    config: MediaConfig,
}

impl MediaService {
    pub fn new(config: MediaConfig) -> Self {
        Self { config }
    }

    /// Check type and size, then encode
    pub fn encode_bytes(&self, mime_type: &str, bytes: &[u8]) -> Result<String, MediaError> {
        if !self.config.is_type_allowed(mime_type) {
            return Err(MediaError::TypeNotAllowed(mime_type.to_string()));
        }
        if bytes.is_empty() {
            return Err(MediaError::Empty);
        }
        let size = bytes.len() as u64;
        if size > self.config.max_file_size {
            return Err(MediaError::TooLarge {
                size,
                max: self.config.max_file_size,
            });
        }
        Ok(data_url(mime_type, bytes))
    }

    /// Read a local image and encode it
    pub async fn encode_file(&self, path: &Path) -> Result<String, MediaError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();
        let mime_type = MediaConfig::mime_for_extension(extension)
            .ok_or_else(|| MediaError::UnknownType(path.display().to_string()))?;
        if !self.config.is_type_allowed(mime_type) {
            return Err(MediaError::TypeNotAllowed(mime_type.to_string()));
        }

        let read_error = |source| MediaError::Read {
            path: path.to_path_buf(),
            source,
        };
        let size = tokio::fs::metadata(path).await.map_err(read_error)?.len();
        if size > self.config.max_file_size {
            return Err(MediaError::TooLarge {
                size,
                max: self.config.max_file_size,
            });
        }
        let bytes = tokio::fs::read(path).await.map_err(read_error)?;

        tracing::debug!(path = %path.display(), size, mime_type, "Encoded image");
        self.encode_bytes(mime_type, &bytes)
    }

    /// Turn a CLI image argument into an image URL
    ///
    /// `http(s)://` URLs pass through unchanged, `data:` URLs are checked,
    /// anything else is read as a local file. An empty value stays empty.
    pub async fn resolve(&self, value: &str) -> Result<String, MediaError> {
        let value = value.trim();
        if value.is_empty() || value.starts_with("http://") || value.starts_with("https://") {
            return Ok(value.to_string());
        }
        if value.starts_with("data:") {
            let (mime_type, bytes) = parse_data_url(value).ok_or(MediaError::MalformedDataUrl)?;
            return self.encode_bytes(&mime_type, &bytes);
        }
        self.encode_file(Path::new(value)).await
    }
}
