//! Shared HTTP client for the museum API
//!
//! Every request goes through `ApiClient`, which:
//! - resolves paths against the configured base URL
//! - attaches `Authorization: Bearer <token>` while a session is active
//! - applies the configured timeout
//! - maps non-success statuses to `ApiError`

use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

use crate::config::ApiConfig;
use crate::session::SessionContext;

/// Error types for API calls
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// 401
    #[error("Unauthorized")]
    Unauthorized,

    /// 403; the API also answers bad credentials this way
    #[error("Forbidden")]
    Forbidden,

    /// 404
    #[error("Not found: {0}")]
    NotFound(String),

    /// Any other non-success status
    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    /// Connection, timeout or TLS failure
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Body did not match the expected shape
    #[error("Invalid response from {path}: {message}")]
    Decode { path: String, message: String },
}

impl ApiError {
    /// Build the error for a non-success status
    pub fn from_status(status: StatusCode, path: &str, body: String) -> Self {
        match status {
            StatusCode::UNAUTHORIZED => ApiError::Unauthorized,
            StatusCode::FORBIDDEN => ApiError::Forbidden,
            StatusCode::NOT_FOUND => ApiError::NotFound(path.to_string()),
            _ => ApiError::Status {
                status: status.as_u16(),
                message: if body.trim().is_empty() {
                    status.canonical_reason().unwrap_or("Unknown error").to_string()
                } else {
                    body.trim().to_string()
                },
            },
        }
    }

    /// HTTP status behind the error, if the server answered
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized => Some(401),
            ApiError::Forbidden => Some(403),
            ApiError::NotFound(_) => Some(404),
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Transport(e) => e.status().map(|s| s.as_u16()),
            ApiError::Decode { .. } => None,
        }
    }

    pub fn is_forbidden(&self) -> bool {
        self.status() == Some(403)
    }
}

/// HTTP client bound to one API base URL and one session
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: Arc<SessionContext>,
}

impl ApiClient {
    /// Create a client from configuration
    pub fn new(config: &ApiConfig, session: Arc<SessionContext>) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(concat!("muzeum/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim().trim_end_matches('/').to_string(),
            session,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &Arc<SessionContext> {
        &self.session
    }

    /// Absolute URL for an API path such as `/exhibits/3`
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        tracing::debug!(%method, path, "API request");
        let builder = self.http.request(method, self.url(path));
        match self.session.bearer_token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send(&self, builder: RequestBuilder, path: &str) -> Result<Response, ApiError> {
        let response = builder.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let error = ApiError::from_status(status, path, body);
        tracing::debug!(path, status = status.as_u16(), "API request failed: {}", error);
        Err(error)
    }

    async fn decode<T: DeserializeOwned>(response: Response, path: &str) -> Result<T, ApiError> {
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode {
            path: path.to_string(),
            message: e.to_string(),
        })
    }

    /// GET a JSON document
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let builder = self.request(Method::GET, path).query(query);
        let response = self.send(builder, path).await?;
        Self::decode(response, path).await
    }

    /// POST a JSON body, expecting a JSON document back
    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let builder = self.request(Method::POST, path).json(body);
        let response = self.send(builder, path).await?;
        Self::decode(response, path).await
    }

    /// POST a JSON body, expecting a plain-text answer
    pub async fn post_text<B>(&self, path: &str, body: &B) -> Result<String, ApiError>
    where
        B: Serialize + ?Sized,
    {
        let builder = self.request(Method::POST, path).json(body);
        let response = self.send(builder, path).await?;
        Ok(response.text().await?)
    }

    /// PUT a JSON body, expecting a JSON document back
    pub async fn put_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let builder = self.request(Method::PUT, path).json(body);
        let response = self.send(builder, path).await?;
        Self::decode(response, path).await
    }

    /// PUT without a body; only query parameters carry data
    pub async fn put_query(&self, path: &str, query: &[(&str, String)]) -> Result<(), ApiError> {
        let builder = self.request(Method::PUT, path).query(query);
        self.send(builder, path).await?;
        Ok(())
    }

    /// DELETE a resource
    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let builder = self.request(Method::DELETE, path);
        self.send(builder, path).await?;
        Ok(())
    }
}
