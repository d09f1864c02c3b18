//! Auth repository
//!
//! Token issuance endpoints under `/auth`.

use async_trait::async_trait;
use std::sync::Arc;

use super::ApiResult;
use crate::client::ApiClient;
use crate::models::{AuthResponse, LoginRequest, RegisterRequest};

/// Auth repository trait
#[async_trait]
pub trait AuthRepository: Send + Sync {
    /// Exchange credentials for a token
    async fn authenticate(&self, request: &LoginRequest) -> ApiResult<AuthResponse>;

    /// Create an account
    async fn register(&self, request: &RegisterRequest) -> ApiResult<AuthResponse>;
}

/// HTTP implementation of `AuthRepository`
pub struct HttpAuthRepository {
    client: ApiClient,
}

impl HttpAuthRepository {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Create a boxed repository for use with dependency injection
    pub fn boxed(client: ApiClient) -> Arc<dyn AuthRepository> {
        Arc::new(Self::new(client))
    }
}

#[async_trait]
impl AuthRepository for HttpAuthRepository {
    async fn authenticate(&self, request: &LoginRequest) -> ApiResult<AuthResponse> {
        self.client.post_json("/auth/authenticate", request).await
    }

    async fn register(&self, request: &RegisterRequest) -> ApiResult<AuthResponse> {
        self.client.post_json("/auth/register", request).await
    }
}
