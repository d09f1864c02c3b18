//! Exhibit repository
//!
//! This module provides:
//! - `ExhibitRepository` trait defining the interface for exhibit access
//! - `HttpExhibitRepository` implementing it over `/exhibits`

use async_trait::async_trait;
use std::sync::Arc;

use super::{found, ApiResult};
use crate::client::ApiClient;
use crate::models::{Exhibit, ExhibitInput, ExhibitSearchCriteria};

/// Exhibit repository trait
#[async_trait]
pub trait ExhibitRepository: Send + Sync {
    /// List exhibits matching the server-side criteria
    async fn list(&self, criteria: &ExhibitSearchCriteria) -> ApiResult<Vec<Exhibit>>;

    /// Get exhibit by ID
    async fn get_by_id(&self, id: i64) -> ApiResult<Option<Exhibit>>;

    /// Create a new exhibit
    async fn create(&self, input: &ExhibitInput) -> ApiResult<Exhibit>;

    /// Replace an existing exhibit
    async fn update(&self, id: i64, input: &ExhibitInput) -> ApiResult<Exhibit>;

    /// Delete an exhibit
    async fn delete(&self, id: i64) -> ApiResult<()>;
}

/// HTTP implementation of `ExhibitRepository`
pub struct HttpExhibitRepository {
    client: ApiClient,
}

impl HttpExhibitRepository {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Create a boxed repository for use with dependency injection
    pub fn boxed(client: ApiClient) -> Arc<dyn ExhibitRepository> {
        Arc::new(Self::new(client))
    }
}

#[async_trait]
impl ExhibitRepository for HttpExhibitRepository {
    async fn list(&self, criteria: &ExhibitSearchCriteria) -> ApiResult<Vec<Exhibit>> {
        self.client.get_json("/exhibits", &criteria.to_query()).await
    }

    async fn get_by_id(&self, id: i64) -> ApiResult<Option<Exhibit>> {
        found(self.client.get_json(&format!("/exhibits/{}", id), &[]).await)
    }

    async fn create(&self, input: &ExhibitInput) -> ApiResult<Exhibit> {
        self.client.post_json("/exhibits", input).await
    }

    async fn update(&self, id: i64, input: &ExhibitInput) -> ApiResult<Exhibit> {
        self.client.put_json(&format!("/exhibits/{}", id), input).await
    }

    async fn delete(&self, id: i64) -> ApiResult<()> {
        self.client.delete(&format!("/exhibits/{}", id)).await
    }
}
