//! Exhibition repository

use async_trait::async_trait;
use std::sync::Arc;

use super::{found, ApiResult};
use crate::client::ApiClient;
use crate::models::{Exhibition, ExhibitionInput};

/// Exhibition repository trait
#[async_trait]
pub trait ExhibitionRepository: Send + Sync {
    /// List all exhibitions
    async fn list(&self) -> ApiResult<Vec<Exhibition>>;

    /// Get exhibition by ID, with its exhibits
    async fn get_by_id(&self, id: i64) -> ApiResult<Option<Exhibition>>;

    async fn create(&self, input: &ExhibitionInput) -> ApiResult<Exhibition>;

    async fn update(&self, id: i64, input: &ExhibitionInput) -> ApiResult<Exhibition>;

    async fn delete(&self, id: i64) -> ApiResult<()>;
}

/// HTTP implementation of `ExhibitionRepository`
pub struct HttpExhibitionRepository {
    client: ApiClient,
}

impl HttpExhibitionRepository {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Create a boxed repository for use with dependency injection
    pub fn boxed(client: ApiClient) -> Arc<dyn ExhibitionRepository> {
        Arc::new(Self::new(client))
    }
}

#[async_trait]
impl ExhibitionRepository for HttpExhibitionRepository {
    async fn list(&self) -> ApiResult<Vec<Exhibition>> {
        self.client.get_json("/exhibitions", &[]).await
    }

    async fn get_by_id(&self, id: i64) -> ApiResult<Option<Exhibition>> {
        found(self.client.get_json(&format!("/exhibitions/{}", id), &[]).await)
    }

    async fn create(&self, input: &ExhibitionInput) -> ApiResult<Exhibition> {
        self.client.post_json("/exhibitions", input).await
    }

    async fn update(&self, id: i64, input: &ExhibitionInput) -> ApiResult<Exhibition> {
        self.client.put_json(&format!("/exhibitions/{}", id), input).await
    }

    async fn delete(&self, id: i64) -> ApiResult<()> {
        self.client.delete(&format!("/exhibitions/{}", id)).await
    }
}
