//! Donation repository

use async_trait::async_trait;
use std::sync::Arc;

use super::ApiResult;
use crate::client::ApiClient;
use crate::models::{Donation, DonationInput, DonationStatus};

/// Donation repository trait
#[async_trait]
pub trait DonationRepository: Send + Sync {
    /// Submit a donation offer
    async fn create(&self, input: &DonationInput) -> ApiResult<Donation>;

    /// Offers submitted by the signed-in user
    async fn list_mine(&self) -> ApiResult<Vec<Donation>>;

    /// All offers, optionally only those with `status` (admin)
    async fn list(&self, status: Option<DonationStatus>) -> ApiResult<Vec<Donation>>;

    /// Accept or reject an offer (admin)
    async fn update_status(&self, id: i64, status: DonationStatus) -> ApiResult<()>;
}

/// HTTP implementation of `DonationRepository`
pub struct HttpDonationRepository {
    client: ApiClient,
}

impl HttpDonationRepository {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Create a boxed repository for use with dependency injection
    pub fn boxed(client: ApiClient) -> Arc<dyn DonationRepository> {
        Arc::new(Self::new(client))
    }
}

#[async_trait]
impl DonationRepository for HttpDonationRepository {
    async fn create(&self, input: &DonationInput) -> ApiResult<Donation> {
        self.client.post_json("/donations", input).await
    }

    async fn list_mine(&self) -> ApiResult<Vec<Donation>> {
        self.client.get_json("/donations/my", &[]).await
    }

    async fn list(&self, status: Option<DonationStatus>) -> ApiResult<Vec<Donation>> {
        let query: Vec<(&str, String)> = status
            .map(|s| vec![("status", s.as_str().to_string())])
            .unwrap_or_default();
        self.client.get_json("/donations", &query).await
    }

    async fn update_status(&self, id: i64, status: DonationStatus) -> ApiResult<()> {
        let query = [("status", status.as_str().to_string())];
        self.client
            .put_query(&format!("/donations/{}/status", id), &query)
            .await
    }
}
