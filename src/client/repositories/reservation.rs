//! Reservation repository
//!
//! Slot availability, booking and schedules under `/reservations`.

use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Arc;

use super::ApiResult;
use crate::client::ApiClient;
use crate::models::{Reservation, ReservationRequest, TimeSlot};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Reservation repository trait
#[async_trait]
pub trait ReservationRepository: Send + Sync {
    /// Hourly slots of a day with their availability
    async fn available_slots(&self, date: NaiveDate) -> ApiResult<Vec<TimeSlot>>;

    /// Book a visit; returns the server's confirmation text
    async fn create(&self, request: &ReservationRequest) -> ApiResult<String>;

    /// Reservations of the signed-in user
    async fn list_mine(&self) -> ApiResult<Vec<Reservation>>;

    /// All reservations of a day (admin)
    async fn list_by_date(&self, date: NaiveDate) -> ApiResult<Vec<Reservation>>;
}

/// HTTP implementation of `ReservationRepository`
pub struct HttpReservationRepository {
    client: ApiClient,
}

impl HttpReservationRepository {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Create a boxed repository for use with dependency injection
    pub fn boxed(client: ApiClient) -> Arc<dyn ReservationRepository> {
        Arc::new(Self::new(client))
    }
}

#[async_trait]
impl ReservationRepository for HttpReservationRepository {
    async fn available_slots(&self, date: NaiveDate) -> ApiResult<Vec<TimeSlot>> {
        let query = [("date", date.format(DATE_FORMAT).to_string())];
        self.client
            .get_json("/reservations/available-slots", &query)
            .await
    }

    async fn create(&self, request: &ReservationRequest) -> ApiResult<String> {
        self.client.post_text("/reservations", request).await
    }

    async fn list_mine(&self) -> ApiResult<Vec<Reservation>> {
        self.client.get_json("/reservations/my", &[]).await
    }

    async fn list_by_date(&self, date: NaiveDate) -> ApiResult<Vec<Reservation>> {
        let query = [("date", date.format(DATE_FORMAT).to_string())];
        self.client.get_json("/reservations/by-date", &query).await
    }
}
