//! Daily reservation schedule for curators

use chrono::{Local, NaiveDate};
use std::sync::Arc;

use super::SERVER_ERROR_MESSAGE;
use crate::client::{ApiError, ReservationRepository};
use crate::models::Reservation;
use crate::session::{Capability, SessionContext, SessionError};

/// Error types for schedule operations
#[derive(Debug, thiserror::Error)]
pub enum ScheduleServiceError {
    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    #[error("API error: {0}")]
    Api(#[from] ApiError),
}

impl ScheduleServiceError {
    pub fn user_message(&self) -> String {
        match self {
            ScheduleServiceError::Session(e) => e.user_message(),
            ScheduleServiceError::Api(_) => SERVER_ERROR_MESSAGE.to_string(),
        }
    }
}

/// Reservations of one day
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailySchedule {
    pub date: NaiveDate,
    /// Sorted by visit time
    pub reservations: Vec<Reservation>,
}

impl DailySchedule {
    /// Build a schedule, ordering reservations by visit time
    pub fn new(date: NaiveDate, mut reservations: Vec<Reservation>) -> Self {
        reservations.sort_by_key(|r| r.visit_time);
        Self { date, reservations }
    }

    /// Sum of guests over all reservations
    pub fn total_guests(&self) -> u32 {
        self.reservations.iter().map(|r| r.number_of_guests).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.reservations.is_empty()
    }
}

/// Schedule service
pub struct ScheduleService {
    repo: Arc<dyn ReservationRepository>,
    session: Arc<SessionContext>,
}

impl ScheduleService {
    pub fn new(repo: Arc<dyn ReservationRepository>, session: Arc<SessionContext>) -> Self {
        Self { repo, session }
    }

    /// Schedule for `date`, or for today when `None`
    pub async fn for_date(&self, date: Option<NaiveDate>) -> Result<DailySchedule, ScheduleServiceError> {
        self.session.require(Capability::Admin)?;
        let date = date.unwrap_or_else(|| Local::now().date_naive());
        let reservations = self.repo.list_by_date(date).await?;
        Ok(DailySchedule::new(date, reservations))
    }
}
