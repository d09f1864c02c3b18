//! Reservation model
//!
//! Visits are booked per hourly time slot; the server reports which
//! slots of a day are still free.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use super::{hh_mm, null_as_default};

/// A booked, free, timed visit for a guest party
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub id: i64,
    pub visit_date: NaiveDate,
    #[serde(with = "hh_mm")]
    pub visit_time: NaiveTime,
    pub number_of_guests: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub first_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub last_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub user_email: String,
}

impl Reservation {
    /// Visitor name as "First Last"
    pub fn visitor_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// Availability of one visit hour
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    #[serde(with = "hh_mm")]
    pub time: NaiveTime,
    #[serde(alias = "isAvailable")]
    pub available: bool,
}

/// Body of `POST /reservations`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationRequest {
    pub date: NaiveDate,
    #[serde(with = "hh_mm")]
    pub time: NaiveTime,
    pub number_of_guests: u32,
}
