//! API repositories
//!
//! Repository pattern over the REST API.
//! Each repository handles the calls for a specific resource.

pub mod auth;
pub mod donation;
pub mod exhibit;
pub mod exhibition;
pub mod reservation;

pub use auth::{AuthRepository, HttpAuthRepository};
pub use donation::{DonationRepository, HttpDonationRepository};
pub use exhibit::{ExhibitRepository, HttpExhibitRepository};
pub use exhibition::{ExhibitionRepository, HttpExhibitionRepository};
pub use reservation::{HttpReservationRepository, ReservationRepository};

use super::ApiError;

/// Result of a repository call
pub type ApiResult<T> = Result<T, ApiError>;

/// Turn a 404 into `Ok(None)` for lookups by id
pub(crate) fn found<T>(result: ApiResult<T>) -> ApiResult<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(ApiError::NotFound(_)) => Ok(None),
        Err(e) => Err(e),
    }
}
