//! Museum API client
//!
//! - `http`: the shared `ApiClient` and its `ApiError`
//! - `repositories`: one repository per API resource, each behind a trait so
//!   services can be tested against in-memory fakes

pub mod http;
pub mod repositories;

pub use http::{ApiClient, ApiError};
pub use repositories::{
    ApiResult, AuthRepository, DonationRepository, ExhibitRepository, ExhibitionRepository,
    HttpAuthRepository, HttpDonationRepository, HttpExhibitRepository,
    HttpExhibitionRepository, HttpReservationRepository, ReservationRepository,
};
