//! Services layer - Business logic
//!
//! This module contains the business rules of the muzeum client.
//! Services are responsible for:
//! - Enforcing session capabilities before protected calls
//! - Coordinating repositories and local state (catalog filters, booking wizard)
//! - Turning API failures into user-facing messages

pub mod auth;
pub mod booking;
pub mod catalog;
pub mod donation;
pub mod exhibit;
pub mod exhibition;
pub mod media;
pub mod schedule;

#[cfg(test)]
pub(crate) mod testing;

pub use auth::{AuthService, AuthServiceError};
pub use booking::{BookingService, BookingServiceError, BookingStep, BookingWizard};
pub use catalog::{
    admin_search, filter_exhibits, polish_cmp, sort_exhibits, CatalogQuery, CatalogService,
    CatalogServiceError, CategoryFilter, SortOrder,
};
pub use donation::{DonationService, DonationServiceError};
pub use exhibit::{ExhibitService, ExhibitServiceError};
pub use exhibition::{ExhibitionDraft, ExhibitionService, ExhibitionServiceError};
pub use media::{data_url, parse_data_url, MediaError, MediaService};
pub use schedule::{DailySchedule, ScheduleService, ScheduleServiceError};

/// Shown for any failure without a more specific message
pub const SERVER_ERROR_MESSAGE: &str = "Wystąpił błąd połączenia z serwerem.";
