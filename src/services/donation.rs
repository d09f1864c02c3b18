//! Donation service
//!
//! Visitors offer items for the collection; curators accept or reject them.

use std::sync::Arc;

use super::SERVER_ERROR_MESSAGE;
use crate::client::{ApiError, DonationRepository};
use crate::models::{Donation, DonationInput, DonationStatus};
use crate::session::{Capability, SessionContext, SessionError};

/// Error types for donation service operations
#[derive(Debug, thiserror::Error)]
pub enum DonationServiceError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Only ACCEPTED and REJECTED are decisions
    #[error("Invalid decision: {0}")]
    InvalidDecision(DonationStatus),

    #[error("Donation not found: {0}")]
    NotFound(i64),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    #[error("API error: {0}")]
    Api(#[from] ApiError),
}

impl DonationServiceError {
    /// Message suitable for end users (Polish UI)
    pub fn user_message(&self) -> String {
        match self {
            DonationServiceError::ValidationError(message) => message.clone(),
            DonationServiceError::InvalidDecision(_) => {
                "Darowiznę można tylko przyjąć lub odrzucić.".to_string()
            }
            DonationServiceError::NotFound(_) => "Nie znaleziono darowizny.".to_string(),
            DonationServiceError::Session(e) => e.user_message(),
            DonationServiceError::Api(_) => SERVER_ERROR_MESSAGE.to_string(),
        }
    }
}

/// Donation service
pub struct DonationService {
    repo: Arc<dyn DonationRepository>,
    session: Arc<SessionContext>,
}

impl DonationService {
    pub fn new(repo: Arc<dyn DonationRepository>, session: Arc<SessionContext>) -> Self {
        Self { repo, session }
    }

    /// Submit a donation offer
    ///
    /// # Arguments
    /// * `input` - item name, description and a `data:` URL photo
    ///
    /// # Errors
    /// - `Session(NotLoggedIn)` without a session
    /// - `ValidationError` when the name or description is empty
    pub async fn submit(&self, input: DonationInput) -> Result<Donation, DonationServiceError> {
        let user = self.session.require(Capability::Authenticated)?;
        let input = DonationInput {
            item_name: input.item_name.trim().to_string(),
            description: input.description.trim().to_string(),
            image_url: input.image_url,
        };
        if input.item_name.is_empty() {
            return Err(DonationServiceError::ValidationError(
                "Nazwa przedmiotu jest wymagana.".to_string(),
            ));
        }
        if input.description.is_empty() {
            return Err(DonationServiceError::ValidationError(
                "Opis przedmiotu jest wymagany.".to_string(),
            ));
        }

        let donation = self.repo.create(&input).await?;
        tracing::info!(id = donation.id, donor = %user.email, "Donation submitted");
        Ok(donation)
    }

    /// Offers of the signed-in user
    pub async fn mine(&self) -> Result<Vec<Donation>, DonationServiceError> {
        self.session.require(Capability::Authenticated)?;
        Ok(self.repo.list_mine().await?)
    }

    /// All offers, optionally by status (admin)
    pub async fn all(&self, status: Option<DonationStatus>) -> Result<Vec<Donation>, DonationServiceError> {
        self.session.require(Capability::Admin)?;
        Ok(self.repo.list(status).await?)
    }

    /// Offers waiting for a decision (admin)
    ///
    /// Filters locally as well, in case the server ignores the status parameter.
    pub async fn pending(&self) -> Result<Vec<Donation>, DonationServiceError> {
        let donations = self.all(Some(DonationStatus::Pending)).await?;
        Ok(donations
            .into_iter()
            .filter(|d| d.status == DonationStatus::Pending)
            .collect())
    }

    pub async fn accept(&self, id: i64) -> Result<(), DonationServiceError> {
        self.decide(id, DonationStatus::Accepted).await
    }

    pub async fn reject(&self, id: i64) -> Result<(), DonationServiceError> {
        self.decide(id, DonationStatus::Rejected).await
    }

    /// Record a curator decision (admin)
    pub async fn decide(&self, id: i64, status: DonationStatus) -> Result<(), DonationServiceError> {
        let user = self.session.require(Capability::Admin)?;
        if !status.is_decided() {
            return Err(DonationServiceError::InvalidDecision(status));
        }

        self.repo.update_status(id, status).await.map_err(|e| match e {
            ApiError::NotFound(_) => DonationServiceError::NotFound(id),
            e => {
                tracing::error!(id, %status, "Donation decision failed: {}", e);
                DonationServiceError::Api(e)
            }
        })?;
        tracing::info!(id, %status, by = %user.email, "Donation reviewed");
        Ok(())
    }
}
