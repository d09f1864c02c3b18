//! Exhibit service
//!
//! Curator operations on the exhibit collection. Every operation requires
//! the admin capability; reads for visitors live in `catalog`.

use std::sync::Arc;

use super::SERVER_ERROR_MESSAGE;
use crate::client::{ApiError, ExhibitRepository};
use crate::models::{Exhibit, ExhibitInput, ExhibitSearchCriteria};
use crate::session::{Capability, SessionContext, SessionError};

/// Error types for exhibit service operations
#[derive(Debug, thiserror::Error)]
pub enum ExhibitServiceError {
    /// Exhibit not found
    #[error("Exhibit not found: {0}")]
    NotFound(i64),

    /// Required field missing
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    /// Delete refused; the exhibit is usually still part of an exhibition
    #[error("Exhibit {id} could not be deleted: {source}")]
    DeleteRefused { id: i64, source: ApiError },

    #[error("API error: {0}")]
    Api(#[from] ApiError),
}

impl ExhibitServiceError {
    /// Message suitable for end users (Polish UI)
    pub fn user_message(&self) -> String {
        match self {
            ExhibitServiceError::NotFound(_) => "Nie znaleziono eksponatu.".to_string(),
            ExhibitServiceError::ValidationError(message) => message.clone(),
            ExhibitServiceError::Session(e) => e.user_message(),
            ExhibitServiceError::DeleteRefused { .. } => {
                "Nie udało się usunąć eksponatu. Sprawdź czy nie jest przypisany do jakiejś Wystawy."
                    .to_string()
            }
            ExhibitServiceError::Api(_) => SERVER_ERROR_MESSAGE.to_string(),
        }
    }
}

/// Exhibit service
pub struct ExhibitService {
    repo: Arc<dyn ExhibitRepository>,
    session: Arc<SessionContext>,
}

impl ExhibitService {
    pub fn new(repo: Arc<dyn ExhibitRepository>, session: Arc<SessionContext>) -> Self {
        Self { repo, session }
    }

    /// List exhibits, newest first
    pub async fn list(&self, criteria: &ExhibitSearchCriteria) -> Result<Vec<Exhibit>, ExhibitServiceError> {
        self.session.require(Capability::Admin)?;
        let mut exhibits = self.repo.list(criteria).await?;
        exhibits.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(exhibits)
    }

    /// Get exhibit by ID
    pub async fn get(&self, id: i64) -> Result<Exhibit, ExhibitServiceError> {
        self.session.require(Capability::Admin)?;
        self.repo
            .get_by_id(id)
            .await?
            .ok_or(ExhibitServiceError::NotFound(id))
    }

    /// Create a new exhibit
    pub async fn create(&self, input: ExhibitInput) -> Result<Exhibit, ExhibitServiceError> {
        let user = self.session.require(Capability::Admin)?;
        let input = validate(input)?;

        let exhibit = self.repo.create(&input).await?;
        tracing::info!(id = exhibit.id, name = %exhibit.name, by = %user.email, "Exhibit created");
        Ok(exhibit)
    }

    /// Replace an exhibit
    pub async fn update(&self, id: i64, input: ExhibitInput) -> Result<Exhibit, ExhibitServiceError> {
        let user = self.session.require(Capability::Admin)?;
        let input = validate(input)?;

        let exhibit = self.repo.update(id, &input).await.map_err(|e| match e {
            ApiError::NotFound(_) => ExhibitServiceError::NotFound(id),
            e => ExhibitServiceError::Api(e),
        })?;
        tracing::info!(id, by = %user.email, "Exhibit updated");
        Ok(exhibit)
    }

    /// Delete an exhibit
    pub async fn delete(&self, id: i64) -> Result<(), ExhibitServiceError> {
        let user = self.session.require(Capability::Admin)?;

        self.repo.delete(id).await.map_err(|e| match e {
            ApiError::NotFound(_) => ExhibitServiceError::NotFound(id),
            source => ExhibitServiceError::DeleteRefused { id, source },
        })?;
        tracing::info!(id, by = %user.email, "Exhibit deleted");
        Ok(())
    }
}

fn validate(input: ExhibitInput) -> Result<ExhibitInput, ExhibitServiceError> {
    let input = ExhibitInput {
        name: input.name.trim().to_string(),
        description: input.description.trim().to_string(),
        production_year: input.production_year.trim().to_string(),
        ..input
    };
    if input.name.is_empty() {
        return Err(ExhibitServiceError::ValidationError("Nazwa jest wymagana.".to_string()));
    }
    if input.description.is_empty() {
        return Err(ExhibitServiceError::ValidationError("Opis jest wymagany.".to_string()));
    }
    Ok(input)
}
