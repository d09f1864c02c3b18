//! Exhibition service
//!
//! This module provides:
//! - Public exhibition listing and details
//! - Curator create/update/delete (admin capability)
//! - `ExhibitionDraft`, the editing state of the exhibition form

use std::sync::Arc;

use super::SERVER_ERROR_MESSAGE;
use crate::client::{ApiError, ExhibitionRepository};
use crate::models::{Exhibition, ExhibitionInput};
use crate::session::{Capability, SessionContext, SessionError};

/// Error types for exhibition service operations
#[derive(Debug, thiserror::Error)]
pub enum ExhibitionServiceError {
    #[error("Exhibition not found: {0}")]
    NotFound(i64),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    #[error("API error: {0}")]
    Api(#[from] ApiError),
}

impl ExhibitionServiceError {
    /// Message suitable for end users (Polish UI)
    pub fn user_message(&self) -> String {
        match self {
            ExhibitionServiceError::NotFound(_) => "Nie znaleziono wystawy.".to_string(),
            ExhibitionServiceError::ValidationError(message) => message.clone(),
            ExhibitionServiceError::Session(e) => e.user_message(),
            ExhibitionServiceError::Api(_) => SERVER_ERROR_MESSAGE.to_string(),
        }
    }
}

/// Editing state of an exhibition
///
/// Selected exhibit ids keep the order in which they were picked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExhibitionDraft {
    pub name: String,
    pub description: String,
    pub background_image_url: String,
    selected: Vec<i64>,
}

impl ExhibitionDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start editing an existing exhibition
    pub fn from_exhibition(exhibition: &Exhibition) -> Self {
        let mut draft = Self {
            name: exhibition.name.clone(),
            description: exhibition.description.clone(),
            background_image_url: exhibition.background_image_url.clone(),
            selected: Vec::new(),
        };
        for id in exhibition.exhibit_ids() {
            draft.select(id);
        }
        draft
    }

    /// Flip the selection of an exhibit
    ///
    /// # Returns
    /// Whether the exhibit is selected afterwards.
    pub fn toggle(&mut self, exhibit_id: i64) -> bool {
        if self.is_selected(exhibit_id) {
            self.selected.retain(|id| *id != exhibit_id);
            false
        } else {
            self.selected.push(exhibit_id);
            true
        }
    }

    /// Select an exhibit; selecting twice has no effect
    pub fn select(&mut self, exhibit_id: i64) {
        if !self.is_selected(exhibit_id) {
            self.selected.push(exhibit_id);
        }
    }

    pub fn is_selected(&self, exhibit_id: i64) -> bool {
        self.selected.contains(&exhibit_id)
    }

    pub fn selected(&self) -> &[i64] {
        &self.selected
    }

    /// Request body for create/update
    pub fn to_input(&self) -> ExhibitionInput {
        ExhibitionInput {
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
            background_image_url: self.background_image_url.clone(),
            exhibit_ids: self.selected.clone(),
        }
    }
}

/// Exhibition service
pub struct ExhibitionService {
    repo: Arc<dyn ExhibitionRepository>,
    session: Arc<SessionContext>,
}

impl ExhibitionService {
    pub fn new(repo: Arc<dyn ExhibitionRepository>, session: Arc<SessionContext>) -> Self {
        Self { repo, session }
    }

    /// List all exhibitions
    pub async fn list(&self) -> Result<Vec<Exhibition>, ExhibitionServiceError> {
        Ok(self.repo.list().await?)
    }

    /// Exhibition with its exhibits
    pub async fn get(&self, id: i64) -> Result<Exhibition, ExhibitionServiceError> {
        self.repo
            .get_by_id(id)
            .await?
            .ok_or(ExhibitionServiceError::NotFound(id))
    }

    /// Create an exhibition from a draft
    pub async fn create(&self, draft: &ExhibitionDraft) -> Result<Exhibition, ExhibitionServiceError> {
        let user = self.session.require(Capability::Admin)?;
        let input = validate(draft)?;

        let exhibition = self.repo.create(&input).await?;
        tracing::info!(
            id = exhibition.id,
            exhibits = input.exhibit_ids.len(),
            by = %user.email,
            "Exhibition created"
        );
        Ok(exhibition)
    }

    /// Replace an exhibition with the draft's content
    pub async fn update(&self, id: i64, draft: &ExhibitionDraft) -> Result<Exhibition, ExhibitionServiceError> {
        let user = self.session.require(Capability::Admin)?;
        let input = validate(draft)?;

        let exhibition = self.repo.update(id, &input).await.map_err(|e| match e {
            ApiError::NotFound(_) => ExhibitionServiceError::NotFound(id),
            e => ExhibitionServiceError::Api(e),
        })?;
        tracing::info!(id, by = %user.email, "Exhibition updated");
        Ok(exhibition)
    }

    /// Delete an exhibition; its exhibits stay in the catalog
    pub async fn delete(&self, id: i64) -> Result<(), ExhibitionServiceError> {
        let user = self.session.require(Capability::Admin)?;

        self.repo.delete(id).await.map_err(|e| match e {
            ApiError::NotFound(_) => ExhibitionServiceError::NotFound(id),
            e => ExhibitionServiceError::Api(e),
        })?;
        tracing::info!(id, by = %user.email, "Exhibition deleted");
        Ok(())
    }
}

fn validate(draft: &ExhibitionDraft) -> Result<ExhibitionInput, ExhibitionServiceError> {
    let input = draft.to_input();
    if input.name.is_empty() {
        return Err(ExhibitionServiceError::ValidationError(
            "Nazwa wystawy jest wymagana.".to_string(),
        ));
    }
    if input.description.is_empty() {
        return Err(ExhibitionServiceError::ValidationError(
            "Opis wystawy jest wymagany.".to_string(),
        ));
    }
    Ok(input)
}
