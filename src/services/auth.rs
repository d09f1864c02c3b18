//! Auth service
//!
//! Implements sign-in flows on top of the session context:
//! - Login: exchange credentials for a token and start the session
//! - Registration: create an account (the user signs in separately)
//! - Logout: tear the session down
//!
//! The API answers both bad credentials and duplicate accounts with 403.

use std::sync::Arc;

use super::SERVER_ERROR_MESSAGE;
use crate::client::{ApiError, AuthRepository};
use crate::models::{AuthResponse, LoginRequest, RegisterRequest, User};
use crate::session::{SessionContext, SessionError};

/// Error types for auth service operations
#[derive(Debug, thiserror::Error)]
pub enum AuthServiceError {
    /// Login rejected by the server
    #[error("Bad credentials")]
    BadCredentials,

    /// Registration rejected because the email is taken
    #[error("User already exists")]
    UserExists,

    /// Required field missing
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// The issued token could not be adopted
    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    /// Any other API failure
    #[error("API error: {0}")]
    Api(#[from] ApiError),
}

impl AuthServiceError {
    /// Message suitable for end users (Polish UI)
    pub fn user_message(&self) -> String {
        match self {
            AuthServiceError::BadCredentials => "Błędny email lub hasło.".to_string(),
            AuthServiceError::UserExists => {
                "Użytkownik o podanym adresie email już istnieje.".to_string()
            }
            AuthServiceError::ValidationError(message) => message.clone(),
            AuthServiceError::Session(e @ SessionError::Storage(_)) => e.user_message(),
            AuthServiceError::Session(_) | AuthServiceError::Api(_) => {
                SERVER_ERROR_MESSAGE.to_string()
            }
        }
    }
}

/// Auth service
pub struct AuthService {
    repo: Arc<dyn AuthRepository>,
    session: Arc<SessionContext>,
}

impl AuthService {
    /// Create a new auth service
    pub fn new(repo: Arc<dyn AuthRepository>, session: Arc<SessionContext>) -> Self {
        Self { repo, session }
    }

    /// Sign in and start a session
    ///
    /// # Returns
    /// The user decoded from the issued token.
    ///
    /// # Errors
    /// - `BadCredentials` when the server answers 403
    /// - `Api` for any other failure
    pub async fn login(&self, email: &str, password: &str) -> Result<User, AuthServiceError> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(AuthServiceError::ValidationError(
                "Email i hasło są wymagane.".to_string(),
            ));
        }

        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let response = self.repo.authenticate(&request).await.map_err(|e| {
            if e.is_forbidden() {
                tracing::info!(email, "Login rejected");
                AuthServiceError::BadCredentials
            } else {
                AuthServiceError::Api(e)
            }
        })?;

        Ok(self.session.login(&response.token)?)
    }

    /// Create an account
    ///
    /// The session is left as it was; the returned response carries the
    /// server's token and message.
    pub async fn register(&self, input: RegisterRequest) -> Result<AuthResponse, AuthServiceError> {
        let input = RegisterRequest {
            first_name: input.first_name.trim().to_string(),
            last_name: input.last_name.trim().to_string(),
            email: input.email.trim().to_string(),
            password: input.password,
        };
        if input.first_name.is_empty()
            || input.last_name.is_empty()
            || input.email.is_empty()
            || input.password.is_empty()
        {
            return Err(AuthServiceError::ValidationError(
                "Wszystkie pola są wymagane.".to_string(),
            ));
        }

        let response = self.repo.register(&input).await.map_err(|e| {
            if e.is_forbidden() {
                AuthServiceError::UserExists
            } else {
                AuthServiceError::Api(e)
            }
        })?;

        tracing::info!(email = %input.email, "Account registered");
        Ok(response)
    }

    /// End the session
    pub fn logout(&self) -> Result<(), AuthServiceError> {
        Ok(self.session.logout()?)
    }

    /// The signed-in user, if any
    pub fn current_user(&self) -> Option<User> {
        self.session.current_user()
    }
}
