//! Session context
//!
//! Holds the signed-in user for the lifetime of the process and mirrors the
//! raw token into a `TokenStore` so the session survives restarts.
//!
//! - `SessionContext::init` restores a stored token, dropping it when expired
//!   or unreadable
//! - `login` / `logout` update the stored token and in-memory user together
//! - `require` is the capability guard used before protected operations
//!
//! # Usage
//!
//! ```rust,ignore
//! use muzeum::session::{Capability, FileTokenStore, SessionContext};
//!
//! let store = Arc::new(FileTokenStore::new("data/session.json"));
//! let session = SessionContext::init(store, "token");
//! let admin = session.require(Capability::Admin)?;
//! ```

pub mod store;
pub mod token;

pub use store::{FileTokenStore, MemoryTokenStore, TokenStore};
pub use token::{decode_claims, Claims};

use chrono::{DateTime, Utc};
use std::sync::{Arc, RwLock};

use crate::models::User;

/// What a caller must hold to run an operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// Any signed-in user
    Authenticated,
    /// A user with `ROLE_ADMIN`
    Admin,
}

/// Error types for session operations
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// No user is signed in
    #[error("Not logged in")]
    NotLoggedIn,

    /// Signed in, but the role does not allow the operation
    #[error("Access denied: administrator role required")]
    AccessDenied,

    /// Token could not be decoded
    #[error("Invalid session token: {0}")]
    InvalidToken(String),

    /// Token expiry lies in the past
    #[error("Session token expired")]
    Expired,

    /// Token store failure
    #[error("Session storage error: {0}")]
    Storage(#[from] anyhow::Error),
}

impl SessionError {
    /// Message suitable for end users (Polish UI)
    pub fn user_message(&self) -> String {
        match self {
            SessionError::NotLoggedIn => "Musisz być zalogowany, aby kontynuować.".to_string(),
            SessionError::AccessDenied => "Brak uprawnień do tej operacji.".to_string(),
            SessionError::InvalidToken(_) | SessionError::Expired => {
                "Sesja wygasła. Zaloguj się ponownie.".to_string()
            }
            SessionError::Storage(_) => "Nie udało się zapisać sesji.".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
struct ActiveSession {
    token: String,
    user: User,
}

/// Process-wide session state
pub struct SessionContext {
    store: Arc<dyn TokenStore>,
    token_key: String,
    active: RwLock<Option<ActiveSession>>,
}

impl std::fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionContext")
            .field("token_key", &self.token_key)
            .field("user", &self.current_user())
            .finish()
    }
}

impl SessionContext {
    /// Restore the session from `store`
    ///
    /// Expired or undecodable tokens are removed from the store and the
    /// context starts signed out. Store failures are logged, never fatal.
    pub fn init(store: Arc<dyn TokenStore>, token_key: impl Into<String>) -> Self {
        Self::init_at(store, token_key, Utc::now())
    }

    /// `init` against an explicit clock
    pub fn init_at(
        store: Arc<dyn TokenStore>,
        token_key: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        let context = Self {
            store,
            token_key: token_key.into(),
            active: RwLock::new(None),
        };

        let stored = match context.store.get(&context.token_key) {
            Ok(stored) => stored,
            Err(e) => {
                tracing::warn!("Failed to read stored session: {:#}", e);
                None
            }
        };

        if let Some(token) = stored {
            match Self::decode_at(&token, now) {
                Ok(user) => {
                    tracing::debug!(email = %user.email, "Restored session");
                    context.set_active(Some(ActiveSession { token, user }));
                }
                Err(e) => {
                    tracing::info!("Discarding stored session: {}", e);
                    if let Err(e) = context.store.remove(&context.token_key) {
                        tracing::warn!("Failed to clear stored session: {:#}", e);
                    }
                }
            }
        }

        context
    }

    /// Adopt a freshly issued token
    ///
    /// # Errors
    /// `InvalidToken`/`Expired` leave the current session untouched.
    pub fn login(&self, token: &str) -> Result<User, SessionError> {
        let token = token.trim();
        let user = Self::decode_at(token, Utc::now())?;

        self.store.set(&self.token_key, token)?;
        self.set_active(Some(ActiveSession {
            token: token.to_string(),
            user: user.clone(),
        }));

        tracing::info!(email = %user.email, role = %user.role, "Logged in");
        Ok(user)
    }

    /// Forget the token and the user
    ///
    /// The in-memory session is cleared even if the store cannot be updated.
    pub fn logout(&self) -> Result<(), SessionError> {
        let previous = self.take_active();
        if let Some(previous) = previous {
            tracing::info!(email = %previous.user.email, "Logged out");
        }
        self.store.remove(&self.token_key)?;
        Ok(())
    }

    /// The signed-in user, if any
    pub fn current_user(&self) -> Option<User> {
        self.read_active().map(|s| s.user)
    }

    /// Check if a user is signed in
    pub fn is_logged_in(&self) -> bool {
        self.read_active().is_some()
    }

    /// Raw token to attach as a bearer credential
    pub fn bearer_token(&self) -> Option<String> {
        self.read_active().map(|s| s.token)
    }

    /// Capability guard
    ///
    /// # Returns
    /// The signed-in user when it holds `capability`.
    ///
    /// # Errors
    /// - `NotLoggedIn` when nobody is signed in
    /// - `AccessDenied` when `Admin` is required and the user is not one
    pub fn require(&self, capability: Capability) -> Result<User, SessionError> {
        let user = self.current_user().ok_or(SessionError::NotLoggedIn)?;
        match capability {
            Capability::Authenticated => Ok(user),
            Capability::Admin if user.is_admin() => Ok(user),
            Capability::Admin => {
                tracing::warn!(email = %user.email, "Admin operation refused");
                Err(SessionError::AccessDenied)
            }
        }
    }

    fn decode_at(token: &str, now: DateTime<Utc>) -> Result<User, SessionError> {
        let claims =
            decode_claims(token).map_err(|e| SessionError::InvalidToken(e.to_string()))?;
        if claims.is_expired_at(now) {
            return Err(SessionError::Expired);
        }
        Ok(claims.to_user())
    }

    fn read_active(&self) -> Option<ActiveSession> {
        self.active
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    fn set_active(&self, session: Option<ActiveSession>) {
        *self.active.write().unwrap_or_else(|e| e.into_inner()) = session;
    }

    fn take_active(&self) -> Option<ActiveSession> {
        self.active.write().unwrap_or_else(|e| e.into_inner()).take()
    }
}

#[cfg(test)]
pub(crate) use token::test_tokens;
