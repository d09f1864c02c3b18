//! Session token decoding
//!
//! Tokens are decoded locally without verifying the signature; the server
//! re-checks them on every request. Only the expiry claim is enforced here.

use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use crate::models::{User, UserRole};

/// Fallback first name when the token carries none
pub const DEFAULT_FIRST_NAME: &str = "Użytkownik";

/// Claims issued by the museum API
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    /// Subject: the user's email
    #[serde(default)]
    pub sub: String,
    #[serde(default)]
    pub role: Option<String>,
    /// Issued at (seconds since epoch)
    #[serde(default)]
    pub iat: Option<i64>,
    /// Expiry (seconds since epoch)
    #[serde(default)]
    pub exp: Option<i64>,
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

impl Claims {
    /// True when the expiry claim lies before `now`. Tokens without `exp` never expire.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        match self.exp {
            Some(exp) => exp.saturating_mul(1000) < now.timestamp_millis(),
            None => false,
        }
    }

    /// Rebuild the minimal user identity carried by the token
    pub fn to_user(&self) -> User {
        if self.role.as_deref() == Some("ADMIN") {
            tracing::warn!(
                email = %self.sub,
                "token uses legacy role 'ADMIN'; treating as ROLE_USER"
            );
        }

        User {
            id: self.user_id.unwrap_or(0),
            email: self.sub.clone(),
            first_name: self
                .first_name
                .clone()
                .filter(|n| !n.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_FIRST_NAME.to_string()),
            last_name: self.last_name.clone().unwrap_or_default(),
            role: UserRole::from_claim(self.role.as_deref()),
        }
    }
}

/// Decode the payload of a JWT without checking its signature or expiry
pub fn decode_claims(token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::default();
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims.clear();

    let data = decode::<Claims>(token.trim(), &DecodingKey::from_secret(&[]), &validation)?;
    Ok(data.claims)
}
