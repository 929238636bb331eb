use crate::{AuthError, Result as AuthErrorResult};

use vt_core::User;

use std::panic::Location;
use std::time::Duration;

use chrono::Utc;
use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Access token claim set: identity plus the fields handlers need without a
/// store round trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Subject (user id)
    pub sub: String,
    pub email: String,
    pub username: String,
    pub full_name: String,
    /// Issued at (Unix seconds)
    pub iat: i64,
    /// Expiration (Unix seconds)
    pub exp: i64,
    /// Per-token nonce; keeps two tokens issued in the same second distinct
    pub jti: String,
}

/// Refresh token claim set: identity id only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshClaims {
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
    pub jti: String,
}

impl AccessClaims {
    pub fn for_user(user: &User, ttl: Duration) -> Self {
        let (iat, exp) = window(ttl);
        Self {
            sub: user.id.to_string(),
            email: user.email.clone(),
            username: user.username.clone(),
            full_name: user.full_name.clone(),
            iat,
            exp,
            jti: Uuid::new_v4().to_string(),
        }
    }

    #[track_caller]
    pub fn user_id(&self) -> AuthErrorResult<Uuid> {
        parse_subject(&self.sub)
    }
}

impl RefreshClaims {
    pub fn for_user_id(user_id: Uuid, ttl: Duration) -> Self {
        let (iat, exp) = window(ttl);
        Self {
            sub: user_id.to_string(),
            iat,
            exp,
            jti: Uuid::new_v4().to_string(),
        }
    }

    #[track_caller]
    pub fn user_id(&self) -> AuthErrorResult<Uuid> {
        parse_subject(&self.sub)
    }
}

fn window(ttl: Duration) -> (i64, i64) {
    let iat = Utc::now().timestamp();
    let ttl_secs = i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX);
    (iat, iat.saturating_add(ttl_secs))
}

#[track_caller]
fn parse_subject(sub: &str) -> AuthErrorResult<Uuid> {
    Uuid::parse_str(sub).map_err(|e| AuthError::InvalidToken {
        message: format!("sub is not a valid user id: {}", e),
        location: ErrorLocation::from(Location::caller()),
    })
}
