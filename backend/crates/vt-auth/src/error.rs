use vt_core::{CoreError, StoreError};

use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

/// Session lifecycle failures.
///
/// Variants are fine-grained for logging. Callers at the HTTP
/// boundary collapse them (see [`AuthError::is_credential_failure`] and
/// [`AuthError::is_token_failure`]) so clients cannot tell "no such user" from
/// "wrong password", or "expired" from "revoked" from "forged".
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Validation failed: {message} {location}")]
    Validation {
        message: String,
        field: Option<String>,
        location: ErrorLocation,
    },

    #[error("No identity matches '{identifier}' {location}")]
    NotFound {
        identifier: String,
        location: ErrorLocation,
    },

    #[error("Password mismatch for identity {user_id} {location}")]
    InvalidCredentials {
        user_id: String,
        location: ErrorLocation,
    },

    #[error("No credential presented {location}")]
    Unauthorized { location: ErrorLocation },

    #[error("Token signature invalid: {source} {location}")]
    InvalidSignature {
        #[source]
        source: jsonwebtoken::errors::Error,
        location: ErrorLocation,
    },

    #[error("Token expired {location}")]
    TokenExpired { location: ErrorLocation },

    #[error("Invalid token: {message} {location}")]
    InvalidToken {
        message: String,
        location: ErrorLocation,
    },

    #[error("Refresh token is expired or already used {location}")]
    TokenReused { location: ErrorLocation },

    #[error("Conflict: {message} {location}")]
    Conflict {
        message: String,
        location: ErrorLocation,
    },

    #[error("Credential store unavailable: {message} {location}")]
    StoreUnavailable {
        message: String,
        location: ErrorLocation,
    },

    #[error("Password hashing failed: {message} {location}")]
    Hashing {
        message: String,
        location: ErrorLocation,
    },

    #[error("Token signing failed: {source} {location}")]
    Signing {
        #[source]
        source: jsonwebtoken::errors::Error,
        location: ErrorLocation,
    },
}

impl AuthError {
    /// Login failures that must look identical to the caller
    pub fn is_credential_failure(&self) -> bool {
        matches!(
            self,
            Self::NotFound { .. } | Self::InvalidCredentials { .. }
        )
    }

    /// Token failures that must look identical to the caller
    pub fn is_token_failure(&self) -> bool {
        matches!(
            self,
            Self::Unauthorized { .. }
                | Self::InvalidSignature { .. }
                | Self::TokenExpired { .. }
                | Self::InvalidToken { .. }
                | Self::TokenReused { .. }
        )
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "VALIDATION_ERROR",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::InvalidCredentials { .. } => "INVALID_CREDENTIALS",
            Self::Unauthorized { .. } => "UNAUTHORIZED",
            Self::InvalidSignature { .. } => "INVALID_SIGNATURE",
            Self::TokenExpired { .. } => "TOKEN_EXPIRED",
            Self::InvalidToken { .. } => "INVALID_TOKEN",
            Self::TokenReused { .. } => "TOKEN_REUSED",
            Self::Conflict { .. } => "CONFLICT",
            Self::StoreUnavailable { .. } => "STORE_UNAVAILABLE",
            Self::Hashing { .. } => "HASHING_FAILED",
            Self::Signing { .. } => "SIGNING_FAILED",
        }
    }

    /// Collapse a verification fault into the user-facing `InvalidToken`.
    #[track_caller]
    pub(crate) fn into_invalid_token(self) -> Self {
        match self {
            Self::InvalidSignature { .. } | Self::TokenExpired { .. } => Self::InvalidToken {
                message: self.to_string(),
                location: ErrorLocation::from(Location::caller()),
            },
            other => other,
        }
    }
}

impl From<StoreError> for AuthError {
    #[track_caller]
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Conflict { message, .. } => Self::Conflict {
                message,
                location: ErrorLocation::from(Location::caller()),
            },
            StoreError::Unavailable { .. } | StoreError::Corrupt { .. } => {
                Self::StoreUnavailable {
                    message: e.to_string(),
                    location: ErrorLocation::from(Location::caller()),
                }
            }
        }
    }
}

impl From<CoreError> for AuthError {
    #[track_caller]
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::Validation { message, field, .. } => Self::Validation {
                message,
                field,
                location: ErrorLocation::from(Location::caller()),
            },
        }
    }
}

pub type Result<T> = std::result::Result<T, AuthError>;
