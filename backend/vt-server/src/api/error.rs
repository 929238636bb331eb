//! REST API error types
//!
//! Every failure leaves the server as `{ "error": { "code", "message", "field"? } }`.
//! Authentication failures are collapsed here: the client sees one generic
//! message per class and the detail goes to the log.

use vt_auth::AuthError;

use std::panic::Location;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use error_location::ErrorLocation;
use serde::Serialize;
use thiserror::Error;

pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid username, email or password";
pub const UNAUTHORIZED_MESSAGE: &str = "Unauthorized request";

/// JSON error response body
#[derive(Debug, Serialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}

/// Inner error body with code, message, and optional field
#[derive(Debug, Serialize)]
pub struct ApiErrorBody {
    /// Machine-readable error code (e.g., "UNAUTHORIZED", "VALIDATION_ERROR")
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Field name if this is a validation error for a specific field
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

/// API errors with associated HTTP status codes
#[derive(Debug, Error)]
pub enum ApiError {
    /// Validation error (400)
    #[error("Validation failed: {message} {location}")]
    Validation {
        message: String,
        field: Option<String>,
        location: ErrorLocation,
    },

    /// Malformed request (400)
    #[error("Bad request: {message} {location}")]
    BadRequest {
        message: String,
        location: ErrorLocation,
    },

    /// Login rejected, unknown identity or wrong password (401)
    #[error("Invalid credentials {location}")]
    InvalidCredentials { location: ErrorLocation },

    /// Missing, invalid, expired or revoked token (401)
    #[error("Unauthorized {location}")]
    Unauthorized { location: ErrorLocation },

    /// Duplicate username or email (409)
    #[error("Conflict: {message} {location}")]
    Conflict {
        message: String,
        location: ErrorLocation,
    },

    /// Store down or request timed out; safe to retry (503)
    #[error("Service unavailable: {message} {location}")]
    Unavailable {
        message: String,
        location: ErrorLocation,
    },

    /// Internal server error (500)
    #[error("Internal error: {message} {location}")]
    Internal {
        message: String,
        location: ErrorLocation,
    },
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation { .. } | ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ApiError::InvalidCredentials { .. } | ApiError::Unauthorized { .. } => {
                StatusCode::UNAUTHORIZED
            }
            ApiError::Conflict { .. } => StatusCode::CONFLICT,
            ApiError::Unavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            log::error!("{}", self);
        } else {
            log::debug!("{}", self);
        }

        let body = match self {
            ApiError::Validation { message, field, .. } => ApiErrorBody {
                code: "VALIDATION_ERROR".into(),
                message,
                field,
            },
            ApiError::BadRequest { message, .. } => ApiErrorBody {
                code: "BAD_REQUEST".into(),
                message,
                field: None,
            },
            ApiError::InvalidCredentials { .. } => ApiErrorBody {
                code: "INVALID_CREDENTIALS".into(),
                message: INVALID_CREDENTIALS_MESSAGE.into(),
                field: None,
            },
            ApiError::Unauthorized { .. } => ApiErrorBody {
                code: "UNAUTHORIZED".into(),
                message: UNAUTHORIZED_MESSAGE.into(),
                field: None,
            },
            ApiError::Conflict { message, .. } => ApiErrorBody {
                code: "CONFLICT".into(),
                message,
                field: None,
            },
            ApiError::Unavailable { .. } => ApiErrorBody {
                code: "SERVICE_UNAVAILABLE".into(),
                message: "Service temporarily unavailable, try again".into(),
                field: None,
            },
            ApiError::Internal { .. } => ApiErrorBody {
                code: "INTERNAL_ERROR".into(),
                message: "Internal server error".into(),
                field: None,
            },
        };

        (status, Json(ApiErrorResponse { error: body })).into_response()
    }
}

/// Convert session errors to API errors, dropping anything that would let a
/// client tell one authentication failure from another.
impl From<AuthError> for ApiError {
    #[track_caller]
    fn from(e: AuthError) -> Self {
        let location = ErrorLocation::from(Location::caller());

        if e.is_credential_failure() {
            log::warn!("Credential check failed [{}]: {}", e.error_code(), e);
            return ApiError::InvalidCredentials { location };
        }
        if e.is_token_failure() {
            log::warn!("Token rejected [{}]: {}", e.error_code(), e);
            return ApiError::Unauthorized { location };
        }

        match e {
            AuthError::Validation { message, field, .. } => ApiError::Validation {
                message,
                field,
                location,
            },
            AuthError::Conflict { message, .. } => ApiError::Conflict { message, location },
            AuthError::StoreUnavailable { message, .. } => ApiError::Unavailable { message, location },
            other => ApiError::Internal {
                message: other.to_string(),
                location,
            },
        }
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
