//! How a client wants its tokens: cookies (browsers) or JSON body (native apps)

use crate::ApiError;

use std::panic::Location;

use axum::{extract::FromRequestParts, http::request::Parts};
use error_location::ErrorLocation;

pub const TOKEN_DELIVERY_HEADER: &str = "X-Token-Delivery";

/// Selected by the `X-Token-Delivery: cookie|body` request header.
/// Absent header means `Cookie`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TokenDelivery {
    #[default]
    Cookie,
    Body,
}

impl TokenDelivery {
    #[track_caller]
    pub fn parse(value: &str) -> Result<Self, ApiError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "cookie" => Ok(TokenDelivery::Cookie),
            "body" => Ok(TokenDelivery::Body),
            other => Err(ApiError::Validation {
                message: format!("{TOKEN_DELIVERY_HEADER} must be 'cookie' or 'body', got '{other}'"),
                field: Some(TOKEN_DELIVERY_HEADER.to_string()),
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }
}

impl<S: Send + Sync> FromRequestParts<S> for TokenDelivery {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match parts.headers.get(TOKEN_DELIVERY_HEADER) {
            None => Ok(TokenDelivery::default()),
            Some(value) => {
                let value = value.to_str().map_err(|_| ApiError::Validation {
                    message: format!("{TOKEN_DELIVERY_HEADER} is not valid ASCII"),
                    field: Some(TOKEN_DELIVERY_HEADER.to_string()),
                    location: ErrorLocation::from(Location::caller()),
                })?;
                TokenDelivery::parse(value)
            }
        }
    }
}
