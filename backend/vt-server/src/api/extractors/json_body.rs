use crate::ApiError;

use std::panic::Location;

use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
};
use error_location::ErrorLocation;
use serde::de::DeserializeOwned;

/// JSON request body whose failures use the API error envelope.
///
/// An empty body deserializes as `T::default()`, so endpoints whose fields are
/// all optional (refresh with a cookie) accept a bare POST.
#[derive(Debug)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Default + Send,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| ApiError::BadRequest {
                message: format!("Failed to read request body: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(JsonBody(T::default()));
        }

        serde_json::from_slice(&bytes)
            .map(JsonBody)
            .map_err(|e| ApiError::BadRequest {
                message: format!("Invalid JSON body: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })
    }
}
