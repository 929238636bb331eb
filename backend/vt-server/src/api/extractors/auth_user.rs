//! Access-token authentication for REST handlers

use crate::{ACCESS_TOKEN_COOKIE, ApiError, AppState};
use crate::api::cookies::read_cookie;

use vt_core::PublicUser;

use std::panic::Location;

use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, header, request::Parts},
};
use error_location::ErrorLocation;

/// The authenticated caller.
///
/// Reads the `accessToken` cookie, falling back to `Authorization: Bearer`.
/// Rejects with 401 when no token is present, it fails verification, or the
/// identity no longer exists.
#[derive(Debug, Clone)]
pub struct AuthUser(pub PublicUser);

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = access_token(&parts.headers).ok_or_else(|| {
            log::debug!("No access token on {} {}", parts.method, parts.uri.path());
            ApiError::Unauthorized {
                location: ErrorLocation::from(Location::caller()),
            }
        })?;

        let user = state.sessions.authenticate(&token).await?;
        Ok(AuthUser(user))
    }
}

fn access_token(headers: &HeaderMap) -> Option<String> {
    read_cookie(headers, ACCESS_TOKEN_COOKIE).or_else(|| bearer_token(headers))
}

pub(crate) fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then(|| token.to_string())
}
