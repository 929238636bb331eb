//! User session REST API handlers
//!
//! Login and refresh hand out tokens according to [`TokenDelivery`]: as
//! `HttpOnly` cookies (default) or in the JSON body.

use crate::api::cookies::{CookiePolicy, cleared_cookies, read_cookie, session_cookies};
use crate::api::extractors::json_body::JsonBody;
use crate::{
    ApiError, ApiResult, AppState, AuthUser, ChangePasswordRequest, EmptyResponse, LoginRequest,
    REFRESH_TOKEN_COOKIE, RefreshRequest, RegisterRequest, SessionResponse, TokenDelivery,
    UpdateAccountRequest, UserResponse,
};

use vt_auth::{AccountUpdate, AuthError, SessionTokens};
use vt_core::PublicUser;

use std::panic::Location;

use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use error_location::ErrorLocation;

// =============================================================================
// Handlers
// =============================================================================

/// POST /api/v1/users/register
pub async fn register(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<UserResponse>)> {
    let user = state.sessions.register(req.into()).await?;

    Ok((StatusCode::CREATED, Json(UserResponse { user })))
}

/// POST /api/v1/users/login
pub async fn login(
    State(state): State<AppState>,
    delivery: TokenDelivery,
    JsonBody(req): JsonBody<LoginRequest>,
) -> ApiResult<Response> {
    let outcome = state
        .sessions
        .login(req.identifier(), &req.password)
        .await?;

    deliver(&state, delivery, Some(outcome.user), outcome.tokens)
}

/// POST /api/v1/users/logout
///
/// Revokes the refresh token and expires both cookies. An access token
/// already handed out stays valid until it expires.
pub async fn logout(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> ApiResult<Response> {
    state.sessions.logout(user.id).await?;

    let headers = cleared_cookies(state.secure_cookies)?;
    Ok((headers, Json(EmptyResponse {})).into_response())
}

/// POST /api/v1/users/refresh-token
///
/// Takes the refresh token from the `refreshToken` cookie, else from the body.
pub async fn refresh_token(
    State(state): State<AppState>,
    delivery: TokenDelivery,
    headers: HeaderMap,
    JsonBody(req): JsonBody<RefreshRequest>,
) -> ApiResult<Response> {
    let presented = read_cookie(&headers, REFRESH_TOKEN_COOKIE).or(req.refresh_token);

    let tokens = state.sessions.refresh(presented.as_deref()).await?;

    deliver(&state, delivery, None, tokens)
}

/// GET /api/v1/users/me
pub async fn current_user(AuthUser(user): AuthUser) -> Json<UserResponse> {
    Json(UserResponse { user })
}

/// PATCH /api/v1/users/me
pub async fn update_account(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    JsonBody(req): JsonBody<UpdateAccountRequest>,
) -> ApiResult<Json<UserResponse>> {
    let update = AccountUpdate {
        full_name: req.full_name,
        email: req.email,
        ..AccountUpdate::default()
    };

    let user = state.sessions.update_account(user.id, update).await?;

    Ok(Json(UserResponse { user }))
}

/// POST /api/v1/users/change-password
///
/// A successful change ends the session: the stored refresh token is cleared
/// and the cookies are expired.
pub async fn change_password(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    JsonBody(req): JsonBody<ChangePasswordRequest>,
) -> ApiResult<Response> {
    let update = AccountUpdate {
        current_password: Some(req.old_password),
        new_password: Some(req.new_password),
        ..AccountUpdate::default()
    };

    state
        .sessions
        .update_account(user.id, update)
        .await
        .map_err(|e| match e {
            // The caller is authenticated; a wrong old password is bad input
            AuthError::InvalidCredentials { .. } => ApiError::Validation {
                message: "Invalid old password".to_string(),
                field: Some("old_password".to_string()),
                location: ErrorLocation::from(Location::caller()),
            },
            other => ApiError::from(other),
        })?;

    let headers = cleared_cookies(state.secure_cookies)?;
    Ok((headers, Json(EmptyResponse {})).into_response())
}

// =============================================================================
// Helpers
// =============================================================================

fn deliver(
    state: &AppState,
    delivery: TokenDelivery,
    user: Option<PublicUser>,
    tokens: SessionTokens,
) -> ApiResult<Response> {
    match delivery {
        TokenDelivery::Cookie => {
            let headers = session_cookies(&tokens, cookie_policy(state))?;
            let body = SessionResponse {
                user,
                access_token: None,
                refresh_token: None,
            };
            Ok((headers, Json(body)).into_response())
        }
        TokenDelivery::Body => {
            let body = SessionResponse {
                user,
                access_token: Some(tokens.access_token),
                refresh_token: Some(tokens.refresh_token),
            };
            Ok(Json(body).into_response())
        }
    }
}

fn cookie_policy(state: &AppState) -> CookiePolicy {
    let issuer = state.sessions.issuer();
    CookiePolicy {
        secure: state.secure_cookies,
        access_max_age: issuer.access_ttl(),
        refresh_max_age: issuer.refresh_ttl(),
    }
}
