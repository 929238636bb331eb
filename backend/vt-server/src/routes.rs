use crate::{
    ApiError, AppState, change_password, current_user, health, login, logout, refresh_token,
    register, update_account,
};

use std::panic::Location;

use axum::{
    BoxError, Router,
    error_handling::HandleErrorLayer,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use error_location::ErrorLocation;
use tower::ServiceBuilder;
use tower::timeout::{TimeoutLayer, error::Elapsed};

/// Build the application router with all endpoints
pub fn build_router(state: AppState) -> Router {
    let request_timeout = state.request_timeout;

    Router::new()
        // Health check endpoints
        .route("/health", get(health::health_check))
        .route("/live", get(health::liveness_check))
        .route("/ready", get(health::readiness_check))
        // Session endpoints
        .route("/api/v1/users/register", post(register))
        .route("/api/v1/users/login", post(login))
        .route("/api/v1/users/logout", post(logout))
        .route("/api/v1/users/refresh-token", post(refresh_token))
        .route("/api/v1/users/me", get(current_user).patch(update_account))
        .route("/api/v1/users/change-password", post(change_password))
        .with_state(state)
        // Bounds every request, store I/O included
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(handle_middleware_error))
                .layer(TimeoutLayer::new(request_timeout)),
        )
}

async fn handle_middleware_error(err: BoxError) -> Response {
    if err.is::<Elapsed>() {
        log::warn!("Request timed out");
        ApiError::Unavailable {
            message: "request timed out".to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
        .into_response()
    } else {
        ApiError::Internal {
            message: format!("Unhandled middleware error: {}", err),
            location: ErrorLocation::from(Location::caller()),
        }
        .into_response()
    }
}
