use crate::ApiError;
use crate::api::error::{INVALID_CREDENTIALS_MESSAGE, UNAUTHORIZED_MESSAGE};

use vt_auth::AuthError;

use std::panic::Location;

use axum::response::IntoResponse;
use error_location::ErrorLocation;
use http::StatusCode;
use http_body_util::BodyExt;

fn here() -> ErrorLocation {
    ErrorLocation::from(Location::caller())
}

async fn body_json(error: ApiError) -> (StatusCode, serde_json::Value) {
    let response = error.into_response();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn test_validation_error_returns_400_with_field() {
    let error = ApiError::Validation {
        message: "email is required".into(),
        field: Some("email".into()),
        location: here(),
    };

    let (status, json) = body_json(error).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"]["field"], "email");
}

#[tokio::test]
async fn test_unavailable_returns_503_without_internal_detail() {
    let error = ApiError::Unavailable {
        message: "pool timed out while waiting for an open connection".into(),
        location: here(),
    };

    let (status, json) = body_json(error).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(json["error"]["code"], "SERVICE_UNAVAILABLE");
    assert!(!json["error"]["message"].as_str().unwrap().contains("pool"));
}

#[tokio::test]
async fn test_internal_error_returns_500_without_detail() {
    let error = ApiError::Internal {
        message: "argon2 exploded".into(),
        location: here(),
    };

    let (status, json) = body_json(error).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"]["code"], "INTERNAL_ERROR");
    assert!(!json["error"]["message"].as_str().unwrap().contains("argon2"));
    assert!(json["error"].get("field").is_none());
}

#[tokio::test]
async fn test_not_found_and_wrong_password_produce_identical_responses() {
    let not_found = ApiError::from(AuthError::NotFound {
        identifier: "nobody".into(),
        location: here(),
    });
    let wrong_password = ApiError::from(AuthError::InvalidCredentials {
        user_id: "3f0c".into(),
        location: here(),
    });

    let (status_a, json_a) = body_json(not_found).await;
    let (status_b, json_b) = body_json(wrong_password).await;

    assert_eq!(status_a, StatusCode::UNAUTHORIZED);
    assert_eq!(status_a, status_b);
    assert_eq!(json_a, json_b);
    assert_eq!(json_a["error"]["message"], INVALID_CREDENTIALS_MESSAGE);
    assert!(!json_a.to_string().contains("nobody"));
}

#[tokio::test]
async fn test_token_failures_produce_identical_responses() {
    let failures = vec![
        AuthError::Unauthorized { location: here() },
        AuthError::TokenExpired { location: here() },
        AuthError::InvalidToken {
            message: "no identity".into(),
            location: here(),
        },
        AuthError::TokenReused { location: here() },
    ];

    let mut bodies = Vec::new();
    for failure in failures {
        let (status, json) = body_json(ApiError::from(failure)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        bodies.push(json);
    }

    assert!(bodies.windows(2).all(|pair| pair[0] == pair[1]));
    assert_eq!(bodies[0]["error"]["code"], "UNAUTHORIZED");
    assert_eq!(bodies[0]["error"]["message"], UNAUTHORIZED_MESSAGE);
}

#[test]
fn test_store_unavailable_maps_to_503() {
    let error = ApiError::from(AuthError::StoreUnavailable {
        message: "database is locked".into(),
        location: here(),
    });

    assert_eq!(error.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[test]
fn test_conflict_maps_to_409_and_keeps_message() {
    let error = ApiError::from(AuthError::Conflict {
        message: "User with email or username already exists".into(),
        location: here(),
    });

    assert_eq!(error.status(), StatusCode::CONFLICT);
    assert!(matches!(error, ApiError::Conflict { ref message, .. } if message.contains("already exists")));
}

#[test]
fn test_auth_validation_keeps_field() {
    let error = ApiError::from(AuthError::Validation {
        message: "password is required".into(),
        field: Some("password".into()),
        location: here(),
    });

    assert!(matches!(error, ApiError::Validation { field: Some(ref f), .. } if f == "password"));
}

#[test]
fn test_hashing_failure_maps_to_500() {
    let error = ApiError::from(AuthError::Hashing {
        message: "invalid params".into(),
        location: here(),
    });

    assert_eq!(error.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
