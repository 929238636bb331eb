use crate::TokenDelivery;

use axum::{body::Body, extract::FromRequestParts, http::Request};

async fn extract(header: Option<&str>) -> Result<TokenDelivery, crate::ApiError> {
    let mut builder = Request::builder();
    if let Some(value) = header {
        builder = builder.header("X-Token-Delivery", value);
    }
    let (mut parts, _body) = builder.body(Body::empty()).unwrap().into_parts();
    TokenDelivery::from_request_parts(&mut parts, &()).await
}

#[tokio::test]
async fn test_missing_header_defaults_to_cookie() {
    assert_eq!(extract(None).await.unwrap(), TokenDelivery::Cookie);
}

#[tokio::test]
async fn test_body_header_selects_body() {
    assert_eq!(extract(Some("body")).await.unwrap(), TokenDelivery::Body);
    assert_eq!(extract(Some(" BODY ")).await.unwrap(), TokenDelivery::Body);
}

#[tokio::test]
async fn test_cookie_header_selects_cookie() {
    assert_eq!(extract(Some("cookie")).await.unwrap(), TokenDelivery::Cookie);
}

#[tokio::test]
async fn test_unknown_value_is_rejected() {
    let result = extract(Some("carrier-pigeon")).await;
    assert!(matches!(result, Err(crate::ApiError::Validation { .. })));
}
