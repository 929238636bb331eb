use crate::{ApiError, JsonBody, RefreshRequest};

use axum::{body::Body, extract::FromRequest, http::Request};

async fn extract(body: &'static str) -> Result<JsonBody<RefreshRequest>, ApiError> {
    let request = Request::builder()
        .method("POST")
        .body(Body::from(body))
        .unwrap();
    JsonBody::<RefreshRequest>::from_request(request, &()).await
}

#[tokio::test]
async fn test_empty_body_yields_default() {
    let JsonBody(req) = extract("").await.unwrap();
    assert!(req.refresh_token.is_none());
}

#[tokio::test]
async fn test_snake_and_camel_case_fields_are_accepted() {
    let JsonBody(snake) = extract(r#"{"refresh_token":"a.b.c"}"#).await.unwrap();
    let JsonBody(camel) = extract(r#"{"refreshToken":"a.b.c"}"#).await.unwrap();

    assert_eq!(snake.refresh_token.as_deref(), Some("a.b.c"));
    assert_eq!(camel.refresh_token.as_deref(), Some("a.b.c"));
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let result = extract("{not json").await;
    assert!(matches!(result, Err(ApiError::BadRequest { .. })));
}
