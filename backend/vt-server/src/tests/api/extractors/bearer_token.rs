use crate::api::extractors::auth_user::bearer_token;

use axum::http::{HeaderMap, HeaderValue, header};

fn headers(authorization: &'static str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(header::AUTHORIZATION, HeaderValue::from_static(authorization));
    headers
}

#[test]
fn test_bearer_token_is_extracted() {
    assert_eq!(
        bearer_token(&headers("Bearer abc.def.ghi")).as_deref(),
        Some("abc.def.ghi")
    );
}

#[test]
fn test_scheme_is_case_insensitive() {
    assert_eq!(bearer_token(&headers("bearer abc")).as_deref(), Some("abc"));
}

#[test]
fn test_other_schemes_are_ignored() {
    assert_eq!(bearer_token(&headers("Basic YWxpY2U6c2VjcmV0")), None);
}

#[test]
fn test_empty_bearer_is_ignored() {
    assert_eq!(bearer_token(&headers("Bearer ")), None);
    assert_eq!(bearer_token(&HeaderMap::new()), None);
}
