use crate::api::cookies::{CookiePolicy, cleared_cookies, read_cookie, session_cookies};
use crate::{ACCESS_TOKEN_COOKIE, REFRESH_TOKEN_COOKIE};

use vt_auth::SessionTokens;

use std::time::Duration;

use axum::http::{HeaderMap, HeaderValue, header};
use cookie::{Cookie, SameSite};

fn tokens() -> SessionTokens {
    SessionTokens {
        access_token: "access.jwt.value".to_string(),
        refresh_token: "refresh.jwt.value".to_string(),
    }
}

fn policy(secure: bool) -> CookiePolicy {
    CookiePolicy {
        secure,
        access_max_age: Duration::from_secs(15 * 60),
        refresh_max_age: Duration::from_secs(10 * 24 * 60 * 60),
    }
}

fn parsed(headers: &HeaderMap) -> Vec<Cookie<'static>> {
    headers
        .get_all(header::SET_COOKIE)
        .iter()
        .map(|v| Cookie::parse(v.to_str().unwrap().to_string()).unwrap())
        .collect()
}

#[test]
fn test_session_cookies_are_http_only_secure_strict() {
    let headers = session_cookies(&tokens(), policy(true)).unwrap();
    let cookies = parsed(&headers);

    assert_eq!(cookies.len(), 2);
    for cookie in &cookies {
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Strict));
        assert_eq!(cookie.path(), Some("/"));
    }
}

#[test]
fn test_session_cookie_max_age_matches_token_ttl() {
    let headers = session_cookies(&tokens(), policy(true)).unwrap();
    let cookies = parsed(&headers);

    let access = cookies.iter().find(|c| c.name() == ACCESS_TOKEN_COOKIE).unwrap();
    let refresh = cookies.iter().find(|c| c.name() == REFRESH_TOKEN_COOKIE).unwrap();

    assert_eq!(access.value(), "access.jwt.value");
    assert_eq!(access.max_age().unwrap().whole_seconds(), 15 * 60);
    assert_eq!(refresh.value(), "refresh.jwt.value");
    assert_eq!(refresh.max_age().unwrap().whole_seconds(), 10 * 24 * 60 * 60);
}

#[test]
fn test_insecure_policy_omits_secure_attribute() {
    let headers = session_cookies(&tokens(), policy(false)).unwrap();

    for cookie in parsed(&headers) {
        assert_ne!(cookie.secure(), Some(true));
    }
}

#[test]
fn test_cleared_cookies_expire_both_names() {
    let headers = cleared_cookies(true).unwrap();
    let cookies = parsed(&headers);

    let names: Vec<&str> = cookies.iter().map(|c| c.name()).collect();
    assert_eq!(names, vec![ACCESS_TOKEN_COOKIE, REFRESH_TOKEN_COOKIE]);
    for cookie in &cookies {
        assert_eq!(cookie.value(), "");
        assert_eq!(cookie.max_age().unwrap().whole_seconds(), 0);
    }
}

#[test]
fn test_read_cookie_finds_named_value_among_others() {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::COOKIE,
        HeaderValue::from_static("theme=dark; refreshToken=abc.def.ghi; accessToken=xyz"),
    );

    assert_eq!(
        read_cookie(&headers, REFRESH_TOKEN_COOKIE).as_deref(),
        Some("abc.def.ghi")
    );
    assert_eq!(read_cookie(&headers, ACCESS_TOKEN_COOKIE).as_deref(), Some("xyz"));
    assert_eq!(read_cookie(&headers, "missing"), None);
}

#[test]
fn test_read_cookie_treats_empty_value_as_absent() {
    let mut headers = HeaderMap::new();
    headers.insert(header::COOKIE, HeaderValue::from_static("refreshToken="));

    assert_eq!(read_cookie(&headers, REFRESH_TOKEN_COOKIE), None);
}
