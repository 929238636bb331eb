//! Session cookies for browser clients

use crate::{ApiError, ApiResult};

use vt_auth::SessionTokens;

use std::panic::Location;
use std::time::Duration;

use axum::http::{HeaderMap, HeaderValue, header};
use cookie::time::Duration as CookieDuration;
use cookie::{Cookie, SameSite};
use error_location::ErrorLocation;

pub const ACCESS_TOKEN_COOKIE: &str = "accessToken";
pub const REFRESH_TOKEN_COOKIE: &str = "refreshToken";

/// Cookie attributes shared by both session cookies
#[derive(Debug, Clone, Copy)]
pub struct CookiePolicy {
    pub secure: bool,
    pub access_max_age: Duration,
    pub refresh_max_age: Duration,
}

/// Read a cookie value from the request `Cookie` header(s)
pub fn read_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|part| Cookie::parse(part.trim().to_string()).ok())
        .find(|cookie| cookie.name() == name)
        .map(|cookie| cookie.value().to_string())
        .filter(|value| !value.is_empty())
}

/// `Set-Cookie` headers carrying a fresh token pair
#[track_caller]
pub fn session_cookies(tokens: &SessionTokens, policy: CookiePolicy) -> ApiResult<HeaderMap> {
    let mut headers = HeaderMap::new();
    append(
        &mut headers,
        session_cookie(
            ACCESS_TOKEN_COOKIE,
            tokens.access_token.clone(),
            policy.access_max_age,
            policy.secure,
        ),
    )?;
    append(
        &mut headers,
        session_cookie(
            REFRESH_TOKEN_COOKIE,
            tokens.refresh_token.clone(),
            policy.refresh_max_age,
            policy.secure,
        ),
    )?;
    Ok(headers)
}

/// `Set-Cookie` headers that expire both session cookies
#[track_caller]
pub fn cleared_cookies(secure: bool) -> ApiResult<HeaderMap> {
    let mut headers = HeaderMap::new();
    for name in [ACCESS_TOKEN_COOKIE, REFRESH_TOKEN_COOKIE] {
        append(
            &mut headers,
            session_cookie(name, String::new(), Duration::ZERO, secure),
        )?;
    }
    Ok(headers)
}

fn session_cookie(
    name: &'static str,
    value: String,
    max_age: Duration,
    secure: bool,
) -> Cookie<'static> {
    let max_age = i64::try_from(max_age.as_secs()).unwrap_or(i64::MAX);

    Cookie::build((name, value))
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Strict)
        .path("/")
        .max_age(CookieDuration::seconds(max_age))
        .build()
}

#[track_caller]
fn append(headers: &mut HeaderMap, cookie: Cookie<'static>) -> ApiResult<()> {
    let value = HeaderValue::from_str(&cookie.to_string()).map_err(|e| ApiError::Internal {
        message: format!("Unencodable cookie {}: {}", cookie.name(), e),
        location: ErrorLocation::from(Location::caller()),
    })?;
    headers.append(header::SET_COOKIE, value);
    Ok(())
}
