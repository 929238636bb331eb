use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_ACCESS_TOKEN_TTL, DEFAULT_REFRESH_TOKEN_TTL,
    DEFAULT_SECURE_COOKIES, MIN_SECRET_LENGTH,
};

use std::fmt;
use std::time::Duration;

use serde::Deserialize;

#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// HS256 key for access tokens
    pub access_token_secret: Option<String>,
    /// Humantime duration, e.g. "15m"
    pub access_token_ttl: String,
    /// HS256 key for refresh tokens, never equal to the access key
    pub refresh_token_secret: Option<String>,
    pub refresh_token_ttl: String,
    /// Set the `Secure` attribute on session cookies
    pub secure_cookies: bool,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            access_token_secret: None,
            access_token_ttl: String::from(DEFAULT_ACCESS_TOKEN_TTL),
            refresh_token_secret: None,
            refresh_token_ttl: String::from(DEFAULT_REFRESH_TOKEN_TTL),
            secure_cookies: DEFAULT_SECURE_COOKIES,
        }
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("access_token_secret", &redacted(&self.access_token_secret))
            .field("access_token_ttl", &self.access_token_ttl)
            .field("refresh_token_secret", &redacted(&self.refresh_token_secret))
            .field("refresh_token_ttl", &self.refresh_token_ttl)
            .field("secure_cookies", &self.secure_cookies)
            .finish()
    }
}

fn redacted(secret: &Option<String>) -> &'static str {
    match secret {
        Some(_) => "<redacted>",
        None => "<unset>",
    }
}

impl AuthConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        let access = Self::check_secret("auth.access_token_secret", &self.access_token_secret)?;
        let refresh =
            Self::check_secret("auth.refresh_token_secret", &self.refresh_token_secret)?;

        if access == refresh {
            return Err(ConfigError::auth(
                "auth.access_token_secret and auth.refresh_token_secret must differ",
            ));
        }

        let access_ttl = self.access_ttl()?;
        let refresh_ttl = self.refresh_ttl()?;

        if access_ttl.is_zero() {
            return Err(ConfigError::auth("auth.access_token_ttl must be > 0"));
        }

        if refresh_ttl <= access_ttl {
            return Err(ConfigError::auth(format!(
                "auth.refresh_token_ttl ({}) must be longer than auth.access_token_ttl ({})",
                self.refresh_token_ttl, self.access_token_ttl
            )));
        }

        Ok(())
    }

    pub fn access_ttl(&self) -> ConfigErrorResult<Duration> {
        Self::parse_ttl("auth.access_token_ttl", &self.access_token_ttl)
    }

    pub fn refresh_ttl(&self) -> ConfigErrorResult<Duration> {
        Self::parse_ttl("auth.refresh_token_ttl", &self.refresh_token_ttl)
    }

    /// Access key bytes; fails when unset
    pub fn access_secret(&self) -> ConfigErrorResult<&[u8]> {
        Self::check_secret("auth.access_token_secret", &self.access_token_secret)
    }

    /// Refresh key bytes; fails when unset
    pub fn refresh_secret(&self) -> ConfigErrorResult<&[u8]> {
        Self::check_secret("auth.refresh_token_secret", &self.refresh_token_secret)
    }

    fn check_secret<'a>(key: &str, secret: &'a Option<String>) -> ConfigErrorResult<&'a [u8]> {
        match secret {
            None => Err(ConfigError::auth(format!("{key} is required"))),
            Some(s) if s.len() < MIN_SECRET_LENGTH => Err(ConfigError::auth(format!(
                "{key} must be at least {MIN_SECRET_LENGTH} characters, got {}",
                s.len()
            ))),
            Some(s) => Ok(s.as_bytes()),
        }
    }

    fn parse_ttl(key: &str, value: &str) -> ConfigErrorResult<Duration> {
        humantime::parse_duration(value)
            .map_err(|e| ConfigError::auth(format!("{key} is not a valid duration '{value}': {e}")))
    }
}
