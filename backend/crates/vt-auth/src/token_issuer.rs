use crate::{AccessClaims, AuthError, RefreshClaims, Result as AuthErrorResult, TokenConfig, TokenKind};

use vt_core::User;

use std::panic::Location;
use std::time::Duration;

use error_location::ErrorLocation;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use uuid::Uuid;

/// Signs and verifies access and refresh tokens (HS256).
///
/// Stateless: everything it needs is the immutable [`TokenConfig`] it was built
/// from. Each token class has its own key pair.
pub struct TokenIssuer {
    access_encoding: EncodingKey,
    access_decoding: DecodingKey,
    refresh_encoding: EncodingKey,
    refresh_decoding: DecodingKey,
    access_ttl: Duration,
    refresh_ttl: Duration,
    validation: Validation,
}

impl TokenIssuer {
    pub fn new(config: &TokenConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.validate_nbf = true;
        validation.leeway = 30; // 30 second clock skew tolerance

        Self {
            access_encoding: EncodingKey::from_secret(&config.access_secret),
            access_decoding: DecodingKey::from_secret(&config.access_secret),
            refresh_encoding: EncodingKey::from_secret(&config.refresh_secret),
            refresh_decoding: DecodingKey::from_secret(&config.refresh_secret),
            access_ttl: config.access_ttl,
            refresh_ttl: config.refresh_ttl,
            validation,
        }
    }

    /// Sign a fresh access token for `user`
    #[track_caller]
    pub fn issue_access(&self, user: &User) -> AuthErrorResult<String> {
        let claims = AccessClaims::for_user(user, self.access_ttl);
        self.sign(&claims, TokenKind::Access)
    }

    /// Sign a fresh refresh token carrying only the user id
    #[track_caller]
    pub fn issue_refresh(&self, user_id: Uuid) -> AuthErrorResult<String> {
        let claims = RefreshClaims::for_user_id(user_id, self.refresh_ttl);
        self.sign(&claims, TokenKind::Refresh)
    }

    /// Verify signature and expiry against the key for `kind` and decode the claims.
    ///
    /// Fails with `TokenExpired` when the signature is good but `exp` has passed,
    /// and with `InvalidSignature` for anything else (wrong key, tampering,
    /// malformed input).
    #[track_caller]
    pub fn verify<C: DeserializeOwned>(&self, token: &str, kind: TokenKind) -> AuthErrorResult<C> {
        let key = match kind {
            TokenKind::Access => &self.access_decoding,
            TokenKind::Refresh => &self.refresh_decoding,
        };

        let token_data = decode::<C>(token, key, &self.validation).map_err(|e| {
            use jsonwebtoken::errors::ErrorKind;
            match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::TokenExpired {
                    location: ErrorLocation::from(Location::caller()),
                },
                _ => AuthError::InvalidSignature {
                    source: e,
                    location: ErrorLocation::from(Location::caller()),
                },
            }
        })?;

        Ok(token_data.claims)
    }

    #[track_caller]
    pub fn verify_access(&self, token: &str) -> AuthErrorResult<AccessClaims> {
        self.verify(token, TokenKind::Access)
    }

    #[track_caller]
    pub fn verify_refresh(&self, token: &str) -> AuthErrorResult<RefreshClaims> {
        self.verify(token, TokenKind::Refresh)
    }

    pub fn access_ttl(&self) -> Duration {
        self.access_ttl
    }

    pub fn refresh_ttl(&self) -> Duration {
        self.refresh_ttl
    }

    #[track_caller]
    fn sign<C: Serialize>(&self, claims: &C, kind: TokenKind) -> AuthErrorResult<String> {
        let key = match kind {
            TokenKind::Access => &self.access_encoding,
            TokenKind::Refresh => &self.refresh_encoding,
        };

        encode(&Header::new(Algorithm::HS256), claims, key).map_err(|e| AuthError::Signing {
            source: e,
            location: ErrorLocation::from(Location::caller()),
        })
    }
}
