
use crate::{HashingCost, SecretHasher, TokenConfig, TokenIssuer};

use std::time::Duration;

pub(crate) const ACCESS_SECRET: &[u8] = b"access-secret-key-at-least-32-bytes!";
pub(crate) const REFRESH_SECRET: &[u8] = b"refresh-secret-key-at-least-32-bytes";

pub(crate) fn token_config() -> TokenConfig {
    TokenConfig {
        access_secret: ACCESS_SECRET.to_vec(),
        access_ttl: Duration::from_secs(15 * 60),
        refresh_secret: REFRESH_SECRET.to_vec(),
        refresh_ttl: Duration::from_secs(10 * 24 * 60 * 60),
    }
}

pub(crate) fn test_issuer() -> TokenIssuer {
    TokenIssuer::new(&token_config())
}

/// Cheapest valid argon2 parameters; keeps the suite fast
pub(crate) fn test_hasher() -> SecretHasher {
    SecretHasher::new(HashingCost {
        memory_kib: 8,
        iterations: 1,
        parallelism: 1,
    })
    .unwrap()
}
