use std::time::Duration;

/// Signing keys and lifetimes for both token classes.
///
/// The two secrets must differ so that compromise of one key does not let an
/// attacker mint the other token class. `vt-config` enforces this at startup.
#[derive(Clone)]
pub struct TokenConfig {
    pub access_secret: Vec<u8>,
    pub access_ttl: Duration,
    pub refresh_secret: Vec<u8>,
    pub refresh_ttl: Duration,
}

impl std::fmt::Debug for TokenConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenConfig")
            .field("access_ttl", &self.access_ttl)
            .field("refresh_ttl", &self.refresh_ttl)
            .finish_non_exhaustive()
    }
}
