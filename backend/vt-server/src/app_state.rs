use vt_auth::SessionManager;

use std::sync::Arc;
use std::time::Duration;

use sqlx::SqlitePool;

/// Shared handler state. Cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<SessionManager>,
    /// Used by readiness probes only; all identity access goes through `sessions`
    pub pool: SqlitePool,
    /// `Secure` attribute on session cookies. Off only for plain-HTTP development.
    pub secure_cookies: bool,
    pub request_timeout: Duration,
}
