
use std::env;

use tempfile::TempDir;

pub(crate) const ACCESS_SECRET: &str = "access-secret-that-is-long-enough-0001";
pub(crate) const REFRESH_SECRET: &str = "refresh-secret-that-is-long-enough-001";

/// RAII guard for environment variables - automatically restores on drop
pub(crate) struct EnvGuard {
    key: &'static str,
    original: Option<String>,
}

impl EnvGuard {
    pub(crate) fn set(key: &'static str, value: &str) -> Self {
        unsafe {
            let original = env::var(key).ok();
            env::set_var(key, value);
            Self { key, original }
        }
    }

    pub(crate) fn remove(key: &'static str) -> Self {
        unsafe {
            let original = env::var(key).ok();
            env::remove_var(key);
            Self { key, original }
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        unsafe {
            match &self.original {
                Some(val) => env::set_var(self.key, val),
                None => env::remove_var(self.key),
            }
        }
    }
}

/// Create a temp config directory and point VT_CONFIG_DIR at it
pub(crate) fn setup_config_dir() -> (TempDir, EnvGuard) {
    let temp = TempDir::new().unwrap();
    let guard = EnvGuard::set("VT_CONFIG_DIR", temp.path().to_str().unwrap());
    (temp, guard)
}

/// Secrets in the environment so validate() can pass
pub(crate) fn with_secrets() -> (EnvGuard, EnvGuard) {
    (
        EnvGuard::set("VT_ACCESS_TOKEN_SECRET", ACCESS_SECRET),
        EnvGuard::set("VT_REFRESH_TOKEN_SECRET", REFRESH_SECRET),
    )
}
