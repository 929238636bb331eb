use serde::Deserialize;

/// Login by username or email.
///
/// `identifier` takes precedence; `username` and `email` are accepted for
/// clients that send them separately.
#[derive(Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub identifier: Option<String>,
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: String,
}

impl LoginRequest {
    pub fn identifier(&self) -> &str {
        [&self.identifier, &self.username, &self.email]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .find(|value| !value.trim().is_empty())
            .unwrap_or_default()
    }
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("identifier", &self.identifier())
            .finish_non_exhaustive()
    }
}
