//! User identity record as held by the credential store.
//!
//! The record carries the password hash and the current refresh token. Neither
//! may cross the store boundary: callers outside it get a [`PublicUser`].

use crate::{NewUser, PublicUser};

use chrono::{DateTime, SubsecRound, Utc};
use uuid::Uuid;

#[derive(Clone, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    /// Unique, stored lowercase
    pub username: String,
    /// Unique, stored lowercase
    pub email: String,
    pub full_name: String,
    /// Reference URL returned by the media store
    pub avatar_url: Option<String>,
    pub cover_image_url: Option<String>,
    /// Argon2 PHC string, never the plaintext
    pub password_hash: String,
    /// Most recently issued refresh token. `None` means no active session.
    pub refresh_token: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Build a fresh record from validated registration input and an already
    /// computed password hash.
    ///
    /// Timestamps are whole seconds, the resolution the store keeps.
    pub fn new(new_user: NewUser, password_hash: String) -> Self {
        let now = Utc::now().trunc_subsecs(0);
        Self {
            id: Uuid::new_v4(),
            username: normalize_identifier(&new_user.username),
            email: normalize_identifier(&new_user.email),
            full_name: new_user.full_name.trim().to_string(),
            avatar_url: new_user.avatar_url,
            cover_image_url: new_user.cover_image_url,
            password_hash,
            refresh_token: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn has_active_session(&self) -> bool {
        self.refresh_token.is_some()
    }

    pub fn to_public(&self) -> PublicUser {
        PublicUser::from(self)
    }
}

// Hash and refresh token are redacted so a stray `{:?}` cannot leak them into logs.
impl std::fmt::Debug for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("email", &self.email)
            .field("full_name", &self.full_name)
            .field("avatar_url", &self.avatar_url)
            .field("cover_image_url", &self.cover_image_url)
            .field("password_hash", &"<redacted>")
            .field("refresh_token", &self.refresh_token.as_ref().map(|_| "<redacted>"))
            .field("created_at", &self.created_at)
            .field("updated_at", &self.updated_at)
            .finish()
    }
}

/// Usernames, emails and login identifiers are compared trimmed and lowercased.
pub fn normalize_identifier(value: &str) -> String {
    value.trim().to_lowercase()
}
