//! Session lifecycle: login, logout, refresh, and the account operations that
//! touch the stored secret.
//!
//! ## Refresh token rotation
//!
//! A refresh token is only honoured if it verifies against the refresh key AND
//! equals the single value persisted on the identity record. Every successful
//! refresh replaces that value through a compare-and-set, so:
//!
//! - a token that has been rotated away fails with `TokenReused`, even before
//!   it expires;
//! - of two concurrent refreshes presenting the same token, exactly one wins;
//! - logout (which clears the value) revokes the session immediately;
//! - a second login overwrites the value, so only the newest session survives.
//!
//! Tokens are always signed before anything is written. If the write fails the
//! stored value is untouched and the caller sees the failure.

use crate::{
    AuthError, LoginOutcome, Result as AuthErrorResult, SecretHasher, SessionTokens, TokenIssuer,
};

use vt_core::models::new_user::validate_email;
use vt_core::{CredentialStore, NewUser, PublicUser, User, UserChanges, normalize_identifier};

use std::panic::Location;
use std::sync::Arc;

use error_location::ErrorLocation;
use log::{debug, error, info, warn};
use uuid::Uuid;

/// Requested changes to the caller's own account.
///
/// `new_password` is the only thing that triggers hashing. Changing it also
/// requires `current_password` and ends the active session.
#[derive(Clone, Default)]
pub struct AccountUpdate {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub current_password: Option<String>,
    pub new_password: Option<String>,
}

pub struct SessionManager {
    store: Arc<dyn CredentialStore>,
    issuer: TokenIssuer,
    hasher: SecretHasher,
}

impl SessionManager {
    pub fn new(store: Arc<dyn CredentialStore>, issuer: TokenIssuer, hasher: SecretHasher) -> Self {
        Self {
            store,
            issuer,
            hasher,
        }
    }

    pub fn issuer(&self) -> &TokenIssuer {
        &self.issuer
    }

    /// Create a new identity. The password is hashed exactly once here.
    pub async fn register(&self, new_user: NewUser) -> AuthErrorResult<PublicUser> {
        new_user.validate()?;

        let username = normalize_identifier(&new_user.username);
        let email = normalize_identifier(&new_user.email);

        if self.store.find_by_login(&username).await?.is_some()
            || self.store.find_by_login(&email).await?.is_some()
        {
            return Err(AuthError::Conflict {
                message: "User with email or username already exists".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let password_hash = self.hasher.hash_blocking(new_user.password.clone()).await?;
        let user = User::new(new_user, password_hash);

        // The unique constraints still guard the race between the check above
        // and this insert; the store reports it as a conflict.
        self.store.insert(&user).await?;

        info!("Registered user {} ({})", user.username, user.id);
        Ok(user.to_public())
    }

    /// Authenticate by username or email and open a new session.
    ///
    /// Any previously issued refresh token for this identity stops working.
    pub async fn login(&self, identifier: &str, password: &str) -> AuthErrorResult<LoginOutcome> {
        if identifier.trim().is_empty() {
            return Err(AuthError::Validation {
                message: "username or email is required".to_string(),
                field: Some("identifier".to_string()),
                location: ErrorLocation::from(Location::caller()),
            });
        }
        if password.is_empty() {
            return Err(AuthError::Validation {
                message: "password is required".to_string(),
                field: Some("password".to_string()),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let identifier = normalize_identifier(identifier);
        let user = match self.store.find_by_login(&identifier).await {
            Ok(Some(user)) => user,
            Ok(None) => {
                // A miss pays the same argon2 cost as a wrong password
                self.hasher
                    .verify_placeholder_blocking(password.to_string())
                    .await;
                warn!("Login rejected: no identity matches '{}'", identifier);
                return Err(AuthError::NotFound {
                    identifier,
                    location: ErrorLocation::from(Location::caller()),
                });
            }
            Err(e) => {
                error!("Login aborted: {}", e);
                return Err(e.into());
            }
        };

        let valid = self
            .hasher
            .verify_blocking(password.to_string(), user.password_hash.clone())
            .await?;
        if !valid {
            warn!("Login rejected: wrong password for user {}", user.id);
            return Err(AuthError::InvalidCredentials {
                user_id: user.id.to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let tokens = self.mint(&user)?;

        let persisted = self
            .store
            .set_refresh_token(user.id, Some(&tokens.refresh_token))
            .await
            .inspect_err(|e| error!("Login aborted, refresh token not stored: {}", e))?;
        if !persisted {
            // Record vanished between lookup and write
            return Err(AuthError::NotFound {
                identifier,
                location: ErrorLocation::from(Location::caller()),
            });
        }

        if user.has_active_session() {
            info!("User {} logged in; previous session revoked", user.id);
        } else {
            info!("User {} logged in", user.id);
        }

        Ok(LoginOutcome {
            user: user.to_public(),
            tokens,
        })
    }

    /// End the session for `user_id`.
    ///
    /// Authorization happens upstream (access-token check); no refresh token
    /// needs to be presented. Clearing is unconditional.
    pub async fn logout(&self, user_id: Uuid) -> AuthErrorResult<()> {
        let cleared = self.store.set_refresh_token(user_id, None).await?;
        if cleared {
            info!("User {} logged out", user_id);
        } else {
            debug!("Logout for unknown user {}", user_id);
        }
        Ok(())
    }

    /// Exchange a refresh token for a new access/refresh pair.
    ///
    /// The presented token is consumed: after success it is no longer valid.
    pub async fn refresh(&self, presented: Option<&str>) -> AuthErrorResult<SessionTokens> {
        let presented = match presented {
            Some(token) if !token.trim().is_empty() => token,
            _ => {
                return Err(AuthError::Unauthorized {
                    location: ErrorLocation::from(Location::caller()),
                });
            }
        };

        let claims = self.issuer.verify_refresh(presented).map_err(|e| {
            debug!("Refresh rejected: {}", e);
            e.into_invalid_token()
        })?;
        let user_id = claims.user_id()?;

        let user = self
            .store
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AuthError::InvalidToken {
                message: format!("no identity {}", user_id),
                location: ErrorLocation::from(Location::caller()),
            })?;

        let matches_stored = user
            .refresh_token
            .as_deref()
            .is_some_and(|stored| constant_time_eq(stored.as_bytes(), presented.as_bytes()));
        if !matches_stored {
            warn!(
                "Refresh rejected for user {}: token already rotated or revoked",
                user_id
            );
            return Err(AuthError::TokenReused {
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let tokens = self.mint(&user)?;

        let rotated = self
            .store
            .rotate_refresh_token(user_id, presented, &tokens.refresh_token)
            .await
            .inspect_err(|e| error!("Refresh aborted, token not rotated: {}", e))?;
        if !rotated {
            // Lost the race to a concurrent refresh (or logout) of the same token
            warn!("Refresh rejected for user {}: concurrent rotation", user_id);
            return Err(AuthError::TokenReused {
                location: ErrorLocation::from(Location::caller()),
            });
        }

        debug!("Rotated refresh token for user {}", user_id);
        Ok(tokens)
    }

    /// Resolve an access token to the identity it was issued for.
    pub async fn authenticate(&self, access_token: &str) -> AuthErrorResult<PublicUser> {
        let claims = self
            .issuer
            .verify_access(access_token)
            .map_err(AuthError::into_invalid_token)?;
        let user_id = claims.user_id()?;

        let user = self
            .store
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AuthError::InvalidToken {
                message: format!("no identity {}", user_id),
                location: ErrorLocation::from(Location::caller()),
            })?;

        Ok(user.to_public())
    }

    /// Apply profile and/or password changes to `user_id`.
    pub async fn update_account(
        &self,
        user_id: Uuid,
        update: AccountUpdate,
    ) -> AuthErrorResult<PublicUser> {
        let mut changes = UserChanges::default();

        if let Some(full_name) = update.full_name {
            if full_name.trim().is_empty() {
                return Err(validation("full_name cannot be blank", "full_name"));
            }
            changes.full_name = Some(full_name.trim().to_string());
        }

        if let Some(email) = update.email {
            validate_email(&email)?;
            let email = normalize_identifier(&email);
            // Emails and usernames share the login namespace
            if let Some(holder) = self.store.find_by_login(&email).await?
                && holder.id != user_id
            {
                warn!("Email change rejected for user {}: identifier taken", user_id);
                return Err(AuthError::Conflict {
                    message: "User with email or username already exists".to_string(),
                    location: ErrorLocation::from(Location::caller()),
                });
            }
            changes.email = Some(email);
        }

        if let Some(new_password) = update.new_password {
            if new_password.is_empty() {
                return Err(validation("new_password cannot be empty", "new_password"));
            }
            let current_password = update
                .current_password
                .filter(|p| !p.is_empty())
                .ok_or_else(|| validation("old_password is required", "old_password"))?;

            let user = self
                .store
                .find_by_id(user_id)
                .await?
                .ok_or_else(|| AuthError::NotFound {
                    identifier: user_id.to_string(),
                    location: ErrorLocation::from(Location::caller()),
                })?;

            let valid = self
                .hasher
                .verify_blocking(current_password, user.password_hash)
                .await?;
            if !valid {
                warn!("Password change rejected: wrong password for user {}", user_id);
                return Err(AuthError::InvalidCredentials {
                    user_id: user_id.to_string(),
                    location: ErrorLocation::from(Location::caller()),
                });
            }

            changes.password_hash = Some(self.hasher.hash_blocking(new_password).await?);
        }

        if changes.is_empty() {
            return Err(AuthError::Validation {
                message: "nothing to update".to_string(),
                field: None,
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let updated = self
            .store
            .update(user_id, &changes)
            .await?
            .ok_or_else(|| AuthError::NotFound {
                identifier: user_id.to_string(),
                location: ErrorLocation::from(Location::caller()),
            })?;

        if changes.changes_secret() {
            info!("Password changed for user {}; session ended", user_id);
        }

        Ok(updated.to_public())
    }

    #[track_caller]
    fn mint(&self, user: &User) -> AuthErrorResult<SessionTokens> {
        Ok(SessionTokens {
            access_token: self.issuer.issue_access(user)?,
            refresh_token: self.issuer.issue_refresh(user.id)?,
        })
    }
}

#[track_caller]
fn validation(message: &str, field: &str) -> AuthError {
    AuthError::Validation {
        message: message.to_string(),
        field: Some(field.to_string()),
        location: ErrorLocation::from(Location::caller()),
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
