use crate::{StoreResult, User, UserChanges};

use async_trait::async_trait;
use uuid::Uuid;

/// Persistence contract for identity records.
///
/// Implementations must apply each method as a single atomic statement against
/// the record; in particular `rotate_refresh_token` is a compare-and-set.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Insert a new record. Fails with `StoreError::Conflict` when the username
    /// or email is already taken.
    async fn insert(&self, user: &User) -> StoreResult<()>;

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<User>>;

    /// Look a record up by username or email. `identifier` is already normalized.
    async fn find_by_login(&self, identifier: &str) -> StoreResult<Option<User>>;

    /// Apply `changes` and return the updated record, or `None` if no such id.
    async fn update(&self, id: Uuid, changes: &UserChanges) -> StoreResult<Option<User>>;

    /// Unconditionally overwrite (or clear, with `None`) the stored refresh token.
    /// Returns `false` if no such id.
    async fn set_refresh_token(&self, id: Uuid, token: Option<&str>) -> StoreResult<bool>;

    /// Replace the stored refresh token with `next` only if it currently equals
    /// `current`. Returns `false` when the stored value differs.
    async fn rotate_refresh_token(&self, id: Uuid, current: &str, next: &str)
    -> StoreResult<bool>;
}
