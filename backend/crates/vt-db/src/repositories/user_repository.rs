//! SQLite-backed identity records.
//!
//! Refresh token writes are single statements so the per-row atomicity of
//! SQLite is all the concurrency control they need. Rotation in particular is
//! a compare-and-set (`WHERE refresh_token = ?`); two requests rotating the
//! same token cannot both see `rows_affected() == 1`.

use crate::{DbError, Result as DbErrorResult};

use vt_core::{CredentialStore, StoreResult, User, UserChanges};

use std::panic::Location;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use error_location::ErrorLocation;
use sqlx::{FromRow, SqlitePool};
use uuid::Uuid;

const USER_COLUMNS: &str = "id, username, email, full_name, avatar_url, cover_image_url, \
     password_hash, refresh_token, created_at, updated_at";

#[derive(FromRow)]
struct UserRow {
    id: String,
    username: String,
    email: String,
    full_name: String,
    avatar_url: Option<String>,
    cover_image_url: Option<String>,
    password_hash: String,
    refresh_token: Option<String>,
    created_at: i64,
    updated_at: i64,
}

impl TryFrom<UserRow> for User {
    type Error = DbError;

    #[track_caller]
    fn try_from(r: UserRow) -> DbErrorResult<Self> {
        Ok(User {
            id: Uuid::parse_str(&r.id).map_err(|e| DbError::InvalidRow {
                message: format!("Invalid UUID in users.id: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?,
            username: r.username,
            email: r.email,
            full_name: r.full_name,
            avatar_url: r.avatar_url,
            cover_image_url: r.cover_image_url,
            password_hash: r.password_hash,
            refresh_token: r.refresh_token,
            created_at: timestamp(r.created_at, "created_at")?,
            updated_at: timestamp(r.updated_at, "updated_at")?,
        })
    }
}

#[track_caller]
fn timestamp(secs: i64, column: &str) -> DbErrorResult<DateTime<Utc>> {
    DateTime::from_timestamp(secs, 0).ok_or_else(|| DbError::InvalidRow {
        message: format!("Invalid timestamp in users.{}", column),
        location: ErrorLocation::from(Location::caller()),
    })
}

#[derive(Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, user: &User) -> DbErrorResult<()> {
        sqlx::query(
            r#"
                INSERT INTO users (
                    id, username, email, full_name, avatar_url, cover_image_url,
                    password_hash, refresh_token, created_at, updated_at
                ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(user.id.to_string())
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.full_name)
        .bind(&user.avatar_url)
        .bind(&user.cover_image_url)
        .bind(&user.password_hash)
        .bind(&user.refresh_token)
        .bind(user.created_at.timestamp())
        .bind(user.updated_at.timestamp())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn find_by_id(&self, id: Uuid) -> DbErrorResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {} FROM users WHERE id = ?",
            USER_COLUMNS
        ))
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.map(User::try_from).transpose()
    }

    /// Match on username or email. `identifier` must already be lowercase.
    pub async fn find_by_username_or_email(&self, identifier: &str) -> DbErrorResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {} FROM users WHERE username = ? OR email = ? LIMIT 1",
            USER_COLUMNS
        ))
        .bind(identifier)
        .bind(identifier)
        .fetch_optional(&self.pool)
        .await?;

        row.map(User::try_from).transpose()
    }

    /// Apply `changes` in one statement and read the row back in the same
    /// transaction. A new password hash also clears the refresh token.
    pub async fn update(&self, id: Uuid, changes: &UserChanges) -> DbErrorResult<Option<User>> {
        let id_str = id.to_string();
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
                UPDATE users
                SET full_name = COALESCE(?, full_name),
                    email = COALESCE(?, email),
                    password_hash = COALESCE(?, password_hash),
                    refresh_token = CASE WHEN ? IS NOT NULL THEN NULL ELSE refresh_token END,
                    updated_at = ?
                WHERE id = ?
            "#,
        )
        .bind(&changes.full_name)
        .bind(&changes.email)
        .bind(&changes.password_hash)
        .bind(&changes.password_hash)
        .bind(Utc::now().timestamp())
        .bind(&id_str)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(None);
        }

        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {} FROM users WHERE id = ?",
            USER_COLUMNS
        ))
        .bind(&id_str)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        User::try_from(row).map(Some)
    }

    /// Overwrite or clear the stored refresh token
    pub async fn set_refresh_token(&self, id: Uuid, token: Option<&str>) -> DbErrorResult<bool> {
        let result = sqlx::query("UPDATE users SET refresh_token = ?, updated_at = ? WHERE id = ?")
            .bind(token)
            .bind(Utc::now().timestamp())
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() == 1)
    }

    /// Replace `current` with `next` only if `current` is still the stored value
    pub async fn rotate_refresh_token(
        &self,
        id: Uuid,
        current: &str,
        next: &str,
    ) -> DbErrorResult<bool> {
        let result = sqlx::query(
            r#"
                UPDATE users
                SET refresh_token = ?, updated_at = ?
                WHERE id = ? AND refresh_token = ?
            "#,
        )
        .bind(next)
        .bind(Utc::now().timestamp())
        .bind(id.to_string())
        .bind(current)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }
}

#[async_trait]
impl CredentialStore for UserRepository {
    async fn insert(&self, user: &User) -> StoreResult<()> {
        Ok(self.create(user).await?)
    }

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<User>> {
        Ok(UserRepository::find_by_id(self, id).await?)
    }

    async fn find_by_login(&self, identifier: &str) -> StoreResult<Option<User>> {
        Ok(self.find_by_username_or_email(identifier).await?)
    }

    async fn update(&self, id: Uuid, changes: &UserChanges) -> StoreResult<Option<User>> {
        Ok(UserRepository::update(self, id, changes).await?)
    }

    async fn set_refresh_token(&self, id: Uuid, token: Option<&str>) -> StoreResult<bool> {
        Ok(UserRepository::set_refresh_token(self, id, token).await?)
    }

    async fn rotate_refresh_token(
        &self,
        id: Uuid,
        current: &str,
        next: &str,
    ) -> StoreResult<bool> {
        Ok(UserRepository::rotate_refresh_token(self, id, current, next).await?)
    }
}
