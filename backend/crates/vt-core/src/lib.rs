pub mod error;
pub mod models;
pub mod store;

pub use error::{CoreError, Result};
pub use models::new_user::NewUser;
pub use models::public_user::PublicUser;
pub use models::user::{User, normalize_identifier};
pub use models::user_changes::UserChanges;
pub use store::credential_store::CredentialStore;
pub use store::store_error::{StoreError, StoreResult};

#[cfg(test)]
mod tests;
