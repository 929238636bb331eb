use vt_core::PublicUser;

use serde::Serialize;

/// Single user response
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub user: PublicUser,
}
