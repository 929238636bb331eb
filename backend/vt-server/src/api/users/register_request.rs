use vt_core::NewUser;

use serde::Deserialize;

/// Missing fields deserialize as blank and fail validation with a field name.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RegisterRequest {
    pub full_name: String,
    pub email: String,
    pub username: String,
    pub password: String,
    /// Reference to already-uploaded media
    pub avatar_url: Option<String>,
    pub cover_image_url: Option<String>,
}

impl From<RegisterRequest> for NewUser {
    fn from(req: RegisterRequest) -> Self {
        NewUser {
            full_name: req.full_name,
            email: req.email,
            username: req.username,
            password: req.password,
            avatar_url: req.avatar_url,
            cover_image_url: req.cover_image_url,
        }
    }
}
