use serde::Deserialize;

#[derive(Default, Deserialize)]
#[serde(default)]
pub struct ChangePasswordRequest {
    pub old_password: String,
    pub new_password: String,
}
