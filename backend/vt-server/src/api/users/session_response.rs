use vt_core::PublicUser;

use serde::Serialize;

/// Login / refresh response.
///
/// Token fields are present only for body delivery; with cookie delivery the
/// tokens travel exclusively in `Set-Cookie`.
#[derive(Serialize)]
pub struct SessionResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<PublicUser>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
}
