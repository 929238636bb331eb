use serde::Deserialize;

/// Body form of the refresh call. The `refreshToken` cookie wins when both are sent.
#[derive(Default, Deserialize)]
#[serde(default)]
pub struct RefreshRequest {
    #[serde(alias = "refreshToken")]
    pub refresh_token: Option<String>,
}
