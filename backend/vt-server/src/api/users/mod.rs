pub mod change_password_request;
pub mod empty_response;
pub mod login_request;
pub mod refresh_request;
pub mod register_request;
pub mod session_response;
pub mod update_account_request;
pub mod user_response;
#[allow(clippy::module_inception)]
pub mod users;
