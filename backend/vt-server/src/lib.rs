pub mod api;
pub mod app_state;
pub mod error;
pub mod health;
pub mod logger;
pub mod routes;


pub use api::{
    cookies::{ACCESS_TOKEN_COOKIE, REFRESH_TOKEN_COOKIE},
    error::ApiError,
    error::Result as ApiResult,
    extractors::{auth_user::AuthUser, json_body::JsonBody, token_delivery::TokenDelivery},
    users::{
        change_password_request::ChangePasswordRequest,
        empty_response::EmptyResponse,
        login_request::LoginRequest,
        refresh_request::RefreshRequest,
        register_request::RegisterRequest,
        session_response::SessionResponse,
        update_account_request::UpdateAccountRequest,
        user_response::UserResponse,
        users::{change_password, current_user, login, logout, refresh_token, register, update_account},
    },
};
pub use app_state::AppState;

pub use crate::routes::build_router;
