pub mod claims;
pub mod error;
pub mod hashing_cost;
pub mod secret_hasher;
pub mod session_manager;
pub mod session_tokens;
pub mod token_config;
pub mod token_issuer;
pub mod token_kind;

pub use claims::{AccessClaims, RefreshClaims};
pub use error::{AuthError, Result};
pub use hashing_cost::HashingCost;
pub use secret_hasher::SecretHasher;
pub use session_manager::{AccountUpdate, SessionManager};
pub use session_tokens::{LoginOutcome, SessionTokens};
pub use token_config::TokenConfig;
pub use token_issuer::TokenIssuer;
pub use token_kind::TokenKind;

#[cfg(test)]
mod tests;
