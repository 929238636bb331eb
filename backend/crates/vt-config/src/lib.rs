mod auth_config;
mod config;
mod database_config;
mod error;
mod hashing_config;
mod log_level;
mod logging_config;
mod server_config;

pub use auth_config::AuthConfig;
pub use config::Config;
pub use database_config::DatabaseConfig;
pub use error::{ConfigError, ConfigErrorResult};
pub use hashing_config::HashingConfig;
pub use log_level::LogLevel;
pub use logging_config::LoggingConfig;
pub use server_config::ServerConfig;

#[cfg(test)]
mod tests;

const CONFIG_DIR_ENV: &str = "VT_CONFIG_DIR";
const DEFAULT_CONFIG_DIR: &str = ".vt";
const CONFIG_FILENAME: &str = "config.toml";

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8000;
const MIN_PORT: u16 = 1024;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
const MIN_REQUEST_TIMEOUT_SECS: u64 = 1;
const MAX_REQUEST_TIMEOUT_SECS: u64 = 300;

const DEFAULT_DATABASE_FILENAME: &str = "data.db";
const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 10;

const DEFAULT_ACCESS_TOKEN_TTL: &str = "15m";
const DEFAULT_REFRESH_TOKEN_TTL: &str = "10d";
const DEFAULT_SECURE_COOKIES: bool = true;
const MIN_SECRET_LENGTH: usize = 32;

// argon2id, OWASP baseline
const DEFAULT_HASH_MEMORY_KIB: u32 = 19 * 1024;
const DEFAULT_HASH_ITERATIONS: u32 = 2;
const DEFAULT_HASH_PARALLELISM: u32 = 1;
const MAX_HASH_MEMORY_KIB: u32 = 1024 * 1024;
const MAX_HASH_ITERATIONS: u32 = 64;
const MAX_HASH_PARALLELISM: u32 = 16;

const DEFAULT_LOG_LEVEL_STRING: &str = "info";
const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;
const DEFAULT_LOG_DIRECTORY: &str = "log";
