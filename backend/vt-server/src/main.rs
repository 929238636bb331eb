use vt_auth::{HashingCost, SecretHasher, SessionManager, TokenConfig, TokenIssuer};
use vt_config::Config;
use vt_db::UserRepository;
use vt_server::{AppState, build_router, logger};

use std::error::Error;
use std::sync::Arc;

use log::{error, info, warn};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Optional .env alongside the binary; real environment wins
    dotenvy::dotenv().ok();

    // Load and validate configuration
    let config = Config::load()?;
    config.validate()?;

    let log_file_path = match config.logging.file {
        Some(ref filename) => {
            let log_dir = config.log_dir()?;
            std::fs::create_dir_all(&log_dir)?;
            Some(log_dir.join(filename))
        }
        None => None,
    };

    // Initialize logger (before any other logging)
    logger::initialize(config.logging.level, log_file_path, config.logging.colored)?;

    info!("Starting vt-server v{}", env!("CARGO_PKG_VERSION"));
    config.log_summary();

    // Credential store
    let database_path = config.database_path()?;
    let pool = vt_db::connect(&database_path, config.database.max_connections).await?;
    info!("Migrations complete");

    // Token issuer and hasher
    let token_config = TokenConfig {
        access_secret: config.auth.access_secret()?.to_vec(),
        access_ttl: config.auth.access_ttl()?,
        refresh_secret: config.auth.refresh_secret()?.to_vec(),
        refresh_ttl: config.auth.refresh_ttl()?,
    };
    let issuer = TokenIssuer::new(&token_config);
    let hasher = SecretHasher::new(HashingCost {
        memory_kib: config.hashing.memory_kib,
        iterations: config.hashing.iterations,
        parallelism: config.hashing.parallelism,
    })?;

    let store = Arc::new(UserRepository::new(pool.clone()));
    let sessions = Arc::new(SessionManager::new(store, issuer, hasher));

    if !config.auth.secure_cookies {
        warn!("Session cookies are NOT marked Secure - development only");
    }

    let app_state = AppState {
        sessions,
        pool,
        secure_cookies: config.auth.secure_cookies,
        request_timeout: config.server.request_timeout(),
    };

    let app = build_router(app_state);

    let bind_addr = config.bind_addr();
    let listener = TcpListener::bind(&bind_addr).await?;

    // Actual address matters when port is 0 (auto-assigned)
    let actual_addr = listener.local_addr()?;
    info!("Server listening on {}", actual_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Graceful shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Received SIGINT (Ctrl+C), initiating graceful shutdown"),
        Err(e) => {
            error!("Failed to listen for SIGINT: {}", e);
            // Keep serving; the process can still be killed
            std::future::pending::<()>().await
        }
    }
}
