//! Websim Challenge API Server
//!
//! Run with: cargo run --bin websim-challenge
//!
//! # Configuration
//!
//! - `WEBSIM_CONFIG`: Path to a TOML config file (default: search standard locations)
//! - `WEBSIM_API_HOST`, `WEBSIM_API_PORT`: Bind address
//! - `WEBSIM_SESSION_IDLE_SECS`, `WEBSIM_MAX_SESSIONS`: Session lifecycle
//! - `WEBSIM_LOG_LEVEL`, `WEBSIM_LOG_FORMAT`: Logging (pretty or json)
//! - `RUST_LOG`: Overrides the log filter entirely

use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use websim_challenge::api::{serve, AppState};
use websim_challenge::config::{Config, LoadedConfig, LoggingConfig};
use websim_challenge::sessions::SessionRegistry;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let loaded = load_config()?;
    let config = loaded.config;

    init_tracing(&config.logging);

    tracing::info!("Starting Websim Challenge server v{}", env!("CARGO_PKG_VERSION"));
    for error in &loaded.skipped {
        tracing::warn!("Skipping config file: {}", error);
    }
    match &loaded.source {
        Some(path) => tracing::info!("Loaded config from {:?}", path),
        None => tracing::info!("Using default config with environment overrides"),
    }
    tracing::info!(
        max_sessions = config.sessions.max_sessions,
        idle_timeout_secs = config.sessions.idle_timeout_secs,
        "Session settings"
    );

    let registry = Arc::new(SessionRegistry::new(config.sessions.clone()));
    let sweeper = registry.start_sweeper();

    let state = AppState::new(Arc::clone(&registry), config.api.clone());
    serve(state, &config.api).await?;

    sweeper.abort();
    tracing::info!(
        discarded_sessions = registry.session_count().await,
        "Websim Challenge server stopped"
    );

    Ok(())
}

/// Load configuration from `WEBSIM_CONFIG` or the default locations
///
/// Runs before tracing is initialized, so problems are returned rather than
/// logged.
fn load_config() -> Result<LoadedConfig, Box<dyn std::error::Error>> {
    match std::env::var("WEBSIM_CONFIG") {
        Ok(path) => {
            let path = PathBuf::from(path);
            Ok(LoadedConfig {
                config: Config::load_with_env(&path)?,
                source: Some(path),
                skipped: Vec::new(),
            })
        }
        Err(_) => Ok(Config::load_default()),
    }
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "websim_challenge={},tower_http=info",
            logging.level
        ))
    });

    let registry = tracing_subscriber::registry().with(filter);

    if logging.is_json() {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}
