//! Sideline - web analytics ingestion and reporting service
//!
//! # Usage
//!
//! ```bash
//! # Run with defaults (data/sideline.db, port 5001)
//! sideline
//!
//! # Run against a config file
//! sideline --config configs/config.toml
//! sideline --log-level debug
//! ```

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use sideline_api::{AppState, build_router_with_cors};
use sideline_config::Config;
use sideline_social::{FeedCache, RedditClient, SocialFeed, run_refresh_loop};
use sideline_store::Storage;

/// Sideline - web analytics ingestion and reporting service
#[derive(Parser, Debug)]
#[command(name = "sideline")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "configs/config.toml")]
    config: std::path::PathBuf,

    /// Log level (trace, debug, info, warn, error); overrides the config
    #[arg(short, long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = if cli.config.exists() {
        Config::from_file(&cli.config)?
    } else {
        Config::default()
    };

    let level = cli.log_level.as_deref().unwrap_or(&config.log.level);
    init_logging(level)?;

    if !cli.config.exists() {
        info!(path = %cli.config.display(), "No config file found, using defaults");
    }

    let storage = Arc::new(Storage::open(&config.database.path).await?);
    let mut state = AppState::new(storage);

    if config.social.enabled {
        let client = Arc::new(RedditClient::new(&config.social)?);
        let cache = Arc::new(FeedCache::new(Duration::from_secs(
            config.social.cache_ttl_secs,
        )));

        let feed: Arc<dyn SocialFeed> = Arc::clone(&client) as Arc<dyn SocialFeed>;
        state = state.with_social(Arc::clone(&feed), Arc::clone(&cache));

        info!(
            interval_secs = config.social.refresh_interval_secs,
            "Starting social mirror"
        );
        tokio::spawn(run_refresh_loop(
            feed,
            cache,
            Duration::from_secs(config.social.refresh_interval_secs),
        ));
    }

    let app = build_router_with_cors(state, &config.server.cors_origins);

    let addr = config.bind_addr();
    info!(%addr, "Sideline analytics API listening");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Initialize the tracing subscriber for logging
fn init_logging(level: &str) -> Result<()> {
    let filter = EnvFilter::try_new(level)
        .or_else(|_| EnvFilter::try_new("info"))
        .map_err(|e| anyhow::anyhow!("invalid log level: {}", e))?;

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_thread_ids(false))
        .with(filter)
        .init();

    Ok(())
}
