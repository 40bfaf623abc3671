//! duet-gm (Games module) - Couple games microservice
//!
//! Hosts the compatibility quizzes, truth-or-dare and memory-match over HTTP.
//! All game state is kept in memory for the lifetime of the process.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use duet_common::config::{ConfigResolver, ConfigSource};
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, reload, util::SubscriberInitExt, EnvFilter};

use duet_gm::{build_router, AppState};

/// Command-line arguments for duet-gm
#[derive(Parser, Debug)]
#[command(name = "duet-gm")]
#[command(about = "Games microservice for Duet")]
#[command(version)]
struct Args {
    /// Path to TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Address to listen on (overrides config)
    #[arg(long, env = "DUET_GM_HOST")]
    host: Option<String>,

    /// Port to listen on (overrides config)
    #[arg(short, long, env = "DUET_GM_PORT")]
    port: Option<u16>,

    /// Log level (overrides config; RUST_LOG takes precedence)
    #[arg(long, env = "DUET_LOG_LEVEL")]
    log_level: Option<String>,
}

/// Filter directives for our crates at `level`
fn log_filter(level: &str) -> EnvFilter {
    EnvFilter::new(format!(
        "duet_gm={level},duet_common={level},tower_http={level}",
        level = level
    ))
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize tracing. RUST_LOG wins outright; otherwise start from
    // --log-level (or info) and switch to the configured level once the
    // config file is loaded.
    let env_filter = EnvFilter::try_from_default_env().ok();
    let follow_config = env_filter.is_none();
    let initial = env_filter
        .unwrap_or_else(|| log_filter(args.log_level.as_deref().unwrap_or("info")));
    let (filter, filter_handle) = reload::Layer::new(initial);
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting Duet Games (duet-gm) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let (mut config, source) = ConfigResolver::new(args.config.clone())
        .load()
        .context("Failed to load configuration")?;
    if let Some(host) = args.host {
        config.host = host;
    }
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(level) = args.log_level {
        config.logging.level = level;
    }
    config.validate().context("Invalid configuration")?;

    match &source {
        ConfigSource::Missing(path) => warn!(
            "Requested config file {} does not exist, running on built-in defaults",
            path.display()
        ),
        other => info!("Config source: {:?}", other),
    }

    if follow_config {
        filter_handle
            .reload(log_filter(&config.logging.level))
            .context("Failed to apply configured log level")?;
    }

    info!(
        "Session limit: {} (idle after {}s), text answer limit: {} chars, memory pairs: {}",
        config.games.max_sessions,
        config.games.session_idle_secs,
        config.games.text_answer_max_len,
        config.games.memory_pairs
    );

    let app = build_router(AppState::new(config.games.clone()));

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .with_context(|| format!("Invalid listen address {}:{}", config.host, config.port))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;
    info!("duet-gm listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install terminate handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
