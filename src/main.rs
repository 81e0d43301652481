//! Rate limiter HTTP service.
//!
//! Answers "is this request allowed?" for a caller-supplied identifier
//! (user id, client IP, API key, endpoint path, or a global bucket).
//!
//! # Architecture Overview
//!
//! ```text
//!   Client ──▶ http (router, correlation id, timeout)
//!                  │
//!                  ▼
//!              service (field validation, quota echo)
//!                  │
//!                  ▼
//!              limiter (decision seam; pass-through engine)
//!
//!   Cross-cutting: config (TOML snapshot), security (identifier + client
//!   IP validation), observability (tracing + metrics)
//! ```
//!
//! The decision engine is deliberately a pass-through: every valid request
//! is allowed and the quota metadata echoes the configured limits. The
//! `Limiter` trait is the seam where a real engine plugs in.

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rate_limiter::config::{load_config, RateLimiterConfig};
use rate_limiter::http::HttpServer;

#[derive(Parser)]
#[command(name = "rate-limiter", version, about = "Rate limit decision service")]
struct Cli {
    /// Path to a TOML configuration file; defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rate_limiter=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("rate-limiter v{} starting", env!("CARGO_PKG_VERSION"));

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => RateLimiterConfig::default(),
    };

    tracing::info!(
        bind_address = %config.listener.bind_address,
        requests_per_minute = config.default_limits.requests_per_minute,
        burst_size = config.default_limits.burst_size,
        algorithm = ?config.algorithms.default_algorithm,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => rate_limiter::observability::metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;

    tracing::info!(address = %local_addr, "Listening for connections");

    let server = HttpServer::new(config);
    server.run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
