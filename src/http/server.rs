//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router with all handlers
//! - Wire up middleware (tracing, timeout, body limit, correlation id)
//! - Bind the server to a listener and run it to completion
//!
//! # Design Decisions
//! - State is one Arc'd service holding the immutable config snapshot;
//!   handlers share it without locking
//! - Graceful shutdown on ctrl-c

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::RateLimiterConfig;
use crate::http::correlation::propagate_correlation_id;
use crate::http::handlers;
use crate::service::RateLimiterService;

/// Request bodies are small JSON documents; anything bigger is noise.
const MAX_BODY_BYTES: usize = 16 * 1024;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<RateLimiterService>,
}

/// HTTP server for the rate limiter.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: RateLimiterConfig) -> Self {
        let request_timeout = Duration::from_secs(config.timeouts.request_secs);
        let service = Arc::new(RateLimiterService::new(Arc::new(config)));
        let state = AppState { service };

        let router = Router::new()
            .route("/rate_limit/check", post(handlers::check_rate_limit))
            .route(
                "/rate_limit/config",
                get(handlers::get_config).post(handlers::update_config),
            )
            .route("/rate_limit/health", get(handlers::health))
            .with_state(state)
            .layer(middleware::from_fn(propagate_correlation_id))
            .layer(TraceLayer::new_for_http())
            .layer(TimeoutLayer::with_status_code(
                StatusCode::REQUEST_TIMEOUT,
                request_timeout,
            ))
            .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES));

        Self { router }
    }

    /// Serve requests on the given listener until shutdown.
    pub async fn run(self, listener: TcpListener) -> std::io::Result<()> {
        axum::serve(
            listener,
            self.router
                .into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(shutdown_signal())
        .await
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install shutdown handler");
    }
    tracing::info!("Shutdown signal received");
}
