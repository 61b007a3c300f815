// SPDX-License-Identifier: MIT

//! Reddit adapter service.
//!
//! Lets the core platform read a user's Reddit feed without holding
//! Reddit credentials itself: OAuth code exchange, listing fetch with
//! one-shot token refresh, and normalization into generic posts.

use reddit_client::{config::Config, routes::create_router, AppState};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    // Missing required configuration halts here, before serving traffic.
    let config = Config::from_env().expect("Failed to load configuration");
    tracing::info!(port = config.port, "Starting reddit-client");

    let http = reqwest::Client::new();
    let state = Arc::new(AppState::new(config.clone(), http));

    let app = create_router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("reddit_client=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
