//! Dispatch HTTP Server Binary
//!
//! Entry point for the dispatch REST API server. Loads configuration from the
//! environment, builds the dispatch engine, and starts serving requests.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin dispatch-server
//!
//! # With a custom pricing table
//! DISPATCH_PRICING_TABLE=./pricing.toml cargo run --bin dispatch-server
//! ```
//!
//! # Environment Variables
//!
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8080)
//! - `DISPATCH_DRIVER_PREFIX`: Driver id namespace stripped in schedule numbers (default: `driver-`)
//! - `DISPATCH_PRICING_TABLE`: Path to a TOML pricing table (default: built-in table)
//! - `RUST_LOG`: Log filter (default: info)

use std::net::SocketAddr;
use std::sync::Arc;

use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use firewood_dispatch::config::AppConfig;
use firewood_dispatch::http::{create_router, AppState};
use firewood_dispatch::models::SystemClock;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("Starting dispatch HTTP server");

    let config = AppConfig::from_env()?;
    let engine = config.build_engine(Arc::new(SystemClock))?;
    info!(
        rules = engine.pricing().rules.len(),
        driver_prefix = %config.driver_prefix,
        custom_table = config.pricing_table_path.is_some(),
        "Dispatch engine initialized"
    );

    let addr: SocketAddr = config.bind_address().parse()?;
    let app = create_router(AppState::new(engine, config));

    info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
