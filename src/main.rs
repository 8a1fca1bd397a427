//! HTTP server for the timesheet engine.
//!
//! Reads its configuration directory from `TIMESHEET_CONFIG_DIR` (default
//! `./config/default`) and listens on `TIMESHEET_BIND_ADDR` (default
//! `127.0.0.1:3000`). Log filtering follows `RUST_LOG`.

use std::env;

use tracing::info;
use tracing_subscriber::{
    EnvFilter, filter::LevelFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt,
};

use timesheet_engine::api::{AppState, create_router};
use timesheet_engine::config::ConfigLoader;

const DEFAULT_CONFIG_DIR: &str = "./config/default";
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing()?;

    let config_dir =
        env::var("TIMESHEET_CONFIG_DIR").unwrap_or_else(|_| DEFAULT_CONFIG_DIR.to_string());
    let bind_addr =
        env::var("TIMESHEET_BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());

    let config = ConfigLoader::load(&config_dir)?;
    info!(
        config_dir = %config_dir,
        custom_holidays = config.config().custom_holidays().len(),
        "Configuration loaded"
    );

    let router = create_router(AppState::new(config));
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!(addr = %listener.local_addr()?, "Timesheet engine listening");

    axum::serve(listener, router).await?;
    Ok(())
}

fn init_tracing() -> Result<(), Box<dyn std::error::Error>> {
    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true))
        .try_init()?;
    Ok(())
}
