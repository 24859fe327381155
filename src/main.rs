//! Payroll Engine server.
//!
//! Reads its configuration from `PAYROLL_CONFIG` (default
//! `./config/payroll.yaml`); `PAYROLL_BIND` overrides the bind address.

use std::env;
use std::error::Error;

use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use payroll_engine::api::{AppState, create_router};
use payroll_engine::config::{ConfigLoader, LoggingConfig};

const DEFAULT_CONFIG_PATH: &str = "./config/payroll.yaml";

fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&logging.filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    if logging.json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config_path = env::var("PAYROLL_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let mut config = ConfigLoader::load_or_default(&config_path)?.into_config();
    if let Ok(bind) = env::var("PAYROLL_BIND") {
        config.server.bind_address = bind;
    }

    init_tracing(&config.logging);

    let bind_address = config.server.bind_address.clone();
    info!(
        config_path = %config_path,
        bind_address = %bind_address,
        public_base_url = %config.server.public_base_url,
        "Starting payroll engine"
    );

    let router = create_router(AppState::new(config));
    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    info!(bind_address = %bind_address, "Listening");

    axum::serve(listener, router).await?;
    Ok(())
}
