//! Main application entry point (server binary).
//!
//! This is a thin wrapper around the `mini_proxy` library that handles:
//! - Command-line and environment configuration (.env file included)
//! - Logger initialization
//! - Startup validation of the client configuration
//! - Serving the fetch endpoint until shutdown
//!
//! All core functionality is implemented in the library crate.

use std::net::SocketAddr;
use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info};

use mini_proxy::initialization::init_logger_with;
use mini_proxy::{start_server, AppState, FetchClient, Opt, ValidatedClientConfig};

#[tokio::main]
async fn main() -> Result<()> {
    // Missing .env is fine; flags and the real environment still apply
    let _ = dotenvy::dotenv();

    let opt = Opt::parse();

    init_logger_with(opt.log_level.clone().into(), opt.log_format.clone())
        .context("Failed to initialize logger")?;

    let config = match ValidatedClientConfig::new(opt.client) {
        Ok(config) => config,
        Err(e) => {
            for violation in &e.violations {
                error!("Invalid client configuration: {}", violation);
            }
            eprintln!("mini_proxy error: {}", e);
            process::exit(1);
        }
    };

    let client = FetchClient::new(&config).context("Failed to initialize HTTP client")?;
    info!(
        "HTTP client ready (timeout: {}s, max response size: {}, proxy: {})",
        client.timeout().as_secs(),
        client
            .size_limit()
            .max_bytes()
            .map_or_else(|| "unlimited".to_string(), |max| format!("{} bytes", max)),
        config.proxy_url().map_or("none", |_| "configured")
    );

    let address = SocketAddr::new(opt.bind_address, opt.http_port);
    if let Err(e) = start_server(address, AppState::new(client)).await {
        eprintln!("mini_proxy error: {:#}", e);
        process::exit(1);
    }

    Ok(())
}
