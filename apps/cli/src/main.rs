//! Edgeguard command-line client for zone rate-limiting rules.

#![forbid(unsafe_code)]

mod cli_config;
mod commands;

use std::sync::Arc;

use clap::Parser;
use edgeguard_application::RateLimitService;
use edgeguard_core::AppError;
use edgeguard_infrastructure::ReqwestApiTransport;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use cli_config::CliConfig;
use commands::Cli;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    let config = CliConfig::load()?;
    let transport = ReqwestApiTransport::from_config(&config.transport_config())?;
    let service = RateLimitService::new(Arc::new(transport));

    info!(
        api_base_url = %config.api_base_url,
        credentials = config.credentials.kind(),
        http_timeout_seconds = config.http_timeout_seconds,
        "edgeguard started"
    );

    match commands::run(&service, cli.command).await {
        Ok(output) => {
            let rendered = serde_json::to_string_pretty(&output).map_err(|error| {
                AppError::Internal(format!("failed to render output: {error}"))
            })?;
            println!("{rendered}");
            Ok(())
        }
        Err(error) => {
            for detail in error.api_errors() {
                warn!(code = detail.code, message = %detail.message, "provider reported error");
            }
            warn!(error = %error, "command failed");
            Err(error)
        }
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}
