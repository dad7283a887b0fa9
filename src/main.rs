//! sse-chat-gateway - streaming chat gateway
//!
//! Loads configuration, sets up logging and serves until shut down.

#![allow(missing_docs)]

use clap::Parser;
use sse_chat_gateway::utils::logging::{LogFormat, init_tracing};
use sse_chat_gateway::{Config, server};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;

/// Command-line options; each falls back to its environment variable
#[derive(Debug, Parser)]
#[command(name = "gateway", version, about)]
struct Cli {
    /// Path to the YAML configuration file; missing files fall back to defaults
    #[arg(short, long, env = "GATEWAY_CONFIG", default_value = "config/gateway.yaml")]
    config: PathBuf,

    /// Override the listen host
    #[arg(long)]
    host: Option<String>,

    /// Override the listen port
    #[arg(short, long)]
    port: Option<u16>,

    /// Log line format: text or json
    #[arg(long, env = "LOG_FORMAT", default_value = "text")]
    log_format: LogFormat,
}

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_tracing(cli.log_format, "info");

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            // Print error using Display (not Debug) to preserve newlines
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> sse_chat_gateway::Result<()> {
    let mut config = Config::load(&cli.config).await?;
    if let Some(host) = cli.host {
        config.gateway.server.host = host;
    }
    if let Some(port) = cli.port {
        config.gateway.server.port = port;
    }
    config.validate()?;

    server::run_server(config).await
}
