//! OAuth Frontend - demo OAuth2 login with PKCE and in-memory sessions

use std::process::ExitCode;

use clap::Parser;
use tracing::error;

use oauth_frontend::{cli::Cli, config::Config, setup_tracing, web};

#[tokio::main]
async fn main() -> ExitCode {
    // Pick up a local .env before anything reads the environment
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Setup tracing
    if let Err(e) = setup_tracing(&cli.log_level, cli.log_format.as_deref()) {
        eprintln!("Failed to setup tracing: {e}");
        return ExitCode::FAILURE;
    }

    let mut config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {e}");
            return ExitCode::FAILURE;
        }
    };

    // CLI flags override file and environment configuration
    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    if let Err(e) = web::serve(config).await {
        error!("Server error: {e}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
