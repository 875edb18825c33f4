//! Command-line interface

use std::path::PathBuf;

use clap::Parser;

/// Demo OAuth2 login frontend - authorization code flow with PKCE
#[derive(Parser, Debug)]
#[command(name = "oauth-frontend")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file (YAML)
    #[arg(short, long, env = "OAUTH_FRONTEND_CONFIG")]
    pub config: Option<PathBuf>,

    /// Port to listen on
    #[arg(short, long, env = "OAUTH_FRONTEND_PORT")]
    pub port: Option<u16>,

    /// Host to bind to
    #[arg(long, env = "OAUTH_FRONTEND_HOST")]
    pub host: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", env = "OAUTH_FRONTEND_LOG_LEVEL")]
    pub log_level: String,

    /// Log format (text, json)
    #[arg(long, env = "OAUTH_FRONTEND_LOG_FORMAT")]
    pub log_format: Option<String>,
}
