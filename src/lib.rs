//! OAuth Frontend Library
//!
//! Demo web frontend that signs a user in via the OAuth2 Authorization
//! Code flow with PKCE (RFC 7636) against a separate authorization
//! server, then shows and edits the user's profile.
//!
//! # Components
//!
//! - **PKCE handshake**: verifier/challenge generation, dynamic client
//!   registration, authorization URL construction, code-for-token exchange
//! - **Session store**: in-process map of opaque session ids to
//!   `{access_token, user_info, expiry}` with lazy expiry on read
//! - **User info gateway**: bearer-authenticated profile reads/updates
//!   against the resource server
//! - **Web surface**: axum routes, session cookie plumbing, minimal pages

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cli;
pub mod config;
pub mod error;
pub mod oauth;
pub mod session;
pub mod user;
pub mod web;

pub use error::{Error, Result};

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Setup tracing/logging
pub fn setup_tracing(level: &str, format: Option<&str>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = tracing_subscriber::registry().with(filter);

    match format {
        Some("json") => {
            subscriber.with(fmt::layer().json()).init();
        }
        _ => {
            subscriber.with(fmt::layer()).init();
        }
    }

    Ok(())
}
