//! Browser-facing HTTP surface
//!
//! Routing, session cookie plumbing, and the minimal HTML pages. The
//! handlers are thin glue; the handshake, session, and profile work
//! happens in the `oauth`, `session`, and `user` modules.

mod handlers;
mod pages;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    routing::{get, post},
};
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::Config;
use crate::oauth::{OAuthClient, PendingLogins};
use crate::session::SessionStore;
use crate::user::UserInfoClient;
use crate::{Error, Result};

/// Name of the session cookie
pub const SESSION_COOKIE: &str = "session";

/// Shared application state
pub struct AppState {
    /// Gateway to the authorization server
    pub oauth: OAuthClient,
    /// Gateway to the resource server
    pub user_info: UserInfoClient,
    /// Active sessions
    pub sessions: SessionStore,
    /// Login attempts awaiting their callback
    pub pending_logins: PendingLogins,
    /// Session lifetime; also the cookie max-age
    pub session_max_age: Duration,
    /// Whether to mark the session cookie `Secure`
    pub secure_cookies: bool,
}

impl AppState {
    /// Build application state from configuration.
    ///
    /// One `reqwest::Client` is shared by both gateways; it carries the
    /// configured outbound timeout so no handler suspends unboundedly on
    /// a remote call.
    pub fn from_config(config: &Config) -> Result<Arc<Self>> {
        let http_client = reqwest::Client::builder()
            .timeout(config.oauth.request_timeout())
            .build()?;

        let user_info = UserInfoClient::new(http_client.clone(), &config.oauth.resource_server_url);

        Ok(Arc::new(Self {
            oauth: OAuthClient::new(http_client, &config.oauth),
            sessions: SessionStore::new(user_info.clone()),
            user_info,
            pending_logins: PendingLogins::new(),
            session_max_age: config.session.max_age(),
            secure_cookies: config.session.secure_cookies,
        }))
    }
}

/// Create the router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/login", post(handlers::login))
        .route("/authorize", get(handlers::authorize))
        .route("/profile", get(handlers::profile).post(handlers::rename))
        .route("/logout", post(handlers::logout))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Run the frontend server until shutdown.
///
/// # Errors
///
/// Returns an error if the listen address is invalid, the port cannot
/// be bound, or the server fails while running.
pub async fn serve(config: Config) -> Result<()> {
    let state = AppState::from_config(&config)?;

    let addr = SocketAddr::new(
        config
            .server
            .host
            .parse()
            .map_err(|e| Error::Config(format!("Invalid host: {e}")))?,
        config.server.port,
    );

    let listener = TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "OAuth frontend listening");

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| Error::Internal(e.to_string()))?;

    Ok(())
}

/// Shutdown signal handler
async fn shutdown_signal() {
    if signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received");
    }
}
