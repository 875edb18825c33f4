//! Error types for the OAuth frontend

use std::io;

use thiserror::Error;

/// Result type alias for the OAuth frontend
pub type Result<T> = std::result::Result<T, Error>;

/// OAuth frontend errors
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Client registration rejected by the authorization server.
    /// Carries the response body text for diagnostics.
    #[error("Client registration failed: {0}")]
    Registration(String),

    /// Authorization code could not be exchanged for an access token.
    /// A failed exchange is never retried; authorization codes are
    /// single-use.
    #[error("Token exchange failed: {0}")]
    TokenExchange(String),

    /// Returned authorization state does not match any issued one.
    /// Treated as a possible CSRF indicator; aborts the login.
    #[error("Authorization state mismatch")]
    StateMismatch,

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}
