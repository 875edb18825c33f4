//! Configuration management

use std::path::Path;
use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Yaml},
};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Main configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Config {
    /// Server configuration
    pub server: ServerConfig,
    /// OAuth endpoints and client registration settings
    pub oauth: OauthConfig,
    /// Session lifecycle settings
    pub session: SessionConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5173,
        }
    }
}

/// OAuth configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OauthConfig {
    /// Base URL of the authorization server
    pub auth_server_url: String,
    /// Base URL of the resource server (user info endpoint)
    pub resource_server_url: String,
    /// Redirect URI registered with the client and sent with every
    /// authorization and token request
    pub redirect_uri: String,
    /// Scope requested at authorization
    pub scope: String,
    /// Client name sent at registration
    pub client_name: String,
    /// Client type sent at registration
    pub client_type: String,
    /// Timeout for outbound HTTP calls, in seconds
    pub request_timeout_secs: u64,
}

impl Default for OauthConfig {
    fn default() -> Self {
        Self {
            auth_server_url: "http://localhost:3000".to_string(),
            resource_server_url: "http://localhost:3000".to_string(),
            redirect_uri: "http://localhost:5173/authorize".to_string(),
            scope: "account:read".to_string(),
            client_name: "oauth-frontend".to_string(),
            client_type: "confidential".to_string(),
            request_timeout_secs: 10,
        }
    }
}

impl OauthConfig {
    /// Outbound HTTP call timeout
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Session configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Session lifetime in seconds; also the cookie max-age
    pub max_age_secs: u64,
    /// Mark the session cookie `Secure` (enable in production)
    pub secure_cookies: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            // 30 days
            max_age_secs: 60 * 60 * 24 * 30,
            secure_cookies: false,
        }
    }
}

impl SessionConfig {
    /// Session lifetime
    #[must_use]
    pub fn max_age(&self) -> Duration {
        Duration::from_secs(self.max_age_secs)
    }
}

impl Config {
    /// Load configuration from file and environment
    ///
    /// # Errors
    ///
    /// Returns an error if the config file does not exist or cannot be parsed.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::new();

        // Load from file if provided
        if let Some(p) = path {
            if !p.exists() {
                return Err(Error::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            figment = figment.merge(Yaml::file(p));
        }

        // Merge environment variables (OAUTH_FRONTEND_ prefix)
        figment = figment.merge(Env::prefixed("OAUTH_FRONTEND_").split("__"));

        figment.extract().map_err(|e| Error::Config(e.to_string()))
    }
}
