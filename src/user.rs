//! Gateway to the resource server's user endpoint
//!
//! Profile reads are forgiving: any transport, status, or parse failure
//! yields an empty profile instead of an error, so a flaky resource
//! server never breaks page rendering. The caller cannot distinguish
//! "no such user" from "resource server down".

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// A client the user has authorized
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientInfo {
    /// Client identifier
    #[serde(default)]
    pub id: String,
    /// Human-readable client name
    #[serde(default)]
    pub name: String,
}

/// Profile information cached from the resource server
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    /// Account identifier
    #[serde(default)]
    pub id: String,
    /// Login name
    #[serde(default)]
    pub login: String,
    /// Display name
    #[serde(default)]
    pub name: String,
    /// Clients the user has authorized, in server order
    #[serde(default)]
    pub authorized_clients: Vec<ClientInfo>,
}

/// Bearer-authenticated client for the user endpoint
#[derive(Clone)]
pub struct UserInfoClient {
    /// Shared HTTP client (carries the outbound timeout)
    http_client: Client,
    user_url: String,
}

impl UserInfoClient {
    /// Create a client for a resource server base URL.
    #[must_use]
    pub fn new(http_client: Client, resource_server_url: &str) -> Self {
        Self {
            http_client,
            user_url: format!("{resource_server_url}/api/user"),
        }
    }

    /// Fetch the user's profile.
    ///
    /// Degrades to [`UserInfo::default`] on any failure.
    pub async fn fetch_user_info(&self, access_token: &str) -> UserInfo {
        match self.fetch(access_token).await {
            Ok(user_info) => {
                debug!(login = %user_info.login, "Fetched user info");
                user_info
            }
            Err(e) => {
                warn!(error = %e, "User info fetch failed, using empty profile");
                UserInfo::default()
            }
        }
    }

    async fn fetch(&self, access_token: &str) -> reqwest::Result<UserInfo> {
        self.http_client
            .get(&self.user_url)
            .bearer_auth(access_token)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
    }

    /// Set the user's display name.
    ///
    /// Returns whether the resource server accepted the update; never
    /// errors.
    pub async fn update_name(&self, access_token: &str, name: &str) -> bool {
        let response = self
            .http_client
            .post(&self.user_url)
            .bearer_auth(access_token)
            .json(&serde_json::json!({ "given_name": name }))
            .send()
            .await;

        match response {
            Ok(r) if r.status().is_success() => true,
            Ok(r) => {
                debug!(status = %r.status(), "Name update rejected");
                false
            }
            Err(e) => {
                warn!(error = %e, "Name update request failed");
                false
            }
        }
    }
}
