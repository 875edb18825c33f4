//! Gateway to the authorization server
//!
//! Client registration, authorization URL construction, and the
//! authorization-code-for-token exchange.

use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info};
use url::Url;

use crate::config::OauthConfig;
use crate::{Error, Result};

/// Credentials issued by the authorization server at registration
#[derive(Debug, Clone, Deserialize)]
pub struct ClientCredential {
    /// Public client identifier
    pub client_id: String,
    /// Client secret, used for Basic auth at token exchange
    pub client_secret: String,
}

/// OAuth token response
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Gateway to the authorization server's registration, authorization,
/// and token endpoints
pub struct OAuthClient {
    /// Shared HTTP client (carries the outbound timeout)
    http_client: Client,
    auth_server_url: String,
    redirect_uri: String,
    scope: String,
    client_name: String,
    client_type: String,
}

impl OAuthClient {
    /// Create a gateway from configuration, sharing the HTTP client.
    #[must_use]
    pub fn new(http_client: Client, config: &OauthConfig) -> Self {
        Self {
            http_client,
            auth_server_url: config.auth_server_url.clone(),
            redirect_uri: config.redirect_uri.clone(),
            scope: config.scope.clone(),
            client_name: config.client_name.clone(),
            client_type: config.client_type.clone(),
        }
    }

    /// Register this frontend as an OAuth client.
    ///
    /// Form-encoded POST to the client registration endpoint. The
    /// registry state lives on the authorization server; nothing is
    /// persisted locally.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Registration`] with the response body text when
    /// the server answers with a non-success status or an unparseable
    /// body.
    pub async fn register_client(&self) -> Result<ClientCredential> {
        let params = [
            ("name", self.client_name.as_str()),
            ("redirect_uri", self.redirect_uri.as_str()),
            ("type", self.client_type.as_str()),
        ];

        let response = self
            .http_client
            .post(format!("{}/oauth/client", self.auth_server_url))
            .form(&params)
            .send()
            .await?;

        if !response.status().is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Registration(body));
        }

        let credential: ClientCredential = response
            .json()
            .await
            .map_err(|e| Error::Registration(format!("invalid registration response: {e}")))?;

        info!(client_id = %credential.client_id, "Registered OAuth client");
        Ok(credential)
    }

    /// Build the authorization URL the user agent is redirected to.
    ///
    /// Pure construction; no network I/O. The caller is responsible for
    /// the redirect.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the configured authorization server
    /// URL does not parse.
    pub fn authorization_url(
        &self,
        client_id: &str,
        code_challenge: &str,
        state: &str,
    ) -> Result<String> {
        let mut url = Url::parse(&format!("{}/oauth/authorize", self.auth_server_url))
            .map_err(|e| Error::Config(format!("Invalid authorization endpoint: {e}")))?;

        {
            let mut params = url.query_pairs_mut();
            params.append_pair("response_type", "code");
            params.append_pair("redirect_uri", &self.redirect_uri);
            params.append_pair("client_id", client_id);
            params.append_pair("scope", &self.scope);
            params.append_pair("code_challenge", code_challenge);
            params.append_pair("code_challenge_method", "S256");
            params.append_pair("state", state);
        }

        Ok(url.into())
    }

    /// Exchange an authorization code for an access token.
    ///
    /// Form-encoded POST with HTTP Basic auth built from the client
    /// credentials. Exactly one attempt: the authorization code is
    /// single-use, so a failed exchange surfaces immediately.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TokenExchange`] on a non-success status, a
    /// non-JSON body, or a missing `access_token` field.
    pub async fn exchange_code(
        &self,
        code: &str,
        code_verifier: &str,
        credential: &ClientCredential,
    ) -> Result<String> {
        let params = [
            ("grant_type", "authorization_code"),
            ("redirect_uri", self.redirect_uri.as_str()),
            ("code_verifier", code_verifier),
            ("code", code),
        ];

        let response = self
            .http_client
            .post(format!("{}/oauth/token", self.auth_server_url))
            .basic_auth(&credential.client_id, Some(&credential.client_secret))
            .form(&params)
            .send()
            .await
            .map_err(|e| Error::TokenExchange(format!("token request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::TokenExchange(format!("HTTP {status} - {body}")));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| Error::TokenExchange(format!("invalid token response: {e}")))?;

        debug!("Exchanged authorization code for access token");
        Ok(token.access_token)
    }
}
