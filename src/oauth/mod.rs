//! OAuth 2.0 login handshake
//!
//! Client side of the Authorization Code flow with PKCE (RFC 7636):
//!
//! - Dynamic client registration against the authorization server
//! - Authorization request URL construction
//! - Authorization-code-for-token exchange with Basic client auth
//! - Per-attempt handshake state keyed by the `state` parameter, so
//!   concurrent logins never overwrite each other's PKCE values

mod attempt;
mod client;
pub mod pkce;

pub use attempt::{LoginAttempt, PendingLogins};
pub use client::{ClientCredential, OAuthClient};
