//! Per-attempt handshake state
//!
//! The handshake spans two requests: the login action that redirects to
//! the authorization server, and the callback that returns with a code.
//! Credentials and PKCE values for each attempt live in a map keyed by
//! the `state` parameter, so concurrent logins cannot clobber each
//! other. Taking an attempt consumes it, which also makes every state
//! value single-use.

use std::collections::HashMap;

use parking_lot::RwLock;
use tracing::debug;

use super::client::ClientCredential;
use super::pkce::PkcePair;

/// Handshake state carried from login start to the authorization callback
#[derive(Debug, Clone)]
pub struct LoginAttempt {
    /// Credentials registered for this attempt
    pub credential: ClientCredential,
    /// PKCE pair bound to the authorization request
    pub pkce: PkcePair,
    /// State parameter sent with the authorization request
    pub state: String,
}

/// Login attempts awaiting their authorization callback
#[derive(Default)]
pub struct PendingLogins {
    attempts: RwLock<HashMap<String, LoginAttempt>>,
}

impl PendingLogins {
    /// Create an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an attempt under its state value.
    pub fn insert(&self, attempt: LoginAttempt) {
        debug!(state = %attempt.state, "Recording login attempt");
        self.attempts
            .write()
            .insert(attempt.state.clone(), attempt);
    }

    /// Consume the attempt matching a returned state, if any.
    pub fn take(&self, state: &str) -> Option<LoginAttempt> {
        self.attempts.write().remove(state)
    }

    /// Number of attempts awaiting a callback.
    pub fn len(&self) -> usize {
        self.attempts.read().len()
    }

    /// Whether no attempts are pending.
    pub fn is_empty(&self) -> bool {
        self.attempts.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oauth::pkce;

    fn attempt(state: &str) -> LoginAttempt {
        LoginAttempt {
            credential: ClientCredential {
                client_id: format!("cid-{state}"),
                client_secret: "secret".to_string(),
            },
            pkce: pkce::PkcePair::generate(),
            state: state.to_string(),
        }
    }

    #[test]
    fn take_consumes_the_attempt() {
        let pending = PendingLogins::new();
        pending.insert(attempt("st1"));
        assert_eq!(pending.len(), 1);

        let taken = pending.take("st1").unwrap();
        assert_eq!(taken.credential.client_id, "cid-st1");
        assert!(pending.is_empty());

        // State values are single-use
        assert!(pending.take("st1").is_none());
    }

    #[test]
    fn unknown_state_yields_none() {
        let pending = PendingLogins::new();
        pending.insert(attempt("st1"));
        assert!(pending.take("other").is_none());
        assert_eq!(pending.len(), 1);
    }

    #[test]
    fn concurrent_attempts_do_not_clobber_each_other() {
        let pending = PendingLogins::new();
        pending.insert(attempt("st1"));
        pending.insert(attempt("st2"));

        let first = pending.take("st1").unwrap();
        let second = pending.take("st2").unwrap();
        assert_eq!(first.credential.client_id, "cid-st1");
        assert_eq!(second.credential.client_id, "cid-st2");
        assert_ne!(first.pkce.verifier, second.pkce.verifier);
    }
}
