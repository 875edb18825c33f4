//! PKCE verifier and challenge generation (RFC 7636)

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::RngExt;
use sha2::{Digest, Sha256};

/// Generate a cryptographically random code verifier.
///
/// 32 random bytes, base64url encoded without padding (43 chars,
/// RFC 7636 compliant).
#[must_use]
pub fn generate_verifier() -> String {
    let verifier_bytes: [u8; 32] = rand::rng().random();
    URL_SAFE_NO_PAD.encode(verifier_bytes)
}

/// Derive the S256 code challenge for a verifier.
///
/// `challenge = BASE64URL(SHA256(verifier))`, no padding. Pure and
/// deterministic.
#[must_use]
pub fn derive_challenge(verifier: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hasher.finalize())
}

/// Generate a random state parameter for CSRF protection.
#[must_use]
pub fn generate_state() -> String {
    let state_bytes: [u8; 16] = rand::rng().random();
    URL_SAFE_NO_PAD.encode(state_bytes)
}

/// A verifier/challenge pair for one authorization attempt.
///
/// The challenge goes out with the authorization request; the verifier
/// must be presented again at token exchange.
#[derive(Debug, Clone)]
pub struct PkcePair {
    /// Code verifier, held until token exchange
    pub verifier: String,
    /// S256 challenge sent with the authorization request
    pub challenge: String,
}

impl PkcePair {
    /// Generate a fresh pair.
    #[must_use]
    pub fn generate() -> Self {
        let verifier = generate_verifier();
        let challenge = derive_challenge(&verifier);
        Self {
            verifier,
            challenge,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_base64url_no_pad(s: &str) -> bool {
        !s.is_empty() && !s.contains('+') && !s.contains('/') && !s.contains('=')
    }

    #[test]
    fn verifier_is_base64url_safe() {
        for _ in 0..10 {
            let verifier = generate_verifier();
            assert!(is_base64url_no_pad(&verifier), "not URL-safe: {verifier}");
        }
    }

    #[test]
    fn verifier_has_rfc7636_length() {
        // 32 random bytes -> 43 base64url chars, within the 43-128 range
        let verifier = generate_verifier();
        assert_eq!(verifier.len(), 43);
    }

    #[test]
    fn verifiers_are_unique() {
        let v1 = generate_verifier();
        let v2 = generate_verifier();
        assert_ne!(v1, v2);
    }

    #[test]
    fn challenge_is_deterministic() {
        let c1 = derive_challenge("test_verifier_string");
        let c2 = derive_challenge("test_verifier_string");
        assert_eq!(c1, c2);
    }

    #[test]
    fn challenge_is_sha256_of_verifier() {
        let verifier = generate_verifier();
        let mut hasher = Sha256::new();
        hasher.update(verifier.as_bytes());
        let expected = URL_SAFE_NO_PAD.encode(hasher.finalize());
        assert_eq!(derive_challenge(&verifier), expected);
    }

    #[test]
    fn challenge_is_base64url_safe() {
        let challenge = derive_challenge(&generate_verifier());
        assert!(is_base64url_no_pad(&challenge));
    }

    #[test]
    fn challenges_differ_for_different_verifiers() {
        assert_ne!(derive_challenge("verifier_1"), derive_challenge("verifier_2"));
    }

    #[test]
    fn state_is_base64url_safe() {
        for _ in 0..10 {
            let state = generate_state();
            assert!(is_base64url_no_pad(&state));
        }
    }

    #[test]
    fn state_has_sufficient_length() {
        // 16 random bytes -> 22 base64url chars
        assert_eq!(generate_state().len(), 22);
    }

    #[test]
    fn states_are_unique() {
        assert_ne!(generate_state(), generate_state());
    }

    #[test]
    fn pair_is_internally_consistent() {
        let pair = PkcePair::generate();
        assert_eq!(pair.challenge, derive_challenge(&pair.verifier));
        assert_ne!(pair.verifier, pair.challenge);
    }

    #[test]
    fn pairs_are_unique() {
        let p1 = PkcePair::generate();
        let p2 = PkcePair::generate();
        assert_ne!(p1.verifier, p2.verifier);
        assert_ne!(p1.challenge, p2.challenge);
    }
}
