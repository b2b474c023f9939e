//! Bearer Token Mint and Verify
//!
//! Stateless, self-contained credentials: an HS256 JWT carrying typed
//! identity claims. No server-side session store and no revocation list -
//! a token stays valid for its whole claimed lifetime, and logout is
//! client-side discard. Rotating the signing secret invalidates every
//! outstanding token; that is an operational concern, not a per-request one.
//!
//! The signing secret is held by the [`TokenSigner`], built once at startup
//! and passed explicitly - never read from ambient global state.

use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Identity claims embedded in a token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Display name at issue time
    pub name: String,
    /// Account identity; the canonical key for all lookups
    pub email: String,
    /// Issued at (Unix timestamp, seconds)
    pub iat: i64,
    /// Expiration (Unix timestamp, seconds)
    pub exp: i64,
}

/// Token errors
#[derive(Debug, Error)]
pub enum TokenError {
    /// Token issuance failed (internal error)
    #[error("Token issuance failed: {0}")]
    Issue(jsonwebtoken::errors::Error),

    /// Signature invalid, token malformed, or expired
    #[error("Invalid authorization token")]
    Invalid,
}

/// Stateless token issuer/verifier
///
/// Holds the process-wide signing secret, read-only after construction.
pub struct TokenSigner {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenSigner {
    /// Create a signer from the process-wide secret and token lifetime
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation: Validation::default(),
            ttl,
        }
    }

    /// Issue a signed token for the given identity
    pub fn issue(&self, name: &str, email: &str) -> Result<String, TokenError> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            name: name.to_string(),
            email: email.to_string(),
            iat: now,
            exp: now + self.ttl.as_secs() as i64,
        };

        encode(&Header::default(), &claims, &self.encoding).map_err(TokenError::Issue)
    }

    /// Verify a token and recover its claims
    ///
    /// Fails on bad signature, malformed input, or expiry. Callers must
    /// keep this failure distinct from an absent token.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|_| TokenError::Invalid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signer() -> TokenSigner {
        TokenSigner::new(b"test-secret-test-secret-test-sec", Duration::from_secs(3600))
    }

    #[test]
    fn test_issue_and_verify_roundtrip() {
        let signer = signer();
        let token = signer.issue("Alice", "a@x.com").unwrap();

        let claims = signer.verify(&token).unwrap();
        assert_eq!(claims.name, "Alice");
        assert_eq!(claims.email, "a@x.com");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_tampered_token_fails() {
        let signer = signer();
        let token = signer.issue("Alice", "a@x.com").unwrap();

        // Flip one byte in the payload segment
        let mid = token.len() / 2;
        let mut bytes = token.into_bytes();
        bytes[mid] = if bytes[mid] == b'A' { b'B' } else { b'A' };
        let tampered = String::from_utf8(bytes).unwrap();

        assert!(matches!(signer.verify(&tampered), Err(TokenError::Invalid)));
    }

    #[test]
    fn test_malformed_token_fails() {
        let signer = signer();
        assert!(matches!(
            signer.verify("not.a.token"),
            Err(TokenError::Invalid)
        ));
        assert!(matches!(signer.verify(""), Err(TokenError::Invalid)));
    }

    #[test]
    fn test_wrong_secret_fails() {
        let signer = signer();
        let other = TokenSigner::new(b"another-secret-entirely-32-bytes", Duration::from_secs(3600));

        let token = signer.issue("Alice", "a@x.com").unwrap();
        assert!(matches!(other.verify(&token), Err(TokenError::Invalid)));
    }

    #[test]
    fn test_expired_token_fails() {
        let signer = signer();

        // Encode claims already past expiry (beyond default leeway)
        let now = Utc::now().timestamp();
        let claims = Claims {
            name: "Alice".to_string(),
            email: "a@x.com".to_string(),
            iat: now - 7200,
            exp: now - 3600,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"test-secret-test-secret-test-sec"),
        )
        .unwrap();

        assert!(matches!(signer.verify(&token), Err(TokenError::Invalid)));
    }
}
