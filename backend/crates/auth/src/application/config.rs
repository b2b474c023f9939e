//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::time::Duration;

use platform::token::TokenSigner;

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Secret key for signing bearer tokens (HMAC-SHA256)
    pub token_secret: Vec<u8>,
    /// Token lifetime (30 days)
    pub token_ttl: Duration,
    /// Whether profile updates must present the current password
    pub require_old_password: bool,
    /// Length of the code sent in the welcome email
    pub activation_code_length: usize,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_secret: Vec::new(),
            token_ttl: Duration::from_secs(30 * 24 * 3600), // 30 days
            require_old_password: true,
            activation_code_length: 6,
        }
    }
}

impl AuthConfig {
    /// Create config with a random token secret (for development)
    pub fn with_random_secret() -> Self {
        Self {
            token_secret: platform::crypto::random_bytes(32),
            ..Default::default()
        }
    }

    /// Create config for development
    pub fn development() -> Self {
        Self::with_random_secret()
    }

    /// Build the token signer for this configuration
    pub fn signer(&self) -> TokenSigner {
        TokenSigner::new(&self.token_secret, self.token_ttl)
    }
}
