//! Account Password Value Object
//!
//! Domain wrapper around the cryptographic primitives in
//! `platform::password`. `RawPassword` holds validated user input,
//! `AccountPassword` holds the stored Argon2id digest.

use kernel::error::app_error::{AppError, AppResult};
use platform::password::{
    ClearTextPassword, HashedPassword, PasswordHashError, PasswordPolicyError,
};
use std::fmt;

// ============================================================================
// Raw Password (User Input)
// ============================================================================

/// Raw password from user input
///
/// Wrapper around `ClearTextPassword` with domain-specific error handling.
/// Memory is automatically zeroized when dropped.
pub struct RawPassword(ClearTextPassword);

impl RawPassword {
    /// Create a new raw password with validation
    pub fn new(raw: String) -> AppResult<Self> {
        let clear_text = ClearTextPassword::new(raw).map_err(|e| match e {
            PasswordPolicyError::TooShort { min, actual } => AppError::bad_request(format!(
                "Password must be at least {} characters (got {})",
                min, actual
            )),
            PasswordPolicyError::EmptyOrWhitespace => {
                AppError::bad_request("Password cannot be empty")
            }
        })?;

        Ok(Self(clear_text))
    }
}

impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RawPassword(<redacted>)")
    }
}

// ============================================================================
// Account Password (Stored Digest)
// ============================================================================

/// Stored password digest
#[derive(Debug, Clone)]
pub struct AccountPassword(HashedPassword);

impl AccountPassword {
    /// Hash a raw password for storage
    pub fn from_raw(raw: &RawPassword) -> AppResult<Self> {
        let hashed = raw
            .0
            .hash()
            .map_err(|e| AppError::internal(format!("Password hashing failed: {}", e)))?;
        Ok(Self(hashed))
    }

    /// Load from a stored PHC string
    pub fn from_phc_string(s: impl Into<String>) -> Result<Self, PasswordHashError> {
        Ok(Self(HashedPassword::from_phc_string(s)?))
    }

    /// PHC string for database storage
    pub fn as_phc_string(&self) -> &str {
        self.0.as_phc_string()
    }

    /// Verify a raw password against this digest
    pub fn verify(&self, raw: &RawPassword) -> bool {
        self.0.verify(&raw.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let raw = RawPassword::new("opensesame".to_string()).unwrap();
        let stored = AccountPassword::from_raw(&raw).unwrap();
        assert!(stored.verify(&raw));

        let wrong = RawPassword::new("closesesame".to_string()).unwrap();
        assert!(!stored.verify(&wrong));
    }

    #[test]
    fn test_rejects_short_password() {
        assert!(RawPassword::new("1234".to_string()).is_err());
    }

    #[test]
    fn test_phc_roundtrip() {
        let raw = RawPassword::new("opensesame".to_string()).unwrap();
        let stored = AccountPassword::from_raw(&raw).unwrap();
        let reloaded = AccountPassword::from_phc_string(stored.as_phc_string()).unwrap();
        assert!(reloaded.verify(&raw));
    }
}
