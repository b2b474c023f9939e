//! Display Name Value Object
//!
//! The user-facing name shown on listings and profiles. Not unique;
//! identity is the email address.

use kernel::error::app_error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Minimum display name length (characters, after trimming)
const NAME_MIN_LENGTH: usize = 2;

/// Maximum display name length
const NAME_MAX_LENGTH: usize = 100;

/// Display name value object
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DisplayName(String);

impl DisplayName {
    /// Create a new display name with validation
    pub fn new(name: impl Into<String>) -> AppResult<Self> {
        let name = name.into().trim().to_string();

        if name.chars().count() < NAME_MIN_LENGTH {
            return Err(AppError::bad_request(format!(
                "Name must be at least {} characters",
                NAME_MIN_LENGTH
            )));
        }

        if name.chars().count() > NAME_MAX_LENGTH {
            return Err(AppError::bad_request(format!(
                "Name must be at most {} characters",
                NAME_MAX_LENGTH
            )));
        }

        Ok(Self(name))
    }

    /// Create from database value (assumed already validated)
    pub fn from_db(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Get the name as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert to string for database storage
    pub fn into_db(self) -> String {
        self.0
    }
}

impl FromStr for DisplayName {
    type Err = AppError;

    fn from_str(s: &str) -> AppResult<Self> {
        DisplayName::new(s)
    }
}

impl std::fmt::Display for DisplayName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_name() {
        let name = DisplayName::new("Jo").unwrap();
        assert_eq!(name.as_str(), "Jo");
    }

    #[test]
    fn test_too_short_after_trim() {
        assert!(DisplayName::new(" J ").is_err());
        assert!(DisplayName::new("").is_err());
    }

    #[test]
    fn test_counts_characters_not_bytes() {
        // Two multi-byte characters still satisfy the minimum
        assert!(DisplayName::new("åß").is_ok());
    }
}
