//! Account Entity
//!
//! A marketplace member. The email address is the login identity and
//! the key carried inside issued tokens; the display name is what other
//! members see on listings.

use chrono::{DateTime, Utc};
use kernel::id::AccountId;

use crate::domain::value_object::{
    account_password::AccountPassword, display_name::DisplayName, email::Email,
};

/// Account entity
#[derive(Debug, Clone)]
pub struct Account {
    /// Internal UUID identifier
    pub account_id: AccountId,
    /// Display name (not unique)
    pub name: DisplayName,
    /// Login identity (unique, case-preserving)
    pub email: Email,
    /// Argon2id password digest
    pub password: AccountPassword,
    /// Whether the activation code has been redeemed
    pub activated: bool,
    /// Code sent in the welcome email
    pub activation_code: String,
    /// Stored blob name of the profile image, if any
    pub avatar: Option<String>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// Create a new, not-yet-activated account
    pub fn new(
        name: DisplayName,
        email: Email,
        password: AccountPassword,
        activation_code: String,
    ) -> Self {
        let now = Utc::now();

        Self {
            account_id: AccountId::new(),
            name,
            email,
            password,
            activated: false,
            activation_code,
            avatar: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Update the display name
    pub fn set_name(&mut self, name: DisplayName) {
        self.name = name;
        self.updated_at = Utc::now();
    }

    /// Update the email address
    pub fn set_email(&mut self, email: Email) {
        self.email = email;
        self.updated_at = Utc::now();
    }

    /// Update the password digest
    pub fn set_password(&mut self, password: AccountPassword) {
        self.password = password;
        self.updated_at = Utc::now();
    }

    /// Replace the profile image, returning the blob name it displaced
    pub fn set_avatar(&mut self, avatar: String) -> Option<String> {
        self.updated_at = Utc::now();
        self.avatar.replace(avatar)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::account_password::RawPassword;

    fn account() -> Account {
        let raw = RawPassword::new("opensesame".to_string()).unwrap();
        Account::new(
            DisplayName::new("Morgan").unwrap(),
            Email::new("morgan@example.com").unwrap(),
            AccountPassword::from_raw(&raw).unwrap(),
            "a1b2c3".to_string(),
        )
    }

    #[test]
    fn test_new_account_starts_unactivated() {
        let account = account();
        assert!(!account.activated);
        assert!(account.avatar.is_none());
        assert_eq!(account.activation_code, "a1b2c3");
    }

    #[test]
    fn test_set_avatar_returns_displaced_name() {
        let mut account = account();
        assert_eq!(account.set_avatar("first.png".to_string()), None);
        assert_eq!(
            account.set_avatar("second.png".to_string()),
            Some("first.png".to_string())
        );
        assert_eq!(account.avatar.as_deref(), Some("second.png"));
    }
}
