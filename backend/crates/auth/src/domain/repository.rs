//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use crate::domain::entity::account::Account;
use crate::domain::value_object::email::Email;
use crate::error::AuthResult;

/// Account repository trait
#[trait_variant::make(AccountRepository: Send)]
pub trait LocalAccountRepository {
    /// Create a new account
    ///
    /// Returns `AuthError::AlreadyExists` when the email is taken.
    async fn create(&self, account: &Account) -> AuthResult<()>;

    /// Find account by email (exact match)
    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<Account>>;

    /// Check if an email is registered (exact match)
    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool>;

    /// Update account
    ///
    /// Returns `AuthError::AlreadyExists` when the update would collide
    /// with another account's email.
    async fn update(&self, account: &Account) -> AuthResult<()>;
}
