//! Login Use Case
//!
//! Verifies credentials and issues a fresh bearer token. Unknown email
//! and wrong password produce the same error so responses never reveal
//! whether an address is registered.

use std::sync::Arc;

use platform::token::TokenSigner;

use crate::domain::repository::AccountRepository;
use crate::domain::value_object::{account_password::RawPassword, email::Email};
use crate::error::{AuthError, AuthResult};

/// Login input
pub struct LoginInput {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Login output
pub struct LoginOutput {
    pub token: String,
    pub name: String,
    pub email: String,
}

/// Login use case
pub struct LoginUseCase<R>
where
    R: AccountRepository,
{
    repo: Arc<R>,
    signer: Arc<TokenSigner>,
}

impl<R> LoginUseCase<R>
where
    R: AccountRepository,
{
    pub fn new(repo: Arc<R>, signer: Arc<TokenSigner>) -> Self {
        Self { repo, signer }
    }

    pub async fn execute(&self, input: LoginInput) -> AuthResult<LoginOutput> {
        let (Some(email), Some(password)) = (input.email, input.password) else {
            return Err(AuthError::InvalidParameters);
        };

        // A malformed email cannot exist in the store, so it fails the
        // same way an unknown one does
        let email = Email::new(email).map_err(|_| AuthError::InvalidCredentials)?;

        let account = self
            .repo
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let raw_password =
            RawPassword::new(password).map_err(|_| AuthError::InvalidCredentials)?;

        if !account.password.verify(&raw_password) {
            return Err(AuthError::InvalidCredentials);
        }

        let token = self
            .signer
            .issue(account.name.as_str(), account.email.as_str())?;

        tracing::info!(account_id = %account.account_id, "Account logged in");

        Ok(LoginOutput {
            token,
            name: account.name.into_db(),
            email: account.email.into_db(),
        })
    }
}
