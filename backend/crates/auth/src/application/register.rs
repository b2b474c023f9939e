//! Register Use Case
//!
//! Creates a new marketplace account and returns a signed bearer token
//! so the client is logged in immediately. A welcome email carrying the
//! activation code is sent best-effort; delivery failure never fails
//! the registration.

use std::sync::Arc;

use platform::email::{EmailMessage, EmailSender};
use platform::token::TokenSigner;

use crate::application::config::AuthConfig;
use crate::domain::entity::account::Account;
use crate::domain::repository::AccountRepository;
use crate::domain::value_object::{
    account_password::{AccountPassword, RawPassword},
    display_name::DisplayName,
    email::Email,
};
use crate::error::{AuthError, AuthResult};

/// Register input
///
/// Fields are optional because absence is a distinct client error,
/// not a deserialization failure.
pub struct RegisterInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Register output
pub struct RegisterOutput {
    pub token: String,
    pub name: String,
    pub email: String,
}

/// Register use case
pub struct RegisterUseCase<R>
where
    R: AccountRepository,
{
    repo: Arc<R>,
    email_sender: Arc<dyn EmailSender>,
    signer: Arc<TokenSigner>,
    config: Arc<AuthConfig>,
}

impl<R> RegisterUseCase<R>
where
    R: AccountRepository,
{
    pub fn new(
        repo: Arc<R>,
        email_sender: Arc<dyn EmailSender>,
        signer: Arc<TokenSigner>,
        config: Arc<AuthConfig>,
    ) -> Self {
        Self {
            repo,
            email_sender,
            signer,
            config,
        }
    }

    pub async fn execute(&self, input: RegisterInput) -> AuthResult<RegisterOutput> {
        let (Some(name), Some(email), Some(password)) =
            (input.name, input.email, input.password)
        else {
            return Err(AuthError::InvalidParameters);
        };

        // Validate all fields before touching the store
        let name = DisplayName::new(name).map_err(|_| AuthError::InvalidParameters)?;
        let email = Email::new(email).map_err(|_| AuthError::InvalidParameters)?;
        let raw_password =
            RawPassword::new(password).map_err(|_| AuthError::InvalidParameters)?;

        if self.repo.exists_by_email(&email).await? {
            return Err(AuthError::AlreadyExists);
        }

        let password = AccountPassword::from_raw(&raw_password)
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        let activation_code = platform::crypto::random_code(self.config.activation_code_length);
        let account = Account::new(name, email, password, activation_code);

        // The exists check above is not atomic with the insert; the
        // unique index on email resolves the race in the store
        self.repo.create(&account).await?;

        self.send_welcome_email(&account);

        let token = self
            .signer
            .issue(account.name.as_str(), account.email.as_str())?;

        tracing::info!(
            account_id = %account.account_id,
            email = %account.email,
            "Account registered"
        );

        Ok(RegisterOutput {
            token,
            name: account.name.into_db(),
            email: account.email.into_db(),
        })
    }

    /// Best-effort activation email
    fn send_welcome_email(&self, account: &Account) {
        let message = EmailMessage {
            to: account.email.as_str().to_string(),
            subject: "Welcome! Activate your account".to_string(),
            body: format!(
                "Hi {},\n\nYour activation code is: {}\n",
                account.name.as_str(),
                account.activation_code
            ),
        };

        if let Err(e) = self.email_sender.send(&message) {
            tracing::warn!(
                error = %e,
                email = %account.email,
                "Failed to send activation email"
            );
        }
    }
}
