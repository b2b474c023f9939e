//! Update Account Use Case
//!
//! Applies a full profile mutation: name, email, password, and
//! optionally the profile image. The client always sends the complete
//! profile; unchanged fields are detected and skipped.
//!
//! Image lifecycle: the handler stages the uploaded image in the blob
//! store BEFORE this use case runs. On any failure the staged blob is
//! removed; on success the displaced old avatar is removed. Blob
//! deletion failures are logged, never surfaced.

use std::sync::Arc;

use platform::blob::{BlobError, BlobStore};
use platform::token::TokenSigner;

use crate::application::config::AuthConfig;
use crate::domain::repository::AccountRepository;
use crate::domain::value_object::{
    account_password::{AccountPassword, RawPassword},
    display_name::DisplayName,
    email::Email,
};
use crate::error::{AuthError, AuthResult};

/// Update account input
pub struct UpdateAccountInput {
    /// Email from the verified bearer token
    pub authenticated_email: String,
    pub new_name: Option<String>,
    pub new_email: Option<String>,
    pub old_password: Option<String>,
    pub new_password: Option<String>,
    /// Blob name of an already-staged profile image
    pub staged_avatar: Option<String>,
}

/// Update account output
pub struct UpdateAccountOutput {
    /// Fresh token reflecting the post-update identity
    pub token: String,
}

/// Update account use case
pub struct UpdateAccountUseCase<R, B>
where
    R: AccountRepository,
    B: BlobStore,
{
    repo: Arc<R>,
    blob: Arc<B>,
    signer: Arc<TokenSigner>,
    config: Arc<AuthConfig>,
}

impl<R, B> UpdateAccountUseCase<R, B>
where
    R: AccountRepository,
    B: BlobStore,
{
    pub fn new(
        repo: Arc<R>,
        blob: Arc<B>,
        signer: Arc<TokenSigner>,
        config: Arc<AuthConfig>,
    ) -> Self {
        Self {
            repo,
            blob,
            signer,
            config,
        }
    }

    pub async fn execute(&self, input: UpdateAccountInput) -> AuthResult<UpdateAccountOutput> {
        let staged = input.staged_avatar.clone();

        match self.apply(input).await {
            Ok((token, displaced)) => {
                if let Some(old) = displaced {
                    self.discard_blob(&old).await;
                }
                Ok(UpdateAccountOutput { token })
            }
            Err(e) => {
                // Nothing persisted references the staged image
                if let Some(name) = staged {
                    self.discard_blob(&name).await;
                }
                Err(e)
            }
        }
    }

    /// Run the mutation, returning the fresh token and the blob name of
    /// a displaced old avatar (deleted by the caller after success)
    async fn apply(&self, input: UpdateAccountInput) -> AuthResult<(String, Option<String>)> {
        let (Some(new_name), Some(new_email), Some(new_password)) =
            (input.new_name, input.new_email, input.new_password)
        else {
            return Err(AuthError::InvalidParameters);
        };

        if self.config.require_old_password && input.old_password.is_none() {
            return Err(AuthError::InvalidParameters);
        }

        // The token's email is the identity; an account it no longer
        // matches means the credentials are stale
        let authenticated_email =
            Email::new(input.authenticated_email).map_err(|_| AuthError::InvalidCredentials)?;

        let mut account = self
            .repo
            .find_by_email(&authenticated_email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if self.config.require_old_password {
            let old_password = input.old_password.unwrap_or_default();
            let raw_old =
                RawPassword::new(old_password).map_err(|_| AuthError::InvalidCredentials)?;
            if !account.password.verify(&raw_old) {
                return Err(AuthError::InvalidCredentials);
            }
        }

        let new_name = DisplayName::new(new_name).map_err(|_| AuthError::InvalidParameters)?;
        let new_email = Email::new(new_email).map_err(|_| AuthError::InvalidParameters)?;
        let raw_new =
            RawPassword::new(new_password).map_err(|_| AuthError::InvalidParameters)?;

        if new_email != account.email && self.repo.exists_by_email(&new_email).await? {
            return Err(AuthError::AlreadyExists);
        }

        if new_name != account.name {
            account.set_name(new_name);
        }
        if new_email != account.email {
            account.set_email(new_email);
        }

        // A submitted password that still verifies against the stored
        // digest is treated as unchanged and keeps the existing hash
        if !account.password.verify(&raw_new) {
            let password = AccountPassword::from_raw(&raw_new)
                .map_err(|e| AuthError::Internal(e.to_string()))?;
            account.set_password(password);
        }

        let displaced = match input.staged_avatar {
            Some(name) => account.set_avatar(name),
            None => None,
        };

        // Issued before the write: execute deletes the staged blob on
        // any error, so nothing fallible may follow a persisted save
        let token = self
            .signer
            .issue(account.name.as_str(), account.email.as_str())?;

        // The uniqueness check above is not atomic with the write; the
        // unique index on email resolves the race in the store
        self.repo.update(&account).await?;

        tracing::info!(account_id = %account.account_id, "Account updated");

        Ok((token, displaced))
    }

    async fn discard_blob(&self, name: &str) {
        match self.blob.delete(name).await {
            Ok(()) | Err(BlobError::NotFound(_)) => {}
            Err(e) => {
                tracing::warn!(error = %e, blob = %name, "Failed to remove image blob");
            }
        }
    }
}
