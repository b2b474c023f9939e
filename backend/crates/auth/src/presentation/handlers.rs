//! HTTP Handlers

use axum::Json;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use std::sync::Arc;

use platform::bearer::Identity;
use platform::blob::BlobStore;
use platform::email::EmailSender;
use platform::token::TokenSigner;

use crate::application::config::AuthConfig;
use crate::application::{
    LoginInput, LoginUseCase, RegisterInput, RegisterUseCase, UpdateAccountInput,
    UpdateAccountUseCase,
};
use crate::domain::repository::AccountRepository;
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{LoginRequest, RegisterRequest, TokenResponse, UpdateResponse};

/// Shared state for auth handlers
pub struct AuthAppState<R, B>
where
    R: AccountRepository + Send + Sync + 'static,
    B: BlobStore + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub blob: Arc<B>,
    pub email_sender: Arc<dyn EmailSender>,
    pub signer: Arc<TokenSigner>,
    pub config: Arc<AuthConfig>,
}

// Manual impl so cloning never requires R: Clone or B: Clone
impl<R, B> Clone for AuthAppState<R, B>
where
    R: AccountRepository + Send + Sync + 'static,
    B: BlobStore + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            blob: self.blob.clone(),
            email_sender: self.email_sender.clone(),
            signer: self.signer.clone(),
            config: self.config.clone(),
        }
    }
}

// ============================================================================
// Register
// ============================================================================

/// POST /user/register
pub async fn register<R, B>(
    State(state): State<AuthAppState<R, B>>,
    Json(req): Json<RegisterRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: AccountRepository + Send + Sync + 'static,
    B: BlobStore + Send + Sync + 'static,
{
    let use_case = RegisterUseCase::new(
        state.repo.clone(),
        state.email_sender.clone(),
        state.signer.clone(),
        state.config.clone(),
    );

    let input = RegisterInput {
        name: req.name,
        email: req.email,
        password: req.password,
    };

    let output = use_case.execute(input).await?;

    Ok((
        StatusCode::CREATED,
        Json(TokenResponse {
            token: output.token,
            name: output.name,
            email: output.email,
        }),
    ))
}

// ============================================================================
// Login
// ============================================================================

/// POST /user/login
pub async fn login<R, B>(
    State(state): State<AuthAppState<R, B>>,
    Json(req): Json<LoginRequest>,
) -> AuthResult<Json<TokenResponse>>
where
    R: AccountRepository + Send + Sync + 'static,
    B: BlobStore + Send + Sync + 'static,
{
    let use_case = LoginUseCase::new(state.repo.clone(), state.signer.clone());

    let input = LoginInput {
        email: req.email,
        password: req.password,
    };

    let output = use_case.execute(input).await?;

    Ok(Json(TokenResponse {
        token: output.token,
        name: output.name,
        email: output.email,
    }))
}

// ============================================================================
// Update Account
// ============================================================================

/// Accumulated multipart form for the profile update
#[derive(Default)]
struct UpdateForm {
    new_name: Option<String>,
    new_email: Option<String>,
    old_password: Option<String>,
    new_password: Option<String>,
    staged_avatar: Option<String>,
}

/// Read the multipart form, staging the profile image as it streams by.
///
/// On failure the caller receives whatever was already staged so it can
/// be removed; the image is validated BEFORE any bytes hit the store.
async fn read_update_form<B>(
    blob: &B,
    multipart: &mut Multipart,
) -> Result<UpdateForm, (Option<String>, AuthError)>
where
    B: BlobStore + Send + Sync,
{
    let mut form = UpdateForm::default();

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(_) => return Err((form.staged_avatar.take(), AuthError::InvalidParameters)),
        };

        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        match name.as_str() {
            "newName" | "newEmail" | "oldPassword" | "newPassword" => {
                let value = match field.text().await {
                    Ok(value) => value,
                    Err(_) => {
                        return Err((form.staged_avatar.take(), AuthError::InvalidParameters));
                    }
                };
                match name.as_str() {
                    "newName" => form.new_name = Some(value),
                    "newEmail" => form.new_email = Some(value),
                    "oldPassword" => form.old_password = Some(value),
                    _ => form.new_password = Some(value),
                }
            }
            "profileImage" => {
                let content_type = field.content_type().unwrap_or("").to_string();
                let kind = match platform::upload::validate_content_type(&content_type) {
                    Ok(kind) => kind,
                    Err(e) => return Err((form.staged_avatar.take(), e.into())),
                };
                let bytes = match field.bytes().await {
                    Ok(bytes) => bytes,
                    Err(_) => {
                        return Err((form.staged_avatar.take(), AuthError::InvalidParameters));
                    }
                };
                match blob.store(kind.canonical_extension(), &bytes).await {
                    Ok(stored) => form.staged_avatar = Some(stored),
                    Err(e) => return Err((form.staged_avatar.take(), e.into())),
                }
            }
            _ => {}
        }
    }

    Ok(form)
}

/// PATCH /user/update (bearer-protected)
pub async fn update_account<R, B>(
    State(state): State<AuthAppState<R, B>>,
    Identity(claims): Identity,
    mut multipart: Multipart,
) -> AuthResult<Json<UpdateResponse>>
where
    R: AccountRepository + Send + Sync + 'static,
    B: BlobStore + Send + Sync + 'static,
{
    let form = match read_update_form(state.blob.as_ref(), &mut multipart).await {
        Ok(form) => form,
        Err((staged, err)) => {
            if let Some(name) = staged
                && let Err(e) = state.blob.delete(&name).await
            {
                tracing::warn!(error = %e, blob = %name, "Failed to remove staged image");
            }
            return Err(err);
        }
    };

    let use_case = UpdateAccountUseCase::new(
        state.repo.clone(),
        state.blob.clone(),
        state.signer.clone(),
        state.config.clone(),
    );

    let input = UpdateAccountInput {
        authenticated_email: claims.email,
        new_name: form.new_name,
        new_email: form.new_email,
        old_password: form.old_password,
        new_password: form.new_password,
        staged_avatar: form.staged_avatar,
    };

    let output = use_case.execute(input).await?;

    Ok(Json(UpdateResponse {
        token: output.token,
    }))
}
