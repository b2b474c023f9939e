//! Auth Router

use axum::{
    Router, middleware,
    routing::{patch, post},
};
use std::sync::Arc;

use platform::bearer::{BearerState, require_bearer};
use platform::blob::{BlobStore, FsBlobStore};
use platform::email::EmailSender;
use platform::token::TokenSigner;

use crate::application::config::AuthConfig;
use crate::domain::repository::AccountRepository;
use crate::infra::postgres::PgAccountRepository;
use crate::presentation::handlers::{self, AuthAppState};

/// Create the Auth router with PostgreSQL repository
pub fn auth_router(
    repo: PgAccountRepository,
    blob: Arc<FsBlobStore>,
    email_sender: Arc<dyn EmailSender>,
    signer: Arc<TokenSigner>,
    config: AuthConfig,
) -> Router {
    auth_router_generic(Arc::new(repo), blob, email_sender, signer, config)
}

/// Create a generic Auth router for any repository and blob store
pub fn auth_router_generic<R, B>(
    repo: Arc<R>,
    blob: Arc<B>,
    email_sender: Arc<dyn EmailSender>,
    signer: Arc<TokenSigner>,
    config: AuthConfig,
) -> Router
where
    R: AccountRepository + Send + Sync + 'static,
    B: BlobStore + Send + Sync + 'static,
{
    let bearer = BearerState::new(signer.clone());
    let state = AuthAppState {
        repo,
        blob,
        email_sender,
        signer,
        config: Arc::new(config),
    };

    Router::new()
        .route("/register", post(handlers::register::<R, B>))
        .route("/login", post(handlers::login::<R, B>))
        .route(
            "/update",
            patch(handlers::update_account::<R, B>).route_layer(middleware::from_fn(
                move |req, next| require_bearer(bearer.clone(), req, next),
            )),
        )
        .with_state(state)
}
