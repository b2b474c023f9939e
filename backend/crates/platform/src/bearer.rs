//! Authorization Middleware
//!
//! Middleware for protecting routes behind a bearer token. Reads the
//! `Authorization` header, verifies the token via [`TokenSigner`], and
//! attaches the verified [`Claims`] to the request extensions. The attached
//! email is the canonical identity for everything downstream; the
//! middleware does NOT re-validate it against the credential store - that
//! is the handler's job.
//!
//! Rejection classes:
//! - absent token -> 400 `invalidParameters`
//! - present but failing verification -> 403 `invalidAuthorizationToken`

use axum::body::Body;
use axum::extract::FromRequestParts;
use axum::http::{Request, header::AUTHORIZATION, request::Parts};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use std::sync::Arc;

use kernel::error::app_error::AppError;
use kernel::messages;

use crate::token::{Claims, TokenSigner};

/// Middleware state
#[derive(Clone)]
pub struct BearerState {
    pub signer: Arc<TokenSigner>,
}

impl BearerState {
    pub fn new(signer: Arc<TokenSigner>) -> Self {
        Self { signer }
    }
}

/// Middleware that requires a valid bearer token
pub async fn require_bearer(
    state: BearerState,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, Response> {
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let Some(raw) = header else {
        tracing::debug!("Missing Authorization header");
        return Err(AppError::bad_request(messages::INVALID_PARAMETERS).into_response());
    };

    // Accept both a bare token and the "Bearer <token>" form
    let token = raw.strip_prefix("Bearer ").unwrap_or(raw);

    let claims = match state.signer.verify(token) {
        Ok(claims) => claims,
        Err(e) => {
            tracing::warn!(error = %e, "Bearer token rejected");
            return Err(
                AppError::forbidden(messages::INVALID_AUTHORIZATION_TOKEN).into_response(),
            );
        }
    };

    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}

/// Extractor for the verified identity attached by [`require_bearer`]
#[derive(Clone, Debug)]
pub struct Identity(pub Claims);

impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Claims>()
            .cloned()
            .map(Identity)
            .ok_or_else(|| {
                tracing::warn!("Identity requested on a route without bearer middleware");
                AppError::forbidden(messages::INVALID_AUTHORIZATION_TOKEN).into_response()
            })
    }
}
