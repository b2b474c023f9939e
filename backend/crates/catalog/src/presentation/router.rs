//! Catalog Routers
//!
//! Two routers because the HTTP surface splits across prefixes: book
//! routes nest under `/book`, favourites nest under `/user` next to the
//! auth routes.

use axum::{
    Router, middleware,
    routing::{delete, get, post},
};
use std::sync::Arc;

use platform::bearer::{BearerState, require_bearer};
use platform::blob::{BlobStore, FsBlobStore};
use platform::token::TokenSigner;

use crate::domain::repository::{AccountLookup, BookRepository, FavouriteRepository};
use crate::infra::postgres::PgCatalogRepository;
use crate::presentation::handlers::{self, CatalogAppState};

/// Create the book router with PostgreSQL repository
pub fn book_router(
    repo: PgCatalogRepository,
    blob: Arc<FsBlobStore>,
    signer: Arc<TokenSigner>,
) -> Router {
    book_router_generic(Arc::new(repo), blob, signer)
}

/// Create a generic book router for any repository and blob store
pub fn book_router_generic<R, B>(
    repo: Arc<R>,
    blob: Arc<B>,
    signer: Arc<TokenSigner>,
) -> Router
where
    R: BookRepository + FavouriteRepository + AccountLookup + Send + Sync + 'static,
    B: BlobStore + Send + Sync + 'static,
{
    let bearer = BearerState::new(signer);
    let state = CatalogAppState { repo, blob };

    Router::new()
        .route(
            "/add",
            post(handlers::add_book::<R, B>).route_layer(middleware::from_fn(
                move |req, next| require_bearer(bearer.clone(), req, next),
            )),
        )
        .route("/getOne", get(handlers::get_one::<R, B>))
        .route("/image/{name}", get(handlers::serve_image::<R, B>))
        .with_state(state)
}

/// Create the favourites router with PostgreSQL repository
pub fn favourites_router(
    repo: PgCatalogRepository,
    blob: Arc<FsBlobStore>,
    signer: Arc<TokenSigner>,
) -> Router {
    favourites_router_generic(Arc::new(repo), blob, signer)
}

/// Create a generic favourites router; every route is bearer-protected
pub fn favourites_router_generic<R, B>(
    repo: Arc<R>,
    blob: Arc<B>,
    signer: Arc<TokenSigner>,
) -> Router
where
    R: BookRepository + FavouriteRepository + AccountLookup + Send + Sync + 'static,
    B: BlobStore + Send + Sync + 'static,
{
    let bearer = BearerState::new(signer);
    let state = CatalogAppState { repo, blob };

    Router::new()
        .route("/allFavourites", get(handlers::all_favourites::<R, B>))
        .route("/addFavourite", post(handlers::add_favourite::<R, B>))
        .route(
            "/removeFavourite/{bookID}",
            delete(handlers::remove_favourite::<R, B>),
        )
        .route(
            "/checkIfFavourite",
            get(handlers::check_if_favourite::<R, B>),
        )
        .layer(middleware::from_fn(move |req, next| {
            require_bearer(bearer.clone(), req, next)
        }))
        .with_state(state)
}
