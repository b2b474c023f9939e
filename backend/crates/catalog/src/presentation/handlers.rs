//! HTTP Handlers

use axum::Json;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use std::sync::Arc;

use kernel::messages;
use platform::bearer::Identity;
use platform::blob::{BlobError, BlobStore};

use crate::application::books::{AddBookInput, AddBookUseCase, GetBookUseCase};
use crate::application::favourites::FavouritesUseCase;
use crate::domain::repository::{AccountLookup, BookRepository, FavouriteRepository};
use crate::error::{CatalogError, CatalogResult};
use crate::presentation::dto::{
    AddFavouriteRequest, BookCreatedResponse, BookDto, CheckFavouriteQuery, FavouritesResponse,
    GetOneQuery, MessageResponse,
};

/// Shared state for catalog handlers
pub struct CatalogAppState<R, B>
where
    R: BookRepository + FavouriteRepository + AccountLookup + Send + Sync + 'static,
    B: BlobStore + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub blob: Arc<B>,
}

// Manual impl so cloning never requires R: Clone or B: Clone
impl<R, B> Clone for CatalogAppState<R, B>
where
    R: BookRepository + FavouriteRepository + AccountLookup + Send + Sync + 'static,
    B: BlobStore + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            blob: self.blob.clone(),
        }
    }
}

// ============================================================================
// Books
// ============================================================================

/// Accumulated multipart form for a new listing
#[derive(Default)]
struct BookForm {
    title: Option<String>,
    isbn: Option<String>,
    author: Option<String>,
    price: Option<String>,
    year_published: Option<String>,
    condition: Option<String>,
    description: Option<String>,
    staged_image: Option<String>,
}

/// Read the multipart form, staging the cover image as it streams by.
///
/// On failure the caller receives whatever was already staged so it can
/// be removed; the image is validated BEFORE any bytes hit the store.
async fn read_book_form<B>(
    blob: &B,
    multipart: &mut Multipart,
) -> Result<BookForm, (Option<String>, CatalogError)>
where
    B: BlobStore + Send + Sync,
{
    let mut form = BookForm::default();

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(_) => return Err((form.staged_image.take(), CatalogError::InvalidParameters)),
        };

        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        if name == "image" {
            let content_type = field.content_type().unwrap_or("").to_string();
            let kind = match platform::upload::validate_content_type(&content_type) {
                Ok(kind) => kind,
                Err(e) => return Err((form.staged_image.take(), e.into())),
            };
            let bytes = match field.bytes().await {
                Ok(bytes) => bytes,
                Err(_) => {
                    return Err((form.staged_image.take(), CatalogError::InvalidParameters));
                }
            };
            match blob.store(kind.canonical_extension(), &bytes).await {
                Ok(stored) => form.staged_image = Some(stored),
                Err(e) => return Err((form.staged_image.take(), e.into())),
            }
            continue;
        }

        let value = match field.text().await {
            Ok(value) => value,
            Err(_) => return Err((form.staged_image.take(), CatalogError::InvalidParameters)),
        };

        match name.as_str() {
            "title" => form.title = Some(value),
            "isbn" => form.isbn = Some(value),
            "author" => form.author = Some(value),
            "price" => form.price = Some(value),
            "yearPublished" => form.year_published = Some(value),
            "condition" => form.condition = Some(value),
            "description" => form.description = Some(value),
            _ => {}
        }
    }

    Ok(form)
}

/// POST /book/add (bearer-protected)
pub async fn add_book<R, B>(
    State(state): State<CatalogAppState<R, B>>,
    Identity(claims): Identity,
    mut multipart: Multipart,
) -> CatalogResult<impl IntoResponse>
where
    R: BookRepository + FavouriteRepository + AccountLookup + Send + Sync + 'static,
    B: BlobStore + Send + Sync + 'static,
{
    let form = match read_book_form(state.blob.as_ref(), &mut multipart).await {
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

    let use_case = AddBookUseCase::new(state.repo.clone(), state.blob.clone());

    let input = AddBookInput {
        seller_email: claims.email,
        title: form.title,
        isbn: form.isbn,
        author: form.author,
        price: form.price,
        year_published: form.year_published,
        condition: form.condition,
        description: form.description,
        staged_image: form.staged_image,
    };

    let output = use_case.execute(input).await?;

    Ok((
        StatusCode::CREATED,
        Json(BookCreatedResponse {
            message: messages::CREATED_SUCCESSFULLY,
            book_id: output.book_id,
        }),
    ))
}

/// GET /book/getOne?id=
pub async fn get_one<R, B>(
    State(state): State<CatalogAppState<R, B>>,
    Query(query): Query<GetOneQuery>,
) -> CatalogResult<Json<BookDto>>
where
    R: BookRepository + FavouriteRepository + AccountLookup + Send + Sync + 'static,
    B: BlobStore + Send + Sync + 'static,
{
    let use_case = GetBookUseCase::new(state.repo.clone());
    let populated = use_case.execute(query.id.as_deref().unwrap_or("")).await?;

    Ok(Json(BookDto::from(populated)))
}

/// GET /book/image/{name}
pub async fn serve_image<R, B>(
    State(state): State<CatalogAppState<R, B>>,
    Path(name): Path<String>,
) -> CatalogResult<impl IntoResponse>
where
    R: BookRepository + FavouriteRepository + AccountLookup + Send + Sync + 'static,
    B: BlobStore + Send + Sync + 'static,
{
    let bytes = state.blob.read(&name).await.map_err(|e| match e {
        BlobError::NotFound(_) | BlobError::InvalidName(_) => CatalogError::NotFound,
        other => CatalogError::Blob(other),
    })?;

    let content_type = platform::upload::content_type_for_name(&name);

    Ok(([(header::CONTENT_TYPE, content_type)], bytes))
}

// ============================================================================
// Favourites
// ============================================================================

/// GET /user/allFavourites (bearer-protected)
pub async fn all_favourites<R, B>(
    State(state): State<CatalogAppState<R, B>>,
    Identity(claims): Identity,
) -> CatalogResult<Json<FavouritesResponse>>
where
    R: BookRepository + FavouriteRepository + AccountLookup + Send + Sync + 'static,
    B: BlobStore + Send + Sync + 'static,
{
    let use_case = FavouritesUseCase::new(state.repo.clone());
    let favourites = use_case.list(&claims.email).await?;

    Ok(Json(FavouritesResponse {
        favourites: favourites.into_iter().map(Into::into).collect(),
    }))
}

/// POST /user/addFavourite (bearer-protected)
pub async fn add_favourite<R, B>(
    State(state): State<CatalogAppState<R, B>>,
    Identity(claims): Identity,
    Json(req): Json<AddFavouriteRequest>,
) -> CatalogResult<Json<MessageResponse>>
where
    R: BookRepository + FavouriteRepository + AccountLookup + Send + Sync + 'static,
    B: BlobStore + Send + Sync + 'static,
{
    let use_case = FavouritesUseCase::new(state.repo.clone());
    use_case.add(&claims.email, req.book_id.as_deref()).await?;

    Ok(Json(MessageResponse {
        message: messages::ADDED_SUCCESSFULLY,
    }))
}

/// DELETE /user/removeFavourite/{bookID} (bearer-protected)
pub async fn remove_favourite<R, B>(
    State(state): State<CatalogAppState<R, B>>,
    Identity(claims): Identity,
    Path(book_id): Path<String>,
) -> CatalogResult<Json<MessageResponse>>
where
    R: BookRepository + FavouriteRepository + AccountLookup + Send + Sync + 'static,
    B: BlobStore + Send + Sync + 'static,
{
    let use_case = FavouritesUseCase::new(state.repo.clone());
    use_case.remove(&claims.email, Some(&book_id)).await?;

    Ok(Json(MessageResponse {
        message: messages::REMOVED_SUCCESSFULLY,
    }))
}

/// GET /user/checkIfFavourite?bookID= (bearer-protected)
pub async fn check_if_favourite<R, B>(
    State(state): State<CatalogAppState<R, B>>,
    Identity(claims): Identity,
    Query(query): Query<CheckFavouriteQuery>,
) -> CatalogResult<Json<MessageResponse>>
where
    R: BookRepository + FavouriteRepository + AccountLookup + Send + Sync + 'static,
    B: BlobStore + Send + Sync + 'static,
{
    let use_case = FavouritesUseCase::new(state.repo.clone());
    let member = use_case
        .contains(&claims.email, query.book_id.as_deref())
        .await?;

    Ok(Json(MessageResponse {
        message: if member {
            messages::IS_FAVOURITE
        } else {
            messages::IS_NOT_FAVOURITE
        },
    }))
}
