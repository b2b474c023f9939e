//! Book Listing Use Cases
//!
//! Adding a listing follows the same image lifecycle as profile
//! updates: the handler stages the cover image before the use case
//! runs, and any failure removes the staged blob.

use std::sync::Arc;

use platform::blob::{BlobError, BlobStore};

use crate::domain::entity::book::{Book, NewBook, PopulatedBook};
use crate::domain::repository::{AccountLookup, BookRepository};
use crate::domain::value_object::condition::Condition;
use crate::error::{CatalogError, CatalogResult};

/// Add book input
///
/// Text fields arrive as raw multipart strings; parsing failures are
/// client errors.
pub struct AddBookInput {
    /// Email from the verified bearer token
    pub seller_email: String,
    pub title: Option<String>,
    pub isbn: Option<String>,
    pub author: Option<String>,
    pub price: Option<String>,
    pub year_published: Option<String>,
    pub condition: Option<String>,
    pub description: Option<String>,
    /// Blob name of the already-staged cover image
    pub staged_image: Option<String>,
}

/// Add book output
pub struct AddBookOutput {
    pub book_id: String,
}

/// Add book use case
pub struct AddBookUseCase<R, B>
where
    R: BookRepository + AccountLookup,
    B: BlobStore,
{
    repo: Arc<R>,
    blob: Arc<B>,
}

impl<R, B> AddBookUseCase<R, B>
where
    R: BookRepository + AccountLookup,
    B: BlobStore,
{
    pub fn new(repo: Arc<R>, blob: Arc<B>) -> Self {
        Self { repo, blob }
    }

    pub async fn execute(&self, input: AddBookInput) -> CatalogResult<AddBookOutput> {
        let staged = input.staged_image.clone();

        match self.apply(input).await {
            Ok(output) => Ok(output),
            Err(e) => {
                if let Some(name) = staged {
                    self.discard_blob(&name).await;
                }
                Err(e)
            }
        }
    }

    async fn apply(&self, input: AddBookInput) -> CatalogResult<AddBookOutput> {
        let (
            Some(title),
            Some(isbn),
            Some(author),
            Some(price),
            Some(year_published),
            Some(condition),
            Some(description),
            Some(image_name),
        ) = (
            input.title,
            input.isbn,
            input.author,
            input.price,
            input.year_published,
            input.condition,
            input.description,
            input.staged_image,
        )
        else {
            return Err(CatalogError::InvalidParameters);
        };

        let price: f64 = price
            .trim()
            .parse()
            .map_err(|_| CatalogError::InvalidParameters)?;
        let year_published: i32 = year_published
            .trim()
            .parse()
            .map_err(|_| CatalogError::InvalidParameters)?;
        let condition: Condition = condition
            .parse()
            .map_err(|_| CatalogError::InvalidParameters)?;

        if title.trim().is_empty() || author.trim().is_empty() {
            return Err(CatalogError::InvalidParameters);
        }

        // A verified token for an account that since vanished
        let seller_id = self
            .repo
            .account_id_by_email(&input.seller_email)
            .await?
            .ok_or(CatalogError::NotFound)?;

        let book = Book::new(
            seller_id,
            NewBook {
                title,
                isbn,
                author,
                price,
                year_published,
                condition,
                description,
                image_name,
            },
        );

        self.repo.create(&book).await?;

        tracing::info!(book_id = %book.book_id, seller_id = %book.seller_id, "Book listed");

        Ok(AddBookOutput {
            book_id: book.book_id.to_string(),
        })
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

/// Get book use case
pub struct GetBookUseCase<R>
where
    R: BookRepository,
{
    repo: Arc<R>,
}

impl<R> GetBookUseCase<R>
where
    R: BookRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Fetch a listing with its seller resolved
    ///
    /// A malformed id cannot reference a listing, so it reports the
    /// same way an unknown one does.
    pub async fn execute(&self, id: &str) -> CatalogResult<PopulatedBook> {
        let book_id = id.parse().map_err(|_| CatalogError::NotFound)?;

        self.repo
            .find_with_seller(&book_id)
            .await?
            .ok_or(CatalogError::NotFound)
    }
}
