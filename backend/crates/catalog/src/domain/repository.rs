//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use kernel::id::{AccountId, BookId};

use crate::domain::entity::book::{Book, BookSummary, PopulatedBook};
use crate::error::CatalogResult;

/// Book repository trait
#[trait_variant::make(BookRepository: Send)]
pub trait LocalBookRepository {
    /// Create a new listing
    async fn create(&self, book: &Book) -> CatalogResult<()>;

    /// Find a listing by id
    async fn find_by_id(&self, book_id: &BookId) -> CatalogResult<Option<Book>>;

    /// Find a listing with its seller resolved
    async fn find_with_seller(&self, book_id: &BookId) -> CatalogResult<Option<PopulatedBook>>;

    /// Check if a listing exists
    async fn exists(&self, book_id: &BookId) -> CatalogResult<bool>;
}

/// Favourite set repository trait
#[trait_variant::make(FavouriteRepository: Send)]
pub trait LocalFavouriteRepository {
    /// Add a membership
    ///
    /// Returns `CatalogError::AlreadyExists` when the pair is already
    /// a member (primary-key backstop for concurrent adds).
    async fn add(&self, account_id: &AccountId, book_id: &BookId) -> CatalogResult<()>;

    /// Remove a membership; `false` when it was not a member
    async fn remove(&self, account_id: &AccountId, book_id: &BookId) -> CatalogResult<bool>;

    /// Pure membership check
    async fn contains(&self, account_id: &AccountId, book_id: &BookId) -> CatalogResult<bool>;

    /// All favourites of an account, populated
    async fn list(&self, account_id: &AccountId) -> CatalogResult<Vec<BookSummary>>;
}

/// Resolves the token's email claim to an account
#[trait_variant::make(AccountLookup: Send)]
pub trait LocalAccountLookup {
    /// Account id for an email, exact match
    async fn account_id_by_email(&self, email: &str) -> CatalogResult<Option<AccountId>>;
}
