//! Favourites Use Case
//!
//! Set semantics over (account, book) pairs: a duplicate add and a
//! no-op remove are client errors, not silent successes. Identifiers
//! are parsed before any store access.

use std::sync::Arc;

use kernel::id::{AccountId, BookId};

use crate::domain::entity::book::BookSummary;
use crate::domain::repository::{AccountLookup, BookRepository, FavouriteRepository};
use crate::error::{CatalogError, CatalogResult};

/// Favourites use case
pub struct FavouritesUseCase<R>
where
    R: BookRepository + FavouriteRepository + AccountLookup,
{
    repo: Arc<R>,
}

impl<R> FavouritesUseCase<R>
where
    R: BookRepository + FavouriteRepository + AccountLookup,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Add a book to the caller's favourites
    pub async fn add(&self, email: &str, book_id: Option<&str>) -> CatalogResult<()> {
        let account_id = self.resolve_account(email).await?;
        let book_id = parse_book_id(book_id)?;

        if !self.repo.exists(&book_id).await? {
            return Err(CatalogError::NotFound);
        }

        if self.repo.contains(&account_id, &book_id).await? {
            return Err(CatalogError::AlreadyExists);
        }

        // The membership check is not atomic with the insert; the
        // composite primary key resolves the race in the store
        self.repo.add(&account_id, &book_id).await
    }

    /// Remove a book from the caller's favourites
    pub async fn remove(&self, email: &str, book_id: Option<&str>) -> CatalogResult<()> {
        let account_id = self.resolve_account(email).await?;
        let book_id = parse_book_id(book_id)?;

        if !self.repo.remove(&account_id, &book_id).await? {
            // Removing a non-member is reported, not ignored
            return Err(CatalogError::InvalidParameters);
        }

        Ok(())
    }

    /// Membership check, never mutates
    pub async fn contains(&self, email: &str, book_id: Option<&str>) -> CatalogResult<bool> {
        let account_id = self.resolve_account(email).await?;
        let book_id = parse_book_id(book_id)?;

        self.repo.contains(&account_id, &book_id).await
    }

    /// All favourites of the caller, populated
    pub async fn list(&self, email: &str) -> CatalogResult<Vec<BookSummary>> {
        let account_id = self.resolve_account(email).await?;
        self.repo.list(&account_id).await
    }

    async fn resolve_account(&self, email: &str) -> CatalogResult<AccountId> {
        self.repo
            .account_id_by_email(email)
            .await?
            .ok_or(CatalogError::NotFound)
    }
}

/// Reject malformed identifiers before any lookup
fn parse_book_id(raw: Option<&str>) -> CatalogResult<BookId> {
    raw.ok_or(CatalogError::InvalidParameters)?
        .parse()
        .map_err(|_| CatalogError::InvalidParameters)
}
