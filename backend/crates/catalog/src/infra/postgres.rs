//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use kernel::id::{AccountId, BookId};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::book::{Book, BookSummary, PopulatedBook, SellerSummary};
use crate::domain::repository::{AccountLookup, BookRepository, FavouriteRepository};
use crate::domain::value_object::condition::Condition;
use crate::error::{CatalogError, CatalogResult};

/// PostgreSQL-backed catalog repository
///
/// One type implements books, favourites, and the account lookup; they
/// share the pool and live in the same database.
#[derive(Clone)]
pub struct PgCatalogRepository {
    pool: PgPool,
}

impl PgCatalogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Map a favourites primary-key violation to the domain error
fn map_membership_conflict(e: sqlx::Error) -> CatalogError {
    if let sqlx::Error::Database(ref db) = e
        && db.code().as_deref() == Some("23505")
    {
        return CatalogError::AlreadyExists;
    }
    CatalogError::Database(e)
}

// ============================================================================
// Book Repository Implementation
// ============================================================================

impl BookRepository for PgCatalogRepository {
    async fn create(&self, book: &Book) -> CatalogResult<()> {
        sqlx::query(
            r#"
            INSERT INTO books (
                book_id,
                title,
                isbn,
                author,
                price,
                year_published,
                condition,
                description,
                image_name,
                seller_id,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(book.book_id.as_uuid())
        .bind(&book.title)
        .bind(&book.isbn)
        .bind(&book.author)
        .bind(book.price)
        .bind(book.year_published)
        .bind(book.condition.as_str())
        .bind(&book.description)
        .bind(&book.image_name)
        .bind(book.seller_id.as_uuid())
        .bind(book.created_at)
        .bind(book.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, book_id: &BookId) -> CatalogResult<Option<Book>> {
        let row = sqlx::query_as::<_, BookRow>(
            r#"
            SELECT
                book_id,
                title,
                isbn,
                author,
                price,
                year_published,
                condition,
                description,
                image_name,
                seller_id,
                created_at,
                updated_at
            FROM books
            WHERE book_id = $1
            "#,
        )
        .bind(book_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_book()).transpose()
    }

    async fn find_with_seller(&self, book_id: &BookId) -> CatalogResult<Option<PopulatedBook>> {
        let row = sqlx::query_as::<_, PopulatedBookRow>(
            r#"
            SELECT
                b.book_id,
                b.title,
                b.isbn,
                b.author,
                b.price,
                b.year_published,
                b.condition,
                b.description,
                b.image_name,
                b.seller_id,
                b.created_at,
                b.updated_at,
                a.name AS seller_name,
                a.email AS seller_email
            FROM books b
            JOIN accounts a ON a.account_id = b.seller_id
            WHERE b.book_id = $1
            "#,
        )
        .bind(book_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_populated()).transpose()
    }

    async fn exists(&self, book_id: &BookId) -> CatalogResult<bool> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM books WHERE book_id = $1)")
                .bind(book_id.as_uuid())
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }
}

// ============================================================================
// Favourite Repository Implementation
// ============================================================================

impl FavouriteRepository for PgCatalogRepository {
    async fn add(&self, account_id: &AccountId, book_id: &BookId) -> CatalogResult<()> {
        sqlx::query("INSERT INTO favourites (account_id, book_id) VALUES ($1, $2)")
            .bind(account_id.as_uuid())
            .bind(book_id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(map_membership_conflict)?;

        Ok(())
    }

    async fn remove(&self, account_id: &AccountId, book_id: &BookId) -> CatalogResult<bool> {
        let affected =
            sqlx::query("DELETE FROM favourites WHERE account_id = $1 AND book_id = $2")
                .bind(account_id.as_uuid())
                .bind(book_id.as_uuid())
                .execute(&self.pool)
                .await?
                .rows_affected();

        Ok(affected > 0)
    }

    async fn contains(&self, account_id: &AccountId, book_id: &BookId) -> CatalogResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM favourites WHERE account_id = $1 AND book_id = $2)",
        )
        .bind(account_id.as_uuid())
        .bind(book_id.as_uuid())
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn list(&self, account_id: &AccountId) -> CatalogResult<Vec<BookSummary>> {
        let rows = sqlx::query_as::<_, BookSummaryRow>(
            r#"
            SELECT
                b.book_id,
                b.title,
                b.isbn,
                b.price,
                b.condition,
                b.image_name
            FROM favourites f
            JOIN books b ON b.book_id = f.book_id
            WHERE f.account_id = $1
            "#,
        )
        .bind(account_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(|r| r.into_summary()).collect()
    }
}

// ============================================================================
// Account Lookup Implementation
// ============================================================================

impl AccountLookup for PgCatalogRepository {
    async fn account_id_by_email(&self, email: &str) -> CatalogResult<Option<AccountId>> {
        let id =
            sqlx::query_scalar::<_, Uuid>("SELECT account_id FROM accounts WHERE email = $1")
                .bind(email)
                .fetch_optional(&self.pool)
                .await?;

        Ok(id.map(AccountId::from_uuid))
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct BookRow {
    book_id: Uuid,
    title: String,
    isbn: String,
    author: String,
    price: f64,
    year_published: i32,
    condition: String,
    description: String,
    image_name: String,
    seller_id: Uuid,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl BookRow {
    fn into_book(self) -> CatalogResult<Book> {
        let condition = Condition::from_db(&self.condition)
            .map_err(|e| CatalogError::Internal(format!("Invalid condition: {}", e)))?;

        Ok(Book {
            book_id: BookId::from_uuid(self.book_id),
            title: self.title,
            isbn: self.isbn,
            author: self.author,
            price: self.price,
            year_published: self.year_published,
            condition,
            description: self.description,
            image_name: self.image_name,
            seller_id: AccountId::from_uuid(self.seller_id),
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct PopulatedBookRow {
    #[sqlx(flatten)]
    book: BookRow,
    seller_name: String,
    seller_email: String,
}

impl PopulatedBookRow {
    fn into_populated(self) -> CatalogResult<PopulatedBook> {
        Ok(PopulatedBook {
            book: self.book.into_book()?,
            seller: SellerSummary {
                name: self.seller_name,
                email: self.seller_email,
            },
        })
    }
}

#[derive(sqlx::FromRow)]
struct BookSummaryRow {
    book_id: Uuid,
    title: String,
    isbn: String,
    price: f64,
    condition: String,
    image_name: String,
}

impl BookSummaryRow {
    fn into_summary(self) -> CatalogResult<BookSummary> {
        let condition = Condition::from_db(&self.condition)
            .map_err(|e| CatalogError::Internal(format!("Invalid condition: {}", e)))?;

        Ok(BookSummary {
            book_id: BookId::from_uuid(self.book_id),
            title: self.title,
            isbn: self.isbn,
            price: self.price,
            condition,
            image_name: self.image_name,
        })
    }
}
