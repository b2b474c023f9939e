//! Book Entity and Read Models
//!
//! A listing always belongs to a seller account; the referential check
//! lives in the store (foreign key), not here.

use chrono::{DateTime, Utc};
use kernel::id::{AccountId, BookId};

use crate::domain::value_object::condition::Condition;

/// Book listing entity
#[derive(Debug, Clone)]
pub struct Book {
    /// Internal UUID identifier
    pub book_id: BookId,
    pub title: String,
    pub isbn: String,
    pub author: String,
    pub price: f64,
    pub year_published: i32,
    pub condition: Condition,
    pub description: String,
    /// Stored blob name of the cover image
    pub image_name: String,
    /// Owning seller account
    pub seller_id: AccountId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields the handler collects for a new listing
pub struct NewBook {
    pub title: String,
    pub isbn: String,
    pub author: String,
    pub price: f64,
    pub year_published: i32,
    pub condition: Condition,
    pub description: String,
    pub image_name: String,
}

impl Book {
    /// Create a new listing for a seller
    pub fn new(seller_id: AccountId, fields: NewBook) -> Self {
        let now = Utc::now();

        Self {
            book_id: BookId::new(),
            title: fields.title,
            isbn: fields.isbn,
            author: fields.author,
            price: fields.price,
            year_published: fields.year_published,
            condition: fields.condition,
            description: fields.description,
            image_name: fields.image_name,
            seller_id,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Seller fields exposed alongside a listing
#[derive(Debug, Clone)]
pub struct SellerSummary {
    pub name: String,
    pub email: String,
}

/// A listing with its seller resolved
#[derive(Debug, Clone)]
pub struct PopulatedBook {
    pub book: Book,
    pub seller: SellerSummary,
}

/// Condensed listing shown in favourites
#[derive(Debug, Clone)]
pub struct BookSummary {
    pub book_id: BookId,
    pub title: String,
    pub isbn: String,
    pub price: f64,
    pub condition: Condition,
    pub image_name: String,
}
