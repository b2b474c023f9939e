//! Data Transfer Objects

use serde::{Deserialize, Serialize};

use crate::domain::entity::book::{BookSummary, PopulatedBook};

/// POST /user/addFavourite request
#[derive(Debug, Deserialize)]
pub struct AddFavouriteRequest {
    #[serde(rename = "bookID")]
    pub book_id: Option<String>,
}

/// GET /user/checkIfFavourite query
#[derive(Debug, Deserialize)]
pub struct CheckFavouriteQuery {
    #[serde(rename = "bookID")]
    pub book_id: Option<String>,
}

/// GET /book/getOne query
#[derive(Debug, Deserialize)]
pub struct GetOneQuery {
    pub id: Option<String>,
}

/// Plain identifier-message response
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// POST /book/add response
#[derive(Debug, Serialize)]
pub struct BookCreatedResponse {
    pub message: &'static str,
    #[serde(rename = "bookID")]
    pub book_id: String,
}

/// Condensed listing in the favourites response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookSummaryDto {
    pub id: String,
    pub title: String,
    pub isbn: String,
    pub price: f64,
    pub condition: &'static str,
    pub image_name: String,
}

impl From<BookSummary> for BookSummaryDto {
    fn from(summary: BookSummary) -> Self {
        Self {
            id: summary.book_id.to_string(),
            title: summary.title,
            isbn: summary.isbn,
            price: summary.price,
            condition: summary.condition.as_str(),
            image_name: summary.image_name,
        }
    }
}

/// GET /user/allFavourites response
#[derive(Debug, Serialize)]
pub struct FavouritesResponse {
    pub favourites: Vec<BookSummaryDto>,
}

/// Seller subset exposed alongside a listing
#[derive(Debug, Serialize)]
pub struct SellerDto {
    pub name: String,
    pub email: String,
}

/// GET /book/getOne response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookDto {
    pub id: String,
    pub title: String,
    pub isbn: String,
    pub author: String,
    pub price: f64,
    pub year_published: i32,
    pub condition: &'static str,
    pub description: String,
    pub image_name: String,
    pub seller: SellerDto,
}

impl From<PopulatedBook> for BookDto {
    fn from(populated: PopulatedBook) -> Self {
        let book = populated.book;
        Self {
            id: book.book_id.to_string(),
            title: book.title,
            isbn: book.isbn,
            author: book.author,
            price: book.price,
            year_published: book.year_published,
            condition: book.condition.as_str(),
            description: book.description,
            image_name: book.image_name,
            seller: SellerDto {
                name: populated.seller.name,
                email: populated.seller.email,
            },
        }
    }
}
