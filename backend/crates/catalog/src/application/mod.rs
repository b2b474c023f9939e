//! Application Layer
//!
//! Use cases and application services.

pub mod books;
pub mod favourites;

// Re-exports
pub use books::{AddBookInput, AddBookOutput, AddBookUseCase, GetBookUseCase};
pub use favourites::FavouritesUseCase;
