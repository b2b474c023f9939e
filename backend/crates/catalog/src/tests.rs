//! Unit tests for the catalog crate
//!
//! Use cases run against in-memory fakes. The fake favourites set
//! enforces pair uniqueness on insert, the same guarantee the composite
//! primary key gives the PostgreSQL implementation.

#[cfg(test)]
mod support {
    use std::collections::{HashMap, HashSet};
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use kernel::id::{AccountId, BookId};
    use platform::blob::{BlobError, BlobStore};

    use crate::domain::entity::book::{Book, BookSummary, PopulatedBook, SellerSummary};
    use crate::domain::repository::{AccountLookup, BookRepository, FavouriteRepository};
    use crate::error::{CatalogError, CatalogResult};

    /// In-memory catalog repository
    #[derive(Default)]
    pub struct MemCatalogRepo {
        accounts: Mutex<Vec<(AccountId, String, String)>>,
        books: Mutex<Vec<Book>>,
        favourites: Mutex<HashSet<(AccountId, BookId)>>,
    }

    impl MemCatalogRepo {
        pub fn seed_account(&self, name: &str, email: &str) -> AccountId {
            let id = AccountId::new();
            self.accounts
                .lock()
                .unwrap()
                .push((id, name.to_string(), email.to_string()));
            id
        }

        pub fn seed_book(&self, book: Book) -> BookId {
            let id = book.book_id;
            self.books.lock().unwrap().push(book);
            id
        }

        pub fn book_count(&self) -> usize {
            self.books.lock().unwrap().len()
        }
    }

    impl BookRepository for MemCatalogRepo {
        async fn create(&self, book: &Book) -> CatalogResult<()> {
            self.books.lock().unwrap().push(book.clone());
            Ok(())
        }

        async fn find_by_id(&self, book_id: &BookId) -> CatalogResult<Option<Book>> {
            let books = self.books.lock().unwrap();
            Ok(books.iter().find(|b| &b.book_id == book_id).cloned())
        }

        async fn find_with_seller(
            &self,
            book_id: &BookId,
        ) -> CatalogResult<Option<PopulatedBook>> {
            let books = self.books.lock().unwrap();
            let Some(book) = books.iter().find(|b| &b.book_id == book_id).cloned() else {
                return Ok(None);
            };

            let accounts = self.accounts.lock().unwrap();
            let seller = accounts
                .iter()
                .find(|(id, _, _)| id == &book.seller_id)
                .map(|(_, name, email)| SellerSummary {
                    name: name.clone(),
                    email: email.clone(),
                })
                .ok_or_else(|| CatalogError::Internal("dangling seller".to_string()))?;

            Ok(Some(PopulatedBook { book, seller }))
        }

        async fn exists(&self, book_id: &BookId) -> CatalogResult<bool> {
            let books = self.books.lock().unwrap();
            Ok(books.iter().any(|b| &b.book_id == book_id))
        }
    }

    impl FavouriteRepository for MemCatalogRepo {
        async fn add(&self, account_id: &AccountId, book_id: &BookId) -> CatalogResult<()> {
            let mut favourites = self.favourites.lock().unwrap();
            if !favourites.insert((*account_id, *book_id)) {
                return Err(CatalogError::AlreadyExists);
            }
            Ok(())
        }

        async fn remove(&self, account_id: &AccountId, book_id: &BookId) -> CatalogResult<bool> {
            let mut favourites = self.favourites.lock().unwrap();
            Ok(favourites.remove(&(*account_id, *book_id)))
        }

        async fn contains(&self, account_id: &AccountId, book_id: &BookId) -> CatalogResult<bool> {
            let favourites = self.favourites.lock().unwrap();
            Ok(favourites.contains(&(*account_id, *book_id)))
        }

        async fn list(&self, account_id: &AccountId) -> CatalogResult<Vec<BookSummary>> {
            let favourites = self.favourites.lock().unwrap();
            let books = self.books.lock().unwrap();

            Ok(books
                .iter()
                .filter(|b| favourites.contains(&(*account_id, b.book_id)))
                .map(|b| BookSummary {
                    book_id: b.book_id,
                    title: b.title.clone(),
                    isbn: b.isbn.clone(),
                    price: b.price,
                    condition: b.condition,
                    image_name: b.image_name.clone(),
                })
                .collect())
        }
    }

    impl AccountLookup for MemCatalogRepo {
        async fn account_id_by_email(&self, email: &str) -> CatalogResult<Option<AccountId>> {
            let accounts = self.accounts.lock().unwrap();
            Ok(accounts
                .iter()
                .find(|(_, _, e)| e == email)
                .map(|(id, _, _)| *id))
        }
    }

    /// Repository whose membership pre-check always misses, modelling
    /// the window between check and insert
    pub struct BlindContainsRepo(pub MemCatalogRepo);

    impl BookRepository for BlindContainsRepo {
        async fn create(&self, book: &Book) -> CatalogResult<()> {
            self.0.create(book).await
        }

        async fn find_by_id(&self, book_id: &BookId) -> CatalogResult<Option<Book>> {
            self.0.find_by_id(book_id).await
        }

        async fn find_with_seller(
            &self,
            book_id: &BookId,
        ) -> CatalogResult<Option<PopulatedBook>> {
            self.0.find_with_seller(book_id).await
        }

        async fn exists(&self, book_id: &BookId) -> CatalogResult<bool> {
            self.0.exists(book_id).await
        }
    }

    impl FavouriteRepository for BlindContainsRepo {
        async fn add(&self, account_id: &AccountId, book_id: &BookId) -> CatalogResult<()> {
            self.0.add(account_id, book_id).await
        }

        async fn remove(&self, account_id: &AccountId, book_id: &BookId) -> CatalogResult<bool> {
            self.0.remove(account_id, book_id).await
        }

        async fn contains(
            &self,
            _account_id: &AccountId,
            _book_id: &BookId,
        ) -> CatalogResult<bool> {
            Ok(false)
        }

        async fn list(&self, account_id: &AccountId) -> CatalogResult<Vec<BookSummary>> {
            self.0.list(account_id).await
        }
    }

    impl AccountLookup for BlindContainsRepo {
        async fn account_id_by_email(&self, email: &str) -> CatalogResult<Option<AccountId>> {
            self.0.account_id_by_email(email).await
        }
    }

    /// In-memory blob store
    #[derive(Default)]
    pub struct MemBlobStore {
        files: Mutex<HashMap<String, Vec<u8>>>,
        counter: AtomicUsize,
    }

    impl MemBlobStore {
        pub fn contains(&self, name: &str) -> bool {
            self.files.lock().unwrap().contains_key(name)
        }
    }

    impl BlobStore for MemBlobStore {
        async fn store(&self, extension: &str, bytes: &[u8]) -> Result<String, BlobError> {
            let n = self.counter.fetch_add(1, Ordering::SeqCst);
            let name = format!("img{}.{}", n, extension);
            self.files.lock().unwrap().insert(name.clone(), bytes.to_vec());
            Ok(name)
        }

        async fn delete(&self, name: &str) -> Result<(), BlobError> {
            self.files
                .lock()
                .unwrap()
                .remove(name)
                .map(|_| ())
                .ok_or_else(|| BlobError::NotFound(name.to_string()))
        }

        async fn read(&self, name: &str) -> Result<Vec<u8>, BlobError> {
            self.files
                .lock()
                .unwrap()
                .get(name)
                .cloned()
                .ok_or_else(|| BlobError::NotFound(name.to_string()))
        }
    }

    /// Build a book entity directly, bypassing the add-book use case
    pub fn sample_book(seller_id: AccountId, title: &str) -> Book {
        use crate::domain::entity::book::NewBook;
        use crate::domain::value_object::condition::Condition;

        Book::new(
            seller_id,
            NewBook {
                title: title.to_string(),
                isbn: "9780000000001".to_string(),
                author: "Some Author".to_string(),
                price: 12.5,
                year_published: 1998,
                condition: Condition::Used,
                description: "A well-loved copy".to_string(),
                image_name: "cover.jpg".to_string(),
            },
        )
    }
}

#[cfg(test)]
mod favourites_tests {
    use std::sync::Arc;

    use super::support::{BlindContainsRepo, MemCatalogRepo, sample_book};
    use crate::application::favourites::FavouritesUseCase;
    use crate::error::CatalogError;

    #[tokio::test]
    async fn test_add_then_duplicate_add_fails() {
        let repo = MemCatalogRepo::default();
        let seller = repo.seed_account("Morgan", "morgan@example.com");
        let book_id = repo.seed_book(sample_book(seller, "Dune"));
        let use_case = FavouritesUseCase::new(Arc::new(repo));

        let id = book_id.to_string();
        use_case
            .add("morgan@example.com", Some(&id))
            .await
            .unwrap();

        let result = use_case.add("morgan@example.com", Some(&id)).await;
        assert!(matches!(result, Err(CatalogError::AlreadyExists)));
    }

    #[tokio::test]
    async fn test_remove_non_member_fails() {
        let repo = MemCatalogRepo::default();
        let seller = repo.seed_account("Morgan", "morgan@example.com");
        let book_id = repo.seed_book(sample_book(seller, "Dune"));
        let use_case = FavouritesUseCase::new(Arc::new(repo));

        let result = use_case
            .remove("morgan@example.com", Some(&book_id.to_string()))
            .await;

        assert!(matches!(result, Err(CatalogError::InvalidParameters)));
    }

    #[tokio::test]
    async fn test_add_remove_contains_roundtrip() {
        let repo = MemCatalogRepo::default();
        let seller = repo.seed_account("Morgan", "morgan@example.com");
        let book_id = repo.seed_book(sample_book(seller, "Dune"));
        let use_case = FavouritesUseCase::new(Arc::new(repo));

        let id = book_id.to_string();
        use_case.add("morgan@example.com", Some(&id)).await.unwrap();
        assert!(use_case.contains("morgan@example.com", Some(&id)).await.unwrap());

        use_case.remove("morgan@example.com", Some(&id)).await.unwrap();
        assert!(!use_case.contains("morgan@example.com", Some(&id)).await.unwrap());
    }

    #[tokio::test]
    async fn test_malformed_book_id_rejected() {
        let repo = MemCatalogRepo::default();
        repo.seed_account("Morgan", "morgan@example.com");
        let use_case = FavouritesUseCase::new(Arc::new(repo));

        for id in [Some("not-a-uuid"), Some(""), None] {
            let result = use_case.add("morgan@example.com", id).await;
            assert!(matches!(result, Err(CatalogError::InvalidParameters)));

            let result = use_case.remove("morgan@example.com", id).await;
            assert!(matches!(result, Err(CatalogError::InvalidParameters)));

            let result = use_case.contains("morgan@example.com", id).await;
            assert!(matches!(result, Err(CatalogError::InvalidParameters)));
        }
    }

    #[tokio::test]
    async fn test_add_unknown_book_not_found() {
        let repo = MemCatalogRepo::default();
        repo.seed_account("Morgan", "morgan@example.com");
        let use_case = FavouritesUseCase::new(Arc::new(repo));

        let unknown = kernel::id::BookId::new().to_string();
        let result = use_case.add("morgan@example.com", Some(&unknown)).await;

        assert!(matches!(result, Err(CatalogError::NotFound)));
    }

    #[tokio::test]
    async fn test_unknown_account_not_found() {
        let repo = MemCatalogRepo::default();
        let use_case = FavouritesUseCase::new(Arc::new(repo));

        let result = use_case.list("ghost@example.com").await;
        assert!(matches!(result, Err(CatalogError::NotFound)));
    }

    #[tokio::test]
    async fn test_list_returns_populated_summaries() {
        let repo = MemCatalogRepo::default();
        let seller = repo.seed_account("Morgan", "morgan@example.com");
        let first = repo.seed_book(sample_book(seller, "Dune"));
        let second = repo.seed_book(sample_book(seller, "Solaris"));
        repo.seed_book(sample_book(seller, "Not favourited"));
        let use_case = FavouritesUseCase::new(Arc::new(repo));

        use_case
            .add("morgan@example.com", Some(&first.to_string()))
            .await
            .unwrap();
        use_case
            .add("morgan@example.com", Some(&second.to_string()))
            .await
            .unwrap();

        let favourites = use_case.list("morgan@example.com").await.unwrap();
        assert_eq!(favourites.len(), 2);

        let titles: Vec<&str> = favourites.iter().map(|b| b.title.as_str()).collect();
        assert!(titles.contains(&"Dune"));
        assert!(titles.contains(&"Solaris"));
    }

    #[tokio::test]
    async fn concurrent_add_second_inserter_conflicts() {
        // The membership pre-check can miss a concurrent add; the
        // store-level pair uniqueness must still surface the conflict
        let inner = MemCatalogRepo::default();
        let seller = inner.seed_account("Morgan", "morgan@example.com");
        let book_id = inner.seed_book(sample_book(seller, "Dune"));
        let use_case = FavouritesUseCase::new(Arc::new(BlindContainsRepo(inner)));

        let id = book_id.to_string();
        use_case.add("morgan@example.com", Some(&id)).await.unwrap();

        let result = use_case.add("morgan@example.com", Some(&id)).await;
        assert!(matches!(result, Err(CatalogError::AlreadyExists)));
    }
}

#[cfg(test)]
mod books_tests {
    use std::sync::Arc;

    use platform::blob::BlobStore;

    use super::support::{MemBlobStore, MemCatalogRepo, sample_book};
    use crate::application::books::{AddBookInput, AddBookUseCase, GetBookUseCase};
    use crate::domain::value_object::condition::Condition;
    use crate::error::CatalogError;

    fn full_input(seller: &str, image: Option<String>) -> AddBookInput {
        AddBookInput {
            seller_email: seller.to_string(),
            title: Some("Dune".to_string()),
            isbn: Some("9780441172719".to_string()),
            author: Some("Frank Herbert".to_string()),
            price: Some("8.50".to_string()),
            year_published: Some("1965".to_string()),
            condition: Some("Used".to_string()),
            description: Some("Paperback, light shelf wear".to_string()),
            staged_image: image,
        }
    }

    #[tokio::test]
    async fn test_add_book_stores_listing() {
        let repo = Arc::new(MemCatalogRepo::default());
        repo.seed_account("Morgan", "morgan@example.com");
        let blob = Arc::new(MemBlobStore::default());
        let use_case = AddBookUseCase::new(repo.clone(), blob.clone());

        let staged = blob.store("jpg", b"cover").await.unwrap();
        let output = use_case
            .execute(full_input("morgan@example.com", Some(staged.clone())))
            .await
            .unwrap();

        let book_id: kernel::id::BookId = output.book_id.parse().unwrap();
        let get = GetBookUseCase::new(repo.clone());
        let populated = get.execute(&book_id.to_string()).await.unwrap();

        assert_eq!(populated.book.title, "Dune");
        assert_eq!(populated.book.condition, Condition::Used);
        assert_eq!(populated.book.image_name, staged);
        assert_eq!(populated.seller.email, "morgan@example.com");
        // The cover stays in the store on success
        assert!(blob.contains(&staged));
    }

    #[tokio::test]
    async fn test_add_book_missing_field_cleans_staged_image() {
        let repo = Arc::new(MemCatalogRepo::default());
        repo.seed_account("Morgan", "morgan@example.com");
        let blob = Arc::new(MemBlobStore::default());
        let use_case = AddBookUseCase::new(repo.clone(), blob.clone());

        let staged = blob.store("png", b"cover").await.unwrap();
        let input = AddBookInput {
            title: None,
            ..full_input("morgan@example.com", Some(staged.clone()))
        };

        let result = use_case.execute(input).await;

        assert!(matches!(result, Err(CatalogError::InvalidParameters)));
        assert!(!blob.contains(&staged));
        assert_eq!(repo.book_count(), 0);
    }

    #[tokio::test]
    async fn test_add_book_rejects_unparseable_fields() {
        let repo = Arc::new(MemCatalogRepo::default());
        repo.seed_account("Morgan", "morgan@example.com");
        let blob = Arc::new(MemBlobStore::default());
        let use_case = AddBookUseCase::new(repo.clone(), blob.clone());

        let staged = blob.store("jpg", b"cover").await.unwrap();
        let input = AddBookInput {
            price: Some("a lot".to_string()),
            ..full_input("morgan@example.com", Some(staged))
        };
        let result = use_case.execute(input).await;
        assert!(matches!(result, Err(CatalogError::InvalidParameters)));

        let staged = blob.store("jpg", b"cover").await.unwrap();
        let input = AddBookInput {
            condition: Some("Fair".to_string()),
            ..full_input("morgan@example.com", Some(staged))
        };
        let result = use_case.execute(input).await;
        assert!(matches!(result, Err(CatalogError::InvalidParameters)));

        let staged = blob.store("jpg", b"cover").await.unwrap();
        let input = AddBookInput {
            year_published: Some("19x5".to_string()),
            ..full_input("morgan@example.com", Some(staged))
        };
        let result = use_case.execute(input).await;
        assert!(matches!(result, Err(CatalogError::InvalidParameters)));

        assert_eq!(repo.book_count(), 0);
    }

    #[tokio::test]
    async fn test_add_book_unknown_seller_cleans_staged_image() {
        let repo = Arc::new(MemCatalogRepo::default());
        let blob = Arc::new(MemBlobStore::default());
        let use_case = AddBookUseCase::new(repo, blob.clone());

        let staged = blob.store("webp", b"cover").await.unwrap();
        let result = use_case
            .execute(full_input("ghost@example.com", Some(staged.clone())))
            .await;

        assert!(matches!(result, Err(CatalogError::NotFound)));
        assert!(!blob.contains(&staged));
    }

    #[tokio::test]
    async fn test_get_book_malformed_or_unknown_id_not_found() {
        let repo = Arc::new(MemCatalogRepo::default());
        let use_case = GetBookUseCase::new(repo);

        let result = use_case.execute("not-a-uuid").await;
        assert!(matches!(result, Err(CatalogError::NotFound)));

        let unknown = kernel::id::BookId::new().to_string();
        let result = use_case.execute(&unknown).await;
        assert!(matches!(result, Err(CatalogError::NotFound)));
    }

    #[tokio::test]
    async fn test_get_book_populates_seller() {
        let repo = Arc::new(MemCatalogRepo::default());
        let seller = repo.seed_account("Morgan", "morgan@example.com");
        let book_id = repo.seed_book(sample_book(seller, "Solaris"));
        let use_case = GetBookUseCase::new(repo);

        let populated = use_case.execute(&book_id.to_string()).await.unwrap();
        assert_eq!(populated.seller.name, "Morgan");
        assert_eq!(populated.seller.email, "morgan@example.com");
    }
}
