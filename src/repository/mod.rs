//! Repository layer for database operations

pub mod authors;
pub mod books;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{
        Author, AuthorInput, AuthorWithCount, Book, BookFilter, BookInput, BookSearch,
        BookWithAuthor, SortOrder,
    },
};

/// Record store the services run against.
///
/// Unique lookups return `None` for missing rows; turning that into a
/// not-found error is up to the caller.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Round-trip to the database
    async fn ping(&self) -> AppResult<()>;

    async fn list_authors(&self) -> AppResult<Vec<AuthorWithCount>>;
    async fn find_author(&self, id: Uuid) -> AppResult<Option<AuthorWithCount>>;
    async fn author_email_exists(&self, email: &str, exclude_id: Option<Uuid>) -> AppResult<bool>;
    async fn create_author(&self, input: &AuthorInput) -> AppResult<Author>;
    async fn update_author(&self, id: Uuid, input: &AuthorInput) -> AppResult<Option<Author>>;
    /// Removes the author, and their books first when `cascade` is set.
    /// Returns whether a row was deleted.
    async fn delete_author(&self, id: Uuid, cascade: bool) -> AppResult<bool>;
    async fn count_authors(&self) -> AppResult<i64>;

    /// All books of one author ordered by published year, then creation time
    async fn books_by_author(&self, author_id: Uuid, order: SortOrder) -> AppResult<Vec<Book>>;
    async fn find_book(&self, id: Uuid) -> AppResult<Option<BookWithAuthor>>;
    async fn create_book(&self, input: &BookInput) -> AppResult<Book>;
    async fn update_book(&self, id: Uuid, input: &BookInput) -> AppResult<Option<Book>>;
    async fn delete_book(&self, id: Uuid) -> AppResult<bool>;
    async fn count_books(&self, filter: &BookFilter) -> AppResult<i64>;
    /// One page of matching books, sorted and paged as requested
    async fn search_books(&self, search: &BookSearch) -> AppResult<Vec<BookWithAuthor>>;
}

/// PostgreSQL-backed store holding the connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub authors: authors::AuthorsRepository,
    pub books: books::BooksRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            authors: authors::AuthorsRepository::new(pool.clone()),
            books: books::BooksRepository::new(pool.clone()),
            pool,
        }
    }
}

#[async_trait]
impl CatalogStore for Repository {
    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn list_authors(&self) -> AppResult<Vec<AuthorWithCount>> {
        self.authors.list().await
    }

    async fn find_author(&self, id: Uuid) -> AppResult<Option<AuthorWithCount>> {
        self.authors.get_by_id(id).await
    }

    async fn author_email_exists(&self, email: &str, exclude_id: Option<Uuid>) -> AppResult<bool> {
        self.authors.email_exists(email, exclude_id).await
    }

    async fn create_author(&self, input: &AuthorInput) -> AppResult<Author> {
        self.authors.create(input).await
    }

    async fn update_author(&self, id: Uuid, input: &AuthorInput) -> AppResult<Option<Author>> {
        self.authors.update(id, input).await
    }

    async fn delete_author(&self, id: Uuid, cascade: bool) -> AppResult<bool> {
        self.authors.delete(id, cascade).await
    }

    async fn count_authors(&self) -> AppResult<i64> {
        self.authors.count().await
    }

    async fn books_by_author(&self, author_id: Uuid, order: SortOrder) -> AppResult<Vec<Book>> {
        self.books.list_by_author(author_id, order).await
    }

    async fn find_book(&self, id: Uuid) -> AppResult<Option<BookWithAuthor>> {
        self.books.get_by_id(id).await
    }

    async fn create_book(&self, input: &BookInput) -> AppResult<Book> {
        self.books.create(input).await
    }

    async fn update_book(&self, id: Uuid, input: &BookInput) -> AppResult<Option<Book>> {
        self.books.update(id, input).await
    }

    async fn delete_book(&self, id: Uuid) -> AppResult<bool> {
        self.books.delete(id).await
    }

    async fn count_books(&self, filter: &BookFilter) -> AppResult<i64> {
        self.books.count(filter).await
    }

    async fn search_books(&self, search: &BookSearch) -> AppResult<Vec<BookWithAuthor>> {
        self.books.search(search).await
    }
}
