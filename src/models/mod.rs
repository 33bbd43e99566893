//! Data models for the catalog

pub mod author;
pub mod book;
pub mod search;
pub mod stats;

// Re-export commonly used types
pub use author::{Author, AuthorInput, AuthorSummary, AuthorWithCount};
pub use book::{Book, BookInput, BookSearchQuery, BookWithAuthor, SortField, SortOrder};
pub use search::{BookFilter, BookSearch, Pagination};
pub use stats::{AuthorStats, BookPages, BookYear, CatalogOverview};
