//! Statistics response types

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Book identified by title and publication year
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct BookYear {
    pub title: String,
    pub year: i32,
}

/// Book identified by title and page count
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct BookPages {
    pub title: String,
    pub pages: i32,
}

/// Derived figures over all books of one author
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthorStats {
    pub author_id: Uuid,
    pub author_name: String,
    pub total_books: i64,
    /// Earliest book with a known publication year
    pub first_book: Option<BookYear>,
    /// Most recent book with a known publication year
    pub latest_book: Option<BookYear>,
    /// Rounded mean over books with a known page count, 0 when there are none
    pub average_pages: i64,
    /// Distinct genres, in first-seen order
    pub genres: Vec<String>,
    pub longest_book: Option<BookPages>,
    pub shortest_book: Option<BookPages>,
}

/// Catalog-wide totals shown on the dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CatalogOverview {
    pub total_authors: i64,
    pub total_books: i64,
    /// Rounded to one decimal place
    pub average_books_per_author: f64,
}
