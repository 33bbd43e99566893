//! Book model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, NoneAsEmptyString};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use super::author::{non_blank, AuthorSummary};

/// Full book record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub isbn: Option<String>,
    pub published_year: Option<i32>,
    pub genre: Option<String>,
    /// Page count
    pub pages: Option<i32>,
    pub author_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Book with the owning author's contact summary (search results, detail view)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BookWithAuthor {
    #[serde(flatten)]
    pub book: Book,
    pub author: AuthorSummary,
}

/// Create or replace a book
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookInput {
    #[validate(length(min = 1, max = 500, message = "Title must be between 1 and 500 characters"))]
    pub title: String,
    pub description: Option<String>,
    #[validate(length(max = 20, message = "ISBN must be at most 20 characters"))]
    pub isbn: Option<String>,
    #[validate(range(min = 0, max = 9999, message = "Published year must be between 0 and 9999"))]
    pub published_year: Option<i32>,
    #[validate(length(max = 100, message = "Genre must be at most 100 characters"))]
    pub genre: Option<String>,
    #[validate(range(min = 1, message = "Pages must be at least 1"))]
    pub pages: Option<i32>,
    pub author_id: Uuid,
}

impl BookInput {
    /// Trim text fields and turn blank optionals into `None`
    pub fn normalized(self) -> Self {
        Self {
            title: self.title.trim().to_string(),
            description: non_blank(self.description),
            isbn: non_blank(self.isbn),
            published_year: self.published_year,
            genre: non_blank(self.genre),
            pages: self.pages,
            author_id: self.author_id,
        }
    }
}

/// Raw query-string parameters of `GET /books/search`.
///
/// Everything arrives as text so that malformed numbers and unknown sort
/// keys are reported through the same error body as other validation
/// failures. Empty values count as absent.
#[serde_as]
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct BookSearchQuery {
    /// Case-insensitive substring of the title
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub search: Option<String>,
    /// Exact genre
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub genre: Option<String>,
    /// Case-insensitive substring of the author's name
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub author_name: Option<String>,
    /// Page number, 1-based (default 1)
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub page: Option<String>,
    /// Page size (default 10, capped at 50)
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub limit: Option<String>,
    /// `title`, `publishedYear` or `createdAt` (default)
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub sort_by: Option<String>,
    /// `asc` or `desc` (default)
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub order: Option<String>,
}

/// Book columns the search endpoint may sort on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    Title,
    PublishedYear,
    CreatedAt,
}

impl SortField {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "title" => Some(SortField::Title),
            "publishedYear" => Some(SortField::PublishedYear),
            "createdAt" => Some(SortField::CreatedAt),
            _ => None,
        }
    }

    /// Column name in the `books` table
    pub fn column(&self) -> &'static str {
        match self {
            SortField::Title => "title",
            SortField::PublishedYear => "published_year",
            SortField::CreatedAt => "created_at",
        }
    }
}

impl Default for SortField {
    fn default() -> Self {
        SortField::CreatedAt
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "asc" => Some(SortOrder::Asc),
            "desc" => Some(SortOrder::Desc),
            _ => None,
        }
    }

    pub fn as_sql(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

impl Default for SortOrder {
    fn default() -> Self {
        SortOrder::Desc
    }
}
