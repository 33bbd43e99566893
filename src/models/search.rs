//! Validated book search: filter, sort and paging description

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::book::{SortField, SortOrder};

/// Conditions applied to the book collection (joined with authors).
/// `None` fields impose no condition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookFilter {
    /// Case-insensitive substring of the title
    pub title_contains: Option<String>,
    /// Exact genre
    pub genre: Option<String>,
    /// Case-insensitive substring of the author's name
    pub author_name_contains: Option<String>,
}

impl BookFilter {
    pub fn is_empty(&self) -> bool {
        self.title_contains.is_none() && self.genre.is_none() && self.author_name_contains.is_none()
    }
}

/// A complete, already validated search request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookSearch {
    pub filter: BookFilter,
    pub sort_by: SortField,
    pub order: SortOrder,
    /// 1-based
    pub page: i64,
    /// Always at least 1
    pub limit: i64,
}

impl BookSearch {
    /// Rows to skip in the store, saturating instead of overflowing
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

/// Pagination metadata returned alongside a page of results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub total_pages: i64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl Pagination {
    /// `limit` must be positive.
    pub fn new(page: i64, limit: i64, total: i64) -> Self {
        // ceil(total / limit) without going through floats
        let total_pages = (total + limit - 1) / limit;
        Self {
            page,
            limit,
            total,
            total_pages,
            has_next: page < total_pages,
            has_prev: page > 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages_is_ceiling() {
        assert_eq!(Pagination::new(1, 10, 0).total_pages, 0);
        assert_eq!(Pagination::new(1, 10, 1).total_pages, 1);
        assert_eq!(Pagination::new(1, 10, 10).total_pages, 1);
        assert_eq!(Pagination::new(1, 10, 11).total_pages, 2);
        assert_eq!(Pagination::new(1, 50, 149).total_pages, 3);
    }

    #[test]
    fn test_has_next_and_prev() {
        let first = Pagination::new(1, 10, 25);
        assert!(first.has_next);
        assert!(!first.has_prev);

        let middle = Pagination::new(2, 10, 25);
        assert!(middle.has_next);
        assert!(middle.has_prev);

        let last = Pagination::new(3, 10, 25);
        assert!(!last.has_next);
        assert!(last.has_prev);

        // Past the end: no next page, but a previous one
        let beyond = Pagination::new(7, 10, 25);
        assert!(!beyond.has_next);
        assert!(beyond.has_prev);

        let empty = Pagination::new(1, 10, 0);
        assert!(!empty.has_next);
        assert!(!empty.has_prev);
    }

    #[test]
    fn test_offset() {
        let search = BookSearch {
            filter: BookFilter::default(),
            sort_by: SortField::CreatedAt,
            order: SortOrder::Desc,
            page: 3,
            limit: 20,
        };
        assert_eq!(search.offset(), 40);
    }

    #[test]
    fn test_pagination_serializes_camel_case() {
        let json = serde_json::to_value(Pagination::new(2, 10, 35)).unwrap();
        assert_eq!(json["totalPages"], 4);
        assert_eq!(json["hasNext"], true);
        assert_eq!(json["hasPrev"], true);
    }
}
