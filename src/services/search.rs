//! Book search: turns raw query-string parameters into a validated
//! [`BookSearch`] and runs it against the store.

use std::sync::Arc;

use crate::{
    config::SearchConfig,
    error::{AppError, AppResult},
    models::{
        BookFilter, BookSearch, BookSearchQuery, BookWithAuthor, Pagination, SortField, SortOrder,
    },
    repository::CatalogStore,
};

fn parse_number(value: Option<&str>, name: &str, default: i64) -> AppResult<i64> {
    match value {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse::<i64>()
            .map_err(|_| AppError::Validation(format!("{} must be an integer", name))),
    }
}

/// Validate raw parameters and build the search description.
///
/// `limit` is capped at `max_limit` before the lower-bound check, so an
/// oversized limit is silently reduced while zero or negative ones fail.
pub fn build_search(query: &BookSearchQuery, limits: &SearchConfig) -> AppResult<BookSearch> {
    let page = parse_number(query.page.as_deref(), "page", 1)?;
    let limit = parse_number(query.limit.as_deref(), "limit", limits.default_limit)?
        .min(limits.max_limit);

    if page < 1 {
        return Err(AppError::Validation("page must be greater than 0".to_string()));
    }

    if limit < 1 {
        return Err(AppError::Validation("limit must be greater than 0".to_string()));
    }

    // (page - 1) * limit must fit the OFFSET bind
    let max_page = i64::MAX / limit;
    if page > max_page {
        return Err(AppError::Validation(format!(
            "page must not exceed {}",
            max_page
        )));
    }

    let sort_by = match query.sort_by.as_deref() {
        None => SortField::default(),
        Some(raw) => SortField::parse(raw).ok_or_else(|| {
            AppError::Validation(format!(
                "Invalid sort field '{}', expected one of: title, publishedYear, createdAt",
                raw
            ))
        })?,
    };

    let order = match query.order.as_deref() {
        None => SortOrder::default(),
        Some(raw) => SortOrder::parse(raw).ok_or_else(|| {
            AppError::Validation(format!("Invalid order '{}', expected asc or desc", raw))
        })?,
    };

    Ok(BookSearch {
        filter: BookFilter {
            title_contains: query.search.clone(),
            genre: query.genre.clone(),
            author_name_contains: query.author_name.clone(),
        },
        sort_by,
        order,
        page,
        limit,
    })
}

#[derive(Clone)]
pub struct SearchService {
    store: Arc<dyn CatalogStore>,
    limits: SearchConfig,
}

impl SearchService {
    pub fn new(store: Arc<dyn CatalogStore>, limits: SearchConfig) -> Self {
        Self { store, limits }
    }

    /// Search books and return one page plus its pagination metadata
    pub async fn search_books(
        &self,
        query: &BookSearchQuery,
    ) -> AppResult<(Vec<BookWithAuthor>, Pagination)> {
        let search = build_search(query, &self.limits)?;
        tracing::debug!("Book search: {:?}", search);

        let total = self.store.count_books(&search.filter).await?;
        let books = self.store.search_books(&search).await?;

        Ok((books, Pagination::new(search.page, search.limit, total)))
    }
}
