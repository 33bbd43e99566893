//! Statistics service: per-author figures and catalog totals

use std::sync::Arc;

use indexmap::IndexSet;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{AuthorStats, Book, BookFilter, BookPages, BookYear, CatalogOverview, SortOrder},
    repository::CatalogStore,
};

/// Compute the statistics of one author from their books.
///
/// `books` is expected in ascending published-year order as the store returns
/// it; that order decides which book wins a page-count tie (the earliest
/// one). Year extrema are computed on a stable sort, so they do not depend on
/// the input order.
pub fn compute_author_stats(author_id: Uuid, author_name: &str, books: &[Book]) -> AuthorStats {
    let mut dated: Vec<(&Book, i32)> = books
        .iter()
        .filter_map(|b| b.published_year.map(|year| (b, year)))
        .collect();
    dated.sort_by_key(|&(_, year)| year);

    let to_book_year = |&(book, year): &(&Book, i32)| BookYear {
        title: book.title.clone(),
        year,
    };
    let first_book = dated.first().map(to_book_year);
    let latest_book = dated.last().map(to_book_year);

    let paged: Vec<(&Book, i32)> = books
        .iter()
        .filter_map(|b| b.pages.map(|pages| (b, pages)))
        .collect();

    let average_pages = if paged.is_empty() {
        0
    } else {
        let sum: i64 = paged.iter().map(|&(_, pages)| i64::from(pages)).sum();
        (sum as f64 / paged.len() as f64).round() as i64
    };

    let genres: IndexSet<&str> = books.iter().filter_map(|b| b.genre.as_deref()).collect();

    let mut longest: Option<(&Book, i32)> = None;
    let mut shortest: Option<(&Book, i32)> = None;
    for &(book, pages) in &paged {
        if longest.map_or(true, |(_, max)| pages > max) {
            longest = Some((book, pages));
        }
        if shortest.map_or(true, |(_, min)| pages < min) {
            shortest = Some((book, pages));
        }
    }

    let to_book_pages = |(book, pages): (&Book, i32)| BookPages {
        title: book.title.clone(),
        pages,
    };

    AuthorStats {
        author_id,
        author_name: author_name.to_string(),
        total_books: books.len() as i64,
        first_book,
        latest_book,
        average_pages,
        genres: genres.into_iter().map(String::from).collect(),
        longest_book: longest.map(to_book_pages),
        shortest_book: shortest.map(to_book_pages),
    }
}

#[derive(Clone)]
pub struct StatsService {
    store: Arc<dyn CatalogStore>,
}

impl StatsService {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }

    /// Statistics for one author; not-found when the author does not exist
    pub async fn author_stats(&self, author_id: Uuid) -> AppResult<AuthorStats> {
        let author = self
            .store
            .find_author(author_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Author {} not found", author_id)))?
            .author;

        let books = self.store.books_by_author(author_id, SortOrder::Asc).await?;
        tracing::debug!("Computing stats for author {} over {} books", author_id, books.len());

        Ok(compute_author_stats(author.id, &author.name, &books))
    }

    /// Catalog-wide totals
    pub async fn overview(&self) -> AppResult<CatalogOverview> {
        let total_authors = self.store.count_authors().await?;
        let total_books = self.store.count_books(&BookFilter::default()).await?;

        let average_books_per_author = if total_authors > 0 {
            (total_books as f64 / total_authors as f64 * 10.0).round() / 10.0
        } else {
            0.0
        };

        Ok(CatalogOverview {
            total_authors,
            total_books,
            average_books_per_author,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::{Author, AuthorWithCount},
        repository::MockCatalogStore,
    };
    use chrono::Utc;

    fn book(title: &str, year: Option<i32>, pages: Option<i32>, genre: Option<&str>) -> Book {
        Book {
            id: Uuid::new_v4(),
            title: title.to_string(),
            description: None,
            isbn: None,
            published_year: year,
            genre: genre.map(String::from),
            pages,
            author_id: Uuid::nil(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn author(id: Uuid) -> AuthorWithCount {
        AuthorWithCount {
            author: Author {
                id,
                name: "Frank Herbert".into(),
                email: "frank@example.org".into(),
                bio: None,
                nationality: Some("US".into()),
                birth_year: Some(1920),
                created_at: Utc::now(),
                updated_at: Utc::now(),
            },
            book_count: 0,
        }
    }

    #[test]
    fn test_no_books() {
        let stats = compute_author_stats(Uuid::nil(), "Nobody", &[]);
        assert_eq!(stats.total_books, 0);
        assert_eq!(stats.average_pages, 0);
        assert!(stats.genres.is_empty());
        assert_eq!(stats.first_book, None);
        assert_eq!(stats.latest_book, None);
        assert_eq!(stats.longest_book, None);
        assert_eq!(stats.shortest_book, None);
    }

    #[test]
    fn test_average_pages_is_rounded() {
        let books = [
            book("A", None, Some(100), None),
            book("B", None, Some(300), None),
            book("C", None, Some(200), None),
        ];
        assert_eq!(compute_author_stats(Uuid::nil(), "x", &books).average_pages, 200);

        let books = [book("A", None, Some(100), None), book("B", None, Some(101), None)];
        assert_eq!(compute_author_stats(Uuid::nil(), "x", &books).average_pages, 101);
    }

    #[test]
    fn test_average_ignores_unknown_pages() {
        let books = [
            book("A", None, Some(120), None),
            book("B", None, None, None),
            book("C", None, Some(80), None),
        ];
        let stats = compute_author_stats(Uuid::nil(), "x", &books);
        assert_eq!(stats.total_books, 3);
        assert_eq!(stats.average_pages, 100);
    }

    #[test]
    fn test_first_and_latest_by_year() {
        let books = [
            book("Middle", Some(2001), None, None),
            book("Oldest", Some(1999), None, None),
            book("Undated", None, None, None),
            book("Newest", Some(2010), None, None),
        ];
        let stats = compute_author_stats(Uuid::nil(), "x", &books);
        assert_eq!(
            stats.first_book,
            Some(BookYear { title: "Oldest".into(), year: 1999 })
        );
        assert_eq!(
            stats.latest_book,
            Some(BookYear { title: "Newest".into(), year: 2010 })
        );
    }

    #[test]
    fn test_extrema_keep_earliest_on_tie() {
        let books = [
            book("First 300", Some(1990), Some(300), None),
            book("Short", Some(1991), Some(120), None),
            book("Second 300", Some(1992), Some(300), None),
            book("Also short", Some(1993), Some(120), None),
            book("Unknown", Some(1994), None, None),
        ];
        let stats = compute_author_stats(Uuid::nil(), "x", &books);
        assert_eq!(
            stats.longest_book,
            Some(BookPages { title: "First 300".into(), pages: 300 })
        );
        assert_eq!(
            stats.shortest_book,
            Some(BookPages { title: "Short".into(), pages: 120 })
        );
    }

    #[test]
    fn test_genres_are_distinct() {
        let books = [
            book("A", None, None, Some("Sci-Fi")),
            book("B", None, None, None),
            book("C", None, None, Some("Fantasy")),
            book("D", None, None, Some("Sci-Fi")),
        ];
        let stats = compute_author_stats(Uuid::nil(), "x", &books);
        assert_eq!(stats.genres, vec!["Sci-Fi".to_string(), "Fantasy".to_string()]);
    }

    #[tokio::test]
    async fn test_author_stats_not_found() {
        let mut store = MockCatalogStore::new();
        store.expect_find_author().returning(|_| Ok(None));
        store.expect_books_by_author().never();

        let service = StatsService::new(Arc::new(store));
        let err = service.author_stats(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_author_stats_reads_books_in_ascending_order() {
        let id = Uuid::new_v4();
        let mut store = MockCatalogStore::new();
        store
            .expect_find_author()
            .returning(move |id| Ok(Some(author(id))));
        store
            .expect_books_by_author()
            .withf(move |author_id, order| *author_id == id && *order == SortOrder::Asc)
            .returning(|_, _| {
                Ok(vec![
                    book("Dune", Some(1965), Some(412), Some("Sci-Fi")),
                    book("Children of Dune", Some(1976), Some(444), Some("Sci-Fi")),
                ])
            });

        let service = StatsService::new(Arc::new(store));
        let stats = service.author_stats(id).await.unwrap();

        assert_eq!(stats.author_id, id);
        assert_eq!(stats.author_name, "Frank Herbert");
        assert_eq!(stats.total_books, 2);
        assert_eq!(stats.average_pages, 428);
        assert_eq!(stats.genres, vec!["Sci-Fi".to_string()]);
    }

    #[tokio::test]
    async fn test_overview_average() {
        let mut store = MockCatalogStore::new();
        store.expect_count_authors().returning(|| Ok(3));
        store
            .expect_count_books()
            .withf(|filter| filter.is_empty())
            .returning(|_| Ok(10));

        let overview = StatsService::new(Arc::new(store)).overview().await.unwrap();
        assert_eq!(overview.total_authors, 3);
        assert_eq!(overview.total_books, 10);
        assert_eq!(overview.average_books_per_author, 3.3);
    }

    #[tokio::test]
    async fn test_overview_without_authors() {
        let mut store = MockCatalogStore::new();
        store.expect_count_authors().returning(|| Ok(0));
        store.expect_count_books().returning(|_| Ok(0));

        let overview = StatsService::new(Arc::new(store)).overview().await.unwrap();
        assert_eq!(overview.average_books_per_author, 0.0);
    }
}
