//! Books repository.
//!
//! Search queries are assembled with `QueryBuilder`; user text only ever
//! reaches the database as bound parameters.

use chrono::Utc;
use sqlx::{postgres::PgRow, Pool, Postgres, QueryBuilder, Row};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{AuthorSummary, Book, BookFilter, BookInput, BookSearch, BookWithAuthor, SortOrder},
};

const BOOK_COLUMNS: &str =
    "id, title, description, isbn, published_year, genre, pages, author_id, created_at, updated_at";

const BOOK_WITH_AUTHOR_SELECT: &str = r#"
    SELECT b.id, b.title, b.description, b.isbn, b.published_year, b.genre, b.pages,
           b.author_id, b.created_at, b.updated_at,
           a.name AS author_name, a.email AS author_email, a.nationality AS author_nationality
    FROM books b
    JOIN authors a ON a.id = b.author_id
"#;

/// Escape LIKE metacharacters and wrap the term for a substring match
pub fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Append the WHERE clause for `filter` (nothing when the filter is empty)
fn push_filters(builder: &mut QueryBuilder<'_, Postgres>, filter: &BookFilter) {
    let mut separator = " WHERE ";

    if let Some(ref title) = filter.title_contains {
        builder
            .push(separator)
            .push("b.title ILIKE ")
            .push_bind(contains_pattern(title));
        separator = " AND ";
    }

    if let Some(ref genre) = filter.genre {
        builder.push(separator).push("b.genre = ").push_bind(genre.clone());
        separator = " AND ";
    }

    if let Some(ref author_name) = filter.author_name_contains {
        builder
            .push(separator)
            .push("a.name ILIKE ")
            .push_bind(contains_pattern(author_name));
    }
}

/// `SELECT COUNT(*)` over the filtered, joined collection
pub fn count_query(filter: &BookFilter) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new(
        "SELECT COUNT(*) FROM books b JOIN authors a ON a.id = b.author_id",
    );
    push_filters(&mut builder, filter);
    builder
}

/// Page query: filters, ordering on the requested column with `id` as a
/// tie-breaker, then LIMIT/OFFSET
pub fn search_query(search: &BookSearch) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new(BOOK_WITH_AUTHOR_SELECT);
    push_filters(&mut builder, &search.filter);

    let direction = search.order.as_sql();
    builder
        .push(format!(
            " ORDER BY b.{} {}, b.id {}",
            search.sort_by.column(),
            direction,
            direction
        ))
        .push(" LIMIT ")
        .push_bind(search.limit)
        .push(" OFFSET ")
        .push_bind(search.offset());
    builder
}

fn book_with_author_from_row(row: &PgRow) -> Result<BookWithAuthor, sqlx::Error> {
    let author_id: Uuid = row.try_get("author_id")?;
    Ok(BookWithAuthor {
        book: Book {
            id: row.try_get("id")?,
            title: row.try_get("title")?,
            description: row.try_get("description")?,
            isbn: row.try_get("isbn")?,
            published_year: row.try_get("published_year")?,
            genre: row.try_get("genre")?,
            pages: row.try_get("pages")?,
            author_id,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        },
        author: AuthorSummary {
            id: author_id,
            name: row.try_get("author_name")?,
            email: row.try_get("author_email")?,
            nationality: row.try_get("author_nationality")?,
        },
    })
}

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// All books of an author ordered by published year (then creation time)
    pub async fn list_by_author(&self, author_id: Uuid, order: SortOrder) -> AppResult<Vec<Book>> {
        let direction = order.as_sql();
        let query = format!(
            "SELECT {} FROM books WHERE author_id = $1 ORDER BY published_year {}, created_at {}, id {}",
            BOOK_COLUMNS, direction, direction, direction
        );
        let books = sqlx::query_as::<_, Book>(&query)
            .bind(author_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(books)
    }

    /// Get a book with its author summary
    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Option<BookWithAuthor>> {
        let query = format!("{} WHERE b.id = $1", BOOK_WITH_AUTHOR_SELECT);
        let row = sqlx::query(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.as_ref().map(book_with_author_from_row).transpose()?)
    }

    /// Create a book
    pub async fn create(&self, data: &BookInput) -> AppResult<Book> {
        let query = format!(
            r#"
            INSERT INTO books (id, title, description, isbn, published_year, genre, pages, author_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $9)
            RETURNING {}
            "#,
            BOOK_COLUMNS
        );
        let book = sqlx::query_as::<_, Book>(&query)
            .bind(Uuid::new_v4())
            .bind(&data.title)
            .bind(&data.description)
            .bind(&data.isbn)
            .bind(data.published_year)
            .bind(&data.genre)
            .bind(data.pages)
            .bind(data.author_id)
            .bind(Utc::now())
            .fetch_one(&self.pool)
            .await?;
        Ok(book)
    }

    /// Replace every mutable field of a book
    pub async fn update(&self, id: Uuid, data: &BookInput) -> AppResult<Option<Book>> {
        let query = format!(
            r#"
            UPDATE books SET
                title = $1,
                description = $2,
                isbn = $3,
                published_year = $4,
                genre = $5,
                pages = $6,
                author_id = $7,
                updated_at = $8
            WHERE id = $9
            RETURNING {}
            "#,
            BOOK_COLUMNS
        );
        let book = sqlx::query_as::<_, Book>(&query)
            .bind(&data.title)
            .bind(&data.description)
            .bind(&data.isbn)
            .bind(data.published_year)
            .bind(&data.genre)
            .bind(data.pages)
            .bind(data.author_id)
            .bind(Utc::now())
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(book)
    }

    /// Delete a book, returning whether it existed
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let deleted = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();
        Ok(deleted > 0)
    }

    /// Count books matching a filter
    pub async fn count(&self, filter: &BookFilter) -> AppResult<i64> {
        let mut builder = count_query(filter);
        let total: i64 = builder
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await?;
        Ok(total)
    }

    /// Fetch one page of search results
    pub async fn search(&self, search: &BookSearch) -> AppResult<Vec<BookWithAuthor>> {
        let mut builder = search_query(search);
        let rows = builder.build().fetch_all(&self.pool).await?;
        let books = rows
            .iter()
            .map(book_with_author_from_row)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(books)
    }
}
