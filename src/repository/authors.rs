//! Authors repository

use chrono::Utc;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{Author, AuthorInput, AuthorWithCount},
};

fn duplicate_email(email: &str) -> String {
    format!("An author with email {} already exists", email)
}

const AUTHOR_WITH_COUNT_SELECT: &str = r#"
    SELECT a.id, a.name, a.email, a.bio, a.nationality, a.birth_year,
           a.created_at, a.updated_at,
           (SELECT COUNT(*) FROM books b WHERE b.author_id = a.id) AS book_count
    FROM authors a
"#;

#[derive(Clone)]
pub struct AuthorsRepository {
    pool: Pool<Postgres>,
}

impl AuthorsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List all authors with their book counts, ordered by name
    pub async fn list(&self) -> AppResult<Vec<AuthorWithCount>> {
        let query = format!("{} ORDER BY a.name, a.id", AUTHOR_WITH_COUNT_SELECT);
        let authors = sqlx::query_as::<_, AuthorWithCount>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(authors)
    }

    /// Get author by ID
    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Option<AuthorWithCount>> {
        let query = format!("{} WHERE a.id = $1", AUTHOR_WITH_COUNT_SELECT);
        let author = sqlx::query_as::<_, AuthorWithCount>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(author)
    }

    /// Check whether another author already uses this email (case-insensitive)
    pub async fn email_exists(&self, email: &str, exclude_id: Option<Uuid>) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM authors
                WHERE LOWER(email) = LOWER($1) AND ($2::uuid IS NULL OR id <> $2)
            )
            "#,
        )
        .bind(email)
        .bind(exclude_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    /// Create an author. A concurrent insert of the same email surfaces as
    /// `Conflict` through the unique index.
    pub async fn create(&self, data: &AuthorInput) -> AppResult<Author> {
        let now = Utc::now();
        let author = sqlx::query_as::<_, Author>(
            r#"
            INSERT INTO authors (id, name, email, bio, nationality, birth_year, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $7)
            RETURNING id, name, email, bio, nationality, birth_year, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&data.name)
        .bind(&data.email)
        .bind(&data.bio)
        .bind(&data.nationality)
        .bind(data.birth_year)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::on_unique_violation(e, || duplicate_email(&data.email)))?;
        Ok(author)
    }

    /// Replace every mutable field of an author
    pub async fn update(&self, id: Uuid, data: &AuthorInput) -> AppResult<Option<Author>> {
        let author = sqlx::query_as::<_, Author>(
            r#"
            UPDATE authors SET
                name = $1,
                email = $2,
                bio = $3,
                nationality = $4,
                birth_year = $5,
                updated_at = $6
            WHERE id = $7
            RETURNING id, name, email, bio, nationality, birth_year, created_at, updated_at
            "#,
        )
        .bind(&data.name)
        .bind(&data.email)
        .bind(&data.bio)
        .bind(&data.nationality)
        .bind(data.birth_year)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::on_unique_violation(e, || duplicate_email(&data.email)))?;
        Ok(author)
    }

    /// Delete an author. With `cascade`, their books go in the same transaction;
    /// without it the foreign key refuses the delete while books remain.
    pub async fn delete(&self, id: Uuid, cascade: bool) -> AppResult<bool> {
        let mut tx = self.pool.begin().await?;

        if cascade {
            let removed = sqlx::query("DELETE FROM books WHERE author_id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?
                .rows_affected();
            tracing::debug!("Cascade delete removed {} books of author {}", removed, id);
        }

        let deleted = sqlx::query("DELETE FROM authors WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        tx.commit().await?;
        Ok(deleted > 0)
    }

    /// Count all authors
    pub async fn count(&self) -> AppResult<i64> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM authors")
            .fetch_one(&self.pool)
            .await?;
        Ok(total)
    }
}
