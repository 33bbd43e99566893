//! Authors service

use std::sync::Arc;

use uuid::Uuid;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{Author, AuthorInput, AuthorWithCount, Book, SortOrder},
    repository::CatalogStore,
};

#[derive(Clone)]
pub struct AuthorsService {
    store: Arc<dyn CatalogStore>,
}

impl AuthorsService {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> AppResult<Vec<AuthorWithCount>> {
        self.store.list_authors().await
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<AuthorWithCount> {
        self.store
            .find_author(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Author {} not found", id)))
    }

    /// Books of an author, most recently published first
    pub async fn books(&self, id: Uuid) -> AppResult<Vec<Book>> {
        self.get_by_id(id).await?;
        self.store.books_by_author(id, SortOrder::Desc).await
    }

    pub async fn create(&self, input: AuthorInput) -> AppResult<Author> {
        let input = input.normalized();
        input.validate()?;

        if self.store.author_email_exists(&input.email, None).await? {
            return Err(AppError::Conflict(format!(
                "An author with email {} already exists",
                input.email
            )));
        }

        let author = self.store.create_author(&input).await?;
        tracing::info!("Created author {} ({})", author.id, author.name);
        Ok(author)
    }

    pub async fn update(&self, id: Uuid, input: AuthorInput) -> AppResult<Author> {
        let input = input.normalized();
        input.validate()?;

        self.get_by_id(id).await?;

        if self.store.author_email_exists(&input.email, Some(id)).await? {
            return Err(AppError::Conflict(format!(
                "An author with email {} already exists",
                input.email
            )));
        }

        self.store
            .update_author(id, &input)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Author {} not found", id)))
    }

    /// Delete an author. Refused while they own books unless `force` is set,
    /// in which case the books are removed with them.
    pub async fn delete(&self, id: Uuid, force: bool) -> AppResult<()> {
        let author = self.get_by_id(id).await?;

        if author.book_count > 0 && !force {
            return Err(AppError::HasDependents(format!(
                "Author {} still has {} book(s). Use force=true to delete them too.",
                id, author.book_count
            )));
        }

        if !self.store.delete_author(id, force).await? {
            return Err(AppError::NotFound(format!("Author {} not found", id)));
        }

        tracing::info!(
            "Deleted author {} (force={}, books={})",
            id,
            force,
            author.book_count
        );
        Ok(())
    }
}
