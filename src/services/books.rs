//! Books service

use std::sync::Arc;

use uuid::Uuid;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{Book, BookInput, BookWithAuthor},
    repository::CatalogStore,
};

#[derive(Clone)]
pub struct BooksService {
    store: Arc<dyn CatalogStore>,
}

impl BooksService {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<BookWithAuthor> {
        self.store
            .find_book(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book {} not found", id)))
    }

    async fn ensure_author(&self, author_id: Uuid) -> AppResult<()> {
        match self.store.find_author(author_id).await? {
            Some(_) => Ok(()),
            None => Err(AppError::NotFound(format!("Author {} not found", author_id))),
        }
    }

    pub async fn create(&self, input: BookInput) -> AppResult<Book> {
        let input = input.normalized();
        input.validate()?;
        self.ensure_author(input.author_id).await?;

        let book = self.store.create_book(&input).await?;
        tracing::info!("Created book {} ({}) for author {}", book.id, book.title, book.author_id);
        Ok(book)
    }

    pub async fn update(&self, id: Uuid, input: BookInput) -> AppResult<Book> {
        let input = input.normalized();
        input.validate()?;
        self.ensure_author(input.author_id).await?;

        self.store
            .update_book(id, &input)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book {} not found", id)))
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        if !self.store.delete_book(id).await? {
            return Err(AppError::NotFound(format!("Book {} not found", id)));
        }
        tracing::info!("Deleted book {}", id);
        Ok(())
    }
}
