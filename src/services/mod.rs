//! Business logic services

pub mod authors;
pub mod books;
pub mod search;
pub mod stats;

use std::sync::Arc;

use crate::{config::SearchConfig, repository::CatalogStore};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub store: Arc<dyn CatalogStore>,
    pub authors: authors::AuthorsService,
    pub books: books::BooksService,
    pub search: search::SearchService,
    pub stats: stats::StatsService,
}

impl Services {
    /// Create all services on top of one store
    pub fn new(store: Arc<dyn CatalogStore>, search_config: SearchConfig) -> Self {
        Self {
            authors: authors::AuthorsService::new(store.clone()),
            books: books::BooksService::new(store.clone()),
            search: search::SearchService::new(store.clone(), search_config),
            stats: stats::StatsService::new(store.clone()),
            store,
        }
    }
}
