use std::sync::Arc;

use async_trait::async_trait;
use bookapi::{Author, Book, BookApiClient, NewAuthor, NewBook};

use crate::error::CatalogError;

/// Persistence operations the catalog store drives. Ids are assigned
/// exclusively by the implementation behind this trait.
#[async_trait]
pub trait CatalogBackend: Send + Sync {
    async fn list_authors(&self) -> Result<Vec<Author>, CatalogError>;
    async fn create_author(&self, input: &NewAuthor) -> Result<Author, CatalogError>;
    async fn delete_author(&self, id: i64) -> Result<(), CatalogError>;

    async fn list_books(&self) -> Result<Vec<Book>, CatalogError>;
    async fn create_book(&self, input: &NewBook) -> Result<Book, CatalogError>;
    async fn delete_book(&self, id: i64) -> Result<(), CatalogError>;
}

/// REST-backed implementation over [`BookApiClient`].
pub struct RestBackend {
    client: Arc<BookApiClient>,
}

impl RestBackend {
    pub fn new(client: Arc<BookApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CatalogBackend for RestBackend {
    async fn list_authors(&self) -> Result<Vec<Author>, CatalogError> {
        Ok(self.client.list_authors().await?)
    }

    async fn create_author(&self, input: &NewAuthor) -> Result<Author, CatalogError> {
        Ok(self.client.create_author(input).await?)
    }

    async fn delete_author(&self, id: i64) -> Result<(), CatalogError> {
        Ok(self.client.delete_author(id).await?)
    }

    async fn list_books(&self) -> Result<Vec<Book>, CatalogError> {
        Ok(self.client.list_books().await?)
    }

    async fn create_book(&self, input: &NewBook) -> Result<Book, CatalogError> {
        Ok(self.client.create_book(input).await?)
    }

    async fn delete_book(&self, id: i64) -> Result<(), CatalogError> {
        Ok(self.client.delete_book(id).await?)
    }
}
