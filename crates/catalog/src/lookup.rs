use std::sync::Arc;

use async_trait::async_trait;
use gbooks::{BookLookup, GbooksClient};

use crate::error::CatalogError;

/// Metadata lookup operations. Results are display-only and never
/// written back to persistence.
#[async_trait]
pub trait LookupProvider: Send + Sync {
    /// Bulk search by title, for form prefill.
    async fn search_by_title(&self, title: &str) -> Result<Vec<BookLookup>, CatalogError>;

    /// Best single match by title and optional author, for cover and
    /// info-link backfill.
    async fn find_first(
        &self,
        title: &str,
        author: Option<&str>,
    ) -> Result<Option<BookLookup>, CatalogError>;
}

/// Google Books implementation over [`GbooksClient`].
pub struct GbooksProvider {
    client: Arc<GbooksClient>,
}

impl GbooksProvider {
    pub fn new(client: Arc<GbooksClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl LookupProvider for GbooksProvider {
    async fn search_by_title(&self, title: &str) -> Result<Vec<BookLookup>, CatalogError> {
        Ok(self.client.search_by_title(title).await?)
    }

    async fn find_first(
        &self,
        title: &str,
        author: Option<&str>,
    ) -> Result<Option<BookLookup>, CatalogError> {
        Ok(self.client.find_first(title, author).await?)
    }
}
