use crate::client::BookApiClient;
use crate::models::{Book, NewBook};
use crate::Result;

impl BookApiClient {
    /// List all books, server ordering preserved.
    /// GET /api/Books
    pub async fn list_books(&self) -> Result<Vec<Book>> {
        let response = self.get("/api/Books").send().await?;
        self.handle_response(response).await
    }

    /// GET /api/Books/{id}
    pub async fn get_book(&self, id: i64) -> Result<Book> {
        let response = self.get(&format!("/api/Books/{}", id)).send().await?;
        self.handle_response(response).await
    }

    /// Server-side free-text search.
    /// GET /api/Books/search?q={term}
    pub async fn search_books(&self, term: &str) -> Result<Vec<Book>> {
        let encoded = urlencoding::encode(term);
        let response = self
            .get(&format!("/api/Books/search?q={}", encoded))
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Most recently added books.
    /// GET /api/Books/recent?take={take}
    pub async fn recent_books(&self, take: u32) -> Result<Vec<Book>> {
        let response = self
            .get(&format!("/api/Books/recent?take={}", take))
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Create a book; the server assigns the id.
    /// POST /api/Books
    pub async fn create_book(&self, input: &NewBook) -> Result<Book> {
        let response = self.post("/api/Books").json(input).send().await?;
        self.handle_response(response).await
    }

    /// DELETE /api/Books/{id}
    pub async fn delete_book(&self, id: i64) -> Result<()> {
        let response = self.delete(&format!("/api/Books/{}", id)).send().await?;
        self.handle_no_content(response).await
    }
}
