use crate::client::BookApiClient;
use crate::models::{Author, NewAuthor};
use crate::Result;

impl BookApiClient {
    /// List all authors, server ordering preserved.
    /// GET /api/Authors
    pub async fn list_authors(&self) -> Result<Vec<Author>> {
        let response = self.get("/api/Authors").send().await?;
        self.handle_response(response).await
    }

    /// GET /api/Authors/{id}
    pub async fn get_author(&self, id: i64) -> Result<Author> {
        let response = self.get(&format!("/api/Authors/{}", id)).send().await?;
        self.handle_response(response).await
    }

    /// Create an author; the server assigns the id.
    /// POST /api/Authors
    pub async fn create_author(&self, input: &NewAuthor) -> Result<Author> {
        let response = self.post("/api/Authors").json(input).send().await?;
        self.handle_response(response).await
    }

    /// DELETE /api/Authors/{id}
    pub async fn delete_author(&self, id: i64) -> Result<()> {
        let response = self.delete(&format!("/api/Authors/{}", id)).send().await?;
        self.handle_no_content(response).await
    }
}
