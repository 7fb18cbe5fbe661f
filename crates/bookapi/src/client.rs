use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;

use crate::{BookApiError, Result};

/// Maximum number of characters of a response body kept in error values.
const PREVIEW_LIMIT: usize = 300;

pub struct BookApiClient {
    client: Client,
    base_url: String,
}

impl BookApiClient {
    /// Create a client against the given base address. Trailing slashes
    /// are trimmed so paths can always be joined with a single `/`.
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    /// Resolve a path against the base address. Absolute URLs pass
    /// through unchanged.
    pub(crate) fn url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    pub(crate) fn get(&self, path: &str) -> RequestBuilder {
        self.client
            .get(self.url(path))
            .header(CONTENT_TYPE, "application/json")
    }

    pub(crate) fn post(&self, path: &str) -> RequestBuilder {
        self.client
            .post(self.url(path))
            .header(CONTENT_TYPE, "application/json")
    }

    pub(crate) fn delete(&self, path: &str) -> RequestBuilder {
        self.client
            .delete(self.url(path))
            .header(CONTENT_TYPE, "application/json")
    }

    /// Classify a response and deserialize its body.
    ///
    /// The body is parsed as JSON whenever the status is in the 2xx
    /// range, regardless of the declared content type; servers that
    /// label JSON as text/plain still deserialize cleanly.
    pub(crate) async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T> {
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(BookApiError::Api {
                status: status.as_u16(),
                preview: preview(&body),
            });
        }
        let deserializer = &mut serde_json::Deserializer::from_str(&body);
        serde_path_to_error::deserialize(deserializer).map_err(|e| BookApiError::Json {
            path: e.path().to_string(),
            preview: preview(&body),
            source: e.into_inner(),
        })
    }

    /// Classify a response whose body carries no value. 204/205 (and any
    /// other 2xx) resolve to `()` without a JSON parse attempt.
    pub(crate) async fn handle_no_content(&self, response: reqwest::Response) -> Result<()> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BookApiError::Api {
                status: status.as_u16(),
                preview: preview(&body),
            });
        }
        Ok(())
    }
}

/// First `PREVIEW_LIMIT` characters of a body, for error diagnostics.
fn preview(body: &str) -> String {
    body.chars().take(PREVIEW_LIMIT).collect()
}

#[cfg(test)]
mod tests {
    use httpmock::MockServer;

    use super::*;
    use crate::models::{NewAuthor, NewBook};

    fn client(base_url: &str) -> BookApiClient {
        BookApiClient::new(Client::new(), base_url)
    }

    #[test]
    fn joins_relative_paths_against_base() {
        let api = client("http://localhost:5000/");
        assert_eq!(api.url("/api/Books"), "http://localhost:5000/api/Books");
        assert_eq!(api.url("api/Books"), "http://localhost:5000/api/Books");
    }

    #[test]
    fn absolute_urls_pass_through() {
        let api = client("http://localhost:5000");
        assert_eq!(api.url("https://example.com/x"), "https://example.com/x");
        assert_eq!(api.url("http://example.com/x"), "http://example.com/x");
    }

    #[test]
    fn preview_truncates_on_char_boundaries() {
        let short = "hello";
        assert_eq!(preview(short), "hello");

        let long = "é".repeat(400);
        let truncated = preview(&long);
        assert_eq!(truncated.chars().count(), 300);
    }

    #[tokio::test]
    async fn delete_resolves_no_content_on_204() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(httpmock::Method::DELETE).path("/api/Books/7");
            then.status(204);
        });

        let api = client(&server.base_url());
        api.delete_book(7).await.unwrap();
        mock.assert();
    }

    #[tokio::test]
    async fn non_2xx_carries_status_and_truncated_preview() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.path("/api/Books");
            then.status(500).body("x".repeat(1000));
        });

        let api = client(&server.base_url());
        let err = api.list_books().await.unwrap_err();
        match err {
            BookApiError::Api { status, preview } => {
                assert_eq!(status, 500);
                assert_eq!(preview.chars().count(), 300);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn parses_json_despite_text_content_type() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.path("/api/Authors");
            then.status(200)
                .header("content-type", "text/plain")
                .body(r#"[{"id":1,"name":"Ursula K. Le Guin"}]"#);
        });

        let api = client(&server.base_url());
        let authors = api.list_authors().await.unwrap();
        assert_eq!(authors.len(), 1);
        assert_eq!(authors[0].name, "Ursula K. Le Guin");
    }

    #[tokio::test]
    async fn unparseable_2xx_body_is_a_format_error() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.path("/api/Authors");
            then.status(200).body("<html>definitely not json</html>");
        });

        let api = client(&server.base_url());
        let err = api.list_authors().await.unwrap_err();
        match err {
            BookApiError::Json { preview, .. } => {
                assert!(preview.starts_with("<html>"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn create_author_posts_minimal_payload() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(httpmock::Method::POST)
                .path("/api/Authors")
                .json_body(serde_json::json!({"name": "Ted Chiang"}));
            then.status(201)
                .json_body(serde_json::json!({"id": 12, "name": "Ted Chiang"}));
        });

        let api = client(&server.base_url());
        let created = api
            .create_author(&NewAuthor {
                name: "Ted Chiang".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(created.id, 12);
        mock.assert();
    }

    #[tokio::test]
    async fn create_book_sends_null_author_id() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(httpmock::Method::POST)
                .path("/api/Books")
                .json_body(serde_json::json!({
                    "title": "Exhalation",
                    "year": 2019,
                    "authorId": null,
                }));
            then.status(201).json_body(serde_json::json!({
                "id": 3,
                "title": "Exhalation",
                "year": 2019,
            }));
        });

        let api = client(&server.base_url());
        let created = api
            .create_book(&NewBook {
                title: "Exhalation".to_string(),
                year: 2019,
                author_id: None,
            })
            .await
            .unwrap();
        assert_eq!(created.id, 3);
        assert_eq!(created.author_id, None);
        mock.assert();
    }

    #[tokio::test]
    async fn search_encodes_the_query_term() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.path("/api/Books/search")
                .query_param("q", "dune messiah");
            then.status(200).json_body(serde_json::json!([]));
        });

        let api = client(&server.base_url());
        let books = api.search_books("dune messiah").await.unwrap();
        assert!(books.is_empty());
        mock.assert();
    }

    #[tokio::test]
    async fn missing_book_surfaces_as_404_request_failure() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.path("/api/Books/999");
            then.status(404).body("not found");
        });

        let api = client(&server.base_url());
        let err = api.get_book(999).await.unwrap_err();
        assert!(err.is_not_found());
    }
}
