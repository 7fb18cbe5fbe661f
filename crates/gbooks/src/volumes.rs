use crate::models::{BookLookup, VolumesResponse};
use crate::GbooksClient;

impl GbooksClient {
    /// Search volumes by title, for form prefill.
    /// GET {base}?q=intitle:{title}&maxResults=40
    ///
    /// A blank title resolves to an empty list without a request.
    pub async fn search_by_title(&self, title: &str) -> crate::Result<Vec<BookLookup>> {
        let title = title.trim();
        if title.is_empty() {
            return Ok(Vec::new());
        }

        let query = format!("intitle:{}", title);
        let response = self
            .client()
            .get(self.base_url())
            .query(&[("q", query.as_str()), ("maxResults", "40")])
            .send()
            .await?;
        let volumes: VolumesResponse = self.handle_response(response).await?;
        Ok(volumes.items.into_iter().map(BookLookup::from).collect())
    }

    /// Best single match by title and optional author, for cover and
    /// info-link backfill.
    /// GET {base}?q=intitle:{title}+inauthor:{author}&maxResults=1
    pub async fn find_first(
        &self,
        title: &str,
        author: Option<&str>,
    ) -> crate::Result<Option<BookLookup>> {
        let title = title.trim();
        if title.is_empty() {
            return Ok(None);
        }

        let mut terms = vec![format!("intitle:{}", title)];
        if let Some(author) = author.map(str::trim).filter(|a| !a.is_empty()) {
            terms.push(format!("inauthor:{}", author));
        }
        let query = terms.join("+");

        let response = self
            .client()
            .get(self.base_url())
            .query(&[("q", query.as_str()), ("maxResults", "1")])
            .send()
            .await?;
        let volumes: VolumesResponse = self.handle_response(response).await?;
        Ok(volumes.items.into_iter().next().map(BookLookup::from))
    }
}
