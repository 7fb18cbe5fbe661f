use thiserror::Error;

#[derive(Debug, Error)]
pub enum BookApiError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("request failed with status {status}: {preview}")]
    Api { status: u16, preview: String },

    #[error("response body is not valid JSON at {path}: {preview}")]
    Json {
        path: String,
        preview: String,
        #[source]
        source: serde_json::Error,
    },
}

impl BookApiError {
    /// HTTP status of a failed request, if the server responded at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Request(err) => err.status().map(|s| s.as_u16()),
            Self::Json { .. } => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}
