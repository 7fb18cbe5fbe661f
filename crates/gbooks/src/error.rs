use thiserror::Error;

#[derive(Debug, Error)]
pub enum GbooksError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Google Books API error {status_code}: {message}")]
    Api { status_code: u16, message: String },
}
