use thiserror::Error;

/// Failures surfaced by the store's collaborators. The store never
/// propagates these; it records a single current message.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("{0}")]
    Backend(#[from] bookapi::BookApiError),

    #[error("{0}")]
    Lookup(#[from] gbooks::GbooksError),

    /// Collaborator-local failure with no richer classification.
    #[error("{0}")]
    Other(String),
}
