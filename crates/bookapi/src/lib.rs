mod authors;
mod books;
mod client;
mod error;
pub mod models;

pub use client::BookApiClient;
pub use error::BookApiError;
pub use models::{Author, Book, NewAuthor, NewBook};

pub type Result<T> = std::result::Result<T, BookApiError>;
