//! Catalog state core: the client-side view of books and authors.
//!
//! Owns the in-memory collections, their search-filtered views, and
//! every mutation against the persistence API. Deletes are optimistic
//! with snapshot rollback; removing an author cascades a display
//! update onto its books; covers and info links can be backfilled from
//! the metadata lookup service without touching persistence.
//!
//! Collaborators are injected behind the [`CatalogBackend`] and
//! [`LookupProvider`] traits so tests can substitute doubles;
//! [`CatalogStore::connect`] wires the real REST and Google Books
//! clients from one shared HTTP client.

mod backend;
mod error;
mod filter;
mod lookup;
mod store;

pub use backend::{CatalogBackend, RestBackend};
pub use error::CatalogError;
pub use filter::{filter_authors, filter_books};
pub use lookup::{GbooksProvider, LookupProvider};
pub use store::{cover_from_isbn, display_cover, AuthorDraft, BookDraft, CatalogStore};
