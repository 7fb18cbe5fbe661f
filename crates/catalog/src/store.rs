use std::collections::HashSet;
use std::future::Future;
use std::sync::Arc;

use bookapi::{Author, Book, BookApiClient, NewAuthor, NewBook};
use gbooks::{BookLookup, GbooksClient};
use parking_lot::RwLock;

use crate::backend::{CatalogBackend, RestBackend};
use crate::error::CatalogError;
use crate::filter::{filter_authors, filter_books};
use crate::lookup::{GbooksProvider, LookupProvider};

/// Display placeholder for books whose author reference no longer
/// resolves.
const UNKNOWN_AUTHOR: &str = "Unknown";

const COVER_BY_ISBN_URL: &str = "https://books.google.com/books/content?vid=ISBN";

/// Derive the deterministic cover image URL for an ISBN. Blank input
/// yields no URL.
pub fn cover_from_isbn(isbn: &str) -> Option<String> {
    let isbn = isbn.trim();
    if isbn.is_empty() {
        return None;
    }
    Some(format!(
        "{}{}&printsec=frontcover&img=1&zoom=1&source=gbs_api",
        COVER_BY_ISBN_URL,
        urlencoding::encode(isbn)
    ))
}

/// Cover to display for a book: explicit cover URL when non-blank,
/// else derived from the ISBN.
pub fn display_cover(book: &Book) -> Option<String> {
    book.cover_url
        .as_deref()
        .filter(|c| !c.trim().is_empty())
        .map(str::to_string)
        .or_else(|| book.isbn.as_deref().and_then(cover_from_isbn))
}

/// Author form input. Only `name` reaches the persistence layer; the
/// descriptive fields are accepted for form completeness.
#[derive(Debug, Clone, Default)]
pub struct AuthorDraft {
    pub name: String,
    pub bio: Option<String>,
    pub birth_year: Option<i32>,
    pub country: Option<String>,
}

/// Book form input. `title`/`year`/`author_id` go to the persistence
/// layer; the rest is merged onto the confirmed entity client-side.
#[derive(Debug, Clone, Default)]
pub struct BookDraft {
    pub title: String,
    pub year: i32,
    pub author_id: Option<i64>,
    pub isbn: Option<String>,
    pub cover_url: Option<String>,
    pub description: Option<String>,
}

#[derive(Default)]
struct StoreState {
    authors: Vec<Author>,
    books: Vec<Book>,
    search_term: String,
    loading: bool,
    error: Option<String>,
    deleting_authors: HashSet<i64>,
    deleting_books: HashSet<i64>,
    /// Bumped by [`CatalogStore::detach`]; async results captured under
    /// an older generation are discarded.
    generation: u64,
}

/// In-memory view of the catalog and the only mutator of it.
///
/// Methods take `&self`; state lives behind a lock that is never held
/// across an await, so interleaved continuations each observe prior
/// mutations.
pub struct CatalogStore {
    backend: Arc<dyn CatalogBackend>,
    lookup: Arc<dyn LookupProvider>,
    state: RwLock<StoreState>,
}

impl CatalogStore {
    pub fn new(backend: Arc<dyn CatalogBackend>, lookup: Arc<dyn LookupProvider>) -> Self {
        Self {
            backend,
            lookup,
            state: RwLock::new(StoreState::default()),
        }
    }

    /// Wire a store against the live REST backend and Google Books
    /// lookup, sharing one HTTP client.
    pub fn connect(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let backend = RestBackend::new(Arc::new(BookApiClient::new(client.clone(), base_url)));
        let lookup = GbooksProvider::new(Arc::new(GbooksClient::new(client)));
        Self::new(Arc::new(backend), Arc::new(lookup))
    }

    // -- read surface ----------------------------------------------------

    pub fn books(&self) -> Vec<Book> {
        self.state.read().books.clone()
    }

    pub fn authors(&self) -> Vec<Author> {
        self.state.read().authors.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.read().loading
    }

    /// Last failure message; overwritten by the next failure and
    /// cleared by the next mutation attempt.
    pub fn error(&self) -> Option<String> {
        self.state.read().error.clone()
    }

    pub fn search_term(&self) -> String {
        self.state.read().search_term.clone()
    }

    pub fn set_search_term(&self, term: impl Into<String>) {
        self.state.write().search_term = term.into();
    }

    pub fn is_deleting_book(&self, id: i64) -> bool {
        self.state.read().deleting_books.contains(&id)
    }

    pub fn is_deleting_author(&self, id: i64) -> bool {
        self.state.read().deleting_authors.contains(&id)
    }

    /// Books matching the current search term.
    pub fn filtered_books(&self) -> Vec<Book> {
        let state = self.state.read();
        filter_books(&state.search_term, &state.books)
    }

    /// Authors matching the current search term.
    pub fn filtered_authors(&self) -> Vec<Author> {
        let state = self.state.read();
        filter_authors(&state.search_term, &state.authors)
    }

    /// Display name for a book's author, resolved against the live
    /// author collection. Dangling references fall back to the
    /// denormalized name, then to "Unknown".
    pub fn display_author_name(&self, book: &Book) -> String {
        resolve_author_name(&self.state.read(), book)
    }

    /// Number of books currently referencing an author.
    pub fn book_count_for(&self, author_id: i64) -> usize {
        self.state
            .read()
            .books
            .iter()
            .filter(|b| b.author_id == Some(author_id))
            .count()
    }

    /// Tear down: results of loads and backfills still in flight are
    /// discarded when they land.
    pub fn detach(&self) {
        self.state.write().generation += 1;
    }

    // -- load ------------------------------------------------------------

    /// Fetch both collections concurrently as one unit: either failure
    /// surfaces one error and populates neither.
    pub async fn load(&self) {
        let generation = {
            let mut state = self.state.write();
            state.loading = true;
            state.error = None;
            state.generation
        };

        let result = tokio::try_join!(self.backend.list_authors(), self.backend.list_books());

        let mut state = self.state.write();
        if state.generation != generation {
            tracing::debug!("discarding stale load result");
            return;
        }
        match result {
            Ok((authors, books)) => {
                state.authors = authors;
                state.books = books;
            }
            Err(err) => {
                tracing::warn!("initial load failed: {err}");
                state.error = Some(err.to_string());
            }
        }
        state.loading = false;
    }

    // -- create ----------------------------------------------------------

    /// Create an author and prepend the confirmed entity. Not
    /// optimistic: no client-generated id exists to show a placeholder
    /// with.
    pub async fn create_author(&self, draft: AuthorDraft) {
        {
            let mut state = self.state.write();
            state.loading = true;
            state.error = None;
        }

        let input = NewAuthor { name: draft.name };
        let result = self.backend.create_author(&input).await;

        let mut state = self.state.write();
        match result {
            Ok(created) => state.authors.insert(0, created),
            Err(err) => {
                tracing::warn!("create author failed: {err}");
                state.error = Some(err.to_string());
            }
        }
        state.loading = false;
    }

    /// Create a book, merge the client-only draft fields onto the
    /// confirmed entity, and prepend it. The server response wins for
    /// everything it models; a missing cover URL is derived from the
    /// ISBN when one is present.
    pub async fn create_book(&self, draft: BookDraft) {
        {
            let mut state = self.state.write();
            state.loading = true;
            state.error = None;
        }

        let input = NewBook {
            title: draft.title.clone(),
            year: draft.year,
            author_id: draft.author_id,
        };
        let result = self.backend.create_book(&input).await;

        let mut state = self.state.write();
        match result {
            Ok(mut created) => {
                created.isbn = draft.isbn.clone();
                created.description = draft.description;
                created.cover_url = draft
                    .cover_url
                    .filter(|c| !c.trim().is_empty())
                    .or_else(|| draft.isbn.as_deref().and_then(cover_from_isbn));
                state.books.insert(0, created);
            }
            Err(err) => {
                tracing::warn!("create book failed: {err}");
                state.error = Some(err.to_string());
            }
        }
        state.loading = false;
    }

    // -- delete ----------------------------------------------------------

    /// Optimistically delete a book. Confirmation is the caller's duty;
    /// a repeated request while the id is in flight is ignored.
    pub async fn delete_book(&self, id: i64) {
        self.optimistic_delete(
            id,
            book_parts,
            |book| book.id,
            self.backend.delete_book(id),
            |_, _| {},
        )
        .await;
    }

    /// Optimistically delete an author. On success every book holding
    /// the author's id is rewritten to an unknown author; the server's
    /// own cascade is independent and not relied upon.
    pub async fn delete_author(&self, id: i64) {
        self.optimistic_delete(
            id,
            author_parts,
            |author| author.id,
            self.backend.delete_author(id),
            |state, id| {
                for book in state.books.iter_mut() {
                    if book.author_id == Some(id) {
                        book.author_id = None;
                        book.author_name = Some(UNKNOWN_AUTHOR.to_string());
                    }
                }
            },
        )
        .await;
    }

    /// Shared delete choreography: guard on the in-flight set, snapshot,
    /// optimistic removal, remote call, reconcile or rollback, unmark.
    async fn optimistic_delete<T, F>(
        &self,
        id: i64,
        parts: for<'a> fn(&'a mut StoreState) -> (&'a mut Vec<T>, &'a mut HashSet<i64>),
        entity_id: fn(&T) -> i64,
        remote: F,
        reconcile: fn(&mut StoreState, i64),
    ) where
        T: Clone,
        F: Future<Output = Result<(), CatalogError>>,
    {
        let snapshot = {
            let mut state = self.state.write();
            let (items, in_flight) = parts(&mut state);
            if !in_flight.insert(id) {
                return;
            }
            let snapshot = items.clone();
            items.retain(|item| entity_id(item) != id);
            state.error = None;
            snapshot
        };

        let result = remote.await;

        let mut state = self.state.write();
        match result {
            Ok(()) => reconcile(&mut state, id),
            Err(err) => {
                tracing::warn!("delete of id {id} failed, rolling back: {err}");
                let (items, _) = parts(&mut state);
                *items = snapshot;
                state.error = Some(err.to_string());
            }
        }
        let (_, in_flight) = parts(&mut state);
        in_flight.remove(&id);
    }

    // -- metadata lookup -------------------------------------------------

    /// Bulk title search against the lookup service, for form prefill.
    /// Failures degrade to an empty result set.
    pub async fn search_lookup(&self, title: &str) -> Vec<BookLookup> {
        match self.lookup.search_by_title(title).await {
            Ok(results) => results,
            Err(err) => {
                tracing::debug!("lookup search failed: {err}");
                Vec::new()
            }
        }
    }

    /// Fill a book's missing cover and info link from the lookup
    /// service, keyed by title and display author name. Only fields
    /// still missing when the response lands are filled; failures are
    /// swallowed and the card stays bare.
    pub async fn backfill_book(&self, id: i64) {
        let (generation, title, author) = {
            let state = self.state.read();
            let Some(book) = state.books.iter().find(|b| b.id == id) else {
                return;
            };
            let needs_cover = book.cover_url.as_deref().map_or(true, |c| c.trim().is_empty());
            let needs_link = book.info_link.is_none();
            if !needs_cover && !needs_link {
                return;
            }
            (
                state.generation,
                book.title.clone(),
                resolve_author_name(&state, book),
            )
        };

        let found = match self.lookup.find_first(&title, Some(&author)).await {
            Ok(found) => found,
            Err(err) => {
                tracing::debug!("metadata backfill failed for book {id}: {err}");
                return;
            }
        };
        let Some(found) = found else { return };

        let mut state = self.state.write();
        if state.generation != generation {
            tracing::debug!("discarding stale backfill for book {id}");
            return;
        }
        let Some(book) = state.books.iter_mut().find(|b| b.id == id) else {
            return;
        };
        if book.cover_url.as_deref().map_or(true, |c| c.trim().is_empty()) {
            book.cover_url = found.thumbnail;
        }
        if book.info_link.is_none() {
            book.info_link = found.info_link;
        }
    }
}

fn book_parts(state: &mut StoreState) -> (&mut Vec<Book>, &mut HashSet<i64>) {
    (&mut state.books, &mut state.deleting_books)
}

fn author_parts(state: &mut StoreState) -> (&mut Vec<Author>, &mut HashSet<i64>) {
    (&mut state.authors, &mut state.deleting_authors)
}

fn resolve_author_name(state: &StoreState, book: &Book) -> String {
    if let Some(author_id) = book.author_id {
        if let Some(author) = state.authors.iter().find(|a| a.id == author_id) {
            return author.name.clone();
        }
    }
    book.author_name
        .clone()
        .unwrap_or_else(|| UNKNOWN_AUTHOR.to_string())
}
