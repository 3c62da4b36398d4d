//! Search widget state and its transition function
//!
//! All mutation goes through [`SearchState::apply`]. The function performs no
//! I/O: when a transition needs the catalog it returns a [`LookupRequest`]
//! and the caller is responsible for running it and feeding the outcome back
//! as [`SearchEvent::Resolved`].

use crate::domain::{BookDoc, CatalogError};

pub const PROMPT_MESSAGE: &str = "Search for the book title...";
pub const TOO_SHORT_MESSAGE: &str = "Please type at least 3 characters to search.";
pub const NO_RESULTS_MESSAGE: &str = "No books found. Try a different title.";
pub const FETCH_ERROR_MESSAGE: &str = "Error fetching books. Please try again.";

/// Too-short message for a configurable minimum; equals
/// [`TOO_SHORT_MESSAGE`] for the default of 3.
pub fn too_short_message(min_query_chars: usize) -> String {
    format!(
        "Please type at least {} characters to search.",
        min_query_chars
    )
}

#[derive(Debug, Clone)]
pub enum SearchEvent {
    /// The input field now holds this text
    Typed(String),
    /// The debounce window closed on this text
    Committed(String),
    /// A lookup finished
    Resolved {
        seq: u64,
        outcome: Result<Vec<BookDoc>, CatalogError>,
    },
}

/// A lookup the caller must issue against the catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupRequest {
    pub seq: u64,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchState {
    /// Live contents of the input field
    pub input: String,
    /// Last committed query
    pub query: String,
    /// Results of the last accepted lookup, in catalog order
    pub books: Vec<BookDoc>,
    pub loading: bool,
    pub message: String,
    /// True between a keystroke and its debounced commit
    pub pending_commit: bool,
    /// Sequence number of the latest commit; only its lookup may land
    pub seq: u64,
    min_query_chars: usize,
}

impl Default for SearchState {
    fn default() -> Self {
        Self::new(3)
    }
}

impl SearchState {
    pub fn new(min_query_chars: usize) -> Self {
        Self {
            input: String::new(),
            query: String::new(),
            books: Vec::new(),
            loading: false,
            message: PROMPT_MESSAGE.to_string(),
            pending_commit: false,
            seq: 0,
            min_query_chars,
        }
    }

    /// Neither a commit nor a lookup is outstanding
    pub fn is_settled(&self) -> bool {
        !self.pending_commit && !self.loading
    }

    pub fn apply(&mut self, event: SearchEvent) -> Option<LookupRequest> {
        match event {
            SearchEvent::Typed(text) => {
                self.input = text;
                self.pending_commit = true;
                None
            }
            SearchEvent::Committed(text) => self.commit(text),
            SearchEvent::Resolved { seq, outcome } => {
                self.resolve(seq, outcome);
                None
            }
        }
    }

    fn commit(&mut self, text: String) -> Option<LookupRequest> {
        self.pending_commit = false;
        // Any lookup still in flight belongs to an older query from here on.
        self.seq += 1;

        let title = text.trim().to_string();
        self.query = text;

        if title.chars().count() < self.min_query_chars {
            self.books.clear();
            self.loading = false;
            self.message = too_short_message(self.min_query_chars);
            return None;
        }

        self.loading = true;
        self.message.clear();
        Some(LookupRequest {
            seq: self.seq,
            title,
        })
    }

    fn resolve(&mut self, seq: u64, outcome: Result<Vec<BookDoc>, CatalogError>) {
        if seq != self.seq {
            tracing::debug!(
                "Discarding stale lookup #{} (current is #{})",
                seq,
                self.seq
            );
            return;
        }

        self.loading = false;
        match outcome {
            Ok(docs) if docs.is_empty() => {
                self.books.clear();
                self.message = NO_RESULTS_MESSAGE.to_string();
            }
            Ok(docs) => {
                self.books = docs;
                self.message.clear();
            }
            Err(e) => {
                tracing::warn!("Book lookup for '{}' failed: {}", self.query, e);
                self.books.clear();
                self.message = FETCH_ERROR_MESSAGE.to_string();
            }
        }
    }
}
