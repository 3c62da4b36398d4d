//! Search controller
//!
//! Owns the widget state and drives it from three kinds of events: keystrokes
//! from the caller, debounce timers firing, and catalog lookups completing.
//! All of them funnel into one channel consumed by a single task, so state is
//! only ever touched from one place. Observers read it through a
//! `tokio::sync::watch` channel.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;

use super::debounce::Debouncer;
use super::search_state::{LookupRequest, SearchEvent, SearchState};
use crate::domain::{BookCatalog, BookDoc, CatalogError};
use crate::modules::integrations::openlibrary::DEFAULT_BASE_URL;
use crate::ui::{self, View};

/// Tunables for the controller and its rendering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchSettings {
    /// Quiet period after the last keystroke before a query is committed
    pub debounce: Duration,
    /// Minimum trimmed query length, in characters, that reaches the catalog
    pub min_query_chars: usize,
    /// Number of result cards rendered
    pub display_limit: usize,
    /// Base URL prefixed to catalog keys to build detail links
    pub link_base: String,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(500),
            min_query_chars: 3,
            display_limit: 20,
            link_base: DEFAULT_BASE_URL.to_string(),
        }
    }
}

enum ControllerEvent {
    Input(String),
    Commit {
        generation: u64,
        text: String,
    },
    Completed {
        seq: u64,
        outcome: Result<Vec<BookDoc>, CatalogError>,
    },
    Flush(oneshot::Sender<()>),
}

/// Handle to a running search widget. Dropping it stops the event loop and
/// disarms the debounce timer.
pub struct SearchController {
    events: mpsc::UnboundedSender<ControllerEvent>,
    state: watch::Receiver<SearchState>,
    settings: SearchSettings,
    task: JoinHandle<()>,
}

impl SearchController {
    /// Start the event loop. Must be called within a tokio runtime.
    pub fn spawn(catalog: Arc<dyn BookCatalog>, settings: SearchSettings) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let (state_tx, state_rx) = watch::channel(SearchState::new(settings.min_query_chars));

        let event_loop = EventLoop {
            catalog,
            state: state_tx,
            debouncer: Debouncer::new(settings.debounce),
            events: events_tx.clone(),
        };
        let task = tokio::spawn(event_loop.run(events_rx));

        Self {
            events: events_tx,
            state: state_rx,
            settings,
            task,
        }
    }

    /// Report the new full contents of the input field
    pub fn input(&self, text: impl Into<String>) {
        if self.events.send(ControllerEvent::Input(text.into())).is_err() {
            tracing::error!("Search controller is no longer running");
        }
    }

    /// Snapshot of the current state
    pub fn state(&self) -> SearchState {
        self.state.borrow().clone()
    }

    /// Receiver notified on every state change
    pub fn subscribe(&self) -> watch::Receiver<SearchState> {
        self.state.clone()
    }

    pub fn settings(&self) -> &SearchSettings {
        &self.settings
    }

    /// Presentation model for the current state
    pub fn view(&self) -> View {
        ui::render(&self.state.borrow(), &self.settings)
    }

    /// Wait until every input sent so far has been committed and the
    /// resulting lookup, if any, has resolved.
    pub async fn settled(&self) -> SearchState {
        let (tx, rx) = oneshot::channel();
        if self.events.send(ControllerEvent::Flush(tx)).is_ok() {
            let _ = rx.await;
        }

        let mut state = self.state.clone();
        let settled = state
            .wait_for(SearchState::is_settled)
            .await
            .map(|s| s.clone());
        settled.unwrap_or_else(|_| state.borrow().clone())
    }
}

impl Drop for SearchController {
    fn drop(&mut self) {
        self.task.abort();
    }
}

struct EventLoop {
    catalog: Arc<dyn BookCatalog>,
    state: watch::Sender<SearchState>,
    debouncer: Debouncer,
    events: mpsc::UnboundedSender<ControllerEvent>,
}

impl EventLoop {
    async fn run(mut self, mut events: mpsc::UnboundedReceiver<ControllerEvent>) {
        while let Some(event) = events.recv().await {
            self.handle(event);
        }
    }

    fn handle(&mut self, event: ControllerEvent) {
        match event {
            ControllerEvent::Input(text) => {
                self.state.send_modify(|state| {
                    state.apply(SearchEvent::Typed(text.clone()));
                });

                let events = self.events.clone();
                self.debouncer.schedule(move |generation| async move {
                    let _ = events.send(ControllerEvent::Commit { generation, text });
                });
            }
            ControllerEvent::Commit { generation, text } => {
                if !self.debouncer.fired(generation) {
                    return;
                }
                tracing::debug!("Committing query '{}'", text);

                let mut request = None;
                self.state.send_modify(|state| {
                    request = state.apply(SearchEvent::Committed(text));
                });
                if let Some(request) = request {
                    self.start_lookup(request);
                }
            }
            ControllerEvent::Completed { seq, outcome } => {
                self.state.send_modify(|state| {
                    state.apply(SearchEvent::Resolved { seq, outcome });
                });
            }
            ControllerEvent::Flush(done) => {
                let _ = done.send(());
            }
        }
    }

    fn start_lookup(&self, request: LookupRequest) {
        tracing::info!("Searching catalog for '{}' (#{})", request.title, request.seq);

        let catalog = Arc::clone(&self.catalog);
        let events = self.events.clone();
        tokio::spawn(async move {
            let outcome = catalog.search_by_title(&request.title).await;
            if let Ok(docs) = &outcome {
                tracing::info!("Lookup #{} returned {} books", request.seq, docs.len());
            }
            let _ = events.send(ControllerEvent::Completed {
                seq: request.seq,
                outcome,
            });
        });
    }
}
