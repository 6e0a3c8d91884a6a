//! Single-flight query client.
//!
//! At most one search is outstanding per client. Submitting while a request
//! is in flight first cancels it (best-effort: the HTTP call may still run
//! to completion, but its result is unconditionally discarded). Each submit
//! gets a generation number; completion events are delivered over a channel
//! and [`SearchClient::poll`] drops any event whose generation is stale, so
//! a response to an earlier submit can never overwrite state set by a later
//! one.
//!
//! The blocking HTTP call runs on a worker thread; everything the rest of
//! the application touches stays on the event-loop thread.

mod error;
mod gemini;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{Receiver, Sender, channel};
use std::thread;

use tracing::debug;

pub use error::SearchError;
pub use gemini::{GeminiBackend, build_request_body};

use crate::i18n::Language;
use crate::models::SearchQuery;
use crate::parsers::NormalizedResponse;

/// Cooperative cancellation flag shared with the worker.
///
/// The worker checks it at its resumption points; the caller treats a
/// cancelled operation's result as unobservable.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// One search backend. Implementations must poll the cancellation token at
/// their resumption points and return `SearchError::Cancelled` when it trips.
pub trait SearchBackend: Send + Sync {
    fn search(
        &self,
        query: &SearchQuery,
        language: Language,
        cancel: &CancelToken,
    ) -> Result<NormalizedResponse, SearchError>;
}

/// Terminal outcome of one submit, as seen by the session.
#[derive(Debug)]
pub enum SearchOutcome {
    Completed(NormalizedResponse),
    Failed(SearchError),
    Cancelled,
}

struct SearchEvent {
    generation: u64,
    outcome: SearchOutcome,
}

pub struct SearchClient {
    backend: Arc<dyn SearchBackend>,
    generation: u64,
    outstanding: Option<CancelToken>,
    tx: Sender<SearchEvent>,
    rx: Receiver<SearchEvent>,
}

impl SearchClient {
    pub fn new(backend: Arc<dyn SearchBackend>) -> Self {
        let (tx, rx) = channel();
        Self { backend, generation: 0, outstanding: None, tx, rx }
    }

    /// Issue a search, superseding any outstanding one.
    ///
    /// Returns the generation number of the new request. Exactly one network
    /// call is made per invocation; there are no automatic retries.
    pub fn submit(&mut self, query: SearchQuery, language: Language) -> u64 {
        self.cancel();
        self.generation += 1;

        let token = CancelToken::new();
        self.outstanding = Some(token.clone());

        let backend = Arc::clone(&self.backend);
        let tx = self.tx.clone();
        let generation = self.generation;
        debug!(generation, "submitting search");

        thread::spawn(move || {
            let outcome = match backend.search(&query, language, &token) {
                _ if token.is_cancelled() => SearchOutcome::Cancelled,
                Ok(response) => SearchOutcome::Completed(response),
                Err(SearchError::Cancelled) => SearchOutcome::Cancelled,
                Err(err) => SearchOutcome::Failed(err),
            };
            // The receiver only disappears when the client is dropped.
            let _ = tx.send(SearchEvent { generation, outcome });
        });

        self.generation
    }

    /// Cancel the outstanding request, if any. Idempotent; a no-op when
    /// nothing is in flight.
    pub fn cancel(&mut self) {
        if let Some(token) = self.outstanding.take() {
            debug!(generation = self.generation, "cancelling outstanding search");
            token.cancel();
        }
    }

    /// Whether a request is currently outstanding.
    pub fn is_outstanding(&self) -> bool {
        self.outstanding.is_some()
    }

    /// Drain completion events, returning the outcome of the current
    /// request when it has finished. Events from superseded or cancelled
    /// generations are discarded unconditionally.
    pub fn poll(&mut self) -> Option<SearchOutcome> {
        while let Ok(event) = self.rx.try_recv() {
            if event.generation == self.generation && self.outstanding.is_some() {
                self.outstanding = None;
                return Some(event.outcome);
            }
            debug!(generation = event.generation, "discarding stale search outcome");
        }
        None
    }
}
