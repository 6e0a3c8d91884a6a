//! Search session lifecycle.
//!
//! The session is the sole mutator of search state; everything downstream
//! reads synchronous snapshots. The lifecycle is
//! `Idle → Loading → {Success, Error}`, with `Success|Error → Loading` on a
//! new submit, `Loading → Idle` on a user stop, and any state `→ Idle` on
//! reset. Stale and cancelled request outcomes never reach this layer: the
//! query client's generation guard discards them first.

use std::time::Instant;

use tracing::{debug, info};

use crate::client::{SearchClient, SearchError, SearchOutcome};
use crate::i18n::Language;
use crate::models::{PersonRecord, SearchQuery, SearchSummary};

/// How long each rotating loading message stays on screen.
const LOADING_MESSAGE_ROTATION_MS: u128 = 3500;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Idle,
    Loading,
    Success,
    Error,
}

pub struct SearchSession {
    client: SearchClient,
    language: Language,
    query: SearchQuery,
    results: Vec<PersonRecord>,
    summary: Option<SearchSummary>,
    status: SessionStatus,
    error: Option<SearchError>,
    /// Distinguishes "never searched" (onboarding view) from "searched,
    /// zero results" (empty-results view).
    searched_once: bool,
    /// Set on entering Loading, cleared on every exit. Both cosmetic
    /// loading timers derive from it, so neither can fire into a stale
    /// session.
    loading_since: Option<Instant>,
}

impl SearchSession {
    pub fn new(client: SearchClient, language: Language) -> Self {
        Self {
            client,
            language,
            query: SearchQuery::default(),
            results: Vec::new(),
            summary: None,
            status: SessionStatus::Idle,
            error: None,
            searched_once: false,
            loading_since: None,
        }
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn is_loading(&self) -> bool {
        self.status == SessionStatus::Loading
    }

    pub fn query(&self) -> &SearchQuery {
        &self.query
    }

    pub fn results(&self) -> &[PersonRecord] {
        &self.results
    }

    pub fn summary(&self) -> Option<&SearchSummary> {
        self.summary.as_ref()
    }

    pub fn error(&self) -> Option<&SearchError> {
        self.error.as_ref()
    }

    pub fn searched_once(&self) -> bool {
        self.searched_once
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Switch the interface/response language. Never touches in-flight
    /// query state.
    pub fn set_language(&mut self, language: Language) {
        self.language = language;
    }

    /// Submit a search. Returns `false` without side effects when the query
    /// fails the submission guard (empty first surname); a rejected query
    /// never reaches the client.
    pub fn submit(&mut self, query: SearchQuery) -> bool {
        if !query.is_submittable() {
            debug!("rejecting submit without first surname");
            return false;
        }

        info!(target_name = %query.target_name(), "starting search");
        self.query = query.clone();
        self.results.clear();
        self.summary = None;
        self.error = None;
        self.searched_once = true;
        self.status = SessionStatus::Loading;
        self.loading_since = Some(Instant::now());
        self.client.submit(query, self.language);
        true
    }

    /// User-initiated stop of an in-flight search. Distinct from natural
    /// completion: the session returns to Idle with no error surface.
    pub fn stop(&mut self) {
        if self.status != SessionStatus::Loading {
            return;
        }
        info!("search stopped by user");
        self.client.cancel();
        self.status = SessionStatus::Idle;
        self.loading_since = None;
    }

    /// Return to the initial empty state, discarding results, summary,
    /// error, and the current query.
    pub fn reset(&mut self) {
        info!("session reset");
        self.client.cancel();
        self.query = SearchQuery::default();
        self.results.clear();
        self.summary = None;
        self.error = None;
        self.searched_once = false;
        self.status = SessionStatus::Idle;
        self.loading_since = None;
    }

    /// Apply any finished outcome of the current request. Cheap; safe to
    /// call on every event-loop tick. Returns `true` when state changed.
    pub fn poll(&mut self) -> bool {
        let Some(outcome) = self.client.poll() else {
            return false;
        };

        self.loading_since = None;
        match outcome {
            SearchOutcome::Completed(response) => {
                info!(records = response.results.len(), "search completed");
                self.results = response.results;
                self.summary = Some(response.summary);
                self.status = SessionStatus::Success;
            }
            SearchOutcome::Failed(err) => {
                info!(%err, "search failed");
                self.error = Some(err);
                self.status = SessionStatus::Error;
            }
            SearchOutcome::Cancelled => {
                // Not a failure: silently leave the loading state.
                debug!("search cancelled");
                self.status = SessionStatus::Idle;
            }
        }
        true
    }

    /// Seconds spent in the current Loading state; 0 outside it.
    pub fn elapsed_seconds(&self) -> u64 {
        self.loading_since.map(|since| since.elapsed().as_secs()).unwrap_or(0)
    }

    /// Index of the rotating loading message; 0 outside Loading.
    pub fn loading_message_index(&self, message_count: usize) -> usize {
        if message_count == 0 {
            return 0;
        }
        match self.loading_since {
            Some(since) => {
                (since.elapsed().as_millis() / LOADING_MESSAGE_ROTATION_MS) as usize
                    % message_count
            }
            None => 0,
        }
    }
}
