//! MemoriaViva Explorer - Search Spanish historical memory archives
//!
//! This library implements a terminal research tool over a generative
//! search service. It provides:
//!
//! - A single-flight, cancellable query client for the external service
//! - Defensive normalization of the service's semi-structured JSON payloads
//! - A search session state machine (idle/loading/success/error)
//! - Pure derived views: category and free-text filters, map points, and
//!   byte-stable plain-text report assembly
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use memoria_explorer::client::{GeminiBackend, SearchClient};
//! use memoria_explorer::config::AppConfig;
//! use memoria_explorer::i18n::Language;
//! use memoria_explorer::models::SearchQuery;
//! use memoria_explorer::session::SearchSession;
//!
//! let config = AppConfig::from_env(Language::Spanish)?;
//! let backend = GeminiBackend::new(config)?;
//! let mut session = SearchSession::new(SearchClient::new(Arc::new(backend)), Language::Spanish);
//! session.submit(SearchQuery { last_name1: "Bergoñón".into(), ..Default::default() });
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod cli;
pub mod client;
pub mod clipboard;
pub mod config;
pub mod filters;
pub mod i18n;
pub mod map;
pub mod models;
pub mod parsers;
pub mod report;
pub mod session;
pub mod tui;

// Re-export commonly used types
pub use models::{Category, PersonRecord, SearchQuery, SearchSummary};
pub use parsers::normalize_body;
pub use session::{SearchSession, SessionStatus};
