//! Data models for historical search results.
//!
//! This module defines the data structures shared across the application:
//!
//! - [`PersonRecord`] - One normalized biographical record
//! - [`SearchSummary`] - Aggregate narrative for a completed search
//! - [`SearchQuery`] - Parameters of one search submission
//! - [`Category`] - Closed classification of records
//!
//! Records and summaries are produced exclusively by the response normalizer
//! in the `parsers` module and are immutable for the life of a session.

pub mod query;
pub mod record;
pub mod summary;

pub use query::SearchQuery;
pub use record::{Category, PersonRecord, Source};
pub use summary::{GroundingSource, SearchSummary};
