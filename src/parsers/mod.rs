//! Defensive parsing of the external service's responses.
//!
//! The payload is an untrusted external format: `response.rs` declares a
//! fully-defaulted raw shape and turns it into the typed models, and
//! `deserializers.rs` holds the lenient field-level deserializers that keep
//! one badly-typed field from failing a whole payload.

pub mod deserializers;
pub mod response;

pub use response::{
    KEY_FINDINGS_FALLBACK, MALFORMED_PAYLOAD_FINDINGS, NormalizedResponse, normalize_body,
    normalize_payload,
};
