//! Normalization of the external service's semi-structured payload.
//!
//! The service is asked for a strict JSON shape but is not trusted to honor
//! it: every field here is optional, leniently typed, and defaulted. The
//! normalizer is the single place where placeholder values are collapsed,
//! fallback ids are assigned, the surname containment post-filter runs, and
//! aggregate counts are recomputed. Views downstream never re-normalize.

use std::collections::{BTreeMap, HashSet};

use serde::Deserialize;
use tracing::{debug, warn};

use super::deserializers::{lenient_f64, lenient_string};
use crate::models::{Category, GroundingSource, PersonRecord, SearchSummary, Source};

/// Narrative used when the service completes without supplying one.
pub const KEY_FINDINGS_FALLBACK: &str =
    "Investigación completada bajo protocolo de rigor documental.";

/// Narrative used when the response body cannot be parsed at all. The search
/// still completes, with zero records, rather than surfacing a crash.
pub const MALFORMED_PAYLOAD_FINDINGS: &str =
    "No se pudo interpretar la respuesta del servicio documental.";

/// Raw payload as declared by the response schema. Every field is defaulted;
/// a payload of `{}` is valid and yields zero records.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawPayload {
    pub results: Vec<RawRecord>,
    pub summary: Option<RawSummary>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawRecord {
    #[serde(deserialize_with = "lenient_string")]
    pub id: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub full_name: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub category: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub status: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub details: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub location: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub date: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub birth_date: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub death_date: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub birth_place: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub rank: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub unit: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub additional_notes: Option<String>,
    #[serde(deserialize_with = "lenient_f64")]
    pub latitude: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub longitude: Option<f64>,
    pub sources: Vec<RawSource>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawSource {
    #[serde(deserialize_with = "lenient_string")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub url: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub search_path: Option<String>,
}

/// Raw summary block. `totalResults` and `categoriesBreakdown` are advisory
/// and intentionally not declared: the real counts come from the normalized
/// record set, always.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawSummary {
    #[serde(deserialize_with = "lenient_string")]
    pub key_findings: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub historical_context: Option<String>,
}

/// A fully normalized response: what the query client hands to the session.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedResponse {
    pub results: Vec<PersonRecord>,
    pub summary: SearchSummary,
}

/// Collapse placeholder values to absence.
///
/// "", "-" and "n/a" (case-insensitive, after trimming) are the service's
/// ways of spelling "unknown"; they are all equivalent to a missing field.
pub fn clean_field(value: Option<String>) -> Option<String> {
    let value = value?;
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed == "-" || trimmed.eq_ignore_ascii_case("n/a") {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Parse and normalize a response body.
///
/// An empty body is treated as an empty payload (the service completed but
/// found nothing); a body that fails JSON parsing degrades to an empty
/// result set with [`MALFORMED_PAYLOAD_FINDINGS`] instead of an error.
pub fn normalize_body(
    body: &str,
    grounding_sources: Vec<GroundingSource>,
    last_name1: &str,
) -> NormalizedResponse {
    if body.trim().is_empty() {
        return normalize_payload(RawPayload::default(), grounding_sources, last_name1);
    }
    match serde_json::from_str::<RawPayload>(body) {
        Ok(payload) => normalize_payload(payload, grounding_sources, last_name1),
        Err(err) => {
            warn!(%err, "response body failed JSON parsing, degrading to empty result set");
            let mut summary = SearchSummary::empty_with_findings(MALFORMED_PAYLOAD_FINDINGS);
            summary.grounding_sources = grounding_sources;
            NormalizedResponse { results: Vec::new(), summary }
        }
    }
}

/// Normalize an already-parsed payload.
pub fn normalize_payload(
    payload: RawPayload,
    grounding_sources: Vec<GroundingSource>,
    last_name1: &str,
) -> NormalizedResponse {
    let surname = last_name1.trim().to_lowercase();
    let mut seen_ids = HashSet::new();
    let mut results = Vec::new();

    for (idx, raw) in payload.results.into_iter().enumerate() {
        let full_name = clean_field(raw.full_name).unwrap_or_default();

        // The service is a best-effort search tool and returns near-matches
        // for unrelated people. The surname containment check is the one
        // deterministic guardrail applied locally. It can also discard
        // legitimate spelling variants found under fuzzy search; that
        // trade-off is accepted, not a bug.
        if !full_name.to_lowercase().contains(&surname) {
            debug!(record = %full_name, "dropping record without surname match");
            continue;
        }

        let id = assign_id(clean_field(raw.id), idx, &mut seen_ids);
        let category =
            clean_field(raw.category).map(|c| Category::parse(&c)).unwrap_or(Category::Other);

        let sources = raw
            .sources
            .into_iter()
            .filter_map(|s| {
                let title = clean_field(s.title).unwrap_or_default();
                let url = clean_field(s.url).unwrap_or_default();
                if title.is_empty() && url.is_empty() {
                    return None;
                }
                Some(Source { title, url, search_path: clean_field(s.search_path) })
            })
            .collect();

        results.push(PersonRecord {
            id,
            full_name,
            category,
            status: clean_field(raw.status).unwrap_or_default(),
            details: clean_field(raw.details).unwrap_or_default(),
            location: clean_field(raw.location),
            date: clean_field(raw.date),
            birth_date: clean_field(raw.birth_date),
            death_date: clean_field(raw.death_date),
            birth_place: clean_field(raw.birth_place),
            rank: clean_field(raw.rank),
            unit: clean_field(raw.unit),
            additional_notes: clean_field(raw.additional_notes),
            latitude: raw.latitude,
            longitude: raw.longitude,
            sources,
        });
    }

    let mut categories_breakdown = BTreeMap::new();
    for record in &results {
        *categories_breakdown.entry(record.category).or_insert(0) += 1;
    }

    let (raw_findings, raw_context) = match payload.summary {
        Some(summary) => (summary.key_findings, summary.historical_context),
        None => (None, None),
    };

    let summary = SearchSummary {
        total_results: results.len(),
        key_findings: clean_field(raw_findings)
            .unwrap_or_else(|| KEY_FINDINGS_FALLBACK.to_string()),
        historical_context: clean_field(raw_context),
        categories_breakdown,
        grounding_sources,
    };

    NormalizedResponse { results, summary }
}

/// Use the service-supplied id when it is present and not yet taken;
/// otherwise assign a deterministic positional fallback.
fn assign_id(candidate: Option<String>, idx: usize, seen: &mut HashSet<String>) -> String {
    if let Some(id) = candidate
        && !seen.contains(&id)
    {
        seen.insert(id.clone());
        return id;
    }

    let mut fallback = format!("registro-{}", idx + 1);
    let mut attempt = 2;
    while seen.contains(&fallback) {
        fallback = format!("registro-{}-{}", idx + 1, attempt);
        attempt += 1;
    }
    seen.insert(fallback.clone());
    fallback
}
