use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::record::Category;

/// A service-level citation accompanying a response, distinct from the
/// per-record [`Source`](super::record::Source) list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroundingSource {
    pub title: String,
    pub url: String,
}

/// Aggregate narrative for one completed search.
///
/// Counts are always recomputed locally from the normalized record set; the
/// values the service reports are advisory and never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchSummary {
    pub total_results: usize,
    pub key_findings: String,
    pub historical_context: Option<String>,
    pub categories_breakdown: BTreeMap<Category, usize>,
    pub grounding_sources: Vec<GroundingSource>,
}

impl SearchSummary {
    /// Summary for an empty result set with the given narrative text.
    pub fn empty_with_findings(key_findings: impl Into<String>) -> Self {
        Self {
            total_results: 0,
            key_findings: key_findings.into(),
            historical_context: None,
            categories_breakdown: BTreeMap::new(),
            grounding_sources: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_with_findings() {
        let summary = SearchSummary::empty_with_findings("nada");
        assert_eq!(summary.total_results, 0);
        assert_eq!(summary.key_findings, "nada");
        assert!(summary.historical_context.is_none());
        assert!(summary.categories_breakdown.is_empty());
        assert!(summary.grounding_sources.is_empty());
    }
}
