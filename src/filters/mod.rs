//! Pure result-set filters.
//!
//! Pure functions of `(results, criteria)`: no mutation, cheap enough to
//! recompute on every redraw. Fuzziness is the search service's concern;
//! local filtering is deterministic substring and set membership only.

use std::collections::BTreeSet;

use crate::models::{Category, PersonRecord};

/// Case-insensitive substring filter over location, birth place, and
/// additional notes. Blank or whitespace-only text filters nothing.
pub fn filter_by_free_text(results: &[PersonRecord], text: &str) -> Vec<PersonRecord> {
    let needle = text.trim().to_lowercase();
    if needle.is_empty() {
        return results.to_vec();
    }

    results
        .iter()
        .filter(|record| {
            [&record.location, &record.birth_place, &record.additional_notes]
                .into_iter()
                .flatten()
                .any(|field| field.to_lowercase().contains(&needle))
        })
        .cloned()
        .collect()
}

/// Keep records whose category is in `categories`. An empty set means "no
/// filter" and returns everything, not nothing.
pub fn filter_by_category(
    results: &[PersonRecord],
    categories: &BTreeSet<Category>,
) -> Vec<PersonRecord> {
    if categories.is_empty() {
        return results.to_vec();
    }

    results.iter().filter(|record| categories.contains(&record.category)).cloned().collect()
}
