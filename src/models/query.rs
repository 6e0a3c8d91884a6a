use serde::{Deserialize, Serialize};

/// Parameters of one search, as entered in the form.
///
/// `last_name1` is the only required field; [`SearchQuery::is_submittable`]
/// is checked before the query client is ever invoked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    pub first_name: String,
    pub last_name1: String,
    pub last_name2: String,
    pub military_service_number: String,
    /// Ask the service to tolerate historical spelling variants. Fuzziness
    /// is entirely the service's search strategy; no local fuzzy matching.
    pub fuzzy: bool,
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self {
            first_name: String::new(),
            last_name1: String::new(),
            last_name2: String::new(),
            military_service_number: String::new(),
            fuzzy: true,
        }
    }
}

impl SearchQuery {
    /// Whether the query satisfies the submission precondition.
    pub fn is_submittable(&self) -> bool {
        !self.last_name1.trim().is_empty()
    }

    /// The person name the search targets, with empty parts elided.
    pub fn target_name(&self) -> String {
        [self.first_name.trim(), self.last_name1.trim(), self.last_name2.trim()]
            .iter()
            .filter(|part| !part.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(" ")
    }
}
