use serde::{Deserialize, Serialize};

/// Classification of a historical record.
///
/// The search service labels records with free-form text in the response
/// language; [`Category::parse`] maps the known Spanish and English labels
/// onto this closed set and everything else onto [`Category::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    Combat,
    RearGuard,
    Repression,
    Exile,
    Disappeared,
    DecoratedCombatant,
    Other,
}

impl Category {
    /// All categories, in display order.
    pub const ALL: [Category; 7] = [
        Category::Combat,
        Category::RearGuard,
        Category::Repression,
        Category::Exile,
        Category::Disappeared,
        Category::DecoratedCombatant,
        Category::Other,
    ];

    /// Map a service-supplied label onto a category.
    ///
    /// Matching is case-insensitive and accepts both the Spanish labels the
    /// service emits by default and their English counterparts. Unknown
    /// labels fall back to [`Category::Other`].
    pub fn parse(raw: &str) -> Category {
        match raw.trim().to_lowercase().as_str() {
            "combate" | "combat" => Category::Combat,
            "retaguardia" | "rear-guard" | "rearguard" | "rear guard" => Category::RearGuard,
            "represión" | "represion" | "repression" => Category::Repression,
            "exilio" | "exile" => Category::Exile,
            "desaparecido" | "disappeared" => Category::Disappeared,
            "combatiente condecorado" | "decorated combatant" | "decorated-combatant" => {
                Category::DecoratedCombatant
            }
            _ => Category::Other,
        }
    }

    /// Canonical display label (Spanish, as used in reports and cards).
    pub fn label(&self) -> &'static str {
        match self {
            Category::Combat => "Combate",
            Category::RearGuard => "Retaguardia",
            Category::Repression => "Represión",
            Category::Exile => "Exilio",
            Category::Disappeared => "Desaparecido",
            Category::DecoratedCombatant => "Combatiente condecorado",
            Category::Other => "Otros",
        }
    }
}

/// A documentary source cited by a single record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub title: String,
    pub url: String,
    /// Archive signature or manual search path, when the source has one.
    pub search_path: Option<String>,
}

/// One normalized biographical record.
///
/// Instances are created only by the response normalizer and are immutable
/// for the life of a search session. Optional fields are `None` whenever the
/// service omitted them or supplied a placeholder value ("", "-", "n/a");
/// that normalization happens once, in the normalizer, never in views.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonRecord {
    /// Unique within a result set; assigned by the normalizer when the
    /// service omits or repeats ids.
    pub id: String,
    pub full_name: String,
    pub category: Category,
    pub status: String,
    pub details: String,
    pub location: Option<String>,
    pub date: Option<String>,
    pub birth_date: Option<String>,
    pub death_date: Option<String>,
    pub birth_place: Option<String>,
    pub rank: Option<String>,
    pub unit: Option<String>,
    pub additional_notes: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// May be empty, never meaningfully "null".
    pub sources: Vec<Source>,
}

impl PersonRecord {
    /// Coordinates usable for plotting. A record carrying only one half of
    /// the pair is not plottable.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lng)) => Some((lat, lng)),
            _ => None,
        }
    }

    /// The date shown for the record's main event: death date when known,
    /// otherwise the generic event date.
    pub fn event_date(&self) -> Option<&str> {
        self.death_date.as_deref().or(self.date.as_deref())
    }
}
