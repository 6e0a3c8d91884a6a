//! Map-point extraction for plottable records.

use std::collections::HashSet;

use crate::models::{Category, PersonRecord};

/// Marker color for categories without a dedicated color.
pub const DEFAULT_MARKER_COLOR: &str = "#44403c";

/// One plottable marker, ready for whatever widget draws the map.
#[derive(Debug, Clone, PartialEq)]
pub struct MapPoint {
    pub id: String,
    pub latitude: f64,
    pub longitude: f64,
    pub label: String,
    pub category: Category,
    pub color: &'static str,
}

/// Fixed category → marker color table.
pub fn category_color(category: Category) -> &'static str {
    match category {
        Category::Combat => "#7f1d1d",
        Category::RearGuard => "#9a3412",
        Category::Repression => "#1c1917",
        Category::Exile => "#1e3a8a",
        Category::Disappeared => "#581c87",
        Category::DecoratedCombatant => "#b45309",
        Category::Other => DEFAULT_MARKER_COLOR,
    }
}

/// Extract one point per plottable record. Records missing either half of
/// the coordinate pair are skipped, and a duplicated id contributes a
/// single point (first occurrence wins).
pub fn to_map_points(results: &[PersonRecord]) -> Vec<MapPoint> {
    let mut seen_ids = HashSet::new();
    results
        .iter()
        .filter_map(|record| {
            let (latitude, longitude) = record.coordinates()?;
            if !seen_ids.insert(record.id.clone()) {
                return None;
            }
            Some(MapPoint {
                id: record.id.clone(),
                latitude,
                longitude,
                label: record.full_name.clone(),
                category: record.category,
                color: category_color(record.category),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, coords: Option<(f64, f64)>) -> PersonRecord {
        PersonRecord {
            id: id.to_string(),
            full_name: format!("Persona {}", id),
            category: Category::Combat,
            status: String::new(),
            details: String::new(),
            location: None,
            date: None,
            birth_date: None,
            death_date: None,
            birth_place: None,
            rank: None,
            unit: None,
            additional_notes: None,
            latitude: coords.map(|(lat, _)| lat),
            longitude: coords.map(|(_, lng)| lng),
            sources: vec![],
        }
    }

    #[test]
    fn test_records_with_both_coordinates_become_points() {
        let records = vec![record("a", Some((40.4, -3.7))), record("b", Some((41.6, -0.9)))];
        let points = to_map_points(&records);
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].latitude, 40.4);
        assert_eq!(points[0].label, "Persona a");
    }

    #[test]
    fn test_partial_coordinates_are_not_plottable() {
        let mut half = record("a", None);
        half.latitude = Some(40.4);
        let records = vec![half, record("b", None)];
        assert!(to_map_points(&records).is_empty());
    }

    #[test]
    fn test_duplicate_ids_yield_one_point() {
        let records = vec![record("dup", Some((40.4, -3.7))), record("dup", Some((41.6, -0.9)))];
        let points = to_map_points(&records);
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].latitude, 40.4);
    }

    #[test]
    fn test_colors_keyed_by_category() {
        let mut exile = record("a", Some((43.3, -1.9)));
        exile.category = Category::Exile;
        let points = to_map_points(&[exile]);
        assert_eq!(points[0].color, "#1e3a8a");
    }

    #[test]
    fn test_other_category_uses_default_color() {
        assert_eq!(category_color(Category::Other), DEFAULT_MARKER_COLOR);
    }
}
