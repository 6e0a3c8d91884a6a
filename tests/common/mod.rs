//! Shared test utilities for integration tests
#![allow(dead_code)]

use memoria_explorer::models::{Category, PersonRecord, Source};
use serde_json::{Value, json};

/// Builder for raw service-payload records (the untrusted wire shape).
pub struct RawRecordBuilder {
    value: Value,
}

impl RawRecordBuilder {
    /// Create a record with the required wire fields populated.
    pub fn new(full_name: &str) -> Self {
        Self {
            value: json!({
                "id": format!("id-{}", full_name.to_lowercase().replace(' ', "-")),
                "fullName": full_name,
                "category": "Combate",
                "status": "Localizado",
                "details": "Registro de prueba.",
                "sources": [],
            }),
        }
    }

    pub fn id(mut self, id: &str) -> Self {
        self.value["id"] = json!(id);
        self
    }

    pub fn category(mut self, category: &str) -> Self {
        self.value["category"] = json!(category);
        self
    }

    pub fn field(mut self, name: &str, value: Value) -> Self {
        self.value[name] = value;
        self
    }

    pub fn coordinates(mut self, latitude: f64, longitude: f64) -> Self {
        self.value["latitude"] = json!(latitude);
        self.value["longitude"] = json!(longitude);
        self
    }

    pub fn source(mut self, title: &str, url: &str, search_path: Option<&str>) -> Self {
        let mut source = json!({ "title": title, "url": url });
        if let Some(path) = search_path {
            source["searchPath"] = json!(path);
        }
        self.value["sources"].as_array_mut().unwrap().push(source);
        self
    }

    pub fn build(self) -> Value {
        self.value
    }
}

/// Assemble a full payload body as the service would emit it.
pub fn payload_body(records: Vec<Value>, summary: Option<Value>) -> String {
    let mut payload = json!({ "results": records });
    if let Some(summary) = summary {
        payload["summary"] = summary;
    }
    payload.to_string()
}

/// A normalized record for view/report tests.
pub fn person(id: &str, full_name: &str, category: Category) -> PersonRecord {
    PersonRecord {
        id: id.to_string(),
        full_name: full_name.to_string(),
        category,
        status: "Localizado".to_string(),
        details: "Registro de prueba.".to_string(),
        location: None,
        date: None,
        birth_date: None,
        death_date: None,
        birth_place: None,
        rank: None,
        unit: None,
        additional_notes: None,
        latitude: None,
        longitude: None,
        sources: vec![],
    }
}

/// A normalized record with one archival source attached.
pub fn person_with_source(id: &str, full_name: &str, category: Category) -> PersonRecord {
    let mut record = person(id, full_name, category);
    record.sources.push(Source {
        title: "PARES".to_string(),
        url: "https://pares.mcu.es".to_string(),
        search_path: Some("ES.37274.CDMH".to_string()),
    });
    record
}
