//! Gemini `generateContent` backend with Google Search grounding.
//!
//! One HTTP request per search. The service is asked for strict JSON via a
//! response schema, but its output is still handed to the defensive
//! normalizer; only transport/auth problems become errors here.

use reqwest::StatusCode;
use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{debug, warn};

use super::{CancelToken, SearchBackend};
use crate::client::error::SearchError;
use crate::config::AppConfig;
use crate::i18n::Language;
use crate::models::{GroundingSource, SearchQuery};
use crate::parsers::{NormalizedResponse, normalize_body};

const SYSTEM_INSTRUCTION: &str = "Eres un Archivero Mayor del Estado. Tu rigor es judicial.\n\
- No mezclas personas. Si dos personas comparten nombre, sepáralas por fecha de nacimiento o unidad.\n\
- Si un dato no es 100% veraz, indica \"Dato no localizado\".\n\
- Prohibido alucinar biografías basadas en búsquedas anteriores del usuario.\n\
- Devuelve un JSON estricto con los hallazgos.";

pub struct GeminiBackend {
    http: Client,
    config: AppConfig,
}

impl GeminiBackend {
    pub fn new(config: AppConfig) -> anyhow::Result<Self> {
        let http = Client::builder().timeout(config.request_timeout).build()?;
        Ok(Self { http, config })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.endpoint.trim_end_matches('/'),
            self.config.model
        )
    }
}

impl SearchBackend for GeminiBackend {
    fn search(
        &self,
        query: &SearchQuery,
        language: Language,
        cancel: &CancelToken,
    ) -> Result<NormalizedResponse, SearchError> {
        if cancel.is_cancelled() {
            return Err(SearchError::Cancelled);
        }

        let body = build_request_body(query, language);
        debug!(target_name = %query.target_name(), "issuing search request");

        let response = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", &self.config.api_key)
            .json(&body)
            .send()
            .map_err(|err| {
                warn!(%err, "search request transport failure");
                SearchError::Transient(err.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().unwrap_or_default();
            warn!(%status, "search request rejected");
            return Err(map_status(status, &detail));
        }

        // A response arriving after cancellation is unobservable.
        if cancel.is_cancelled() {
            return Err(SearchError::Cancelled);
        }

        let envelope: ApiResponse = response.json().map_err(|err| {
            warn!(%err, "search response envelope was unreadable");
            SearchError::Transient(err.to_string())
        })?;

        let (text, grounding) = extract_candidate(envelope);
        Ok(normalize_body(&text, grounding, &query.last_name1))
    }
}

/// Map an HTTP error status onto the failure taxonomy.
///
/// Credential and entity problems (401/403/404) are fatal for the session;
/// everything else, including rate limiting and server errors, is presented
/// as retryable.
fn map_status(status: StatusCode, detail: &str) -> SearchError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN | StatusCode::NOT_FOUND => {
            SearchError::AuthFailure
        }
        _ => {
            let detail = detail.trim();
            if detail.is_empty() {
                SearchError::Transient(format!("HTTP {}", status.as_u16()))
            } else {
                SearchError::Transient(format!("HTTP {}: {}", status.as_u16(), detail))
            }
        }
    }
}

/// Build the full `generateContent` request body: prompt, system
/// instruction, strict response schema, and the grounding search tool.
pub fn build_request_body(query: &SearchQuery, language: Language) -> Value {
    json!({
        "contents": [{ "parts": [{ "text": build_user_prompt(query, language) }] }],
        "systemInstruction": { "parts": [{ "text": SYSTEM_INSTRUCTION }] },
        "generationConfig": {
            "temperature": 0,
            "responseMimeType": "application/json",
            "responseSchema": response_schema(),
        },
        "tools": [{ "googleSearch": {} }],
    })
}

fn build_user_prompt(query: &SearchQuery, language: Language) -> String {
    let mut prompt = format!(
        "INVESTIGACIÓN HISTÓRICA AISLADA - CASO: \"{}\"\n\n\
         INSTRUCCIONES DE VERIFICACIÓN (CRÍTICO):\n\
         1. AMNESIA DOCUMENTAL: solo puedes usar información localizada mediante Google Search en esta llamada específica.\n\
         2. PRECISIÓN DE APELLIDOS: si no encuentras el segundo apellido exacto del sujeto, NO lo inventes por proximidad estadística.\n\
         3. FUENTES OBLIGATORIAS: consulta el Portal de Archivos de Defensa y el Memorial Democràtic.\n",
        query.target_name()
    );

    if !query.military_service_number.trim().is_empty() {
        prompt.push_str(&format!(
            "4. EXPEDIENTE: coteja el número de expediente o chapa militar \"{}\".\n",
            query.military_service_number.trim()
        ));
    }

    if query.fuzzy {
        prompt.push_str(
            "Tolera variantes ortográficas históricas del nombre (grafías de la época).\n",
        );
    } else {
        prompt.push_str("Exige coincidencia exacta del nombre, sin variantes ortográficas.\n");
    }

    match language {
        Language::Spanish => prompt.push_str("Redacta los campos de texto en español."),
        Language::English => prompt.push_str("Write all free-text fields in English."),
    }

    prompt
}

/// The structured-output schema sent with every request. Field structure is
/// identical for both languages.
fn response_schema() -> Value {
    let source_schema = json!({
        "type": "OBJECT",
        "properties": {
            "title": { "type": "STRING" },
            "url": { "type": "STRING" },
            "searchPath": { "type": "STRING" },
        },
        "required": ["title", "url"],
    });

    json!({
        "type": "OBJECT",
        "properties": {
            "results": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "id": { "type": "STRING" },
                        "fullName": { "type": "STRING" },
                        "category": { "type": "STRING" },
                        "status": { "type": "STRING" },
                        "location": { "type": "STRING" },
                        "date": { "type": "STRING" },
                        "birthDate": { "type": "STRING" },
                        "deathDate": { "type": "STRING" },
                        "birthPlace": { "type": "STRING" },
                        "details": { "type": "STRING" },
                        "rank": { "type": "STRING" },
                        "unit": { "type": "STRING" },
                        "additionalNotes": { "type": "STRING" },
                        "latitude": { "type": "NUMBER" },
                        "longitude": { "type": "NUMBER" },
                        "sources": { "type": "ARRAY", "items": source_schema },
                    },
                    "required": ["id", "fullName", "category", "status", "details", "sources"],
                },
            },
            "summary": {
                "type": "OBJECT",
                "properties": {
                    "totalResults": { "type": "NUMBER" },
                    "keyFindings": { "type": "STRING" },
                    "historicalContext": { "type": "STRING" },
                },
                "required": ["totalResults", "keyFindings"],
            },
        },
        "required": ["results", "summary"],
    })
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ApiResponse {
    candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct Candidate {
    content: Option<Content>,
    grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Part {
    text: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct GroundingMetadata {
    grounding_chunks: Vec<GroundingChunk>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct GroundingChunk {
    web: Option<WebChunk>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WebChunk {
    title: Option<String>,
    uri: Option<String>,
}

/// Pull the generated text and the out-of-band grounding citations out of
/// the first candidate.
fn extract_candidate(envelope: ApiResponse) -> (String, Vec<GroundingSource>) {
    let Some(candidate) = envelope.candidates.into_iter().next() else {
        return (String::new(), Vec::new());
    };

    let text = candidate
        .content
        .map(|content| {
            content.parts.into_iter().filter_map(|part| part.text).collect::<Vec<_>>().join("")
        })
        .unwrap_or_default();

    let grounding = candidate
        .grounding_metadata
        .map(|metadata| {
            metadata
                .grounding_chunks
                .into_iter()
                .filter_map(|chunk| chunk.web)
                .filter_map(|web| {
                    let url = web.uri?;
                    Some(GroundingSource { title: web.title.unwrap_or_default(), url })
                })
                .collect()
        })
        .unwrap_or_default();

    (text, grounding)
}
