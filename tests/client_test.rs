/// Gemini backend tests against a mock HTTP server: status-code mapping,
/// grounding extraction, and malformed-payload degradation.
mod common;

use common::{RawRecordBuilder, payload_body};
use httpmock::prelude::*;
use memoria_explorer::client::{CancelToken, GeminiBackend, SearchBackend, SearchError};
use memoria_explorer::config::AppConfig;
use memoria_explorer::i18n::Language;
use memoria_explorer::models::SearchQuery;
use memoria_explorer::parsers::MALFORMED_PAYLOAD_FINDINGS;
use serde_json::json;

fn backend_for(server: &MockServer) -> GeminiBackend {
    let mut config = AppConfig::new(Language::Spanish, "test-key".to_string());
    config.endpoint = server.base_url();
    GeminiBackend::new(config).expect("backend construction")
}

fn query() -> SearchQuery {
    SearchQuery { last_name1: "Bergoñón".to_string(), ..Default::default() }
}

fn envelope_with(body_text: &str) -> serde_json::Value {
    json!({
        "candidates": [{
            "content": { "parts": [{ "text": body_text }] },
            "groundingMetadata": {
                "groundingChunks": [
                    { "web": { "title": "Memorial Democràtic", "uri": "https://memorial.example" } }
                ]
            }
        }]
    })
}

#[test]
fn test_successful_search_normalizes_payload() {
    let server = MockServer::start();
    let payload = payload_body(
        vec![RawRecordBuilder::new("Pedro Bergoñón").build()],
        Some(json!({ "totalResults": 1, "keyFindings": "Localizado." })),
    );
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/v1beta/models/gemini-3-pro-preview:generateContent")
            .header("x-goog-api-key", "test-key");
        then.status(200).json_body(envelope_with(&payload));
    });

    let backend = backend_for(&server);
    let response = backend.search(&query(), Language::Spanish, &CancelToken::new()).unwrap();

    mock.assert();
    assert_eq!(response.results.len(), 1);
    assert_eq!(response.results[0].full_name, "Pedro Bergoñón");
    assert_eq!(response.summary.key_findings, "Localizado.");
    assert_eq!(response.summary.grounding_sources.len(), 1);
    assert_eq!(response.summary.grounding_sources[0].url, "https://memorial.example");
}

#[test]
fn test_request_carries_schema_and_search_tool() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .json_body_partial(r#"{"generationConfig": {"responseMimeType": "application/json"}}"#);
        then.status(200).json_body(envelope_with("{}"));
    });

    let backend = backend_for(&server);
    backend.search(&query(), Language::Spanish, &CancelToken::new()).unwrap();
    mock.assert();
}

#[test]
fn test_auth_failure_statuses() {
    for status in [401, 403, 404] {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST);
            then.status(status).body("Requested entity was not found.");
        });

        let backend = backend_for(&server);
        let result = backend.search(&query(), Language::Spanish, &CancelToken::new());
        assert_eq!(result.unwrap_err(), SearchError::AuthFailure, "status {}", status);
    }
}

#[test]
fn test_transient_failure_statuses() {
    for status in [429, 500, 503] {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST);
            then.status(status).body("overloaded");
        });

        let backend = backend_for(&server);
        let result = backend.search(&query(), Language::Spanish, &CancelToken::new());
        match result {
            Err(SearchError::Transient(detail)) => {
                assert!(detail.contains(&status.to_string()), "detail: {}", detail);
            }
            other => panic!("status {}: expected transient failure, got {:?}", status, other),
        }
    }
}

#[test]
fn test_connection_refused_is_transient() {
    let mut config = AppConfig::new(Language::Spanish, "test-key".to_string());
    // Nothing listens here.
    config.endpoint = "http://127.0.0.1:9".to_string();
    let backend = GeminiBackend::new(config).unwrap();

    let result = backend.search(&query(), Language::Spanish, &CancelToken::new());
    assert!(matches!(result, Err(SearchError::Transient(_))));
}

#[test]
fn test_malformed_body_text_is_zero_result_success() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST);
        then.status(200).json_body(envelope_with("the model rambled instead of emitting JSON"));
    });

    let backend = backend_for(&server);
    let response = backend.search(&query(), Language::Spanish, &CancelToken::new()).unwrap();

    assert!(response.results.is_empty());
    assert_eq!(response.summary.key_findings, MALFORMED_PAYLOAD_FINDINGS);
    // Grounding citations still ride along on the degraded summary.
    assert_eq!(response.summary.grounding_sources.len(), 1);
}

#[test]
fn test_empty_candidate_list_is_zero_result_success() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST);
        then.status(200).json_body(json!({ "candidates": [] }));
    });

    let backend = backend_for(&server);
    let response = backend.search(&query(), Language::Spanish, &CancelToken::new()).unwrap();
    assert!(response.results.is_empty());
}

#[test]
fn test_pre_cancelled_token_skips_the_request() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST);
        then.status(200).json_body(envelope_with("{}"));
    });

    let backend = backend_for(&server);
    let token = CancelToken::new();
    token.cancel();

    let result = backend.search(&query(), Language::Spanish, &token);
    assert_eq!(result.unwrap_err(), SearchError::Cancelled);
    mock.assert_hits(0);
}
