//! Plain-text report assembly and export helpers.
//!
//! All text built here is byte-stable for identical inputs: the emission
//! timestamp is a parameter, never read from a clock, so the same
//! `(results, summary, query, issued_at)` always produces identical bytes
//! whether the report ends up in a file, the clipboard, or a message body.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};

use crate::models::{PersonRecord, SearchQuery, SearchSummary, Source};

/// Token shown wherever a value is absent.
pub const NOT_AVAILABLE: &str = "N/D";

/// Signature shown for sources without an archive search path.
const NO_SIGNATURE: &str = "S/S";

const DIVIDER: &str =
    "================================================================================";
const SUB_DIVIDER: &str =
    "--------------------------------------------------------------------------------";

/// Format a service-supplied date as `DD/MM/YYYY`.
///
/// Accepts `YYYY-MM-DD` / `YYYY/MM/DD` and `DD-MM-YYYY` / `DD/MM/YYYY`
/// prefixes, with one- or two-digit day and month. Placeholder input yields
/// [`NOT_AVAILABLE`]; anything unrecognized passes through trimmed.
pub fn format_date(raw: &str) -> String {
    let clean = raw.trim();
    if clean.is_empty() || clean == "-" || clean.eq_ignore_ascii_case("n/a") {
        return NOT_AVAILABLE.to_string();
    }

    for pattern in ["%Y-%m-%d", "%Y/%m/%d", "%d-%m-%Y", "%d/%m/%Y"] {
        if let Ok((date, _rest)) = NaiveDate::parse_and_remainder(clean, pattern)
            && (1000..=9999).contains(&date.year())
        {
            return date.format("%d/%m/%Y").to_string();
        }
    }

    clean.to_string()
}

/// The date line shown for a record: death date when known, else the event
/// date, else the not-available token.
pub fn record_date(record: &PersonRecord) -> String {
    record.event_date().map(format_date).unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

fn display_or_token(value: Option<&str>) -> &str {
    value.unwrap_or(NOT_AVAILABLE)
}

fn format_sources(sources: &[Source]) -> String {
    sources
        .iter()
        .map(|source| {
            let signature = source.search_path.as_deref().unwrap_or(NO_SIGNATURE);
            if source.url.is_empty() {
                format!("{} ({})", source.title, signature)
            } else {
                format!("{} ({}) <{}>", source.title, signature, source.url)
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Assemble the full investigation report.
pub fn build_report(
    results: &[PersonRecord],
    summary: &SearchSummary,
    query: &SearchQuery,
    issued_at: DateTime<Utc>,
) -> String {
    let mut out = String::new();

    out.push_str(DIVIDER);
    out.push('\n');
    out.push_str("INFORME DE INVESTIGACIÓN HISTÓRICA - MEMORIAVIVA\n");
    out.push_str(DIVIDER);
    out.push_str("\n\n");

    out.push_str(&format!("SUJETO: {}\n", query.target_name()));
    out.push_str(&format!("EMISIÓN: {}\n", issued_at.format("%d/%m/%Y %H:%M")));
    out.push_str(&format!("REGISTROS SELECCIONADOS: {}\n\n", results.len()));

    out.push_str("1. SÍNTESIS GENERAL\n");
    out.push_str(SUB_DIVIDER);
    out.push('\n');
    out.push_str(&summary.key_findings);
    out.push_str("\n\n");

    out.push_str("2. RELACIÓN DOCUMENTAL\n");
    out.push_str(SUB_DIVIDER);
    out.push_str("\n\n");

    let blocks: Vec<String> = results
        .iter()
        .enumerate()
        .map(|(i, record)| {
            let mut block = format!("[{}] {}\n", i + 1, record.full_name);
            block.push_str(&format!("Categoría: {}\n", record.category.label()));
            block.push_str(&format!(
                "Ubicación: {}\n",
                display_or_token(record.location.as_deref())
            ));
            block.push_str(&format!("Fecha: {}\n", record_date(record)));
            block.push_str(&format!("Biografía: {}\n", record.details));
            if let Some(notes) = &record.additional_notes {
                block.push_str(&format!("Notas: {}\n", notes));
            }
            block.push_str(&format!("Fuentes: {}\n", format_sources(&record.sources)));
            block.push_str(SUB_DIVIDER);
            block
        })
        .collect();
    out.push_str(&blocks.join("\n\n"));

    out.push_str("\n\n");
    out.push_str(DIVIDER);
    out.push('\n');
    out.push_str("Documento generado por MemoriaViva • https://memoriaviva.ia\n");
    out.push_str(DIVIDER);
    out.push('\n');

    out
}

/// Share text for a single record.
pub fn build_record_card(record: &PersonRecord) -> String {
    format!(
        "Ficha Histórica: {}\nCategoría: {}\nUbicación: {}\nFecha: {}\nDetalles: {}\nFuentes: {}",
        record.full_name,
        record.category.label(),
        display_or_token(record.location.as_deref()),
        record_date(record),
        record.details,
        format_sources(&record.sources),
    )
}

fn sanitize_for_filename(value: &str) -> String {
    value.trim().split_whitespace().collect::<Vec<_>>().join("_")
}

/// Filename for the full report: `Investigacion_<lastName1>.txt`.
pub fn report_filename(query: &SearchQuery) -> String {
    format!("Investigacion_{}.txt", sanitize_for_filename(&query.last_name1))
}

/// Filename for a single record card: `Ficha_<fullName>.txt`.
pub fn record_filename(record: &PersonRecord) -> String {
    format!("Ficha_{}.txt", sanitize_for_filename(&record.full_name))
}

/// Write report text to `dir/filename` as UTF-8, returning the full path.
pub fn save_report(dir: &Path, filename: &str, text: &str) -> Result<PathBuf> {
    let path = dir.join(filename);
    fs::write(&path, text).with_context(|| format!("Failed to write report {}", path.display()))?;
    Ok(path)
}

/// `mailto:` link carrying the report as the message body.
pub fn mailto_link(subject: &str, body: &str) -> String {
    format!(
        "mailto:?subject={}&body={}",
        utf8_percent_encode(subject, NON_ALPHANUMERIC),
        utf8_percent_encode(body, NON_ALPHANUMERIC)
    )
}

/// WhatsApp share link for a record card or report.
pub fn whatsapp_link(text: &str) -> String {
    format!("https://wa.me/?text={}", utf8_percent_encode(text, NON_ALPHANUMERIC))
}
