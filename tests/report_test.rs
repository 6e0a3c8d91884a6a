/// Report assembly and export tests: byte stability, layout, filenames,
/// and the date-formatting contract.
mod common;

use chrono::{TimeZone, Utc};
use common::{person, person_with_source};
use memoria_explorer::models::{Category, SearchQuery, SearchSummary};
use memoria_explorer::report::{
    NOT_AVAILABLE, build_record_card, build_report, format_date, mailto_link, record_filename,
    report_filename, save_report, whatsapp_link,
};

fn sample_query() -> SearchQuery {
    SearchQuery {
        first_name: "Pedro".to_string(),
        last_name1: "Bergoñón".to_string(),
        last_name2: "Giménez".to_string(),
        ..Default::default()
    }
}

#[test]
fn test_report_is_byte_identical_with_frozen_clock() {
    let issued = Utc.with_ymd_and_hms(2024, 3, 7, 12, 30, 0).unwrap();
    let records = vec![
        person_with_source("a", "Pedro Bergoñón", Category::Combat),
        person("b", "Marceliano Bergoñón", Category::Exile),
    ];
    let summary = SearchSummary::empty_with_findings("Dos registros localizados.");
    let query = sample_query();

    let first = build_report(&records, &summary, &query, issued);
    let second = build_report(&records, &summary, &query, issued);

    assert_eq!(first.as_bytes(), second.as_bytes());
}

#[test]
fn test_report_section_layout() {
    let issued = Utc.with_ymd_and_hms(2024, 3, 7, 12, 30, 0).unwrap();
    let records = vec![person_with_source("a", "Pedro Bergoñón", Category::Combat)];
    let summary = SearchSummary::empty_with_findings("Un registro localizado.");
    let report = build_report(&records, &summary, &sample_query(), issued);

    let divider = "=".repeat(80);
    let sub_divider = "-".repeat(80);
    assert!(report.starts_with(&divider));
    assert!(report.ends_with(&format!("{}\n", divider)));
    assert!(report.contains(&sub_divider));

    // Ordered sections
    let synthesis = report.find("1. SÍNTESIS GENERAL").expect("synthesis section");
    let documentary = report.find("2. RELACIÓN DOCUMENTAL").expect("documentary section");
    let footer = report.find("Documento generado por MemoriaViva").expect("footer");
    assert!(synthesis < documentary && documentary < footer);

    assert!(report.contains("SUJETO: Pedro Bergoñón Giménez"));
    assert!(report.contains("EMISIÓN: 07/03/2024 12:30"));
    assert!(report.contains("REGISTROS SELECCIONADOS: 1"));
    assert!(report.contains("[1] Pedro Bergoñón"));
    assert!(report.contains("Fuentes: PARES (ES.37274.CDMH) <https://pares.mcu.es>"));
}

#[test]
fn test_report_uses_placeholder_token_for_absent_values() {
    let issued = Utc.with_ymd_and_hms(2024, 3, 7, 0, 0, 0).unwrap();
    let records = vec![person("a", "Pedro Bergoñón", Category::Other)];
    let summary = SearchSummary::empty_with_findings("x");
    let report = build_report(&records, &summary, &sample_query(), issued);

    assert!(report.contains(&format!("Ubicación: {}", NOT_AVAILABLE)));
    assert!(report.contains(&format!("Fecha: {}", NOT_AVAILABLE)));
}

#[test]
fn test_record_card_renders_identically_for_every_export_path() {
    // Same bytes whether the card goes to a file, the clipboard, or a link.
    let record = person_with_source("a", "Pedro Bergoñón", Category::Combat);
    let card = build_record_card(&record);

    let dir = tempfile::tempdir().unwrap();
    let path = save_report(dir.path(), &record_filename(&record), &card).unwrap();
    assert_eq!(std::fs::read_to_string(path).unwrap(), card);

    let link = whatsapp_link(&card);
    assert!(link.starts_with("https://wa.me/?text="));
}

#[test]
fn test_format_date_contract() {
    assert_eq!(format_date("2024-03-07"), "07/03/2024");
    assert_eq!(format_date("07-03-2024"), "07/03/2024");
    assert_eq!(format_date("1936/7/18"), "18/07/1936");
    assert_eq!(format_date(""), NOT_AVAILABLE);
    assert_eq!(format_date("-"), NOT_AVAILABLE);
    assert_eq!(format_date("n/a"), NOT_AVAILABLE);
    assert_eq!(format_date("not a date"), "not a date");
}

#[test]
fn test_report_filename_convention() {
    assert_eq!(report_filename(&sample_query()), "Investigacion_Bergoñón.txt");

    let record = person("a", "Pedro Bergoñón", Category::Combat);
    assert_eq!(record_filename(&record), "Ficha_Pedro_Bergoñón.txt");
}

#[test]
fn test_save_report_round_trip_utf8() {
    let issued = Utc.with_ymd_and_hms(2024, 3, 7, 12, 30, 0).unwrap();
    let records = vec![person_with_source("a", "Pedro Bergoñón", Category::Repression)];
    let summary = SearchSummary::empty_with_findings("Represión documentada en el CDMH.");
    let query = sample_query();
    let report = build_report(&records, &summary, &query, issued);

    let dir = tempfile::tempdir().unwrap();
    let path = save_report(dir.path(), &report_filename(&query), &report).unwrap();

    let on_disk = std::fs::read_to_string(&path).unwrap();
    assert_eq!(on_disk, report);
    assert!(path.file_name().unwrap().to_string_lossy().starts_with("Investigacion_"));
}

#[test]
fn test_save_report_to_missing_directory_fails_with_context() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("no-such-subdir");
    let err = save_report(&missing, "x.txt", "text").unwrap_err();
    assert!(err.to_string().contains("Failed to write report"));
}

#[test]
fn test_mailto_link_encodes_subject_and_body() {
    let link = mailto_link("Investigación MemoriaViva: Bergoñón", "SUJETO: Pedro\nFecha: N/D");
    assert!(link.starts_with("mailto:?subject="));
    assert!(link.contains("&body="));
    assert!(!link.contains(' '));
    assert!(!link.contains('\n'));
}
