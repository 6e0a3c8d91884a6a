use std::hint::black_box;

use chrono::{TimeZone, Utc};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use memoria_explorer::models::{Category, PersonRecord, SearchQuery, SearchSummary, Source};
use memoria_explorer::report::build_report;

/// Generate synthetic normalized records
fn generate_records(num_records: usize) -> Vec<PersonRecord> {
    (0..num_records)
        .map(|i| PersonRecord {
            id: format!("registro-{}", i),
            full_name: format!("Persona {} Bergoñón", i),
            category: Category::ALL[i % Category::ALL.len()],
            status: "Localizado".to_string(),
            details: "Expediente militar digitalizado con anotaciones del tribunal.".to_string(),
            location: Some("Teruel".to_string()),
            date: Some("1938-01-15".to_string()),
            birth_date: None,
            death_date: if i % 2 == 0 { Some("1939-02-10".to_string()) } else { None },
            birth_place: Some("Zaragoza".to_string()),
            rank: Some("Soldado".to_string()),
            unit: None,
            additional_notes: if i % 3 == 0 { Some("Expediente incompleto.".to_string()) } else { None },
            latitude: None,
            longitude: None,
            sources: vec![Source {
                title: "PARES".to_string(),
                url: "https://pares.mcu.es".to_string(),
                search_path: Some(format!("ES.37274.{}", i)),
            }],
        })
        .collect()
}

fn bench_report_building(c: &mut Criterion) {
    let mut group = c.benchmark_group("report_building");

    let query = SearchQuery { last_name1: "Bergoñón".to_string(), ..Default::default() };
    let summary = SearchSummary::empty_with_findings("Lote sintético de registros.");
    let issued = Utc.with_ymd_and_hms(2024, 3, 7, 12, 30, 0).unwrap();

    for size in [10, 100, 1_000].iter() {
        let records = generate_records(*size);

        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::new("build_report", size), size, |b, _| {
            b.iter(|| {
                build_report(
                    black_box(&records),
                    black_box(&summary),
                    black_box(&query),
                    black_box(issued),
                )
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_report_building);
criterion_main!(benches);
