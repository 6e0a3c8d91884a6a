use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use memoria_explorer::parsers::normalize_body;
use serde_json::json;

/// Generate a synthetic service payload with the given number of records,
/// a third of which fail the surname filter.
fn generate_payload(num_records: usize) -> String {
    let records: Vec<serde_json::Value> = (0..num_records)
        .map(|i| {
            let surname = if i % 3 == 0 { "García" } else { "Bergoñón" };
            json!({
                "id": format!("registro-{}", i),
                "fullName": format!("Persona {} {}", i, surname),
                "category": ["Combate", "Exilio", "Represión", "inventada"][i % 4],
                "status": "Localizado",
                "details": "Expediente militar digitalizado con anotaciones del tribunal.",
                "location": if i % 2 == 0 { json!("Teruel") } else { json!("n/a") },
                "date": "1938-01-15",
                "latitude": if i % 5 == 0 { json!(40.34) } else { json!(null) },
                "longitude": if i % 5 == 0 { json!("-1.10") } else { json!(null) },
                "sources": [{
                    "title": "PARES",
                    "url": "https://pares.mcu.es",
                    "searchPath": format!("ES.37274.{}", i)
                }],
            })
        })
        .collect();

    json!({
        "results": records,
        "summary": { "totalResults": num_records, "keyFindings": "Lote sintético." }
    })
    .to_string()
}

fn bench_response_normalization(c: &mut Criterion) {
    let mut group = c.benchmark_group("response_normalization");

    for size in [10, 100, 1_000].iter() {
        let body = generate_payload(*size);

        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::new("normalize_body", size), size, |b, _| {
            b.iter(|| normalize_body(black_box(&body), black_box(vec![]), black_box("Bergoñón")));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_response_normalization);
criterion_main!(benches);
