//! Survey pipeline throughput.
//!
//! Measures extraction alone and the full text → report run for a survey
//! description with a growing number of vertices, in both coordinate families.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use survey_oxide::config::{PipelineConfig, ZoneMetadata};
use survey_oxide::extractors::CandidateExtractor;
use survey_oxide::pipeline::SurveyPipeline;

/// Vertices on a circle around São Paulo, written as a memorial descritivo.
fn geographic_memorial(vertices: usize) -> String {
    (0..vertices)
        .map(|i| {
            let t = i as f64 / vertices as f64 * std::f64::consts::TAU;
            let lat = -23.55 + 0.01 * t.sin();
            let lon = -46.63 + 0.01 * t.cos();
            format!("Vértice V{:03}: {:.6}, {:.6}; segue confrontando com a via pública.\n", i, lat, lon)
        })
        .collect()
}

fn projected_memorial(vertices: usize) -> String {
    (0..vertices)
        .map(|i| {
            let t = i as f64 / vertices as f64 * std::f64::consts::TAU;
            let e = 333_000.0 + 500.0 * t.cos();
            let n = 7_394_500.0 + 500.0 * t.sin();
            format!("Vértice P{:03} (E, N): {:.2} {:.2}; azimute 45°.\n", i, e, n)
        })
        .collect()
}

fn bench_extraction(c: &mut Criterion) {
    let mut group = c.benchmark_group("extraction");
    let extractor = CandidateExtractor::new(&PipelineConfig::default());

    for &n in &[10usize, 100, 1000] {
        let text = geographic_memorial(n);
        group.bench_with_input(BenchmarkId::new("geographic", n), &text, |b, text| {
            b.iter(|| black_box(extractor.extract(black_box(text))));
        });
    }

    group.finish();
}

fn bench_full_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_pipeline");
    let pipeline = SurveyPipeline::new();
    let no_zone = ZoneMetadata::default();
    let zone_23s = ZoneMetadata::with_zone(23, true);

    for &n in &[10usize, 100, 1000] {
        let geo = geographic_memorial(n);
        group.bench_with_input(BenchmarkId::new("geographic_fallback", n), &geo, |b, text| {
            b.iter(|| black_box(pipeline.process(black_box(text), &no_zone)));
        });

        let utm = projected_memorial(n);
        group.bench_with_input(BenchmarkId::new("projected_zone", n), &utm, |b, text| {
            b.iter(|| black_box(pipeline.process(black_box(text), &zone_23s)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_extraction, bench_full_pipeline);
criterion_main!(benches);
