use criterion::{criterion_group, criterion_main, Criterion};
use once_cell::sync::Lazy;
use roadatlas_lib::Atlas;
use std::hint::black_box;
use std::path::PathBuf;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(format!("../../docs/fixtures/{name}"))
}

static ATLAS: Lazy<Atlas> = Lazy::new(|| {
    Atlas::load(
        &fixture("borders.txt"),
        &fixture("capdist.csv"),
        &fixture("state_name.tsv"),
    )
    .expect("fixture atlas loads")
});

fn benchmark_shortest_path(c: &mut Criterion) {
    let atlas = &*ATLAS;

    c.bench_function("shortest_path_usa_guatemala", |b| {
        b.iter(|| {
            let route = atlas.shortest_path("United States", "Guatemala");
            black_box(route.total_km())
        });
    });

    c.bench_function("shortest_path_unreachable", |b| {
        b.iter(|| {
            let route = atlas.shortest_path("France", "Spain");
            black_box(route.hop_count())
        });
    });
}

criterion_group!(benches, benchmark_shortest_path);
criterion_main!(benches);
