use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use nscluster::cluster::{kmeans_plus_plus, lloyd};
use nscluster::data::make_blobs;
use nscluster::SpectralClustering;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn bench_lloyd(c: &mut Criterion) {
    let mut group = c.benchmark_group("lloyd");
    for &(n, k) in &[(500usize, 8usize), (2000, 16), (5000, 32)] {
        let blobs = make_blobs(n, 3, k, &mut StdRng::seed_from_u64(0)).expect("blobs");
        let initial =
            kmeans_plus_plus(blobs.points.view(), k, &mut StdRng::seed_from_u64(0)).expect("seeds");
        group.bench_with_input(BenchmarkId::from_parameter(format!("n{n}_k{k}")), &n, |b, _| {
            b.iter(|| {
                lloyd(black_box(blobs.points.view()), &initial, 300, 1e-4).expect("lloyd")
            })
        });
    }
    group.finish();
}

fn bench_spectral(c: &mut Criterion) {
    let mut group = c.benchmark_group("spectral");
    group.sample_size(10);
    for &n in &[50usize, 100, 200] {
        let blobs = make_blobs(n, 2, 4, &mut StdRng::seed_from_u64(1)).expect("blobs");
        let nsc = SpectralClustering::new().with_k(4);
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| nsc.fit(black_box(&blobs.points)).expect("fit"))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_lloyd, bench_spectral);
criterion_main!(benches);
