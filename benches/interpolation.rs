//! Benchmarks for the estimators and kriging

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use scatterfield::distance::DistanceMetric;
use scatterfield::grid::{fill_grid, AllPoints, Bounds, GridSpec};
use scatterfield::interpolation::{
    get_interpolation, idw_interpolation, lanczos_interpolation, InterpolationMethod,
    InterpolationOptions,
};
use scatterfield::kriging::{KrigingInterpolator, KrigingParams};
use scatterfield::point::{default_value, Point};

/// Deterministic points on a smooth surface
fn create_points(n: usize, seed: u64) -> Vec<Point> {
    let mut rng = seed;
    let mut next = move || {
        rng = rng.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        (rng >> 33) as f64 / (1u64 << 31) as f64
    };
    (0..n)
        .map(|_| {
            let x = next() * 100.0;
            let y = next() * 100.0;
            Point::with_z(x, y, 0.5 * x + 0.3 * y + 10.0 * (x / 20.0).sin())
        })
        .collect()
}

fn bench_idw(c: &mut Criterion) {
    let mut group = c.benchmark_group("interpolation/idw");
    for n in [16, 256, 4096] {
        let points = create_points(n, 42);
        let query = Point::xy(50.0, 50.0);
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| {
                idw_interpolation(
                    black_box(&query),
                    black_box(&points),
                    default_value,
                    &DistanceMetric::Planar,
                )
            })
        });
    }
    group.finish();
}

fn bench_lanczos(c: &mut Criterion) {
    let mut group = c.benchmark_group("interpolation/lanczos");
    for n in [16, 256, 4096] {
        let points = create_points(n, 7);
        let query = Point::xy(50.0, 50.0);
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| {
                lanczos_interpolation(
                    black_box(&query),
                    black_box(&points),
                    default_value,
                    10.0,
                    &DistanceMetric::Planar,
                )
                .unwrap()
            })
        });
    }
    group.finish();
}

fn bench_kriging_fit(c: &mut Criterion) {
    let mut group = c.benchmark_group("kriging/fit");
    group.sample_size(10);
    for n in [50, 100, 200] {
        let points = create_points(n, 3);
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| {
                KrigingInterpolator::new(black_box(&points), KrigingParams::default(), default_value)
                    .unwrap()
            })
        });
    }
    group.finish();
}

fn bench_kriging_predict(c: &mut Criterion) {
    let mut group = c.benchmark_group("kriging/predict");
    for n in [50, 100, 200] {
        let points = create_points(n, 3);
        let kriging = KrigingInterpolator::new(&points, KrigingParams::default(), default_value).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| kriging.predict(black_box(37.5), black_box(61.25)))
        });
    }
    group.finish();
}

fn bench_fill_grid(c: &mut Criterion) {
    let mut group = c.benchmark_group("grid/fill");
    group.sample_size(10);
    let points = create_points(256, 11);
    let bounds = Bounds::new(0.0, 0.0, 100.0, 100.0).unwrap();
    for size in [32, 64, 128] {
        let spec = GridSpec::new(size, size, bounds).unwrap();
        let idw = get_interpolation::<()>(InterpolationMethod::Idw, InterpolationOptions::default());
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| {
                fill_grid(
                    black_box(&spec),
                    &points,
                    idw.as_ref(),
                    &default_value::<()>,
                    &AllPoints,
                )
            })
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_idw,
    bench_lanczos,
    bench_kriging_fit,
    bench_kriging_predict,
    bench_fill_grid
);
criterion_main!(benches);
