//! Benchmarks for contour extraction.
//!
//! Run with: cargo bench --package contour --bench contour_benchmarks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::Rng;
use contour::contour_grid;
use regrid::FaultIndex;
use surface_common::{ContourCalcOptions, ContourDrawOptions, FaultLine, Grid, GridGeometry};

/// Generate a smooth surface-like field with hills and valleys.
fn generate_smooth_field(ncol: usize, nrow: usize) -> Grid {
    let geom = GridGeometry::axis_aligned(
        ncol,
        nrow,
        0.0,
        0.0,
        (ncol - 1) as f64,
        (nrow - 1) as f64,
    )
    .unwrap();
    let mut data = vec![0.0f32; ncol * nrow];
    for row in 0..nrow {
        for col in 0..ncol {
            let fx = col as f32 / ncol as f32;
            let fy = row as f32 / nrow as f32;
            let v1 = (fx * std::f32::consts::PI * 4.0).sin() * 20.0;
            let v2 = (fy * std::f32::consts::PI * 4.0).sin() * 20.0;
            let v3 = ((fx + fy) * std::f32::consts::PI * 2.0).sin() * 10.0;
            data[row * ncol + col] = 50.0 + v1 + v2 + v3;
        }
    }
    Grid::new(data, geom).unwrap()
}

/// Add noise so tracing sees ragged, realistic isolines.
fn generate_noisy_field(ncol: usize, nrow: usize) -> Grid {
    let mut rng = rand::thread_rng();
    let mut grid = generate_smooth_field(ncol, nrow);
    for v in &mut grid.data {
        *v += rng.gen_range(-2.0..2.0);
    }
    grid
}

fn bench_grid_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("contour_grid_sizes");
    let calc = ContourCalcOptions {
        interval: Some(5.0),
        ..Default::default()
    };
    let draw = ContourDrawOptions::default();

    for size in [64usize, 128, 256] {
        let grid = generate_smooth_field(size, size);
        group.throughput(Throughput::Elements((size * size) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &grid, |b, grid| {
            b.iter(|| contour_grid(black_box(grid), None, &calc, &draw).unwrap());
        });
    }
    group.finish();
}

fn bench_smoothing(c: &mut Criterion) {
    let mut group = c.benchmark_group("contour_smoothing");
    let grid = generate_noisy_field(128, 128);
    let draw = ContourDrawOptions::default();

    for smoothing in [0u32, 3, 9] {
        let calc = ContourCalcOptions {
            interval: Some(5.0),
            smoothing,
            ..Default::default()
        };
        group.bench_with_input(
            BenchmarkId::from_parameter(smoothing),
            &calc,
            |b, calc| {
                b.iter(|| contour_grid(black_box(&grid), None, calc, &draw).unwrap());
            },
        );
    }
    group.finish();
}

fn bench_faulted(c: &mut Criterion) {
    let mut group = c.benchmark_group("contour_faulted");
    let grid = generate_noisy_field(128, 128);
    let faults = vec![
        FaultLine::from_xy(&[40.0, 40.0], &[-1.0, 128.0], 0.0),
        FaultLine::from_xy(&[-1.0, 128.0], &[90.0, 70.0], 0.0),
    ];
    let index = FaultIndex::new(&grid.geom, &faults).unwrap();
    let calc = ContourCalcOptions {
        interval: Some(5.0),
        ..Default::default()
    };
    let draw = ContourDrawOptions::default();

    group.bench_function("128x128_two_faults", |b| {
        b.iter(|| contour_grid(black_box(&grid), Some(&index), &calc, &draw).unwrap());
    });
    group.finish();
}

fn bench_labeled(c: &mut Criterion) {
    let mut group = c.benchmark_group("contour_labeled");
    let grid = generate_smooth_field(128, 128);
    let calc = ContourCalcOptions {
        interval: Some(5.0),
        ..Default::default()
    };
    let draw = ContourDrawOptions {
        major_label_size: 1.5,
        minor_label_size: 1.0,
        label_spacing: 30.0,
        ..Default::default()
    };

    group.bench_function("128x128_labeled", |b| {
        b.iter(|| contour_grid(black_box(&grid), None, &calc, &draw).unwrap());
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_grid_sizes,
    bench_smoothing,
    bench_faulted,
    bench_labeled
);
criterion_main!(benches);
