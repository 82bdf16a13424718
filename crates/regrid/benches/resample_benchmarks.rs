//! Benchmarks for grid resampling.
//!
//! Run with: cargo bench --package regrid --bench resample_benchmarks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::Rng;
use regrid::{resample, FaultIndex, ResampleMethod};
use surface_common::{FaultLine, Grid, GridGeometry};

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

/// Add noise so interpolation has no shortcuts to exploit.
fn generate_noisy_field(ncol: usize, nrow: usize) -> Grid {
    let mut rng = rand::thread_rng();
    let mut grid = generate_smooth_field(ncol, nrow);
    for v in &mut grid.data {
        *v += rng.gen_range(-5.0..5.0);
    }
    grid
}

fn bench_resample_methods(c: &mut Criterion) {
    let mut group = c.benchmark_group("resample_methods");
    let grid = generate_smooth_field(128, 128);
    let target = GridGeometry::axis_aligned(512, 512, 0.0, 0.0, 127.0, 127.0).unwrap();
    group.throughput(Throughput::Elements((512 * 512) as u64));

    for method in [ResampleMethod::Bilinear, ResampleMethod::Bicubic] {
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{:?}", method)),
            &method,
            |b, &method| {
                b.iter(|| resample(black_box(&grid), target, method, None).unwrap());
            },
        );
    }
    group.finish();
}

fn bench_faulted_resample(c: &mut Criterion) {
    let mut group = c.benchmark_group("resample_faulted");
    let grid = generate_noisy_field(128, 128);
    let faults = vec![
        FaultLine::from_xy(&[40.0, 40.0], &[-1.0, 128.0], 0.0),
        FaultLine::from_xy(&[-1.0, 128.0], &[90.0, 70.0], 0.0),
    ];
    let index = FaultIndex::new(&grid.geom, &faults).unwrap();
    let target = GridGeometry::axis_aligned(512, 512, 0.0, 0.0, 127.0, 127.0).unwrap();
    group.throughput(Throughput::Elements((512 * 512) as u64));

    group.bench_function("bicubic_two_faults", |b| {
        b.iter(|| {
            resample(
                black_box(&grid),
                target,
                ResampleMethod::Bicubic,
                Some(&index),
            )
            .unwrap()
        });
    });
    group.finish();
}

fn bench_fault_index_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("fault_index_build");
    let geom = GridGeometry::axis_aligned(256, 256, 0.0, 0.0, 255.0, 255.0).unwrap();
    let faults: Vec<FaultLine> = (0..8)
        .map(|i| {
            let x = 20.0 + i as f64 * 28.0;
            FaultLine::from_xy(&[x, x + 10.0], &[-1.0, 256.0], 0.0)
        })
        .collect();

    group.bench_function("256x256_8_faults", |b| {
        b.iter(|| FaultIndex::new(black_box(&geom), black_box(&faults)).unwrap());
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_resample_methods,
    bench_faulted_resample,
    bench_fault_index_build
);
criterion_main!(benches);
