//! Benchmarks for mesh-decimate operations.
//!
//! Run with: cargo bench -p mesh-decimate
//!
//! To compare against baseline:
//! 1. First run: cargo bench -p mesh-decimate -- --save-baseline main
//! 2. After changes: cargo bench -p mesh-decimate -- --baseline main

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use mesh_decimate::{decimate_mesh, DecimateParams};
use mesh_types::IndexedMesh;

fn bench_decimate_by_size(c: &mut Criterion) {
    let mut group = c.benchmark_group("decimate_by_size");

    for subdivisions in [3_u32, 4, 5] {
        let sphere = IndexedMesh::icosphere(10.0, subdivisions);
        let params = DecimateParams::with_reduction(0.97);
        group.throughput(Throughput::Elements(sphere.faces.len() as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(sphere.faces.len()),
            &sphere,
            |b, mesh| b.iter(|| decimate_mesh(black_box(mesh), black_box(&params))),
        );
    }

    group.finish();
}

fn bench_volume_constraint(c: &mut Criterion) {
    let mut group = c.benchmark_group("decimate_volume_constraint");
    let sphere = IndexedMesh::icosphere(10.0, 4);

    for preserve in [false, true] {
        let params = DecimateParams::with_reduction(0.9).with_preserve_volume(preserve);
        group.bench_with_input(
            BenchmarkId::from_parameter(preserve),
            &params,
            |b, params| b.iter(|| decimate_mesh(black_box(&sphere), black_box(params))),
        );
    }

    group.finish();
}

criterion_group!(benches, bench_decimate_by_size, bench_volume_constraint);
criterion_main!(benches);
