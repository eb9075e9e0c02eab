//! Benchmarks for visibility polygon construction.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use sightline::{Point2, Polygon, Region, VisibilityBuilder};

/// Generates a regular n-gon boundary with deterministic radial jitter.
///
/// The jitter keeps the loop star-shaped around the origin, so it is
/// always simple.
fn jittered_ring(n: usize, radius: f64, seed: u64) -> Polygon<f64> {
    let mut state = seed;
    let mut vertices = Vec::with_capacity(n);

    for i in 0..n {
        // xorshift for deterministic random
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        let jitter = 0.8 + 0.2 * (state as f64 / u64::MAX as f64);

        let angle = (i as f64 / n as f64) * std::f64::consts::TAU;
        vertices.push(Point2::new(
            radius * jitter * angle.cos(),
            radius * jitter * angle.sin(),
        ));
    }

    Polygon::new(vertices)
}

/// Axis-aligned square hole centered at (cx, cy), wound clockwise.
fn square_hole(cx: f64, cy: f64, half: f64) -> Polygon<f64> {
    Polygon::new(vec![
        Point2::new(cx - half, cy - half),
        Point2::new(cx - half, cy + half),
        Point2::new(cx + half, cy + half),
        Point2::new(cx + half, cy - half),
    ])
}

fn bench_boundary_only(c: &mut Criterion) {
    let mut group = c.benchmark_group("visibility/boundary");

    for &n in &[16usize, 64, 256] {
        let region = Region::from_boundary(jittered_ring(n, 100.0, 0x5eed));
        let mut builder = VisibilityBuilder::new();
        builder.set_region(&region);

        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| builder.build(black_box(Point2::new(1.0, 2.0))));
        });
    }

    group.finish();
}

fn bench_with_holes(c: &mut Criterion) {
    let mut group = c.benchmark_group("visibility/with_holes");

    for &holes in &[1usize, 4, 8] {
        let mut region = Region::from_boundary(jittered_ring(64, 100.0, 0x5eed));
        for i in 0..holes {
            let angle = (i as f64 / holes as f64) * std::f64::consts::TAU;
            region.add_hole(square_hole(45.0 * angle.cos(), 45.0 * angle.sin(), 4.0));
        }

        let mut builder = VisibilityBuilder::new();
        builder.set_region(&region);

        group.bench_with_input(BenchmarkId::from_parameter(holes), &holes, |b, _| {
            b.iter(|| builder.build(black_box(Point2::new(1.0, 2.0))));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_boundary_only, bench_with_holes);
criterion_main!(benches);
