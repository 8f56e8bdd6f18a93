// Copyright 2025 the Sapling Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use sapling_grid::PointGrid;

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
}

fn gen_points(count: usize, w: f64, h: f64, seed: u64) -> Vec<(f64, f64)> {
    let mut rng = Rng::new(seed);
    (0..count)
        .map(|_| (rng.next_f64() * w - w / 2.0, rng.next_f64() * h - h / 2.0))
        .collect()
}

fn filled(points: &[(f64, f64)], cell: f64) -> PointGrid<u32> {
    let mut grid = PointGrid::new(cell);
    for (i, &(x, y)) in points.iter().enumerate() {
        grid.insert(x, y, i as u32);
    }
    grid
}

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("grid_insert");
    for &n in &[1_000usize, 10_000, 100_000] {
        let points = gen_points(n, 2000.0, 2000.0, 0xCAFE_F00D_DEAD_BEEF);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("insert_n{n}"), |b| {
            b.iter(|| black_box(filled(&points, 20.0).occupied_cells()));
        });
    }
    group.finish();
}

fn bench_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("grid_query");
    let points = gen_points(100_000, 2000.0, 2000.0, 0xBADC_F00D_1234_5678);
    let grid = filled(&points, 20.0);
    let probes = gen_points(1_000, 2000.0, 2000.0, 0xFACE_FEED_CAFE_BABE);
    group.throughput(Throughput::Elements(probes.len() as u64));
    for level in [0u64, 1, 2, 5] {
        group.bench_function(format!("block_level{level}"), |b| {
            b.iter(|| {
                let hits: usize = probes.iter().map(|&(x, y)| grid.query(x, y, level).count()).sum();
                black_box(hits);
            });
        });
        group.bench_function(format!("ring_level{level}"), |b| {
            b.iter(|| {
                let hits: usize = probes
                    .iter()
                    .map(|&(x, y)| grid.query_ring(x, y, level).count())
                    .sum();
                black_box(hits);
            });
        });
    }
    group.finish();
}

fn bench_remove(c: &mut Criterion) {
    let points = gen_points(10_000, 2000.0, 2000.0, 0xC1A5_7E55_9999_ABCD);
    let grid = filled(&points, 20.0);
    c.bench_function("grid_remove_all_n10000", |b| {
        b.iter_batched(
            || grid.clone(),
            |mut g| {
                for (i, &(x, y)) in points.iter().enumerate() {
                    let _ = g.remove(x, y, i as u32);
                }
                black_box(g.is_empty());
            },
            BatchSize::LargeInput,
        );
    });
}

criterion_group!(benches, bench_insert, bench_query, bench_remove);
criterion_main!(benches);
