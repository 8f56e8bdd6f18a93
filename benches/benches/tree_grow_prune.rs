// Copyright 2025 the Sapling Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Circle, Point};
use sapling_tree::{CostTree, DEFAULT_OBSTACLE_RADIUS, TreeConfig};

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
    fn point_in(&mut self, w: f64, h: f64) -> Point {
        Point::new(self.next_f64() * w, self.next_f64() * h)
    }
}

/// Grow a tree from `samples` raw samples over a `w` by `h` field, with the
/// obstacle parked in the middle.
fn grow(samples: usize, w: f64, h: f64, seed: u64) -> CostTree {
    let mut tree = CostTree::new(Point::new(w / 2.0, h / 2.0), TreeConfig::default()).unwrap();
    let obstacle = Circle::new((w * 0.75, h * 0.25), DEFAULT_OBSTACLE_RADIUS);
    let mut rng = Rng::new(seed);
    for _ in 0..samples {
        let q = tree.steer(rng.point_in(w, h)).unwrap();
        let _ = tree.insert(q, obstacle);
    }
    tree
}

fn bench_grow(c: &mut Criterion) {
    let mut group = c.benchmark_group("tree_grow");
    for &n in &[1_000usize, 5_000, 20_000] {
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("steer_insert_n{n}"), |b| {
            b.iter(|| black_box(grow(n, 800.0, 600.0, 0xCAFE_F00D_DEAD_BEEF).valid_count()));
        });
    }
    group.finish();
}

fn bench_insert_into_dense(c: &mut Criterion) {
    let mut group = c.benchmark_group("tree_insert_dense");
    let base = grow(20_000, 800.0, 600.0, 0xBADC_F00D_1234_5678);
    let far = Circle::new((1e9, 1e9), 1.0);
    let mut rng = Rng::new(0xFACE_FEED_CAFE_BABE);
    let samples: Vec<Point> = (0..256).map(|_| rng.point_in(800.0, 600.0)).collect();
    group.throughput(Throughput::Elements(samples.len() as u64));
    group.bench_function("insert_256_with_rewire", |b| {
        b.iter_batched(
            || base.clone(),
            |mut tree| {
                for &s in &samples {
                    let q = tree.steer(s).unwrap();
                    let _ = tree.insert(q, far);
                }
                black_box(tree.node_count());
            },
            BatchSize::LargeInput,
        );
    });
    group.finish();
}

fn bench_prune(c: &mut Criterion) {
    let mut group = c.benchmark_group("tree_prune");
    let base = grow(20_000, 800.0, 600.0, 0xC1A5_7E55_9999_ABCD);
    for &(label, x, y) in &[("near_root", 420.0, 300.0), ("edge", 60.0, 60.0)] {
        group.bench_function(format!("remove_in_radius_{label}"), |b| {
            b.iter_batched(
                || base.clone(),
                |mut tree| {
                    let removed = tree
                        .remove_in_radius(Point::new(x, y), DEFAULT_OBSTACLE_RADIUS)
                        .unwrap();
                    black_box(removed);
                },
                BatchSize::LargeInput,
            );
        });
    }
    group.finish();
}

fn bench_edges(c: &mut Criterion) {
    let tree = grow(20_000, 800.0, 600.0, 0x1234_5678_9ABC_DEF0);
    c.bench_function("tree_edges_collect", |b| {
        b.iter(|| black_box(tree.edges().count()));
    });
}

criterion_group!(
    benches,
    bench_grow,
    bench_insert_into_dense,
    bench_prune,
    bench_edges
);
criterion_main!(benches);
