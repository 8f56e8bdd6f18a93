// Copyright 2025 the Sapling Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

#![cfg(feature = "compare_rstar")]

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Circle, Point};
use sapling_tree::{CostTree, TreeConfig};

use rstar::RTree;

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

fn grown_tree(samples: usize) -> CostTree {
    let mut tree = CostTree::new(Point::new(400.0, 300.0), TreeConfig::default()).unwrap();
    let far = Circle::new((1e9, 1e9), 1.0);
    let mut rng = Rng::new(0xCAFE_F00D_DEAD_BEEF);
    for _ in 0..samples {
        let s = Point::new(rng.next_f64() * 800.0, rng.next_f64() * 600.0);
        let q = tree.steer(s).unwrap();
        let _ = tree.insert(q, far);
    }
    tree
}

fn to_rstar_points(tree: &CostTree) -> Vec<[f64; 2]> {
    tree.nodes().map(|(_, p)| [p.x, p.y]).collect()
}

fn bench_nearest_compare(c: &mut Criterion) {
    let mut group = c.benchmark_group("nearest_compare");
    for &n in &[5_000usize, 20_000] {
        let tree = grown_tree(n);
        let mut rng = Rng::new(0xFACE_FEED_CAFE_BABE);
        let probes: Vec<Point> = (0..1_000)
            .map(|_| Point::new(rng.next_f64() * 800.0, rng.next_f64() * 600.0))
            .collect();
        group.throughput(Throughput::Elements(probes.len() as u64));

        group.bench_function(format!("sapling_steer_n{n}"), |b| {
            b.iter(|| {
                for &p in &probes {
                    black_box(tree.steer(p).unwrap());
                }
            });
        });

        group.bench_function(format!("sapling_nearest_n{n}"), |b| {
            b.iter(|| {
                for &p in &probes {
                    black_box(tree.nearest(p).unwrap());
                }
            });
        });

        group.bench_function(format!("rstar_build_nearest_n{n}"), |b| {
            b.iter_batched(
                || to_rstar_points(&tree),
                |points| {
                    let rtree = RTree::bulk_load(points);
                    for &p in &probes {
                        black_box(rtree.nearest_neighbor(&[p.x, p.y]));
                    }
                },
                BatchSize::LargeInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_nearest_compare);
criterion_main!(benches);
