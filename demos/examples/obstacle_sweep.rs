// Copyright 2025 the Sapling Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sweep an obstacle through a grown tree.
//!
//! The obstacle walks across the field; at every step it prunes whatever it
//! touches, then the tree regrows around it.
//!
//! Run:
//! - `cargo run -p sapling_demos --example obstacle_sweep`

use kurbo::{Circle, Point};
use sapling_tree::{CostTree, DEFAULT_OBSTACLE_RADIUS, TreeConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

struct Rng(u64);

impl Rng {
    fn next_f64(&mut self) -> f64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        (x >> 11) as f64 / (1u64 << 53) as f64
    }
}

fn grow(tree: &mut CostTree, rng: &mut Rng, obstacle: Circle, samples: usize) -> usize {
    let mut added = 0;
    for _ in 0..samples {
        let sample = Point::new(rng.next_f64() * 800.0, rng.next_f64() * 600.0);
        let Ok(candidate) = tree.steer(sample) else {
            continue;
        };
        if let Ok(Some(_)) = tree.insert(candidate, obstacle) {
            added += 1;
        }
    }
    added
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut tree = CostTree::new(Point::new(100.0, 300.0), TreeConfig::default())
        .expect("default config is valid");
    let mut rng = Rng(0xC0FF_EE00_D15E_A5E5);
    let parked = Circle::new((-1000.0, -1000.0), DEFAULT_OBSTACLE_RADIUS);
    grow(&mut tree, &mut rng, parked, 3_000);
    println!("initial tree: {} nodes", tree.valid_count());

    for step in 0..8 {
        let center = Point::new(250.0 + 60.0 * f64::from(step), 300.0);
        let obstacle = Circle::new(center, DEFAULT_OBSTACLE_RADIUS);
        let removed = tree
            .remove_in_radius(center, obstacle.radius)
            .expect("obstacle is well formed");
        let added = grow(&mut tree, &mut rng, obstacle, 500);
        info!(step, removed, added, "sweep step");
        println!(
            "step {step}: obstacle at {center:?}, pruned {removed}, regrew {added}, {} live of {} created",
            tree.valid_count(),
            tree.node_count()
        );
    }
}
