// Copyright 2025 the Sapling Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Grow a cost tree.
//!
//! Draw samples over an 800 by 600 field, steer each toward the tree, insert
//! it with an obstacle parked off to one side, and print a summary. Set
//! `RUST_LOG=sapling_tree=trace` to watch every insertion.
//!
//! Run:
//! - `cargo run -p sapling_demos --example grow_tree`

use kurbo::{Circle, Point};
use sapling_tree::{CostTree, DEFAULT_OBSTACLE_RADIUS, NodeId, TreeConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Small xorshift generator so the run is reproducible without extra crates.
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

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let (w, h) = (800.0, 600.0);
    let mut tree = CostTree::new(Point::new(w / 2.0, h / 2.0), TreeConfig::default())
        .expect("default config is valid");
    let obstacle = Circle::new((600.0, 150.0), DEFAULT_OBSTACLE_RADIUS);
    let mut rng = Rng(0x5EED_F00D_0BAD_CAFE);

    let mut rejected = 0;
    for _ in 0..5_000 {
        let sample = Point::new(rng.next_f64() * w, rng.next_f64() * h);
        let candidate = tree.steer(sample).expect("samples are finite");
        match tree.insert(candidate, obstacle) {
            Ok(Some(_)) => {}
            Ok(None) | Err(_) => rejected += 1,
        }
    }
    info!(nodes = tree.valid_count(), rejected, "grown");

    // The corner farthest from the root, and the path that reaches it.
    let corner = Point::new(w, h);
    let far = tree
        .nodes()
        .min_by(|(_, a), (_, b)| a.distance(corner).total_cmp(&b.distance(corner)))
        .map(|(id, _)| id)
        .unwrap_or(NodeId::ROOT);
    let path = tree.path_to_root(far);
    let straight = match (tree.position(far), tree.position(NodeId::ROOT)) {
        (Some(a), Some(b)) => a.distance(b),
        _ => 0.0,
    };
    println!("nodes: {}, rejected samples: {rejected}", tree.valid_count());
    println!(
        "node nearest {corner:?}: {far:?}, {} hops, cost {:.1}, straight line {straight:.1}",
        path.len() - 1,
        tree.path_cost(far),
    );

    let inside = tree
        .edges()
        .filter(|e| e.position.distance(obstacle.center) < obstacle.radius)
        .count();
    println!("edges ending inside the obstacle: {inside}");
}
