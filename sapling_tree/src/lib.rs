// Copyright 2025 the Sapling Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sapling Tree: a Kurbo-native, incrementally grown cost-optimal tree.
//!
//! Sapling Tree is the sampling core of an RRT*-style planner over the plane.
//!
//! - Grows one sampled point at a time, attaching it to the reachable node with
//!   the cheapest path from the root, unless a circular obstacle blocks the edge.
//! - After each insertion, reroutes nearby nodes through the new one when that
//!   shortens their path, and lets those improvements spread outward.
//! - Prunes every node within a radius of a point, together with all of its descendants.
//! - Steers raw samples so that they land within one branch of the tree.
//!
//! Randomness, rendering, and input handling are left to the caller: samples
//! arrive already drawn, and [`CostTree::edges`] hands back what a renderer needs.
//!
//! ## Structure
//!
//! Nodes live in an arena addressed by [`NodeId`]; the root is
//! [`NodeId::ROOT`] and is never removed. Each node stores its parent and an
//! ordered list of children, and both directions are kept in sync by every
//! mutation. Removed nodes are marked invalid and keep their ids; ids are never
//! reused.
//!
//! A [`sapling_grid::PointGrid`] with cells one branch wide indexes the valid nodes,
//! so parent search, rewiring, pruning, and steering only look at nearby cells.
//! The grid is sparse, so negative coordinates work like any other.
//!
//! ## Approximations
//!
//! - [`CostTree::nearest`] looks at the sample's cell and one ring around it, no further.
//! - [`CostTree::steer`] anchors on the closest node of the first non-empty ring of
//!   cells, which may not be the globally closest node.
//! - Rewiring is a local relaxation: it only improves nodes within repeated
//!   `improve_radius` hops of the insertion, not the whole tree.
//!
//! ## API overview
//!
//! - [`CostTree`]: the tree, its growth and pruning operations, and read accessors.
//! - [`TreeConfig`]: branch length and improve radius.
//! - [`Edge`]: one child/parent pair, as yielded by [`CostTree::edges`].
//! - [`edge_blocked`]: the segment versus circle test used to veto edges.
//! - [`InvalidInput`]: malformed input (non-finite coordinates, bad radii, zero-length edges).
//!
//! # Example
//!
//! ```rust
//! use kurbo::{Circle, Point};
//! use sapling_tree::{CostTree, NodeId, TreeConfig};
//!
//! let mut tree = CostTree::new(Point::ZERO, TreeConfig::default()).unwrap();
//! let far_away = Circle::new((1e9, 1e9), 100.0);
//!
//! // Grow two nodes in a line.
//! let a = tree.insert(Point::new(15.0, 0.0), far_away).unwrap().unwrap();
//! let b = tree.insert(Point::new(30.0, 0.0), far_away).unwrap().unwrap();
//! assert_eq!(tree.parent(a), Some(NodeId::ROOT));
//! assert_eq!(tree.parent(b), Some(a));
//! assert!((tree.path_cost(b) - 30.0).abs() < 1e-9);
//!
//! // A raw sample far away is pulled in to one branch length from the tree.
//! let candidate = tree.steer(Point::new(130.0, 0.0)).unwrap();
//! assert!((candidate.x - 50.0).abs() < 1e-9);
//!
//! // An obstacle sitting on the edge vetoes growth.
//! let blocker = Circle::new((40.0, 0.0), 5.0);
//! assert_eq!(tree.insert(candidate, blocker), Ok(None));
//!
//! // Pruning around `a` takes `b` with it.
//! assert_eq!(tree.remove_in_radius(Point::new(15.0, 0.0), 5.0), Ok(2));
//! assert_eq!(tree.valid_count(), 1);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod error;
mod steer;
pub mod tree;
pub mod types;
pub mod visibility;

pub use error::InvalidInput;
pub use tree::CostTree;
pub use types::{DEFAULT_OBSTACLE_RADIUS, Edge, NodeId, TreeConfig};
pub use visibility::edge_blocked;
