// Copyright 2025 the Sapling Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sapling Grid: a sparse uniform grid for 2D point neighbourhood queries.
//!
//! Sapling Grid maps each point to the square cell that contains it and answers
//! "what lies within `n` cells of here" queries without scanning every point.
//!
//! - Insert and remove payloads by position (removal matches by value).
//! - Query the block of cells within a Chebyshev level of a point, or a single ring.
//! - Convert a Euclidean search radius into the ring level that covers it.
//!
//! The grid is sparse: only occupied cells are stored, in a `BTreeMap` keyed by
//! [`CellKey`]. Negative coordinates are ordinary coordinates and the grid grows
//! in every direction. Enumeration order is deterministic (column-major, then
//! insertion order within a cell).
//!
//! It does not depend on any geometry crate and takes raw `f64` coordinates.
//!
//! # Example
//!
//! ```rust
//! use sapling_grid::PointGrid;
//!
//! let mut grid: PointGrid<u32> = PointGrid::new(20.0);
//! grid.insert(5.0, 5.0, 1);
//! grid.insert(25.0, 5.0, 2);
//! grid.insert(-30.0, 5.0, 3);
//!
//! // Level 0 is the center cell alone.
//! let here: Vec<_> = grid.query(1.0, 1.0, 0).collect();
//! assert_eq!(here, [1]);
//!
//! // Level 1 adds the eight surrounding cells.
//! let near: Vec<_> = grid.query(1.0, 1.0, 1).collect();
//! assert_eq!(near, [1, 2]);
//!
//! // A 40-unit radius needs two rings.
//! assert_eq!(grid.level_for_radius(40.0), 2);
//! let wide: Vec<_> = grid.query(1.0, 1.0, 2).collect();
//! assert_eq!(wide, [3, 1, 2]);
//! ```
//!
//! ### Float semantics
//!
//! Coordinates are assumed finite. Non-finite input saturates to extreme cells
//! rather than panicking; validate upstream.

#![no_std]

extern crate alloc;

pub mod grid;
pub mod types;

pub use grid::PointGrid;
pub use types::{CellKey, CellRange};

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn insert_query_remove() {
        let mut grid: PointGrid<u32> = PointGrid::new(10.0);
        grid.insert(1.0, 1.0, 7);
        grid.insert(12.0, 1.0, 8);
        let hits: Vec<_> = grid.query(0.0, 0.0, 1).collect();
        assert_eq!(hits, [7, 8]);
        assert!(grid.remove(1.0, 1.0, 7));
        let hits: Vec<_> = grid.query(0.0, 0.0, 1).collect();
        assert_eq!(hits, [8]);
    }

    #[test]
    fn ring_excludes_interior() {
        let mut grid: PointGrid<u32> = PointGrid::new(10.0);
        grid.insert(5.0, 5.0, 1);
        grid.insert(15.0, 5.0, 2);
        grid.insert(25.0, 5.0, 3);
        let ring: Vec<_> = grid.query_ring(5.0, 5.0, 1).collect();
        assert_eq!(ring, [2]);
        let ring: Vec<_> = grid.query_ring(5.0, 5.0, 2).collect();
        assert_eq!(ring, [3]);
    }
}
