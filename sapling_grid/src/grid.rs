// Copyright 2025 the Sapling Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sparse uniform grid keyed by integer cell coordinates.

use alloc::collections::BTreeMap;
use alloc::vec::Vec;
use core::fmt::Debug;

use crate::types::{CellKey, CellRange};

/// Largest cell coordinate; points further out share the boundary cells.
const CELL_LIMIT: i64 = i64::MAX / 2;

/// Sparse uniform grid of point payloads.
///
/// Every payload lives in exactly one cell, chosen by floor-dividing its
/// coordinates by the cell size. Only occupied cells are stored, so the grid
/// grows in any direction and negative coordinates need no origin offset.
///
/// Queries enumerate cells column by column (increasing `x`, then increasing
/// `y`), and payloads within a cell in insertion order. That order is stable
/// and callers may rely on it for deterministic tie-breaks.
#[derive(Clone)]
pub struct PointGrid<P: Copy + PartialEq + Debug> {
    cell_size: f64,
    cells: BTreeMap<CellKey, Vec<P>>,
    extent: Option<CellRange>,
    len: usize,
}

impl<P: Copy + PartialEq + Debug> PointGrid<P> {
    /// Create an empty grid with square cells of side `cell_size`.
    pub fn new(cell_size: f64) -> Self {
        assert!(
            cell_size > 0.0 && cell_size.is_finite(),
            "cell size must be positive and finite"
        );
        Self {
            cell_size,
            cells: BTreeMap::new(),
            extent: None,
            len: 0,
        }
    }

    /// Side length of a cell.
    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// Number of payloads currently stored.
    pub fn len(&self) -> usize {
        self.len
    }

    /// True if no payloads are stored.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of non-empty cells.
    pub fn occupied_cells(&self) -> usize {
        self.cells.len()
    }

    /// Bounding block of every cell occupied since the last [`clear`](Self::clear).
    ///
    /// The extent never shrinks on removal.
    pub fn extent(&self) -> Option<CellRange> {
        self.extent
    }

    #[inline]
    fn floor_to_i64(v: f64) -> i64 {
        #[allow(
            clippy::cast_possible_truncation,
            reason = "Saturating float-to-int conversion is the intended cell mapping."
        )]
        let i = v as i64;
        let i = if (i as f64) > v { i.saturating_sub(1) } else { i };
        i.clamp(-CELL_LIMIT - 1, CELL_LIMIT)
    }

    /// Cell containing the point `(x, y)`.
    ///
    /// Cell coordinates are clamped to `±i64::MAX / 2`, so the Chebyshev
    /// distance between any two cells fits in an `i64`.
    pub fn key_for(&self, x: f64, y: f64) -> CellKey {
        CellKey::new(
            Self::floor_to_i64(x / self.cell_size),
            Self::floor_to_i64(y / self.cell_size),
        )
    }

    /// Smallest ring level whose block is guaranteed to cover a disc of `radius`
    /// around any point of the center cell: `ceil(radius / cell_size)`.
    pub fn level_for_radius(&self, radius: f64) -> u64 {
        let q = radius / self.cell_size;
        if q <= 0.0 || q.is_nan() {
            return 0;
        }
        #[allow(
            clippy::cast_possible_truncation,
            reason = "Saturating conversion; levels beyond u64 clamp to u64::MAX."
        )]
        let i = q as u64;
        if (i as f64) < q { i.saturating_add(1) } else { i }
    }

    /// Add `payload` to the cell containing `(x, y)`.
    pub fn insert(&mut self, x: f64, y: f64, payload: P) {
        let key = self.key_for(x, y);
        self.cells.entry(key).or_default().push(payload);
        match &mut self.extent {
            Some(extent) => extent.include(key),
            None => self.extent = Some(CellRange::single(key)),
        }
        self.len += 1;
    }

    /// Remove `payload` from the cell containing `(x, y)`, matching by value.
    ///
    /// Returns `false` if the payload was not found in that cell.
    pub fn remove(&mut self, x: f64, y: f64, payload: P) -> bool {
        let key = self.key_for(x, y);
        let Some(slots) = self.cells.get_mut(&key) else {
            return false;
        };
        let Some(pos) = slots.iter().position(|s| *s == payload) else {
            return false;
        };
        // Keep insertion order; it drives enumeration order.
        slots.remove(pos);
        if slots.is_empty() {
            self.cells.remove(&key);
        }
        self.len -= 1;
        true
    }

    /// Clear all cells.
    pub fn clear(&mut self) {
        self.cells.clear();
        self.extent = None;
        self.len = 0;
    }

    /// Payloads in every cell within `level` cells (Chebyshev) of the cell
    /// containing `(x, y)`, inclusive. Level `0` is the center cell alone.
    pub fn query(&self, x: f64, y: f64, level: u64) -> impl Iterator<Item = P> + '_ {
        self.block(CellRange::around(self.key_for(x, y), level))
    }

    /// Payloads in the cells at exactly Chebyshev distance `level` from the
    /// cell containing `(x, y)`.
    ///
    /// The union of rings `0..=l` equals `query(x, y, l)`, and cells come in the
    /// same column-major order as [`query`](Self::query). Only columns inside
    /// the extent are walked, so far-out rings cost no more than near ones.
    pub fn query_ring(&self, x: f64, y: f64, level: u64) -> impl Iterator<Item = P> + '_ {
        let outer = CellRange::around(self.key_for(x, y), level);
        let clipped = self.extent.and_then(|e| e.intersect(&outer));
        clipped.into_iter().flat_map(move |r| {
            (r.min.x..=r.max.x).flat_map(move |col| {
                // Outer columns are whole; inner columns only touch the top and bottom rows.
                let spans = if col == outer.min.x || col == outer.max.x {
                    [Some((r.min.y, r.max.y)), None]
                } else {
                    [
                        (r.min.y == outer.min.y).then_some((outer.min.y, outer.min.y)),
                        (r.max.y == outer.max.y).then_some((outer.max.y, outer.max.y)),
                    ]
                };
                spans.into_iter().flatten().flat_map(move |(lo, hi)| {
                    self.cells
                        .range(CellKey::new(col, lo)..=CellKey::new(col, hi))
                        .flat_map(|(_, slots)| slots.iter().copied())
                })
            })
        })
    }

    fn block(&self, range: CellRange) -> impl Iterator<Item = P> + '_ {
        let clipped = self.extent.and_then(|e| e.intersect(&range));
        clipped.into_iter().flat_map(move |r| {
            (r.min.x..=r.max.x).flat_map(move |col| {
                self.cells
                    .range(CellKey::new(col, r.min.y)..=CellKey::new(col, r.max.y))
                    .flat_map(|(_, slots)| slots.iter().copied())
            })
        })
    }
}

impl<P: Copy + PartialEq + Debug> Debug for PointGrid<P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PointGrid")
            .field("cell_size", &self.cell_size)
            .field("len", &self.len)
            .field("cells", &self.cells.len())
            .field("extent", &self.extent)
            .finish_non_exhaustive()
    }
}
