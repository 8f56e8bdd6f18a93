// Copyright 2025 the Sapling Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cell coordinates and inclusive cell ranges.

/// Integer coordinate of a grid cell.
///
/// Cell `(x, y)` covers `[x * size, (x + 1) * size) × [y * size, (y + 1) * size)`.
/// Negative cells are ordinary cells.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CellKey {
    /// Column.
    pub x: i64,
    /// Row.
    pub y: i64,
}

impl CellKey {
    /// Create a cell key.
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Chebyshev (chessboard) distance between two cells, in cells.
    pub fn chebyshev(self, other: Self) -> u64 {
        self.x.abs_diff(other.x).max(self.y.abs_diff(other.y))
    }
}

/// Inclusive, axis-aligned block of cells.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CellRange {
    /// Lowest column and row (inclusive).
    pub min: CellKey,
    /// Highest column and row (inclusive).
    pub max: CellKey,
}

impl CellRange {
    /// A range covering exactly one cell.
    pub const fn single(key: CellKey) -> Self {
        Self { min: key, max: key }
    }

    /// The block of cells within `level` cells (Chebyshev) of `center`.
    pub fn around(center: CellKey, level: u64) -> Self {
        let l = i64::try_from(level).unwrap_or(i64::MAX);
        Self {
            min: CellKey::new(center.x.saturating_sub(l), center.y.saturating_sub(l)),
            max: CellKey::new(center.x.saturating_add(l), center.y.saturating_add(l)),
        }
    }

    /// Whether `key` lies inside the range.
    pub fn contains(&self, key: CellKey) -> bool {
        self.min.x <= key.x && key.x <= self.max.x && self.min.y <= key.y && key.y <= self.max.y
    }

    /// Grow the range so that it covers `key`.
    pub fn include(&mut self, key: CellKey) {
        self.min.x = self.min.x.min(key.x);
        self.min.y = self.min.y.min(key.y);
        self.max.x = self.max.x.max(key.x);
        self.max.y = self.max.y.max(key.y);
    }

    /// The overlap of two ranges, or `None` if they are disjoint.
    pub fn intersect(&self, other: &Self) -> Option<Self> {
        let min = CellKey::new(self.min.x.max(other.min.x), self.min.y.max(other.min.y));
        let max = CellKey::new(self.max.x.min(other.max.x), self.max.y.min(other.max.y));
        (min.x <= max.x && min.y <= max.y).then_some(Self { min, max })
    }

    /// Smallest level `l` such that `CellRange::around(key, l)` touches this range.
    ///
    /// Zero when `key` is inside.
    pub fn chebyshev_gap(&self, key: CellKey) -> u64 {
        let gap = |lo: i64, hi: i64, v: i64| {
            if v < lo {
                lo.abs_diff(v)
            } else if v > hi {
                v.abs_diff(hi)
            } else {
                0
            }
        };
        gap(self.min.x, self.max.x, key.x).max(gap(self.min.y, self.max.y, key.y))
    }

    /// Smallest level `l` such that `CellRange::around(key, l)` covers this whole range.
    pub fn chebyshev_reach(&self, key: CellKey) -> u64 {
        let dx = key.x.abs_diff(self.min.x).max(key.x.abs_diff(self.max.x));
        let dy = key.y.abs_diff(self.min.y).max(key.y.abs_diff(self.max.y));
        dx.max(dy)
    }
}
