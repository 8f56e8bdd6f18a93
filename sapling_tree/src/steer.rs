// Copyright 2025 the Sapling Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Steering: turn a raw sample into a candidate the tree can reach.

use kurbo::Point;

use crate::error::{InvalidInput, check_point};
use crate::tree::CostTree;
use crate::types::NodeId;

impl CostTree {
    /// Clamp `sample` to within one branch of the tree.
    ///
    /// Rings of grid cells around the sample are searched outward until one
    /// holds a valid node; the closest node of that ring is the anchor. If the
    /// sample is within `branch_length` of the anchor it is returned unchanged,
    /// otherwise the point `branch_length` along the way from the anchor toward
    /// the sample is returned.
    ///
    /// The anchor is the nearest node of the first non-empty ring, which is not
    /// always the globally nearest node.
    pub fn steer(&self, sample: Point) -> Result<Point, InvalidInput> {
        check_point(sample)?;
        let (anchor, distance) = self.nearest_by_rings(sample).unwrap_or_else(|| {
            // The root never leaves the grid, so this only guards an empty search.
            let root = self.node(NodeId::ROOT).position;
            (NodeId::ROOT, sample.distance(root))
        });
        let reach = self.config().branch_length;
        if distance <= reach {
            return Ok(sample);
        }
        let from = self.node(anchor).position;
        Ok(from + (sample - from) * (reach / distance))
    }

    fn nearest_by_rings(&self, sample: Point) -> Option<(NodeId, f64)> {
        let grid = self.grid();
        let extent = grid.extent()?;
        let key = grid.key_for(sample.x, sample.y);
        // Rings nearer than the occupied block are empty; rings past its far
        // corner cannot add anything.
        for level in extent.chebyshev_gap(key)..=extent.chebyshev_reach(key) {
            let ring = grid.query_ring(sample.x, sample.y, level);
            if let Some(hit) = self.closest(sample, ring) {
                return Some(hit);
            }
        }
        None
    }
}
