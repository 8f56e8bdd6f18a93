// Copyright 2025 the Sapling Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the cost tree: node identifiers, configuration, and edges.

use kurbo::Point;

use crate::error::InvalidInput;

/// Radius of the moving obstacle used by the interactive front end.
///
/// The tree never stores this; pass it in the [`kurbo::Circle`] given to
/// [`CostTree::insert`](crate::CostTree::insert) and as the radius of
/// [`CostTree::remove_in_radius`](crate::CostTree::remove_in_radius).
pub const DEFAULT_OBSTACLE_RADIUS: f64 = 100.0;

/// Identifier for a node in the tree.
///
/// Indices are dense and stable: node `n` is the `n`-th node ever created, and
/// an index is never reused, even after the node is removed.
/// [`NodeId::ROOT`] is created with the tree and is always valid.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// The root node.
    pub const ROOT: Self = Self(0);

    /// The id of the `index`-th node created. It may not exist (yet).
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    pub(crate) fn from_index(idx: usize) -> Self {
        #[allow(
            clippy::cast_possible_truncation,
            reason = "NodeId uses 32-bit indices by design."
        )]
        Self(idx as u32)
    }

    /// Position of this node in creation order.
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Whether this is [`NodeId::ROOT`].
    pub const fn is_root(self) -> bool {
        self.0 == 0
    }
}

/// Growth parameters of a [`CostTree`](crate::CostTree).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TreeConfig {
    /// Longest edge allowed between a node and its parent. Also the grid cell size.
    pub branch_length: f64,
    /// Search radius for rerouting neighbours after an insertion.
    pub improve_radius: f64,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            branch_length: 20.0,
            improve_radius: 40.0,
        }
    }
}

impl TreeConfig {
    /// Check that both lengths are positive and finite.
    pub fn validate(&self) -> Result<(), InvalidInput> {
        if !(self.branch_length.is_finite() && self.branch_length > 0.0) {
            return Err(InvalidInput::BranchLength(self.branch_length));
        }
        if !(self.improve_radius.is_finite() && self.improve_radius > 0.0) {
            return Err(InvalidInput::ImproveRadius(self.improve_radius));
        }
        Ok(())
    }
}

/// A valid non-root node together with its parent, as needed to draw one edge.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Edge {
    /// The child node.
    pub id: NodeId,
    /// Where the child sits.
    pub position: Point,
    /// Its parent.
    pub parent: NodeId,
    /// Where the parent sits.
    pub parent_position: Point,
}
