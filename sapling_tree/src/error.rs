// Copyright 2025 the Sapling Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Precondition violations reported by the tree.
//!
//! Failing to grow (no parent in reach, blocked edge) is not an error; those
//! outcomes are `Ok(None)`. The variants here describe malformed input.

use kurbo::Point;
use thiserror::Error;

/// Input that violates a precondition of the tree.
#[derive(Copy, Clone, Debug, PartialEq, Error)]
pub enum InvalidInput {
    /// A coordinate is NaN or infinite.
    #[error("coordinate is not finite: ({x}, {y})")]
    NonFinite {
        /// Offending x.
        x: f64,
        /// Offending y.
        y: f64,
    },
    /// Branch length must be positive and finite.
    #[error("branch length must be positive and finite, got {0}")]
    BranchLength(f64),
    /// Improve radius must be positive and finite.
    #[error("improve radius must be positive and finite, got {0}")]
    ImproveRadius(f64),
    /// A removal or obstacle radius is negative or not finite.
    #[error("radius must be non-negative and finite, got {0}")]
    Radius(f64),
    /// An edge of zero length reached the visibility test.
    #[error("zero-length edge at ({x}, {y})")]
    DegenerateEdge {
        /// Location of the collapsed edge.
        x: f64,
        /// Location of the collapsed edge.
        y: f64,
    },
}

/// Reject points with a NaN or infinite coordinate.
pub(crate) fn check_point(p: Point) -> Result<Point, InvalidInput> {
    if p.is_finite() {
        Ok(p)
    } else {
        Err(InvalidInput::NonFinite { x: p.x, y: p.y })
    }
}

/// Reject negative or non-finite radii.
pub(crate) fn check_radius(r: f64) -> Result<f64, InvalidInput> {
    if r.is_finite() && r >= 0.0 {
        Ok(r)
    } else {
        Err(InvalidInput::Radius(r))
    }
}
