// Copyright 2025 the Sapling Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Edge visibility against a circular obstacle.

use kurbo::{Circle, Line};

use crate::error::{InvalidInput, check_point, check_radius};

/// Whether the segment `edge` crosses the boundary of `obstacle`.
///
/// Writing the segment as `p(t) = p0 + t (p1 - p0)`, the edge is blocked iff
/// `|p(t) - center|² = radius²` has a real root with `t` in `[0, 1]`. A segment
/// that lies entirely inside the circle never touches the boundary and is not
/// blocked; a tangent segment is.
///
/// Returns [`InvalidInput::DegenerateEdge`] for a zero-length edge, and the
/// usual errors for non-finite coordinates or a negative radius.
pub fn edge_blocked(edge: Line, obstacle: Circle) -> Result<bool, InvalidInput> {
    check_point(edge.p0)?;
    check_point(edge.p1)?;
    check_point(obstacle.center)?;
    let radius = check_radius(obstacle.radius)?;

    let d = edge.p1 - edge.p0;
    let f = edge.p0 - obstacle.center;
    let a = d.hypot2();
    if a == 0.0 {
        return Err(InvalidInput::DegenerateEdge {
            x: edge.p0.x,
            y: edge.p0.y,
        });
    }
    let b = 2.0 * f.dot(d);
    let c = f.hypot2() - radius * radius;
    let at = |t: f64| (a * t + b) * t + c;

    // `at` is convex, so it has a root on [0, 1] iff its minimum there is <= 0
    // and its larger endpoint value is >= 0.
    let vertex = (-b / (2.0 * a)).clamp(0.0, 1.0);
    Ok(at(vertex) <= 0.0 && c.max(a + b + c) >= 0.0)
}
