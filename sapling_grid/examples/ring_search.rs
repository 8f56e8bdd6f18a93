// Copyright 2025 the Sapling Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Basic usage of Sapling Grid: insert, remove, and search outward ring by ring.

use sapling_grid::PointGrid;

fn main() {
    let mut grid: PointGrid<char> = PointGrid::new(10.0);
    grid.insert(3.0, 4.0, 'a');
    grid.insert(-12.0, 7.0, 'b');
    grid.insert(41.0, -2.0, 'c');
    grid.insert(44.0, -8.0, 'd');
    println!("{} points in {} cells", grid.len(), grid.occupied_cells());

    // Everything within one ring of the origin's cell.
    let near: Vec<_> = grid.query(0.0, 0.0, 1).collect();
    println!("level 1 around origin: {near:?}");

    // Walk outward until a ring holds something.
    let probe = (25.0, 25.0);
    let key = grid.key_for(probe.0, probe.1);
    if let Some(extent) = grid.extent() {
        for level in extent.chebyshev_gap(key)..=extent.chebyshev_reach(key) {
            let ring: Vec<_> = grid.query_ring(probe.0, probe.1, level).collect();
            if !ring.is_empty() {
                println!("first occupied ring around {probe:?} is {level}: {ring:?}");
                break;
            }
        }
    }

    let removed = grid.remove(41.0, -2.0, 'c');
    println!("removed c: {removed}, {} points left", grid.len());
}
