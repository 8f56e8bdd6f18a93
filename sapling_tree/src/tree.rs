// Copyright 2025 the Sapling Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core tree implementation: structure, growth, rewiring, pruning, queries.

use alloc::vec;
use alloc::vec::Vec;
use kurbo::{Circle, Line, Point};
use sapling_grid::PointGrid;
use tracing::{debug, trace};

use crate::error::{InvalidInput, check_point, check_radius};
use crate::types::{Edge, NodeId, TreeConfig};
use crate::visibility::edge_blocked;

/// Ring level searched for a parent. With cells as wide as a branch, one ring
/// covers every point within `branch_length` of the candidate.
const PARENT_SEARCH_LEVEL: u64 = 1;

/// Incrementally grown tree that keeps root paths short.
///
/// Nodes live in an arena addressed by [`NodeId`]; each stores its parent and an
/// ordered list of children. A uniform grid with cells `branch_length` wide
/// indexes the valid nodes for neighbourhood queries.
#[derive(Clone)]
pub struct CostTree {
    config: TreeConfig,
    nodes: Vec<Node>,
    valid: usize,
    grid: PointGrid<NodeId>,
}

impl core::fmt::Debug for CostTree {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CostTree")
            .field("config", &self.config)
            .field("nodes_total", &self.nodes.len())
            .field("nodes_valid", &self.valid)
            .field("grid", &self.grid)
            .finish_non_exhaustive()
    }
}

#[derive(Clone, Debug)]
pub(crate) struct Node {
    pub(crate) position: Point,
    /// Path length from the root, kept current by every relink.
    cost: f64,
    valid: bool,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Node {
    fn new(position: Point, parent: Option<NodeId>, cost: f64) -> Self {
        Self {
            position,
            cost,
            valid: true,
            parent,
            children: Vec::new(),
        }
    }
}

impl CostTree {
    /// Create a tree holding only the root at `root`.
    pub fn new(root: Point, config: TreeConfig) -> Result<Self, InvalidInput> {
        config.validate()?;
        check_point(root)?;
        let mut tree = Self {
            config,
            nodes: Vec::new(),
            valid: 0,
            grid: PointGrid::new(config.branch_length),
        };
        tree.push_node(root, None);
        Ok(tree)
    }

    /// Growth parameters.
    pub fn config(&self) -> TreeConfig {
        self.config
    }

    /// Number of nodes ever created, removed ones included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of valid nodes, root included.
    pub fn valid_count(&self) -> usize {
        self.valid
    }

    /// The grid of valid nodes.
    pub fn grid(&self) -> &PointGrid<NodeId> {
        &self.grid
    }

    /// Returns true if `id` exists and has not been removed.
    pub fn is_valid(&self, id: NodeId) -> bool {
        self.nodes.get(id.index()).is_some_and(|n| n.valid)
    }

    /// Position of a node, removed or not. `None` for an unknown id.
    pub fn position(&self, id: NodeId) -> Option<Point> {
        self.nodes.get(id.index()).map(|n| n.position)
    }

    /// Parent of a valid non-root node.
    ///
    /// Removed nodes keep no links, so this is `None` for them as well as for the root.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id.index()).and_then(|n| n.parent)
    }

    /// Children of a node, in the order they were attached.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes
            .get(id.index())
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    /// Path from the root to `id` (inclusive). Empty if `id` is not valid.
    pub fn path_to_root(&self, id: NodeId) -> Vec<NodeId> {
        if !self.is_valid(id) {
            return Vec::new();
        }
        let mut out = Vec::new();
        let mut current = Some(id);
        while let Some(c) = current {
            out.push(c);
            current = self.nodes[c.index()].parent;
        }
        out.reverse();
        out
    }

    /// Length of the path from `id` up to the root.
    ///
    /// Returns `f64::INFINITY` if `id` or any node on its path is invalid, which
    /// keeps pruned subtrees out of every cost comparison.
    ///
    /// Costs are cached per node and refreshed top-down whenever a subtree is
    /// relinked, so `path_cost(n) == edge(n) + path_cost(parent(n))` holds exactly.
    pub fn path_cost(&self, id: NodeId) -> f64 {
        match self.nodes.get(id.index()) {
            Some(node) if node.valid => node.cost,
            _ => f64::INFINITY,
        }
    }

    /// Try to grow the tree to `candidate`.
    ///
    /// The parent is the valid node within `branch_length` of the candidate
    /// that minimises `edge length + path_cost(parent)`; on equal cost the first
    /// one met in grid order wins. Growth fails (`Ok(None)`) when no node is in
    /// reach, or when the edge from the chosen parent crosses `obstacle`.
    ///
    /// After a successful insertion, neighbours of the new node are rerouted
    /// through it whenever that shortens their path, and improvements are
    /// propagated outward from every rerouted node.
    ///
    /// A candidate sitting exactly on its chosen parent is a zero-length edge
    /// and is reported as [`InvalidInput::DegenerateEdge`].
    pub fn insert(
        &mut self,
        candidate: Point,
        obstacle: Circle,
    ) -> Result<Option<NodeId>, InvalidInput> {
        check_point(candidate)?;
        check_point(obstacle.center)?;
        check_radius(obstacle.radius)?;

        let reach = self.config.branch_length;
        let mut best: Option<(NodeId, f64)> = None;
        for id in self
            .grid
            .query(candidate.x, candidate.y, PARENT_SEARCH_LEVEL)
        {
            if !self.is_valid(id) {
                continue;
            }
            let length = candidate.distance(self.nodes[id.index()].position);
            if length > reach {
                continue;
            }
            let cost = length + self.path_cost(id);
            if best.is_none_or(|(_, c)| cost < c) {
                best = Some((id, cost));
            }
        }

        let Some((parent, _)) = best else {
            debug!(x = candidate.x, y = candidate.y, "no parent within branch length");
            return Ok(None);
        };
        let parent_position = self.nodes[parent.index()].position;
        if edge_blocked(Line::new(parent_position, candidate), obstacle)? {
            debug!(
                x = candidate.x,
                y = candidate.y,
                parent = parent.index(),
                "edge blocked by obstacle"
            );
            return Ok(None);
        }

        let id = self.push_node(candidate, Some(parent));
        let rewired = self.rewire(id);
        trace!(id = id.index(), parent = parent.index(), rewired, "inserted node");
        Ok(Some(id))
    }

    /// Propagate cheaper paths outward from `start`. Returns the number of reparents.
    fn rewire(&mut self, start: NodeId) -> usize {
        let radius = self.config.improve_radius;
        let level = self.grid.level_for_radius(radius);
        let mut rewired = 0;
        let mut frontier = vec![start];
        while let Some(current) = frontier.pop() {
            let (position, parent) = {
                let node = &self.nodes[current.index()];
                (node.position, node.parent)
            };
            let base = self.path_cost(current);
            let neighbours: Vec<NodeId> = self.grid.query(position.x, position.y, level).collect();
            for n in neighbours {
                if n == current || n.is_root() || Some(n) == parent || !self.is_valid(n) {
                    continue;
                }
                let node = &self.nodes[n.index()];
                if node.parent == Some(current) {
                    continue;
                }
                let length = node.position.distance(position);
                if length > radius {
                    continue;
                }
                let rerouted = length + base;
                if rerouted < self.path_cost(n) && self.reparent(n, current) {
                    trace!(node = n.index(), via = current.index(), cost = rerouted, "rewired");
                    rewired += 1;
                    frontier.push(n);
                }
            }
        }
        rewired
    }

    /// Move `id` under `new_parent`, keeping both link directions in sync.
    ///
    /// Refuses (returns `false`) if either node is invalid, if `id` is the root,
    /// or if `new_parent` is `id` or one of its descendants.
    pub fn reparent(&mut self, id: NodeId, new_parent: NodeId) -> bool {
        if id.is_root() || !self.is_valid(id) || !self.is_valid(new_parent) {
            return false;
        }
        if self.is_ancestor_or_self(id, new_parent) {
            return false;
        }
        let old = self.nodes[id.index()].parent;
        if old == Some(new_parent) {
            return true;
        }
        if let Some(old) = old {
            self.nodes[old.index()].children.retain(|c| *c != id);
        }
        self.nodes[new_parent.index()].children.push(id);
        self.nodes[id.index()].parent = Some(new_parent);
        self.refresh_costs(id);
        true
    }

    /// Recompute cached costs of `id` and its subtree from their parents.
    fn refresh_costs(&mut self, id: NodeId) {
        let mut work = vec![id];
        while let Some(current) = work.pop() {
            let node = &self.nodes[current.index()];
            let Some(parent) = node.parent else {
                continue;
            };
            let parent = &self.nodes[parent.index()];
            let cost = node.position.distance(parent.position) + parent.cost;
            self.nodes[current.index()].cost = cost;
            work.extend_from_slice(&self.nodes[current.index()].children);
        }
    }

    /// Whether `ancestor` lies on the path from `id` to the root (or is `id`).
    fn is_ancestor_or_self(&self, ancestor: NodeId, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(c) = current {
            if c == ancestor {
                return true;
            }
            current = self.nodes[c.index()].parent;
        }
        false
    }

    /// Remove every valid node strictly closer than `radius` to `center`,
    /// along with all of their descendants. Returns how many nodes were removed.
    ///
    /// The root is never removed.
    pub fn remove_in_radius(&mut self, center: Point, radius: f64) -> Result<usize, InvalidInput> {
        check_point(center)?;
        let radius = check_radius(radius)?;
        let level = self.grid.level_for_radius(radius);
        let hits: Vec<NodeId> = self
            .grid
            .query(center.x, center.y, level)
            .filter(|id| {
                let node = &self.nodes[id.index()];
                node.valid && node.position.distance(center) < radius
            })
            .collect();
        let removed: usize = hits.into_iter().map(|id| self.remove_node(id)).sum();
        if removed > 0 {
            debug!(x = center.x, y = center.y, radius, removed, "pruned nodes");
        }
        Ok(removed)
    }

    /// Remove a node and its whole subtree. Returns how many nodes were removed.
    ///
    /// Removing the root, or a node that is already removed, does nothing.
    /// Removed nodes are marked invalid, taken out of the grid, and lose their
    /// parent and children links; their ids are never reused.
    pub fn remove_node(&mut self, id: NodeId) -> usize {
        if id.is_root() || !self.is_valid(id) {
            return 0;
        }
        if let Some(parent) = self.nodes[id.index()].parent {
            self.nodes[parent.index()].children.retain(|c| *c != id);
        }
        let mut removed = 0;
        let mut work = vec![id];
        while let Some(current) = work.pop() {
            let node = &mut self.nodes[current.index()];
            if !node.valid {
                continue;
            }
            node.valid = false;
            node.parent = None;
            let position = node.position;
            work.append(&mut node.children);
            let found = self.grid.remove(position.x, position.y, current);
            debug_assert!(found, "valid node missing from grid");
            removed += 1;
        }
        self.valid -= removed;
        removed
    }

    /// Closest valid node in the cell of `position`, or in the surrounding ring
    /// if that cell holds none. Does not search further out.
    pub fn nearest(&self, position: Point) -> Result<Option<NodeId>, InvalidInput> {
        check_point(position)?;
        let here = self.closest(position, self.grid.query(position.x, position.y, 0));
        let found = here.or_else(|| self.closest(position, self.grid.query(position.x, position.y, 1)));
        Ok(found.map(|(id, _)| id))
    }

    /// Closest valid node among `ids`; the first one wins on equal distance.
    pub(crate) fn closest(
        &self,
        position: Point,
        ids: impl Iterator<Item = NodeId>,
    ) -> Option<(NodeId, f64)> {
        let mut best: Option<(NodeId, f64)> = None;
        for id in ids {
            let node = &self.nodes[id.index()];
            if !node.valid {
                continue;
            }
            let d = position.distance(node.position);
            if best.is_none_or(|(_, b)| d < b) {
                best = Some((id, d));
            }
        }
        best
    }

    pub(crate) fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    /// Valid nodes (root included) with their positions, in creation order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, Point)> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| n.valid)
            .map(|(i, n)| (NodeId::from_index(i), n.position))
    }

    /// One [`Edge`] per valid non-root node, in creation order.
    ///
    /// Each call walks the arena afresh; nothing is cached between calls.
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| n.valid)
            .filter_map(|(i, n)| {
                let parent = n.parent?;
                Some(Edge {
                    id: NodeId::from_index(i),
                    position: n.position,
                    parent,
                    parent_position: self.nodes[parent.index()].position,
                })
            })
    }

    fn push_node(&mut self, position: Point, parent: Option<NodeId>) -> NodeId {
        let id = NodeId::from_index(self.nodes.len());
        let cost = parent.map_or(0.0, |p| {
            let p = &self.nodes[p.index()];
            position.distance(p.position) + p.cost
        });
        self.nodes.push(Node::new(position, parent, cost));
        if let Some(p) = parent {
            self.nodes[p.index()].children.push(id);
        }
        self.grid.insert(position.x, position.y, id);
        self.valid += 1;
        id
    }
}
