/*
 * SPDX-FileCopyrightText: 2025 Tommaso Fontana
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::traits::WeightedGraph;
use sux::bits::BitVec;

/// A mutable [`WeightedGraph`] implementation based on a vector of vectors.
///
/// Successor lists are kept sorted by successor, so arcs can be added in any
/// order; adding an arc that is already present overwrites its weight. Keys
/// may be sparse: [`add_node`](VecGraph::add_node) grows the
/// [span](WeightedGraph::span) as needed, and keys that were never added are
/// not live, have no successors, and do not count towards
/// [`num_nodes`](WeightedGraph::num_nodes).
#[derive(Clone, Debug)]
pub struct VecGraph {
    /// The number of arcs in the graph.
    num_arcs: u64,
    /// The number of live vertex keys.
    num_nodes: usize,
    /// Liveness of each vertex key; `live.len() == succ.len()`.
    live: BitVec,
    /// For each vertex key, its list of (successor, weight) pairs,
    /// sorted by successor.
    succ: Vec<Vec<(usize, f64)>>,
}

impl core::default::Default for VecGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl VecGraph {
    /// Creates a new empty graph.
    pub fn new() -> Self {
        Self {
            num_arcs: 0,
            num_nodes: 0,
            live: BitVec::new(0),
            succ: vec![],
        }
    }

    /// Creates a new graph with live keys 0 . . `n` and no arcs.
    pub fn empty(n: usize) -> Self {
        let mut g = Self::new();
        for node in 0..n {
            g.add_node(node);
        }
        g
    }

    /// Adds an isolated node to the graph and returns true if it is a new
    /// live node.
    ///
    /// The span grows to `node + 1` if necessary; keys between the old span
    /// and `node` are left non-live.
    pub fn add_node(&mut self, node: usize) -> bool {
        while self.succ.len() <= node {
            self.succ.push(Vec::new());
            self.live.push(false);
        }
        if self.live[node] {
            return false;
        }
        self.live.set(node, true);
        self.num_nodes += 1;
        true
    }

    /// Adds an arc to the graph, or overwrites its weight if it is already
    /// present; returns true if the arc is new.
    ///
    /// # Panics
    ///
    /// This method will panic if one of the given nodes is not live, or if
    /// the weight is not positive and finite.
    pub fn add_arc(&mut self, u: usize, v: usize, w: f64) -> bool {
        assert!(
            self.has_node(u) && self.has_node(v),
            "Cannot add arc ({u}, {v}): both nodes must have been added to the graph"
        );
        assert!(
            w > 0.0 && w.is_finite(),
            "Cannot add arc ({u}, {v}): weight {w} is not positive and finite"
        );
        let succ = &mut self.succ[u];
        match succ.binary_search_by_key(&v, |&(x, _)| x) {
            Ok(pos) => {
                succ[pos].1 = w;
                false
            }
            Err(pos) => {
                succ.insert(pos, (v, w));
                self.num_arcs += 1;
                true
            }
        }
    }

    /// Removes an arc from the graph and returns true if it was present.
    pub fn remove_arc(&mut self, u: usize, v: usize) -> bool {
        if !self.has_node(u) {
            return false;
        }
        let succ = &mut self.succ[u];
        match succ.binary_search_by_key(&v, |&(x, _)| x) {
            Ok(pos) => {
                succ.remove(pos);
                self.num_arcs -= 1;
                true
            }
            Err(_) => false,
        }
    }

    /// Returns the weight of the arc from `u` to `v`, or [`None`] if the
    /// arc is not in the graph.
    pub fn arc_weight(&self, u: usize, v: usize) -> Option<f64> {
        if !self.has_node(u) {
            return None;
        }
        self.succ[u]
            .binary_search_by_key(&v, |&(x, _)| x)
            .ok()
            .map(|pos| self.succ[u][pos].1)
    }

    /// Creates a new graph from an iterator of (source, destination, weight)
    /// triples, adding nodes as needed.
    pub fn from_arcs(arcs: impl IntoIterator<Item = (usize, usize, f64)>) -> Self {
        let mut g = Self::new();
        for (u, v, w) in arcs {
            g.add_node(u);
            g.add_node(v);
            g.add_arc(u, v, w);
        }
        g
    }
}

/// An iterator over the live vertex keys of a [`VecGraph`].
pub struct VertexKeys<'a> {
    live: &'a BitVec,
    next: usize,
}

impl Iterator for VertexKeys<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        while self.next < self.live.len() {
            let node = self.next;
            self.next += 1;
            if self.live[node] {
                return Some(node);
            }
        }
        None
    }
}

impl WeightedGraph for VecGraph {
    type VertexKeys<'a> = VertexKeys<'a>;
    type Successors<'a> = std::iter::Copied<std::slice::Iter<'a, (usize, f64)>>;

    fn span(&self) -> usize {
        self.succ.len()
    }

    fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    fn num_arcs(&self) -> u64 {
        self.num_arcs
    }

    fn has_node(&self, node: usize) -> bool {
        node < self.live.len() && self.live[node]
    }

    fn vertex_keys(&self) -> Self::VertexKeys<'_> {
        VertexKeys {
            live: &self.live,
            next: 0,
        }
    }

    fn successors(&self, node: usize) -> Self::Successors<'_> {
        self.succ[node].iter().copied()
    }

    fn outdegree(&self, node: usize) -> usize {
        self.succ[node].len()
    }
}
