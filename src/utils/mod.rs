/*
 * SPDX-FileCopyrightText: 2025 Tommaso Fontana
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Scratch buffers and small utilities shared by the propagation engines.

use crate::traits::WeightedGraph;
use std::time::Instant;

/// Reusable per-call scratch accumulating, for one vertex at a time, the
/// total edge weight towards each candidate community.
///
/// The accumulator is a dense array indexed by community id paired with a
/// sparse list of the ids whose entry is nonzero, so accumulation is O(1)
/// and clearing is linear in the number of *touched* communities rather
/// than in the span of the graph. A hash map would provide the same
/// interface with a much higher constant cost per scanned edge.
pub struct ScanScratch {
    /// Community ids with a nonzero entry in `weight`, in first-touch order
    /// (until [sorted](ScanScratch::sort_decreasing)).
    touched: Vec<usize>,
    /// Accumulated edge weight towards each community; zero means
    /// untouched.
    weight: Vec<f64>,
}

impl ScanScratch {
    /// Creates a scratch for communities with ids in [0 . . `span`).
    pub fn new(span: usize) -> Self {
        Self {
            touched: Vec::new(),
            weight: vec![0.0; span],
        }
    }

    /// Adds `weight` to the accumulator of `community`.
    #[inline(always)]
    pub fn accumulate(&mut self, community: usize, weight: f64) {
        if self.weight[community] == 0.0 {
            self.touched.push(community);
        }
        self.weight[community] += weight;
    }

    /// Zeroes the accumulators of the touched communities and forgets them.
    pub fn clear(&mut self) {
        for &community in &self.touched {
            self.weight[community] = 0.0;
        }
        self.touched.clear();
    }

    /// Returns whether no community has been touched since the last
    /// [`clear`](ScanScratch::clear).
    pub fn is_empty(&self) -> bool {
        self.touched.is_empty()
    }

    /// Returns the touched communities.
    pub fn touched(&self) -> &[usize] {
        &self.touched
    }

    /// Returns the accumulated weight towards `community`.
    #[inline(always)]
    pub fn weight(&self, community: usize) -> f64 {
        self.weight[community]
    }

    /// Sorts the touched communities by decreasing accumulated weight.
    pub fn sort_decreasing(&mut self) {
        let weight = &self.weight;
        self.touched
            .sort_unstable_by(|&c, &d| weight[d].total_cmp(&weight[c]));
    }
}

/// Returns the total incident edge weight of each vertex key, excluding
/// self-loops, as a vector of length [`span`](WeightedGraph::span).
///
/// Self-loops are excluded because the propagation kernels never scan
/// them, and the choice threshold must weigh candidates against the
/// weight that was actually scanned.
pub fn vertex_weights(graph: &impl WeightedGraph) -> Vec<f64> {
    let mut vertex_weight = vec![0.0; graph.span()];
    for u in graph.vertex_keys() {
        vertex_weight[u] = graph
            .successors(u)
            .filter(|&(v, _)| v != u)
            .map(|(_, w)| w)
            .sum();
    }
    vertex_weight
}

/// Runs `f` the given number of times and returns the average wall-clock
/// duration of one run in milliseconds.
pub fn measure_duration(repeat: usize, mut f: impl FnMut()) -> f64 {
    let start = Instant::now();
    for _ in 0..repeat {
        f();
    }
    start.elapsed().as_secs_f64() * 1000.0 / repeat.max(1) as f64
}
