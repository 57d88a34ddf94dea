/*
 * SPDX-FileCopyrightText: 2025 Tommaso Fontana
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! The activation seam of the move iteration.
//!
//! A move iteration asks, for every vertex, whether it must be processed,
//! and reports every vertex whose dominant label changed. The static entry
//! points process everything and ignore changes; the dynamic ones start
//! from an affected set, which in the frontier strategy also grows with
//! every change. Each strategy is a separate implementation, so the
//! iteration monomorphizes on it and static runs pay nothing for the seam.

use crate::traits::WeightedGraph;
use sux::bits::BitVec;

pub(crate) trait Activation {
    /// Returns whether `node` must be processed in this pass.
    fn is_active(&self, node: usize) -> bool;

    /// Signals that the dominant label of `node` changed.
    fn node_changed(&mut self, graph: &impl WeightedGraph, node: usize);
}

/// Processes every vertex; used by the static entry points.
pub(crate) struct AllActive;

impl Activation for AllActive {
    #[inline(always)]
    fn is_active(&self, _node: usize) -> bool {
        true
    }

    #[inline(always)]
    fn node_changed(&mut self, _graph: &impl WeightedGraph, _node: usize) {}
}

/// Processes the vertices of a set computed once, up front; used by
/// delta-screening.
pub(crate) struct FixedSet(pub BitVec);

impl Activation for FixedSet {
    #[inline(always)]
    fn is_active(&self, node: usize) -> bool {
        self.0[node]
    }

    #[inline(always)]
    fn node_changed(&mut self, _graph: &impl WeightedGraph, _node: usize) {}
}

/// Processes a set seeded from the edge batch that grows by marking the
/// neighbors of every vertex whose dominant label changes.
pub(crate) struct Frontier(pub BitVec);

impl Activation for Frontier {
    #[inline(always)]
    fn is_active(&self, node: usize) -> bool {
        self.0[node]
    }

    fn node_changed(&mut self, graph: &impl WeightedGraph, node: usize) {
        for (v, _) in graph.successors(node) {
            self.0.set(v, true);
        }
    }
}
