/*
 * SPDX-FileCopyrightText: 2025 Tommaso Fontana
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Transformations on weighted graphs.

use crate::graphs::vec_graph::VecGraph;
use crate::traits::WeightedGraph;

/// Returns a symmetric copy of the given graph.
///
/// For every arc (*u*, *v*, *w*) of the input the result contains both
/// (*u*, *v*) and (*v*, *u*); when both directions are present in the input
/// with different weights, each direction keeps its own weight, so a
/// symmetric input is returned unchanged.
pub fn symmetrize(graph: &impl WeightedGraph) -> VecGraph {
    let mut sym = VecGraph::new();
    for u in graph.vertex_keys() {
        sym.add_node(u);
    }
    for u in graph.vertex_keys() {
        for (v, w) in graph.successors(u) {
            sym.add_arc(u, v, w);
        }
    }
    for u in graph.vertex_keys() {
        for (v, w) in graph.successors(u) {
            if sym.arc_weight(v, u).is_none() {
                sym.add_arc(v, u, w);
            }
        }
    }
    sym
}

/// Returns whether every arc (*u*, *v*, *w*) is matched by (*v*, *u*, *w*).
///
/// This check is linear in the number of arcs times the cost of a successor
/// scan, so the community detection entry points perform it only in debug
/// builds.
pub fn is_symmetric(graph: &impl WeightedGraph) -> bool {
    for u in graph.vertex_keys() {
        for (v, w) in graph.successors(u) {
            if graph.successors(v).find(|&(x, _)| x == u) != Some((u, w)) {
                return false;
            }
        }
    }
    true
}
