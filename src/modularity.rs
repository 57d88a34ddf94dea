/*
 * SPDX-FileCopyrightText: 2025 Tommaso Fontana
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Weighted modularity of a membership.
//!
//! Label propagation does not optimize modularity, but modularity is the
//! customary way of judging the quality of the communities it finds.

use crate::traits::WeightedGraph;

/// Returns the total weight of the arcs of the graph.
///
/// On a symmetric graph this is twice the total edge weight.
pub fn total_edge_weight(graph: &impl WeightedGraph) -> f64 {
    graph
        .vertex_keys()
        .map(|u| graph.successors(u).map(|(_, w)| w).sum::<f64>())
        .sum()
}

/// Returns the modularity of the given membership on a symmetric graph.
///
/// # Arguments
///
/// * `graph` - the symmetric graph.
///
/// * `community` - maps each vertex key to its community.
///
/// * `m` - the total edge weight of the graph, that is,
///   [`total_edge_weight`] / 2.
///
/// * `resolution` - the resolution parameter; 1 is the classical
///   definition, larger values favor smaller communities.
pub fn modularity_by(
    graph: &impl WeightedGraph,
    community: impl Fn(usize) -> usize,
    m: f64,
    resolution: f64,
) -> f64 {
    if m == 0.0 {
        return 0.0;
    }
    let mut intra = vec![0.0; graph.span()];
    let mut total = vec![0.0; graph.span()];
    for u in graph.vertex_keys() {
        let cu = community(u);
        for (v, w) in graph.successors(u) {
            total[cu] += w;
            if cu == community(v) {
                intra[cu] += w;
            }
        }
    }
    let arc_weight = 2.0 * m;
    intra
        .iter()
        .zip(total.iter())
        .map(|(&intra, &total)| {
            intra / arc_weight - resolution * (total / arc_weight) * (total / arc_weight)
        })
        .sum()
}
