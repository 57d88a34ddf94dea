/*
 * SPDX-FileCopyrightText: 2025 Tommaso Fontana
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

/*!

Basic traits to access weighted graphs.

A [`WeightedGraph`] associates to each *live* vertex key a list of weighted
successors. Vertex keys are `usize` values dense in the interval [0 . .
[`span`](WeightedGraph::span)), but not every key in the interval needs to be
live: graphs loaded from external sources may skip identifiers, and the
algorithms in this crate tolerate such holes (a key that is not live has no
successors and is returned unchanged in memberships).

Edge weights are nonnegative `f64` values; a weight of zero denotes the
absence of an edge and must not be returned by
[`successors`](WeightedGraph::successors).

*/

use impl_tools::autoimpl;
use std::rc::Rc;

/// A read-only weighted graph.
///
/// There is no requirement that the graph be symmetric, but the community
/// detection algorithms in this crate only give meaningful results on
/// symmetric graphs (see [`symmetrize`](crate::transform::symmetrize)).
///
/// Iteration over vertex keys must be in ascending order, and successor
/// iteration must return the same sequence across calls within a single
/// borrow of the graph.
#[autoimpl(for<S: trait + ?Sized> &S, &mut S, Rc<S>)]
pub trait WeightedGraph {
    /// The type of the iterator over the live vertex keys
    /// returned by [`vertex_keys`](WeightedGraph::vertex_keys).
    type VertexKeys<'a>: Iterator<Item = usize> + 'a
    where
        Self: 'a;

    /// The type of the iterator over the weighted successors of a vertex
    /// returned by [`successors`](WeightedGraph::successors).
    type Successors<'a>: Iterator<Item = (usize, f64)> + 'a
    where
        Self: 'a;

    /// Returns one more than the largest vertex key, that is, the length
    /// that per-vertex arrays indexed by key must have.
    fn span(&self) -> usize;

    /// Returns the number of live vertices in the graph.
    fn num_nodes(&self) -> usize;

    /// Returns the number of (directed) arcs in the graph.
    fn num_arcs(&self) -> u64;

    /// Returns whether `node` is a live vertex key.
    fn has_node(&self, node: usize) -> bool;

    /// Returns an iterator over the live vertex keys in ascending order.
    fn vertex_keys(&self) -> Self::VertexKeys<'_>;

    /// Returns an iterator over the pairs (successor, weight) of a vertex.
    ///
    /// The iteration order is arbitrary but must be deterministic: two
    /// calls on the same borrow of the graph must return the same sequence.
    fn successors(&self, node: usize) -> Self::Successors<'_>;

    /// Returns the outdegree of a vertex.
    ///
    /// Note that the default implementation performs a linear scan.
    fn outdegree(&self, node: usize) -> usize {
        self.successors(node).count()
    }
}
