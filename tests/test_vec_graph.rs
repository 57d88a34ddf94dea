/*
 * SPDX-FileCopyrightText: 2025 Tommaso Fontana
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use anyhow::Result;
use overlap_communities::graphs::vec_graph::VecGraph;
use overlap_communities::traits::WeightedGraph;

#[test]
fn test_new_and_empty() -> Result<()> {
    let g = VecGraph::new();
    assert_eq!(g.span(), 0);
    assert_eq!(g.num_nodes(), 0);
    assert_eq!(g.num_arcs(), 0);

    let g = VecGraph::empty(4);
    assert_eq!(g.span(), 4);
    assert_eq!(g.num_nodes(), 4);
    assert_eq!(g.num_arcs(), 0);
    assert_eq!(g.vertex_keys().collect::<Vec<_>>(), vec![0, 1, 2, 3]);
    Ok(())
}

#[test]
fn test_add_node_sparse_keys() -> Result<()> {
    let mut g = VecGraph::new();
    assert!(g.add_node(5));
    assert!(!g.add_node(5));
    assert!(g.add_node(2));
    assert_eq!(g.span(), 6);
    assert_eq!(g.num_nodes(), 2);
    assert!(g.has_node(2));
    assert!(g.has_node(5));
    assert!(!g.has_node(3));
    assert_eq!(g.vertex_keys().collect::<Vec<_>>(), vec![2, 5]);
    assert_eq!(g.successors(3).count(), 0);
    Ok(())
}

#[test]
fn test_add_arc_sorted_and_overwrite() -> Result<()> {
    let mut g = VecGraph::empty(4);
    assert!(g.add_arc(0, 3, 1.0));
    assert!(g.add_arc(0, 1, 2.0));
    assert!(g.add_arc(0, 2, 3.0));
    assert_eq!(
        g.successors(0).collect::<Vec<_>>(),
        vec![(1, 2.0), (2, 3.0), (3, 1.0)]
    );
    assert_eq!(g.num_arcs(), 3);
    assert_eq!(g.outdegree(0), 3);

    // Overwriting does not add an arc.
    assert!(!g.add_arc(0, 2, 5.0));
    assert_eq!(g.num_arcs(), 3);
    assert_eq!(g.arc_weight(0, 2), Some(5.0));
    Ok(())
}

#[test]
fn test_remove_arc() -> Result<()> {
    let mut g = VecGraph::empty(3);
    g.add_arc(0, 1, 1.0);
    g.add_arc(0, 2, 1.0);
    assert!(g.remove_arc(0, 1));
    assert!(!g.remove_arc(0, 1));
    assert!(!g.remove_arc(1, 0));
    assert_eq!(g.num_arcs(), 1);
    assert_eq!(g.arc_weight(0, 1), None);
    assert_eq!(g.arc_weight(0, 2), Some(1.0));
    Ok(())
}

#[test]
fn test_from_arcs() -> Result<()> {
    let g = VecGraph::from_arcs([(0, 1, 1.0), (1, 0, 1.0), (3, 1, 2.0)]);
    assert_eq!(g.span(), 4);
    assert_eq!(g.num_nodes(), 3);
    assert!(!g.has_node(2));
    assert_eq!(g.num_arcs(), 3);
    assert_eq!(g.arc_weight(3, 1), Some(2.0));
    Ok(())
}

#[test]
#[should_panic(expected = "must have been added")]
fn test_add_arc_missing_node() {
    let mut g = VecGraph::empty(2);
    g.add_arc(0, 2, 1.0);
}

#[test]
#[should_panic(expected = "not positive")]
fn test_add_arc_zero_weight() {
    let mut g = VecGraph::empty(2);
    g.add_arc(0, 1, 0.0);
}
