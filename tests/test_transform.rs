/*
 * SPDX-FileCopyrightText: 2025 Tommaso Fontana
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use anyhow::Result;
use overlap_communities::graphs::vec_graph::VecGraph;
use overlap_communities::traits::WeightedGraph;
use overlap_communities::transform::{is_symmetric, symmetrize};

#[test]
fn test_symmetrize_adds_missing_arcs() -> Result<()> {
    let g = VecGraph::from_arcs([(0, 1, 1.0), (1, 2, 3.0)]);
    assert!(!is_symmetric(&g));

    let sym = symmetrize(&g);
    assert!(is_symmetric(&sym));
    assert_eq!(sym.num_arcs(), 4);
    assert_eq!(sym.arc_weight(1, 0), Some(1.0));
    assert_eq!(sym.arc_weight(2, 1), Some(3.0));
    Ok(())
}

#[test]
fn test_symmetrize_keeps_existing_weights() -> Result<()> {
    let g = VecGraph::from_arcs([(0, 1, 2.0), (1, 0, 3.0)]);
    let sym = symmetrize(&g);
    assert_eq!(sym.arc_weight(0, 1), Some(2.0));
    assert_eq!(sym.arc_weight(1, 0), Some(3.0));
    assert_eq!(sym.num_arcs(), 2);
    Ok(())
}

#[test]
fn test_symmetric_input_unchanged() -> Result<()> {
    let g = VecGraph::from_arcs([(0, 1, 1.0), (1, 0, 1.0), (0, 0, 2.0)]);
    assert!(is_symmetric(&g));
    let sym = symmetrize(&g);
    assert_eq!(sym.num_arcs(), g.num_arcs());
    assert_eq!(sym.arc_weight(0, 0), Some(2.0));
    Ok(())
}

#[test]
fn test_asymmetric_weights_detected() -> Result<()> {
    let g = VecGraph::from_arcs([(0, 1, 1.0), (1, 0, 2.0)]);
    assert!(!is_symmetric(&g));
    Ok(())
}

#[test]
fn test_sparse_keys_preserved() -> Result<()> {
    let mut g = VecGraph::new();
    g.add_node(0);
    g.add_node(3);
    g.add_arc(0, 3, 1.0);
    let sym = symmetrize(&g);
    assert_eq!(sym.span(), 4);
    assert_eq!(sym.num_nodes(), 2);
    assert!(!sym.has_node(1));
    assert_eq!(sym.arc_weight(3, 0), Some(1.0));
    Ok(())
}
