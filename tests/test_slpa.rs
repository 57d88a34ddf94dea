/*
 * SPDX-FileCopyrightText: 2025 Tommaso Fontana
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use anyhow::Result;
use dsi_progress_logger::no_logging;
use overlap_communities::graphs::vec_graph::VecGraph;
use overlap_communities::slpa::{slpa, SlpaOptions, Tiebreak};

fn sym(edges: &[(usize, usize, f64)]) -> VecGraph {
    let mut g = VecGraph::new();
    for &(u, v, _) in edges {
        g.add_node(u);
        g.add_node(v);
    }
    for &(u, v, w) in edges {
        g.add_arc(u, v, w);
        if u != v {
            g.add_arc(v, u, w);
        }
    }
    g
}

fn two_triangles() -> VecGraph {
    sym(&[
        (0, 1, 1.0),
        (0, 2, 1.0),
        (1, 2, 1.0),
        (3, 4, 1.0),
        (3, 5, 1.0),
        (4, 5, 1.0),
    ])
}

#[test]
fn test_determinism() -> Result<()> {
    let g = two_triangles();
    let options = SlpaOptions {
        seed: 42,
        ..SlpaOptions::default()
    };
    let first = slpa::<8, _, _>(&g, None, &options, no_logging![])?;
    let second = slpa::<8, _, _>(&g, None, &options, no_logging![])?;
    assert_eq!(first.membership, second.membership);
    assert_eq!(first.iterations, second.iterations);
    Ok(())
}

#[test]
fn test_repeat_invariance() -> Result<()> {
    let g = two_triangles();
    let once = SlpaOptions {
        seed: 7,
        ..SlpaOptions::default()
    };
    let thrice = SlpaOptions { repeat: 3, ..once };
    let first = slpa::<8, _, _>(&g, None, &once, no_logging![])?;
    let second = slpa::<8, _, _>(&g, None, &thrice, no_logging![])?;
    assert_eq!(first.membership, second.membership);
    assert_eq!(first.iterations, second.iterations);
    Ok(())
}

#[test]
fn test_labels_stay_in_component() -> Result<()> {
    let g = two_triangles();
    for seed in 0..8 {
        let options = SlpaOptions {
            seed,
            ..SlpaOptions::default()
        };
        let result = slpa::<8, _, _>(&g, None, &options, no_logging![])?;
        for u in 0..3 {
            assert!(result.membership[u] < 3);
        }
        for u in 3..6 {
            assert!((3..6).contains(&result.membership[u]));
        }
    }
    Ok(())
}

#[test]
fn test_tiebreak_modes() -> Result<()> {
    let g = two_triangles();
    for tiebreak in [Tiebreak::Parity, Tiebreak::Strict, Tiebreak::Uniform] {
        let options = SlpaOptions {
            seed: 3,
            tiebreak,
            ..SlpaOptions::default()
        };
        let first = slpa::<8, _, _>(&g, None, &options, no_logging![])?;
        let second = slpa::<8, _, _>(&g, None, &options, no_logging![])?;
        assert_eq!(first.membership, second.membership);
        for u in 0..3 {
            assert!(first.membership[u] < 3);
        }
    }
    Ok(())
}

#[test]
fn test_edgeless_graph() -> Result<()> {
    let g = VecGraph::empty(4);
    let result = slpa::<8, _, _>(&g, None, &SlpaOptions::default(), no_logging![])?;
    assert_eq!(result.membership, vec![0, 1, 2, 3]);
    assert_eq!(result.iterations, 1);
    Ok(())
}

#[test]
fn test_memory_of_one_keeps_initial_labels() -> Result<()> {
    let g = two_triangles();
    let result = slpa::<1, _, _>(&g, None, &SlpaOptions::default(), no_logging![])?;
    assert_eq!(result.membership, vec![0, 1, 2, 3, 4, 5]);
    assert_eq!(result.iterations, 0);
    Ok(())
}

#[test]
fn test_isolated_vertex() -> Result<()> {
    let mut g = sym(&[(0, 1, 1.0), (0, 2, 1.0), (1, 2, 1.0)]);
    g.add_node(3);
    let result = slpa::<8, _, _>(&g, None, &SlpaOptions::default(), no_logging![])?;
    assert_eq!(result.membership[3], 3);
    Ok(())
}

#[test]
fn test_unused_keys_map_to_themselves() -> Result<()> {
    let mut g = VecGraph::new();
    g.add_node(0);
    g.add_node(1);
    g.add_node(4);
    g.add_arc(0, 1, 1.0);
    g.add_arc(1, 0, 1.0);
    let result = slpa::<4, _, _>(&g, None, &SlpaOptions::default(), no_logging![])?;
    for u in 2..5 {
        assert_eq!(result.membership[u], u);
    }
    Ok(())
}

#[test]
fn test_empty_graph() -> Result<()> {
    let g = VecGraph::new();
    let result = slpa::<4, _, _>(&g, None, &SlpaOptions::default(), no_logging![])?;
    assert!(result.membership.is_empty());
    assert_eq!(result.iterations, 0);
    Ok(())
}

#[test]
fn test_iterations_capped_by_memory() -> Result<()> {
    let g = two_triangles();
    let options = SlpaOptions {
        // Impossible to satisfy, so only the memory capacity stops us.
        tolerance: -1.0,
        ..SlpaOptions::default()
    };
    let result = slpa::<4, _, _>(&g, None, &options, no_logging![])?;
    assert_eq!(result.iterations, 3);
    Ok(())
}

#[test]
fn test_preconditions() -> Result<()> {
    let g = two_triangles();
    let options = SlpaOptions::default();
    assert!(slpa::<0, _, _>(&g, None, &options, no_logging![]).is_err());
    assert!(slpa::<4, _, _>(&g, Some(&[0, 0]), &options, no_logging![]).is_err());
    let options = SlpaOptions {
        repeat: 0,
        ..SlpaOptions::default()
    };
    assert!(slpa::<4, _, _>(&g, None, &options, no_logging![]).is_err());
    Ok(())
}
