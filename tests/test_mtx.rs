/*
 * SPDX-FileCopyrightText: 2025 Tommaso Fontana
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use anyhow::Result;
use overlap_communities::graphs::mtx::read_matrix_market;
use overlap_communities::traits::WeightedGraph;
use std::io::Write;

fn write_mtx(content: &str) -> Result<tempfile::NamedTempFile> {
    let mut file = tempfile::NamedTempFile::new()?;
    file.write_all(content.as_bytes())?;
    Ok(file)
}

#[test]
fn test_general_weighted() -> Result<()> {
    let file = write_mtx(
        "%%MatrixMarket matrix coordinate real general\n\
         % a comment\n\
         3 3 3\n\
         1 2 1.5\n\
         2 1 1.5\n\
         3 1 2\n",
    )?;
    let g = read_matrix_market(file.path())?;
    assert_eq!(g.span(), 3);
    assert_eq!(g.num_nodes(), 3);
    assert_eq!(g.num_arcs(), 3);
    assert_eq!(g.arc_weight(0, 1), Some(1.5));
    assert_eq!(g.arc_weight(2, 0), Some(2.0));
    assert_eq!(g.arc_weight(0, 2), None);
    Ok(())
}

#[test]
fn test_symmetric_pattern() -> Result<()> {
    let file = write_mtx(
        "%%MatrixMarket matrix coordinate pattern symmetric\n\
         4 4 2\n\
         2 1\n\
         4 3\n",
    )?;
    let g = read_matrix_market(file.path())?;
    assert_eq!(g.num_arcs(), 4);
    assert_eq!(g.arc_weight(1, 0), Some(1.0));
    assert_eq!(g.arc_weight(0, 1), Some(1.0));
    assert_eq!(g.arc_weight(2, 3), Some(1.0));
    Ok(())
}

#[test]
fn test_isolated_rows_are_live() -> Result<()> {
    let file = write_mtx(
        "%%MatrixMarket matrix coordinate real general\n\
         5 5 1\n\
         1 2 1\n",
    )?;
    let g = read_matrix_market(file.path())?;
    assert_eq!(g.num_nodes(), 5);
    assert!(g.has_node(4));
    assert_eq!(g.outdegree(4), 0);
    Ok(())
}

#[test]
fn test_zero_weight_skipped() -> Result<()> {
    let file = write_mtx(
        "%%MatrixMarket matrix coordinate real general\n\
         2 2 2\n\
         1 2 0\n\
         2 1 3\n",
    )?;
    let g = read_matrix_market(file.path())?;
    assert_eq!(g.num_arcs(), 1);
    assert_eq!(g.arc_weight(0, 1), None);
    assert_eq!(g.arc_weight(1, 0), Some(3.0));
    Ok(())
}

#[test]
fn test_bad_banner() -> Result<()> {
    let file = write_mtx("1 2 3\n")?;
    assert!(read_matrix_market(file.path()).is_err());
    Ok(())
}

#[test]
fn test_out_of_bounds_entry() -> Result<()> {
    let file = write_mtx(
        "%%MatrixMarket matrix coordinate real general\n\
         2 2 1\n\
         1 3 1\n",
    )?;
    assert!(read_matrix_market(file.path()).is_err());
    Ok(())
}

#[test]
fn test_negative_weight() -> Result<()> {
    let file = write_mtx(
        "%%MatrixMarket matrix coordinate real general\n\
         2 2 1\n\
         1 2 -1\n",
    )?;
    assert!(read_matrix_market(file.path()).is_err());
    Ok(())
}
