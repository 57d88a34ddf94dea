/*
 * SPDX-FileCopyrightText: 2025 Tommaso Fontana
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Matrix Market loader.
//!
//! Reads a graph from a file in the [Matrix Market coordinate
//! format](https://math.nist.gov/MatrixMarket/formats.html), the format used
//! by the [SuiteSparse Matrix Collection](https://sparse.tamu.edu/). Indices
//! in the file are one-based and are mapped to zero-based vertex keys; all
//! keys 0 . . *rows* are added as live vertices, so rows that appear in no
//! entry become isolated vertices.
//!
//! For a `pattern` matrix all weights are 1; otherwise the third column is
//! read as the edge weight (defaulting to 1 when missing). Entries with
//! weight zero denote absent edges and are skipped. For a `symmetric`
//! matrix both directions of each entry are added.

use crate::graphs::vec_graph::VecGraph;
use anyhow::{bail, ensure, Context, Result};
use std::io::BufRead;
use std::path::Path;

/// Reads a [`VecGraph`] from a Matrix Market coordinate file.
pub fn read_matrix_market(path: impl AsRef<Path>) -> Result<VecGraph> {
    let path = path.as_ref();
    let file = std::fs::File::open(path)
        .with_context(|| format!("Could not open {}", path.display()))?;
    let mut lines = std::io::BufReader::new(file).lines();

    let banner = match lines.next() {
        Some(line) => line.context("Could not read banner")?,
        None => bail!("Empty file {}", path.display()),
    };
    ensure!(
        banner.starts_with("%%MatrixMarket"),
        "Not a Matrix Market file: bad banner {banner:?}"
    );
    let fields = banner.split_whitespace().collect::<Vec<_>>();
    ensure!(
        fields.len() >= 5 && fields[1] == "matrix" && fields[2] == "coordinate",
        "Unsupported Matrix Market banner {banner:?}"
    );
    let pattern = fields[3] == "pattern";
    let symmetric = fields[4] == "symmetric";

    let mut size = None;
    let mut graph = VecGraph::new();
    for (line_idx, line) in lines.enumerate() {
        let line = line.with_context(|| format!("Could not read line {}", line_idx + 2))?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('%') {
            continue;
        }
        let mut tokens = line.split_whitespace();
        match size {
            None => {
                let rows = parse_index(tokens.next(), line)?;
                let cols = parse_index(tokens.next(), line)?;
                let _entries = parse_index(tokens.next(), line)?;
                size = Some((rows, cols));
                for node in 0..rows {
                    graph.add_node(node);
                }
            }
            Some((rows, cols)) => {
                let u = parse_index(tokens.next(), line)?;
                let v = parse_index(tokens.next(), line)?;
                ensure!(
                    (1..=rows).contains(&u) && (1..=cols).contains(&v),
                    "Entry ({u}, {v}) out of bounds for a {rows} x {cols} matrix"
                );
                let w = if pattern {
                    1.0
                } else {
                    match tokens.next() {
                        None => 1.0,
                        Some(token) => token
                            .parse::<f64>()
                            .with_context(|| format!("Bad weight in line {line:?}"))?,
                    }
                };
                ensure!(
                    w >= 0.0 && w.is_finite(),
                    "Edge weights must be nonnegative, got {w} in line {line:?}"
                );
                if w == 0.0 {
                    continue;
                }
                let (u, v) = (u - 1, v - 1);
                graph.add_node(u);
                graph.add_node(v);
                graph.add_arc(u, v, w);
                if symmetric && u != v {
                    graph.add_arc(v, u, w);
                }
            }
        }
    }
    ensure!(size.is_some(), "Missing size line in {}", path.display());
    Ok(graph)
}

fn parse_index(token: Option<&str>, line: &str) -> Result<usize> {
    token
        .with_context(|| format!("Truncated line {line:?}"))?
        .parse::<usize>()
        .with_context(|| format!("Bad index in line {line:?}"))
}
