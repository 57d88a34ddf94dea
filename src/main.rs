/*
 * SPDX-FileCopyrightText: 2025 Tommaso Fontana
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use anyhow::Result;
use clap::Parser;
use dsi_progress_logger::prelude::*;
use log::info;
use overlap_communities::copra::{copra, CopraOptions};
use overlap_communities::graphs::mtx::read_matrix_market;
use overlap_communities::slpa::{slpa, SlpaOptions, Tiebreak};
use overlap_communities::traits::WeightedGraph;
use overlap_communities::transform::symmetrize;
use overlap_communities::{modularity_by, total_edge_weight};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(about = "Sweeps COPRA and SLPA over a graph in Matrix Market format.", version)]
struct Args {
    /// Path of the graph, in Matrix Market coordinate format.
    src: PathBuf,

    /// Number of timed runs per configuration.
    #[arg(short, long, default_value_t = 5)]
    repeat: usize,

    /// Seed of the pseudorandom generator driving the SLPA speakers.
    #[arg(short, long, default_value_t = 0)]
    seed: u64,
}

const TOLERANCES: [f64; 3] = [0.1, 0.01, 0.001];

pub fn main() -> Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .try_init()?;

    let args = Args::parse();

    let graph = read_matrix_market(&args.src)?;
    info!(
        "Loaded {}: {} nodes, {} arcs",
        args.src.display(),
        graph.num_nodes(),
        graph.num_arcs()
    );
    let graph = symmetrize(&graph);
    info!("Symmetrized: {} arcs", graph.num_arcs());

    let m = total_edge_weight(&graph) / 2.0;
    println!(
        "[{:01.9} modularity] noop",
        modularity_by(&graph, |u| u, m, 1.0)
    );

    let mut pl = progress_logger![item_name = "pass"];

    macro_rules! copra_sweep {
        ($($l:literal),*) => {$(
            for tolerance in TOLERANCES {
                let options = CopraOptions {
                    repeat: args.repeat,
                    tolerance,
                    ..CopraOptions::default()
                };
                let result = copra::<$l, _, _>(&graph, None, &options, &mut pl)?;
                println!(
                    "[{:09.3} ms; {:04} iters.; {:01.9} modularity] copra       {{labels={:02}, tolerance={:.0e}}}",
                    result.time,
                    result.iterations,
                    modularity_by(&graph, |u| result.membership[u], m, 1.0),
                    $l,
                    tolerance
                );
            }
        )*};
    }

    macro_rules! slpa_sweep {
        ($tiebreak:expr, $name:literal, $($l:literal),*) => {$(
            for tolerance in TOLERANCES {
                let options = SlpaOptions {
                    repeat: args.repeat,
                    tolerance,
                    seed: args.seed,
                    tiebreak: $tiebreak,
                    ..SlpaOptions::default()
                };
                let result = slpa::<$l, _, _>(&graph, None, &options, &mut pl)?;
                println!(
                    "[{:09.3} ms; {:04} iters.; {:01.9} modularity] {} {{labels={:02}, tolerance={:.0e}}}",
                    result.time,
                    result.iterations,
                    modularity_by(&graph, |u| result.membership[u], m, 1.0),
                    $name,
                    $l,
                    tolerance
                );
            }
        )*};
    }

    copra_sweep!(1, 2, 4, 8, 16, 32);
    slpa_sweep!(Tiebreak::Parity, "slpa       ", 4, 8, 16, 32, 64);
    slpa_sweep!(Tiebreak::Strict, "slpaStrict ", 4, 8, 16, 32, 64);

    Ok(())
}
