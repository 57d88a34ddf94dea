/*
 * SPDX-FileCopyrightText: 2025 Tommaso Fontana
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Speaker–Listener Label Propagation Algorithm.
//!
//! An implementation of the community detection algorithm described by
//! Jierui Xie, Boleslaw K. Szymanski, and Xiaoming Liu in "[SLPA: Uncovering
//! Overlapping Communities in Social Networks via a Speaker–Listener
//! Interaction Dynamic Process][SLPA paper]", _Proceedings of the 11th IEEE
//! International Conference on Data Mining Workshops_, pages 344–349, IEEE,
//! 2011.
//!
//! # Requirements
//!
//! The graph provided must be _symmetric_. If this is not the case, please
//! use [`symmetrize`](crate::transform::symmetrize) to generate a suitable
//! graph. Self-loops are ignored.
//!
//! # Algorithm
//!
//! Every vertex carries a [memory](Memory) of up to `L` labels, one per
//! past pass, initially its own id. At each pass every listening vertex
//! asks each neighbor to _speak_ one of its stored labels, chosen uniformly
//! at random, and accumulates the edge weight behind each spoken label; the
//! label with the most accumulated weight is appended to the listener's
//! memory. After at most min(`max_iterations`, `L` − 1) passes, or earlier
//! if the fraction of vertices whose label changed drops to the tolerance,
//! each vertex is assigned the most frequent label in its memory.
//!
//! The only stochastic step is the speaker's choice, driven by a
//! [`SmallRng`] seeded from [`SlpaOptions::seed`]: runs with equal seeds,
//! options, and graphs produce identical memberships.
//!
//! Equal-weight candidates are resolved by the [`Tiebreak`] mode; the
//! historical default prefers a candidate with bit 1 set, a deterministic
//! parity trick kept for reproducibility of reference outputs.
//!
//! # Dynamic updates
//!
//! The dynamic entry points mirror the COPRA ones: see the
//! [`copra`](crate::copra) module documentation for the affected-set
//! strategies and the batch format.
//!
//! [SLPA paper]: <https://doi.org/10.1109/ICDMW.2011.154>

use anyhow::{ensure, Result};
use dsi_progress_logger::ProgressLog;
use itertools::Itertools;
use log::debug;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use sux::bits::BitVec;

use crate::activation::{Activation, AllActive, FixedSet, Frontier};
use crate::copra::{check_batch, check_init};
use crate::traits::WeightedGraph;
use crate::utils::{measure_duration, ScanScratch};

mod memory;
pub use memory::Memory;

/// How the listener resolves candidates with equal accumulated weight.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Tiebreak {
    /// Replace the running best with an equal-weight candidate whose id has
    /// bit 1 set.
    ///
    /// This is the historical behavior, a deterministic parity trick rather
    /// than a proper randomization; it is the default because it reproduces
    /// reference outputs.
    #[default]
    Parity,
    /// Never replace the running best on equal weight.
    Strict,
    /// Replace the running best with probability 1/*k* for the *k*-th
    /// equal-weight candidate, so ties are resolved uniformly at random.
    Uniform,
}

/// Configuration for the SLPA entry points.
#[derive(Clone, Copy, Debug)]
pub struct SlpaOptions {
    /// How many times the computation is repeated to average its running
    /// time.
    pub repeat: usize,
    /// Convergence bound on the fraction of vertices that change label in
    /// one pass.
    pub tolerance: f64,
    /// Upper bound on the number of passes, further capped at `L` − 1 by
    /// the memory capacity.
    pub max_iterations: usize,
    /// Seed of the pseudorandom generator driving the speakers.
    pub seed: u64,
    /// Resolution of equal-weight candidates.
    pub tiebreak: Tiebreak,
}

impl core::default::Default for SlpaOptions {
    fn default() -> Self {
        Self {
            repeat: 1,
            tolerance: 0.05,
            max_iterations: 20,
            seed: 0,
            tiebreak: Tiebreak::Parity,
        }
    }
}

/// The result of an SLPA run.
#[derive(Clone, Debug)]
pub struct SlpaResult {
    /// The most frequent stored label of each vertex key; keys that are not
    /// in the graph are mapped to themselves.
    pub membership: Vec<usize>,
    /// The number of passes performed (by the last run, if repeated).
    pub iterations: usize,
    /// The average wall-clock time of one run, in milliseconds.
    pub time: f64,
}

/// Runs SLPA on the given symmetric graph.
///
/// # Arguments
///
/// * `graph` - the symmetric graph to run SLPA on.
///
/// * `init` - optional initial membership of each vertex key; when absent,
///   every vertex starts with its own id in memory.
///
/// * `options` - tolerance, pass bound, seed, tie-break mode, and timing
///   repetitions.
///
/// * `pl` - a progress logger.
pub fn slpa<const L: usize, G: WeightedGraph, P: ProgressLog>(
    graph: &G,
    init: Option<&[usize]>,
    options: &SlpaOptions,
    pl: &mut P,
) -> Result<SlpaResult> {
    slpa_with::<L, _, _, _, _>(graph, init, options, || AllActive, pl)
}

/// Runs SLPA restricted to the vertices affected by an edge batch,
/// computed by delta-screening.
///
/// The batch must already be applied to `graph`; `init` is the membership
/// computed before the batch.
pub fn slpa_dynamic_delta_screening<const L: usize, G: WeightedGraph, P: ProgressLog>(
    graph: &G,
    deletions: &[(usize, usize)],
    insertions: &[(usize, usize, f64)],
    init: &[usize],
    options: &SlpaOptions,
    pl: &mut P,
) -> Result<SlpaResult> {
    check_batch(graph.span(), deletions, insertions)?;
    check_init(graph.span(), init)?;
    let mut rng = SmallRng::seed_from_u64(options.seed);
    let affected = affected_delta_screening(
        graph,
        deletions,
        insertions,
        init,
        options.tiebreak,
        &mut rng,
    );
    slpa_with::<L, _, _, _, _>(
        graph,
        Some(init),
        options,
        || FixedSet(affected.clone()),
        pl,
    )
}

/// Runs SLPA restricted to a frontier of affected vertices seeded by an
/// edge batch and grown with the neighbors of every vertex that changes
/// label.
///
/// The batch must already be applied to `graph`; `init` is the membership
/// computed before the batch.
pub fn slpa_dynamic_frontier<const L: usize, G: WeightedGraph, P: ProgressLog>(
    graph: &G,
    deletions: &[(usize, usize)],
    insertions: &[(usize, usize, f64)],
    init: &[usize],
    options: &SlpaOptions,
    pl: &mut P,
) -> Result<SlpaResult> {
    check_batch(graph.span(), deletions, insertions)?;
    check_init(graph.span(), init)?;
    let seed = affected_frontier(graph, deletions, insertions, init);
    slpa_with::<L, _, _, _, _>(graph, Some(init), options, || Frontier(seed.clone()), pl)
}

/// Marks the vertices to reprocess after an edge batch using
/// delta-screening, given the membership computed before the batch.
///
/// See [`copra::affected_delta_screening`](crate::copra::affected_delta_screening)
/// for the marking rules; here the scan over the inserted edges of a source
/// accumulates the full edge weight behind the current label of each
/// destination, and the listener rule picks the new candidate community.
pub fn affected_delta_screening<G: WeightedGraph>(
    graph: &G,
    deletions: &[(usize, usize)],
    insertions: &[(usize, usize, f64)],
    membership: &[usize],
    tiebreak: Tiebreak,
    rng: &mut SmallRng,
) -> BitVec {
    let span = graph.span();
    let mut scratch = ScanScratch::new(span);
    let mut vertices = BitVec::new(span);
    let mut neighbors = BitVec::new(span);
    let mut communities = BitVec::new(span);
    for &(u, v) in deletions {
        if membership[u] != membership[v] {
            continue;
        }
        vertices.set(u, true);
        neighbors.set(u, true);
        communities.set(membership[v], true);
    }
    for (u, group) in &insertions.iter().chunk_by(|&&(u, _, _)| u) {
        let cu = membership[u];
        scratch.clear();
        for &(_, v, w) in group {
            if v == u || membership[v] == cu {
                continue;
            }
            scratch.accumulate(membership[v], w);
        }
        let cl = choose_label(&scratch, tiebreak, rng).unwrap_or(u);
        if cl == cu {
            continue;
        }
        vertices.set(u, true);
        neighbors.set(u, true);
        communities.set(cl, true);
    }
    for u in graph.vertex_keys() {
        if neighbors[u] {
            for (v, _) in graph.successors(u) {
                vertices.set(v, true);
            }
        }
        if communities[membership[u]] {
            vertices.set(u, true);
        }
    }
    vertices
}

/// Marks the vertices to reprocess after an edge batch using the frontier
/// strategy, given the membership computed before the batch: only the
/// sources of intra-community deletions and of inter-community insertions.
pub fn affected_frontier<G: WeightedGraph>(
    graph: &G,
    deletions: &[(usize, usize)],
    insertions: &[(usize, usize, f64)],
    membership: &[usize],
) -> BitVec {
    let mut vertices = BitVec::new(graph.span());
    for &(u, v) in deletions {
        if membership[u] == membership[v] {
            vertices.set(u, true);
        }
    }
    for &(u, v, _) in insertions {
        if membership[u] != membership[v] {
            vertices.set(u, true);
        }
    }
    vertices
}

/// The shared implementation behind the three entry points, monomorphized
/// on the activation strategy; `new_activation` is called once per timed
/// run so repeated runs do not observe the frontier grown by earlier ones.
fn slpa_with<const L: usize, G: WeightedGraph, A: Activation, F: FnMut() -> A, P: ProgressLog>(
    graph: &G,
    init: Option<&[usize]>,
    options: &SlpaOptions,
    mut new_activation: F,
    pl: &mut P,
) -> Result<SlpaResult> {
    ensure!(L >= 1, "The memory capacity must be at least 1");
    ensure!(options.repeat >= 1, "The number of timed runs must be at least 1");
    if let Some(init) = init {
        check_init(graph.span(), init)?;
    }
    debug_assert!(
        crate::transform::is_symmetric(graph),
        "SLPA requires a symmetric graph"
    );

    let span = graph.span();
    let num_nodes = graph.num_nodes();
    if num_nodes == 0 {
        return Ok(SlpaResult {
            membership: (0..span).collect(),
            iterations: 0,
            time: 0.0,
        });
    }

    let max_passes = options.max_iterations.min(L - 1);
    let mut vcom = Vec::new();
    let mut iterations = 0;

    pl.item_name("pass");
    pl.start(format!("Running SLPA with {L} labels..."));

    let time = measure_duration(options.repeat, || {
        vcom = initialize::<L, _>(graph, init);
        let mut rng = SmallRng::seed_from_u64(options.seed);
        let mut activation = new_activation();
        let mut scratch = ScanScratch::new(span);
        iterations = 0;
        while iterations < max_passes {
            let changed = move_iteration(
                &mut scratch,
                &mut vcom,
                graph,
                options.tiebreak,
                &mut rng,
                &mut activation,
            );
            iterations += 1;
            pl.update();
            debug!(
                "pass {}: {}/{} vertices changed label",
                iterations, changed, num_nodes
            );
            if changed as f64 / num_nodes as f64 <= options.tolerance {
                break;
            }
        }
    });

    pl.done();

    Ok(SlpaResult {
        membership: (0..span)
            .map(|u| vcom[u].majority().unwrap_or(u))
            .collect(),
        iterations,
        time,
    })
}

/// Builds the initial memories: a singleton per live vertex, from `init`
/// when provided. Keys that are not in the graph stay empty.
fn initialize<const L: usize, G: WeightedGraph>(
    graph: &G,
    init: Option<&[usize]>,
) -> Vec<Memory<L>> {
    let mut vcom = vec![Memory::default(); graph.span()];
    for u in graph.vertex_keys() {
        vcom[u] = Memory::singleton(init.map_or(u, |init| init[u]));
    }
    vcom
}

/// Picks the candidate with the most accumulated weight, resolving equal
/// weights according to the tie-break mode; the first candidate is adopted
/// unconditionally, so a nonempty scan always yields a label.
fn choose_label(
    scratch: &ScanScratch,
    tiebreak: Tiebreak,
    rng: &mut impl Rng,
) -> Option<usize> {
    let mut best: Option<usize> = None;
    let mut best_weight = 0.0;
    let mut ties = 0;
    for &c in scratch.touched() {
        let w = scratch.weight(c);
        if best.is_none() || w > best_weight {
            best = Some(c);
            best_weight = w;
            ties = 1;
        } else if w == best_weight {
            match tiebreak {
                Tiebreak::Parity => {
                    if c & 2 != 0 {
                        best = Some(c);
                    }
                }
                Tiebreak::Strict => {}
                Tiebreak::Uniform => {
                    ties += 1;
                    if rng.random_range(0..ties) == 0 {
                        best = Some(c);
                    }
                }
            }
        }
    }
    best
}

/// Runs one pass over the active vertices: each one listens to a label
/// spoken by every neighbor and appends the most weighted one to its
/// memory; returns the number of vertices whose appended label differs
/// from their previous one. Vertices hearing nothing keep their memory
/// unchanged.
fn move_iteration<const L: usize, G: WeightedGraph, A: Activation>(
    scratch: &mut ScanScratch,
    vcom: &mut [Memory<L>],
    graph: &G,
    tiebreak: Tiebreak,
    rng: &mut SmallRng,
    activation: &mut A,
) -> usize {
    let mut changed = 0;
    for u in graph.vertex_keys() {
        if !activation.is_active(u) {
            continue;
        }
        let previous = vcom[u].last();
        scratch.clear();
        for (v, w) in graph.successors(u) {
            if v == u {
                continue;
            }
            if let Some(c) = vcom[v].speak(rng) {
                scratch.accumulate(c, w);
            }
        }
        if let Some(c) = choose_label(scratch, tiebreak, rng) {
            vcom[u].push(c);
            if previous != Some(c) {
                changed += 1;
                activation.node_changed(graph, u);
            }
        }
    }
    changed
}
