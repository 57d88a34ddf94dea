/*
 * SPDX-FileCopyrightText: 2025 Tommaso Fontana
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Community Overlap PRopagation Algorithm.
//!
//! An implementation of the community detection algorithm described by Steve
//! Gregory in "[Finding overlapping communities in networks by label
//! propagation][COPRA paper]", _New Journal of Physics_, 12(10):103018, 2010.
//!
//! # Requirements
//!
//! The graph provided must be _symmetric_. If this is not the case, please
//! use [`symmetrize`](crate::transform::symmetrize) to generate a suitable
//! graph. Self-loops are ignored.
//!
//! # Algorithm
//!
//! Every vertex carries a [labelset](Labelset) of up to `L` (community,
//! belonging coefficient) pairs, initially the singleton {(own id, 1)}. At
//! each pass every vertex accumulates, for each community, the edge weight
//! towards neighbors belonging to it scaled by their belonging
//! coefficients; the candidates are then sorted by accumulated weight, cut
//! at the threshold _W_ = `vtot[u]` / `L` (the top candidate is always
//! kept, and at most `L` survive), and the surviving weights are
//! renormalized so that the coefficients sum to one. Passes stop when the
//! fraction of vertices whose dominant community changed is at most the
//! configured tolerance, or after `max_iterations` passes. With `L` = 1
//! the algorithm degenerates to classical single-label propagation.
//!
//! # Dynamic updates
//!
//! Given a batch of edge deletions and insertions applied to the graph and
//! the membership computed before the batch, the dynamic entry points
//! restrict label propagation to an affected subset of the vertices:
//!
//! - [`copra_dynamic_delta_screening`] marks up front the endpoints of
//!   intra-community deletions and of community-changing insertions, their
//!   neighbors, and every vertex of the communities they may join or leave;
//! - [`copra_dynamic_frontier`] marks only the endpoints themselves, and
//!   grows the set with the neighbors of every vertex that changes
//!   community during the iteration.
//!
//! Batches must be undirected (every edge present in both directions) and
//! sorted by source; duplicate entries are allowed.
//!
//! [COPRA paper]: <https://doi.org/10.1088/1367-2630/12/10/103018>

use anyhow::{ensure, Result};
use dsi_progress_logger::ProgressLog;
use itertools::Itertools;
use log::debug;
use sux::bits::BitVec;

use crate::activation::{Activation, AllActive, FixedSet, Frontier};
use crate::traits::WeightedGraph;
use crate::utils::{measure_duration, vertex_weights, ScanScratch};

mod labelset;
pub use labelset::Labelset;

/// Configuration for the COPRA entry points.
#[derive(Clone, Copy, Debug)]
pub struct CopraOptions {
    /// How many times the computation is repeated to average its running
    /// time.
    pub repeat: usize,
    /// Convergence bound on the fraction of vertices that change dominant
    /// community in one pass.
    pub tolerance: f64,
    /// Upper bound on the number of passes.
    pub max_iterations: usize,
}

impl core::default::Default for CopraOptions {
    fn default() -> Self {
        Self {
            repeat: 1,
            tolerance: 0.05,
            max_iterations: 100,
        }
    }
}

/// The result of a COPRA run.
#[derive(Clone, Debug)]
pub struct CopraResult {
    /// The dominant community of each vertex key; keys that are not in the
    /// graph are mapped to themselves.
    pub membership: Vec<usize>,
    /// The number of passes performed (by the last run, if repeated).
    pub iterations: usize,
    /// The average wall-clock time of one run, in milliseconds.
    pub time: f64,
}

/// Runs COPRA on the given symmetric graph.
///
/// # Arguments
///
/// * `graph` - the symmetric graph to run COPRA on.
///
/// * `init` - optional initial membership of each vertex key; when absent,
///   every vertex starts in its own singleton community.
///
/// * `options` - tolerance, pass bound, and timing repetitions.
///
/// * `pl` - a progress logger.
pub fn copra<const L: usize, G: WeightedGraph, P: ProgressLog>(
    graph: &G,
    init: Option<&[usize]>,
    options: &CopraOptions,
    pl: &mut P,
) -> Result<CopraResult> {
    copra_with::<L, _, _, _, _>(graph, init, options, || AllActive, pl).map(into_result)
}

/// Runs COPRA and returns the full labelsets instead of a flattened
/// membership.
///
/// The membership returned by [`copra`] only reports the dominant
/// community of each vertex; the labelsets carry the overlapping
/// memberships with their belonging coefficients.
pub fn copra_labelsets<const L: usize, G: WeightedGraph, P: ProgressLog>(
    graph: &G,
    init: Option<&[usize]>,
    options: &CopraOptions,
    pl: &mut P,
) -> Result<Vec<Labelset<L>>> {
    copra_with::<L, _, _, _, _>(graph, init, options, || AllActive, pl)
        .map(|(vcom, _, _)| vcom)
}

/// Runs COPRA restricted to the vertices affected by an edge batch,
/// computed by delta-screening.
///
/// The batch must already be applied to `graph`; `init` is the membership
/// computed before the batch. See the [module documentation](self) for the
/// batch format.
pub fn copra_dynamic_delta_screening<const L: usize, G: WeightedGraph, P: ProgressLog>(
    graph: &G,
    deletions: &[(usize, usize)],
    insertions: &[(usize, usize, f64)],
    init: &[usize],
    options: &CopraOptions,
    pl: &mut P,
) -> Result<CopraResult> {
    ensure!(L >= 1, "The labelset capacity must be at least 1");
    check_batch(graph.span(), deletions, insertions)?;
    check_init(graph.span(), init)?;
    let vertex_weight = vertex_weights(graph);
    let vcom = initialize::<L, _>(graph, Some(init));
    let affected = affected_delta_screening(graph, deletions, insertions, &vcom, &vertex_weight);
    copra_with::<L, _, _, _, _>(
        graph,
        Some(init),
        options,
        || FixedSet(affected.clone()),
        pl,
    )
    .map(into_result)
}

/// Runs COPRA restricted to a frontier of affected vertices seeded by an
/// edge batch and grown with the neighbors of every vertex that changes
/// community.
///
/// The batch must already be applied to `graph`; `init` is the membership
/// computed before the batch. See the [module documentation](self) for the
/// batch format.
pub fn copra_dynamic_frontier<const L: usize, G: WeightedGraph, P: ProgressLog>(
    graph: &G,
    deletions: &[(usize, usize)],
    insertions: &[(usize, usize, f64)],
    init: &[usize],
    options: &CopraOptions,
    pl: &mut P,
) -> Result<CopraResult> {
    ensure!(L >= 1, "The labelset capacity must be at least 1");
    check_batch(graph.span(), deletions, insertions)?;
    check_init(graph.span(), init)?;
    let vcom = initialize::<L, _>(graph, Some(init));
    let seed = affected_frontier(graph, deletions, insertions, &vcom);
    copra_with::<L, _, _, _, _>(graph, Some(init), options, || Frontier(seed.clone()), pl)
        .map(into_result)
}

/// Marks the vertices to reprocess after an edge batch using
/// delta-screening.
///
/// For every intra-community deletion (*u*, *v*) the source, its neighbors,
/// and the whole community are marked; for every per-source group of
/// insertions, the inserted inter-community edges alone are scanned and
/// chosen over, and if the chosen community differs from the source's
/// current one the source, its neighbors, and the chosen community are
/// marked.
pub fn affected_delta_screening<const L: usize, G: WeightedGraph>(
    graph: &G,
    deletions: &[(usize, usize)],
    insertions: &[(usize, usize, f64)],
    vcom: &[Labelset<L>],
    vertex_weight: &[f64],
) -> BitVec {
    let span = graph.span();
    let threshold = 1.0 / L as f64;
    let mut scratch = ScanScratch::new(span);
    let mut vertices = BitVec::new(span);
    let mut neighbors = BitVec::new(span);
    let mut communities = BitVec::new(span);
    for &(u, v) in deletions {
        let cu = vcom[u].primary().unwrap_or(u);
        let cv = vcom[v].primary().unwrap_or(v);
        if cu != cv {
            continue;
        }
        vertices.set(u, true);
        neighbors.set(u, true);
        communities.set(cv, true);
    }
    for (u, group) in &insertions.iter().chunk_by(|&&(u, _, _)| u) {
        let cu = vcom[u].primary().unwrap_or(u);
        scratch.clear();
        for &(_, v, w) in group {
            let cv = vcom[v].primary().unwrap_or(v);
            if cu == cv {
                continue;
            }
            scan_edge(&mut scratch, u, v, w, vcom);
        }
        let labels = choose_community::<L>(u, &mut scratch, threshold * vertex_weight[u]);
        let cl = labels.primary().unwrap_or(u);
        if cl == cu {
            continue;
        }
        vertices.set(u, true);
        neighbors.set(u, true);
        communities.set(cl, true);
    }
    for u in graph.vertex_keys() {
        let cu = vcom[u].primary().unwrap_or(u);
        if neighbors[u] {
            for (v, _) in graph.successors(u) {
                vertices.set(v, true);
            }
        }
        if communities[cu] {
            vertices.set(u, true);
        }
    }
    vertices
}

/// Marks the vertices to reprocess after an edge batch using the frontier
/// strategy: only the sources of intra-community deletions and of
/// inter-community insertions.
///
/// The returned set is the seed of the frontier; during the iteration the
/// neighbors of every vertex that changes community are added to it.
pub fn affected_frontier<const L: usize, G: WeightedGraph>(
    graph: &G,
    deletions: &[(usize, usize)],
    insertions: &[(usize, usize, f64)],
    vcom: &[Labelset<L>],
) -> BitVec {
    let mut vertices = BitVec::new(graph.span());
    for &(u, v) in deletions {
        let cu = vcom[u].primary().unwrap_or(u);
        let cv = vcom[v].primary().unwrap_or(v);
        if cu == cv {
            vertices.set(u, true);
        }
    }
    for &(u, v, _) in insertions {
        let cu = vcom[u].primary().unwrap_or(u);
        let cv = vcom[v].primary().unwrap_or(v);
        if cu != cv {
            vertices.set(u, true);
        }
    }
    vertices
}

/// The shared implementation behind the three entry points, monomorphized
/// on the activation strategy; `new_activation` is called once per timed
/// run so repeated runs do not observe the frontier grown by earlier ones.
fn copra_with<const L: usize, G: WeightedGraph, A: Activation, F: FnMut() -> A, P: ProgressLog>(
    graph: &G,
    init: Option<&[usize]>,
    options: &CopraOptions,
    mut new_activation: F,
    pl: &mut P,
) -> Result<(Vec<Labelset<L>>, usize, f64)> {
    ensure!(L >= 1, "The labelset capacity must be at least 1");
    ensure!(options.repeat >= 1, "The number of timed runs must be at least 1");
    if let Some(init) = init {
        check_init(graph.span(), init)?;
    }
    debug_assert!(
        crate::transform::is_symmetric(graph),
        "COPRA requires a symmetric graph"
    );

    let span = graph.span();
    let num_nodes = graph.num_nodes();
    if num_nodes == 0 {
        return Ok((vec![Labelset::default(); span], 0, 0.0));
    }

    let threshold = 1.0 / L as f64;
    let mut vcom = Vec::new();
    let mut iterations = 0;

    pl.item_name("pass");
    pl.start(format!("Running COPRA with {L} labels..."));

    let time = measure_duration(options.repeat, || {
        let vertex_weight = vertex_weights(graph);
        vcom = initialize::<L, _>(graph, init);
        let mut activation = new_activation();
        let mut scratch = ScanScratch::new(span);
        iterations = 0;
        while iterations < options.max_iterations {
            let changed = move_iteration(
                &mut scratch,
                &mut vcom,
                graph,
                &vertex_weight,
                threshold,
                &mut activation,
            );
            iterations += 1;
            pl.update();
            debug!(
                "pass {}: {}/{} vertices changed community",
                iterations, changed, num_nodes
            );
            if changed as f64 / num_nodes as f64 <= options.tolerance {
                break;
            }
        }
    });

    pl.done();

    Ok((vcom, iterations, time))
}

fn into_result<const L: usize>(
    (vcom, iterations, time): (Vec<Labelset<L>>, usize, f64),
) -> CopraResult {
    CopraResult {
        membership: vcom
            .iter()
            .enumerate()
            .map(|(u, labels)| labels.primary().unwrap_or(u))
            .collect(),
        iterations,
        time,
    }
}

/// Builds the initial labelsets: a singleton per live vertex, from `init`
/// when provided. Keys that are not in the graph stay empty.
fn initialize<const L: usize, G: WeightedGraph>(
    graph: &G,
    init: Option<&[usize]>,
) -> Vec<Labelset<L>> {
    let mut vcom = vec![Labelset::default(); graph.span()];
    for u in graph.vertex_keys() {
        vcom[u] = Labelset::singleton(init.map_or(u, |init| init[u]));
    }
    vcom
}

/// Accumulates the contribution of one edge (*u*, *v*, *w*): the weight
/// scaled by the belonging coefficient of each community of *v*. Self-loops
/// are skipped.
#[inline(always)]
fn scan_edge<const L: usize>(
    scratch: &mut ScanScratch,
    u: usize,
    v: usize,
    w: f64,
    vcom: &[Labelset<L>],
) {
    if u == v {
        return;
    }
    for (c, b) in vcom[v].iter() {
        scratch.accumulate(c, w * b);
    }
}

/// Accumulates the contributions of the whole neighborhood of `u`.
fn scan_communities<const L: usize>(
    scratch: &mut ScanScratch,
    graph: &impl WeightedGraph,
    u: usize,
    vcom: &[Labelset<L>],
) {
    for (v, w) in graph.successors(u) {
        scan_edge(scratch, u, v, w, vcom);
    }
}

/// Builds the next labelset of `u` from the scanned candidates: sorts them
/// by decreasing accumulated weight, keeps the top candidate plus every
/// further candidate reaching `min_weight` (up to `L`), and renormalizes
/// the kept weights to coefficients summing to one. With no candidate at
/// all the vertex falls back to its own singleton community.
fn choose_community<const L: usize>(
    u: usize,
    scratch: &mut ScanScratch,
    min_weight: f64,
) -> Labelset<L> {
    scratch.sort_decreasing();
    let mut entries = [(0, 0.0); L];
    let mut len = 0;
    let mut total = 0.0;
    for &c in scratch.touched() {
        let w = scratch.weight(c);
        if len == L || (len > 0 && w < min_weight) {
            break;
        }
        entries[len] = (c, w);
        total += w;
        len += 1;
    }
    if len == 0 {
        return Labelset::singleton(u);
    }
    for entry in &mut entries[..len] {
        entry.1 /= total;
    }
    Labelset::from_entries(entries)
}

/// Runs one pass over the active vertices, replacing each labelset with
/// the chosen one; returns the number of vertices whose dominant community
/// changed.
fn move_iteration<const L: usize, G: WeightedGraph, A: Activation>(
    scratch: &mut ScanScratch,
    vcom: &mut [Labelset<L>],
    graph: &G,
    vertex_weight: &[f64],
    threshold: f64,
    activation: &mut A,
) -> usize {
    let mut changed = 0;
    for u in graph.vertex_keys() {
        if !activation.is_active(u) {
            continue;
        }
        let previous = vcom[u].primary().unwrap_or(u);
        scratch.clear();
        scan_communities(scratch, graph, u, vcom);
        vcom[u] = choose_community(u, scratch, threshold * vertex_weight[u]);
        if vcom[u].primary() != Some(previous) {
            changed += 1;
            activation.node_changed(graph, u);
        }
    }
    changed
}

pub(crate) fn check_init(span: usize, init: &[usize]) -> Result<()> {
    ensure!(
        init.len() == span,
        "The initial membership has length {} but the graph has span {}",
        init.len(),
        span
    );
    ensure!(
        init.iter().all(|&c| c < span),
        "Initial communities must be smaller than the graph span {span}"
    );
    Ok(())
}

pub(crate) fn check_batch(
    span: usize,
    deletions: &[(usize, usize)],
    insertions: &[(usize, usize, f64)],
) -> Result<()> {
    ensure!(
        deletions.iter().all(|&(u, v)| u < span && v < span)
            && insertions.iter().all(|&(u, v, _)| u < span && v < span),
        "Batch endpoints must be smaller than the graph span {span}"
    );
    ensure!(
        deletions.windows(2).all(|d| d[0] <= d[1])
            && insertions
                .windows(2)
                .all(|i| (i[0].0, i[0].1) <= (i[1].0, i[1].1)),
        "Batches must be sorted by source, then destination"
    );
    Ok(())
}
