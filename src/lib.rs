/*
 * SPDX-FileCopyrightText: 2025 Tommaso Fontana
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

#![doc = include_str!("../README.md")]

pub mod traits;

pub mod graphs;
pub mod transform;

pub mod utils;

pub(crate) mod activation;

pub mod copra;
pub mod slpa;

mod modularity;
pub use modularity::{modularity_by, total_edge_weight};

pub mod prelude {
    pub use crate::copra::{
        copra, copra_dynamic_delta_screening, copra_dynamic_frontier, copra_labelsets,
    };
    pub use crate::copra::{CopraOptions, CopraResult};
    pub use crate::graphs::vec_graph::VecGraph;
    pub use crate::slpa::{slpa, slpa_dynamic_delta_screening, slpa_dynamic_frontier};
    pub use crate::slpa::{SlpaOptions, SlpaResult, Tiebreak};
    pub use crate::traits::WeightedGraph;
    pub use crate::transform::symmetrize;
}
