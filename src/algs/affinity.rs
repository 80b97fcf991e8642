//! Gaussian-affinity graphs with row-normalised edge weights.
//!
//! Per batch:
//!
//! ```text
//! A[i,j] = exp(-0.5 * D[i,j]^2 / sigma^2)
//! W[i,j] = exp(A[i,j]) / sum_j exp(A[i,j])
//! ```
//!
//! and `(i, j)` is kept iff `W[i,j] > threshold`. Note the second
//! exponential: the row normalisation is a softmax over the affinities, not
//! a plain division by the row sum. Rows only span the point's own batch, and
//! the diagonal (`D = 0`, `A = 1`) is part of every row, so self-loops are
//! emitted like any other edge.
//!
//! Edges are emitted row-major (source ascending, then target ascending) and
//! carry `W[i,j]` as weight, which always lies in `(0, 1]`.

use serde::{Deserialize, Serialize};

use crate::algs::assemble::{BatchEdges, assemble};
use crate::algs::batch_partition::{Batch, partition_batches};
use crate::algs::distance::distance_matrix;
use crate::algs::parallel::map_batches;
use crate::builder::{GraphBuild, GraphBuilder};
use crate::data::columns::ColumnSelection;
use crate::data::point_set::PointSet;
use crate::debug_invariants::DebugInvariants;
use crate::graph_error::GraphError;

/// Options for affinity graph construction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AffinityGraphConfig {
    /// Kernel width.
    pub sigma: f64,
    /// Minimum (exclusive) normalised weight of a kept edge.
    #[serde(default)]
    pub threshold: f64,
    #[serde(default)]
    pub columns: ColumnSelection,
}

impl AffinityGraphConfig {
    pub fn new(sigma: f64, threshold: f64, columns: impl Into<ColumnSelection>) -> Self {
        Self {
            sigma,
            threshold,
            columns: columns.into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct AffinityGraphBuilder {
    config: AffinityGraphConfig,
}

impl AffinityGraphBuilder {
    pub fn try_new(config: AffinityGraphConfig) -> Result<Self, GraphError> {
        if !(config.sigma > 0.0 && config.sigma.is_finite()) {
            return Err(GraphError::NonPositiveSigma(config.sigma));
        }
        // `!(x >= 0)` also rejects NaN
        if !(config.threshold >= 0.0) {
            return Err(GraphError::InvalidThreshold(config.threshold));
        }
        if config.columns.is_empty() {
            return Err(GraphError::EmptyColumns);
        }
        Ok(Self { config })
    }

    pub fn config(&self) -> &AffinityGraphConfig {
        &self.config
    }
}

impl GraphBuilder for AffinityGraphBuilder {
    fn name(&self) -> &'static str {
        "affinity"
    }

    fn build<'p>(&self, points: &'p PointSet) -> Result<GraphBuild<'p>, GraphError> {
        let cfg = &self.config;
        cfg.columns.validate(points.n_features())?;

        let partition = partition_batches(points.batch());
        let per_batch = map_batches(partition.batches(), |batch| {
            affinity_batch(points, cfg, batch)
        });
        let (graph, diagnostics) = assemble(points, &partition, per_batch, true);
        graph.debug_assert_invariants();

        log::debug!(
            "{} graph (sigma={}, threshold={}): {} edge(s) over {} batch(es)",
            self.name(),
            cfg.sigma,
            cfg.threshold,
            graph.len(),
            partition.len()
        );
        Ok(GraphBuild { graph, diagnostics })
    }
}

/// Gaussian kernel value for a distance `d`.
#[inline]
pub fn gaussian_affinity(d: f64, sigma: f64) -> f64 {
    // scale first: `sigma * sigma` underflows to zero for tiny sigma
    let z = d / sigma;
    (-0.5 * z * z).exp()
}

/// Normalised weight row for one point: `exp(A[j]) / sum_k exp(A[k])` over
/// the given distance row.
pub fn normalized_row(distances: &[f64], sigma: f64) -> Vec<f64> {
    let mut row: Vec<f64> = distances
        .iter()
        .map(|&d| gaussian_affinity(d, sigma).exp())
        .collect();
    let total: f64 = row.iter().sum();
    for w in &mut row {
        *w /= total;
    }
    row
}

fn affinity_batch(points: &PointSet, cfg: &AffinityGraphConfig, batch: &Batch) -> BatchEdges {
    let dm = distance_matrix(points, &cfg.columns, batch.indices());
    let n = dm.len();
    let mut out = BatchEdges::with_capacity(n * n, true);
    for i in 0..n {
        let row = normalized_row(dm.row(i), cfg.sigma);
        for (j, w) in row.into_iter().enumerate() {
            if w > cfg.threshold {
                out.push_weighted(i, j, w);
            }
        }
    }
    out
}
