//! k-nearest-neighbour graphs.
//!
//! For every point `p` the `k` closest points of the same batch are selected
//! (exact search, squared Euclidean distance over the selected columns).
//!
//! Determinism:
//! - Ties are broken by ascending point index.
//! - Centres are visited in ascending index order and their neighbours are
//!   emitted nearest first.
//!
//! With the default [`EdgeFlow::SourceToTarget`] each edge reads
//! "source is among the k nearest neighbours of target".

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::algs::assemble::{BatchEdges, assemble};
use crate::algs::batch_partition::{Batch, partition_batches};
use crate::algs::distance::BatchCoords;
use crate::algs::parallel::map_batches;
use crate::builder::{GraphBuild, GraphBuilder};
use crate::data::columns::ColumnSelection;
use crate::data::point_set::PointSet;
use crate::debug_invariants::DebugInvariants;
use crate::diagnostics::{Degeneracy, Diagnostic};
use crate::graph::EdgeFlow;
use crate::graph_error::GraphError;

/// Options for k-NN graph construction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KnnGraphConfig {
    /// Neighbours per point (clamped to the batch size).
    pub k: usize,
    /// Coordinate columns used for distances.
    pub columns: ColumnSelection,
    /// Count each point as its own nearest neighbour.
    pub self_loops: bool,
    pub flow: EdgeFlow,
}

impl Default for KnnGraphConfig {
    fn default() -> Self {
        Self {
            k: 8,
            columns: ColumnSelection::default(),
            self_loops: false,
            flow: EdgeFlow::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct KnnGraphBuilder {
    config: KnnGraphConfig,
}

impl KnnGraphBuilder {
    pub fn try_new(config: KnnGraphConfig) -> Result<Self, GraphError> {
        if config.k == 0 {
            return Err(GraphError::InvalidK);
        }
        if config.columns.is_empty() {
            return Err(GraphError::EmptyColumns);
        }
        Ok(Self { config })
    }

    /// Builder with default options apart from `k` and `columns`.
    pub fn new(k: usize, columns: impl Into<ColumnSelection>) -> Result<Self, GraphError> {
        Self::try_new(KnnGraphConfig {
            k,
            columns: columns.into(),
            ..KnnGraphConfig::default()
        })
    }

    pub fn config(&self) -> &KnnGraphConfig {
        &self.config
    }
}

impl GraphBuilder for KnnGraphBuilder {
    fn name(&self) -> &'static str {
        "knn"
    }

    fn build<'p>(&self, points: &'p PointSet) -> Result<GraphBuild<'p>, GraphError> {
        let cfg = &self.config;
        cfg.columns.validate(points.n_features())?;

        let partition = partition_batches(points.batch());
        let per_batch = map_batches(partition.batches(), |batch| knn_batch(points, cfg, batch));
        let (graph, diagnostics) = assemble(points, &partition, per_batch, false);
        graph.debug_assert_invariants();

        log::debug!(
            "{} graph (k={}): {} edge(s) over {} batch(es)",
            self.name(),
            cfg.k,
            graph.len(),
            partition.len()
        );
        Ok(GraphBuild { graph, diagnostics })
    }
}

#[inline]
fn by_distance_then_index(a: &(f64, usize), b: &(f64, usize)) -> Ordering {
    a.0.total_cmp(&b.0).then(a.1.cmp(&b.1))
}

fn knn_batch(points: &PointSet, cfg: &KnnGraphConfig, batch: &Batch) -> BatchEdges {
    let coords = BatchCoords::gather(points, &cfg.columns, batch.indices());
    let n = coords.len();
    let available = if cfg.self_loops { n } else { n - 1 };
    let k = cfg.k.min(available);

    let mut out = BatchEdges::with_capacity(n * k, false);
    out.diagnostic = if n == 1 && !cfg.self_loops {
        Some(Degeneracy::SinglePoint)
    } else if k < cfg.k {
        Some(Degeneracy::ClampedK {
            requested: cfg.k,
            effective: k,
        })
    } else {
        None
    }
    .map(|kind| Diagnostic::DegenerateBatch {
        batch_id: batch.id(),
        size: n,
        kind,
    });
    if k == 0 {
        return out;
    }

    let mut candidates: Vec<(f64, usize)> = Vec::with_capacity(n);
    for center in 0..n {
        candidates.clear();
        candidates.extend(
            (0..n)
                .filter(|&j| cfg.self_loops || j != center)
                .map(|j| (coords.squared_distance(center, j), j)),
        );
        if k < candidates.len() {
            candidates.select_nth_unstable_by(k - 1, by_distance_then_index);
            candidates.truncate(k);
        }
        candidates.sort_unstable_by(by_distance_then_index);
        for &(_, neighbor) in &candidates {
            let (s, t) = cfg.flow.orient(neighbor, center);
            out.push(s, t);
        }
    }
    out
}
