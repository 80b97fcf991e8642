//! Merge per-batch edge lists into one global graph.
//!
//! Builders work on local indices (positions inside
//! [`Batch::indices`](crate::algs::batch_partition::Batch::indices)).
//! Assembly maps them back through the batch's index list, so the global
//! point numbering is preserved as given, and concatenates batches in
//! partition order (ascending batch id).

use crate::algs::batch_partition::BatchPartition;
use crate::data::point_set::PointSet;
use crate::debug_invariants::DebugInvariants;
use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::graph::{EdgeIndex, Graph};

/// Edges of a single batch, in local index space.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BatchEdges {
    pub sources: Vec<usize>,
    pub targets: Vec<usize>,
    pub weights: Option<Vec<f64>>,
    pub diagnostic: Option<Diagnostic>,
}

impl BatchEdges {
    pub fn with_capacity(cap: usize, weighted: bool) -> Self {
        Self {
            sources: Vec::with_capacity(cap),
            targets: Vec::with_capacity(cap),
            weights: weighted.then(|| Vec::with_capacity(cap)),
            diagnostic: None,
        }
    }

    #[inline]
    pub fn push(&mut self, source: usize, target: usize) {
        self.sources.push(source);
        self.targets.push(target);
    }

    /// Push an edge with its weight; the batch must have been created weighted.
    #[inline]
    pub fn push_weighted(&mut self, source: usize, target: usize, weight: f64) {
        self.push(source, target);
        if let Some(w) = self.weights.as_mut() {
            w.push(weight);
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

/// Concatenate per-batch results (one entry per batch of `partition`, same
/// order) into a [`Graph`] over `points`.
///
/// With `weighted`, every batch must carry weights parallel to its edges.
pub fn assemble<'p>(
    points: &'p PointSet,
    partition: &BatchPartition,
    per_batch: Vec<BatchEdges>,
    weighted: bool,
) -> (Graph<'p>, Diagnostics) {
    debug_assert_eq!(partition.len(), per_batch.len());
    debug_assert!(!weighted || per_batch.iter().all(|b| b.weights.is_some()));

    let total: usize = per_batch.iter().map(BatchEdges::len).sum();
    let mut edge_index = EdgeIndex::with_capacity(total);
    let mut weights = weighted.then(|| Vec::with_capacity(total));
    let mut diagnostics = Diagnostics::new();

    for (batch, edges) in partition.iter().zip(per_batch) {
        let BatchEdges {
            sources,
            targets,
            weights: batch_weights,
            diagnostic,
        } = edges;
        let global = batch.indices();
        for (s, t) in sources.into_iter().zip(targets) {
            edge_index.push(global[s], global[t]);
        }
        if let (Some(all), Some(w)) = (weights.as_mut(), batch_weights) {
            all.extend(w);
        }
        if let Some(d) = diagnostic {
            log::trace!("batch {}: {:?}", batch.id(), d);
            diagnostics.push(d);
        }
    }

    (Graph::new(points, edge_index, weights), diagnostics)
}

/// Write a freshly built structure onto `points`.
///
/// Any existing adjacency is overwritten, never merged. When one was present
/// a warning is logged and returned as [`Diagnostic::PreexistingStructure`].
pub fn attach(
    points: &mut PointSet,
    edge_index: EdgeIndex,
    weights: Option<Vec<f64>>,
) -> Option<Diagnostic> {
    let replaced = points.replace_structure(edge_index, weights);
    points.debug_assert_invariants();
    let (prev, prev_weights) = replaced?;
    log::warn!(
        "graph builder received points with a pre-existing structure ({} edge(s)); overwriting",
        prev.len()
    );
    Some(Diagnostic::PreexistingStructure {
        replaced_edges: prev.len(),
        had_weights: prev_weights.is_some(),
    })
}
