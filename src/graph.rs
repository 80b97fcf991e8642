//! Edge lists produced by the graph builders.
//!
//! Edges are stored in the `2 × E` layout message-passing layers expect:
//! a `sources` vector and a parallel `targets` vector, both in the global
//! point index space of the originating [`PointSet`].

use serde::{Deserialize, Serialize};

use crate::data::point_set::PointSet;
use crate::debug_invariants::DebugInvariants;
use crate::graph_error::GraphError;

/// Parallel source/target index vectors.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeIndex {
    sources: Vec<usize>,
    targets: Vec<usize>,
}

impl EdgeIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(cap: usize) -> Self {
        Self {
            sources: Vec::with_capacity(cap),
            targets: Vec::with_capacity(cap),
        }
    }

    pub fn from_pairs(pairs: impl IntoIterator<Item = (usize, usize)>) -> Self {
        let mut out = Self::new();
        for (s, t) in pairs {
            out.push(s, t);
        }
        out
    }

    #[inline]
    pub fn push(&mut self, source: usize, target: usize) {
        self.sources.push(source);
        self.targets.push(target);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    #[inline]
    pub fn sources(&self) -> &[usize] {
        &self.sources
    }

    #[inline]
    pub fn targets(&self) -> &[usize] {
        &self.targets
    }

    /// `(source, target)` pairs in storage order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (usize, usize)> + '_ {
        self.sources
            .iter()
            .copied()
            .zip(self.targets.iter().copied())
    }
}

/// Orientation of neighbourhood edges.
///
/// Aggregation layers gather messages along incoming edges, so the default
/// points every edge from a neighbour to the point whose neighbourhood it
/// belongs to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeFlow {
    /// `neighbour -> centre`.
    #[default]
    SourceToTarget,
    /// `centre -> neighbour`.
    TargetToSource,
}

impl EdgeFlow {
    /// `(source, target)` for an edge between `center` and one of its neighbours.
    #[inline]
    pub fn orient(self, neighbor: usize, center: usize) -> (usize, usize) {
        match self {
            EdgeFlow::SourceToTarget => (neighbor, center),
            EdgeFlow::TargetToSource => (center, neighbor),
        }
    }
}

/// A single edge with its optional weight.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Edge {
    pub source: usize,
    pub target: usize,
    pub weight: Option<f64>,
}

/// Adjacency over a [`PointSet`], as returned by every builder.
///
/// A `Graph` is a transient value: it borrows the points it was built from
/// and is meant to be consumed (or turned into owned parts) right away.
#[derive(Clone, Debug)]
pub struct Graph<'p> {
    points: &'p PointSet,
    edge_index: EdgeIndex,
    weights: Option<Vec<f64>>,
}

impl<'p> Graph<'p> {
    pub(crate) fn new(points: &'p PointSet, edge_index: EdgeIndex, weights: Option<Vec<f64>>) -> Self {
        Self {
            points,
            edge_index,
            weights,
        }
    }

    /// Points this graph was built over.
    #[inline]
    pub fn points(&self) -> &'p PointSet {
        self.points
    }

    #[inline]
    pub fn edge_index(&self) -> &EdgeIndex {
        &self.edge_index
    }

    #[inline]
    pub fn sources(&self) -> &[usize] {
        self.edge_index.sources()
    }

    #[inline]
    pub fn targets(&self) -> &[usize] {
        self.edge_index.targets()
    }

    /// Per-edge weights (affinity graphs only).
    #[inline]
    pub fn weights(&self) -> Option<&[f64]> {
        self.weights.as_deref()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.edge_index.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.edge_index.is_empty()
    }

    /// Edges in storage order.
    pub fn edges(&self) -> impl ExactSizeIterator<Item = Edge> + '_ {
        self.edge_index
            .iter()
            .enumerate()
            .map(move |(e, (source, target))| Edge {
                source,
                target,
                weight: self.weights.as_ref().map(|w| w[e]),
            })
    }

    /// Sorted `(source, target)` pairs, for order-independent comparison.
    pub fn edge_set(&self) -> Vec<(usize, usize)> {
        let mut pairs: Vec<_> = self.edge_index.iter().collect();
        pairs.sort_unstable();
        pairs
    }

    /// Release the borrow on the points, keeping the edges and weights.
    pub fn into_parts(self) -> (EdgeIndex, Option<Vec<f64>>) {
        (self.edge_index, self.weights)
    }
}

/// Check that every edge stays inside one batch and that weights, if any,
/// are parallel to the edges and lie in `(0, 1]`.
pub(crate) fn validate_edges(
    points: &PointSet,
    edge_index: &EdgeIndex,
    weights: Option<&[f64]>,
) -> Result<(), GraphError> {
    let n_points = points.len();
    let batch = points.batch();
    for (edge, (s, t)) in edge_index.iter().enumerate() {
        for point in [s, t] {
            if point >= n_points {
                return Err(GraphError::EdgeOutOfRange {
                    edge,
                    point,
                    n_points,
                });
            }
        }
        if batch[s] != batch[t] {
            return Err(GraphError::CrossBatchEdge {
                source_point: s,
                target_point: t,
                source_batch: batch[s],
                target_batch: batch[t],
            });
        }
    }
    if let Some(w) = weights {
        if w.len() != edge_index.len() {
            return Err(GraphError::WeightLengthMismatch {
                edges: edge_index.len(),
                weights: w.len(),
            });
        }
        if let Some((edge, &weight)) = w
            .iter()
            .enumerate()
            .find(|&(_, &x)| !(x > 0.0 && x <= 1.0))
        {
            return Err(GraphError::WeightOutOfRange { edge, weight });
        }
    }
    Ok(())
}

impl DebugInvariants for Graph<'_> {
    fn debug_assert_invariants(&self) {
        crate::debug_invariants!(self.validate_invariants(), "Graph");
    }

    fn validate_invariants(&self) -> Result<(), GraphError> {
        validate_edges(self.points, &self.edge_index, self.weights.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_batches() -> PointSet {
        PointSet::from_rows(&[[0.0], [1.0], [2.0]], vec![0, 0, 1]).unwrap()
    }

    #[test]
    fn edges_carry_weights() {
        let ps = two_batches();
        let g = Graph::new(&ps, EdgeIndex::from_pairs([(0, 1), (1, 0)]), Some(vec![0.25, 1.0]));
        let edges: Vec<Edge> = g.edges().collect();
        assert_eq!(edges[1].source, 1);
        assert_eq!(edges[1].weight, Some(1.0));
        assert!(g.validate_invariants().is_ok());
    }

    #[test]
    fn edge_set_is_sorted() {
        let ps = two_batches();
        let g = Graph::new(&ps, EdgeIndex::from_pairs([(1, 0), (0, 1)]), None);
        assert_eq!(g.edge_set(), vec![(0, 1), (1, 0)]);
    }

    #[test]
    fn cross_batch_edge_is_rejected() {
        let ps = two_batches();
        let g = Graph::new(&ps, EdgeIndex::from_pairs([(1, 2)]), None);
        assert_eq!(
            g.validate_invariants(),
            Err(GraphError::CrossBatchEdge {
                source_point: 1,
                target_point: 2,
                source_batch: 0,
                target_batch: 1
            })
        );
    }

    #[test]
    fn weight_checks() {
        let ps = two_batches();
        let g = Graph::new(&ps, EdgeIndex::from_pairs([(0, 1)]), Some(vec![]));
        assert!(matches!(
            g.validate_invariants(),
            Err(GraphError::WeightLengthMismatch { edges: 1, weights: 0 })
        ));
        let g = Graph::new(&ps, EdgeIndex::from_pairs([(0, 1)]), Some(vec![0.0]));
        assert!(matches!(
            g.validate_invariants(),
            Err(GraphError::WeightOutOfRange { edge: 0, .. })
        ));
        let g = Graph::new(&ps, EdgeIndex::from_pairs([(0, 7)]), None);
        assert!(matches!(
            g.validate_invariants(),
            Err(GraphError::EdgeOutOfRange { point: 7, .. })
        ));
    }
}
