//! Point storage for batched detector pulses.
//!
//! A [`PointSet`] is a dense row-major feature matrix (one row per pulse), a
//! batch id per row, and an optional adjacency that a previous builder left
//! behind. Batch ids are arbitrary integers: rows of one event need not be
//! contiguous and ids need not be sorted.

use crate::graph::EdgeIndex;
use crate::graph_error::GraphError;

/// Feature rows, batch assignment, and the currently attached adjacency.
#[derive(Clone, Debug, PartialEq)]
pub struct PointSet {
    features: Vec<f64>,
    n_features: usize,
    batch: Vec<i64>,
    edge_index: Option<EdgeIndex>,
    edge_weight: Option<Vec<f64>>,
}

impl PointSet {
    /// Build a point set from a flat row-major feature buffer.
    ///
    /// `features.len()` must be a multiple of `n_features`, `batch` must have
    /// one entry per row, and every value must be finite.
    pub fn try_new(
        features: Vec<f64>,
        n_features: usize,
        batch: Vec<i64>,
    ) -> Result<Self, GraphError> {
        if n_features == 0 {
            return Err(GraphError::ZeroFeatures);
        }
        let rem = features.len() % n_features;
        if rem != 0 {
            return Err(GraphError::RaggedFeatures {
                row: features.len() / n_features,
                expected: n_features,
                found: rem,
            });
        }
        let n_points = features.len() / n_features;
        if batch.len() != n_points {
            return Err(GraphError::BatchLengthMismatch {
                points: n_points,
                batch: batch.len(),
            });
        }
        if let Some(pos) = features.iter().position(|v| !v.is_finite()) {
            return Err(GraphError::NonFiniteFeature {
                row: pos / n_features,
                column: pos % n_features,
            });
        }
        Ok(Self {
            features,
            n_features,
            batch,
            edge_index: None,
            edge_weight: None,
        })
    }

    /// Build a point set from individual rows. The first row fixes the
    /// feature count; an empty row list is rejected with `ZeroFeatures`
    /// (use [`PointSet::try_new`] for an empty set of known width).
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R], batch: Vec<i64>) -> Result<Self, GraphError> {
        let n_features = rows.first().map_or(0, |r| r.as_ref().len());
        if n_features == 0 {
            return Err(GraphError::ZeroFeatures);
        }
        let mut features = Vec::with_capacity(rows.len() * n_features);
        for (row, r) in rows.iter().enumerate() {
            let r = r.as_ref();
            if r.len() != n_features {
                return Err(GraphError::RaggedFeatures {
                    row,
                    expected: n_features,
                    found: r.len(),
                });
            }
            features.extend_from_slice(r);
        }
        Self::try_new(features, n_features, batch)
    }

    /// Every row in batch 0.
    pub fn single_batch(features: Vec<f64>, n_features: usize) -> Result<Self, GraphError> {
        let n_points = if n_features == 0 {
            0
        } else {
            features.len() / n_features
        };
        Self::try_new(features, n_features, vec![0; n_points])
    }

    /// Attach an adjacency up front, e.g. one produced by an earlier pass.
    pub fn with_structure(mut self, edge_index: EdgeIndex, edge_weight: Option<Vec<f64>>) -> Self {
        self.edge_index = Some(edge_index);
        self.edge_weight = edge_weight;
        self
    }

    /// Number of points (rows).
    #[inline]
    pub fn len(&self) -> usize {
        self.batch.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.batch.is_empty()
    }

    /// Number of feature columns per point.
    #[inline]
    pub fn n_features(&self) -> usize {
        self.n_features
    }

    /// Feature row of point `i`.
    ///
    /// # Panics
    /// Panics if `i >= self.len()`.
    #[inline]
    pub fn row(&self, i: usize) -> &[f64] {
        &self.features[i * self.n_features..(i + 1) * self.n_features]
    }

    /// Batch id per point.
    #[inline]
    pub fn batch(&self) -> &[i64] {
        &self.batch
    }

    #[inline]
    pub fn batch_of(&self, i: usize) -> Option<i64> {
        self.batch.get(i).copied()
    }

    /// Currently attached adjacency, if any.
    pub fn edge_index(&self) -> Option<&EdgeIndex> {
        self.edge_index.as_ref()
    }

    /// Weights parallel to [`PointSet::edge_index`], if any.
    pub fn edge_weight(&self) -> Option<&[f64]> {
        self.edge_weight.as_deref()
    }

    /// `true` if an adjacency is already attached.
    pub fn has_structure(&self) -> bool {
        self.edge_index.is_some()
    }

    /// Replace the attached adjacency and return the previous one.
    pub(crate) fn replace_structure(
        &mut self,
        edge_index: EdgeIndex,
        edge_weight: Option<Vec<f64>>,
    ) -> Option<(EdgeIndex, Option<Vec<f64>>)> {
        let prev_weight = std::mem::replace(&mut self.edge_weight, edge_weight);
        self.edge_index
            .replace(edge_index)
            .map(|prev| (prev, prev_weight))
    }

    /// Drop any attached adjacency.
    pub fn clear_structure(&mut self) {
        self.edge_index = None;
        self.edge_weight = None;
    }
}
