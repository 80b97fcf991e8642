//! GraphError: Unified error type for pulse-graph public APIs
//!
//! Every fallible entry point returns this type. Parameter problems are
//! reported before any distance is computed, so a failed call never leaves
//! partial output behind.

use thiserror::Error;

/// Unified error type for graph construction.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GraphError {
    /// Number of nearest neighbours must be at least one.
    #[error("k must be at least 1")]
    InvalidK,
    /// No coordinate column was selected for distance computation.
    #[error("column selection is empty")]
    EmptyColumns,
    /// A selected column does not exist in the feature matrix.
    #[error("column {column} out of range for {n_features} feature column(s)")]
    ColumnOutOfRange { column: usize, n_features: usize },
    /// Radius must be finite and strictly positive.
    #[error("radius must be finite and > 0, got {0}")]
    NonPositiveRadius(f64),
    /// Kernel width must be finite and strictly positive.
    #[error("sigma must be finite and > 0, got {0}")]
    NonPositiveSigma(f64),
    /// Affinity threshold must be a non-negative number.
    #[error("threshold must be >= 0, got {0}")]
    InvalidThreshold(f64),
    /// A neighbour cap of zero would discard every edge.
    #[error("max_num_neighbors must be at least 1 when set")]
    InvalidMaxNeighbors,
    /// Point sets need at least one feature column.
    #[error("point set must have at least one feature column")]
    ZeroFeatures,
    /// A feature row has the wrong number of entries.
    #[error("row {row} has {found} feature(s), expected {expected}")]
    RaggedFeatures {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// The batch vector does not have one entry per point.
    #[error("batch vector has {batch} entries for {points} point(s)")]
    BatchLengthMismatch { points: usize, batch: usize },
    /// Feature values must be finite.
    #[error("non-finite feature value at row {row}, column {column}")]
    NonFiniteFeature { row: usize, column: usize },
    /// An edge endpoint is not a valid point index.
    #[error("edge {edge} references point {point}, but only {n_points} point(s) exist")]
    EdgeOutOfRange {
        edge: usize,
        point: usize,
        n_points: usize,
    },
    /// An edge connects two different batches.
    #[error("edge {source_point} -> {target_point} crosses batches {source_batch} and {target_batch}")]
    CrossBatchEdge {
        source_point: usize,
        target_point: usize,
        source_batch: i64,
        target_batch: i64,
    },
    /// Weight vector is not parallel to the edge list.
    #[error("{weights} weight(s) for {edges} edge(s)")]
    WeightLengthMismatch { edges: usize, weights: usize },
    /// Edge weights must lie in (0, 1].
    #[error("edge {edge} has weight {weight} outside (0, 1]")]
    WeightOutOfRange { edge: usize, weight: f64 },
}

impl GraphError {
    /// `true` for malformed caller input (as opposed to a broken invariant
    /// on an already constructed structure).
    pub fn is_invalid_input(&self) -> bool {
        !matches!(
            self,
            GraphError::EdgeOutOfRange { .. }
                | GraphError::CrossBatchEdge { .. }
                | GraphError::WeightLengthMismatch { .. }
                | GraphError::WeightOutOfRange { .. }
        )
    }
}
