#![cfg_attr(docsrs, feature(doc_cfg))]
//! # pulse-graph
//!
//! pulse-graph attaches neighbourhood structure to batched point clouds of
//! detector pulses, ready for message-passing layers. Each row of a
//! [`PointSet`](data::point_set::PointSet) is one pulse; a batch id per row
//! groups pulses into independent events, and no edge ever crosses events.
//!
//! ## Builders
//! - [`KnnGraphBuilder`](algs::knn::KnnGraphBuilder): the `k` nearest
//!   neighbours of every point.
//! - [`RadialGraphBuilder`](algs::radius::RadialGraphBuilder): every pair
//!   within a fixed radius, in both directions.
//! - [`AffinityGraphBuilder`](algs::affinity::AffinityGraphBuilder): a
//!   thresholded Gaussian affinity with row-normalised edge weights.
//!
//! All three implement [`GraphBuilder`](builder::GraphBuilder), and
//! [`GraphBuilderConfig`](builder::GraphBuilderConfig) describes any of them
//! in a serialisable form.
//!
//! ## Determinism
//!
//! Output depends only on the input and the builder parameters. Batches are
//! visited by ascending id and ties are broken by ascending point index, so
//! enabling the `rayon` feature never changes the result.
//!
//! ## Usage
//!
//! ```
//! use pulse_graph::prelude::*;
//!
//! let mut points = PointSet::from_rows(
//!     &[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
//!     vec![0, 0, 0],
//! )?;
//! let builder = KnnGraphBuilder::new(2, [0, 1, 2])?;
//! let diagnostics = builder.apply(&mut points)?;
//! assert!(diagnostics.is_empty());
//! assert_eq!(points.edge_index().map(|e| e.len()), Some(6));
//! # Ok::<(), GraphError>(())
//! ```

pub mod algs;
pub mod builder;
pub mod data;
pub mod debug_invariants;
pub mod diagnostics;
pub mod graph;
pub mod graph_error;

pub use debug_invariants::DebugInvariants;

/// A convenient prelude to import the most-used traits & types:
pub mod prelude {
    pub use crate::algs::adjacency::{AdjacencyGraph, NeighborDirection};
    pub use crate::algs::affinity::{AffinityGraphBuilder, AffinityGraphConfig};
    pub use crate::algs::knn::{KnnGraphBuilder, KnnGraphConfig};
    pub use crate::algs::radius::{RadialGraphBuilder, RadialGraphConfig, RadiusSearch};
    pub use crate::builder::{
        GraphBuild, GraphBuilder, GraphBuilderConfig, GraphBuilderKind, build_affinity_graph,
        build_knn_graph, build_radial_graph,
    };
    pub use crate::data::columns::ColumnSelection;
    pub use crate::data::point_set::PointSet;
    pub use crate::debug_invariants::DebugInvariants;
    pub use crate::diagnostics::{Degeneracy, Diagnostic, Diagnostics};
    pub use crate::graph::{Edge, EdgeFlow, EdgeIndex, Graph};
    pub use crate::graph_error::GraphError;
}
