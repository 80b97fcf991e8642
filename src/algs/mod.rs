//! Graph construction algorithms.

pub mod adjacency;
pub mod affinity;
pub mod assemble;
pub mod batch_partition;
pub mod distance;
pub mod knn;
pub mod parallel;
pub mod radius;
pub mod spatial_grid;

pub use adjacency::{AdjacencyGraph, NeighborDirection};
pub use affinity::{AffinityGraphBuilder, AffinityGraphConfig};
pub use knn::{KnnGraphBuilder, KnnGraphConfig};
pub use radius::{RadialGraphBuilder, RadialGraphConfig, RadiusSearch};
