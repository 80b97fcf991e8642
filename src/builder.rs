//! Builder dispatch and the public entry points.
//!
//! The three builders form a closed set, [`GraphBuilderKind`], behind one
//! capability trait, [`GraphBuilder`]. Each variant is configured through
//! its own explicit, serialisable config struct; [`GraphBuilderConfig`] is
//! the tagged union of those configs.

use serde::{Deserialize, Serialize};
use static_assertions::assert_impl_all;

use crate::algs::affinity::{AffinityGraphBuilder, AffinityGraphConfig};
use crate::algs::assemble::attach;
use crate::algs::knn::{KnnGraphBuilder, KnnGraphConfig};
use crate::algs::radius::{RadialGraphBuilder, RadialGraphConfig};
use crate::data::columns::ColumnSelection;
use crate::data::point_set::PointSet;
use crate::diagnostics::Diagnostics;
use crate::graph::Graph;
use crate::graph_error::GraphError;

/// Result of a successful build: the graph plus any non-fatal findings.
#[derive(Clone, Debug)]
pub struct GraphBuild<'p> {
    pub graph: Graph<'p>,
    pub diagnostics: Diagnostics,
}

/// Common contract of every graph builder.
pub trait GraphBuilder: Send + Sync {
    /// Short name used in log lines.
    fn name(&self) -> &'static str;

    /// Compute the adjacency of `points` without touching them.
    fn build<'p>(&self, points: &'p PointSet) -> Result<GraphBuild<'p>, GraphError>;

    /// Build and write the result onto `points`, overwriting any adjacency
    /// already attached. The overwrite is reported in the returned
    /// diagnostics.
    fn apply(&self, points: &mut PointSet) -> Result<Diagnostics, GraphError> {
        let (edge_index, weights, mut diagnostics) = {
            let GraphBuild { graph, diagnostics } = self.build(points)?;
            let (edge_index, weights) = graph.into_parts();
            (edge_index, weights, diagnostics)
        };
        if let Some(d) = attach(points, edge_index, weights) {
            diagnostics.push(d);
        }
        Ok(diagnostics)
    }
}

/// Closed set of builders.
#[derive(Clone, Debug, PartialEq)]
pub enum GraphBuilderKind {
    Knn(KnnGraphBuilder),
    Radial(RadialGraphBuilder),
    Affinity(AffinityGraphBuilder),
}

assert_impl_all!(GraphBuilderKind: Send, Sync);
assert_impl_all!(PointSet: Send, Sync);
assert_impl_all!(Graph<'static>: Send, Sync);

impl GraphBuilder for GraphBuilderKind {
    fn name(&self) -> &'static str {
        match self {
            GraphBuilderKind::Knn(b) => b.name(),
            GraphBuilderKind::Radial(b) => b.name(),
            GraphBuilderKind::Affinity(b) => b.name(),
        }
    }

    fn build<'p>(&self, points: &'p PointSet) -> Result<GraphBuild<'p>, GraphError> {
        match self {
            GraphBuilderKind::Knn(b) => b.build(points),
            GraphBuilderKind::Radial(b) => b.build(points),
            GraphBuilderKind::Affinity(b) => b.build(points),
        }
    }
}

impl From<KnnGraphBuilder> for GraphBuilderKind {
    fn from(b: KnnGraphBuilder) -> Self {
        GraphBuilderKind::Knn(b)
    }
}

impl From<RadialGraphBuilder> for GraphBuilderKind {
    fn from(b: RadialGraphBuilder) -> Self {
        GraphBuilderKind::Radial(b)
    }
}

impl From<AffinityGraphBuilder> for GraphBuilderKind {
    fn from(b: AffinityGraphBuilder) -> Self {
        GraphBuilderKind::Affinity(b)
    }
}

/// Serialisable description of a builder.
///
/// ```
/// use pulse_graph::builder::GraphBuilderConfig;
///
/// let cfg: GraphBuilderConfig =
///     serde_json::from_str(r#"{"kind": "radial", "radius": 2.5}"#).unwrap();
/// assert!(cfg.into_builder().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GraphBuilderConfig {
    Knn(KnnGraphConfig),
    Radial(RadialGraphConfig),
    Affinity(AffinityGraphConfig),
}

impl GraphBuilderConfig {
    /// Validate the parameters and construct the builder.
    pub fn into_builder(self) -> Result<GraphBuilderKind, GraphError> {
        Ok(match self {
            GraphBuilderConfig::Knn(c) => KnnGraphBuilder::try_new(c)?.into(),
            GraphBuilderConfig::Radial(c) => RadialGraphBuilder::try_new(c)?.into(),
            GraphBuilderConfig::Affinity(c) => AffinityGraphBuilder::try_new(c)?.into(),
        })
    }
}

impl From<&GraphBuilderKind> for GraphBuilderConfig {
    fn from(b: &GraphBuilderKind) -> Self {
        match b {
            GraphBuilderKind::Knn(b) => GraphBuilderConfig::Knn(b.config().clone()),
            GraphBuilderKind::Radial(b) => GraphBuilderConfig::Radial(b.config().clone()),
            GraphBuilderKind::Affinity(b) => GraphBuilderConfig::Affinity(b.config().clone()),
        }
    }
}

/// k-nearest-neighbour graph over `columns`, edges `neighbour -> point`.
pub fn build_knn_graph<'p>(
    points: &'p PointSet,
    k: usize,
    columns: impl Into<ColumnSelection>,
) -> Result<Graph<'p>, GraphError> {
    let builder = KnnGraphBuilder::try_new(KnnGraphConfig {
        k,
        columns: columns.into(),
        ..KnnGraphConfig::default()
    })?;
    Ok(builder.build(points)?.graph)
}

/// Symmetric radius graph over `columns`.
pub fn build_radial_graph<'p>(
    points: &'p PointSet,
    radius: f64,
    columns: impl Into<ColumnSelection>,
) -> Result<Graph<'p>, GraphError> {
    let builder = RadialGraphBuilder::try_new(RadialGraphConfig::new(radius, columns))?;
    Ok(builder.build(points)?.graph)
}

/// Thresholded Gaussian-affinity graph over `columns`, with edge weights.
pub fn build_affinity_graph<'p>(
    points: &'p PointSet,
    sigma: f64,
    threshold: f64,
    columns: impl Into<ColumnSelection>,
) -> Result<Graph<'p>, GraphError> {
    let builder =
        AffinityGraphBuilder::try_new(AffinityGraphConfig::new(sigma, threshold, columns))?;
    Ok(builder.build(points)?.graph)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::Diagnostic;
    use crate::graph::EdgeIndex;

    fn line() -> PointSet {
        PointSet::from_rows(&[[0.0], [1.0], [3.0]], vec![0, 0, 0]).unwrap()
    }

    #[test]
    fn kind_delegates_to_variant() {
        let ps = line();
        let b: GraphBuilderKind = KnnGraphBuilder::new(1, [0]).unwrap().into();
        assert_eq!(b.name(), "knn");
        let g = b.build(&ps).unwrap().graph;
        assert_eq!(g.edge_set(), vec![(0, 1), (1, 0), (1, 2)]);
    }

    #[test]
    fn apply_overwrites_existing_structure() {
        let mut ps = line().with_structure(EdgeIndex::from_pairs([(0, 2)]), None);
        let b = RadialGraphBuilder::try_new(RadialGraphConfig::new(1.5, [0])).unwrap();
        let diags = b.apply(&mut ps).unwrap();
        assert!(diags.has_preexisting_structure());
        assert_eq!(
            diags.iter().next(),
            Some(&Diagnostic::PreexistingStructure {
                replaced_edges: 1,
                had_weights: false
            })
        );
        assert_eq!(ps.edge_index().unwrap().len(), 2);
    }

    #[test]
    fn apply_without_existing_structure_is_quiet() {
        let mut ps = line();
        let b = AffinityGraphBuilder::try_new(AffinityGraphConfig::new(1.0, 0.0, [0])).unwrap();
        let diags = b.apply(&mut ps).unwrap();
        assert!(diags.is_empty());
        assert_eq!(ps.edge_index().unwrap().len(), 9);
        assert_eq!(ps.edge_weight().unwrap().len(), 9);
    }

    #[test]
    fn failed_apply_leaves_points_untouched() {
        let mut ps = line().with_structure(EdgeIndex::from_pairs([(0, 1)]), None);
        let b = KnnGraphBuilder::new(2, [0, 4]).unwrap();
        let err = b.apply(&mut ps).unwrap_err();
        assert_eq!(
            err,
            GraphError::ColumnOutOfRange {
                column: 4,
                n_features: 1
            }
        );
        assert_eq!(ps.edge_index().unwrap().sources(), &[0]);
    }

    #[test]
    fn config_round_trips_through_kind() {
        let kind = GraphBuilderConfig::Knn(KnnGraphConfig::default())
            .into_builder()
            .unwrap();
        assert_eq!(
            GraphBuilderConfig::from(&kind),
            GraphBuilderConfig::Knn(KnnGraphConfig::default())
        );
    }

    #[test]
    fn invalid_configs_are_rejected() {
        assert_eq!(
            build_radial_graph(&line(), 0.0, [0]).unwrap_err(),
            GraphError::NonPositiveRadius(0.0)
        );
        assert_eq!(
            build_affinity_graph(&line(), -1.0, 0.0, [0]).unwrap_err(),
            GraphError::NonPositiveSigma(-1.0)
        );
        assert_eq!(
            build_knn_graph(&line(), 0, [0]).unwrap_err(),
            GraphError::InvalidK
        );
    }
}
