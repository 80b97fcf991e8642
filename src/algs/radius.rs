//! Radius graphs.
//!
//! Every pair of distinct points of one batch with
//! `distance(i, j) <= radius` is connected in both directions.
//!
//! Determinism:
//! - Edges are grouped by centre in ascending index order.
//! - Within a group, neighbours are listed by ascending index, whichever
//!   search strategy produced them.

use serde::{Deserialize, Serialize};

use crate::algs::assemble::{BatchEdges, assemble};
use crate::algs::batch_partition::{Batch, partition_batches};
use crate::algs::distance::BatchCoords;
use crate::algs::parallel::map_batches;
use crate::algs::spatial_grid::SpatialGrid;
use crate::builder::{GraphBuild, GraphBuilder};
use crate::data::columns::ColumnSelection;
use crate::data::point_set::PointSet;
use crate::debug_invariants::DebugInvariants;
use crate::diagnostics::{Degeneracy, Diagnostic};
use crate::graph::EdgeFlow;
use crate::graph_error::GraphError;

/// Batches at least this large use grid bucketing under [`RadiusSearch::Auto`].
pub const GRID_MIN_BATCH: usize = 64;

/// Candidate search strategy. All strategies produce identical edges.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RadiusSearch {
    /// Grid for large, low-dimensional batches; brute force otherwise.
    #[default]
    Auto,
    /// Test every pair.
    BruteForce,
    /// Always bucket (falls back to brute force above three columns).
    Grid,
}

/// Options for radius graph construction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RadialGraphConfig {
    pub radius: f64,
    #[serde(default)]
    pub columns: ColumnSelection,
    /// Keep only the nearest `m` neighbours of each point. Breaks symmetry.
    #[serde(default)]
    pub max_num_neighbors: Option<usize>,
    #[serde(default)]
    pub self_loops: bool,
    #[serde(default)]
    pub flow: EdgeFlow,
    #[serde(default)]
    pub search: RadiusSearch,
}

impl RadialGraphConfig {
    pub fn new(radius: f64, columns: impl Into<ColumnSelection>) -> Self {
        Self {
            radius,
            columns: columns.into(),
            max_num_neighbors: None,
            self_loops: false,
            flow: EdgeFlow::default(),
            search: RadiusSearch::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RadialGraphBuilder {
    config: RadialGraphConfig,
}

impl RadialGraphBuilder {
    pub fn try_new(config: RadialGraphConfig) -> Result<Self, GraphError> {
        if !(config.radius > 0.0 && config.radius.is_finite()) {
            return Err(GraphError::NonPositiveRadius(config.radius));
        }
        if config.columns.is_empty() {
            return Err(GraphError::EmptyColumns);
        }
        if config.max_num_neighbors == Some(0) {
            return Err(GraphError::InvalidMaxNeighbors);
        }
        Ok(Self { config })
    }

    pub fn config(&self) -> &RadialGraphConfig {
        &self.config
    }
}

impl GraphBuilder for RadialGraphBuilder {
    fn name(&self) -> &'static str {
        "radial"
    }

    fn build<'p>(&self, points: &'p PointSet) -> Result<GraphBuild<'p>, GraphError> {
        let cfg = &self.config;
        cfg.columns.validate(points.n_features())?;

        let partition = partition_batches(points.batch());
        let per_batch = map_batches(partition.batches(), |batch| radial_batch(points, cfg, batch));
        let (graph, diagnostics) = assemble(points, &partition, per_batch, false);
        graph.debug_assert_invariants();

        log::debug!(
            "{} graph (r={}): {} edge(s) over {} batch(es)",
            self.name(),
            cfg.radius,
            graph.len(),
            partition.len()
        );
        Ok(GraphBuild { graph, diagnostics })
    }
}

fn radial_batch(points: &PointSet, cfg: &RadialGraphConfig, batch: &Batch) -> BatchEdges {
    let coords = BatchCoords::gather(points, &cfg.columns, batch.indices());
    let n = coords.len();
    let mut out = BatchEdges::default();
    if n == 1 && !cfg.self_loops {
        out.diagnostic = Some(Diagnostic::DegenerateBatch {
            batch_id: batch.id(),
            size: 1,
            kind: Degeneracy::SinglePoint,
        });
        return out;
    }

    let grid = match cfg.search {
        RadiusSearch::BruteForce => None,
        RadiusSearch::Auto if n < GRID_MIN_BATCH => None,
        RadiusSearch::Auto | RadiusSearch::Grid => SpatialGrid::new(&coords, cfg.radius),
    };

    let mut found: Vec<(f64, usize)> = Vec::new();
    for center in 0..n {
        found.clear();
        let mut consider = |j: usize| {
            if j == center && !cfg.self_loops {
                return;
            }
            let d = coords.distance(center, j);
            if d <= cfg.radius {
                found.push((d, j));
            }
        };
        match &grid {
            Some(g) => g.for_each_candidate(coords.point(center), &mut consider),
            None => (0..n).for_each(&mut consider),
        }

        if let Some(m) = cfg.max_num_neighbors {
            if found.len() > m {
                found.select_nth_unstable_by(m - 1, |a, b| {
                    a.0.total_cmp(&b.0).then(a.1.cmp(&b.1))
                });
                found.truncate(m);
            }
        }
        found.sort_unstable_by_key(|&(_, j)| j);
        for &(_, neighbor) in &found {
            let (s, t) = cfg.flow.orient(neighbor, center);
            out.push(s, t);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(xs: &[f64], batch: Vec<i64>) -> PointSet {
        let rows: Vec<[f64; 1]> = xs.iter().map(|&x| [x]).collect();
        PointSet::from_rows(&rows, batch).unwrap()
    }

    fn build(ps: &PointSet, cfg: RadialGraphConfig) -> Vec<(usize, usize)> {
        RadialGraphBuilder::try_new(cfg)
            .unwrap()
            .build(ps)
            .unwrap()
            .graph
            .edge_index()
            .iter()
            .collect()
    }

    #[test]
    fn boundary_distance_is_included() {
        let ps = line(&[0.0, 1.0, 2.5], vec![0; 3]);
        let edges = build(&ps, RadialGraphConfig::new(1.0, [0]));
        assert_eq!(edges, vec![(1, 0), (0, 1)]);
    }

    #[test]
    fn output_is_symmetric() {
        let ps = line(&[0.0, 0.5, 1.0, 1.4, 9.0], vec![0; 5]);
        let edges = build(&ps, RadialGraphConfig::new(0.6, [0]));
        for &(s, t) in &edges {
            assert!(edges.contains(&(t, s)));
        }
        assert_eq!(edges.len(), 6);
    }

    #[test]
    fn neighbour_cap_keeps_nearest() {
        let ps = line(&[0.0, 0.9, 0.2, 0.5], vec![0; 4]);
        let cfg = RadialGraphConfig {
            max_num_neighbors: Some(2),
            ..RadialGraphConfig::new(1.0, [0])
        };
        let edges = build(&ps, cfg);
        let into_zero: Vec<usize> = edges
            .iter()
            .filter(|&&(_, t)| t == 0)
            .map(|&(s, _)| s)
            .collect();
        assert_eq!(into_zero, vec![2, 3]);
    }

    #[test]
    fn self_loops_and_single_point_batches() {
        let ps = line(&[0.0, 4.0], vec![0, 1]);
        let b = RadialGraphBuilder::try_new(RadialGraphConfig::new(1.0, [0])).unwrap();
        let out = b.build(&ps).unwrap();
        assert!(out.graph.is_empty());
        assert_eq!(out.diagnostics.degenerate_batches().count(), 2);

        let cfg = RadialGraphConfig {
            self_loops: true,
            ..RadialGraphConfig::new(1.0, [0])
        };
        assert_eq!(build(&ps, cfg), vec![(0, 0), (1, 1)]);
    }

    #[test]
    fn grid_matches_brute_force() {
        let rows: Vec<[f64; 3]> = (0..150)
            .map(|i| {
                let t = i as f64;
                [(t * 0.37).sin() * 4.0, (t * 0.11).cos() * 4.0, (t * 0.05) % 3.0]
            })
            .collect();
        let batch: Vec<i64> = (0..150).map(|i| i % 2).collect();
        let ps = PointSet::from_rows(&rows, batch).unwrap();
        let grid = build(
            &ps,
            RadialGraphConfig {
                search: RadiusSearch::Grid,
                ..RadialGraphConfig::new(0.8, [0, 1, 2])
            },
        );
        let brute = build(
            &ps,
            RadialGraphConfig {
                search: RadiusSearch::BruteForce,
                ..RadialGraphConfig::new(0.8, [0, 1, 2])
            },
        );
        assert!(!brute.is_empty());
        assert_eq!(grid, brute);
    }

    #[test]
    fn rejects_bad_parameters() {
        for r in [0.0, -1.0, f64::INFINITY] {
            assert_eq!(
                RadialGraphBuilder::try_new(RadialGraphConfig::new(r, [0])),
                Err(GraphError::NonPositiveRadius(r))
            );
        }
        let cfg = RadialGraphConfig {
            max_num_neighbors: Some(0),
            ..RadialGraphConfig::new(1.0, [0])
        };
        assert_eq!(
            RadialGraphBuilder::try_new(cfg),
            Err(GraphError::InvalidMaxNeighbors)
        );
    }
}
