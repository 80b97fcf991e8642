//! CSR adjacency view of a built graph.
//!
//! Determinism:
//! - Node `i`'s neighbour list keeps edge storage order (a stable counting
//!   sort over the edge list), so it inherits the builder's ordering.

use crate::graph::Graph;

/// Which endpoint's list an edge is filed under.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum NeighborDirection {
    /// List the sources of edges arriving at each node.
    #[default]
    Incoming,
    /// List the targets of edges leaving each node.
    Outgoing,
}

/// CSR-style adjacency over the points of a graph.
#[derive(Debug, Clone, PartialEq)]
pub struct AdjacencyGraph {
    /// CSR offsets into `adjncy` for each node; `xadj.len() == n + 1`.
    pub xadj: Vec<usize>,
    /// CSR adjacency list (global point indices).
    pub adjncy: Vec<usize>,
    /// Edge weights parallel to `adjncy`, when the graph is weighted.
    pub weights: Option<Vec<f64>>,
}

impl AdjacencyGraph {
    #[inline]
    pub fn num_nodes(&self) -> usize {
        self.xadj.len().saturating_sub(1)
    }

    /// Return the neighbor index slice for node `i`.
    #[inline]
    pub fn neighbors(&self, i: usize) -> &[usize] {
        &self.adjncy[self.xadj[i]..self.xadj[i + 1]]
    }

    /// Weights parallel to [`neighbors`](Self::neighbors).
    #[inline]
    pub fn neighbor_weights(&self, i: usize) -> Option<&[f64]> {
        self.weights
            .as_deref()
            .map(|w| &w[self.xadj[i]..self.xadj[i + 1]])
    }

    #[inline]
    pub fn degree(&self, i: usize) -> usize {
        self.xadj[i + 1] - self.xadj[i]
    }
}

impl Graph<'_> {
    /// Regroup the edge list per node.
    pub fn to_adjacency(&self, direction: NeighborDirection) -> AdjacencyGraph {
        let n = self.points().len();
        let (keys, values) = match direction {
            NeighborDirection::Incoming => (self.targets(), self.sources()),
            NeighborDirection::Outgoing => (self.sources(), self.targets()),
        };

        let mut xadj = vec![0usize; n + 1];
        for &k in keys {
            xadj[k + 1] += 1;
        }
        for i in 0..n {
            xadj[i + 1] += xadj[i];
        }

        let mut cursor = xadj[..n].to_vec();
        let mut adjncy = vec![0usize; keys.len()];
        let mut weights = self.weights().map(|_| vec![0.0; keys.len()]);
        for (e, (&k, &v)) in keys.iter().zip(values).enumerate() {
            let slot = cursor[k];
            cursor[k] += 1;
            adjncy[slot] = v;
            if let (Some(out), Some(w)) = (weights.as_mut(), self.weights()) {
                out[slot] = w[e];
            }
        }

        AdjacencyGraph {
            xadj,
            adjncy,
            weights,
        }
    }
}
