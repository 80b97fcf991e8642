//! Euclidean distances over a subset of feature columns.
//!
//! Only the selected columns take part; every other feature is ignored.
//! Builders pack one batch at a time into [`BatchCoords`] so pairwise work
//! stays quadratic in the batch size, never in the full multi-event set.

use crate::data::columns::ColumnSelection;
use crate::data::point_set::PointSet;

/// Squared distance between rows `i` and `j` over `columns`.
///
/// Columns are assumed valid (see [`ColumnSelection::validate`]).
pub fn squared_distance(points: &PointSet, columns: &ColumnSelection, i: usize, j: usize) -> f64 {
    let (a, b) = (points.row(i), points.row(j));
    columns
        .as_slice()
        .iter()
        .map(|&c| {
            let d = a[c] - b[c];
            d * d
        })
        .sum()
}

/// Euclidean distance between rows `i` and `j` over `columns`.
pub fn distance(points: &PointSet, columns: &ColumnSelection, i: usize, j: usize) -> f64 {
    squared_distance(points, columns, i, j).sqrt()
}

/// Selected coordinates of one batch, packed contiguously.
///
/// Local index `i` refers to `indices[i]` of the batch it was gathered from.
#[derive(Clone, Debug)]
pub struct BatchCoords {
    coords: Vec<f64>,
    dim: usize,
}

impl BatchCoords {
    /// Gather the selected columns of the given (global) point indices.
    pub fn gather(points: &PointSet, columns: &ColumnSelection, indices: &[usize]) -> Self {
        let cols = columns.as_slice();
        let mut coords = Vec::with_capacity(indices.len() * cols.len());
        for &p in indices {
            let row = points.row(p);
            coords.extend(cols.iter().map(|&c| row[c]));
        }
        Self {
            coords,
            dim: cols.len(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        if self.dim == 0 {
            0
        } else {
            self.coords.len() / self.dim
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Coordinate dimension (number of selected columns).
    #[inline]
    pub fn dim(&self) -> usize {
        self.dim
    }

    #[inline]
    pub fn point(&self, i: usize) -> &[f64] {
        &self.coords[i * self.dim..(i + 1) * self.dim]
    }

    /// Summed in column order, so results match [`squared_distance`] exactly.
    #[inline]
    pub fn squared_distance(&self, i: usize, j: usize) -> f64 {
        self.point(i)
            .iter()
            .zip(self.point(j))
            .map(|(a, b)| {
                let d = a - b;
                d * d
            })
            .sum()
    }

    #[inline]
    pub fn distance(&self, i: usize, j: usize) -> f64 {
        self.squared_distance(i, j).sqrt()
    }
}

/// Dense symmetric distance matrix over one batch (local indices).
#[derive(Clone, Debug, PartialEq)]
pub struct DistanceMatrix {
    n: usize,
    data: Vec<f64>,
}

impl DistanceMatrix {
    /// Fill the upper triangle and mirror it; the diagonal stays zero.
    pub fn from_coords(coords: &BatchCoords) -> Self {
        let n = coords.len();
        let mut data = vec![0.0; n * n];
        for i in 0..n {
            for j in (i + 1)..n {
                let d = coords.distance(i, j);
                data[i * n + j] = d;
                data[j * n + i] = d;
            }
        }
        Self { n, data }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.n
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.data[i * self.n + j]
    }

    #[inline]
    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.n..(i + 1) * self.n]
    }
}

/// Pairwise distances among `indices`, restricted to `columns`.
pub fn distance_matrix(
    points: &PointSet,
    columns: &ColumnSelection,
    indices: &[usize],
) -> DistanceMatrix {
    DistanceMatrix::from_coords(&BatchCoords::gather(points, columns, indices))
}
