//! Uniform grid bucketing for fixed-radius neighbour queries.
//!
//! Points are hashed into cubic cells of edge `cell_size`. With
//! `cell_size >= radius`, every point within `radius` of a query lies in the
//! query's cell or one of its `3^d` surrounding cells, so only those buckets
//! need a distance test.

use hashbrown::HashMap;
use itertools::Itertools;

use crate::algs::distance::BatchCoords;

/// Highest coordinate dimension the grid handles; above this the `3^d`
/// probe outgrows a brute-force scan for realistic batch sizes.
pub const MAX_GRID_DIM: usize = 3;

type CellKey = [i64; MAX_GRID_DIM];

#[derive(Clone, Debug)]
pub struct SpatialGrid {
    cell_size: f64,
    dim: usize,
    cells: HashMap<CellKey, Vec<usize>>,
    offsets: Vec<[i64; MAX_GRID_DIM]>,
}

impl SpatialGrid {
    /// Bucket every point of `coords` (local indices). Returns `None` when the
    /// coordinate dimension exceeds [`MAX_GRID_DIM`] or the cell size is not
    /// a positive finite number.
    pub fn new(coords: &BatchCoords, cell_size: f64) -> Option<Self> {
        let dim = coords.dim();
        if dim == 0 || dim > MAX_GRID_DIM || !(cell_size > 0.0 && cell_size.is_finite()) {
            return None;
        }
        let offsets = std::iter::repeat_n(-1i64..=1, dim)
            .multi_cartesian_product()
            .map(|o| {
                let mut key = [0i64; MAX_GRID_DIM];
                key[..dim].copy_from_slice(&o);
                key
            })
            .collect();
        let mut grid = Self {
            cell_size,
            dim,
            cells: HashMap::new(),
            offsets,
        };
        for i in 0..coords.len() {
            let key = grid.key(coords.point(i));
            grid.cells.entry(key).or_default().push(i);
        }
        Some(grid)
    }

    #[inline]
    fn key(&self, p: &[f64]) -> CellKey {
        let mut key = [0i64; MAX_GRID_DIM];
        for (k, &x) in key.iter_mut().zip(p) {
            *k = (x / self.cell_size).floor() as i64;
        }
        key
    }

    /// Number of occupied cells.
    pub fn occupied_cells(&self) -> usize {
        self.cells.len()
    }

    /// Call `f` with every point stored in the cell of `p` or an adjacent
    /// cell. Each point is visited at most once.
    pub fn for_each_candidate(&self, p: &[f64], mut f: impl FnMut(usize)) {
        debug_assert_eq!(p.len(), self.dim);
        let base = self.key(p);
        // saturation near i64::MAX can map two offsets onto one cell
        let keys: Vec<CellKey> = self
            .offsets
            .iter()
            .map(|o| {
                let mut key = base;
                for (k, d) in key.iter_mut().zip(o) {
                    *k = k.saturating_add(*d);
                }
                key
            })
            .sorted_unstable()
            .dedup()
            .collect();
        for key in &keys {
            if let Some(bucket) = self.cells.get(key) {
                bucket.iter().copied().for_each(&mut f);
            }
        }
    }
}
