#![allow(dead_code)]
use pulse_graph::data::point_set::PointSet;
use pulse_graph::graph::Graph;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Two events: a right-angle triangle and a unit-length pair.
pub fn two_events() -> PointSet {
    PointSet::from_rows(
        &[
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [5.0, 5.0, 5.0],
            [5.0, 5.0, 6.0],
        ],
        vec![0, 0, 0, 1, 1],
    )
    .unwrap()
}

/// Points on the x axis, all in one batch.
pub fn line(xs: &[f64]) -> PointSet {
    let rows: Vec<[f64; 1]> = xs.iter().map(|&x| [x]).collect();
    PointSet::from_rows(&rows, vec![0; xs.len()]).unwrap()
}

/// `n` points in the cube `[0, extent)^3` spread over `n_batches`
/// interleaved batches (batch ids are not contiguous).
pub fn random_cloud(seed: u64, n: usize, n_batches: i64, extent: f64) -> PointSet {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut features = Vec::with_capacity(n * 4);
    let mut batch = Vec::with_capacity(n);
    for _ in 0..n {
        for _ in 0..3 {
            features.push(rng.gen_range(0.0..extent));
        }
        // a fourth, unused column
        features.push(rng.gen_range(-1.0..1.0));
        batch.push(rng.gen_range(0..n_batches) * 3 - 2);
    }
    PointSet::try_new(features, 4, batch).unwrap()
}

pub fn euclid(ps: &PointSet, cols: &[usize], i: usize, j: usize) -> f64 {
    let (a, b) = (ps.row(i), ps.row(j));
    cols.iter()
        .map(|&c| {
            let d = a[c] - b[c];
            d * d
        })
        .sum::<f64>()
        .sqrt()
}

/// Compare a graph's edges with an expected pair list, ignoring order.
pub fn assert_same_edges(g: &Graph<'_>, want: &[(usize, usize)]) {
    let mut want = want.to_vec();
    want.sort_unstable();
    assert_eq!(g.edge_set(), want, "edge lists differ");
}

pub fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}
