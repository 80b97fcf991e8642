mod util;

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use proptest::prelude::*;
use pulse_graph::prelude::*;
use util::{euclid, random_cloud};

fn seed_of(parts: &[u64]) -> u64 {
    let mut h = DefaultHasher::new();
    parts.hash(&mut h);
    h.finish()
}

fn same_batch(ps: &PointSet, g: &Graph<'_>) -> bool {
    g.edge_index()
        .iter()
        .all(|(s, t)| ps.batch_of(s) == ps.batch_of(t))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn prop_knn_degree_and_batches(
        n in 1usize..80,
        n_batches in 1i64..5,
        k in 1usize..10,
        salt in any::<u64>(),
    ) {
        let ps = random_cloud(seed_of(&[n as u64, n_batches as u64, k as u64, salt]), n, n_batches, 5.0);
        let g = build_knn_graph(&ps, k, [0, 1, 2]).unwrap();
        prop_assert!(same_batch(&ps, &g));
        let adj = g.to_adjacency(NeighborDirection::Incoming);
        for i in 0..n {
            let peers = ps.batch().iter().filter(|&&b| Some(b) == ps.batch_of(i)).count();
            prop_assert_eq!(adj.degree(i), k.min(peers - 1));
            prop_assert!(!adj.neighbors(i).contains(&i));
        }
    }

    #[test]
    fn prop_knn_picks_closest(
        n in 2usize..60,
        k in 1usize..6,
        salt in any::<u64>(),
    ) {
        let ps = random_cloud(seed_of(&[n as u64, k as u64, salt]), n, 1, 5.0);
        let cols = [0, 1, 2];
        let g = build_knn_graph(&ps, k, cols).unwrap();
        let adj = g.to_adjacency(NeighborDirection::Incoming);
        for i in 0..n {
            let picked = adj.neighbors(i);
            let worst = picked
                .iter()
                .map(|&j| euclid(&ps, &cols, i, j))
                .fold(0.0f64, f64::max);
            // nothing left out is strictly closer than the farthest pick
            for j in (0..n).filter(|&j| j != i && !picked.contains(&j)) {
                prop_assert!(euclid(&ps, &cols, i, j) >= worst - 1e-12);
            }
        }
    }

    #[test]
    fn prop_radius_sound_complete_symmetric(
        n in 1usize..90,
        n_batches in 1i64..4,
        radius in 0.2f64..2.5,
        salt in any::<u64>(),
    ) {
        let ps = random_cloud(seed_of(&[n as u64, n_batches as u64, radius.to_bits(), salt]), n, n_batches, 4.0);
        let cols = [0, 1, 2];
        let g = build_radial_graph(&ps, radius, cols).unwrap();
        prop_assert!(same_batch(&ps, &g));
        let got = g.edge_set();
        let mut want = Vec::new();
        for i in 0..n {
            for j in 0..n {
                if i != j && ps.batch_of(i) == ps.batch_of(j) && euclid(&ps, &cols, i, j) <= radius {
                    want.push((i, j));
                }
            }
        }
        prop_assert_eq!(&got, &want);
        for &(s, t) in &got {
            prop_assert!(got.binary_search(&(t, s)).is_ok());
        }
    }

    #[test]
    fn prop_grid_equals_brute_force(
        n in 1usize..200,
        radius in 0.1f64..1.5,
        salt in any::<u64>(),
    ) {
        let ps = random_cloud(seed_of(&[n as u64, radius.to_bits(), salt]), n, 2, 4.0);
        let run = |search| {
            let cfg = RadialGraphConfig { search, ..RadialGraphConfig::new(radius, [0, 1, 2]) };
            let b = RadialGraphBuilder::try_new(cfg).unwrap();
            let pairs: Vec<(usize, usize)> = b.build(&ps).unwrap().graph.edge_index().iter().collect();
            pairs
        };
        prop_assert_eq!(run(RadiusSearch::Grid), run(RadiusSearch::BruteForce));
    }

    #[test]
    fn prop_affinity_weights_are_row_stochastic(
        n in 1usize..40,
        n_batches in 1i64..4,
        sigma in 0.05f64..5.0,
        salt in any::<u64>(),
    ) {
        let ps = random_cloud(seed_of(&[n as u64, n_batches as u64, sigma.to_bits(), salt]), n, n_batches, 3.0);
        let g = build_affinity_graph(&ps, sigma, 0.0, [0, 1, 2]).unwrap();
        prop_assert!(same_batch(&ps, &g));
        let w = g.weights().unwrap();
        prop_assert!(w.iter().all(|&x| x > 0.0 && x <= 1.0));
        let adj = g.to_adjacency(NeighborDirection::Outgoing);
        for i in 0..n {
            let total: f64 = adj.neighbor_weights(i).unwrap().iter().sum();
            prop_assert!((total - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn prop_builds_are_deterministic(
        n in 1usize..60,
        salt in any::<u64>(),
    ) {
        let ps = random_cloud(seed_of(&[n as u64, salt]), n, 3, 4.0);
        let builders: Vec<GraphBuilderKind> = vec![
            KnnGraphBuilder::new(4, [0, 1, 2]).unwrap().into(),
            RadialGraphBuilder::try_new(RadialGraphConfig::new(1.0, [0, 1])).unwrap().into(),
            AffinityGraphBuilder::try_new(AffinityGraphConfig::new(1.0, 0.05, [2])).unwrap().into(),
        ];
        for b in &builders {
            let first = b.build(&ps).unwrap();
            let second = b.build(&ps).unwrap();
            prop_assert_eq!(first.graph.edge_index(), second.graph.edge_index());
            prop_assert_eq!(first.graph.weights(), second.graph.weights());
        }
    }
}
