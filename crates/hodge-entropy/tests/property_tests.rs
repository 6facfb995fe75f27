//! Property tests over random molecular graphs

use std::collections::HashSet;

use approx::relative_eq;
use hodge_entropy::prelude::*;
use hodge_entropy::utils::{asymmetry, max_abs, MATRIX_TOL};
use proptest::prelude::*;

/// Simple graph on `n` vertices from arbitrary vertex pairs
fn simple_edges(n: usize, pairs: &[(usize, usize)]) -> Vec<(usize, usize)> {
    let mut seen = HashSet::new();
    pairs
        .iter()
        .map(|&(u, v)| (u % n, v % n))
        .filter(|&(u, v)| u != v && seen.insert((u.min(v), u.max(v))))
        .collect()
}

fn graph_strategy() -> impl Strategy<Value = (usize, Vec<(usize, usize)>)> {
    (1usize..9, proptest::collection::vec((0usize..9, 0usize..9), 0..24))
        .prop_map(|(n, pairs)| (n, simple_edges(n, &pairs)))
}

fn graph_with_permutation() -> impl Strategy<Value = (usize, Vec<(usize, usize)>, Vec<usize>)> {
    graph_strategy().prop_flat_map(|(n, edges)| {
        let perm = Just((0..n).collect::<Vec<usize>>()).prop_shuffle();
        (Just(n), Just(edges), perm)
    })
}

fn pipeline() -> SignaturePipeline {
    SignaturePipeline::new(PipelineConfig::default().with_times(vec![0.0, 0.3, 1.0, 4.0])).unwrap()
}

proptest! {
    #[test]
    fn prop_boundary_of_boundary_is_zero((n, edges) in graph_strategy()) {
        let c = CliqueComplex::from_edges(n, &edges, 3).unwrap();
        let ops = BoundaryOperator::build_range(&c, (0, 3)).unwrap();
        for pair in ops.windows(2) {
            prop_assert!(BoundaryOperator::compose_is_zero(&pair[0], &pair[1], MATRIX_TOL));
        }
    }

    #[test]
    fn prop_laplacians_symmetric_psd((n, edges) in graph_strategy(), upper in any::<bool>()) {
        let c = CliqueComplex::from_edges(n, &edges, 3).unwrap();
        for l in HodgeLaplacian::build_range(&c, (0, 2), upper).unwrap() {
            prop_assert!(asymmetry(&l.matrix) <= MATRIX_TOL);
            if l.is_empty() {
                continue;
            }
            let raw = l.matrix.clone().symmetric_eigenvalues();
            prop_assert!(raw.iter().all(|&x| x >= -1e-9));
            let spectrum = LaplacianSpectrum::decompose(&l.matrix, 1e-8);
            prop_assert!(!spectrum.unstable);
        }
    }

    #[test]
    fn prop_node_heat_conserved((n, edges) in graph_strategy(), tau in 0.0f64..20.0) {
        let c = CliqueComplex::from_edges(n, &edges, 1).unwrap();
        let l0 = &HodgeLaplacian::build_range(&c, (0, 0), true).unwrap()[0];
        let snap = &HeatDiffusion::default().transform(l0, &[tau]).unwrap()[0];
        for i in 0..n {
            prop_assert!((snap.row_sum(i) - 1.0).abs() < 1e-9);
        }
        prop_assert!(asymmetry(&snap.operator) <= 1e-9);
    }

    #[test]
    fn prop_zero_time_entropy_vanishes((n, edges) in graph_strategy()) {
        let sig = pipeline().compute(&AttributedGraph::from_edges(n, &edges)).unwrap();
        prop_assert!(max_abs(&sig.node.values.rows(0, 1).into_owned()) < 1e-9);
        if !edges.is_empty() {
            prop_assert!(max_abs(&sig.edge.values.rows(0, 1).into_owned()) < 1e-9);
        }
    }

    #[test]
    fn prop_node_entropy_invariant_under_relabelling((n, edges, perm) in graph_with_permutation()) {
        let p = pipeline();
        let original = p.compute(&AttributedGraph::from_edges(n, &edges)).unwrap();

        let relabelled: Vec<(usize, usize)> = edges.iter().map(|&(u, v)| (perm[u], perm[v])).collect();
        let moved = p.compute(&AttributedGraph::from_edges(n, &relabelled)).unwrap();

        for v in 0..n {
            for t in 0..original.node.n_times() {
                prop_assert!(relative_eq!(
                    original.node.at(t, v),
                    moved.node.at(t, perm[v]),
                    epsilon = 1e-8
                ));
            }
        }
    }

    #[test]
    fn prop_edge_entropy_follows_bond_order((n, edges) in graph_strategy(), seed in any::<u64>()) {
        prop_assume!(edges.len() > 1);
        let p = pipeline();
        let original = p.compute(&AttributedGraph::from_edges(n, &edges)).unwrap();

        // Rotate the bond list; endpoints and orientations stay the same
        let shift = (seed as usize) % edges.len();
        let mut rotated = edges.clone();
        rotated.rotate_left(shift);
        let moved = p.compute(&AttributedGraph::from_edges(n, &rotated)).unwrap();

        for j in 0..edges.len() {
            let k = (j + edges.len() - shift) % edges.len();
            for t in 0..original.edge.n_times() {
                prop_assert!(relative_eq!(original.edge.at(t, j), moved.edge.at(t, k), epsilon = 1e-8));
            }
        }
    }

    #[test]
    fn prop_batch_ranges_partition_totals(graphs in proptest::collection::vec(graph_strategy(), 1..6)) {
        let molecules: Vec<AttributedGraph> = graphs
            .iter()
            .map(|(n, edges)| AttributedGraph::from_edges(*n, edges))
            .collect();
        let acc = BatchDriver::new(pipeline(), BatchConfig::default()).run(&molecules).unwrap();

        let (mut node, mut edge) = (0, 0);
        for (r, g) in acc.records.iter().zip(&molecules) {
            prop_assert_eq!(r.node_range, IndexRange::with_len(node, g.atom_count()));
            prop_assert_eq!(r.edge_range, IndexRange::with_len(edge, g.bond_count()));
            node = r.node_range.end;
            edge = r.edge_range.end;
        }
        prop_assert_eq!(acc.node_total(), node);
        prop_assert_eq!(acc.edge_total(), edge);
    }
}
