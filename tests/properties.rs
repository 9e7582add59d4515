//! Invariants that hold for any edge list.

use std::collections::HashSet;

use proptest::prelude::*;
use rand::{rngs::StdRng, SeedableRng};
use wormnet::{
    edge::{Edge, SynapseType},
    generators::{gnp_random, scale_free, ScaleFreeOptions},
    graph::DiGraph,
    loader::Record,
    Direction,
};

/// Edge lists over a small vertex alphabet, so duplicates and cycles show up often.
fn records() -> impl Strategy<Value = Vec<Record>> {
    prop::collection::vec(
        (0u8..12, 0u8..12, 0.0f64..20.0, prop::bool::ANY),
        0..60,
    )
    .prop_map(|rows| {
        rows.into_iter()
            .map(|(source, target, weight, chemical)| Record {
                source: format!("N{source}"),
                target: format!("N{target}"),
                weight,
                synapse_type: if chemical {
                    SynapseType::Chemical
                } else {
                    SynapseType::Electrical
                },
            })
            .collect()
    })
}

fn in_unit_interval(value: f64) -> bool {
    (0.0..=1.0 + 1e-12).contains(&value)
}

proptest! {
    #[test]
    fn counts_match_the_records(records in records()) {
        let ids: HashSet<&String> = records
            .iter()
            .flat_map(|record| [&record.source, &record.target])
            .collect();
        let pairs: HashSet<(&String, &String)> = records
            .iter()
            .map(|record| (&record.source, &record.target))
            .collect();

        let graph = DiGraph::from_records(records.clone());

        prop_assert!(graph.edge_count() <= records.len());
        prop_assert_eq!(graph.edge_count(), pairs.len());
        prop_assert_eq!(graph.node_count(), ids.len());
        prop_assert_eq!(graph.edge_count() + graph.duplicates(), records.len());
    }

    #[test]
    fn closeness_and_betweenness_are_fractions(records in records()) {
        let graph = DiGraph::from_records(records);

        for (_, score) in graph.betweenness_centrality(true, 1).unwrap().iter() {
            prop_assert!(in_unit_interval(score), "betweenness {}", score);
        }
        for direction in [Direction::Incoming, Direction::Outgoing] {
            for (_, score) in graph.closeness_centrality(direction, 1).unwrap().iter() {
                prop_assert!(in_unit_interval(score), "closeness {}", score);
            }
        }
    }

    #[test]
    fn degree_centrality_is_bounded(records in records()) {
        let graph = DiGraph::from_records(records);
        let n = graph.node_count() as f64;

        for (vertex, score) in graph.degree_centrality().iter() {
            // A vertex linked both ways to every other vertex scores 2, a self-loop adds one
            // more edge in each direction.
            let bound = if n <= 1.0 {
                1.0
            } else if graph.contains(vertex, vertex) {
                2.0 * n / (n - 1.0)
            } else {
                2.0
            };

            prop_assert!(score >= 0.0);
            prop_assert!(score <= bound + 1e-12, "degree {}", score);
        }
    }

    #[test]
    fn degree_centrality_is_a_fraction_without_reciprocal_edges(
        pairs in prop::collection::vec((0usize..15, 0usize..15), 0..80)
    ) {
        // Only keep edges pointing "forward" so no pair is connected both ways.
        let graph: DiGraph<usize> = pairs
            .into_iter()
            .filter(|(source, target)| source < target)
            .map(|(source, target)| Edge::new(source, target))
            .collect();

        for (_, score) in graph.degree_centrality().iter() {
            prop_assert!(in_unit_interval(score), "degree {}", score);
        }
    }

    #[test]
    fn generated_graphs_have_the_requested_size(n in 0usize..200, p in 0.0f64..=0.2, seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);

        prop_assert_eq!(gnp_random(n, p, &mut rng).unwrap().node_count(), n);
        prop_assert_eq!(
            scale_free(n, &ScaleFreeOptions::default(), &mut rng).unwrap().node_count(),
            n
        );
    }
}
