//! The analysis pipeline: load, build, measure, compare.

use std::{fmt::Debug, hash::Hash, time::Instant};

use rand::{rngs::StdRng, SeedableRng};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::{
    centrality::Centrality,
    config::AnalysisConfig,
    edge::SynapseType,
    error::Result,
    generators::{gnp_random, scale_free},
    graph::{DiGraph, SynapseStats},
    loader,
};

/// A vertex and its score in a ranking.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Ranked {
    pub id: String,
    pub score: f64,
}

/// The `k` highest scores of a centrality, with the vertices rendered as strings.
fn ranking<T: ToString>(centrality: &Centrality<T>, k: usize) -> Vec<Ranked> {
    centrality
        .top(k)
        .into_iter()
        .map(|(vertex, score)| Ranked {
            id: vertex.to_string(),
            score,
        })
        .collect()
}

/// Counts and density of a graph, with its top degree centrality.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GraphSummary {
    pub nodes: usize,
    pub edges: usize,
    pub density: f64,
    /// Difference between the highest and lowest degree centrality.
    pub degree_spread: f64,
    pub top_degree: Vec<Ranked>,
}

impl GraphSummary {
    pub fn of<T>(graph: &DiGraph<T>, top: usize) -> Self
    where
        T: Clone + Eq + Hash + Debug + ToString,
    {
        let degree = graph.degree_centrality();

        Self {
            nodes: graph.node_count(),
            edges: graph.edge_count(),
            density: graph.density(),
            degree_spread: degree.spread(),
            top_degree: ranking(&degree, top),
        }
    }
}

/// An edge of the subgraph listing.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EdgeListing {
    pub source: String,
    pub target: String,
    pub weight: f64,
    pub synapse_type: Option<SynapseType>,
}

/// The subgraph induced by the first vertices of the connectome.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SubgraphSummary {
    pub nodes: Vec<String>,
    pub node_count: usize,
    pub edge_count: usize,
    pub density: f64,
    pub edges: Vec<EdgeListing>,
}

impl SubgraphSummary {
    pub fn of(graph: &DiGraph<String>, size: usize) -> Self {
        let subgraph = graph.subgraph(&graph.first_nodes(size));

        Self {
            nodes: subgraph.nodes().to_vec(),
            node_count: subgraph.node_count(),
            edge_count: subgraph.edge_count(),
            density: subgraph.density(),
            edges: subgraph
                .edges()
                .iter()
                .map(|edge| EdgeListing {
                    source: edge.source().clone(),
                    target: edge.target().clone(),
                    weight: edge.weight(),
                    synapse_type: edge.synapse_type().cloned(),
                })
                .collect(),
        }
    }
}

/// The four centrality rankings of the connectome.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Rankings {
    pub degree: Vec<Ranked>,
    pub betweenness: Vec<Ranked>,
    pub closeness: Vec<Ranked>,
    pub katz: Vec<Ranked>,
}

/// The reference graphs the connectome is compared against.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Comparison {
    pub random: GraphSummary,
    pub scale_free: GraphSummary,
}

/// Everything a run produces.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Report {
    pub config: AnalysisConfig,
    pub records: usize,
    /// Records that overwrote an earlier edge between the same pair.
    pub duplicates: usize,
    pub summary: GraphSummary,
    pub synapses: Vec<SynapseStats>,
    pub subgraph: SubgraphSummary,
    pub rankings: Rankings,
    pub comparison: Option<Comparison>,
}

/// Loads the edge list named by the configuration and analyses it.
pub fn run(config: &AnalysisConfig) -> Result<Report> {
    let records = loader::load(&config.input)?;
    let count = records.len();
    let graph = DiGraph::from_records(records);

    analyse(&graph, count, config)
}

/// Analyses an already built connectome graph, `records` being the number of rows it was
/// built from.
pub fn analyse(graph: &DiGraph<String>, records: usize, config: &AnalysisConfig) -> Result<Report> {
    info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        duplicates = graph.duplicates(),
        "built connectome graph"
    );
    if graph.node_count() == 0 {
        warn!("the edge list is empty, every ranking will be empty");
    }

    let k = config.top;

    let start = Instant::now();
    let degree = graph.degree_centrality();
    debug!(elapsed = ?start.elapsed(), "degree centrality");

    let start = Instant::now();
    let betweenness = graph.betweenness_centrality(true, config.threads)?;
    debug!(elapsed = ?start.elapsed(), "betweenness centrality");

    let start = Instant::now();
    let closeness = graph.closeness_centrality(config.closeness_direction, config.threads)?;
    debug!(elapsed = ?start.elapsed(), "closeness centrality");

    let start = Instant::now();
    let katz = graph.katz_centrality(&config.katz)?;
    debug!(elapsed = ?start.elapsed(), "katz centrality");

    let rankings = Rankings {
        degree: ranking(&degree, k),
        betweenness: ranking(&betweenness, k),
        closeness: ranking(&closeness, k),
        katz: ranking(&katz, k),
    };

    let comparison = if config.compare {
        Some(compare(graph, config)?)
    } else {
        None
    };

    Ok(Report {
        config: config.clone(),
        records,
        duplicates: graph.duplicates(),
        summary: GraphSummary::of(graph, k),
        synapses: graph.synapse_breakdown(),
        subgraph: SubgraphSummary::of(graph, config.subgraph_size),
        rankings,
        comparison,
    })
}

/// Generates the random and scale-free graphs matching the connectome's size and summarises
/// them.
pub fn compare<T>(graph: &DiGraph<T>, config: &AnalysisConfig) -> Result<Comparison>
where
    T: Clone + Eq + Hash + Debug,
{
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let n = graph.node_count();
    let random = gnp_random(n, graph.density(), &mut rng)?;
    let scale_free_graph = scale_free(n, &config.scale_free, &mut rng)?;

    info!(
        nodes = n,
        random_edges = random.edge_count(),
        scale_free_edges = scale_free_graph.edge_count(),
        "generated comparison graphs"
    );

    Ok(Comparison {
        random: GraphSummary::of(&random, config.top),
        scale_free: GraphSummary::of(&scale_free_graph, config.top),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edge::Edge;

    fn config() -> AnalysisConfig {
        AnalysisConfig {
            seed: Some(302),
            ..AnalysisConfig::default()
        }
    }

    fn triangle() -> DiGraph<String> {
        let mut graph = DiGraph::new();
        graph.insert(Edge::with_attributes(
            "A".to_owned(),
            "B".to_owned(),
            1.0,
            SynapseType::Chemical,
        ));
        graph.insert(Edge::with_attributes(
            "B".to_owned(),
            "C".to_owned(),
            2.0,
            SynapseType::Electrical,
        ));
        graph.insert(Edge::with_attributes(
            "A".to_owned(),
            "C".to_owned(),
            0.5,
            SynapseType::Chemical,
        ));

        graph
    }

    #[test]
    fn analyse_triangle() {
        let report = analyse(&triangle(), 3, &config()).unwrap();

        assert_eq!(report.summary.nodes, 3);
        assert_eq!(report.summary.edges, 3);
        assert_eq!(report.summary.density, 0.5);
        assert_eq!(report.rankings.degree.len(), 3);
        assert!(report.rankings.degree.iter().all(|r| r.score == 1.0));
        assert_eq!(report.subgraph.edge_count, 3);
        assert_eq!(report.subgraph.edges[0].synapse_type, Some(SynapseType::Chemical));
    }

    #[test]
    fn subgraph_is_truncated() {
        let summary = SubgraphSummary::of(&triangle(), 2);

        assert_eq!(summary.nodes, vec!["A".to_owned(), "B".to_owned()]);
        assert_eq!(summary.edge_count, 1);
        assert_eq!(summary.density, 0.5);
    }

    #[test]
    fn comparison_matches_node_count() {
        let comparison = compare(&triangle(), &config()).unwrap();

        assert_eq!(comparison.random.nodes, 3);
        assert_eq!(comparison.scale_free.nodes, 3);
    }

    #[test]
    fn seeded_comparison_is_reproducible() {
        assert_eq!(
            compare(&triangle(), &config()).unwrap(),
            compare(&triangle(), &config()).unwrap()
        );
    }

    #[test]
    fn comparison_can_be_skipped() {
        let config = AnalysisConfig {
            compare: false,
            ..config()
        };

        assert!(analyse(&triangle(), 3, &config).unwrap().comparison.is_none());
    }

    #[test]
    fn empty_graph() {
        let report = analyse(&DiGraph::new(), 0, &config()).unwrap();

        assert_eq!(report.summary.nodes, 0);
        assert!(report.rankings.katz.is_empty());
        assert!(report.subgraph.nodes.is_empty());

        let comparison = report.comparison.unwrap();
        assert_eq!(comparison.random.nodes, 0);
        assert_eq!(comparison.scale_free.nodes, 0);
    }
}
