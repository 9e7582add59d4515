//! Wormnet is a small toolkit for analysing directed connectome graphs, such as the synaptic
//! wiring of *C. elegans*, though it applies to any directed, weighted edge list.
//!
//! # Basic usage
//!
//! The library is centered around the [`DiGraph`](graph::DiGraph) structure which can be
//! constructed from one or more [`Edge`](edge::Edge) instances, or from the records of an edge
//! list read by the [`loader`]. Once constructed, various centrality measures can be computed
//! and compared against random reference graphs from [`generators`].
//!
//! ```rust
//! use wormnet::edge::{Edge, SynapseType};
//! use wormnet::graph::DiGraph;
//! use wormnet::{Direction, KatzOptions};
//!
//! // Construct the graph instance.
//! let mut graph = DiGraph::new();
//!
//! // Insert some synapses, note the IDs can be any type that is `Clone + Eq + Hash + Debug`.
//! graph.insert(Edge::with_attributes("AVAL", "AVAR", 4.0, SynapseType::Electrical));
//! graph.insert(Edge::with_attributes("AVAR", "DA01", 9.0, SynapseType::Chemical));
//! graph.insert(Edge::with_attributes("AVAL", "DA01", 12.0, SynapseType::Chemical));
//!
//! // Compute some metrics on that state of the graph.
//! let density = graph.density();
//! let degree = graph.degree_centrality();
//! let betweenness = graph.betweenness_centrality(true, 1)?;
//! let closeness = graph.closeness_centrality(Direction::Incoming, 1)?;
//! let katz = graph.katz_centrality(&KatzOptions::default())?;
//!
//! // Rankings are sorted on demand.
//! assert_eq!(degree.top(1), vec![(&"AVAL", 1.0)]);
//! assert_eq!(closeness.top(1)[0].0, &"DA01");
//! # Ok::<(), wormnet::Error>(())
//! ```
//!
//! The whole pipeline, from the CSV file to the report, is available through
//! [`analysis::run`].

pub mod analysis;
mod betweenness;
pub mod centrality;
mod closeness;
mod compute;
pub mod config;
pub mod edge;
mod error;
pub mod generators;
pub mod graph;
mod katz;
pub mod loader;
pub mod report;

pub use closeness::Direction;
pub use error::{Error, Result};
pub use katz::KatzOptions;
