//! A module for working with directed graphs.

use std::{
    collections::{BTreeMap, HashMap, HashSet},
    fmt::Debug,
    hash::Hash,
};

use nalgebra::DMatrix;
use serde::Serialize;
use tracing::debug;

use crate::{
    betweenness::compute_betweenness,
    centrality::Centrality,
    closeness::{compute_closeness, Direction},
    edge::{Edge, SynapseType},
    error::Result,
    katz::{self, KatzOptions},
    loader::Record,
};

/// Edge count and total weight of the edges sharing a synapse type.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SynapseStats {
    /// `None` groups the edges that carry no synapse type.
    pub synapse_type: Option<SynapseType>,
    pub edges: usize,
    pub total_weight: f64,
}

/// A directed graph, made up of vertices and weighted edges.
///
/// Edges are keyed by their `(source, target)` pair: inserting an edge for a pair that is
/// already present overwrites its attributes rather than adding a parallel edge.
#[derive(Clone, Debug)]
pub struct DiGraph<T> {
    /// The vertices in the order they were first seen.
    nodes: Vec<T>,
    /// A mapping of vertices to their position in `nodes`, used to build the index-based
    /// adjacency lists and matrices.
    index: HashMap<T, usize>,
    /// The edges in insertion order.
    edges: Vec<Edge<T>>,
    /// A mapping of `(source, target)` index pairs to their position in `edges`.
    edge_index: HashMap<(usize, usize), usize>,
    successors: Vec<Vec<usize>>,
    predecessors: Vec<Vec<usize>>,
    /// Number of insertions that overwrote an existing edge.
    duplicates: usize,
}

impl<T> Default for DiGraph<T>
where
    T: Clone + Eq + Hash + Debug,
{
    fn default() -> Self {
        Self::new()
    }
}

impl DiGraph<String> {
    /// Builds a graph from loaded edge list records, one edge per record.
    ///
    /// # Examples
    ///
    /// ```
    /// use wormnet::{graph::DiGraph, loader};
    ///
    /// let csv = "Source,Target,Weight,Type\nA,B,1,chemical\nB,C,2,electrical\nA,B,3,chemical\n";
    /// let records = loader::from_reader(csv.as_bytes()).unwrap();
    /// let graph = DiGraph::from_records(records);
    ///
    /// assert_eq!(graph.node_count(), 3);
    /// assert_eq!(graph.edge_count(), 2);
    /// assert_eq!(graph.duplicates(), 1);
    /// ```
    pub fn from_records(records: impl IntoIterator<Item = Record>) -> Self {
        records.into_iter().map(Record::into_edge).collect()
    }
}

impl<T> FromIterator<Edge<T>> for DiGraph<T>
where
    T: Clone + Eq + Hash + Debug,
{
    fn from_iter<I: IntoIterator<Item = Edge<T>>>(iter: I) -> Self {
        let mut graph = Self::new();
        for edge in iter {
            graph.insert(edge);
        }

        graph
    }
}

impl<T> DiGraph<T>
where
    T: Clone + Eq + Hash + Debug,
{
    /// Creates an empty graph.
    ///
    /// # Examples
    ///
    /// ```
    /// use wormnet::graph::DiGraph;
    ///
    /// let graph: DiGraph<&str> = DiGraph::new();
    /// assert_eq!(graph.node_count(), 0);
    /// ```
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            index: HashMap::new(),
            edges: Vec::new(),
            edge_index: HashMap::new(),
            successors: Vec::new(),
            predecessors: Vec::new(),
            duplicates: 0,
        }
    }

    /// Adds a vertex to the graph, returns whether it was new.
    pub fn add_node(&mut self, vertex: T) -> bool {
        if self.index.contains_key(&vertex) {
            return false;
        }

        self.node_index_or_insert(vertex);
        true
    }

    /// Inserts an edge into the graph, adding its vertices if needed.
    ///
    /// Returns `false` if an edge between the same ordered pair already existed, in which
    /// case its weight and synapse type are replaced by the new ones.
    ///
    /// # Examples
    ///
    /// ```
    /// use wormnet::edge::{Edge, SynapseType};
    /// use wormnet::graph::DiGraph;
    ///
    /// let mut graph = DiGraph::new();
    ///
    /// assert!(graph.insert(Edge::with_attributes("a", "b", 2.0, SynapseType::Chemical)));
    /// assert!(!graph.insert(Edge::with_attributes("a", "b", 6.0, SynapseType::Chemical)));
    /// assert!(graph.insert(Edge::new("b", "a")));
    ///
    /// assert_eq!(graph.get_edge(&"a", &"b").unwrap().weight(), 6.0);
    /// ```
    pub fn insert(&mut self, edge: Edge<T>) -> bool {
        let i = self.node_index_or_insert(edge.source().clone());
        let j = self.node_index_or_insert(edge.target().clone());

        if let Some(&position) = self.edge_index.get(&(i, j)) {
            debug!(source = ?edge.source(), target = ?edge.target(), "overwriting duplicate edge");
            self.edges[position].overwrite_attributes(edge);
            self.duplicates += 1;

            return false;
        }

        self.edge_index.insert((i, j), self.edges.len());
        self.edges.push(edge);
        self.successors[i].push(j);
        self.predecessors[j].push(i);

        true
    }

    /// Checks if the graph contains an edge from `source` to `target`.
    pub fn contains(&self, source: &T, target: &T) -> bool {
        self.get_edge(source, target).is_some()
    }

    /// Returns the edge from `source` to `target`, if any.
    pub fn get_edge(&self, source: &T, target: &T) -> Option<&Edge<T>> {
        let i = self.index.get(source)?;
        let j = self.index.get(target)?;

        self.edge_index
            .get(&(*i, *j))
            .map(|&position| &self.edges[position])
    }

    /// Returns the vertices in insertion order.
    pub fn nodes(&self) -> &[T] {
        &self.nodes
    }

    /// Returns the edges in insertion order.
    pub fn edges(&self) -> &[Edge<T>] {
        &self.edges
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Returns the number of insertions that overwrote an existing edge.
    pub fn duplicates(&self) -> usize {
        self.duplicates
    }

    /// Returns the vertices `vertex` has an edge to.
    pub fn successors(&self, vertex: &T) -> Vec<&T> {
        self.neighbours(vertex, &self.successors)
    }

    /// Returns the vertices that have an edge to `vertex`.
    pub fn predecessors(&self, vertex: &T) -> Vec<&T> {
        self.neighbours(vertex, &self.predecessors)
    }

    pub fn out_degree(&self, vertex: &T) -> Option<usize> {
        self.index.get(vertex).map(|&i| self.successors[i].len())
    }

    pub fn in_degree(&self, vertex: &T) -> Option<usize> {
        self.index.get(vertex).map(|&i| self.predecessors[i].len())
    }

    /// Computes the density of the graph, the ratio of edges with respect to the maximum possible
    /// directed edges `n (n - 1)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use wormnet::edge::Edge;
    /// use wormnet::graph::DiGraph;
    ///
    /// let mut graph = DiGraph::new();
    ///
    /// graph.insert(Edge::new("a", "b"));
    /// assert_eq!(graph.density(), 0.5);
    ///
    /// graph.insert(Edge::new("b", "a"));
    /// assert_eq!(graph.density(), 1.0);
    /// ```
    pub fn density(&self) -> f64 {
        let vc = self.node_count() as f64;
        let ec = self.edge_count() as f64;

        if self.node_count() <= 1 {
            return 0.0;
        }

        // Calculate the total number of possible directed edges given a vertex count.
        let pec = vc * (vc - 1.0);
        ec / pec
    }

    /// Returns the first `k` vertices in insertion order.
    pub fn first_nodes(&self, k: usize) -> Vec<T> {
        self.nodes.iter().take(k).cloned().collect()
    }

    /// Returns the subgraph induced by `vertices`: those vertices and every edge between them.
    ///
    /// Vertices unknown to the graph are ignored, the node order of this graph is preserved.
    ///
    /// # Examples
    ///
    /// ```
    /// use wormnet::edge::Edge;
    /// use wormnet::graph::DiGraph;
    ///
    /// let mut graph = DiGraph::new();
    /// graph.insert(Edge::new("a", "b"));
    /// graph.insert(Edge::new("b", "c"));
    /// graph.insert(Edge::new("c", "a"));
    ///
    /// let subgraph = graph.subgraph(&["c", "a", "z"]);
    /// assert_eq!(subgraph.nodes(), &["a", "c"]);
    /// assert_eq!(subgraph.edge_count(), 1);
    /// assert!(subgraph.contains(&"c", &"a"));
    /// ```
    pub fn subgraph(&self, vertices: &[T]) -> Self {
        let selected: HashSet<usize> = vertices
            .iter()
            .filter_map(|vertex| self.index.get(vertex).copied())
            .collect();

        let mut subgraph = Self::new();

        for (i, vertex) in self.nodes.iter().enumerate() {
            if selected.contains(&i) {
                subgraph.add_node(vertex.clone());
            }
        }

        for (i, successors) in self.successors.iter().enumerate() {
            if !selected.contains(&i) {
                continue;
            }

            for &j in successors.iter().filter(|&&j| selected.contains(&j)) {
                // Every adjacency entry has a matching edge.
                let position = self.edge_index[&(i, j)];
                subgraph.insert(self.edges[position].clone());
            }
        }

        subgraph
    }

    /// Groups the edges by synapse type, counting them and summing their weights.
    pub fn synapse_breakdown(&self) -> Vec<SynapseStats> {
        let mut groups: BTreeMap<Option<&SynapseType>, (usize, f64)> = BTreeMap::new();

        for edge in &self.edges {
            let (count, weight) = groups.entry(edge.synapse_type()).or_default();
            *count += 1;
            *weight += edge.weight();
        }

        groups
            .into_iter()
            .map(|(synapse_type, (edges, total_weight))| SynapseStats {
                synapse_type: synapse_type.cloned(),
                edges,
                total_weight,
            })
            .collect()
    }

    /// Constructs the adjacency matrix for this graph, rows are sources and columns targets.
    ///
    /// Unweighted matrices hold `1.0` for every edge, weighted ones the edge weight.
    ///
    /// # Examples
    ///
    /// ```
    /// use nalgebra::dmatrix;
    /// use wormnet::edge::Edge;
    /// use wormnet::graph::DiGraph;
    ///
    /// let mut graph = DiGraph::new();
    /// graph.insert(Edge::new("a", "b"));
    /// assert_eq!(
    ///     graph.adjacency_matrix(false),
    ///     dmatrix![0.0, 1.0;
    ///              0.0, 0.0]
    /// );
    /// ```
    pub fn adjacency_matrix(&self, weighted: bool) -> DMatrix<f64> {
        let n = self.node_count();
        let mut matrix = DMatrix::<f64>::zeros(n, n);

        for (&(i, j), &position) in &self.edge_index {
            matrix[(i, j)] = if weighted {
                self.edges[position].weight()
            } else {
                1.0
            };
        }

        matrix
    }

    /// Returns a mapping of vertices to their degree centrality, the sum of their in and out
    /// degree normalised by the maximum possible degree `n - 1`.
    ///
    /// A self-loop counts once in each direction. In a graph with a single vertex, that vertex
    /// scores `1.0`.
    ///
    /// # Examples
    ///
    /// ```
    /// use wormnet::edge::Edge;
    /// use wormnet::graph::DiGraph;
    ///
    /// let mut graph = DiGraph::new();
    /// graph.insert(Edge::new("a", "b"));
    /// graph.insert(Edge::new("b", "c"));
    /// graph.insert(Edge::new("a", "c"));
    ///
    /// let degree = graph.degree_centrality();
    /// assert!(degree.iter().all(|(_, score)| score == 1.0));
    /// ```
    pub fn degree_centrality(&self) -> Centrality<T> {
        let n = self.node_count();

        if n <= 1 {
            return self.scores(vec![1.0; n]);
        }

        let scale = 1.0 / (n - 1) as f64;
        let scores = (0..n)
            .map(|i| (self.successors[i].len() + self.predecessors[i].len()) as f64 * scale)
            .collect();

        self.scores(scores)
    }

    /// Returns the difference between the highest and lowest degree centrality in the graph.
    ///
    /// # Examples
    ///
    /// ```
    /// use wormnet::edge::Edge;
    /// use wormnet::graph::DiGraph;
    ///
    /// let mut graph = DiGraph::new();
    /// graph.insert(Edge::new("a", "b"));
    /// graph.insert(Edge::new("a", "c"));
    ///
    /// assert_eq!(graph.degree_centrality_delta(), 0.5);
    /// ```
    pub fn degree_centrality_delta(&self) -> f64 {
        self.degree_centrality().spread()
    }

    /// Returns a mapping of vertices to the fraction of shortest paths between other pairs of
    /// vertices that pass through them.
    ///
    /// Edge weights are ignored. When `normalized`, scores are divided by `(n - 1)(n - 2)`, the
    /// number of ordered pairs excluding the vertex (graphs with two or fewer vertices are left
    /// unscaled). The per-source searches are spread over `threads` workers.
    pub fn betweenness_centrality(
        &self,
        normalized: bool,
        threads: usize,
    ) -> Result<Centrality<T>> {
        let scores = compute_betweenness(&self.successors, threads, normalized)?;

        Ok(self.scores(scores))
    }

    /// Returns a mapping of vertices to their closeness centrality, the inverse of the average
    /// distance between the vertex and the vertices it is connected to, scaled by the fraction of
    /// the graph it is connected to.
    ///
    /// `Direction::Incoming` measures the distances from other vertices to the vertex,
    /// `Direction::Outgoing` the distances from the vertex to the others.
    pub fn closeness_centrality(
        &self,
        direction: Direction,
        threads: usize,
    ) -> Result<Centrality<T>> {
        // Searching along incoming edges from every source accumulates the outgoing distances of
        // the reached vertices, and vice versa.
        let adjacency = match direction {
            Direction::Incoming => &self.successors,
            Direction::Outgoing => &self.predecessors,
        };

        let scores = compute_closeness(adjacency, threads)?;

        Ok(self.scores(scores))
    }

    /// Returns a mapping of vertices to their Katz centrality, solving the linear system over
    /// the adjacency matrix directly.
    ///
    /// # Examples
    ///
    /// ```
    /// use wormnet::edge::Edge;
    /// use wormnet::graph::DiGraph;
    /// use wormnet::KatzOptions;
    ///
    /// let mut graph = DiGraph::new();
    /// graph.insert(Edge::new("a", "b"));
    /// graph.insert(Edge::new("b", "c"));
    /// graph.insert(Edge::new("c", "a"));
    ///
    /// let katz = graph.katz_centrality(&KatzOptions::default()).unwrap();
    /// let expected = 1.0 / 3.0f64.sqrt();
    /// assert!(katz.iter().all(|(_, score)| (score - expected).abs() < 1e-12));
    /// ```
    pub fn katz_centrality(&self, options: &KatzOptions) -> Result<Centrality<T>> {
        let adjacency = self.adjacency_matrix(options.weighted);
        let scores = katz::solve(adjacency, options)?;

        Ok(self.scores(scores))
    }

    /// Returns a mapping of vertices to their Katz centrality, computed by power iteration.
    ///
    /// Fails with [`Error::NotConverged`](crate::Error::NotConverged) if the summed change
    /// between two iterations doesn't drop below `n * tolerance` within `max_iterations`.
    pub fn katz_centrality_iterative(
        &self,
        options: &KatzOptions,
        max_iterations: usize,
        tolerance: f64,
    ) -> Result<Centrality<T>> {
        let edges: Vec<(usize, usize, f64)> = self
            .successors
            .iter()
            .enumerate()
            .flat_map(|(i, successors)| successors.iter().map(move |&j| (i, j)))
            .map(|(i, j)| {
                let weight = if options.weighted {
                    // Every adjacency entry has a matching edge.
                    self.edges[self.edge_index[&(i, j)]].weight()
                } else {
                    1.0
                };

                (i, j, weight)
            })
            .collect();

        let scores = katz::iterate(
            self.node_count(),
            &edges,
            options,
            max_iterations,
            tolerance,
        )?;

        Ok(self.scores(scores))
    }

    //
    // Private
    //

    fn node_index_or_insert(&mut self, vertex: T) -> usize {
        if let Some(&i) = self.index.get(&vertex) {
            return i;
        }

        let i = self.nodes.len();
        self.index.insert(vertex.clone(), i);
        self.nodes.push(vertex);
        self.successors.push(Vec::new());
        self.predecessors.push(Vec::new());

        i
    }

    fn neighbours<'a>(&'a self, vertex: &T, adjacency: &'a [Vec<usize>]) -> Vec<&'a T> {
        self.index
            .get(vertex)
            .map(|&i| adjacency[i].iter().map(|&j| &self.nodes[j]).collect())
            .unwrap_or_default()
    }

    /// Pairs index-ordered scores with their vertices.
    fn scores(&self, scores: Vec<f64>) -> Centrality<T> {
        debug_assert_eq!(scores.len(), self.nodes.len());

        Centrality::from_scores(self.nodes.iter().cloned().zip(scores).collect())
    }
}
