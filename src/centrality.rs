//! Centrality scores and their ranking.

use std::{collections::HashMap, hash::Hash};

use itertools::Itertools;
use serde::Serialize;

/// A mapping of vertices to a centrality score, kept in the graph's node order.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Centrality<T> {
    scores: Vec<(T, f64)>,
}

impl<T> Centrality<T> {
    pub(crate) fn from_scores(scores: Vec<(T, f64)>) -> Self {
        Self { scores }
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Iterates over the scores in node order.
    pub fn iter(&self) -> impl Iterator<Item = (&T, f64)> {
        self.scores.iter().map(|(vertex, score)| (vertex, *score))
    }

    /// Returns the score of a vertex, if present.
    pub fn get(&self, vertex: &T) -> Option<f64>
    where
        T: PartialEq,
    {
        self.scores
            .iter()
            .find(|(v, _)| v == vertex)
            .map(|(_, score)| *score)
    }

    /// Returns the `k` highest scoring vertices in descending order.
    ///
    /// The sort is stable: vertices with equal scores keep their node order.
    ///
    /// # Examples
    ///
    /// ```
    /// use wormnet::{edge::Edge, graph::DiGraph};
    ///
    /// let mut graph = DiGraph::new();
    /// graph.insert(Edge::new("a", "b"));
    /// graph.insert(Edge::new("c", "b"));
    ///
    /// let degree = graph.degree_centrality();
    /// assert_eq!(degree.top(2), vec![(&"b", 1.0), (&"a", 0.5)]);
    /// ```
    pub fn top(&self, k: usize) -> Vec<(&T, f64)> {
        self.iter()
            .sorted_by(|(_, a), (_, b)| b.total_cmp(a))
            .take(k)
            .collect()
    }

    /// Returns the difference between the highest and lowest score, `0.0` when empty.
    pub fn spread(&self) -> f64 {
        match self.iter().map(|(_, score)| score).minmax() {
            itertools::MinMaxResult::NoElements => 0.0,
            itertools::MinMaxResult::OneElement(_) => 0.0,
            itertools::MinMaxResult::MinMax(min, max) => max - min,
        }
    }

    /// Converts the scores into a hash map, dropping the node order.
    pub fn into_map(self) -> HashMap<T, f64>
    where
        T: Eq + Hash,
    {
        self.scores.into_iter().collect()
    }
}

impl<T> IntoIterator for Centrality<T> {
    type Item = (T, f64);
    type IntoIter = std::vec::IntoIter<(T, f64)>;

    fn into_iter(self) -> Self::IntoIter {
        self.scores.into_iter()
    }
}
