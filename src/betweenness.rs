//! A module for performing the multi-threaded computation of betweenness

use std::collections::VecDeque;

use crate::{compute::accumulate, error::Result};

/// this is an implementation of Ulrik Brandes's
/// A Faster Algorithm for Betweenness Centrality
/// http://snap.stanford.edu/class/cs224w-readings/brandes01centrality.pdf
/// page 10, "Algorithm 1: Betweenness centrality in unweighted graphs"
///
/// `successors` holds the out-neighbours of every vertex, so only directed paths are counted.
fn betweenness_for_node(index: usize, successors: &[Vec<usize>], betweenness_count: &mut [f64]) {
    let num_nodes = successors.len();

    let mut sigma: Vec<f64> = vec![0.0; num_nodes];
    let mut distance: Vec<Option<usize>> = vec![None; num_nodes];
    let mut predecessors: Vec<Vec<usize>> = vec![Vec::new(); num_nodes];
    let mut delta: Vec<f64> = vec![0.0; num_nodes];
    let mut queue: VecDeque<usize> = VecDeque::new();
    let mut stack: Vec<usize> = Vec::new();

    sigma[index] = 1.0;
    distance[index] = Some(0);
    queue.push_back(index);

    while let Some(v) = queue.pop_front() {
        stack.push(v);
        let next = distance[v].map(|d| d + 1);

        for &w in &successors[v] {
            if distance[w].is_none() {
                distance[w] = next;
                queue.push_back(w);
            }
            if distance[w] == next {
                sigma[w] += sigma[v];
                predecessors[w].push(v);
            }
        }
    }

    // Accumulate the dependencies in order of non-increasing distance from the source.
    while let Some(w) = stack.pop() {
        for &v in &predecessors[w] {
            delta[v] += sigma[v] / sigma[w] * (1.0 + delta[w]);
        }
        if w != index {
            betweenness_count[w] += delta[w];
        }
    }
}

/// Computes the betweenness of every vertex, spreading the single-source searches over
/// `num_threads` workers.
///
/// Normalised scores are divided by `(n - 1)(n - 2)`, the number of ordered pairs of other
/// vertices; graphs with two vertices or fewer are left unscaled.
pub(crate) fn compute_betweenness(
    successors: &[Vec<usize>],
    num_threads: usize,
    normalize: bool,
) -> Result<Vec<f64>> {
    let num_nodes = successors.len();

    let mut betweenness_count = accumulate(num_nodes, num_nodes, num_threads, |index, buffer| {
        betweenness_for_node(index, successors, buffer)
    })?;

    if normalize && num_nodes > 2 {
        let divisor = ((num_nodes - 1) * (num_nodes - 2)) as f64;
        for value in betweenness_count.iter_mut() {
            *value /= divisor;
        }
    }

    Ok(betweenness_count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn star_centre_carries_every_path() {
        // 1 -> 0 -> {2, 3}
        let successors = vec![vec![2, 3], vec![0], vec![], vec![]];

        let betweenness = compute_betweenness(&successors, 1, false).unwrap();

        assert_eq!(betweenness, vec![2.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn disconnected_components() {
        let successors = vec![vec![1], vec![2], vec![], vec![4], vec![]];

        let betweenness = compute_betweenness(&successors, 2, false).unwrap();

        assert_eq!(betweenness, vec![0.0, 1.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn self_loops_are_ignored() {
        let successors = vec![vec![0, 1], vec![1, 2], vec![]];

        let betweenness = compute_betweenness(&successors, 1, true).unwrap();

        assert_eq!(betweenness, vec![0.0, 0.5, 0.0]);
    }
}
