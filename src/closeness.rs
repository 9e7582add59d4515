//! A module for performing the multi-threaded computation of closeness

use std::collections::VecDeque;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::{compute::accumulate, error::Result};

/// Which distances closeness is measured over in a directed graph.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Distances from every other vertex to the vertex.
    #[default]
    Incoming,
    /// Distances from the vertex to every other vertex.
    Outgoing,
}

/// Breadth-first search from `index`, crediting every reached vertex with its distance from
/// the source (stored in the first half of the buffer) and with one more reaching vertex
/// (second half).
fn closeness_for_node(index: usize, adjacency: &[Vec<usize>], buffer: &mut [f64]) {
    let num_nodes = adjacency.len();
    let (total_path_length, reached_by) = buffer.split_at_mut(num_nodes);

    let mut queue: VecDeque<usize> = VecDeque::new();
    let mut deltas: Vec<Option<u32>> = vec![None; num_nodes];

    deltas[index] = Some(0);
    queue.push_back(index);

    while let Some(current) = queue.pop_front() {
        let next = deltas[current].unwrap_or_default() + 1;

        for &j in &adjacency[current] {
            if deltas[j].is_none() {
                deltas[j] = Some(next);
                queue.push_back(j);
                total_path_length[j] += f64::from(next);
                reached_by[j] += 1.0;
            }
        }
    }
}

/// Computes the closeness of every vertex from the searches along `adjacency`.
///
/// A search along out-edges from every source yields, for each vertex, the distances *to*
/// it; a search along in-edges yields the distances *from* it. Scores use the
/// Wasserman-Faust normalisation so vertices in small components aren't overrated:
/// `(r / total) * (r / (n - 1))`, with `r` the number of vertices at a finite distance.
pub(crate) fn compute_closeness(adjacency: &[Vec<usize>], num_threads: usize) -> Result<Vec<f64>> {
    let num_nodes = adjacency.len();

    let buffer = accumulate(num_nodes, 2 * num_nodes, num_threads, |index, buffer| {
        closeness_for_node(index, adjacency, buffer)
    })?;
    let (total_path_length, reached_by) = buffer.split_at(num_nodes);

    let closeness = total_path_length
        .iter()
        .zip(reached_by)
        .map(|(&total, &reached)| {
            if total > 0.0 && num_nodes > 1 {
                (reached / total) * (reached / (num_nodes - 1) as f64)
            } else {
                0.0
            }
        })
        .collect();

    Ok(closeness)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strongly_connected_cycle() {
        // 0 -> 1 -> 2 -> 0, every vertex is at distances 1 and 2 from the others.
        let successors = vec![vec![1], vec![2], vec![0]];

        let closeness = compute_closeness(&successors, 1).unwrap();

        assert_eq!(closeness, vec![2.0 / 3.0; 3]);
    }

    #[test]
    fn unreachable_vertices_score_zero() {
        let successors = vec![vec![], vec![]];

        assert_eq!(compute_closeness(&successors, 1).unwrap(), vec![0.0, 0.0]);
    }

    #[test]
    fn small_components_are_scaled_down() {
        // 0 -> 1 in a graph of four vertices.
        let successors = vec![vec![1], vec![], vec![], vec![]];

        let closeness = compute_closeness(&successors, 2).unwrap();

        assert_eq!(closeness, vec![0.0, 1.0 / 3.0, 0.0, 0.0]);
    }
}
