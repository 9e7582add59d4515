//! Random reference graphs to compare a connectome against.

use rand::{seq::SliceRandom, Rng};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    edge::Edge,
    error::{Error, Result},
    graph::DiGraph,
};

/// Generates a directed Erdős-Rényi `G(n, p)` graph: each of the `n (n - 1)` ordered pairs of
/// distinct vertices is joined with probability `p`.
///
/// The vertices `0..n` are always present, even when isolated.
///
/// # Examples
///
/// ```
/// use rand::{rngs::StdRng, SeedableRng};
/// use wormnet::generators::gnp_random;
///
/// let mut rng = StdRng::seed_from_u64(7);
/// let graph = gnp_random(10, 1.0, &mut rng).unwrap();
///
/// assert_eq!(graph.node_count(), 10);
/// assert_eq!(graph.edge_count(), 90);
/// ```
pub fn gnp_random<R: Rng + ?Sized>(n: usize, p: f64, rng: &mut R) -> Result<DiGraph<usize>> {
    if !(0.0..=1.0).contains(&p) {
        return Err(Error::invalid("p", format!("{p} is not a probability")));
    }

    let mut graph = DiGraph::new();
    for vertex in 0..n {
        graph.add_node(vertex);
    }

    for source in 0..n {
        for target in (0..n).filter(|&target| target != source) {
            if rng.gen::<f64>() < p {
                graph.insert(Edge::new(source, target));
            }
        }
    }

    debug!(n, p, edges = graph.edge_count(), "generated random graph");

    Ok(graph)
}

/// Parameters of the directed scale-free model.
///
/// At each step, with probability `alpha` a new vertex gets an edge to an existing vertex
/// chosen by in-degree, with probability `beta` an edge is added between two existing vertices
/// (source by out-degree, target by in-degree) and with probability `gamma` an existing vertex
/// chosen by out-degree gets an edge to a new vertex. `delta_in` and `delta_out` bias the
/// choices towards vertices with few edges.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScaleFreeOptions {
    pub alpha: f64,
    pub beta: f64,
    pub gamma: f64,
    pub delta_in: f64,
    pub delta_out: f64,
}

impl Default for ScaleFreeOptions {
    fn default() -> Self {
        Self {
            alpha: 0.41,
            beta: 0.54,
            gamma: 0.05,
            delta_in: 0.2,
            delta_out: 0.0,
        }
    }
}

impl ScaleFreeOptions {
    fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("alpha", self.alpha),
            ("beta", self.beta),
            ("gamma", self.gamma),
        ] {
            if value <= 0.0 {
                return Err(Error::invalid(name, "must be positive"));
            }
        }

        for (name, value) in [("delta_in", self.delta_in), ("delta_out", self.delta_out)] {
            if value < 0.0 {
                return Err(Error::invalid(name, "must be non-negative"));
            }
        }

        let sum = self.alpha + self.beta + self.gamma;
        if (sum - 1.0).abs() >= 1e-9 {
            return Err(Error::invalid("alpha", "alpha + beta + gamma must equal 1"));
        }

        Ok(())
    }
}

/// Generates a directed scale-free graph with exactly `n` vertices, following the preferential
/// attachment model of Bollobás, Borgs, Chayes and Riordan (2003).
///
/// The process starts from the cycle `0 -> 1 -> 2 -> 0` (truncated when `n < 3`) and merges
/// repeated edges between the same pair into one.
///
/// # Examples
///
/// ```
/// use rand::{rngs::StdRng, SeedableRng};
/// use wormnet::generators::{scale_free, ScaleFreeOptions};
///
/// let mut rng = StdRng::seed_from_u64(7);
/// let graph = scale_free(100, &ScaleFreeOptions::default(), &mut rng).unwrap();
///
/// assert_eq!(graph.node_count(), 100);
/// ```
pub fn scale_free<R: Rng + ?Sized>(
    n: usize,
    options: &ScaleFreeOptions,
    rng: &mut R,
) -> Result<DiGraph<usize>> {
    options.validate()?;

    let mut graph = DiGraph::new();
    // Each vertex appears once per edge it starts (out_ends) or ends (in_ends), repeats
    // included, so a uniform pick from these lists is a pick proportional to degree.
    let mut out_ends: Vec<usize> = Vec::new();
    let mut in_ends: Vec<usize> = Vec::new();
    let mut node_list: Vec<usize> = Vec::new();

    let seed_size = n.min(3);
    for vertex in 0..seed_size {
        graph.add_node(vertex);
        node_list.push(vertex);
    }
    for (source, target) in [(0, 1), (1, 2), (2, 0)] {
        if source < seed_size && target < seed_size {
            graph.insert(Edge::new(source, target));
            out_ends.push(source);
            in_ends.push(target);
        }
    }

    let mut cursor = seed_size;

    while graph.node_count() < n {
        let r: f64 = rng.gen();

        let (source, target) = if r < options.alpha {
            let source = cursor;
            cursor += 1;
            node_list.push(source);
            let target = choose_node(&in_ends, &node_list, options.delta_in, rng);

            (source, target)
        } else if r < options.alpha + options.beta {
            let source = choose_node(&out_ends, &node_list, options.delta_out, rng);
            let target = choose_node(&in_ends, &node_list, options.delta_in, rng);

            (source, target)
        } else {
            let source = choose_node(&out_ends, &node_list, options.delta_out, rng);
            let target = cursor;
            cursor += 1;
            node_list.push(target);

            (source, target)
        };

        graph.insert(Edge::new(source, target));
        out_ends.push(source);
        in_ends.push(target);
    }

    debug!(n, edges = graph.edge_count(), "generated scale-free graph");

    Ok(graph)
}

/// Picks a vertex from `candidates` (proportionally to degree), or uniformly from `node_list`
/// with a probability growing with `delta`.
fn choose_node<R: Rng + ?Sized>(
    candidates: &[usize],
    node_list: &[usize],
    delta: f64,
    rng: &mut R,
) -> usize {
    if delta > 0.0 {
        let bias_sum = node_list.len() as f64 * delta;
        let p_delta = bias_sum / (bias_sum + candidates.len() as f64);

        if rng.gen::<f64>() < p_delta {
            if let Some(&vertex) = node_list.choose(rng) {
                return vertex;
            }
        }
    }

    // Falls back to a uniform pick while no edge exists yet (only possible when n < 3).
    candidates
        .choose(rng)
        .or_else(|| node_list.choose(rng))
        .copied()
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(210)
    }

    #[test]
    fn gnp_extremes() {
        let empty = gnp_random(5, 0.0, &mut rng()).unwrap();
        assert_eq!(empty.node_count(), 5);
        assert_eq!(empty.edge_count(), 0);

        let complete = gnp_random(5, 1.0, &mut rng()).unwrap();
        assert_eq!(complete.edge_count(), 20);
        assert_eq!(complete.density(), 1.0);
    }

    #[test]
    fn gnp_has_no_self_loops() {
        let graph = gnp_random(30, 0.5, &mut rng()).unwrap();

        assert!(graph.edges().iter().all(|edge| !edge.is_self_loop()));
    }

    #[test]
    fn gnp_rejects_bad_probability() {
        assert!(matches!(
            gnp_random(5, 1.5, &mut rng()),
            Err(Error::InvalidParameter { name: "p", .. })
        ));
        assert!(gnp_random(5, f64::NAN, &mut rng()).is_err());
    }

    #[test]
    fn gnp_is_reproducible() {
        let a = gnp_random(40, 0.1, &mut rng()).unwrap();
        let b = gnp_random(40, 0.1, &mut rng()).unwrap();

        assert_eq!(a.edges(), b.edges());
    }

    #[test]
    fn scale_free_node_counts() {
        for n in [0, 1, 2, 3, 4, 50, 300] {
            let graph = scale_free(n, &ScaleFreeOptions::default(), &mut rng()).unwrap();

            assert_eq!(graph.node_count(), n);
        }
    }

    #[test]
    fn scale_free_small_seeds() {
        let options = ScaleFreeOptions::default();

        assert_eq!(scale_free(1, &options, &mut rng()).unwrap().edge_count(), 0);

        let pair = scale_free(2, &options, &mut rng()).unwrap();
        assert!(pair.contains(&0, &1));
        assert_eq!(pair.edge_count(), 1);
    }

    #[test]
    fn scale_free_has_hubs() {
        let graph = scale_free(500, &ScaleFreeOptions::default(), &mut rng()).unwrap();
        let degree = graph.degree_centrality();

        let (_, max) = degree.top(1)[0];
        let mean = degree.iter().map(|(_, score)| score).sum::<f64>() / degree.len() as f64;

        assert!(max > 10.0 * mean);
    }

    #[test]
    fn scale_free_rejects_bad_options() {
        let unnormalised = ScaleFreeOptions {
            alpha: 0.5,
            ..ScaleFreeOptions::default()
        };
        let negative_delta = ScaleFreeOptions {
            delta_in: -1.0,
            ..ScaleFreeOptions::default()
        };

        assert!(scale_free(10, &unnormalised, &mut rng()).is_err());
        assert!(matches!(
            scale_free(10, &negative_delta, &mut rng()),
            Err(Error::InvalidParameter {
                name: "delta_in",
                ..
            })
        ));
    }
}
