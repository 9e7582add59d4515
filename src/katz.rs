//! Katz centrality, by direct solution of the linear system or by power iteration.

use nalgebra::{DMatrix, DVector, Normed, Schur};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Error, Result};

/// Parameters of the Katz centrality.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct KatzOptions {
    /// Attenuation factor applied to every additional step of a walk.
    pub alpha: f64,
    /// Baseline centrality given to every vertex.
    pub beta: f64,
    /// Normalise the scores to a unit Euclidean norm.
    pub normalized: bool,
    /// Weight the walks by the edge weights instead of counting them.
    pub weighted: bool,
    /// Refuse to compute scores when `alpha` is at or above `1 / spectral radius`.
    pub check_spectral_radius: bool,
}

impl Default for KatzOptions {
    fn default() -> Self {
        Self {
            alpha: 0.005,
            beta: 1.0,
            normalized: true,
            weighted: false,
            check_spectral_radius: true,
        }
    }
}

/// Solves `(I - alpha A^T) x = beta 1` for the Katz scores.
pub(crate) fn solve(adjacency: DMatrix<f64>, options: &KatzOptions) -> Result<Vec<f64>> {
    let n = adjacency.nrows();

    // The decompositions below require a matrix with at least a dim of 1x1.
    if n == 0 {
        return Ok(vec![]);
    }

    if options.check_spectral_radius {
        match spectral_radius(&adjacency) {
            Some(radius) => {
                debug!(radius, alpha = options.alpha, "adjacency spectral radius");

                if radius > 0.0 && options.alpha >= radius.recip() {
                    return Err(Error::KatzDivergent {
                        alpha: options.alpha,
                        bound: radius.recip(),
                    });
                }
            }
            None => warn!("eigenvalues didn't converge, skipping the katz attenuation check"),
        }
    }

    let system = DMatrix::<f64>::identity(n, n) - adjacency.transpose() * options.alpha;
    let rhs = DVector::<f64>::from_element(n, options.beta);

    let mut centrality = system
        .lu()
        .solve(&rhs)
        .ok_or(Error::SingularSystem {
            alpha: options.alpha,
        })?;

    if options.normalized {
        // Keep the scores positive when the solution came out with a negative orientation.
        let norm = centrality.norm().copysign(centrality.sum());
        if norm != 0.0 {
            centrality.unscale_mut(norm);
        }
    }

    Ok(centrality.iter().copied().collect())
}

/// Power iteration `x <- alpha A^T x + beta`, starting from the zero vector.
///
/// `edges` are `(source, target, weight)` index triplets.
pub(crate) fn iterate(
    num_nodes: usize,
    edges: &[(usize, usize, f64)],
    options: &KatzOptions,
    max_iterations: usize,
    tolerance: f64,
) -> Result<Vec<f64>> {
    if num_nodes == 0 {
        return Ok(vec![]);
    }

    let mut x = vec![0.0; num_nodes];

    for iteration in 0..max_iterations {
        let mut next = vec![0.0; num_nodes];
        for &(source, target, weight) in edges {
            next[target] += x[source] * weight;
        }
        for value in next.iter_mut() {
            *value = options.alpha * *value + options.beta;
        }

        let error: f64 = next.iter().zip(&x).map(|(a, b)| (a - b).abs()).sum();
        x = next;

        if error < num_nodes as f64 * tolerance {
            debug!(iterations = iteration + 1, "katz power iteration converged");

            if options.normalized {
                let norm = x.iter().map(|v| v * v).sum::<f64>().sqrt();
                if norm != 0.0 {
                    x.iter_mut().for_each(|v| *v /= norm);
                }
            }

            return Ok(x);
        }
    }

    Err(Error::NotConverged {
        iterations: max_iterations,
    })
}

/// Returns the largest eigenvalue modulus of a (generally non-symmetric) matrix, `None` if
/// the Schur decomposition doesn't converge.
fn spectral_radius(matrix: &DMatrix<f64>) -> Option<f64> {
    let max_iterations = (100 * matrix.nrows()).max(1_000);
    let schur = Schur::try_new(matrix.clone(), f64::EPSILON, max_iterations)?;

    Some(
        schur
            .complex_eigenvalues()
            .iter()
            .map(|eigenvalue| eigenvalue.norm())
            .fold(0.0, f64::max),
    )
}

#[cfg(test)]
mod tests {
    use nalgebra::dmatrix;

    use super::*;

    #[test]
    fn spectral_radius_of_cycles() {
        let cycle = dmatrix![0.0, 1.0;
                             1.0, 0.0];
        assert!((spectral_radius(&cycle).unwrap() - 1.0).abs() < 1e-9);

        // Eigenvalues +-2.
        let weighted = dmatrix![0.0, 4.0;
                                1.0, 0.0];
        assert!((spectral_radius(&weighted).unwrap() - 2.0).abs() < 1e-9);
    }

    #[test]
    fn spectral_radius_of_dag_is_zero() {
        let dag = dmatrix![0.0, 1.0, 1.0;
                           0.0, 0.0, 1.0;
                           0.0, 0.0, 0.0];

        assert!(spectral_radius(&dag).unwrap().abs() < 1e-9);
    }

    #[test]
    fn unnormalised_star() {
        // 0 -> 1, 0 -> 2: the leaves pick up alpha * beta from the hub.
        let adjacency = dmatrix![0.0, 1.0, 1.0;
                                 0.0, 0.0, 0.0;
                                 0.0, 0.0, 0.0];
        let options = KatzOptions {
            alpha: 0.5,
            beta: 2.0,
            normalized: false,
            ..KatzOptions::default()
        };

        let scores = solve(adjacency, &options).unwrap();

        for (score, expected) in scores.iter().zip([2.0, 3.0, 3.0]) {
            assert!((score - expected).abs() < 1e-12);
        }
    }

    #[test]
    fn singular_system_without_radius_check() {
        // alpha = 1 on a 2-cycle makes I - alpha A^T singular.
        let adjacency = dmatrix![0.0, 1.0;
                                 1.0, 0.0];
        let options = KatzOptions {
            alpha: 1.0,
            check_spectral_radius: false,
            ..KatzOptions::default()
        };

        assert!(matches!(
            solve(adjacency, &options),
            Err(Error::SingularSystem { .. })
        ));
    }

    #[test]
    fn iterate_matches_solve() {
        let adjacency = dmatrix![0.0, 1.0, 0.0;
                                 0.0, 0.0, 2.0;
                                 1.0, 0.0, 0.0];
        let edges = [(0, 1, 1.0), (1, 2, 2.0), (2, 0, 1.0)];
        let options = KatzOptions {
            alpha: 0.2,
            ..KatzOptions::default()
        };

        let direct = solve(adjacency, &options).unwrap();
        let iterative = iterate(3, &edges, &options, 1_000, 1e-14).unwrap();

        for (x, y) in direct.iter().zip(&iterative) {
            assert!((x - y).abs() < 1e-10);
        }
    }
}
