//! The error type shared by every stage of the pipeline.

use std::path::PathBuf;

use thiserror::Error;

/// A specialised `Result` type for wormnet operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    /// The edge list could not be opened.
    #[error("failed to open edge list {path}")]
    Open {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// A row of the edge list is malformed or lacks a required column.
    #[error("malformed record at line {line}")]
    Record {
        line: u64,
        #[source]
        source: csv::Error,
    },

    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    /// The Katz linear system `(I - alpha A^T) x = beta` has no unique solution.
    #[error("katz system is singular for alpha = {alpha}")]
    SingularSystem { alpha: f64 },

    /// The attenuation factor is at or above the inverse of the spectral radius, the walk
    /// series doesn't converge.
    #[error("katz attenuation {alpha} must be below 1 / spectral radius = {bound}")]
    KatzDivergent { alpha: f64, bound: f64 },

    #[error("power iteration failed to converge in {iterations} iterations")]
    NotConverged { iterations: usize },

    #[error("a centrality worker thread panicked")]
    WorkerPanicked,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}
