//! A module for the errors produced by the library.

use std::{io, path::PathBuf, time::Duration};

use thiserror::Error;

use crate::node::NodeId;

/// A specialised `Result` type for graph loading, ranking and attack simulation.
pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The node isn't part of the graph.
    #[error("node {0} not found")]
    NotFound(NodeId),

    /// The operation needs at least one node.
    #[error("graph has no nodes")]
    EmptyGraph,

    /// The eigendecomposition didn't converge within its sweep cap.
    #[error("eigenvector centrality failed to converge within {iterations} iterations")]
    Convergence { iterations: usize },

    #[error("GML syntax error on line {line}: {message}")]
    Parse { line: usize, message: String },

    /// Well-formed input that doesn't describe a valid graph.
    #[error("malformed graph: {0}")]
    Malformed(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid configuration: {0}")]
    Toml(#[from] toml::de::Error),

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("target fraction {0} is outside (0, 1]")]
    InvalidFraction(f64),

    #[error("unknown measure {0:?}")]
    UnknownMeasure(String),

    #[error("unsupported graph format: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("deadline exceeded after {elapsed:?}")]
    DeadlineExceeded { elapsed: Duration },

    #[error("ranking budget exhausted after {computations} computations")]
    BudgetExhausted { computations: usize },
}
