//! A module for computing eigenvector centrality.

use nalgebra::{DMatrix, SymmetricEigen};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Settings for the symmetric eigendecomposition.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EigenvectorConfig {
    /// Cap on the QR sweeps of the decomposition, 0 lifts it.
    pub max_iterations: usize,
    /// Off-diagonal entries below `tolerance` times their diagonal neighbours count as zero.
    pub tolerance: f64,
}

impl Default for EigenvectorConfig {
    fn default() -> Self {
        Self {
            max_iterations: 10_000,
            tolerance: f64::EPSILON,
        }
    }
}

/// Computes the principal eigenvector of the adjacency matrix, scaled to unit length.
///
/// The decomposition is direct, so disconnected graphs are fine: the vector concentrates on the
/// component with the largest spectral radius. Signs are dropped, the eigenvector of a connected
/// graph has a single sign anyway.
pub fn compute_eigenvector(adjacency_matrix: DMatrix<f64>, config: &EigenvectorConfig) -> Result<Vec<f64>> {
    // The decomposition requires a matrix with at least a dim of 1x1.
    if adjacency_matrix.is_empty() {
        return Err(Error::EmptyGraph);
    }

    let eigen = SymmetricEigen::try_new(adjacency_matrix, config.tolerance, config.max_iterations)
        .ok_or(Error::Convergence {
            iterations: config.max_iterations,
        })?;

    let principal = eigen.eigenvalues.imax();

    Ok(eigen
        .eigenvectors
        .column(principal)
        .iter()
        .map(|component| component.abs())
        .collect())
}
