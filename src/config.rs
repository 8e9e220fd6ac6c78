//! A module for run configuration, loadable from TOML.

use std::{fs, path::Path, time::Duration};

use serde::{Deserialize, Serialize};

use crate::{
    centrality::{EigenvectorConfig, Measure, Ranker},
    error::Result,
};

/// Limits on the work a single attack or fracture may do. Unset limits are unbounded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Budget {
    /// Wall-clock limit for one run, in milliseconds.
    pub deadline_ms: Option<u64>,
    /// Cap on the number of rankings one run may compute.
    pub max_rank_computations: Option<usize>,
}

impl Budget {
    pub fn deadline(&self) -> Option<Duration> {
        self.deadline_ms.map(Duration::from_millis)
    }
}

/// # Examples
///
/// ```
/// use aftershock::{centrality::Measure, config::Config};
///
/// let config: Config = toml::from_str(
///     r#"
///     seed = 7
///     measures = ["degree", "random"]
///
///     [budget]
///     deadline_ms = 5000
///     "#,
/// )
/// .unwrap();
///
/// assert_eq!(config.measures, vec![Measure::Degree, Measure::Random]);
/// assert_eq!(config.eigenvector.max_iterations, 10_000);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Seed of the random strategy.
    pub seed: u64,
    /// Strategies compared in a report, in report order.
    pub measures: Vec<Measure>,
    pub eigenvector: EigenvectorConfig,
    pub budget: Budget,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: 0,
            measures: Measure::ALL.to_vec(),
            eigenvector: EigenvectorConfig::default(),
            budget: Budget::default(),
        }
    }
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path)?;

        Ok(toml::from_str(&contents)?)
    }

    pub fn ranker(&self) -> Ranker {
        Ranker::new(self.seed).with_eigenvector(self.eigenvector)
    }
}
