//! A module for comparing attack strategies on the same network.

use std::{fmt, fs, path::Path};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::{
    attack::{AttackSimulator, Strategy, VulnerabilityCurve},
    centrality::{Measure, Ranker},
    config::Budget,
    error::{Error, Result},
    graph::Graph,
    node::NodeId,
};

/// What became of one strategy in a comparison.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Status {
    Completed {
        vulnerability: f64,
        curve: VulnerabilityCurve,
        removed: Vec<NodeId>,
    },
    /// The attack failed and the strategy was dropped from the comparison.
    Failed { error: String },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StrategyReport {
    pub measure: Measure,
    #[serde(flatten)]
    pub status: Status,
}

/// The curves and vulnerability indices of several strategies attacking the same network.
///
/// Displaying a report prints one legend entry per strategy, in the order they were compared.
///
/// ```
/// use aftershock::{
///     centrality::{Measure, Ranker},
///     config::Budget,
///     graph::Graph,
///     report::Report,
/// };
///
/// let graph = Graph::from_edges([(1, 2), (2, 3)]);
/// let report = Report::compare(
///     &graph,
///     &Ranker::default(),
///     &[Measure::Degree, Measure::Random],
///     false,
///     Budget::default(),
/// )
/// .unwrap();
///
/// assert_eq!(report.to_string().lines().next(), Some("Degree (V = 0.278)"));
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// Node count of the attacked network.
    pub nodes: usize,
    pub recalculate: bool,
    pub strategies: Vec<StrategyReport>,
}

impl Report {
    /// Attacks the graph once per measure. A strategy that fails is recorded as such and doesn't
    /// stop the others.
    pub fn compare(
        graph: &Graph,
        ranker: &Ranker,
        measures: &[Measure],
        recalculate: bool,
        budget: Budget,
    ) -> Result<Self> {
        if graph.is_empty() {
            return Err(Error::EmptyGraph);
        }

        let strategies = measures
            .iter()
            .map(|&measure| {
                let outcome =
                    AttackSimulator::new(graph, ranker, Strategy::new(measure, recalculate))
                        .map(|simulator| simulator.with_budget(budget))
                        .and_then(AttackSimulator::run);

                let status = match outcome {
                    Ok(outcome) => Status::Completed {
                        vulnerability: outcome.vulnerability,
                        curve: outcome.curve,
                        removed: outcome.removed,
                    },
                    Err(e) => {
                        warn!(%measure, error = %e, "dropping strategy from report");
                        Status::Failed {
                            error: e.to_string(),
                        }
                    }
                };

                StrategyReport { measure, status }
            })
            .collect();

        Ok(Self {
            nodes: graph.vertex_count(),
            recalculate,
            strategies,
        })
    }

    fn completed_status(&self, measure: Measure) -> Option<(f64, &VulnerabilityCurve)> {
        self.strategies
            .iter()
            .find(|strategy| strategy.measure == measure)
            .and_then(|strategy| match &strategy.status {
                Status::Completed {
                    vulnerability,
                    curve,
                    ..
                } => Some((*vulnerability, curve)),
                Status::Failed { .. } => None,
            })
    }

    pub fn vulnerability(&self, measure: Measure) -> Option<f64> {
        self.completed_status(measure).map(|(vulnerability, _)| vulnerability)
    }

    pub fn curve(&self, measure: Measure) -> Option<&VulnerabilityCurve> {
        self.completed_status(measure).map(|(_, curve)| curve)
    }

    /// The measures whose attack ran to completion.
    pub fn completed(&self) -> impl Iterator<Item = Measure> + '_ {
        self.strategies
            .iter()
            .filter(|strategy| matches!(strategy.status, Status::Completed { .. }))
            .map(|strategy| strategy.measure)
    }

    /// The dropped measures and why they failed.
    pub fn failures(&self) -> impl Iterator<Item = (Measure, &str)> {
        self.strategies
            .iter()
            .filter_map(|strategy| match &strategy.status {
                Status::Failed { error } => Some((strategy.measure, error.as_str())),
                Status::Completed { .. } => None,
            })
    }

    /// Writes the report as pretty-printed JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<()> {
        fs::write(path.as_ref(), serde_json::to_string_pretty(self)?)?;

        info!(
            path = %path.as_ref().display(),
            strategies = self.strategies.len(),
            "report written"
        );

        Ok(())
    }
}

fn title(measure: Measure) -> String {
    let name = measure.as_str();
    let mut chars = name.chars();

    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

impl fmt::Display for StrategyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.status {
            Status::Completed { vulnerability, .. } => {
                write!(f, "{} (V = {vulnerability:.3})", title(self.measure))
            }
            Status::Failed { error } => write!(f, "{} (dropped: {error})", title(self.measure)),
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for strategy in &self.strategies {
            writeln!(f, "{strategy}")?;
        }

        Ok(())
    }
}
