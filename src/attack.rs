//! A module for simulating attacks on a network and measuring how it fragments.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    centrality::{Measure, Ranker},
    config::Budget,
    error::Result,
    graph::Graph,
    node::NodeId,
    removal::Removal,
};

/// How the next node to remove gets picked.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Strategy {
    pub measure: Measure,
    /// Recompute the ranking on the reduced graph before every removal (sequential removal),
    /// rather than consuming the ranking of the intact graph (simultaneous removal).
    pub recalculate: bool,
}

impl Strategy {
    pub fn new(measure: Measure, recalculate: bool) -> Self {
        Self {
            measure,
            recalculate,
        }
    }
}

/// The fragmentation curve of an attack: point `i` pairs the fraction of nodes removed, `i / n`,
/// with the size of the largest connected component relative to the `n` nodes of the intact graph.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VulnerabilityCurve {
    points: Vec<(f64, f64)>,
}

impl VulnerabilityCurve {
    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Returns `0.5 - (1/n) Σ y_i` over the removal steps, leaving out the intact graph at step 0.
    ///
    /// The index approaches 0 for networks whose giant component shrinks only by the removed
    /// nodes themselves and 0.5 for networks that shatter on the first removal.
    ///
    /// # Examples
    ///
    /// ```
    /// use aftershock::{
    ///     attack::{AttackSimulator, Strategy},
    ///     centrality::{Measure, Ranker},
    ///     graph::Graph,
    /// };
    ///
    /// // A 4-star falls apart as soon as its centre goes.
    /// let graph = Graph::from_edges([(1, 2), (1, 3), (1, 4)]);
    /// let ranker = Ranker::default();
    /// let outcome = AttackSimulator::new(&graph, &ranker, Strategy::new(Measure::Degree, false))
    ///     .unwrap()
    ///     .run()
    ///     .unwrap();
    ///
    /// assert_eq!(outcome.curve.points(), &[(0.0, 1.0), (0.25, 0.25), (0.5, 0.25), (0.75, 0.25)]);
    /// assert_eq!(outcome.vulnerability, 0.5 - 0.75 / 4.0);
    /// ```
    pub fn vulnerability_index(&self) -> f64 {
        let n = self.points.len() as f64;
        let sum: f64 = self.points.iter().skip(1).map(|(_, y)| y).sum();

        0.5 - sum / n
    }
}

/// The result of a complete attack.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AttackOutcome {
    pub strategy: Strategy,
    pub curve: VulnerabilityCurve,
    pub vulnerability: f64,
    /// Removed node ids, in removal order.
    pub removed: Vec<NodeId>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttackState {
    /// Nothing recorded yet.
    Initialized,
    /// The intact graph has been recorded and removals are under way.
    Running,
    /// All `n` points are recorded.
    Done,
}

/// Drives an attack step by step.
///
/// The simulator works on its own copy of the graph. It records the intact graph, then removes
/// the top-ranked node and records the resulting largest component, until `n` points have been
/// recorded. The last node is never removed: a graph with no nodes has no meaningful largest
/// component.
pub struct AttackSimulator<'a> {
    removal: Removal<'a>,
    n: usize,
    points: Vec<(f64, f64)>,
    state: AttackState,
}

impl<'a> AttackSimulator<'a> {
    /// Prepares an attack, fails with [`Error::EmptyGraph`](crate::error::Error::EmptyGraph) on a
    /// graph without nodes.
    pub fn new(graph: &Graph, ranker: &'a Ranker, strategy: Strategy) -> Result<Self> {
        let n = graph.vertex_count();

        Ok(Self {
            removal: Removal::new(graph, ranker, strategy)?,
            n,
            points: Vec::with_capacity(n),
            state: AttackState::Initialized,
        })
    }

    pub fn with_budget(mut self, budget: Budget) -> Self {
        self.removal.set_budget(budget);
        self
    }

    pub fn state(&self) -> AttackState {
        self.state
    }

    /// The points recorded so far.
    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    /// Records the next point of the curve, removing a node first unless this is the first step.
    /// Returns `None` once the attack is done.
    pub fn step(&mut self) -> Result<Option<(f64, f64)>> {
        match self.state {
            AttackState::Initialized => self.state = AttackState::Running,
            AttackState::Running => {
                self.removal.remove_next()?;
            }
            AttackState::Done => return Ok(None),
        }

        let n = self.n as f64;
        let point = (
            self.removal.removed().len() as f64 / n,
            self.removal.graph().largest_component_size() as f64 / n,
        );
        self.points.push(point);

        if self.points.len() == self.n {
            self.state = AttackState::Done;
        }

        Ok(Some(point))
    }

    /// Runs the attack to completion.
    pub fn run(mut self) -> Result<AttackOutcome> {
        while self.step()?.is_some() {}

        let curve = VulnerabilityCurve {
            points: self.points,
        };
        let vulnerability = curve.vulnerability_index();
        let strategy = self.removal.strategy();
        let (_, removed) = self.removal.into_parts();

        info!(
            measure = %strategy.measure,
            recalculate = strategy.recalculate,
            nodes = self.n,
            vulnerability,
            "attack finished"
        );

        Ok(AttackOutcome {
            strategy,
            curve,
            vulnerability,
            removed,
        })
    }
}
