//! A module for partially attacking a network and labelling what survives.

use std::path::Path;

use tracing::info;

use crate::{
    attack::Strategy,
    centrality::Ranker,
    config::Budget,
    error::{Error, Result},
    format,
    graph::Graph,
    node::NodeId,
    removal::Removal,
};

/// A damaged snapshot of a network.
#[derive(Clone, Debug, PartialEq)]
pub struct Fracture {
    /// The surviving graph, every node labelled with its component id.
    pub graph: Graph,
    /// Removed node ids, in removal order.
    pub removed: Vec<NodeId>,
    /// The number of connected components among the survivors.
    pub components: usize,
    pub strategy: Strategy,
}

impl Fracture {
    pub fn survivors(&self) -> usize {
        self.graph.vertex_count()
    }

    /// Writes the labelled graph, in the format implied by the file extension.
    pub fn persist(&self, path: impl AsRef<Path>) -> Result<()> {
        format::persist(&self.graph, path)
    }
}

/// Removes nodes the same way an attack does, but stops once a target fraction of the network is
/// gone.
///
/// # Examples
///
/// ```
/// use aftershock::{
///     attack::Strategy,
///     centrality::{Measure, Ranker},
///     fracture::FractureOperator,
///     graph::Graph,
/// };
///
/// // Two triangles joined through node 4.
/// let graph = Graph::from_edges([(1, 2), (2, 3), (3, 1), (3, 4), (4, 5), (5, 6), (6, 7), (7, 5)]);
/// let ranker = Ranker::default();
/// let fracture = FractureOperator::new(&ranker, Strategy::new(Measure::Betweenness, true))
///     .apply(&graph, 0.1)
///     .unwrap();
///
/// assert_eq!(fracture.removed, vec![4]);
/// assert_eq!(fracture.components, 2);
/// assert_eq!(fracture.graph.node(1).unwrap().component, Some(1));
/// assert_eq!(fracture.graph.node(7).unwrap().component, Some(2));
/// ```
pub struct FractureOperator<'a> {
    ranker: &'a Ranker,
    strategy: Strategy,
    budget: Budget,
}

impl<'a> FractureOperator<'a> {
    pub fn new(ranker: &'a Ranker, strategy: Strategy) -> Self {
        Self {
            ranker,
            strategy,
            budget: Budget::default(),
        }
    }

    pub fn with_budget(mut self, budget: Budget) -> Self {
        self.budget = budget;
        self
    }

    /// Removes nodes until at least `target_fraction` of them are gone, then labels the
    /// connected components of the survivors. The fraction must lie in (0, 1].
    pub fn apply(&self, graph: &Graph, target_fraction: f64) -> Result<Fracture> {
        if !(target_fraction > 0.0 && target_fraction <= 1.0) {
            return Err(Error::InvalidFraction(target_fraction));
        }

        let mut removal = Removal::new(graph, self.ranker, self.strategy)?;
        removal.set_budget(self.budget);

        let n = graph.vertex_count() as f64;
        while (removal.removed().len() as f64) / n < target_fraction {
            removal.remove_next()?;
        }

        let (mut graph, removed) = removal.into_parts();
        let components = graph.label_components();

        info!(
            measure = %self.strategy.measure,
            recalculate = self.strategy.recalculate,
            target_fraction,
            removed = removed.len(),
            survivors = graph.vertex_count(),
            components,
            "network fractured"
        );

        Ok(Fracture {
            graph,
            removed,
            components,
            strategy: self.strategy,
        })
    }
}
