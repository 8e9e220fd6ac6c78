//! Node removal shared by attacks and fractures.

use std::{collections::VecDeque, time::Instant};

use tracing::debug;

use crate::{
    attack::Strategy,
    centrality::{Ranker, Ranking},
    config::Budget,
    error::{Error, Result},
    graph::Graph,
    node::NodeId,
};

/// Removes nodes one at a time from a private copy of a graph, in the order given by a strategy.
pub(crate) struct Removal<'a> {
    graph: Graph,
    ranker: &'a Ranker,
    strategy: Strategy,
    budget: Budget,
    started: Instant,
    computations: usize,
    /// The fixed removal order, filled on the first removal unless rankings are recomputed.
    order: Option<VecDeque<NodeId>>,
    removed: Vec<NodeId>,
}

impl<'a> Removal<'a> {
    pub fn new(graph: &Graph, ranker: &'a Ranker, strategy: Strategy) -> Result<Self> {
        if graph.is_empty() {
            return Err(Error::EmptyGraph);
        }

        Ok(Self {
            graph: graph.clone(),
            ranker,
            strategy,
            budget: Budget::default(),
            started: Instant::now(),
            computations: 0,
            order: None,
            removed: Vec::new(),
        })
    }

    pub fn set_budget(&mut self, budget: Budget) {
        self.budget = budget;
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn removed(&self) -> &[NodeId] {
        &self.removed
    }

    pub fn into_parts(self) -> (Graph, Vec<NodeId>) {
        (self.graph, self.removed)
    }

    /// Removes the top-ranked remaining node and returns its id.
    pub fn remove_next(&mut self) -> Result<NodeId> {
        if let Some(deadline) = self.budget.deadline() {
            let elapsed = self.started.elapsed();
            if elapsed > deadline {
                return Err(Error::DeadlineExceeded { elapsed });
            }
        }

        let id = if self.recomputes() {
            self.ranking()?.first().map(|(id, _)| *id)
        } else {
            if self.order.is_none() {
                let order = self.ranking()?.into_iter().map(|(id, _)| id).collect();
                self.order = Some(order);
            }
            self.order.as_mut().and_then(VecDeque::pop_front)
        };

        // Running out of candidates means every node is already gone.
        let id = id.ok_or(Error::EmptyGraph)?;
        self.graph.remove_node(id)?;
        self.removed.push(id);

        debug!(
            measure = %self.strategy.measure,
            node = id,
            removed = self.removed.len(),
            remaining = self.graph.vertex_count(),
            "removed node"
        );

        Ok(id)
    }

    /// Random orders ignore structure, drawing them again after each removal changes nothing.
    fn recomputes(&self) -> bool {
        self.strategy.recalculate && self.strategy.measure.is_structural()
    }

    fn ranking(&mut self) -> Result<Ranking> {
        if let Some(max) = self.budget.max_rank_computations {
            if self.computations >= max {
                return Err(Error::BudgetExhausted {
                    computations: self.computations,
                });
            }
        }

        self.computations += 1;
        self.ranker.rank(&self.graph, self.strategy.measure)
    }
}
