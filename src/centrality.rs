//! A module for ranking nodes by how critical they are to the network.

use std::{fmt, str::FromStr};

use itertools::Itertools;
use rand::{seq::SliceRandom, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::{
    betweenness::compute_betweenness,
    closeness::compute_closeness,
    eigenvector::compute_eigenvector,
    error::{Error, Result},
    graph::Graph,
    node::NodeId,
};

pub use crate::eigenvector::EigenvectorConfig;

/// Node ids paired with their score, in descending score order.
pub type Ranking = Vec<(NodeId, f64)>;

/// The ordering used to pick which node gets removed next.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Measure {
    /// Neighbour count over `n - 1`.
    Degree,
    /// Fraction of shortest paths between other nodes passing through the node.
    Betweenness,
    /// Reciprocal of the mean distance to all reachable nodes.
    Closeness,
    /// Component of the adjacency matrix's principal eigenvector.
    Eigenvector,
    /// A seeded shuffle, independent of structure.
    Random,
}

impl Measure {
    pub const ALL: [Measure; 5] = [
        Measure::Degree,
        Measure::Betweenness,
        Measure::Closeness,
        Measure::Eigenvector,
        Measure::Random,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Degree => "degree",
            Self::Betweenness => "betweenness",
            Self::Closeness => "closeness",
            Self::Eigenvector => "eigenvector",
            Self::Random => "random",
        }
    }

    /// Whether the ranking depends on the graph's structure, i.e. whether recomputing it after a
    /// removal can change anything.
    pub fn is_structural(&self) -> bool {
        !matches!(self, Self::Random)
    }
}

impl fmt::Display for Measure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Measure {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|measure| measure.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::UnknownMeasure(s.to_owned()))
    }
}

/// Computes rankings under any [`Measure`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Ranker {
    seed: u64,
    eigenvector: EigenvectorConfig,
}

impl Ranker {
    /// Creates a ranker whose random orderings are drawn from `seed`.
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            eigenvector: Default::default(),
        }
    }

    pub fn with_eigenvector(mut self, config: EigenvectorConfig) -> Self {
        self.eigenvector = config;
        self
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Ranks the nodes of the graph in descending score order, equal scores are kept in ascending
    /// id order.
    ///
    /// # Examples
    ///
    /// ```
    /// use aftershock::{centrality::{Measure, Ranker}, graph::Graph};
    ///
    /// // A star centred on 3.
    /// let graph = Graph::from_edges([(3, 1), (3, 2), (3, 4)]);
    /// let ranking = Ranker::default().rank(&graph, Measure::Degree).unwrap();
    ///
    /// assert_eq!(ranking[0], (3, 1.0));
    /// // Leaves tie and keep their id order.
    /// assert_eq!(ranking[1].0, 1);
    /// assert_eq!(ranking[3].0, 4);
    /// ```
    pub fn rank(&self, graph: &Graph, measure: Measure) -> Result<Ranking> {
        if graph.is_empty() {
            return Err(Error::EmptyGraph);
        }

        let ids: Vec<NodeId> = graph.node_ids().collect();

        let scores = match measure {
            Measure::Degree => degree(graph),
            Measure::Betweenness => compute_betweenness(&graph.neighbour_lists()),
            Measure::Closeness => compute_closeness(&graph.neighbour_lists()),
            Measure::Eigenvector => compute_eigenvector(graph.adjacency_matrix(), &self.eigenvector)?,
            Measure::Random => return Ok(self.shuffle(ids)),
        };

        // The sort is stable and `ids` is ascending, ties stay in id order.
        Ok(ids
            .into_iter()
            .zip(scores)
            .sorted_by(|(_, a), (_, b)| b.total_cmp(a))
            .collect())
    }

    /// Shuffles the ids with the seeded generator. Scores only encode the drawn position.
    fn shuffle(&self, mut ids: Vec<NodeId>) -> Ranking {
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        ids.shuffle(&mut rng);

        let n = ids.len() as f64;
        ids.into_iter()
            .enumerate()
            .map(|(position, id)| (id, (n - position as f64) / n))
            .collect()
    }
}

fn degree(graph: &Graph) -> Vec<f64> {
    let lists = graph.neighbour_lists();

    if lists.len() == 1 {
        return vec![1.0];
    }

    let divisor = (lists.len() - 1) as f64;
    lists
        .iter()
        .map(|neighbours| neighbours.len() as f64 / divisor)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        fixtures::{graph, path, sample_network},
        node::Node,
    };

    fn order(ranking: &Ranking) -> Vec<NodeId> {
        ranking.iter().map(|(id, _)| *id).collect()
    }

    #[test]
    fn measure_from_str() {
        assert_eq!("degree".parse::<Measure>().unwrap(), Measure::Degree);
        assert_eq!("Eigenvector".parse::<Measure>().unwrap(), Measure::Eigenvector);
        assert!(matches!(
            "pagerank".parse::<Measure>(),
            Err(Error::UnknownMeasure(_))
        ));
    }

    #[test]
    fn empty_graph() {
        for measure in Measure::ALL {
            assert!(matches!(
                Ranker::default().rank(&Graph::new(), measure),
                Err(Error::EmptyGraph)
            ));
        }
    }

    #[test]
    fn single_node() {
        let mut graph = Graph::new();
        graph.insert_node(Node::new(9));

        for measure in Measure::ALL {
            let ranking = Ranker::default().rank(&graph, measure).unwrap();
            assert_eq!(order(&ranking), vec![9]);
        }
    }

    #[test]
    fn descending_for_every_measure() {
        let graph = sample_network();

        for measure in Measure::ALL {
            let ranking = Ranker::new(3).rank(&graph, measure).unwrap();

            assert_eq!(ranking.len(), graph.vertex_count());
            assert!(ranking.windows(2).all(|pair| pair[0].1 >= pair[1].1));
        }
    }

    #[test]
    fn degree_ranking() {
        let ranking = Ranker::default()
            .rank(&sample_network(), Measure::Degree)
            .unwrap();

        assert_eq!(ranking[0], (10, 4.0 / 14.0));
        // Ties at degree 3 in id order.
        assert_eq!(&order(&ranking)[1..7], &[1, 3, 4, 5, 7, 13]);
    }

    #[test]
    fn betweenness_ranking() {
        let ranking = Ranker::default()
            .rank(&sample_network(), Measure::Betweenness)
            .unwrap();

        assert_eq!(&order(&ranking)[..2], &[7, 10]);
        assert!((ranking[0].1 - 0.6043956043956045).abs() < 1e-12);
    }

    #[test]
    fn closeness_ranking() {
        let ranking = Ranker::default()
            .rank(&path(5), Measure::Closeness)
            .unwrap();

        assert_eq!(order(&ranking), vec![3, 2, 4, 1, 5]);
        assert_eq!(ranking[0].1, 4.0 / 6.0);
    }

    #[test]
    fn eigenvector_ranking() {
        let ranking = Ranker::default()
            .rank(&sample_network(), Measure::Eigenvector)
            .unwrap();

        assert_eq!(&order(&ranking)[..2], &[10, 7]);
    }

    #[test]
    fn eigenvector_failure() {
        let ranker = Ranker::default().with_eigenvector(EigenvectorConfig {
            max_iterations: 1,
            ..Default::default()
        });

        assert!(matches!(
            ranker.rank(&path(3), Measure::Eigenvector),
            Err(Error::Convergence { .. })
        ));
    }

    #[test]
    fn random_is_seeded() {
        let graph = sample_network();

        let a = Ranker::new(42).rank(&graph, Measure::Random).unwrap();
        let b = Ranker::new(42).rank(&graph, Measure::Random).unwrap();
        assert_eq!(a, b);

        // Every node shows up exactly once.
        let mut ids = order(&a);
        ids.sort_unstable();
        assert_eq!(ids, graph.node_ids().collect::<Vec<_>>());
    }

    #[test]
    fn random_ignores_structure() {
        // Same ids, different edges: the drawn order only depends on the ids and the seed.
        let a = Ranker::new(7).rank(&path(6), Measure::Random).unwrap();
        let b = Ranker::new(7)
            .rank(&graph!([1, 6], [2, 5], [3, 4]), Measure::Random)
            .unwrap();

        assert_eq!(a, b);
    }
}
