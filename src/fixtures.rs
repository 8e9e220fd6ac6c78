//! Shared test networks.

use crate::graph::Graph;

/// Builds an undirected graph from one or more paths of node ids, connecting consecutive ids.
macro_rules! graph {
    ($($path:expr),*) => {{
        let mut graph = $crate::graph::Graph::new();

        $(
            let path: Vec<$crate::node::NodeId> = $path.into_iter().collect();
            for id in &path {
                graph.insert_node($crate::node::Node::new(*id));
            }
            for pair in path.windows(2) {
                graph
                    .insert_edge($crate::edge::Edge::new(pair[0], pair[1]))
                    .unwrap();
            }
        )*

        graph
    }};
}

pub(crate) use graph;

/// The 15-node sample network: four triangle clusters, with 7 bridging the first two clusters to
/// the third and 10 bridging the third to the fourth, plus a 14-15 link tying clusters one and two
/// together.
pub(crate) fn sample_network() -> Graph {
    Graph::from_edges([
        (1, 2),
        (1, 3),
        (2, 3),
        (4, 5),
        (5, 6),
        (6, 4),
        (4, 7),
        (8, 9),
        (9, 10),
        (10, 8),
        (11, 12),
        (12, 13),
        (13, 11),
        (14, 15),
        (3, 7),
        (7, 10),
        (10, 13),
        (1, 14),
        (5, 15),
    ])
}

/// A path of `n` nodes numbered from 1.
pub(crate) fn path(n: u64) -> Graph {
    graph!(1..=n)
}

/// A complete graph of `n` nodes numbered from 1.
pub(crate) fn complete(n: u64) -> Graph {
    let mut graph = Graph::from_edges((1..=n).flat_map(|a| (a + 1..=n).map(move |b| (a, b))));
    // A single node has no edges to create it from.
    graph.insert_node(crate::node::Node::new(1));
    graph
}
