//! Aftershock is a small toolkit for assessing how a logistics network (communities, warehouses
//! and their backups) fragments as its nodes fail, though it can also apply more generally to
//! undirected graphs.
//!
//! # Basic usage
//!
//! The library is centered around the [`Graph`](graph::Graph) structure which can be built node by
//! node, from [`Edge`](edge::Edge) instances, or loaded from a GML or JSON file with
//! [`format::load`]. Nodes are ranked by a centrality [`Measure`](centrality::Measure) and removed
//! in that order by an [`AttackSimulator`](attack::AttackSimulator), which records how the largest
//! connected component shrinks.
//!
//! ```rust
//! use aftershock::{
//!     attack::{AttackSimulator, Strategy},
//!     centrality::{Measure, Ranker},
//!     edge::Edge,
//!     graph::Graph,
//!     node::{Node, NodeKind},
//! };
//!
//! // Construct the graph instance.
//! let mut graph = Graph::new();
//!
//! // A warehouse supplying two communities, each also linked to a backup.
//! graph.insert_node(Node::new(1).with_kind(NodeKind::Warehouse));
//! graph.insert_node(Node::new(2).with_kind(NodeKind::Community));
//! graph.insert_node(Node::new(3).with_kind(NodeKind::Community));
//! graph.insert_node(Node::new(4).with_kind(NodeKind::Backup));
//!
//! graph.insert_edge(Edge::new(1, 2)).unwrap();
//! graph.insert_edge(Edge::new(1, 3)).unwrap();
//! graph.insert_edge(Edge::new(4, 2)).unwrap();
//! graph.insert_edge(Edge::new(4, 3)).unwrap();
//!
//! // Attack the most connected nodes first, recomputing the ranking after every removal.
//! let ranker = Ranker::default();
//! let outcome = AttackSimulator::new(&graph, &ranker, Strategy::new(Measure::Degree, true))
//!     .unwrap()
//!     .run()
//!     .unwrap();
//!
//! // The cycle survives the first removal in one piece.
//! assert_eq!(outcome.curve.points()[1], (0.25, 0.75));
//! assert!(outcome.vulnerability < 0.5);
//! ```
//!
//! Several strategies can be compared at once with [`Report::compare`](report::Report::compare),
//! and a [`FractureOperator`](fracture::FractureOperator) stops an attack part way to produce a
//! damaged, component-labelled network for further study.

mod betweenness;
mod closeness;
mod eigenvector;
#[cfg(test)]
mod fixtures;
mod removal;

pub mod attack;
pub mod centrality;
pub mod config;
pub mod edge;
pub mod error;
pub mod format;
pub mod fracture;
pub mod graph;
pub mod node;
pub mod report;

pub use error::{Error, Result};
