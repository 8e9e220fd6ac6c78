//! A module for working with graphs.

use std::collections::{BTreeMap, HashSet, VecDeque};

use nalgebra::DMatrix;

use crate::{
    edge::Edge,
    error::{Error, Result},
    node::{Node, NodeId},
};

/// An attributed graph, made up of nodes and the edges between them.
///
/// Nodes are kept sorted by id, which gives every traversal and every matrix built from the graph
/// a stable order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Graph {
    directed: bool,
    nodes: BTreeMap<NodeId, Node>,
    /// The edges in insertion order.
    edges: Vec<Edge>,
    /// Endpoint keys of `edges`, used to reject duplicates.
    keys: HashSet<(NodeId, NodeId)>,
}

impl Graph {
    /// Creates an empty undirected graph.
    ///
    /// # Examples
    ///
    /// ```
    /// use aftershock::graph::Graph;
    ///
    /// let graph = Graph::new();
    /// assert!(graph.is_empty());
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty directed graph. Connectivity and rankings still treat its edges as
    /// undirected; direction is only preserved for persistence.
    pub fn new_directed() -> Self {
        Self {
            directed: true,
            ..Self::default()
        }
    }

    /// Builds an undirected graph from `(source, target)` pairs, creating generic nodes for every
    /// id encountered.
    ///
    /// # Examples
    ///
    /// ```
    /// use aftershock::graph::Graph;
    ///
    /// let graph = Graph::from_edges([(1, 2), (2, 3), (3, 1)]);
    /// assert_eq!(graph.vertex_count(), 3);
    /// assert_eq!(graph.edge_count(), 3);
    /// ```
    pub fn from_edges(pairs: impl IntoIterator<Item = (NodeId, NodeId)>) -> Self {
        let mut graph = Self::new();

        for (source, target) in pairs {
            graph.insert_node(Node::new(source));
            graph.insert_node(Node::new(target));

            // Both endpoints were inserted above so this can't fail.
            let _ = graph.insert_edge(Edge::new(source, target));
        }

        graph
    }

    pub fn is_directed(&self) -> bool {
        self.directed
    }

    /// Inserts a node into the graph, returns `false` and leaves the graph untouched if a node
    /// with the same id is already present.
    pub fn insert_node(&mut self, node: Node) -> bool {
        if self.nodes.contains_key(&node.id()) {
            return false;
        }

        self.nodes.insert(node.id(), node);
        true
    }

    /// Inserts an edge into the graph and returns whether it was new.
    ///
    /// # Examples
    ///
    /// ```
    /// use aftershock::{edge::Edge, error::Error, graph::Graph, node::Node};
    ///
    /// let mut graph = Graph::new();
    /// graph.insert_node(Node::new(1));
    /// graph.insert_node(Node::new(2));
    ///
    /// assert_eq!(graph.insert_edge(Edge::new(1, 2)).unwrap(), true);
    /// assert_eq!(graph.insert_edge(Edge::new(2, 1)).unwrap(), false);
    /// assert!(matches!(graph.insert_edge(Edge::new(1, 3)), Err(Error::NotFound(3))));
    /// ```
    pub fn insert_edge(&mut self, edge: Edge) -> Result<bool> {
        for endpoint in [edge.source(), edge.target()] {
            if !self.nodes.contains_key(&endpoint) {
                return Err(Error::NotFound(endpoint));
            }
        }

        if !self.keys.insert(edge.key(self.directed)) {
            return Ok(false);
        }

        self.edges.push(edge);
        Ok(true)
    }

    /// Removes a node along with all its incident edges and returns it.
    ///
    /// # Examples
    ///
    /// ```
    /// use aftershock::{error::Error, graph::Graph};
    ///
    /// let mut graph = Graph::from_edges([(1, 2), (2, 3)]);
    ///
    /// assert_eq!(graph.remove_node(2).unwrap().id(), 2);
    /// assert_eq!(graph.edge_count(), 0);
    /// assert!(matches!(graph.remove_node(2), Err(Error::NotFound(2))));
    /// ```
    pub fn remove_node(&mut self, id: NodeId) -> Result<Node> {
        let node = self.nodes.remove(&id).ok_or(Error::NotFound(id))?;

        let directed = self.directed;
        let keys = &mut self.keys;
        self.edges.retain(|edge| {
            if edge.contains(id) {
                keys.remove(&edge.key(directed));
                false
            } else {
                true
            }
        });

        Ok(node)
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(&id)
    }

    pub fn contains_node(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Returns the nodes in ascending id order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Returns the node ids in ascending order.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.keys().copied()
    }

    /// Returns the edges in insertion order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn vertex_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Constructs a mapping of node ids to their indices, used when constructing the matrix and
    /// list representations of the graph.
    ///
    /// The index is sorted by id.
    pub fn index(&self) -> BTreeMap<NodeId, usize> {
        self.nodes
            .keys()
            .enumerate()
            .map(|(i, &id)| (id, i))
            .collect()
    }

    /// Constructs the undirected neighbour lists of the graph, positions follow [`Graph::index`].
    ///
    /// Self-loops are dropped and parallel connections (e.g. `a -> b` and `b -> a` in a directed
    /// graph) collapse to a single neighbour.
    pub fn neighbour_lists(&self) -> Vec<Vec<usize>> {
        let index = self.index();
        let mut lists = vec![Vec::new(); index.len()];

        for edge in self.edges.iter().filter(|edge| !edge.is_loop()) {
            // `insert_edge` and `remove_node` keep every edge endpoint in the node map.
            let i = index[&edge.source()];
            let j = index[&edge.target()];

            lists[i].push(j);
            lists[j].push(i);
        }

        for list in &mut lists {
            list.sort_unstable();
            list.dedup();
        }

        lists
    }

    /// Constructs the symmetric adjacency matrix of the undirected interpretation of this graph.
    ///
    /// # Examples
    ///
    /// ```
    /// use nalgebra::dmatrix;
    /// use aftershock::graph::Graph;
    ///
    /// let graph = Graph::from_edges([(1, 2)]);
    /// assert_eq!(
    ///     graph.adjacency_matrix(),
    ///     dmatrix![0.0, 1.0;
    ///              1.0, 0.0]
    /// );
    /// ```
    pub fn adjacency_matrix(&self) -> DMatrix<f64> {
        let lists = self.neighbour_lists();
        let n = lists.len();
        let mut matrix = DMatrix::<f64>::zeros(n, n);

        // Both triangles get written as the lists already hold each connection in both
        // directions.
        for (i, neighbours) in lists.iter().enumerate() {
            for &j in neighbours {
                matrix[(i, j)] = 1.0;
            }
        }

        matrix
    }

    /// Returns the connected components of the graph, edges taken as undirected.
    ///
    /// Components are listed in discovery order: a breadth-first search is started from every
    /// node not yet visited, in ascending id order.
    ///
    /// # Examples
    ///
    /// ```
    /// use aftershock::graph::Graph;
    ///
    /// let graph = Graph::from_edges([(1, 2), (3, 4), (4, 5)]);
    /// assert_eq!(graph.components(), vec![vec![1, 2], vec![3, 4, 5]]);
    /// ```
    pub fn components(&self) -> Vec<Vec<NodeId>> {
        let ids: Vec<NodeId> = self.node_ids().collect();
        let lists = self.neighbour_lists();

        let mut visited = vec![false; ids.len()];
        let mut components = Vec::new();
        let mut queue = VecDeque::new();

        for start in 0..ids.len() {
            if visited[start] {
                continue;
            }

            visited[start] = true;
            queue.push_back(start);
            let mut component = Vec::new();

            while let Some(v) = queue.pop_front() {
                component.push(ids[v]);

                for &w in &lists[v] {
                    if !visited[w] {
                        visited[w] = true;
                        queue.push_back(w);
                    }
                }
            }

            components.push(component);
        }

        components
    }

    /// Returns the node count of the largest connected component, 0 for an empty graph.
    pub fn largest_component_size(&self) -> usize {
        self.components()
            .iter()
            .map(|component| component.len())
            .max()
            .unwrap_or(0)
    }

    /// Returns the size of the largest connected component divided by the current node count.
    ///
    /// # Examples
    ///
    /// ```
    /// use aftershock::{error::Error, graph::Graph};
    ///
    /// let graph = Graph::from_edges([(1, 2), (2, 3), (4, 5)]);
    /// assert_eq!(graph.largest_component_fraction().unwrap(), 0.6);
    ///
    /// assert!(matches!(Graph::new().largest_component_fraction(), Err(Error::EmptyGraph)));
    /// ```
    pub fn largest_component_fraction(&self) -> Result<f64> {
        if self.is_empty() {
            return Err(Error::EmptyGraph);
        }

        Ok(self.largest_component_size() as f64 / self.vertex_count() as f64)
    }

    /// Writes 1-based component ids onto every node, in [`Graph::components`] order, and returns
    /// the number of components.
    pub fn label_components(&mut self) -> usize {
        let components = self.components();

        for (i, component) in components.iter().enumerate() {
            for id in component {
                if let Some(node) = self.nodes.get_mut(id) {
                    node.component = Some(i + 1);
                }
            }
        }

        components.len()
    }
}
