//! A module for working with edges.

use crate::node::{Attribute, Attributes, NodeId};

/// A pair of node ids representing a graph edge. Whether the `source`-`target` order matters is
/// decided by the owning graph.
#[derive(Clone, Debug, PartialEq)]
pub struct Edge {
    source: NodeId,
    target: NodeId,
    /// A distance or connectivity strength, carried through persistence untouched.
    pub weight: Option<f64>,
    pub attributes: Attributes,
}

impl Edge {
    /// Creates a new unweighted edge between two nodes.
    ///
    /// # Examples
    ///
    /// ```
    /// use aftershock::edge::Edge;
    ///
    /// let edge = Edge::new(1, 2);
    /// assert_eq!(edge.weight, None);
    /// ```
    pub fn new(source: NodeId, target: NodeId) -> Self {
        Self {
            source,
            target,
            weight: None,
            attributes: Attributes::new(),
        }
    }

    /// Creates a new weighted edge between two nodes.
    pub fn weighted(source: NodeId, target: NodeId, weight: f64) -> Self {
        Self {
            weight: Some(weight),
            ..Self::new(source, target)
        }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: Attribute) -> Self {
        self.attributes.insert(key.into(), value);
        self
    }

    /// Returns the first node forming the edge.
    ///
    /// # Examples
    ///
    /// ```
    /// use aftershock::edge::Edge;
    ///
    /// let edge = Edge::new(1, 2);
    /// assert_eq!(edge.source(), 1);
    /// ```
    pub fn source(&self) -> NodeId {
        self.source
    }

    /// Returns the second node forming the edge.
    ///
    /// # Examples
    ///
    /// ```
    /// use aftershock::edge::Edge;
    ///
    /// let edge = Edge::new(1, 2);
    /// assert_eq!(edge.target(), 2);
    /// ```
    pub fn target(&self) -> NodeId {
        self.target
    }

    /// Returns whether the edge is incident to the given node.
    ///
    /// # Examples
    ///
    /// ```
    /// use aftershock::edge::Edge;
    ///
    /// let edge = Edge::new(1, 2);
    ///
    /// assert_eq!(edge.contains(1), true);
    /// assert_eq!(edge.contains(2), true);
    /// assert_eq!(edge.contains(3), false);
    /// ```
    pub fn contains(&self, node: NodeId) -> bool {
        self.source == node || self.target == node
    }

    /// Returns whether the edge starts and ends at the same node.
    pub fn is_loop(&self) -> bool {
        self.source == self.target
    }

    /// Returns the endpoints identifying this edge. For undirected graphs the pair is sorted so
    /// (a, b) and (b, a) map to the same key.
    pub fn key(&self, directed: bool) -> (NodeId, NodeId) {
        if directed || self.source <= self.target {
            (self.source, self.target)
        } else {
            (self.target, self.source)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new() {
        let (source, target) = (1, 2);

        assert_eq!(
            Edge::new(source, target),
            Edge {
                source,
                target,
                weight: None,
                attributes: Attributes::new()
            }
        )
    }

    #[test]
    fn weighted() {
        let edge = Edge::weighted(1, 2, 12.5);

        assert_eq!(edge.weight, Some(12.5));
        assert_eq!(edge.source(), 1);
        assert_eq!(edge.target(), 2);
    }

    #[test]
    fn contains() {
        let edge = Edge::new(1, 2);

        assert!(edge.contains(1));
        assert!(edge.contains(2));
        assert!(!edge.contains(3));
    }

    #[test]
    fn is_loop() {
        assert!(Edge::new(4, 4).is_loop());
        assert!(!Edge::new(4, 5).is_loop());
    }

    #[test]
    fn key() {
        let (ab, ba) = (Edge::new(1, 2), Edge::new(2, 1));

        // Undirected keys ignore the orientation.
        assert_eq!(ab.key(false), ba.key(false));
        // Directed keys don't.
        assert_ne!(ab.key(true), ba.key(true));
    }
}
