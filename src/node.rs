//! A module for working with nodes and their attributes.

use std::{collections::BTreeMap, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Node identifiers, stable for the lifetime of a graph.
pub type NodeId = u64;

/// Extra attributes carried by nodes and edges, kept in key order so persisted output is stable.
pub type Attributes = BTreeMap<String, Attribute>;

/// A scalar attribute value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Attribute {
    Int(i64),
    Float(f64),
    Text(String),
}

/// The role a node plays in the logistics network.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Community,
    Warehouse,
    Backup,
    #[default]
    Generic,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Community => "community",
            Self::Warehouse => "warehouse",
            Self::Backup => "backup",
            Self::Generic => "generic",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NodeKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "community" => Ok(Self::Community),
            "warehouse" => Ok(Self::Warehouse),
            "backup" => Ok(Self::Backup),
            "generic" => Ok(Self::Generic),
            other => Err(Error::Malformed(format!("unknown node kind {other:?}"))),
        }
    }
}

/// A planar position, only used for laying out rendered reports.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// A vertex of the network.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    id: NodeId,
    pub label: Option<String>,
    pub kind: NodeKind,
    pub position: Option<Position>,
    /// The connected component the node belonged to when the graph was last fractured.
    pub component: Option<usize>,
    pub attributes: Attributes,
}

impl Node {
    /// Creates a generic node with no label, position or attributes.
    ///
    /// # Examples
    ///
    /// ```
    /// use aftershock::node::{Node, NodeKind};
    ///
    /// let node = Node::new(7).with_kind(NodeKind::Warehouse);
    /// assert_eq!(node.id(), 7);
    /// assert_eq!(node.component, None);
    /// ```
    pub fn new(id: NodeId) -> Self {
        Self {
            id,
            label: None,
            kind: NodeKind::default(),
            position: None,
            component: None,
            attributes: Attributes::new(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_kind(mut self, kind: NodeKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_position(mut self, x: f64, y: f64) -> Self {
        self.position = Some(Position { x, y });
        self
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: Attribute) -> Self {
        self.attributes.insert(key.into(), value);
        self
    }

    pub fn id(&self) -> NodeId {
        self.id
    }
}
