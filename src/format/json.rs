//! JSON node-link documents.

use serde::{Deserialize, Serialize};

use super::assemble;
use crate::{
    edge::Edge,
    error::Result,
    graph::Graph,
    node::{Attributes, Node, NodeId, NodeKind, Position},
};

#[derive(Debug, Serialize, Deserialize)]
struct Document {
    #[serde(default)]
    directed: bool,
    nodes: Vec<NodeRecord>,
    #[serde(default)]
    edges: Vec<EdgeRecord>,
}

#[derive(Debug, Serialize, Deserialize)]
struct NodeRecord {
    id: NodeId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    label: Option<String>,
    #[serde(default)]
    kind: NodeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    position: Option<Position>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    component: Option<usize>,
    #[serde(default, skip_serializing_if = "Attributes::is_empty")]
    attributes: Attributes,
}

#[derive(Debug, Serialize, Deserialize)]
struct EdgeRecord {
    source: NodeId,
    target: NodeId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Attributes::is_empty")]
    attributes: Attributes,
}

impl From<&Node> for NodeRecord {
    fn from(node: &Node) -> Self {
        Self {
            id: node.id(),
            label: node.label.clone(),
            kind: node.kind,
            position: node.position,
            component: node.component,
            attributes: node.attributes.clone(),
        }
    }
}

impl From<NodeRecord> for Node {
    fn from(record: NodeRecord) -> Self {
        let mut node = Node::new(record.id).with_kind(record.kind);
        node.label = record.label;
        node.position = record.position;
        node.component = record.component;
        node.attributes = record.attributes;
        node
    }
}

impl From<&Edge> for EdgeRecord {
    fn from(edge: &Edge) -> Self {
        Self {
            source: edge.source(),
            target: edge.target(),
            weight: edge.weight,
            attributes: edge.attributes.clone(),
        }
    }
}

impl From<EdgeRecord> for Edge {
    fn from(record: EdgeRecord) -> Self {
        let mut edge = Edge::new(record.source, record.target);
        edge.weight = record.weight;
        edge.attributes = record.attributes;
        edge
    }
}

pub(super) fn parse(text: &str) -> Result<Graph> {
    let document: Document = serde_json::from_str(text)?;

    assemble(
        document.directed,
        document.nodes.into_iter().map(Node::from).collect(),
        document.edges.into_iter().map(Edge::from).collect(),
    )
}

pub(super) fn render(graph: &Graph) -> Result<String> {
    let document = Document {
        directed: graph.is_directed(),
        nodes: graph.nodes().map(NodeRecord::from).collect(),
        edges: graph.edges().iter().map(EdgeRecord::from).collect(),
    };

    Ok(serde_json::to_string_pretty(&document)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn minimal_document() {
        let graph = parse(r#"{"nodes": [{"id": 1}, {"id": 2, "kind": "backup"}], "edges": [{"source": 1, "target": 2}]}"#)
            .unwrap();

        assert!(!graph.is_directed());
        assert_eq!(graph.node(2).unwrap().kind, NodeKind::Backup);
        assert_eq!(graph.edges(), &[Edge::new(1, 2)]);
    }

    #[test]
    fn missing_required_fields() {
        assert!(matches!(parse(r#"{"edges": []}"#), Err(Error::Json(_))));
        assert!(matches!(
            parse(r#"{"nodes": [{"label": "no id"}]}"#),
            Err(Error::Json(_))
        ));
        assert!(matches!(
            parse(r#"{"nodes": [{"id": 1}], "edges": [{"source": 1}]}"#),
            Err(Error::Json(_))
        ));
    }

    #[test]
    fn unknown_kind() {
        assert!(matches!(
            parse(r#"{"nodes": [{"id": 1, "kind": "hospital"}]}"#),
            Err(Error::Json(_))
        ));
    }

    #[test]
    fn dangling_edge() {
        assert!(matches!(
            parse(r#"{"nodes": [{"id": 1}], "edges": [{"source": 1, "target": 4}]}"#),
            Err(Error::Malformed(_))
        ));
    }
}
