//! A module for loading and persisting graphs.
//!
//! Two interchange formats are supported, picked by file extension: GML (`.gml`), as written by
//! networkx and most graph tools, and a JSON node-link document (`.json`).

use std::{fs, path::Path};

use crate::{
    edge::Edge,
    error::{Error, Result},
    graph::Graph,
    node::Node,
};

mod gml;
mod json;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    Gml,
    Json,
}

impl Format {
    /// Picks the format from the file extension.
    ///
    /// # Examples
    ///
    /// ```
    /// use aftershock::format::Format;
    ///
    /// assert_eq!(Format::from_path("network.GML").unwrap(), Format::Gml);
    /// assert_eq!(Format::from_path("out/network.json").unwrap(), Format::Json);
    /// assert!(Format::from_path("network.csv").is_err());
    /// ```
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|extension| extension.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("gml") => Ok(Self::Gml),
            Some("json") => Ok(Self::Json),
            _ => Err(Error::UnsupportedFormat(path.to_path_buf())),
        }
    }

    pub fn parse(&self, text: &str) -> Result<Graph> {
        match self {
            Self::Gml => gml::parse(text),
            Self::Json => json::parse(text),
        }
    }

    pub fn render(&self, graph: &Graph) -> Result<String> {
        match self {
            Self::Gml => gml::render(graph),
            Self::Json => json::render(graph),
        }
    }
}

/// Reads a graph from a file.
pub fn load(path: impl AsRef<Path>) -> Result<Graph> {
    let path = path.as_ref();
    let format = Format::from_path(path)?;

    format.parse(&fs::read_to_string(path)?)
}

/// Writes a graph to a file, replacing any previous contents.
pub fn persist(graph: &Graph, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let format = Format::from_path(path)?;

    fs::write(path, format.render(graph)?)?;
    Ok(())
}

/// Builds a graph from decoded nodes and edges, rejecting duplicates and dangling endpoints.
fn assemble(directed: bool, nodes: Vec<Node>, edges: Vec<Edge>) -> Result<Graph> {
    let mut graph = if directed {
        Graph::new_directed()
    } else {
        Graph::new()
    };

    for node in nodes {
        let id = node.id();
        if !graph.insert_node(node) {
            return Err(Error::Malformed(format!("duplicate node id {id}")));
        }
    }

    for edge in edges {
        let (source, target) = (edge.source(), edge.target());

        match graph.insert_edge(edge) {
            Ok(true) => {}
            Ok(false) => {
                return Err(Error::Malformed(format!(
                    "duplicate edge {source} - {target}"
                )))
            }
            Err(Error::NotFound(id)) => {
                return Err(Error::Malformed(format!(
                    "edge {source} - {target} references unknown node {id}"
                )))
            }
            Err(e) => return Err(e),
        }
    }

    Ok(graph)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        fixtures::sample_network,
        node::{Attribute, NodeKind},
    };

    /// A graph exercising every attribute the formats carry.
    fn attributed() -> Graph {
        let mut graph = Graph::new_directed();
        graph.insert_node(
            Node::new(1)
                .with_label("Cusco \"centro\" & co")
                .with_kind(NodeKind::Community)
                .with_position(-71.976667, -13.519167)
                .with_attribute("population", Attribute::Int(119_148))
                .with_attribute("altitude", Attribute::Float(3439.0)),
        );
        graph.insert_node(Node::new(2).with_kind(NodeKind::Warehouse));
        let mut backup = Node::new(3).with_kind(NodeKind::Backup);
        backup.component = Some(2);
        graph.insert_node(backup);

        graph
            .insert_edge(Edge::weighted(1, 2, 12.5).with_attribute("road", Attribute::Text("PE-3S".into())))
            .unwrap();
        graph.insert_edge(Edge::weighted(2, 3, 8.0)).unwrap();
        graph.insert_edge(Edge::new(3, 1)).unwrap();

        graph
    }

    #[test]
    fn round_trip() {
        let dir = tempfile::tempdir().unwrap();

        for name in ["network.gml", "network.json"] {
            let path = dir.path().join(name);

            for graph in [sample_network(), attributed()] {
                persist(&graph, &path).unwrap();
                assert_eq!(load(&path).unwrap(), graph, "{name}");
            }
        }
    }

    #[test]
    fn unsupported_extension() {
        let dir = tempfile::tempdir().unwrap();

        assert!(matches!(
            persist(&sample_network(), dir.path().join("network.csv")),
            Err(Error::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn missing_file() {
        assert!(matches!(
            load("definitely/not/here.gml"),
            Err(Error::Io(_))
        ));
    }

    #[test]
    fn assemble_rejects_duplicates() {
        assert!(matches!(
            assemble(false, vec![Node::new(1), Node::new(1)], vec![]),
            Err(Error::Malformed(_))
        ));
        assert!(matches!(
            assemble(
                false,
                vec![Node::new(1), Node::new(2)],
                vec![Edge::new(1, 2), Edge::new(2, 1)]
            ),
            Err(Error::Malformed(_))
        ));
        assert!(matches!(
            assemble(false, vec![Node::new(1)], vec![Edge::new(1, 2)]),
            Err(Error::Malformed(_))
        ));
    }
}
