//! Graph Modelling Language.
//!
//! A GML document is a list of `key value` pairs where a value is an integer, a real, a quoted
//! string or a bracketed nested list. The graph lives in the top-level `graph` list, with one
//! `node` list per node and one `edge` list per edge.

use std::fmt::Write;

use tracing::debug;

use super::assemble;
use crate::{
    edge::Edge,
    error::{Error, Result},
    graph::Graph,
    node::{Attribute, Attributes, Node, NodeId, Position},
};

/// Keys holding a node's own fields, unavailable to its attributes.
const NODE_FIELDS: [&str; 5] = ["id", "label", "kind", "graphics", "component"];
/// Keys holding an edge's own fields, unavailable to its attributes.
const EDGE_FIELDS: [&str; 3] = ["source", "target", "weight"];

#[derive(Clone, Debug, PartialEq)]
enum Token {
    Key(String),
    Int(i64),
    Float(f64),
    Str(String),
    Open,
    Close,
}

#[derive(Clone, Debug, PartialEq)]
enum Value {
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<(String, Value)>),
}

fn parse_error(line: usize, message: impl Into<String>) -> Error {
    Error::Parse {
        line,
        message: message.into(),
    }
}

fn tokenize(text: &str) -> Result<Vec<(Token, usize)>> {
    let mut tokens = Vec::new();
    let mut chars = text.chars().peekable();
    let mut line = 1;

    while let Some(&c) = chars.peek() {
        match c {
            '\n' => {
                line += 1;
                chars.next();
            }
            c if c.is_whitespace() => {
                chars.next();
            }
            '#' => {
                while chars.next_if(|&c| c != '\n').is_some() {}
            }
            '[' => {
                chars.next();
                tokens.push((Token::Open, line));
            }
            ']' => {
                chars.next();
                tokens.push((Token::Close, line));
            }
            '"' => {
                chars.next();
                let start = line;
                let mut raw = String::new();

                loop {
                    match chars.next() {
                        Some('"') => break,
                        Some(c) => {
                            if c == '\n' {
                                line += 1;
                            }
                            raw.push(c);
                        }
                        None => return Err(parse_error(start, "unterminated string")),
                    }
                }

                tokens.push((Token::Str(unescape(&raw)), start));
            }
            c if c.is_ascii_alphabetic() || c == '_' => {
                let mut key = String::new();
                while let Some(c) = chars.next_if(|c| c.is_ascii_alphanumeric() || *c == '_') {
                    key.push(c);
                }

                tokens.push((Token::Key(key), line));
            }
            c if c.is_ascii_digit() || matches!(c, '-' | '+' | '.') => {
                let mut number = String::new();
                while let Some(c) =
                    chars.next_if(|c| c.is_ascii_alphanumeric() || matches!(*c, '-' | '+' | '.'))
                {
                    number.push(c);
                }

                let token = match number.parse::<i64>() {
                    Ok(int) => Token::Int(int),
                    Err(_) => number
                        .parse::<f64>()
                        .map(Token::Float)
                        .map_err(|_| parse_error(line, format!("invalid number {number:?}")))?,
                };
                tokens.push((token, line));
            }
            other => return Err(parse_error(line, format!("unexpected character {other:?}"))),
        }
    }

    Ok(tokens)
}

struct Parser {
    tokens: std::vec::IntoIter<(Token, usize)>,
    line: usize,
}

impl Parser {
    fn next(&mut self) -> Option<Token> {
        self.tokens.next().map(|(token, line)| {
            self.line = line;
            token
        })
    }

    /// Parses `key value` pairs until the closing bracket of a nested list, or the end of input
    /// at the top level.
    fn list(&mut self, nested: bool) -> Result<Vec<(String, Value)>> {
        let mut entries = Vec::new();

        loop {
            match self.next() {
                None if nested => return Err(parse_error(self.line, "unclosed list")),
                None => return Ok(entries),
                Some(Token::Close) if nested => return Ok(entries),
                Some(Token::Key(key)) => {
                    let value = self.value()?;
                    entries.push((key, value));
                }
                Some(token) => {
                    return Err(parse_error(self.line, format!("expected a key, found {token:?}")))
                }
            }
        }
    }

    fn value(&mut self) -> Result<Value> {
        match self.next() {
            Some(Token::Int(int)) => Ok(Value::Int(int)),
            Some(Token::Float(float)) => Ok(Value::Float(float)),
            Some(Token::Str(s)) => Ok(Value::Str(s)),
            Some(Token::Open) => Ok(Value::List(self.list(true)?)),
            // Bare `inf` and `NAN` lex as keys.
            Some(Token::Key(key)) => key
                .parse::<f64>()
                .map(Value::Float)
                .map_err(|_| parse_error(self.line, format!("expected a value, found {key:?}"))),
            Some(Token::Close) => Err(parse_error(self.line, "expected a value, found ']'")),
            None => Err(parse_error(self.line, "expected a value, found end of input")),
        }
    }
}

fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;

    while let Some(at) = rest.find('&') {
        out.push_str(&rest[..at]);
        rest = &rest[at..];

        if let Some(tail) = rest.strip_prefix("&quot;") {
            out.push('"');
            rest = tail;
        } else if let Some(tail) = rest.strip_prefix("&amp;") {
            out.push('&');
            rest = tail;
        } else {
            out.push('&');
            rest = &rest[1..];
        }
    }

    out.push_str(rest);
    out
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;").replace('"', "&quot;")
}

fn as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Int(int) => Some(*int as f64),
        Value::Float(float) => Some(*float),
        _ => None,
    }
}

fn as_id(value: &Value, what: &str) -> Result<NodeId> {
    match value {
        Value::Int(int) if *int >= 0 => Ok(*int as NodeId),
        other => Err(Error::Malformed(format!("invalid {what} {other:?}"))),
    }
}

/// Keeps scalar values as attributes, nested lists have no attribute representation.
fn insert_attribute(attributes: &mut Attributes, key: &str, value: Value) {
    let attribute = match value {
        Value::Int(int) => Attribute::Int(int),
        Value::Float(float) => Attribute::Float(float),
        Value::Str(s) => Attribute::Text(s),
        Value::List(_) => {
            debug!(key = %key, "skipping nested GML attribute");
            return;
        }
    };

    attributes.insert(key.to_owned(), attribute);
}

fn decode_node(entries: Vec<(String, Value)>) -> Result<Node> {
    let mut id = None;
    let mut node = Node::new(0);

    for (key, value) in entries {
        match (key.as_str(), value) {
            ("id", value) => id = Some(as_id(&value, "node id")?),
            ("label", Value::Str(label)) => node.label = Some(label),
            ("kind", Value::Str(kind)) => node.kind = kind.parse()?,
            ("component", Value::Int(component)) if component >= 0 => {
                node.component = Some(component as usize)
            }
            ("graphics", Value::List(graphics)) => {
                let coordinate = |axis: &str| {
                    graphics
                        .iter()
                        .find(|(key, _)| key == axis)
                        .and_then(|(_, value)| as_f64(value))
                };

                if let (Some(x), Some(y)) = (coordinate("x"), coordinate("y")) {
                    node.position = Some(Position { x, y });
                }
            }
            ("label" | "kind" | "component", value) => {
                return Err(Error::Malformed(format!("invalid node {key} {value:?}")))
            }
            (_, value) => insert_attribute(&mut node.attributes, &key, value),
        }
    }

    let id = id.ok_or_else(|| Error::Malformed("node without an id".to_owned()))?;

    let mut decoded = Node::new(id).with_kind(node.kind);
    decoded.label = node.label;
    decoded.position = node.position;
    decoded.component = node.component;
    decoded.attributes = node.attributes;
    Ok(decoded)
}

fn decode_edge(entries: Vec<(String, Value)>) -> Result<Edge> {
    let (mut source, mut target, mut weight) = (None, None, None);
    let mut attributes = Attributes::new();

    for (key, value) in entries {
        match key.as_str() {
            "source" => source = Some(as_id(&value, "edge source")?),
            "target" => target = Some(as_id(&value, "edge target")?),
            "weight" => {
                weight = Some(as_f64(&value).ok_or_else(|| {
                    Error::Malformed(format!("invalid edge weight {value:?}"))
                })?)
            }
            _ => insert_attribute(&mut attributes, &key, value),
        }
    }

    let (Some(source), Some(target)) = (source, target) else {
        return Err(Error::Malformed("edge without a source or target".to_owned()));
    };

    let mut edge = Edge::new(source, target);
    edge.weight = weight;
    edge.attributes = attributes;
    Ok(edge)
}

pub(super) fn parse(text: &str) -> Result<Graph> {
    let mut parser = Parser {
        tokens: tokenize(text)?.into_iter(),
        line: 1,
    };
    let document = parser.list(false)?;

    let entries = document
        .into_iter()
        .find_map(|(key, value)| match value {
            Value::List(entries) if key == "graph" => Some(entries),
            _ => None,
        })
        .ok_or_else(|| Error::Malformed("no graph list".to_owned()))?;

    let mut directed = false;
    let mut nodes = Vec::new();
    let mut edges = Vec::new();

    for (key, value) in entries {
        match (key.as_str(), value) {
            ("directed", Value::Int(flag)) => directed = flag != 0,
            ("node", Value::List(entries)) => nodes.push(decode_node(entries)?),
            ("edge", Value::List(entries)) => edges.push(decode_edge(entries)?),
            ("node" | "edge", value) => {
                return Err(Error::Malformed(format!("{key} must be a list, found {value:?}")))
            }
            _ => debug!(key = %key, "ignoring GML graph attribute"),
        }
    }

    assemble(directed, nodes, edges)
}

fn is_key(key: &str) -> bool {
    let mut chars = key.chars();

    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn render_attributes(
    out: &mut String,
    attributes: &Attributes,
    reserved: &[&str],
    indent: &str,
) -> Result<()> {
    for (key, value) in attributes {
        if !is_key(key) {
            return Err(Error::Malformed(format!(
                "attribute key {key:?} can't be written as GML"
            )));
        }
        if reserved.contains(&key.as_str()) {
            return Err(Error::Malformed(format!(
                "attribute key {key:?} clashes with a GML field"
            )));
        }

        // Writing to a `String` can't fail.
        let _ = match value {
            Attribute::Int(int) => writeln!(out, "{indent}{key} {int}"),
            Attribute::Float(float) => writeln!(out, "{indent}{key} {float:?}"),
            Attribute::Text(s) => writeln!(out, "{indent}{key} \"{}\"", escape(s)),
        };
    }

    Ok(())
}

pub(super) fn render(graph: &Graph) -> Result<String> {
    let mut out = String::new();

    // Writing to a `String` can't fail, the `writeln!` results are ignored throughout.
    let _ = writeln!(out, "graph [");
    let _ = writeln!(out, "  directed {}", u8::from(graph.is_directed()));

    for node in graph.nodes() {
        let _ = writeln!(out, "  node [");
        let _ = writeln!(out, "    id {}", node.id());
        if let Some(label) = &node.label {
            let _ = writeln!(out, "    label \"{}\"", escape(label));
        }
        if node.kind != Default::default() {
            let _ = writeln!(out, "    kind \"{}\"", node.kind);
        }
        if let Some(Position { x, y }) = node.position {
            let _ = writeln!(out, "    graphics [\n      x {x:?}\n      y {y:?}\n    ]");
        }
        if let Some(component) = node.component {
            let _ = writeln!(out, "    component {component}");
        }
        render_attributes(&mut out, &node.attributes, &NODE_FIELDS, "    ")?;
        let _ = writeln!(out, "  ]");
    }

    for edge in graph.edges() {
        let _ = writeln!(out, "  edge [");
        let _ = writeln!(out, "    source {}", edge.source());
        let _ = writeln!(out, "    target {}", edge.target());
        if let Some(weight) = edge.weight {
            let _ = writeln!(out, "    weight {weight:?}");
        }
        render_attributes(&mut out, &edge.attributes, &EDGE_FIELDS, "    ")?;
        let _ = writeln!(out, "  ]");
    }

    let _ = writeln!(out, "]");
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::NodeKind;

    fn graph_of(ids: &[NodeId]) -> Graph {
        let mut graph = Graph::new();
        for &id in ids {
            graph.insert_node(Node::new(id));
        }
        graph
    }

    const NETWORKX: &str = r#"graph [
  # written by hand, laid out like networkx output
  directed 0
  name "sample"
  node [
    id 1
    label "Ccorca"
    kind "community"
    population 2410
    graphics [
      x -72.059167
      y -13.584722
    ]
  ]
  node [
    id 2
    label "W1"
    kind "warehouse"
    capacity 1.5e3
  ]
  edge [
    source 1
    target 2
    weight 10
  ]
]
"#;

    #[test]
    fn tokenize_values() {
        let tokens: Vec<Token> = tokenize("a 1 b -2.5 c \"x &quot;y&quot;\" d [ ] e 1e3")
            .unwrap()
            .into_iter()
            .map(|(token, _)| token)
            .collect();

        assert_eq!(
            tokens,
            vec![
                Token::Key("a".into()),
                Token::Int(1),
                Token::Key("b".into()),
                Token::Float(-2.5),
                Token::Key("c".into()),
                Token::Str("x \"y\"".into()),
                Token::Key("d".into()),
                Token::Open,
                Token::Close,
                Token::Key("e".into()),
                Token::Float(1000.0),
            ]
        );
    }

    #[test]
    fn parse_document() {
        let graph = parse(NETWORKX).unwrap();

        assert!(!graph.is_directed());
        assert_eq!(graph.vertex_count(), 2);

        let community = graph.node(1).unwrap();
        assert_eq!(community.label.as_deref(), Some("Ccorca"));
        assert_eq!(community.kind, NodeKind::Community);
        assert_eq!(
            community.position,
            Some(Position {
                x: -72.059167,
                y: -13.584722
            })
        );
        assert_eq!(community.attributes["population"], Attribute::Int(2410));

        let warehouse = graph.node(2).unwrap();
        assert_eq!(warehouse.attributes["capacity"], Attribute::Float(1500.0));

        assert_eq!(graph.edges(), &[Edge::weighted(1, 2, 10.0)]);
    }

    #[test]
    fn unescape_entities() {
        assert_eq!(unescape("a &amp;quot; b"), "a &quot; b");
        assert_eq!(unescape("&quot;&amp;&"), "\"&&");
        assert_eq!(unescape(&escape("\"&amp;\"")), "\"&amp;\"");
    }

    #[test]
    fn syntax_errors_carry_lines() {
        assert!(matches!(
            parse("graph [\n  node [\n    id 1\n"),
            Err(Error::Parse { line: 3, .. })
        ));
        assert!(matches!(
            parse("graph [\n  label \"open\n]"),
            Err(Error::Parse { line: 2, .. })
        ));
        assert!(matches!(
            parse("graph [\n  node [ id ]\n]"),
            Err(Error::Parse { line: 2, .. })
        ));
        assert!(matches!(parse("graph [ ] ]"), Err(Error::Parse { .. })));
        assert!(matches!(parse("graph [ x @ ]"), Err(Error::Parse { .. })));
    }

    #[test]
    fn missing_required_fields() {
        assert!(matches!(parse("directed 0"), Err(Error::Malformed(_))));
        assert!(matches!(
            parse("graph [ node [ label \"no id\" ] ]"),
            Err(Error::Malformed(_))
        ));
        assert!(matches!(
            parse("graph [ node [ id 1 ] edge [ source 1 ] ]"),
            Err(Error::Malformed(_))
        ));
        assert!(matches!(
            parse("graph [ node [ id -1 ] ]"),
            Err(Error::Malformed(_))
        ));
        assert!(matches!(
            parse("graph [ node [ id 1 kind \"hospital\" ] ]"),
            Err(Error::Malformed(_))
        ));
    }

    #[test]
    fn render_skips_defaults() {
        let out = render(&Graph::from_edges([(1, 2)])).unwrap();

        assert_eq!(
            out,
            "graph [\n  directed 0\n  node [\n    id 1\n  ]\n  node [\n    id 2\n  ]\n  edge [\n    source 1\n    target 2\n  ]\n]\n"
        );
    }

    #[test]
    fn render_rejects_bad_keys() {
        let mut graph = Graph::new();
        graph.insert_node(Node::new(1).with_attribute("two words", Attribute::Int(1)));

        assert!(matches!(render(&graph), Err(Error::Malformed(_))));
    }

    #[test]
    fn reserved_attribute_keys() {
        for key in NODE_FIELDS {
            let mut graph = Graph::new();
            graph.insert_node(Node::new(1).with_attribute(key, Attribute::Int(99)));

            assert!(matches!(render(&graph), Err(Error::Malformed(_))), "node {key}");
        }

        for key in EDGE_FIELDS {
            let mut graph = graph_of(&[1, 2]);
            graph
                .insert_edge(Edge::new(1, 2).with_attribute(key, Attribute::Float(3.5)))
                .unwrap();

            assert!(matches!(render(&graph), Err(Error::Malformed(_))), "edge {key}");
        }
    }

    #[test]
    fn field_names_of_the_other_element_are_free() {
        let mut graph = Graph::new();
        graph.insert_node(Node::new(1).with_attribute("weight", Attribute::Float(3.5)));
        graph.insert_node(Node::new(2));
        graph
            .insert_edge(Edge::new(1, 2).with_attribute("label", Attribute::Text("road".into())))
            .unwrap();

        assert_eq!(parse(&render(&graph).unwrap()).unwrap(), graph);
    }

    #[test]
    fn component_zero() {
        let mut graph = Graph::new();
        let mut node = Node::new(1);
        node.component = Some(0);
        graph.insert_node(node);

        let parsed = parse(&render(&graph).unwrap()).unwrap();
        assert_eq!(parsed.node(1).unwrap().component, Some(0));

        assert!(matches!(
            parse("graph [ node [ id 1 component -1 ] ]"),
            Err(Error::Malformed(_))
        ));
    }

    #[test]
    fn float_attributes_stay_floats() {
        let mut graph = Graph::new();
        graph.insert_node(Node::new(1).with_attribute("score", Attribute::Float(2.0)));

        let parsed = parse(&render(&graph).unwrap()).unwrap();
        assert_eq!(parsed.node(1).unwrap().attributes["score"], Attribute::Float(2.0));
    }
}
