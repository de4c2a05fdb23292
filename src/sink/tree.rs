// src/sink/tree.rs
use crate::error::{TdmsError, Result};
use crate::sink::{StructureSink, Value};

/// One node of a collected structure tree
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element { name: String, children: Vec<Node> },
    Leaf { name: String, value: Value },
}

impl Node {
    pub fn name(&self) -> &str {
        match self {
            Node::Element { name, .. } | Node::Leaf { name, .. } => name,
        }
    }

    pub fn children(&self) -> &[Node] {
        match self {
            Node::Element { children, .. } => children,
            Node::Leaf { .. } => &[],
        }
    }

    pub fn value(&self) -> Option<&Value> {
        match self {
            Node::Leaf { value, .. } => Some(value),
            Node::Element { .. } => None,
        }
    }

    /// First child with the given name
    pub fn child(&self, name: &str) -> Option<&Node> {
        self.children().iter().find(|c| c.name() == name)
    }

    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Node> + 'a {
        self.children().iter().filter(move |c| c.name() == name)
    }

    /// Value of the first leaf child with the given name
    pub fn leaf(&self, name: &str) -> Option<&Value> {
        self.child(name).and_then(Node::value)
    }

    /// Follow a `/`-separated chain of first-match child names
    pub fn find(&self, path: &str) -> Option<&Node> {
        path.split('/')
            .filter(|part| !part.is_empty())
            .try_fold(self, |node, part| node.child(part))
    }
}

/// Collects sink events into a tree of [`Node`]s
#[derive(Debug, Default)]
pub struct TreeSink {
    open: Vec<(String, Vec<Node>)>,
    roots: Vec<Node>,
}

impl TreeSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All top-level nodes; every opened element must be closed
    pub fn into_roots(self) -> Result<Vec<Node>> {
        if let Some((name, _)) = self.open.last() {
            return Err(TdmsError::SinkMisuse(format!("element {} still open", name)));
        }
        Ok(self.roots)
    }

    /// The single top-level node
    pub fn into_root(self) -> Result<Node> {
        let mut roots = self.into_roots()?;
        if roots.len() != 1 {
            return Err(TdmsError::SinkMisuse(format!("expected one root node, found {}", roots.len())));
        }
        Ok(roots.remove(0))
    }

    fn push(&mut self, node: Node) {
        match self.open.last_mut() {
            Some((_, children)) => children.push(node),
            None => self.roots.push(node),
        }
    }
}

impl StructureSink for TreeSink {
    fn enter(&mut self, name: &str) -> Result<()> {
        self.open.push((name.to_string(), Vec::new()));
        Ok(())
    }

    fn record(&mut self, name: &str, value: Value) -> Result<()> {
        self.push(Node::Leaf { name: name.to_string(), value });
        Ok(())
    }

    fn leave(&mut self) -> Result<()> {
        let (name, children) = self
            .open
            .pop()
            .ok_or_else(|| TdmsError::SinkMisuse("leave() without matching enter()".into()))?;
        self.push(Node::Element { name, children });
        Ok(())
    }
}
