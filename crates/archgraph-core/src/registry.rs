//! Idempotent node and edge accumulation.

use std::collections::HashMap;

use crate::model::{Diagram, Edge, Node, NodeKind, Relation};
use crate::options::Granularity;

/// Keep only `[A-Za-z0-9_]`.
pub fn sanitize_id(input: &str) -> String {
    input
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect()
}

/// Derive the node id for `(kind, label)`.
///
/// `kind_label` with spaces, `/` and `:` turned into `_`, then every other
/// character outside `[A-Za-z0-9_]` dropped.
pub fn node_id(kind: NodeKind, label: &str) -> String {
    let raw = format!("{}_{}", kind.as_str(), label);
    let replaced: String = raw
        .chars()
        .map(|c| match c {
            ' ' | '/' | ':' => '_',
            other => other,
        })
        .collect();
    sanitize_id(&replaced)
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct EdgeKey {
    from: String,
    to: String,
    relation: Relation,
    label: String,
}

/// Per-invocation accumulator for nodes and edges.
///
/// Nodes are first-write-wins by id; edges are keyed by their full 4-tuple.
/// Nothing here is ordered: [`GraphRegistry::finish`] sorts.
#[derive(Debug, Default)]
pub struct GraphRegistry {
    nodes: HashMap<String, Node>,
    edges: HashMap<EdgeKey, Edge>,
}

impl GraphRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert the node for `(kind, label)` unless its id exists. Returns the id.
    pub fn ensure_node(&mut self, kind: NodeKind, label: &str, group: &str) -> String {
        let id = node_id(kind, label);
        self.nodes.entry(id.clone()).or_insert_with(|| Node {
            id: id.clone(),
            label: label.to_string(),
            kind,
            group: group.to_string(),
        });
        id
    }

    /// Module nodes are grouped by their top-level directory.
    pub fn ensure_module(&mut self, label: &str) -> String {
        let group = label.split('/').next().unwrap_or(label);
        self.ensure_node(NodeKind::Module, label, group)
    }

    pub fn add_edge(&mut self, from: &str, to: &str, relation: Relation, label: &str) {
        let key = EdgeKey {
            from: from.to_string(),
            to: to.to_string(),
            relation,
            label: label.to_string(),
        };
        let edge = Edge {
            from: key.from.clone(),
            to: key.to.clone(),
            relation,
            label: key.label.clone(),
        };
        self.edges.insert(key, edge);
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Sort and freeze into a [`Diagram`].
    pub fn finish(self, granularity: Granularity, legend: String) -> Diagram {
        let mut nodes: Vec<Node> = self.nodes.into_values().collect();
        nodes.sort_by(|a, b| {
            a.kind
                .as_str()
                .cmp(b.kind.as_str())
                .then_with(|| a.id.cmp(&b.id))
        });

        let mut edges: Vec<(String, Edge)> = self
            .edges
            .into_values()
            .map(|edge| (edge.sort_key(), edge))
            .collect();
        edges.sort_by(|a, b| a.0.cmp(&b.0));

        Diagram {
            granularity,
            nodes,
            edges: edges.into_iter().map(|(_, edge)| edge).collect(),
            legend,
        }
    }
}
