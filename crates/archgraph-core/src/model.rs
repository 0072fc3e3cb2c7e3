//! Engine inputs and the finalized diagram.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use strum_macros::{Display, IntoStaticStr};

use crate::options::Granularity;

/// One import statement, already extracted and normalized by the scanner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportFact {
    /// POSIX-relative path of the importing file.
    pub source_file: String,
    /// The specifier exactly as written (`./util`, `react`, `github.com/x/y`).
    pub raw_specifier: String,
    pub is_internal: bool,
    /// Internal file the specifier resolved to, when resolution succeeded.
    #[serde(default)]
    pub resolved_internal_path: Option<String>,
}

impl ImportFact {
    pub fn external(source_file: impl Into<String>, specifier: impl Into<String>) -> Self {
        Self {
            source_file: source_file.into(),
            raw_specifier: specifier.into(),
            is_internal: false,
            resolved_internal_path: None,
        }
    }

    pub fn internal(
        source_file: impl Into<String>,
        specifier: impl Into<String>,
        resolved: Option<&str>,
    ) -> Self {
        Self {
            source_file: source_file.into(),
            raw_specifier: specifier.into(),
            is_internal: true,
            resolved_internal_path: resolved.map(str::to_string),
        }
    }
}

/// Everything the engine reads. Owned by the caller and never mutated.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DiagramInput {
    pub rel_paths: Vec<String>,
    pub file_contents: HashMap<String, String>,
    pub imports: Vec<ImportFact>,
    pub external_dependency_counts: HashMap<String, usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[derive(Display, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Module,
    External,
    Datasource,
    Endpoint,
    Main,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        (*self).into()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[derive(Display, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Relation {
    Imports,
    Uses,
    Serves,
}

impl Relation {
    pub fn as_str(&self) -> &'static str {
        (*self).into()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Node {
    pub id: String,
    pub label: String,
    pub kind: NodeKind,
    pub group: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Edge {
    pub from: String,
    pub to: String,
    pub relation: Relation,
    pub label: String,
}

impl Edge {
    /// Rendering order key: `from|to|relation|label`.
    pub fn sort_key(&self) -> String {
        format!(
            "{}|{}|{}|{}",
            self.from,
            self.to,
            self.relation.as_str(),
            self.label
        )
    }
}

/// The finalized, deterministically ordered architecture graph.
///
/// Nodes are sorted by `(kind, id)` and edges by [`Edge::sort_key`]; two
/// diagrams built from the same inputs compare equal regardless of the order
/// the inputs were presented in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagram {
    pub granularity: Granularity,
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    pub legend: String,
}

impl Diagram {
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn nodes_of_kind(&self, kind: NodeKind) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter(move |n| n.kind == kind)
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_and_relation_names() {
        assert_eq!(NodeKind::Datasource.as_str(), "datasource");
        assert_eq!(NodeKind::Main.to_string(), "main");
        assert_eq!(Relation::Serves.as_str(), "serves");
    }

    #[test]
    fn edge_sort_key_joins_all_fields() {
        let edge = Edge {
            from: "module_src_api".into(),
            to: "datasource_fs".into(),
            relation: Relation::Uses,
            label: "reads".into(),
        };
        assert_eq!(edge.sort_key(), "module_src_api|datasource_fs|uses|reads");
    }

    #[test]
    fn import_fact_constructors() {
        let fact = ImportFact::internal("src/a.ts", "./b", Some("src/b.ts"));
        assert!(fact.is_internal);
        assert_eq!(fact.resolved_internal_path.as_deref(), Some("src/b.ts"));

        let fact = ImportFact::external("src/a.ts", "react");
        assert!(!fact.is_internal);
        assert_eq!(fact.resolved_internal_path, None);
    }
}
