//! Indented arrow-text rendering.

use std::fmt::Write;

use archgraph_core::{Diagram, Relation};

use crate::notation::{arrow_for, display_label};

/// Render the legend followed by one line per edge.
///
/// ```text
/// [src/api] --> [src/store]
/// (GET /users) --> [src/api]
/// [src/store] ..> [db:postgres] <<reads/writes>>
/// ```
pub fn render_arrow_text(diagram: &Diagram) -> String {
    let mut output = String::with_capacity(diagram.legend.len() + diagram.edges.len() * 48);
    output.push_str(&diagram.legend);
    output.push('\n');

    for edge in &diagram.edges {
        let from = display_label(diagram, &edge.from);
        let to = display_label(diagram, &edge.to);
        let arrow = arrow_for(edge.relation);
        if edge.relation == Relation::Uses && !edge.label.is_empty() {
            let _ = writeln!(output, "{from} {arrow} {to} <<{}>>", edge.label);
        } else {
            let _ = writeln!(output, "{from} {arrow} {to}");
        }
    }

    tracing::trace!(lines = diagram.edges.len(), "rendered arrow text");
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use archgraph_core::{Edge, Granularity, Node, NodeKind};

    fn node(id: &str, label: &str, kind: NodeKind) -> Node {
        Node {
            id: id.to_string(),
            label: label.to_string(),
            kind,
            group: String::new(),
        }
    }

    fn edge(from: &str, to: &str, relation: Relation, label: &str) -> Edge {
        Edge {
            from: from.to_string(),
            to: to.to_string(),
            relation,
            label: label.to_string(),
        }
    }

    #[test]
    fn uses_edges_without_label_have_no_annotation() {
        let diagram = Diagram {
            granularity: Granularity::Module,
            nodes: vec![
                node("datasource_fs", "fs", NodeKind::Datasource),
                node("module_web", "web", NodeKind::Module),
            ],
            edges: vec![
                edge("module_web", "datasource_fs", Relation::Uses, ""),
                edge("module_web", "datasource_fs", Relation::Uses, "reads"),
            ],
            legend: "Legend".to_string(),
        };
        assert_eq!(
            render_arrow_text(&diagram),
            "Legend\n[web] ..> [fs]\n[web] ..> [fs] <<reads>>\n"
        );
    }

    #[test]
    fn endpoints_keep_their_parentheses() {
        let diagram = Diagram {
            granularity: Granularity::Module,
            nodes: vec![
                node("endpoint_GET__users", "(GET /users)", NodeKind::Endpoint),
                node("module_web", "web", NodeKind::Module),
            ],
            edges: vec![edge("endpoint_GET__users", "module_web", Relation::Serves, "")],
            legend: "Legend".to_string(),
        };
        assert_eq!(render_arrow_text(&diagram), "Legend\n(GET /users) --> [web]\n");
    }
}
