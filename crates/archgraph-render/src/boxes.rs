//! Boxes-and-arrows rendering in PlantUML-style notation.

use std::fmt::Write;

use archgraph_core::{Diagram, Node, NodeKind, Relation, sanitize_id};

use crate::notation::{arrow_for, escape_label};

const PREAMBLE: &str = "@startuml\nleft to right direction\nskinparam shadowing false\n";
const POSTAMBLE: &str = "@enduml\n";

fn shape_for(node: &Node) -> &'static str {
    match node.kind {
        NodeKind::Module | NodeKind::Main => "rectangle",
        NodeKind::External => "component",
        NodeKind::Datasource if node.label.starts_with("db:") => "database",
        NodeKind::Datasource => "queue",
        NodeKind::Endpoint => "usecase",
    }
}

fn declared_label(node: &Node) -> String {
    match node.kind {
        NodeKind::Main => "main".to_string(),
        _ => escape_label(&node.label),
    }
}

/// Render node declarations, relationships and the legend block.
pub fn render_boxes(diagram: &Diagram) -> String {
    let mut output = String::with_capacity(4096);
    output.push_str(PREAMBLE);

    for node in &diagram.nodes {
        let _ = writeln!(
            output,
            "{} \"{}\" as {}",
            shape_for(node),
            declared_label(node),
            sanitize_id(&node.id)
        );
    }

    for edge in &diagram.edges {
        let from = sanitize_id(&edge.from);
        let to = sanitize_id(&edge.to);
        let arrow = arrow_for(edge.relation);
        if edge.relation == Relation::Uses && !edge.label.is_empty() {
            let _ = writeln!(output, "{from} {arrow} {to} : {}", edge.label);
        } else {
            let _ = writeln!(output, "{from} {arrow} {to}");
        }
    }

    output.push_str("legend top left\n");
    for line in diagram.legend.lines() {
        let _ = writeln!(output, "{line}");
    }
    output.push_str("endlegend\n");
    output.push_str(POSTAMBLE);

    tracing::trace!(
        nodes = diagram.nodes.len(),
        edges = diagram.edges.len(),
        "rendered boxes"
    );
    output
}
