//! Shared helpers for rendering node references.

use archgraph_core::{Diagram, NodeKind, Relation};

/// Escape special characters for quoted labels.
pub fn escape_label(input: &str) -> String {
    input
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}

/// How a node is referenced in arrow text: `[label]`, or the bare label for
/// endpoints, which are already parenthesized.
pub fn display_label(diagram: &Diagram, id: &str) -> String {
    match diagram.node(id) {
        Some(node) if node.kind == NodeKind::Endpoint => node.label.clone(),
        Some(node) => format!("[{}]", node.label),
        None => format!("[{id}]"),
    }
}

/// Arrow token for a relation: solid for structure, dotted for I/O usage.
pub(crate) fn arrow_for(relation: Relation) -> &'static str {
    match relation {
        Relation::Imports | Relation::Serves => "-->",
        Relation::Uses => "..>",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_quotes_and_newlines() {
        assert_eq!(escape_label(r#"say "hi""#), r#"say \"hi\""#);
        assert_eq!(escape_label("a\nb"), "a\\nb");
        assert_eq!(escape_label(r"c:\x"), r"c:\\x");
    }

    #[test]
    fn arrows_by_relation() {
        assert_eq!(arrow_for(Relation::Imports), "-->");
        assert_eq!(arrow_for(Relation::Serves), "-->");
        assert_eq!(arrow_for(Relation::Uses), "..>");
    }
}
