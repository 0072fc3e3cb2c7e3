//! Bounding the number of third-party dependency nodes.
//!
//! The `top_k` most referenced external names keep their own node. Every other
//! name folds into a single `[external/*] (N more)` node, so the external part of
//! the diagram never exceeds `top_k + 1` nodes however many dependencies exist.

use std::collections::{BTreeSet, HashMap};

use tracing::debug;

use crate::model::{ImportFact, NodeKind, Relation};
use crate::module_path::module_label;
use crate::options::Granularity;
use crate::registry::GraphRegistry;

pub const EXTERNAL_GROUP: &str = "external";

/// Number of individually rendered external names for a node budget.
pub fn top_k(max_nodes: usize) -> usize {
    (max_nodes / 6).clamp(5, 15)
}

pub fn external_label(name: &str) -> String {
    format!("ext:{name}")
}

pub fn collapsed_label(count: usize) -> String {
    format!("[external/*] ({count} more)")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Disposition {
    Kept,
    Collapsed,
}

/// Which external names are rendered individually and which are folded.
#[derive(Debug, Clone, Default)]
pub struct ExternalPlan {
    /// Kept names in rank order.
    pub kept: Vec<String>,
    pub collapsed: BTreeSet<String>,
    dispositions: HashMap<String, Disposition>,
}

impl ExternalPlan {
    /// Rank names by descending count, ties alphabetical, and keep the first `top_k`.
    pub fn new(counts: &HashMap<String, usize>, max_nodes: usize) -> Self {
        let mut ranked: Vec<(&str, usize)> = counts
            .iter()
            .map(|(name, count)| (name.as_str(), *count))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

        let keep = top_k(max_nodes);
        let mut plan = ExternalPlan::default();
        for (rank, (name, _)) in ranked.into_iter().enumerate() {
            let disposition = if rank < keep {
                plan.kept.push(name.to_string());
                Disposition::Kept
            } else {
                plan.collapsed.insert(name.to_string());
                Disposition::Collapsed
            };
            plan.dispositions.insert(name.to_string(), disposition);
        }
        plan
    }

    /// The dependency name a specifier refers to: the specifier itself or its
    /// longest `/`-separated prefix that is a known name.
    fn resolve(&self, specifier: &str) -> Option<(&str, Disposition)> {
        let mut candidate = specifier;
        loop {
            if let Some((name, disposition)) = self.dispositions.get_key_value(candidate) {
                return Some((name.as_str(), *disposition));
            }
            candidate = &candidate[..candidate.rfind('/')?];
        }
    }

    pub fn collapsed_label(&self) -> Option<String> {
        if self.collapsed.is_empty() {
            None
        } else {
            Some(collapsed_label(self.collapsed.len()))
        }
    }
}

/// Add external nodes and `imports` edges for every non-internal fact.
///
/// Specifiers that match no known dependency name are skipped.
pub fn apply_external_edges(
    registry: &mut GraphRegistry,
    imports: &[ImportFact],
    plan: &ExternalPlan,
    granularity: Granularity,
) {
    for name in &plan.kept {
        registry.ensure_node(NodeKind::External, &external_label(name), EXTERNAL_GROUP);
    }
    let collapsed_id = plan
        .collapsed_label()
        .map(|label| registry.ensure_node(NodeKind::External, &label, EXTERNAL_GROUP));

    let mut unknown = 0usize;
    for fact in imports.iter().filter(|f| !f.is_internal) {
        let Some((name, disposition)) = plan.resolve(&fact.raw_specifier) else {
            unknown += 1;
            continue;
        };
        let source = registry.ensure_module(&module_label(&fact.source_file, granularity));
        match (disposition, &collapsed_id) {
            (Disposition::Kept, _) => {
                let target = registry.ensure_node(
                    NodeKind::External,
                    &external_label(name),
                    EXTERNAL_GROUP,
                );
                registry.add_edge(&source, &target, Relation::Imports, "");
            }
            (Disposition::Collapsed, Some(target)) => {
                registry.add_edge(&source, target, Relation::Imports, "");
            }
            (Disposition::Collapsed, None) => {}
        }
    }

    debug!(
        kept = plan.kept.len(),
        collapsed = plan.collapsed.len(),
        unknown,
        "external dependencies planned"
    );
}
