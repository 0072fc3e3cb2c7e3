//! The diagram pass pipeline.
//!
//! Passes run in a fixed order against one [`GraphRegistry`]:
//! import edges, external collapsing, I/O datasources, endpoints, entrypoint.
//! The registry is unordered; [`GraphRegistry::finish`] sorts at the end.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use tracing::debug;

use archgraph_detect::{IoFlags, LangFamily, detect_endpoints, detect_io, is_entry_candidate};

use crate::collapse::{ExternalPlan, apply_external_edges};
use crate::legend::legend_for;
use crate::model::{Diagram, DiagramInput, ImportFact, NodeKind, Relation};
use crate::module_path::{module_label, normalize_path};
use crate::options::{DiagramOptions, Granularity};
use crate::registry::GraphRegistry;

const IO_GROUP: &str = "io";

/// A source file prepared once for every detector.
struct ScannedFile {
    path: String,
    family: Option<LangFamily>,
    /// Lower-cased text; `None` when no content was supplied.
    lowered: Option<String>,
}

/// Every known file, sorted by normalized path.
///
/// The file set is `rel_paths` plus the keys of `file_contents`.
fn scan_files(rel_paths: &[String], file_contents: &HashMap<String, String>) -> Vec<ScannedFile> {
    let mut raw_keys: Vec<&String> = file_contents.keys().collect();
    raw_keys.sort();
    let mut contents: HashMap<String, &str> = HashMap::with_capacity(raw_keys.len());
    for key in raw_keys {
        contents
            .entry(normalize_path(key))
            .or_insert(file_contents[key].as_str());
    }

    let paths: BTreeSet<String> = rel_paths
        .iter()
        .map(|p| normalize_path(p))
        .chain(contents.keys().cloned())
        .filter(|p| !p.is_empty())
        .collect();

    paths
        .into_iter()
        .map(|path| {
            let lowered = contents.get(&path).map(|text| text.to_lowercase());
            ScannedFile {
                family: LangFamily::from_path(&path),
                lowered,
                path,
            }
        })
        .collect()
}

/// The internal file an import points at.
///
/// Falls back to the raw specifier when resolution failed but the specifier is
/// itself a known file path.
fn internal_target(fact: &ImportFact, known_paths: &HashSet<&str>) -> Option<String> {
    if let Some(resolved) = fact
        .resolved_internal_path
        .as_deref()
        .map(normalize_path)
        .filter(|p| !p.is_empty())
    {
        return Some(resolved);
    }
    let candidate = normalize_path(&fact.raw_specifier);
    known_paths
        .contains(candidate.as_str())
        .then_some(candidate)
}

fn add_import_edges(
    registry: &mut GraphRegistry,
    imports: &[ImportFact],
    known_paths: &HashSet<&str>,
    granularity: Granularity,
) {
    let mut dropped = 0usize;
    for fact in imports.iter().filter(|f| f.is_internal) {
        let Some(target_path) = internal_target(fact, known_paths) else {
            dropped += 1;
            continue;
        };
        let from = module_label(&fact.source_file, granularity);
        let to = module_label(&target_path, granularity);
        if from == to {
            continue;
        }
        let from_id = registry.ensure_module(&from);
        let to_id = registry.ensure_module(&to);
        registry.add_edge(&from_id, &to_id, Relation::Imports, "");
    }
    debug!(
        edges = registry.edge_count(),
        unresolved = dropped,
        "import edges built"
    );
}

fn module_io_of(files: &[ScannedFile], granularity: Granularity) -> BTreeMap<String, IoFlags> {
    let mut modules: BTreeMap<String, IoFlags> = BTreeMap::new();
    for file in files {
        let Some(lowered) = file.lowered.as_deref() else {
            continue;
        };
        let flags = detect_io(lowered);
        if flags.is_empty() {
            continue;
        }
        modules
            .entry(module_label(&file.path, granularity))
            .or_default()
            .merge(&flags);
    }
    modules
}

/// Per-module I/O flags, OR-merged over each module's files in path order.
///
/// Modules without any detected capability are omitted.
pub fn collect_module_io(
    rel_paths: &[String],
    file_contents: &HashMap<String, String>,
    granularity: Granularity,
) -> BTreeMap<String, IoFlags> {
    module_io_of(&scan_files(rel_paths, file_contents), granularity)
}

/// Datasource targets for one module's flags: `(label, edge label)`.
fn io_targets(flags: &IoFlags) -> Vec<(String, &'static str)> {
    let mut targets = Vec::new();
    if flags.db {
        let kind = flags.db_kind.map(|k| k.as_str()).unwrap_or("unknown");
        targets.push((format!("db:{kind}"), "reads/writes"));
    }
    if flags.fs_read || flags.fs_write {
        let how = if flags.fs_write { "reads/writes" } else { "reads" };
        targets.push(("fs".to_string(), how));
    }
    if flags.network {
        targets.push(("http:external".to_string(), "calls"));
    }
    if flags.env {
        targets.push(("env".to_string(), "uses"));
    }
    targets
}

fn add_io_edges(registry: &mut GraphRegistry, module_io: &BTreeMap<String, IoFlags>) {
    for (module, flags) in module_io {
        let targets = io_targets(flags);
        if targets.is_empty() {
            continue;
        }
        let source = registry.ensure_module(module);
        for (label, how) in targets {
            let target = registry.ensure_node(NodeKind::Datasource, &label, IO_GROUP);
            registry.add_edge(&source, &target, Relation::Uses, how);
        }
    }
}

fn add_endpoint_edges(registry: &mut GraphRegistry, files: &[ScannedFile], granularity: Granularity) {
    let mut count = 0usize;
    for file in files {
        let (Some(family), Some(lowered)) = (file.family, file.lowered.as_deref()) else {
            continue;
        };
        let endpoints = detect_endpoints(family, lowered);
        if endpoints.is_empty() {
            continue;
        }
        let owner = module_label(&file.path, granularity);
        let owner_id = registry.ensure_module(&owner);
        for endpoint in endpoints {
            let id = registry.ensure_node(NodeKind::Endpoint, &endpoint.label(), &owner);
            registry.add_edge(&id, &owner_id, Relation::Serves, "");
            count += 1;
        }
    }
    debug!(endpoints = count, "endpoint edges built");
}

fn add_entrypoint_edges(
    registry: &mut GraphRegistry,
    files: &[ScannedFile],
    imports: &[ImportFact],
    known_paths: &HashSet<&str>,
    granularity: Granularity,
) {
    // `files` is sorted, so the first candidate is the lexicographically smallest.
    let Some(entry) = files.iter().find(|file| {
        is_entry_candidate(
            &file.path,
            file.family,
            file.lowered.as_deref().unwrap_or_default(),
        )
    }) else {
        return;
    };
    debug!(path = %entry.path, "entrypoint selected");

    let own_module = module_label(&entry.path, granularity);
    let main_id = registry.ensure_node(NodeKind::Main, &entry.path, &own_module);
    let own_id = registry.ensure_module(&own_module);
    registry.add_edge(&main_id, &own_id, Relation::Imports, "");

    for fact in imports
        .iter()
        .filter(|f| f.is_internal && normalize_path(&f.source_file) == entry.path)
    {
        if let Some(target_path) = internal_target(fact, known_paths) {
            let target_id = registry.ensure_module(&module_label(&target_path, granularity));
            registry.add_edge(&main_id, &target_id, Relation::Imports, "");
        }
    }
}

/// Build the architecture diagram for one invocation.
///
/// Pure and total: any input yields a diagram, and equal inputs yield equal
/// diagrams whatever order their maps iterate in.
pub fn build_diagram(input: &DiagramInput, options: &DiagramOptions) -> Diagram {
    let granularity = options.granularity;
    let mut registry = GraphRegistry::new();

    let files = scan_files(&input.rel_paths, &input.file_contents);
    let known_paths: HashSet<&str> = files.iter().map(|f| f.path.as_str()).collect();

    add_import_edges(&mut registry, &input.imports, &known_paths, granularity);

    let plan = ExternalPlan::new(
        &input.external_dependency_counts,
        options.effective_max_nodes(),
    );
    apply_external_edges(&mut registry, &input.imports, &plan, granularity);

    if options.include_io {
        add_io_edges(&mut registry, &module_io_of(&files, granularity));
    }

    if options.include_endpoints {
        add_endpoint_edges(&mut registry, &files, granularity);
    }

    add_entrypoint_edges(
        &mut registry,
        &files,
        &input.imports,
        &known_paths,
        granularity,
    );

    debug!(
        nodes = registry.node_count(),
        edges = registry.edge_count(),
        granularity = %granularity,
        "diagram assembled"
    );
    registry.finish(granularity, legend_for(granularity))
}
