//! Assembling the engine input from a facts bundle and a scanned tree.

use std::collections::BTreeSet;
use std::fs;

use tracing::{debug, info};

use archgraph_core::DiagramInput;
use archgraph_error::{Error, Result};

use crate::discovery::SourceFile;

/// Decode a JSON facts bundle. Every top-level field is optional.
pub fn parse_bundle(text: &str) -> Result<DiagramInput> {
    serde_json::from_str(text).map_err(|e| Error::from(e).with_operation("input::parse_bundle"))
}

pub fn load_bundle(path: &str) -> Result<DiagramInput> {
    let text = fs::read_to_string(path).map_err(|e| Error::from(e).with_context("path", path))?;
    let bundle = parse_bundle(&text).map_err(|e| e.with_context("path", path))?;
    info!(
        path,
        imports = bundle.imports.len(),
        externals = bundle.external_dependency_counts.len(),
        "facts bundle loaded"
    );
    Ok(bundle)
}

/// Union scanned files into the bundle.
///
/// Paths from both sides are kept, sorted and deduplicated. Scanned contents
/// replace bundle contents for the same path.
pub fn merge_sources(bundle: Option<DiagramInput>, sources: Vec<SourceFile>) -> DiagramInput {
    let mut input = bundle.unwrap_or_default();

    let mut rel_paths: BTreeSet<String> = input.rel_paths.drain(..).collect();
    let scanned = sources.len();
    for source in sources {
        if let Some(contents) = source.contents {
            input.file_contents.insert(source.rel_path.clone(), contents);
        }
        rel_paths.insert(source.rel_path);
    }
    input.rel_paths = rel_paths.into_iter().collect();

    debug!(
        scanned,
        paths = input.rel_paths.len(),
        contents = input.file_contents.len(),
        "input merged"
    );
    input
}

#[cfg(test)]
mod tests {
    use super::*;
    use archgraph_error::ErrorKind;

    #[test]
    fn bundle_fields_are_optional() {
        let input = parse_bundle("{}").expect("parse");
        assert!(input.rel_paths.is_empty());
        assert!(input.imports.is_empty());

        let input = parse_bundle(
            r#"{
                "rel_paths": ["src/api/a.ts"],
                "imports": [
                    {"source_file": "src/api/a.ts", "raw_specifier": "react", "is_internal": false}
                ],
                "external_dependency_counts": {"react": 2}
            }"#,
        )
        .expect("parse");
        assert_eq!(input.imports.len(), 1);
        assert_eq!(input.imports[0].resolved_internal_path, None);
        assert_eq!(input.external_dependency_counts["react"], 2);
    }

    #[test]
    fn malformed_bundle_is_a_deserialization_error() {
        let err = parse_bundle("{\"imports\": 3}").expect_err("bad bundle");
        assert_eq!(err.kind(), ErrorKind::DeserializationFailed);
    }

    #[test]
    fn merge_unions_paths_and_prefers_scanned_contents() {
        let mut bundle = DiagramInput {
            rel_paths: vec!["b.go".to_string(), "a.go".to_string()],
            ..DiagramInput::default()
        };
        bundle
            .file_contents
            .insert("a.go".to_string(), "old".to_string());

        let merged = merge_sources(
            Some(bundle),
            vec![
                SourceFile {
                    rel_path: "a.go".to_string(),
                    contents: Some("new".to_string()),
                },
                SourceFile {
                    rel_path: "c.bin".to_string(),
                    contents: None,
                },
            ],
        );
        assert_eq!(merged.rel_paths, vec!["a.go", "b.go", "c.bin"]);
        assert_eq!(merged.file_contents["a.go"], "new");
        assert!(!merged.file_contents.contains_key("c.bin"));
    }
}
