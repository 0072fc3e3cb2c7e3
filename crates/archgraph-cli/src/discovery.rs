//! Source tree scanning for the heuristic detectors.

use std::fs;
use std::path::{Component, Path, PathBuf};
use std::time::Instant;

use ignore::WalkBuilder;
use rayon::prelude::*;
use tracing::{debug, info};

use archgraph_error::{Error, ErrorKind, Result};

/// Files larger than this are listed but not read.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 512 * 1024;

/// One file found under the scanned root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Root-relative path with `/` separators.
    pub rel_path: String,
    /// UTF-8 text, or `None` for oversized or binary files.
    pub contents: Option<String>,
}

/// Build-output and vendored-dependency directories, skipped at any depth.
fn should_skip_dir(name: &str) -> bool {
    matches!(
        name,
        "target"
            | "dist"
            | "coverage"
            | "vendor"
            | "node_modules"
            | "third_party"
            | "__pycache__"
            | "venv"
    )
}

/// Root-relative POSIX path, or `None` for the root itself.
fn relative_posix(root: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    let parts: Vec<&str> = rel
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => part.to_str(),
            _ => None,
        })
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join("/"))
    }
}

fn read_text(path: &Path, max_file_size: u64) -> Option<String> {
    let len = fs::metadata(path).ok()?.len();
    if len > max_file_size {
        debug!(path = %path.display(), len, "skipping oversized file contents");
        return None;
    }
    // Non-UTF-8 files are treated as binary.
    fs::read_to_string(path).ok()
}

/// Walk `root` and read every file in parallel, sorted by relative path.
pub fn discover_sources(root: &str, max_file_size: u64) -> Result<Vec<SourceFile>> {
    let discovery_start = Instant::now();
    let root_path = Path::new(root);
    if !root_path.is_dir() {
        return Err(Error::file_not_found(root).with_operation("discovery::discover_sources"));
    }

    let mut builder = WalkBuilder::new(root_path);
    builder
        .standard_filters(true)
        .follow_links(false)
        .filter_entry(|entry| {
            // Always include root
            if entry.depth() == 0 {
                return true;
            }
            let Some(file_type) = entry.file_type() else {
                return true;
            };
            if !file_type.is_dir() {
                return true;
            }
            let Some(name) = entry.file_name().to_str() else {
                return true;
            };
            !should_skip_dir(&name.to_ascii_lowercase())
        });

    let mut paths: Vec<PathBuf> = Vec::new();
    for entry in builder.build() {
        let entry = entry.map_err(|e| {
            Error::new(
                ErrorKind::TraversalFailed,
                format!("failed to walk directory {root}: {e}"),
            )
            .with_operation("discovery::discover_sources")
        })?;
        if entry.file_type().is_some_and(|ft| ft.is_file()) {
            paths.push(entry.into_path());
        }
    }

    let mut files: Vec<SourceFile> = paths
        .par_iter()
        .filter_map(|path| {
            let rel_path = relative_posix(root_path, path)?;
            Some(SourceFile {
                contents: read_text(path, max_file_size),
                rel_path,
            })
        })
        .collect();
    files.sort_by(|a, b| a.rel_path.cmp(&b.rel_path));

    info!(
        "Source scan: {:.2}s ({} files)",
        discovery_start.elapsed().as_secs_f64(),
        files.len()
    );
    Ok(files)
}
