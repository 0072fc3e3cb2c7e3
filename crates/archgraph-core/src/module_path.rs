//! Module label resolution for file paths.

use crate::options::Granularity;

/// Top-level directories whose children are the meaningful modules.
const ANCHOR_DIRS: [&str; 6] = ["src", "lib", "pkg", "app", "cmd", "internal"];

const UNKNOWN_MODULE: &str = "unknown";

/// Determine the module label for a POSIX-relative file path.
///
/// - `file`: the path itself
/// - `package`: the first path segment
/// - `module`: `<anchor>/<second>` when the first segment is one of
///   `src, lib, pkg, app, cmd, internal` and a second segment exists,
///   otherwise the first segment
///
/// Backslashes, a leading `./` and leading slashes are normalized away first.
/// A path with no segments at all maps to `unknown`.
pub fn module_label(path: &str, granularity: Granularity) -> String {
    let normalized = normalize_path(path);
    let segments: Vec<&str> = normalized.split('/').filter(|s| !s.is_empty()).collect();

    let Some(first) = segments.first() else {
        return UNKNOWN_MODULE.to_string();
    };

    match granularity {
        Granularity::File => segments.join("/"),
        Granularity::Package => first.to_string(),
        Granularity::Module => match segments.get(1) {
            Some(second) if ANCHOR_DIRS.contains(first) => format!("{first}/{second}"),
            _ => first.to_string(),
        },
    }
}

/// Canonical form of a relative path: forward slashes, no `./` or `/` prefix.
pub(crate) fn normalize_path(path: &str) -> String {
    let mut normalized = path.trim().replace('\\', "/");
    loop {
        if let Some(rest) = normalized.strip_prefix("./") {
            normalized = rest.to_string();
        } else if let Some(rest) = normalized.strip_prefix('/') {
            normalized = rest.to_string();
        } else {
            break;
        }
    }
    normalized
}
