//! Program entrypoint candidates.
//!
//! A file is a candidate when its path follows a conventional entry-file layout
//! or when its text carries its family's program-entry marker.

use std::path::Path;

use crate::family::LangFamily;

enum PathRule {
    /// Any file with this base name.
    FileName(&'static str),
    /// Only this exact relative path.
    Exact(&'static str),
}

impl PathRule {
    fn matches(&self, path: &str, file_name: &str) -> bool {
        match self {
            PathRule::FileName(name) => file_name == *name,
            PathRule::Exact(exact) => path == *exact,
        }
    }
}

const ENTRY_PATHS: &[PathRule] = &[
    PathRule::FileName("main.go"),
    PathRule::FileName("main.rs"),
    PathRule::FileName("main.py"),
    PathRule::FileName("__main__.py"),
    PathRule::FileName("manage.py"),
    PathRule::FileName("wsgi.py"),
    PathRule::FileName("main.java"),
    PathRule::FileName("application.java"),
    PathRule::FileName("main.kt"),
    PathRule::FileName("application.kt"),
    PathRule::FileName("main.ts"),
    PathRule::FileName("main.js"),
    PathRule::FileName("server.ts"),
    PathRule::FileName("server.js"),
    // index files appear in every JS folder; only the package roots count
    PathRule::Exact("index.js"),
    PathRule::Exact("index.ts"),
    PathRule::Exact("src/index.js"),
    PathRule::Exact("src/index.ts"),
    PathRule::Exact("app.py"),
    PathRule::Exact("src/app.py"),
];

const ENTRY_MARKERS: &[(LangFamily, &[&str])] = &[
    (LangFamily::GoLike, &["func main()"]),
    (LangFamily::RustLike, &["fn main()"]),
    (
        LangFamily::Python,
        &["if __name__ == \"__main__\"", "if __name__ == '__main__'"],
    ),
    (
        LangFamily::JvmLike,
        &["public static void main(", "static void main(string", "fun main("],
    ),
    (
        LangFamily::JavaScript,
        &["require.main === module", "import.meta.main"],
    ),
];

/// Whether `path` (POSIX-relative, lower-cased comparison) or its lower-cased
/// text marks a program entrypoint.
pub fn is_entry_candidate(path: &str, family: Option<LangFamily>, lowered: &str) -> bool {
    let path = path.to_ascii_lowercase();
    let file_name = Path::new(&path)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or_default();

    if ENTRY_PATHS.iter().any(|rule| rule.matches(&path, file_name)) {
        return true;
    }

    let Some(family) = family else {
        return false;
    };
    ENTRY_MARKERS
        .iter()
        .filter(|(marker_family, _)| *marker_family == family)
        .flat_map(|(_, markers)| markers.iter())
        .any(|marker| lowered.contains(marker))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conventional_file_names() {
        assert!(is_entry_candidate("cmd/a/main.go", Some(LangFamily::GoLike), ""));
        assert!(is_entry_candidate("src/main.rs", Some(LangFamily::RustLike), ""));
        assert!(is_entry_candidate("pkg/__main__.py", Some(LangFamily::Python), ""));
        assert!(is_entry_candidate("Main.java", Some(LangFamily::JvmLike), ""));
    }

    #[test]
    fn nested_index_files_are_not_entrypoints() {
        assert!(is_entry_candidate("src/index.ts", Some(LangFamily::JavaScript), ""));
        assert!(!is_entry_candidate(
            "src/components/index.ts",
            Some(LangFamily::JavaScript),
            "export * from './button';"
        ));
    }

    #[test]
    fn content_markers_by_family() {
        assert!(is_entry_candidate(
            "tools/gen.go",
            Some(LangFamily::GoLike),
            "package main\n\nfunc main() {\n}"
        ));
        assert!(is_entry_candidate(
            "scripts/sync.py",
            Some(LangFamily::Python),
            "if __name__ == '__main__':\n    run()"
        ));
        assert!(is_entry_candidate(
            "src/bin/worker.rs",
            Some(LangFamily::RustLike),
            "fn main() {}"
        ));
    }

    #[test]
    fn markers_of_other_families_do_not_count() {
        assert!(!is_entry_candidate(
            "docs/example.py",
            Some(LangFamily::Python),
            "// fn main() {}"
        ));
        assert!(!is_entry_candidate("notes.txt", None, "func main()"));
    }
}
