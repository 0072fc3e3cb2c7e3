//! Language families grouping languages that share declaration idioms.

use std::path::Path;

use strum_macros::{Display, EnumIter, IntoStaticStr};

/// A group of languages that register routes and declare entrypoints the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[derive(Display, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum LangFamily {
    /// JavaScript and TypeScript
    JavaScript,
    Python,
    /// Go and languages with Go-style routers
    GoLike,
    RustLike,
    /// Java, Kotlin, Scala, Groovy
    JvmLike,
}

impl LangFamily {
    /// Map a file extension (without the dot, any case) to its family.
    pub fn from_extension(ext: &str) -> Option<Self> {
        let lower = ext.to_ascii_lowercase();
        match lower.as_str() {
            "js" | "jsx" | "mjs" | "cjs" | "ts" | "tsx" | "mts" | "cts" => Some(Self::JavaScript),
            "py" | "pyi" => Some(Self::Python),
            "go" => Some(Self::GoLike),
            "rs" => Some(Self::RustLike),
            "java" | "kt" | "kts" | "scala" | "groovy" => Some(Self::JvmLike),
            _ => None,
        }
    }

    /// Family of the file at `path`, judged by its extension.
    pub fn from_path(path: &str) -> Option<Self> {
        Path::new(path)
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    pub fn as_str(&self) -> &'static str {
        (*self).into()
    }
}
