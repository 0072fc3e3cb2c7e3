//! The main Error type for archgraph.

use std::fmt;

use crate::ErrorKind;

type BoxedSource = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Unified error type for every fallible archgraph surface.
///
/// Failures are reported once and the process exits, so an error only
/// records where it happened and what it was about.
pub struct Error {
    kind: ErrorKind,
    message: String,
    /// Innermost operation first.
    operations: Vec<&'static str>,
    context: Vec<(&'static str, String)>,
    source: Option<BoxedSource>,
}

impl Error {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            operations: Vec::new(),
            context: Vec::new(),
            source: None,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// The outermost operation, or `""` when none was recorded.
    pub fn operation(&self) -> &'static str {
        self.operations.last().copied().unwrap_or("")
    }

    /// Every recorded operation, innermost first.
    pub fn operations(&self) -> &[&'static str] {
        &self.operations
    }

    pub fn context(&self) -> &[(&'static str, String)] {
        &self.context
    }

    /// Record the operation that was running. Calling it again as the error
    /// travels outward builds up the trail.
    pub fn with_operation(mut self, operation: &'static str) -> Self {
        if self.operations.last() != Some(&operation) {
            self.operations.push(operation);
        }
        self
    }

    pub fn with_context(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.context.push((key, value.into()));
        self
    }

    /// Attach the underlying error. A second call replaces the first.
    pub fn set_source<E>(mut self, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }

    fn write_location(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.operations.is_empty() && self.context.is_empty() {
            return Ok(());
        }
        f.write_str(" (")?;
        if !self.operations.is_empty() {
            f.write_str("in ")?;
            for (i, operation) in self.operations.iter().rev().enumerate() {
                if i > 0 {
                    f.write_str(" <- ")?;
                }
                f.write_str(operation)?;
            }
            if !self.context.is_empty() {
                f.write_str("; ")?;
            }
        }
        for (i, (key, value)) in self.context.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{key}={value}")?;
        }
        f.write_str(")")
    }
}

/// `Kind: message (in outer <- inner; key=value)`
impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        self.write_location(f)
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)?;
        if let Some(source) = &self.source {
            write!(f, "\n    caused by: {source:?}")?;
        }
        Ok(())
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        let kind = match err.kind() {
            std::io::ErrorKind::NotFound => ErrorKind::FileNotFound,
            std::io::ErrorKind::PermissionDenied => ErrorKind::PermissionDenied,
            std::io::ErrorKind::InvalidData => ErrorKind::EncodingError,
            _ => ErrorKind::IoFailed,
        };
        Error::new(kind, err.to_string())
            .with_operation("io")
            .set_source(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        let kind = if err.is_io() {
            ErrorKind::IoFailed
        } else {
            ErrorKind::DeserializationFailed
        };
        Error::new(kind, err.to_string())
            .with_operation("json")
            .with_context("line", err.line().to_string())
            .set_source(err)
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::new(ErrorKind::ConfigInvalid, err.message().to_string())
            .with_operation("toml")
            .set_source(err)
    }
}

impl Error {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidArgument, message)
    }

    pub fn config_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ConfigInvalid, message)
    }

    pub fn serialization_failed(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::SerializationFailed, message)
    }

    pub fn file_not_found(path: impl Into<String>) -> Self {
        let path = path.into();
        Self::new(ErrorKind::FileNotFound, format!("file '{path}' not found"))
            .with_context("path", path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn operations_accumulate_outward() {
        let err = Error::new(ErrorKind::DeserializationFailed, "bad bundle")
            .with_operation("input::decode")
            .with_operation("input::decode")
            .with_operation("run_main");

        assert_eq!(err.operation(), "run_main");
        assert_eq!(err.operations(), ["input::decode", "run_main"]);
        assert!(err.context().is_empty());
    }

    #[test]
    fn display_reads_kind_message_then_location() {
        let err = Error::new(ErrorKind::DeserializationFailed, "missing field `imports`")
            .with_operation("input::load_bundle")
            .with_operation("run_main")
            .with_context("path", "facts.json");

        assert_eq!(
            err.to_string(),
            "DeserializationFailed: missing field `imports` \
             (in run_main <- input::load_bundle; path=facts.json)"
        );
        assert_eq!(
            Error::invalid_argument("no inputs").to_string(),
            "InvalidArgument: no inputs"
        );
    }

    #[test]
    fn io_failures_print_without_retry_status() {
        let io_err = std::io::Error::other("device busy");
        let err = Error::from(io_err);
        assert_eq!(err.kind(), ErrorKind::IoFailed);
        assert_eq!(err.to_string(), "IoFailed: device busy (in io)");
    }

    #[test]
    fn io_error_conversion_keeps_source() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = Error::from(io_err);
        assert_eq!(err.kind(), ErrorKind::FileNotFound);
        assert_eq!(err.operation(), "io");
        assert!(err.source().is_some());
        assert!(format!("{err:?}").contains("caused by"));
    }

    #[test]
    fn json_error_conversion() {
        let json_err = serde_json::from_str::<Vec<u32>>("{").unwrap_err();
        let err = Error::from(json_err);
        assert_eq!(err.kind(), ErrorKind::DeserializationFailed);
        assert_eq!(err.operation(), "json");
        assert_eq!(err.context()[0].0, "line");
    }

    #[test]
    fn toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Table>("max_nodes = ").unwrap_err();
        let err = Error::from(toml_err);
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
    }

    #[test]
    fn convenience_constructors() {
        let err = Error::file_not_found("facts.json");
        assert_eq!(err.kind(), ErrorKind::FileNotFound);
        assert_eq!(err.context()[0], ("path", "facts.json".to_string()));

        let err = Error::config_invalid("granularity must be a string");
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
        assert!(err.message().contains("granularity"));
    }
}
