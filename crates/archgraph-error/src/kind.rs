//! Error kinds for archgraph operations

use strum_macros::{Display, IntoStaticStr};

/// What went wrong, grouped by the surface that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoStaticStr, Display)]
#[non_exhaustive]
pub enum ErrorKind {
    // Arguments and configuration
    /// Invalid configuration file or values
    ConfigInvalid,

    /// Invalid argument passed on the command line or to a function
    InvalidArgument,

    // Source tree and files
    /// File or directory not found
    FileNotFound,

    PermissionDenied,

    /// Reading or writing a file failed
    IoFailed,

    /// Walking the source tree failed
    TraversalFailed,

    /// File content is not valid UTF-8
    EncodingError,

    // Bundles and reports
    /// Encoding the JSON report failed
    SerializationFailed,

    /// Decoding the facts bundle failed
    DeserializationFailed,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        (*self).into()
    }
}
