//! # archgraph-error
//!
//! Unified error handling for archgraph.
//!
//! An [`Error`] carries its [`ErrorKind`], a message, the operation that
//! failed, key/value context locating the failure, and the wrapped source
//! error when there is one.
//!
//! The diagram engine itself is total and never returns an error. Only the outer
//! surfaces (reading inputs, decoding configs, writing reports) produce one.
//!
//! ```rust
//! use archgraph_error::{Error, ErrorKind};
//!
//! fn load() -> Result<(), Error> {
//!     Err(Error::new(ErrorKind::DeserializationFailed, "expected an array")
//!         .with_operation("input::load_bundle")
//!         .with_context("path", "facts.json"))
//! }
//! ```

mod error;
mod kind;

pub use error::Error;
pub use kind::ErrorKind;

/// Result type alias using archgraph Error
pub type Result<T> = std::result::Result<T, Error>;
