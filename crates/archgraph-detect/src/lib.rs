//! Heuristic code-marker detectors.
//!
//! Every detector is a pure classifier over lower-cased file text, driven by
//! static pattern tables. Tables are keyed by [`LangFamily`] where the idiom is
//! language specific, so a new family only adds rows, never traversal logic.
//!
//! # Module Structure
//!
//! - [`family`]: language families and extension mapping
//! - [`io`]: filesystem / network / database / env / concurrency markers
//! - [`endpoint`]: HTTP route-registration idioms
//! - [`entry`]: program entrypoint file names and markers

pub mod endpoint;
pub mod entry;
pub mod family;
pub mod io;

pub use endpoint::{Endpoint, detect_endpoints};
pub use entry::is_entry_candidate;
pub use family::LangFamily;
pub use io::{DbKind, IoFlag, IoFlags, detect_io};
