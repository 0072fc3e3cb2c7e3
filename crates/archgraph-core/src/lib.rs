//! Architecture diagram synthesis.
//!
//! Turns per-file import facts and heuristic code markers into a deduplicated,
//! size-bounded [`Diagram`]. The engine is a pure function of its inputs: all
//! state lives in a per-call [`GraphRegistry`] and the result is sorted before
//! it leaves [`build_diagram`].
//!
//! # Module Structure
//!
//! - [`model`]: import facts, nodes, edges and the finalized diagram
//! - [`options`]: granularity and diagram options
//! - [`module_path`]: file path to module label
//! - [`registry`]: idempotent node/edge accumulation
//! - [`collapse`]: bounding third-party dependency nodes
//! - [`assemble`]: the pass pipeline

pub mod assemble;
pub mod collapse;
pub mod legend;
pub mod model;
pub mod module_path;
pub mod options;
pub mod registry;

pub use archgraph_detect::{DbKind, IoFlags, LangFamily};
pub use assemble::{build_diagram, collect_module_io};
pub use legend::legend_for;
pub use model::{Diagram, DiagramInput, Edge, ImportFact, Node, NodeKind, Relation};
pub use module_path::module_label;
pub use options::{DEFAULT_MAX_NODES, DiagramOptions, Granularity, normalize_max_nodes};
pub use registry::{GraphRegistry, node_id, sanitize_id};
