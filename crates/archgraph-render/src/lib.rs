//! Textual renderings of a finalized [`Diagram`].
//!
//! Both renderers read only the sorted `Diagram`, so their output is as
//! deterministic as the diagram itself.
//!
//! # Module Structure
//!
//! - [`notation`]: identifier and label helpers shared by the renderers
//! - [`arrow`]: legend plus one `A --> B` line per edge
//! - [`boxes`]: PlantUML-style declarations and relationships

mod arrow;
mod boxes;
mod notation;

pub use arrow::render_arrow_text;
pub use boxes::render_boxes;
pub use notation::{display_label, escape_label};

use archgraph_core::Diagram;

/// Both notations, arrow text first, separated by a blank line.
pub fn render_all(diagram: &Diagram) -> String {
    let mut output = render_arrow_text(diagram);
    output.push('\n');
    output.push_str(&render_boxes(diagram));
    output
}
