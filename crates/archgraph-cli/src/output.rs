//! Output generation (text, boxes, JSON).

use std::collections::BTreeMap;
use std::fs;
use std::time::Instant;

use clap::ValueEnum;
use serde::Serialize;
use tracing::info;

use archgraph_core::{Diagram, IoFlags};
use archgraph_error::{Error, Result};
use archgraph_render::{render_all, render_arrow_text, render_boxes};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Legend plus arrow lines
    Text,
    /// PlantUML-style boxes and arrows
    Boxes,
    /// Diagram and per-module I/O flags as JSON
    Json,
    /// Text, a blank line, then boxes
    #[default]
    All,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    diagram: &'a Diagram,
    module_io: &'a BTreeMap<String, IoFlags>,
}

/// Serialize `diagram` in the requested format.
pub fn render_output(
    diagram: &Diagram,
    module_io: &BTreeMap<String, IoFlags>,
    format: OutputFormat,
) -> Result<String> {
    let render_start = Instant::now();
    let output = match format {
        OutputFormat::Text => render_arrow_text(diagram),
        OutputFormat::Boxes => render_boxes(diagram),
        OutputFormat::All => render_all(diagram),
        OutputFormat::Json => {
            let report = JsonReport { diagram, module_io };
            let mut json = serde_json::to_string_pretty(&report).map_err(|e| {
                Error::serialization_failed(e.to_string())
                    .with_operation("output::render_output")
                    .set_source(e)
            })?;
            json.push('\n');
            json
        }
    };
    info!(
        "Rendering: {:.2}s ({} bytes)",
        render_start.elapsed().as_secs_f64(),
        output.len()
    );
    Ok(output)
}

pub fn write_output(path: &str, output: &str) -> Result<()> {
    fs::write(path, output).map_err(|e| Error::from(e).with_context("path", path))?;
    info!(path, "output written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use archgraph_core::{DiagramInput, DiagramOptions, build_diagram};

    #[test]
    fn json_contains_diagram_and_module_io() {
        let diagram = build_diagram(&DiagramInput::default(), &DiagramOptions::default());
        let mut module_io = BTreeMap::new();
        module_io.insert(
            "src/api".to_string(),
            IoFlags {
                network: true,
                ..IoFlags::default()
            },
        );

        let json = render_output(&diagram, &module_io, OutputFormat::Json).expect("json");
        let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
        assert_eq!(value["diagram"]["granularity"], "module");
        assert_eq!(value["diagram"]["nodes"], serde_json::json!([]));
        assert_eq!(value["module_io"]["src/api"]["network"], true);
        assert_eq!(value["module_io"]["src/api"]["db_kind"], serde_json::Value::Null);
    }

    #[test]
    fn all_is_text_then_boxes() {
        let diagram = build_diagram(&DiagramInput::default(), &DiagramOptions::default());
        let all = render_output(&diagram, &BTreeMap::new(), OutputFormat::All).expect("all");
        let text = render_output(&diagram, &BTreeMap::new(), OutputFormat::Text).expect("text");
        let boxes = render_output(&diagram, &BTreeMap::new(), OutputFormat::Boxes).expect("boxes");
        assert_eq!(all, format!("{text}\n{boxes}"));
    }
}
