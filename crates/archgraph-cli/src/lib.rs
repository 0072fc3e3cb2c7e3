//! archgraph command-line interface.
//!
pub mod config;
pub mod discovery;
pub mod input;
pub mod output;
pub mod profile;

use std::time::Instant;

use tracing::info;

use archgraph_core::{build_diagram, collect_module_io};
use archgraph_error::{Error, Result};

pub use config::{ArchgraphConfig, DiagramOverrides};
pub use output::OutputFormat;
pub use profile::profile_phase;

/// Options for running archgraph.
#[derive(Debug, Clone, Default)]
pub struct ArchgraphOptions {
    /// JSON facts bundle.
    pub input: Option<String>,
    /// Source tree to scan for contents.
    pub dir: Option<String>,
    /// TOML config file.
    pub config: Option<String>,
    pub overrides: DiagramOverrides,
    pub max_file_size: Option<u64>,
    pub format: OutputFormat,
}

/// Main entry point: load inputs, build the diagram, render it.
pub fn run_main(opts: &ArchgraphOptions) -> Result<String> {
    if opts.input.is_none() && opts.dir.is_none() {
        return Err(Error::invalid_argument("either an input bundle or a directory is required")
            .with_operation("run_main"));
    }

    let config = match &opts.config {
        Some(path) => ArchgraphConfig::load(path)?,
        None => ArchgraphConfig::default(),
    };
    let diagram_options = config.diagram_options(&opts.overrides)?;

    let bundle = opts.input.as_deref().map(input::load_bundle).transpose()?;
    let sources = match &opts.dir {
        Some(dir) => profile_phase("scan", || {
            discovery::discover_sources(dir, config.max_file_size(opts.max_file_size))
        })?,
        None => Vec::new(),
    };
    let diagram_input = input::merge_sources(bundle, sources);

    let build_start = Instant::now();
    let diagram = profile_phase("build", || build_diagram(&diagram_input, &diagram_options));
    info!(
        "Diagram build: {:.2}s ({} nodes, {} edges)",
        build_start.elapsed().as_secs_f64(),
        diagram.nodes.len(),
        diagram.edges.len()
    );

    let module_io = if opts.format == OutputFormat::Json {
        collect_module_io(
            &diagram_input.rel_paths,
            &diagram_input.file_contents,
            diagram_options.granularity,
        )
    } else {
        Default::default()
    };

    output::render_output(&diagram, &module_io, opts.format)
}
