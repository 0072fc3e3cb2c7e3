use std::time::Instant;

use clap::ArgGroup;
use clap::Parser;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

#[cfg(target_env = "msvc")]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use archgraph::output::write_output;
use archgraph::{ArchgraphOptions, DiagramOverrides, OutputFormat, run_main};

#[derive(Parser, Debug)]
#[command(
    name = "archgraph",
    about = "archgraph: bounded, deterministic architecture diagrams",
    version,
    group = ArgGroup::new("inputs").required(true).multiple(true).args(["input", "dir"])
)]
pub struct Cli {
    /// JSON facts bundle with rel_paths, imports and external_dependency_counts
    #[arg(short = 'i', long = "input", value_name = "FILE")]
    input: Option<String>,

    /// Source tree to scan for I/O, endpoint and entrypoint markers
    #[arg(short = 'd', long = "dir", value_name = "DIR")]
    dir: Option<String>,

    /// TOML config file with a [diagram] table
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    config: Option<String>,

    /// Module grouping: 'file', 'module' or 'package'
    #[arg(short = 'g', long = "granularity", value_name = "NAME")]
    granularity: Option<String>,

    /// Node budget for external collapsing (non-positive means the default, 120)
    #[arg(long = "max-nodes", allow_negative_numbers = true)]
    max_nodes: Option<i64>,

    /// Skip I/O datasource detection
    #[arg(long = "no-io", default_value_t = false)]
    no_io: bool,

    /// Skip HTTP endpoint detection
    #[arg(long = "no-endpoints", default_value_t = false)]
    no_endpoints: bool,

    /// Largest file, in bytes, whose contents are scanned
    #[arg(long = "max-file-size", value_name = "BYTES")]
    max_file_size: Option<u64>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::All)]
    format: OutputFormat,

    /// Output file path (writes to file instead of stdout)
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    output: Option<String>,
}

fn run(args: Cli) -> bool {
    let total_start = Instant::now();

    // Initialize tracing subscriber for logging
    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .init();
    }

    let opts = ArchgraphOptions {
        input: args.input,
        dir: args.dir,
        config: args.config,
        overrides: DiagramOverrides {
            granularity: args.granularity,
            max_nodes: args.max_nodes,
            include_io: args.no_io.then_some(false),
            include_endpoints: args.no_endpoints.then_some(false),
        },
        max_file_size: args.max_file_size,
        format: args.format,
    };

    let result = run_main(&opts).and_then(|output| match &args.output {
        Some(path) => write_output(path, &output),
        None => {
            print!("{output}");
            Ok(())
        }
    });

    let ok = match result {
        Ok(()) => true,
        Err(e) => {
            eprintln!("Error: {e}");
            tracing::error!(error = %e, "execution failed");
            false
        }
    };

    let total_secs = total_start.elapsed().as_secs_f64();
    tracing::info!(total_secs, "complete");
    ok
}

fn main() {
    let args = Cli::parse();
    if !run(args) {
        std::process::exit(1);
    }
}
