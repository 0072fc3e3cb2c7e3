//! The fixed legend embedded in every diagram.

use crate::options::Granularity;

fn grouping_note(granularity: Granularity) -> &'static str {
    match granularity {
        Granularity::File => "one node per file",
        Granularity::Module => "one node per top-level directory, or per child of src/lib/pkg/app/cmd/internal",
        Granularity::Package => "one node per top-level directory",
    }
}

/// Legend text for a diagram at `granularity`. Lines are `\n`-separated, no trailing newline.
pub fn legend_for(granularity: Granularity) -> String {
    [
        format!(
            "Legend (granularity: {}; {})",
            granularity.as_str(),
            grouping_note(granularity)
        ),
        "  [name]           module, external dependency, datasource or entrypoint".to_string(),
        "  (METHOD /path)   HTTP endpoint".to_string(),
        "  A --> B          A imports B, or endpoint A is served by module B".to_string(),
        "  A ..> B <<how>>  A uses I/O capability B (reads, reads/writes, calls, uses)".to_string(),
        "  [external/*]     low-frequency external dependencies collapsed into one node"
            .to_string(),
    ]
    .join("\n")
}
