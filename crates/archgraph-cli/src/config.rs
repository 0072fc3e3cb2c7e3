//! Optional TOML configuration.
//!
//! ```toml
//! [diagram]
//! granularity = "package"
//! max_nodes = 60
//! include_io = true
//! include_endpoints = false
//!
//! [scan]
//! max_file_size = 262144
//! ```
//!
//! Every field is optional. Command-line flags override the file, which
//! overrides the built-in defaults.

use std::fs;
use std::str::FromStr;

use serde::Deserialize;
use tracing::debug;

use archgraph_core::{DiagramOptions, Granularity, normalize_max_nodes};
use archgraph_error::{Error, Result};

use crate::discovery::DEFAULT_MAX_FILE_SIZE;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DiagramSection {
    pub granularity: Option<String>,
    pub max_nodes: Option<i64>,
    pub include_io: Option<bool>,
    pub include_endpoints: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScanSection {
    pub max_file_size: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ArchgraphConfig {
    pub diagram: DiagramSection,
    pub scan: ScanSection,
}

/// Values given on the command line; `None` means "not given".
#[derive(Debug, Clone, Default)]
pub struct DiagramOverrides {
    pub granularity: Option<String>,
    pub max_nodes: Option<i64>,
    pub include_io: Option<bool>,
    pub include_endpoints: Option<bool>,
}

impl ArchgraphConfig {
    pub fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: &str) -> Result<Self> {
        let text = fs::read_to_string(path)
            .map_err(|e| Error::from(e).with_context("path", path))?;
        let config = Self::parse(&text).map_err(|e| e.with_context("path", path))?;
        debug!(path, "config loaded");
        Ok(config)
    }

    /// Layer command-line overrides over this file over the defaults.
    ///
    /// Unknown granularity names are errors here; `DiagramOptions::from_raw`
    /// is the lenient path.
    pub fn diagram_options(&self, overrides: &DiagramOverrides) -> Result<DiagramOptions> {
        let mut options = DiagramOptions::default();

        if let Some(name) = &overrides.granularity {
            options.granularity = Granularity::from_str(name).map_err(|_| {
                Error::invalid_argument(format!(
                    "unknown granularity '{name}', expected file, module or package"
                ))
                .with_operation("config::diagram_options")
            })?;
        } else if let Some(name) = &self.diagram.granularity {
            options.granularity = Granularity::from_str(name).map_err(|_| {
                Error::config_invalid(format!("unknown granularity '{name}' in [diagram]"))
                    .with_operation("config::diagram_options")
            })?;
        }

        if let Some(max_nodes) = overrides.max_nodes.or(self.diagram.max_nodes) {
            options.max_nodes = normalize_max_nodes(max_nodes);
        }
        if let Some(include_io) = overrides.include_io.or(self.diagram.include_io) {
            options.include_io = include_io;
        }
        if let Some(include_endpoints) = overrides
            .include_endpoints
            .or(self.diagram.include_endpoints)
        {
            options.include_endpoints = include_endpoints;
        }

        Ok(options)
    }

    pub fn max_file_size(&self, override_size: Option<u64>) -> u64 {
        override_size
            .or(self.scan.max_file_size)
            .unwrap_or(DEFAULT_MAX_FILE_SIZE)
    }
}
