//! Diagram options and their normalization.

use std::str::FromStr;

use serde::Serialize;
use strum_macros::{Display, EnumString, IntoStaticStr};

pub const DEFAULT_MAX_NODES: usize = 120;

/// How files are grouped into module nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[derive(Display, EnumString, IntoStaticStr)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    /// One node per file.
    File,
    /// One node per anchored second-level directory (`src/api`), else top-level.
    #[default]
    Module,
    /// One node per top-level directory.
    Package,
}

impl Granularity {
    /// Parse a granularity name; unknown or empty names fall back to `module`.
    pub fn parse_lenient(name: &str) -> Self {
        Self::from_str(name.trim()).unwrap_or_default()
    }

    pub fn as_str(&self) -> &'static str {
        (*self).into()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagramOptions {
    pub granularity: Granularity,
    /// Governs the external collapsing threshold only; not a hard node cap.
    pub max_nodes: usize,
    pub include_io: bool,
    pub include_endpoints: bool,
}

impl Default for DiagramOptions {
    fn default() -> Self {
        Self {
            granularity: Granularity::Module,
            max_nodes: DEFAULT_MAX_NODES,
            include_io: true,
            include_endpoints: true,
        }
    }
}

impl DiagramOptions {
    /// Build options from loosely typed values, normalizing anything invalid.
    pub fn from_raw(
        granularity: &str,
        max_nodes: i64,
        include_io: bool,
        include_endpoints: bool,
    ) -> Self {
        Self {
            granularity: Granularity::parse_lenient(granularity),
            max_nodes: normalize_max_nodes(max_nodes),
            include_io,
            include_endpoints,
        }
    }

    pub fn with_granularity(mut self, granularity: Granularity) -> Self {
        self.granularity = granularity;
        self
    }

    pub fn with_max_nodes(mut self, max_nodes: usize) -> Self {
        self.max_nodes = max_nodes;
        self
    }

    pub fn with_io(mut self, include_io: bool) -> Self {
        self.include_io = include_io;
        self
    }

    pub fn with_endpoints(mut self, include_endpoints: bool) -> Self {
        self.include_endpoints = include_endpoints;
        self
    }

    /// `max_nodes` with zero replaced by the default.
    pub fn effective_max_nodes(&self) -> usize {
        if self.max_nodes == 0 {
            DEFAULT_MAX_NODES
        } else {
            self.max_nodes
        }
    }
}

/// Non-positive node budgets become [`DEFAULT_MAX_NODES`].
pub fn normalize_max_nodes(raw: i64) -> usize {
    usize::try_from(raw)
        .ok()
        .filter(|n| *n > 0)
        .unwrap_or(DEFAULT_MAX_NODES)
}
