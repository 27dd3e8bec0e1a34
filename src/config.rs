//! Report Configuration
//!
//! Defaults, an optional TOML file, and CLI overrides on top. The file form
//! uses the same field names as this struct; missing fields keep defaults.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::domain::callgraph::Precision;
use crate::ports::report_writer::StyleKind;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Call-tree report destination.
    pub report_path: String,
    /// Raw dump destination for the class-hierarchy graph.
    pub cha_dump_path: String,
    /// Raw dump destination for the rapid-type graph.
    pub rta_dump_path: String,
    /// Indentation unit, repeated once per depth level.
    pub indent_unit: String,
    /// Report line style.
    pub style: StyleKind,
    /// Which graph precision drives the tree report.
    pub precision: Precision,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            report_path: "output.txt".to_string(),
            cha_dump_path: "output_CHA.txt".to_string(),
            rta_dump_path: "output_RTA.txt".to_string(),
            indent_unit: "    ".to_string(),
            style: StyleKind::Lines,
            precision: Precision::ClassHierarchy,
        }
    }
}

impl ReportConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = toml::from_str(&raw)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        Ok(config)
    }
}
