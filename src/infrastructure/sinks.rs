//! Output Sinks
//!
//! Concrete report destinations: the durable report file and the live
//! console mirror. Each is independent; the writer's SinkSet handles
//! failure isolation between them.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};

use crate::ports::ReportSink;

/// Durable file sink. The file is created fresh (truncated) per run.
pub struct FileSink {
    name: String,
    writer: BufWriter<File>,
}

impl FileSink {
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path)
            .with_context(|| format!("Failed to create report file {}", path.display()))?;
        Ok(Self {
            name: path.display().to_string(),
            writer: BufWriter::new(file),
        })
    }
}

impl ReportSink for FileSink {
    fn name(&self) -> &str {
        &self.name
    }

    fn write_text(&mut self, text: &str) -> io::Result<()> {
        self.writer.write_all(text.as_bytes())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

/// Live console mirror on stdout.
pub struct ConsoleSink;

impl ConsoleSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportSink for ConsoleSink {
    fn name(&self) -> &str {
        "console"
    }

    fn write_text(&mut self, text: &str) -> io::Result<()> {
        io::stdout().write_all(text.as_bytes())
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stdout().flush()
    }
}
