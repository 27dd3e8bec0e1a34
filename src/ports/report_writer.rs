//! Tree Report Writer
//!
//! Consumes the traversal engine's record streams and writes one indented
//! section per root, through a pluggable line style, to every configured
//! sink. One traversal feeds all sinks; nothing is re-traversed.

use serde::Deserialize;

use crate::domain::signature::MethodSignature;
use crate::domain::traversal::RenderRecord;
use crate::ports::{RenderStyle, ReportSink};

/// `to <Class: ReturnType name> (line N)` with `-1` when the line is
/// unknown. This is the report's file-format contract.
pub struct LineAnnotatedStyle;

impl RenderStyle for LineAnnotatedStyle {
    fn format_record(&self, record: &RenderRecord) -> String {
        let line = record.line.map(i64::from).unwrap_or(-1);
        format!("to {} (line {})", record.target.qualified(), line)
    }
}

/// `-> <Class: ReturnType name>` without line annotations.
pub struct PlainArrowStyle;

impl RenderStyle for PlainArrowStyle {
    fn format_record(&self, record: &RenderRecord) -> String {
        format!("-> {}", record.target.qualified())
    }
}

/// Named styles selectable from the CLI or config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StyleKind {
    Lines,
    Plain,
}

impl StyleKind {
    pub fn from_str(s: &str) -> Option<StyleKind> {
        match s.to_lowercase().as_str() {
            "lines" | "line" => Some(StyleKind::Lines),
            "plain" | "arrow" => Some(StyleKind::Plain),
            _ => None,
        }
    }

    pub fn style(&self) -> &'static dyn RenderStyle {
        match self {
            StyleKind::Lines => &LineAnnotatedStyle,
            StyleKind::Plain => &PlainArrowStyle,
        }
    }
}

/// A set of sinks written in lockstep. The first write error on a sink is
/// reported on stderr and marks that sink dead; later text is skipped for
/// it while the remaining sinks keep going.
pub struct SinkSet {
    slots: Vec<SinkSlot>,
}

struct SinkSlot {
    sink: Box<dyn ReportSink>,
    dead: bool,
}

impl SinkSet {
    pub fn new() -> Self {
        Self { slots: Vec::new() }
    }

    pub fn push(&mut self, sink: Box<dyn ReportSink>) {
        self.slots.push(SinkSlot { sink, dead: false });
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Write `text` to every live sink.
    pub fn broadcast(&mut self, text: &str) {
        for slot in &mut self.slots {
            if slot.dead {
                continue;
            }
            if let Err(e) = slot.sink.write_text(text) {
                eprintln!("[Report] {} sink failed, dropping it: {}", slot.sink.name(), e);
                slot.dead = true;
            }
        }
    }

    pub fn flush_all(&mut self) {
        for slot in &mut self.slots {
            if slot.dead {
                continue;
            }
            if let Err(e) = slot.sink.flush() {
                eprintln!("[Report] {} sink failed on flush: {}", slot.sink.name(), e);
                slot.dead = true;
            }
        }
    }
}

impl Default for SinkSet {
    fn default() -> Self {
        Self::new()
    }
}

/// Renders root sections: a header line, one indented line per record, and
/// a trailing blank line.
pub struct TreeReportWriter<'a> {
    style: &'a dyn RenderStyle,
    indent_unit: String,
}

impl<'a> TreeReportWriter<'a> {
    pub fn new(style: &'a dyn RenderStyle) -> Self {
        Self {
            style,
            indent_unit: "    ".to_string(),
        }
    }

    pub fn with_indent_unit(mut self, unit: &str) -> Self {
        self.indent_unit = unit.to_string();
        self
    }

    /// Render one root's section into a string.
    pub fn render_section(&self, root: &MethodSignature, records: &[RenderRecord]) -> String {
        let mut out = String::new();
        out.push_str(&root.header());
        out.push('\n');
        for record in records {
            out.push_str(&self.indent_unit.repeat(record.depth));
            out.push_str(&self.style.format_record(record));
            out.push('\n');
        }
        out.push('\n');
        out
    }

    /// Render and broadcast one root's section.
    pub fn write_section(
        &self,
        root: &MethodSignature,
        records: &[RenderRecord],
        sinks: &mut SinkSet,
    ) {
        let section = self.render_section(root, records);
        sinks.broadcast(&section);
    }
}
