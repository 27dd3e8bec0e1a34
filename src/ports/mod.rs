use std::io;

use crate::domain::traversal::RenderRecord;

pub mod report_writer;

/// Formats one call-tree record into its report line (indentation excluded).
pub trait RenderStyle {
    fn format_record(&self, record: &RenderRecord) -> String;
}

/// A destination for report text. Sinks are independent of one another; a
/// failing sink is the writer's problem to report and silence, never a
/// reason to stop the run.
pub trait ReportSink {
    fn name(&self) -> &str;
    fn write_text(&mut self, text: &str) -> io::Result<()>;
    fn flush(&mut self) -> io::Result<()>;
}
