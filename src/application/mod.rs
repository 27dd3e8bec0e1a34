//! Report Usecase
//!
//! One full batch run: per-root traversal in enumeration order, section
//! rendering to the sinks, raw graph dumps, and the console summaries the
//! report is bracketed by.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use rayon::prelude::*;

use crate::domain::callgraph::{CallGraph, Precision};
use crate::domain::model::ProgramModel;
use crate::domain::registry::MethodRegistry;
use crate::domain::traversal::{RenderRecord, TraversalEngine};
use crate::ports::report_writer::{SinkSet, TreeReportWriter};

pub struct ReportUsecase<'a> {
    pub registry: &'a MethodRegistry,
    pub graph: &'a CallGraph,
    pub writer: TreeReportWriter<'a>,
    pub parallel: bool,
}

impl ReportUsecase<'_> {
    /// Traverse every registered method as a root and stream the rendered
    /// sections to the sinks, in registration order.
    pub fn run(&self, sinks: &mut SinkSet) {
        let engine = TraversalEngine::new(self.registry, self.graph);
        let roots = self.registry.roots();

        let traversals: Vec<Vec<RenderRecord>> = if self.parallel {
            roots.par_iter().map(|root| engine.traverse(root)).collect()
        } else {
            roots.iter().map(|root| engine.traverse(root)).collect()
        };

        // Rendering stays sequential and in root order, so the report is
        // byte-identical to a serial run.
        for (root, records) in roots.iter().zip(&traversals) {
            self.writer.write_section(root, records, sinks);
        }
        sinks.flush_all();
    }
}

/// Console enumeration summary printed before any traversal: the class
/// list and per-class method counts.
pub fn print_enumeration(model: &ProgramModel) {
    println!("Found {} classes in the project\n", model.classes.len());

    println!("========================================");
    println!("Classes Found:");
    println!("========================================");
    for (i, class) in model.classes.iter().enumerate() {
        println!("{}. {}", i + 1, class.name);
    }

    for class in &model.classes {
        println!("\nClass: {}", class.name);
        println!("  Total methods: {}", class.methods.len());
    }

    println!("\nTotal entry points (methods): {}", model.method_count());
    println!();
}

/// Summary statistics printed after the run.
pub fn print_summary(model: &ProgramModel, graph: &CallGraph) {
    println!("\n========================================");
    println!("Summary Statistics");
    println!("========================================");
    println!("Classes analyzed: {}", model.classes.len());
    println!("Methods analyzed: {}", model.method_count());
    println!("Total call edges: {}", graph.call_count());
}

/// Write one precision's raw whole-graph dump. Independent of the traversal
/// engine; the dump file is created fresh per run.
pub fn dump_graph(graph: &CallGraph, precision: Precision, path: &Path) -> Result<()> {
    fs::write(path, graph.dump(precision))
        .with_context(|| format!("Failed to write {} dump to {}", precision, path.display()))?;
    println!("[Dump] Wrote {} graph to {}", precision, path.display());
    Ok(())
}
