// Command-line entry point for calltree.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use clap::Parser;

use calltree::application::{self, ReportUsecase};
use calltree::config::ReportConfig;
use calltree::domain::callgraph::{CallGraph, Precision};
use calltree::domain::registry::MethodRegistry;
use calltree::infrastructure::{concurrency, ConsoleSink, FileSink, ModelLoader};
use calltree::ports::report_writer::{SinkSet, StyleKind, TreeReportWriter};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Analysis model document (JSON) produced by the upstream engine
    #[arg(short, long)]
    model: Option<PathBuf>,

    /// Report output path
    #[arg(short, long)]
    output: Option<String>,

    /// Report line style (lines, plain)
    #[arg(short, long)]
    style: Option<String>,

    /// Graph precision driving the tree report (cha, rta)
    #[arg(short, long)]
    precision: Option<String>,

    /// Optional TOML file with report options
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Do not mirror the report to the console
    #[arg(long)]
    no_console: bool,

    /// Traverse roots one at a time instead of on the rayon pool
    #[arg(long)]
    serial: bool,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error rendering call-tree report:");
        eprintln!("{:?}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = resolve_config(&cli)?;

    // Working-directory default when no model path is given.
    let model_path = cli
        .model
        .clone()
        .unwrap_or_else(|| PathBuf::from("analysis_model.json"));

    println!("========================================");
    println!("Rendering Call-Tree Report");
    println!("========================================");
    println!("Model path: {}", model_path.display());
    println!();

    let model = ModelLoader::load(&model_path)?;
    application::print_enumeration(&model);

    if !cli.serial {
        if let Err(e) = concurrency::init_thread_pool() {
            eprintln!("[CallTree] Warning: thread pool init failed: {}", e);
        }
    }

    let registry = MethodRegistry::from_model(&model);
    let cha = CallGraph::from_edges(&model.graphs.cha);
    let rta = CallGraph::from_edges(&model.graphs.rta);
    let graph = match config.precision {
        Precision::ClassHierarchy => &cha,
        Precision::RapidType => &rta,
    };

    println!("========================================");
    println!("Call Graph Results ({})", config.precision);
    println!("========================================");
    println!("Total call edges: {}", graph.call_count());
    println!();

    println!("Traversing all reachable methods...");
    let mut sinks = SinkSet::new();
    match FileSink::create(Path::new(&config.report_path)) {
        Ok(sink) => sinks.push(Box::new(sink)),
        // Not fatal: the console mirror may still carry the report.
        Err(e) => eprintln!("[Report] Cannot open report file: {:#}", e),
    }
    if !cli.no_console {
        sinks.push(Box::new(ConsoleSink::new()));
    }

    let writer =
        TreeReportWriter::new(config.style.style()).with_indent_unit(&config.indent_unit);
    let usecase = ReportUsecase {
        registry: &registry,
        graph,
        writer,
        parallel: !cli.serial,
    };
    usecase.run(&mut sinks);
    println!("\nSuccessfully wrote call-tree report to {}", config.report_path);

    if let Err(e) =
        application::dump_graph(&cha, Precision::ClassHierarchy, Path::new(&config.cha_dump_path))
    {
        eprintln!("[Dump] Warning: {:#}", e);
    }
    if let Err(e) =
        application::dump_graph(&rta, Precision::RapidType, Path::new(&config.rta_dump_path))
    {
        eprintln!("[Dump] Warning: {:#}", e);
    }

    application::print_summary(&model, graph);

    Ok(())
}

fn resolve_config(cli: &Cli) -> Result<ReportConfig> {
    let mut config = match &cli.config {
        Some(path) => ReportConfig::load(path)?,
        None => ReportConfig::default(),
    };

    // CLI flags win over config file values.
    if let Some(output) = &cli.output {
        config.report_path = output.clone();
    }
    if let Some(style) = &cli.style {
        config.style =
            StyleKind::from_str(style).ok_or_else(|| anyhow!("Unknown report style: {}", style))?;
    }
    if let Some(precision) = &cli.precision {
        config.precision = Precision::from_str(precision)
            .ok_or_else(|| anyhow!("Unknown graph precision: {}", precision))?;
    }

    Ok(config)
}
