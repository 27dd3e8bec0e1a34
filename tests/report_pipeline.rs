/// End-to-end pipeline tests: model document -> registry + oracle ->
/// traversal -> rendered report file.

use std::fs;
use std::path::Path;

use tempfile::tempdir;

use calltree::application::{self, ReportUsecase};
use calltree::domain::callgraph::{CallGraph, Precision};
use calltree::domain::registry::MethodRegistry;
use calltree::infrastructure::{FileSink, ModelLoader};
use calltree::ports::report_writer::{
    LineAnnotatedStyle, PlainArrowStyle, SinkSet, TreeReportWriter,
};

/// A model with a duplicate call site, a mutual recursion, and a library
/// callee that exists only in the edge set.
const MODEL: &str = r#"{
    "classes": [
        {
            "name": "com.example.App",
            "methods": [
                {
                    "name": "main",
                    "return_type": "void",
                    "declared_line": 3,
                    "body": [
                        {"kind": "invoke", "target": {"class_name": "com.example.Util",
                            "method_name": "helper", "parameter_types": [], "return_type": "void"}},
                        {"kind": "other"},
                        {"kind": "invoke", "target": {"class_name": "com.example.Util",
                            "method_name": "helper", "parameter_types": [], "return_type": "void"}},
                        {"kind": "invoke"}
                    ]
                }
            ]
        },
        {
            "name": "com.example.Util",
            "methods": [
                {
                    "name": "helper",
                    "return_type": "void",
                    "declared_line": 10,
                    "body": [
                        {"kind": "invoke", "target": {"class_name": "com.example.App",
                            "method_name": "main", "parameter_types": [], "return_type": "void"}}
                    ]
                }
            ]
        }
    ],
    "graphs": {
        "cha": [
            {"from": {"class_name": "com.example.App", "method_name": "main",
                      "parameter_types": [], "return_type": "void"},
             "to": {"class_name": "com.example.Util", "method_name": "helper",
                    "parameter_types": [], "return_type": "void"}},
            {"from": {"class_name": "com.example.App", "method_name": "main",
                      "parameter_types": [], "return_type": "void"},
             "to": {"class_name": "java.io.PrintStream", "method_name": "println",
                    "parameter_types": [], "return_type": "void"}},
            {"from": {"class_name": "com.example.Util", "method_name": "helper",
                      "parameter_types": [], "return_type": "void"},
             "to": {"class_name": "com.example.App", "method_name": "main",
                    "parameter_types": [], "return_type": "void"}}
        ],
        "rta": [
            {"from": {"class_name": "com.example.App", "method_name": "main",
                      "parameter_types": [], "return_type": "void"},
             "to": {"class_name": "com.example.Util", "method_name": "helper",
                    "parameter_types": [], "return_type": "void"}}
        ]
    }
}"#;

const EXPECTED_CHA_REPORT: &str = "\
<com.example.App: main>\n\
\x20   to <com.example.Util: void helper> (line 10)\n\
\x20       to <com.example.App: void main> (line 3)\n\
\x20   to <java.io.PrintStream: void println> (line -1)\n\
\n\
<com.example.Util: helper>\n\
\x20   to <com.example.App: void main> (line 3)\n\
\x20       to <com.example.Util: void helper> (line 10)\n\
\x20       to <java.io.PrintStream: void println> (line -1)\n\
\n";

fn write_model(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("analysis_model.json");
    fs::write(&path, MODEL).unwrap();
    path
}

fn render_report(dir: &Path, precision: Precision, parallel: bool) -> String {
    let model = ModelLoader::load(&write_model(dir)).unwrap();
    let registry = MethodRegistry::from_model(&model);
    let graph = match precision {
        Precision::ClassHierarchy => CallGraph::from_edges(&model.graphs.cha),
        Precision::RapidType => CallGraph::from_edges(&model.graphs.rta),
    };

    let report_path = dir.join("output.txt");
    let mut sinks = SinkSet::new();
    sinks.push(Box::new(FileSink::create(&report_path).unwrap()));

    let usecase = ReportUsecase {
        registry: &registry,
        graph: &graph,
        writer: TreeReportWriter::new(&LineAnnotatedStyle),
        parallel,
    };
    usecase.run(&mut sinks);
    drop(sinks);

    fs::read_to_string(&report_path).unwrap()
}

#[test]
fn cha_report_matches_contract_exactly() {
    let dir = tempdir().unwrap();
    assert_eq!(
        render_report(dir.path(), Precision::ClassHierarchy, false),
        EXPECTED_CHA_REPORT
    );
}

#[test]
fn rta_report_uses_the_narrower_graph() {
    let dir = tempdir().unwrap();
    let report = render_report(dir.path(), Precision::RapidType, false);
    assert_eq!(
        report,
        "<com.example.App: main>\n\
         \x20   to <com.example.Util: void helper> (line 10)\n\
         \n\
         <com.example.Util: helper>\n\
         \n"
    );
}

#[test]
fn rendering_is_idempotent() {
    let dir_a = tempdir().unwrap();
    let dir_b = tempdir().unwrap();
    let first = render_report(dir_a.path(), Precision::ClassHierarchy, false);
    let second = render_report(dir_b.path(), Precision::ClassHierarchy, false);
    assert_eq!(first, second);
}

#[test]
fn parallel_traversal_matches_serial_output() {
    let dir_a = tempdir().unwrap();
    let dir_b = tempdir().unwrap();
    let serial = render_report(dir_a.path(), Precision::ClassHierarchy, false);
    let parallel = render_report(dir_b.path(), Precision::ClassHierarchy, true);
    assert_eq!(serial, parallel);
}

#[test]
fn plain_style_drops_line_annotations() {
    let dir = tempdir().unwrap();
    let model = ModelLoader::load(&write_model(dir.path())).unwrap();
    let registry = MethodRegistry::from_model(&model);
    let graph = CallGraph::from_edges(&model.graphs.rta);

    let report_path = dir.path().join("plain.txt");
    let mut sinks = SinkSet::new();
    sinks.push(Box::new(FileSink::create(&report_path).unwrap()));

    let usecase = ReportUsecase {
        registry: &registry,
        graph: &graph,
        writer: TreeReportWriter::new(&PlainArrowStyle),
        parallel: false,
    };
    usecase.run(&mut sinks);
    drop(sinks);

    let report = fs::read_to_string(&report_path).unwrap();
    assert!(report.contains("    -> <com.example.Util: void helper>\n"));
    assert!(!report.contains("(line"));
}

#[test]
fn raw_dumps_cover_both_precisions() {
    let dir = tempdir().unwrap();
    let model = ModelLoader::load(&write_model(dir.path())).unwrap();
    let cha = CallGraph::from_edges(&model.graphs.cha);
    let rta = CallGraph::from_edges(&model.graphs.rta);

    let cha_path = dir.path().join("output_CHA.txt");
    let rta_path = dir.path().join("output_RTA.txt");
    application::dump_graph(&cha, Precision::ClassHierarchy, &cha_path).unwrap();
    application::dump_graph(&rta, Precision::RapidType, &rta_path).unwrap();

    let cha_dump = fs::read_to_string(&cha_path).unwrap();
    assert!(cha_dump.starts_with("Call graph (CHA): 2 callers, 3 edges\n"));
    assert!(cha_dump
        .contains("<com.example.App: void main()> -> <java.io.PrintStream: void println()>"));

    let rta_dump = fs::read_to_string(&rta_path).unwrap();
    assert!(rta_dump.starts_with("Call graph (RTA): 1 callers, 1 edges\n"));
}
