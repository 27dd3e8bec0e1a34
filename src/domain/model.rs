//! Analysis Model Document
//!
//! Serde schema for the JSON document the upstream static-analysis engine
//! produces: the class/method enumeration with statement-level detail, plus
//! one edge list per call-graph precision. Everything here is read-only
//! input; class order in the document is the report's enumeration order.

use serde::Deserialize;

use crate::domain::signature::MethodSignature;

/// The whole input document.
#[derive(Debug, Deserialize)]
pub struct ProgramModel {
    pub classes: Vec<ClassModel>,
    pub graphs: GraphSection,
}

impl ProgramModel {
    /// Total method count across all classes.
    pub fn method_count(&self) -> usize {
        self.classes.iter().map(|c| c.methods.len()).sum()
    }
}

/// One class and its methods, in declaration order.
#[derive(Debug, Deserialize)]
pub struct ClassModel {
    pub name: String,
    #[serde(default)]
    pub methods: Vec<MethodModel>,
}

/// One method. A missing `body` means the engine saw no statements for it
/// (abstract, native, or simply not analyzed).
#[derive(Debug, Deserialize)]
pub struct MethodModel {
    pub name: String,
    #[serde(default)]
    pub parameter_types: Vec<String>,
    pub return_type: String,
    #[serde(default)]
    pub declared_line: Option<u32>,
    #[serde(default)]
    pub body: Option<Vec<StatementModel>>,
}

impl MethodModel {
    pub fn signature(&self, class_name: &str) -> MethodSignature {
        MethodSignature::new(
            class_name,
            self.name.as_str(),
            self.parameter_types.clone(),
            self.return_type.as_str(),
        )
    }
}

/// One statement of a method body. Only invocations carry detail; a target
/// may be absent when the engine could not resolve the invocation
/// expression to a signature.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StatementModel {
    Invoke {
        #[serde(default)]
        target: Option<MethodSignature>,
    },
    Other,
}

/// Edge lists for the two precisions the upstream engine runs.
#[derive(Debug, Deserialize)]
pub struct GraphSection {
    #[serde(default)]
    pub cha: Vec<EdgeModel>,
    #[serde(default)]
    pub rta: Vec<EdgeModel>,
}

/// A directed "may call" edge. List order is the oracle's own order and is
/// preserved, but carries no source-level meaning.
#[derive(Debug, Clone, Deserialize)]
pub struct EdgeModel {
    pub from: MethodSignature,
    pub to: MethodSignature,
}
