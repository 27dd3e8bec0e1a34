use dashmap::DashMap;
use rayon::prelude::*;

use std::collections::HashSet;

use crate::domain::model::{MethodModel, ProgramModel, StatementModel};
use crate::domain::signature::MethodSignature;

/// One statement of a registered method body, in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// An invocation expression. The target is absent when the upstream
    /// engine could not resolve the expression to a signature.
    Invoke(Option<MethodSignature>),
    /// Any non-invocation statement; opaque to the report.
    Other,
}

/// Everything the traversal needs to know about one registered method.
#[derive(Debug, Clone)]
pub struct MethodDescriptor {
    pub signature: MethodSignature,
    pub declared_line: Option<u32>,
    pub body: Option<Vec<Statement>>,
}

impl MethodDescriptor {
    pub fn has_body(&self) -> bool {
        self.body.is_some()
    }

    /// Declared first line, only meaningful for methods with a body. The
    /// report renders `None` as the `-1` sentinel.
    pub fn body_line(&self) -> Option<u32> {
        if self.has_body() {
            self.declared_line
        } else {
            None
        }
    }
}

/// Signature → descriptor lookup, built exactly once per run and read-only
/// afterwards.
///
/// Descriptors go into a DashMap so construction can parallelize over
/// classes; lookups clone out of the map to avoid holding shard locks.
/// Registration order is kept separately — it is the order roots are
/// traversed and reported in.
pub struct MethodRegistry {
    descriptors: DashMap<MethodSignature, MethodDescriptor>,
    order: Vec<MethodSignature>,
}

impl Default for MethodRegistry {
    fn default() -> Self {
        Self {
            descriptors: DashMap::new(),
            order: Vec::new(),
        }
    }
}

impl MethodRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the registry from the analysis model, indexing classes in
    /// parallel. Enumeration order is the document's own class/method order.
    pub fn from_model(model: &ProgramModel) -> Self {
        let descriptors = DashMap::new();

        model.classes.par_iter().for_each(|class| {
            for method in &class.methods {
                let descriptor = descriptor_for(&class.name, method);
                descriptors.insert(descriptor.signature.clone(), descriptor);
            }
        });

        let mut seen = HashSet::new();
        let mut order = Vec::with_capacity(model.method_count());
        for class in &model.classes {
            for method in &class.methods {
                let sig = method.signature(&class.name);
                if seen.insert(sig.clone()) {
                    order.push(sig);
                }
            }
        }

        Self { descriptors, order }
    }

    /// Insert or overwrite by signature.
    pub fn register(&mut self, descriptor: MethodDescriptor) {
        let sig = descriptor.signature.clone();
        if self.descriptors.insert(sig.clone(), descriptor).is_none() {
            self.order.push(sig);
        }
    }

    /// Absent rather than failing for unknown signatures: a signature seen
    /// only in graph edges (library callee) is "unknown body, unknown line".
    pub fn lookup(&self, signature: &MethodSignature) -> Option<MethodDescriptor> {
        self.descriptors.get(signature).map(|r| r.clone())
    }

    /// Registered signatures in registration order; every one of these is a
    /// traversal root.
    pub fn roots(&self) -> &[MethodSignature] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

fn descriptor_for(class_name: &str, method: &MethodModel) -> MethodDescriptor {
    let body = method.body.as_ref().map(|statements| {
        statements
            .iter()
            .map(|s| match s {
                StatementModel::Invoke { target } => Statement::Invoke(target.clone()),
                StatementModel::Other => Statement::Other,
            })
            .collect()
    });

    MethodDescriptor {
        signature: method.signature(class_name),
        declared_line: method.declared_line,
        body,
    }
}
