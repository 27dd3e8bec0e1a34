//! Call-Site Extraction
//!
//! Scans a method body in statement order and yields its invocation sites.
//! Recomputed on demand at each traversal step; never cached across a run.

use crate::domain::registry::{MethodDescriptor, Statement};
use crate::domain::signature::MethodSignature;

/// A single invocation statement inside one method body.
#[derive(Debug, Clone, PartialEq)]
pub struct CallSite {
    /// Index of the statement within the ordered body.
    pub position: usize,
    /// Resolved target; absent when the invocation expression could not be
    /// resolved to a signature.
    pub invokes: Option<MethodSignature>,
}

/// Ordered call sites of a method: one per invocation statement, in the
/// same order as the statement list. Methods without a body, or with no
/// invocation statements, yield an empty sequence.
pub fn call_sites(descriptor: &MethodDescriptor) -> Vec<CallSite> {
    let Some(body) = &descriptor.body else {
        return Vec::new();
    };

    body.iter()
        .enumerate()
        .filter_map(|(position, statement)| match statement {
            Statement::Invoke(target) => Some(CallSite {
                position,
                invokes: target.clone(),
            }),
            Statement::Other => None,
        })
        .collect()
}
