// Call-graph oracle for calltree.
// Built once from the upstream edge list, then only queried.

use std::collections::HashMap;
use std::fmt;

use serde::Deserialize;

use crate::domain::model::EdgeModel;
use crate::domain::signature::MethodSignature;

/// Graph precision chosen by the upstream analysis engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum Precision {
    #[serde(rename = "cha")]
    ClassHierarchy,
    #[serde(rename = "rta")]
    RapidType,
}

impl Precision {
    /// Parse precision from string (CLI input).
    pub fn from_str(s: &str) -> Option<Precision> {
        match s.to_lowercase().as_str() {
            "cha" | "class-hierarchy" => Some(Precision::ClassHierarchy),
            "rta" | "rapid-type" => Some(Precision::RapidType),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Precision::ClassHierarchy => "CHA",
            Precision::RapidType => "RTA",
        }
    }
}

impl fmt::Display for Precision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A caller and its callee list, in first-seen edge order.
#[derive(Debug)]
struct GraphNode {
    signature: MethodSignature,
    callees: Vec<MethodSignature>,
}

/// The "may call" multigraph, deduplicated per caller. Edge order within a
/// caller follows the input document: unspecified by contract, but stable,
/// which is all the fallback emission phase needs.
#[derive(Debug, Default)]
pub struct CallGraph {
    nodes: Vec<GraphNode>,
    index: HashMap<MethodSignature, usize>,
    call_count: usize,
}

impl CallGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the oracle from the upstream edge list.
    pub fn from_edges(edges: &[EdgeModel]) -> Self {
        let mut graph = Self::new();
        for edge in edges {
            graph.add_edge(edge.from.clone(), edge.to.clone());
        }
        graph
    }

    fn add_edge(&mut self, from: MethodSignature, to: MethodSignature) {
        let idx = match self.index.get(&from) {
            Some(&idx) => idx,
            None => {
                let idx = self.nodes.len();
                self.index.insert(from.clone(), idx);
                self.nodes.push(GraphNode {
                    signature: from,
                    callees: Vec::new(),
                });
                idx
            }
        };

        // A repeated (from, to) pair is one logical edge.
        if !self.nodes[idx].callees.contains(&to) {
            self.nodes[idx].callees.push(to);
            self.call_count += 1;
        }
    }

    /// The authoritative set of signatures `from` may call. Unknown callers
    /// (including library callees that never call back into the model) have
    /// no targets.
    pub fn call_targets_from(&self, from: &MethodSignature) -> &[MethodSignature] {
        self.index
            .get(from)
            .map(|&idx| self.nodes[idx].callees.as_slice())
            .unwrap_or(&[])
    }

    /// Total edge count of the whole graph.
    pub fn call_count(&self) -> usize {
        self.call_count
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Raw whole-graph dump: opaque text, one edge per line, independent of
    /// the traversal engine.
    pub fn dump(&self, precision: Precision) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "Call graph ({}): {} callers, {} edges\n",
            precision,
            self.node_count(),
            self.call_count
        ));
        for node in &self.nodes {
            for callee in &node.callees {
                out.push_str(&format!("{} -> {}\n", node.signature, callee));
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sig(class: &str, name: &str) -> MethodSignature {
        MethodSignature::new(class, name, vec![], "void")
    }

    fn edge(from: &MethodSignature, to: &MethodSignature) -> EdgeModel {
        EdgeModel {
            from: from.clone(),
            to: to.clone(),
        }
    }

    #[test]
    fn test_targets_preserve_edge_order() {
        let a = sig("com.example.A", "a");
        let b = sig("com.example.B", "b");
        let c = sig("com.example.C", "c");

        let graph = CallGraph::from_edges(&[edge(&a, &c), edge(&a, &b)]);
        assert_eq!(graph.call_targets_from(&a), &[c, b]);
    }

    #[test]
    fn test_duplicate_edges_collapse() {
        let a = sig("com.example.A", "a");
        let b = sig("com.example.B", "b");

        let graph = CallGraph::from_edges(&[edge(&a, &b), edge(&a, &b)]);
        assert_eq!(graph.call_targets_from(&a).len(), 1);
        assert_eq!(graph.call_count(), 1);
    }

    #[test]
    fn test_unknown_caller_has_no_targets() {
        let graph = CallGraph::new();
        assert!(graph.call_targets_from(&sig("com.example.X", "x")).is_empty());
        assert_eq!(graph.call_count(), 0);
    }

    #[test]
    fn test_self_edge_is_kept() {
        // Recursion is the traversal engine's problem, not the oracle's.
        let a = sig("com.example.A", "a");
        let graph = CallGraph::from_edges(&[edge(&a, &a)]);
        assert_eq!(graph.call_targets_from(&a), &[a.clone()]);
    }

    #[test]
    fn test_dump_lists_every_edge() {
        let a = sig("com.example.A", "a");
        let b = sig("com.example.B", "b");
        let c = sig("com.example.C", "c");

        let graph = CallGraph::from_edges(&[edge(&a, &b), edge(&b, &c)]);
        let dump = graph.dump(Precision::ClassHierarchy);

        assert!(dump.starts_with("Call graph (CHA): 2 callers, 2 edges\n"));
        assert!(dump.contains("<com.example.A: void a()> -> <com.example.B: void b()>"));
        assert!(dump.contains("<com.example.B: void b()> -> <com.example.C: void c()>"));
    }

    #[test]
    fn test_precision_from_str() {
        assert_eq!(Precision::from_str("cha"), Some(Precision::ClassHierarchy));
        assert_eq!(Precision::from_str("CHA"), Some(Precision::ClassHierarchy));
        assert_eq!(Precision::from_str("rta"), Some(Precision::RapidType));
        assert_eq!(Precision::from_str("points-to"), None);
    }
}
