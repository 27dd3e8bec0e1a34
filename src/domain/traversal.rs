//! Call-Tree Traversal Engine
//!
//! Depth-first walk of the call graph from one root at a time, reconciling
//! the oracle's unordered edges against the order invocations textually
//! appear in the caller's body. The graph is the ground truth for
//! reachability; the statement scan supplies a meaningful order for every
//! edge it can explain, and the oracle's own (stable) order covers the rest.

use std::collections::HashSet;

use crate::domain::callgraph::CallGraph;
use crate::domain::registry::MethodRegistry;
use crate::domain::signature::MethodSignature;
use crate::domain::sites::call_sites;

/// One line of a rendered call tree: the invoked target, the depth it is
/// printed at, and the target's declared line when the registry knows it.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderRecord {
    pub depth: usize,
    pub target: MethodSignature,
    pub line: Option<u32>,
}

/// Walks the call graph from every registered method as a root. The engine
/// holds only shared read-only state; each `traverse` call owns its path
/// set, so traversals can run concurrently across roots.
pub struct TraversalEngine<'a> {
    registry: &'a MethodRegistry,
    graph: &'a CallGraph,
}

impl<'a> TraversalEngine<'a> {
    pub fn new(registry: &'a MethodRegistry, graph: &'a CallGraph) -> Self {
        Self { registry, graph }
    }

    /// Depth-first pre-order record stream for one root. Every root starts
    /// with a fresh, empty path.
    pub fn traverse(&self, root: &MethodSignature) -> Vec<RenderRecord> {
        let mut records = Vec::new();
        let mut path = HashSet::new();
        self.visit(root, 1, &mut path, &mut records);
        records
    }

    fn visit(
        &self,
        node: &MethodSignature,
        depth: usize,
        path: &mut HashSet<MethodSignature>,
        out: &mut Vec<RenderRecord>,
    ) {
        // Cycle guard: a signature never appears twice along one path.
        if !path.insert(node.clone()) {
            return;
        }

        let targets = self.graph.call_targets_from(node);
        let sites = self
            .registry
            .lookup(node)
            .map(|descriptor| call_sites(&descriptor))
            .unwrap_or_default();

        // Phase 1: statement order. A site only counts when its resolved
        // target is an actual graph edge; the first site for a target wins,
        // so repeated calls to the same callee produce one subtree.
        let mut emitted: HashSet<MethodSignature> = HashSet::new();
        for site in &sites {
            let Some(target) = &site.invokes else {
                continue;
            };
            if targets.contains(target) && emitted.insert(target.clone()) {
                out.push(self.record(depth, target));
                self.visit(target, depth + 1, path, out);
            }
        }

        // Phase 2: edges the statement scan could not explain, in the
        // oracle's own order. No edge is ever lost to a missing call site.
        for target in targets {
            if emitted.contains(target) {
                continue;
            }
            out.push(self.record(depth, target));
            self.visit(target, depth + 1, path, out);
        }

        // Pop on return: sibling subtrees start from this node's path, not
        // from whatever an earlier branch visited.
        path.remove(node);
    }

    fn record(&self, depth: usize, target: &MethodSignature) -> RenderRecord {
        RenderRecord {
            depth,
            target: target.clone(),
            line: self.declared_line(target),
        }
    }

    /// Declared line of the target, via registry lookup. Unknown signature,
    /// missing body, and missing position all collapse to `None`.
    fn declared_line(&self, target: &MethodSignature) -> Option<u32> {
        self.registry.lookup(target).and_then(|d| d.body_line())
    }
}
