// Domain types for calltree: the analysis model, the method registry, the
// call-graph oracle, and the traversal engine.

pub mod callgraph;
pub mod model;
pub mod registry;
pub mod signature;
pub mod sites;
pub mod traversal;
