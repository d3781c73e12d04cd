// src/graph/cycle.rs

//! Defensive acyclicity check.
//!
//! The layout algorithms themselves tolerate cycles (the sequencer breaks
//! them, the evaluators carry a depth budget), so this check is for
//! validation and diagnostics only; it is never invoked per render.

use petgraph::algo::toposort;
use petgraph::graphmap::DiGraphMap;

use crate::errors::{Result, SkillGridError};
use crate::graph::Graph;
use crate::types::BlockId;

/// Whether the dependency graph contains a cycle.
pub fn has_cycle(graph: &Graph) -> bool {
    cycle_witness(graph).is_some()
}

/// Fail with [`SkillGridError::DependencyCycle`] naming a block on the
/// cycle, if any.
pub fn ensure_acyclic(graph: &Graph) -> Result<()> {
    match cycle_witness(graph) {
        Some(id) => Err(SkillGridError::DependencyCycle(id)),
        None => Ok(()),
    }
}

/// Edge direction: parent -> child. A topological sort fails exactly when
/// there is a back-edge, and reports a node on the cycle.
fn cycle_witness(graph: &Graph) -> Option<BlockId> {
    let mut adjacency: DiGraphMap<BlockId, ()> = DiGraphMap::new();

    for id in graph.ids() {
        adjacency.add_node(id);
    }
    for (from, to) in graph.edges() {
        adjacency.add_edge(from, to, ());
    }

    match toposort(&adjacency, None) {
        Ok(_order) => None,
        Err(cycle) => Some(cycle.node_id()),
    }
}
