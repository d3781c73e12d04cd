// src/graph/mod.rs

//! Dependency-graph representation and ordering.
//!
//! - [`graph`] holds the adjacency-indexed view over one snapshot's blocks.
//! - [`cycle`] is the defensive acyclicity check (validation only, never on
//!   the render hot path).
//! - [`topo`] contains the cycle-tolerant topological sequencer that the
//!   placer runs on.

pub mod cycle;
pub mod graph;
pub mod topo;

pub use cycle::{ensure_acyclic, has_cycle};
pub use graph::Graph;
pub use topo::topological_sort;
