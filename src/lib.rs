// src/lib.rs

//! skillgrid: deterministic grid layout and progress state for curriculum
//! dependency graphs.
//!
//! The crate receives one already-fetched circuit [`Snapshot`]
//! (blocks, groups, checkpoints) and derives:
//!
//! - rows for every placed block ([`layout::placement`]),
//! - blob geometry per group ([`layout::blob`]),
//! - per-block unlock/completion state ([`state`]).
//!
//! All computation is synchronous, single-threaded and pure. Identical
//! input yields identical output; edits invalidate everything and the
//! supported pattern is full recomputation, not incremental update.

pub mod errors;
pub mod graph;
pub mod layout;
pub mod logging;
pub mod snapshot;
pub mod state;
pub mod types;

use std::collections::BTreeMap;

use tracing::debug;

use crate::errors::Result;
use crate::graph::Graph;
use crate::layout::{assign_rows, assign_rows_with_checkpoints, compose_blobs, Blob};
use crate::snapshot::{Block, Snapshot};
use crate::types::{BlockId, PlacementMode, Point};

/// Derived geometry for one circuit view.
#[derive(Debug, Clone)]
pub struct CircuitLayout {
    /// Assigned row per visible, placed block; pair it with the block's own
    /// column for the full cell.
    pub rows: BTreeMap<BlockId, u32>,
    /// One blob per group with at least one visible member, in claim order.
    pub blobs: Vec<Blob>,
}

/// High-level entry point used by rendering collaborators.
///
/// This wires together:
/// - filtering to placed, visible blocks (`visible` is the caller's
///   editor-vs-learner predicate; unplaced blocks are excluded here, so the
///   placer never sees a missing column)
/// - graph construction
/// - row assignment (simple or checkpoint-staged against the snapshot's
///   checkpoint list)
/// - blob composition over the resulting positions
pub fn compute_layout<F>(
    snapshot: &Snapshot,
    visible: F,
    mode: PlacementMode,
) -> Result<CircuitLayout>
where
    F: Fn(&Block) -> bool,
{
    let blocks: Vec<Block> = snapshot
        .blocks
        .iter()
        .filter(|b| b.column.is_some() && visible(b))
        .cloned()
        .collect();

    let graph = Graph::build(blocks);
    debug!(blocks = graph.len(), ?mode, "computing circuit layout");

    let rows = match mode {
        PlacementMode::Simple => assign_rows(&graph)?,
        PlacementMode::CheckpointStaged => {
            assign_rows_with_checkpoints(&graph, &snapshot.checkpoints)?
        }
    };

    let mut positions: BTreeMap<BlockId, Point> = BTreeMap::new();
    for (&id, &row) in &rows {
        if let Some(column) = graph.block(id)?.column {
            positions.insert(id, Point::new(column, row));
        }
    }

    let blobs = compose_blobs(&snapshot.groups, &positions);

    Ok(CircuitLayout { rows, blobs })
}
