// src/state/unlock.rs

use tracing::debug;

use crate::graph::Graph;
use crate::snapshot::{Block, BlockKind, ItemKind, TaskKind};
use crate::state::{completion, items_on_path, StateOptions};
use crate::types::BlockId;

/// Whether the block is reachable for the learner.
///
/// A submodule is unlocked as soon as any of its items is. A skill is
/// unlocked once any task on the active path is completed (for choice
/// tasks a single completed choice suffices), or, failing that, once every
/// gating parent is completed and every parent is unlocked.
///
/// A block absent from the visible graph is treated as parent-less and is
/// therefore vacuously unlocked.
pub fn is_unlocked(graph: &Graph, block: &Block, opts: &StateOptions) -> bool {
    unlocked_within(graph, block, opts, opts.depth_budget)
}

pub(crate) fn unlocked_within(
    graph: &Graph,
    block: &Block,
    opts: &StateOptions,
    depth: u32,
) -> bool {
    if depth == 0 {
        debug!(block = block.id, "depth budget exhausted; treating block as locked");
        return false;
    }

    let items = items_on_path(block, opts);

    if !block.is_skill() {
        return items.iter().any(|item| !item.locked);
    }

    let any_task_completed = items.iter().any(|item| match &item.kind {
        ItemKind::Task {
            task: TaskKind::Choice { choices, .. },
            ..
        } => choices.iter().any(|c| c.completed),
        _ => item.completed,
    });
    if any_task_completed {
        return true;
    }

    let parents: &[BlockId] = if graph.contains(block.id) {
        graph.parent_ids(block.id)
    } else {
        &[]
    };

    for &parent_id in parents {
        let Some(parent) = graph.lookup(parent_id) else {
            continue;
        };
        if gates_children(parent) && !completion::completed_within(graph, parent, opts, depth - 1) {
            return false;
        }
    }

    for &parent_id in parents {
        let Some(parent) = graph.lookup(parent_id) else {
            continue;
        };
        if !unlocked_within(graph, parent, opts, depth - 1) {
            return false;
        }
    }

    true
}

/// Submodule parents always gate their children; skill parents only when
/// essential.
fn gates_children(parent: &Block) -> bool {
    match parent.kind {
        BlockKind::Skill { essential, .. } => essential,
        BlockKind::Submodule => true,
    }
}
