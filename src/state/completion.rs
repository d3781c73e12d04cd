// src/state/completion.rs

use tracing::debug;

use crate::graph::Graph;
use crate::snapshot::{Block, Item, ItemKind, TaskKind};
use crate::state::{items_on_path, unlock, StateOptions};

/// Whether the block counts as completed.
///
/// A block is completed when every mandatory item on the active path is
/// completed and no item is locked. A block whose filtered item list is
/// empty is as completed as it is unlocked.
pub fn is_completed(graph: &Graph, block: &Block, opts: &StateOptions) -> bool {
    completed_within(graph, block, opts, opts.depth_budget)
}

pub(crate) fn completed_within(
    graph: &Graph,
    block: &Block,
    opts: &StateOptions,
    depth: u32,
) -> bool {
    if depth == 0 {
        debug!(block = block.id, "depth budget exhausted; treating block as incomplete");
        return false;
    }

    let items = items_on_path(block, opts);

    let all_mandatory_completed = items
        .iter()
        .filter(|item| is_mandatory(item))
        .all(|item| is_item_completed(item));
    if !all_mandatory_completed {
        return false;
    }

    if items.iter().any(|item| item.locked) {
        return false;
    }

    if items.is_empty() {
        return unlock::unlocked_within(graph, block, opts, depth - 1);
    }

    true
}

/// Task items always gate completion; skill items only when essential.
fn is_mandatory(item: &Item) -> bool {
    match item.kind {
        ItemKind::Skill { essential, .. } => essential,
        ItemKind::Task { .. } => true,
    }
}

/// A regular task or skill item is completed by its own flag; a choice task
/// once at least `min_choices` of its choices are.
pub fn is_item_completed(item: &Item) -> bool {
    match &item.kind {
        ItemKind::Task {
            task: TaskKind::Choice {
                min_choices,
                choices,
            },
            ..
        } => choices.iter().filter(|c| c.completed).count() >= *min_choices as usize,
        _ => item.completed,
    }
}
