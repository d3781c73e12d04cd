// src/state/mod.rs

//! Unlock / completion evaluation.
//!
//! Two mutually recursive pure predicates over the visible graph and the
//! blocks' item state. Both take their inputs explicitly (graph, block,
//! [`StateOptions`]) and share a recursion-depth budget that strictly
//! decreases on every recursive call. An exhausted budget evaluates to
//! `false`: under ambiguous (cyclic) ground truth a block renders as
//! locked/incomplete, never loops.

pub mod completion;
pub mod unlock;

pub use completion::{is_completed, is_item_completed};
pub use unlock::is_unlocked;

use crate::snapshot::{Block, Item, ItemKind};
use crate::types::PathId;

/// Default recursion-depth budget for the evaluators. Far deeper than any
/// real curriculum graph; the cap only exists to bound work on transient
/// cycles.
pub const DEFAULT_DEPTH_BUDGET: u32 = 100;

/// Evaluation context shared by both predicates.
#[derive(Debug, Clone)]
pub struct StateOptions {
    /// Only items on this path count towards unlock/completion; `None`
    /// means no filtering.
    pub active_path: Option<PathId>,
    /// Editors see every item regardless of the active path.
    pub edit_mode: bool,
    /// Recursion budget; see [`DEFAULT_DEPTH_BUDGET`].
    pub depth_budget: u32,
}

impl Default for StateOptions {
    fn default() -> Self {
        Self {
            active_path: None,
            edit_mode: false,
            depth_budget: DEFAULT_DEPTH_BUDGET,
        }
    }
}

/// The block's items as filtered by the active-path selection.
///
/// The filter only applies to skill blocks outside edit mode; submodule
/// items are not path-scoped.
pub(crate) fn items_on_path<'a>(block: &'a Block, opts: &StateOptions) -> Vec<&'a Item> {
    let path = match opts.active_path {
        Some(p) if !opts.edit_mode && block.is_skill() => p,
        _ => return block.items.iter().collect(),
    };

    block
        .items
        .iter()
        .filter(|item| match &item.kind {
            ItemKind::Task { paths, .. } => paths.contains(&path),
            ItemKind::Skill { .. } => true,
        })
        .collect()
}
