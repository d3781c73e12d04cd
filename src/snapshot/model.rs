// src/snapshot/model.rs

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::types::{BlockId, CheckpointId, GroupId, ItemId, PathId};

/// A placed-or-placeable unit in the circuit: a skill or a submodule.
///
/// `column` is supplied by the caller and read-only inside this crate;
/// `column == None` means the block has not been dropped onto the grid yet.
/// `row` may carry a previously computed value but is always recomputed by
/// the placer, which returns fresh rows instead of mutating the snapshot.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    pub id: BlockId,
    pub name: String,
    #[serde(default)]
    pub column: Option<u32>,
    #[serde(default)]
    pub row: Option<u32>,
    #[serde(default)]
    pub parents: Vec<BlockId>,
    #[serde(default)]
    pub children: Vec<BlockId>,
    #[serde(default)]
    pub items: Vec<Item>,
    #[serde(flatten)]
    pub kind: BlockKind,
}

/// Variant data of a block, discriminated by `blockType` on the wire.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "blockType", rename_all = "lowercase")]
pub enum BlockKind {
    #[serde(rename_all = "camelCase")]
    Skill {
        /// Completion of this skill is mandatory for its children's unlock.
        #[serde(default)]
        essential: bool,
        /// Hidden from learners until revealed; visibility is decided by the
        /// caller, the flag only travels with the snapshot.
        #[serde(default)]
        hidden: bool,
        /// Deadline this skill counts towards, if any.
        #[serde(default)]
        checkpoint: Option<CheckpointId>,
    },
    Submodule,
}

impl Block {
    pub fn is_skill(&self) -> bool {
        matches!(self.kind, BlockKind::Skill { .. })
    }

    /// Checkpoint reference, `None` for submodules and checkpoint-less skills.
    pub fn checkpoint(&self) -> Option<CheckpointId> {
        match self.kind {
            BlockKind::Skill { checkpoint, .. } => checkpoint,
            BlockKind::Submodule => None,
        }
    }
}

/// A completable unit attached to a block, discriminated by `itemType`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub locked: bool,
    #[serde(flatten)]
    pub kind: ItemKind,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "itemType", rename_all = "lowercase")]
pub enum ItemKind {
    /// A submodule-level reference to a skill.
    #[serde(rename_all = "camelCase")]
    Skill {
        #[serde(default)]
        essential: bool,
        #[serde(default)]
        hidden: bool,
    },
    /// A task on a skill, member of zero or more curriculum paths.
    #[serde(rename_all = "camelCase")]
    Task {
        #[serde(default)]
        paths: Vec<PathId>,
        #[serde(flatten)]
        task: TaskKind,
    },
}

/// Task variant data, discriminated by `taskType`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "taskType", rename_all = "lowercase")]
pub enum TaskKind {
    Regular,
    /// Completed once at least `min_choices` of the choices are completed.
    #[serde(rename_all = "camelCase")]
    Choice {
        min_choices: u32,
        #[serde(default)]
        choices: Vec<Choice>,
    },
}

/// One selectable alternative inside a choice task.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Choice {
    pub id: ItemId,
    pub name: String,
    #[serde(default)]
    pub completed: bool,
}

/// A named group of blocks, rendered as one blob region.
///
/// Member order is preserved; it decides allocation order inside a blob and
/// breaks area ties between blobs.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub id: GroupId,
    pub name: String,
    #[serde(default)]
    pub blocks: Vec<BlockId>,
}

/// A deadline used to stage placement.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Checkpoint {
    pub id: CheckpointId,
    pub name: String,
    pub deadline: DateTime<Utc>,
}

/// Snapshot as decoded from JSON, before validation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSnapshot {
    #[serde(default)]
    pub blocks: Vec<Block>,
    #[serde(default)]
    pub groups: Vec<Group>,
    #[serde(default)]
    pub checkpoints: Vec<Checkpoint>,
}

/// A validated snapshot of one circuit view.
///
/// Guarantees unique block, group and checkpoint ids. Dangling parent/child
/// references are deliberately *not* an error here: partial and incremental
/// data is expected, and [`Graph::build`](crate::graph::Graph::build) drops
/// them silently.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub blocks: Vec<Block>,
    pub groups: Vec<Group>,
    pub checkpoints: Vec<Checkpoint>,
}

impl Snapshot {
    /// Construct without validation; use `Snapshot::try_from(raw)` instead.
    pub(crate) fn new_unchecked(
        blocks: Vec<Block>,
        groups: Vec<Group>,
        checkpoints: Vec<Checkpoint>,
    ) -> Self {
        Self {
            blocks,
            groups,
            checkpoints,
        }
    }

    pub fn block(&self, id: BlockId) -> Option<&Block> {
        self.blocks.iter().find(|b| b.id == id)
    }

    /// Blocks that have been dropped onto the grid (`column` present).
    pub fn placed_blocks(&self) -> impl Iterator<Item = &Block> {
        self.blocks.iter().filter(|b| b.column.is_some())
    }
}
