#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use skillgrid::snapshot::{
    Block, BlockKind, Checkpoint, Choice, Group, Item, ItemKind, RawSnapshot, Snapshot, TaskKind,
};
use skillgrid::types::{BlockId, CheckpointId, GroupId, ItemId, PathId};

/// Builder for a skill or submodule [`Block`] to simplify test setup.
pub struct BlockBuilder {
    block: Block,
}

impl BlockBuilder {
    pub fn skill(id: BlockId) -> Self {
        Self {
            block: Block {
                id,
                name: format!("skill-{id}"),
                column: None,
                row: None,
                parents: vec![],
                children: vec![],
                items: vec![],
                kind: BlockKind::Skill {
                    essential: false,
                    hidden: false,
                    checkpoint: None,
                },
            },
        }
    }

    pub fn submodule(id: BlockId) -> Self {
        Self {
            block: Block {
                id,
                name: format!("submodule-{id}"),
                column: None,
                row: None,
                parents: vec![],
                children: vec![],
                items: vec![],
                kind: BlockKind::Submodule,
            },
        }
    }

    pub fn name(mut self, name: &str) -> Self {
        self.block.name = name.to_string();
        self
    }

    pub fn column(mut self, column: u32) -> Self {
        self.block.column = Some(column);
        self
    }

    pub fn parent(mut self, id: BlockId) -> Self {
        self.block.parents.push(id);
        self
    }

    pub fn child(mut self, id: BlockId) -> Self {
        self.block.children.push(id);
        self
    }

    pub fn item(mut self, item: Item) -> Self {
        self.block.items.push(item);
        self
    }

    /// Only meaningful for skill blocks; ignored for submodules.
    pub fn essential(mut self, val: bool) -> Self {
        if let BlockKind::Skill { essential, .. } = &mut self.block.kind {
            *essential = val;
        }
        self
    }

    /// Only meaningful for skill blocks; ignored for submodules.
    pub fn hidden(mut self, val: bool) -> Self {
        if let BlockKind::Skill { hidden, .. } = &mut self.block.kind {
            *hidden = val;
        }
        self
    }

    /// Only meaningful for skill blocks; ignored for submodules.
    pub fn checkpoint(mut self, id: CheckpointId) -> Self {
        if let BlockKind::Skill { checkpoint, .. } = &mut self.block.kind {
            *checkpoint = Some(id);
        }
        self
    }

    pub fn build(self) -> Block {
        self.block
    }
}

/// Builder for an [`Item`].
pub struct ItemBuilder {
    item: Item,
}

impl ItemBuilder {
    /// A regular task item.
    pub fn task(id: ItemId) -> Self {
        Self {
            item: Item {
                id,
                name: format!("task-{id}"),
                completed: false,
                locked: false,
                kind: ItemKind::Task {
                    paths: vec![],
                    task: TaskKind::Regular,
                },
            },
        }
    }

    /// A choice task item requiring `min_choices` completed choices.
    pub fn choice(id: ItemId, min_choices: u32) -> Self {
        Self {
            item: Item {
                id,
                name: format!("choice-{id}"),
                completed: false,
                locked: false,
                kind: ItemKind::Task {
                    paths: vec![],
                    task: TaskKind::Choice {
                        min_choices,
                        choices: vec![],
                    },
                },
            },
        }
    }

    /// A submodule-level skill item.
    pub fn skill_item(id: ItemId) -> Self {
        Self {
            item: Item {
                id,
                name: format!("skill-item-{id}"),
                completed: false,
                locked: false,
                kind: ItemKind::Skill {
                    essential: false,
                    hidden: false,
                },
            },
        }
    }

    pub fn name(mut self, name: &str) -> Self {
        self.item.name = name.to_string();
        self
    }

    pub fn completed(mut self, val: bool) -> Self {
        self.item.completed = val;
        self
    }

    pub fn locked(mut self, val: bool) -> Self {
        self.item.locked = val;
        self
    }

    /// Only meaningful for task items; ignored otherwise.
    pub fn path(mut self, path: PathId) -> Self {
        if let ItemKind::Task { paths, .. } = &mut self.item.kind {
            paths.push(path);
        }
        self
    }

    /// Only meaningful for skill items; ignored otherwise.
    pub fn essential(mut self, val: bool) -> Self {
        if let ItemKind::Skill { essential, .. } = &mut self.item.kind {
            *essential = val;
        }
        self
    }

    /// Only meaningful for choice tasks; ignored otherwise.
    pub fn choice_option(mut self, id: ItemId, completed: bool) -> Self {
        if let ItemKind::Task {
            task: TaskKind::Choice { choices, .. },
            ..
        } = &mut self.item.kind
        {
            choices.push(Choice {
                id,
                name: format!("option-{id}"),
                completed,
            });
        }
        self
    }

    pub fn build(self) -> Item {
        self.item
    }
}

/// Builder for a [`Snapshot`] with convenient edge wiring.
pub struct SnapshotBuilder {
    raw: RawSnapshot,
}

impl SnapshotBuilder {
    pub fn new() -> Self {
        Self {
            raw: RawSnapshot::default(),
        }
    }

    pub fn block(mut self, block: Block) -> Self {
        self.raw.blocks.push(block);
        self
    }

    /// Wire a parent -> child edge on both endpoints. Either endpoint may be
    /// missing from the snapshot; the reference then stays dangling, which
    /// is a supported (silently dropped) graph-construction case.
    pub fn edge(mut self, parent: BlockId, child: BlockId) -> Self {
        if let Some(block) = self.raw.blocks.iter_mut().find(|b| b.id == parent) {
            block.children.push(child);
        }
        if let Some(block) = self.raw.blocks.iter_mut().find(|b| b.id == child) {
            block.parents.push(parent);
        }
        self
    }

    pub fn group(mut self, group: Group) -> Self {
        self.raw.groups.push(group);
        self
    }

    pub fn checkpoint(mut self, checkpoint: Checkpoint) -> Self {
        self.raw.checkpoints.push(checkpoint);
        self
    }

    pub fn build(self) -> Snapshot {
        Snapshot::try_from(self.raw).expect("Failed to build valid snapshot from builder")
    }
}

impl Default for SnapshotBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn group(id: GroupId, name: &str, blocks: &[BlockId]) -> Group {
    Group {
        id,
        name: name.to_string(),
        blocks: blocks.to_vec(),
    }
}

pub fn checkpoint(id: CheckpointId, deadline: DateTime<Utc>) -> Checkpoint {
    Checkpoint {
        id,
        name: format!("checkpoint-{id}"),
        deadline,
    }
}

/// A fixed deadline on the given January 2026 day, for readable test data.
pub fn day(d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, d, 12, 0, 0).unwrap()
}
