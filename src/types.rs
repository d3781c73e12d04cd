// src/types.rs

use serde::Deserialize;

/// Identifier of a block (skill or submodule) in a circuit snapshot.
pub type BlockId = u64;

/// Identifier of an item (task or skill reference) attached to a block.
pub type ItemId = u64;

/// Identifier of a group of blocks.
pub type GroupId = u64;

/// Identifier of a curriculum path used to filter items.
pub type PathId = u64;

/// Identifier of a checkpoint (deadline).
pub type CheckpointId = u64;

/// A cell in the circuit grid.
///
/// `x` is the column (supplied by the caller, never changed by this crate)
/// and `y` is the row (assigned by the placer). Both grow rightwards /
/// downwards from the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Point {
    pub x: u32,
    pub y: u32,
}

impl Point {
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// How rows are assigned during layout.
///
/// - `Simple`: one pass over the whole graph in topological order.
/// - `CheckpointStaged`: blocks are placed in waves by ascending checkpoint
///   deadline, so work due earlier always renders above later work that
///   depends on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlacementMode {
    Simple,
    CheckpointStaged,
}

impl Default for PlacementMode {
    fn default() -> Self {
        PlacementMode::Simple
    }
}
