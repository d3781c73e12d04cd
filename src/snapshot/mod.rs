// src/snapshot/mod.rs

//! The circuit snapshot: one view's worth of blocks, groups and checkpoints.
//!
//! - [`model`] maps the externally supplied JSON shape onto owned Rust types
//!   (tagged sums for the block/item/task variants).
//! - [`loader`] decodes a JSON string into a [`RawSnapshot`].
//! - [`validate`] turns a [`RawSnapshot`] into a validated [`Snapshot`].
//!
//! The snapshot is fetched and owned by an external collaborator; this crate
//! never performs I/O itself.

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{load_and_validate, load_from_str};
pub use model::{
    Block, BlockKind, Checkpoint, Choice, Group, Item, ItemKind, RawSnapshot, Snapshot, TaskKind,
};
