// src/layout/mod.rs

//! Grid layout: row assignment and group blob geometry.
//!
//! - [`placement`] assigns rows to placed blocks (columns are caller
//!   supplied and read-only), either in one pass or staged by checkpoint
//!   deadline.
//! - [`blob`] composes the visual region of each group from the placed
//!   cells: bounding box, filler cells, outline neighbour flags and label
//!   positions.

pub mod blob;
pub mod placement;

pub use blob::{compose_blobs, Allocation, Blob, Neighbours};
pub use placement::{assign_rows, assign_rows_with_checkpoints};
