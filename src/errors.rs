// src/errors.rs

//! Crate-wide error aliases and helpers.

use thiserror::Error;

use crate::types::BlockId;

#[derive(Error, Debug)]
pub enum SkillGridError {
    #[error("Snapshot error: {0}")]
    Snapshot(String),

    #[error("Unknown block id: {0}")]
    UnknownBlock(BlockId),

    #[error("Block {0} has no column; exclude unplaced blocks before layout")]
    UnplacedBlock(BlockId),

    #[error("Cycle detected in dependency graph involving block {0}")]
    DependencyCycle(BlockId),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, SkillGridError>;
