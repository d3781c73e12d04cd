// src/snapshot/validate.rs

use std::collections::HashSet;

use tracing::debug;

use crate::errors::{Result, SkillGridError};
use crate::snapshot::model::{RawSnapshot, Snapshot};

impl TryFrom<RawSnapshot> for Snapshot {
    type Error = SkillGridError;

    fn try_from(raw: RawSnapshot) -> std::result::Result<Self, Self::Error> {
        validate_raw_snapshot(&raw)?;
        Ok(Snapshot::new_unchecked(
            raw.blocks,
            raw.groups,
            raw.checkpoints,
        ))
    }
}

fn validate_raw_snapshot(raw: &RawSnapshot) -> Result<()> {
    ensure_unique_block_ids(raw)?;
    ensure_unique_group_ids(raw)?;
    ensure_unique_checkpoint_ids(raw)?;
    report_dangling_group_members(raw);
    Ok(())
}

fn ensure_unique_block_ids(raw: &RawSnapshot) -> Result<()> {
    let mut seen = HashSet::new();
    for block in &raw.blocks {
        if !seen.insert(block.id) {
            return Err(SkillGridError::Snapshot(format!(
                "duplicate block id {} in snapshot",
                block.id
            )));
        }
    }
    Ok(())
}

fn ensure_unique_group_ids(raw: &RawSnapshot) -> Result<()> {
    let mut seen = HashSet::new();
    for group in &raw.groups {
        if !seen.insert(group.id) {
            return Err(SkillGridError::Snapshot(format!(
                "duplicate group id {} in snapshot",
                group.id
            )));
        }
    }
    Ok(())
}

fn ensure_unique_checkpoint_ids(raw: &RawSnapshot) -> Result<()> {
    let mut seen = HashSet::new();
    for checkpoint in &raw.checkpoints {
        if !seen.insert(checkpoint.id) {
            return Err(SkillGridError::Snapshot(format!(
                "duplicate checkpoint id {} in snapshot",
                checkpoint.id
            )));
        }
    }
    Ok(())
}

/// Group members that reference blocks missing from the snapshot are kept:
/// the blob composer skips members without a grid position anyway. We only
/// log them so integration issues stay diagnosable.
fn report_dangling_group_members(raw: &RawSnapshot) {
    let known: HashSet<_> = raw.blocks.iter().map(|b| b.id).collect();
    for group in &raw.groups {
        for member in &group.blocks {
            if !known.contains(member) {
                debug!(
                    group = group.id,
                    block = member,
                    "group references a block missing from the snapshot"
                );
            }
        }
    }
}
