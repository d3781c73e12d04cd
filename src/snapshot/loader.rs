// src/snapshot/loader.rs

use crate::errors::Result;
use crate::snapshot::model::{RawSnapshot, Snapshot};

/// Decode a snapshot from a JSON string and return the raw [`RawSnapshot`].
///
/// This only performs JSON deserialization; it does **not** perform semantic
/// validation (id uniqueness, etc.). Use [`load_and_validate`] for that.
///
/// Fetching the string is the host application's job; this crate never
/// touches the network or the filesystem.
pub fn load_from_str(json: &str) -> Result<RawSnapshot> {
    let raw: RawSnapshot = serde_json::from_str(json)?;
    Ok(raw)
}

/// Decode a snapshot from JSON and run basic validation.
///
/// This is the recommended entry point for embedding applications:
///
/// - Decodes JSON (tagged `blockType` / `itemType` / `taskType` variants).
/// - Checks for duplicate block, group and checkpoint ids.
/// - Logs group members that reference unknown blocks (not an error).
///
/// Dangling parent/child edges are left in place; `Graph::build` drops them.
pub fn load_and_validate(json: &str) -> Result<Snapshot> {
    let raw = load_from_str(json)?;
    let snapshot = Snapshot::try_from(raw)?;
    Ok(snapshot)
}
