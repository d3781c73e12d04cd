// src/layout/placement.rs

//! Row assignment for placed blocks.
//!
//! Both entry points are pure: they never mutate the graph or the columns
//! and return a fresh row per block. Determinism comes from the sequencer's
//! ascending-id tie-breaks plus the first-fit occupancy scan.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use tracing::debug;

use crate::errors::{Result, SkillGridError};
use crate::graph::{topological_sort, Graph};
use crate::snapshot::Checkpoint;
use crate::types::BlockId;

/// (column, row)-keyed occupancy table.
#[derive(Debug, Default)]
struct Placement {
    occupied: HashMap<(u32, u32), BlockId>,
}

impl Placement {
    fn occupy(&mut self, column: u32, row: u32, block: BlockId) {
        self.occupied.insert((column, row), block);
    }

    /// First unoccupied row in `column` at or after `from_row`.
    fn first_free_row(&self, column: u32, from_row: u32) -> u32 {
        let mut row = from_row;
        while self.occupied.contains_key(&(column, row)) {
            row += 1;
        }
        row
    }
}

/// Assign a row to every block of the graph in one pass.
///
/// Blocks are processed in topological order; each one lands on the first
/// free row of its column at or below one past its lowest parent. Every
/// block must have a column; callers pre-exclude unplaced blocks, and a
/// `None` column fails fast with [`SkillGridError::UnplacedBlock`].
pub fn assign_rows(graph: &Graph) -> Result<BTreeMap<BlockId, u32>> {
    let mut placement = Placement::default();
    let mut rows: BTreeMap<BlockId, u32> = graph.ids().map(|id| (id, 0)).collect();

    let subset: Vec<BlockId> = graph.ids().collect();
    place_subset(graph, &mut placement, &mut rows, &subset, 0)?;

    Ok(rows)
}

/// Assign rows in waves staged by ascending checkpoint deadline.
///
/// Each wave places the not-yet-placed ancestors of the blocks due at that
/// checkpoint, with a rising minimum-row floor: after a wave the floor
/// becomes one past the lowest row the wave used (an empty wave still raises
/// the floor by one). A final wave places everything that no checkpoint
/// claimed. As a result, blocks tied to an earlier deadline always render
/// strictly above any later-deadline block that depends on them.
pub fn assign_rows_with_checkpoints(
    graph: &Graph,
    checkpoints: &[Checkpoint],
) -> Result<BTreeMap<BlockId, u32>> {
    let mut placement = Placement::default();
    let mut rows: BTreeMap<BlockId, u32> = graph.ids().map(|id| (id, 0)).collect();
    let mut placed: BTreeSet<BlockId> = BTreeSet::new();

    let mut staged: Vec<&Checkpoint> = checkpoints.iter().collect();
    staged.sort_by_key(|cp| (cp.deadline, cp.id));

    let mut floor = 0u32;
    for checkpoint in staged {
        let due: Vec<BlockId> = graph
            .blocks()
            .filter(|b| b.checkpoint() == Some(checkpoint.id))
            .map(|b| b.id)
            .collect();

        let wave: Vec<BlockId> = graph
            .ancestors_of(&due)?
            .into_iter()
            .filter(|id| !placed.contains(id))
            .collect();

        debug!(
            checkpoint = checkpoint.id,
            blocks = wave.len(),
            floor,
            "placing checkpoint wave"
        );

        let wave_max = place_subset(graph, &mut placement, &mut rows, &wave, floor)?;
        placed.extend(wave.iter().copied());

        floor = wave_max.map_or(floor, |m| m.max(floor)) + 1;
    }

    let remaining: Vec<BlockId> = graph.ids().filter(|id| !placed.contains(id)).collect();
    debug!(blocks = remaining.len(), floor, "placing final wave");
    place_subset(graph, &mut placement, &mut rows, &remaining, floor)?;

    Ok(rows)
}

/// Place one subset against the shared occupancy table.
///
/// `rows` starts out seeded with 0 for every block of the graph, so a parent
/// that has not been placed yet still pushes its children to at least row 1.
/// Returns the lowest row the subset used, if it placed anything.
fn place_subset(
    graph: &Graph,
    placement: &mut Placement,
    rows: &mut BTreeMap<BlockId, u32>,
    subset: &[BlockId],
    floor: u32,
) -> Result<Option<u32>> {
    let order = topological_sort(graph, subset)?;
    let mut max_row: Option<u32> = None;

    for id in order {
        let block = graph.block(id)?;
        let column = block.column.ok_or(SkillGridError::UnplacedBlock(id))?;

        let min_row = graph
            .parents(id)?
            .iter()
            .filter_map(|p| rows.get(p).map(|r| r + 1))
            .max()
            .unwrap_or(0)
            .max(floor);

        let row = placement.first_free_row(column, min_row);
        rows.insert(id, row);
        placement.occupy(column, row, id);
        max_row = Some(max_row.map_or(row, |m| m.max(row)));
    }

    Ok(max_row)
}
