// src/graph/topo.rs

//! Cycle-tolerant topological sequencer.

use std::collections::BTreeSet;

use tracing::warn;

use crate::errors::Result;
use crate::graph::Graph;
use crate::types::BlockId;

/// Order `subset` so that every in-subset parent precedes its children.
///
/// Only edges with both endpoints in the subset are respected; duplicates in
/// the subset are collapsed, so the result is a permutation of the distinct
/// subset ids. Unknown ids fail fast.
///
/// Implementation is Kahn's algorithm with two documented deterministic
/// tie-breaks:
///
/// - among ready blocks, ascending id is processed first;
/// - if the ready set empties while blocks remain (a transient cycle), the
///   unprocessed block with the fewest non-removed in-subset parents is
///   force-admitted, ties again by ascending id.
///
/// The forced admission guarantees termination and a total order on any
/// input, cyclic or not.
pub fn topological_sort(graph: &Graph, subset: &[BlockId]) -> Result<Vec<BlockId>> {
    let members: BTreeSet<BlockId> = subset.iter().copied().collect();
    for &id in &members {
        graph.block(id)?;
    }

    let remaining_parents = |id: BlockId, removed: &BTreeSet<BlockId>| {
        graph
            .parent_ids(id)
            .iter()
            .filter(|p| members.contains(p) && !removed.contains(p))
            .count()
    };

    let mut removed: BTreeSet<BlockId> = BTreeSet::new();
    let mut ready: BTreeSet<BlockId> = BTreeSet::new();
    let mut result: Vec<BlockId> = Vec::with_capacity(members.len());

    for &id in &members {
        if remaining_parents(id, &removed) == 0 {
            ready.insert(id);
        }
    }

    while result.len() < members.len() {
        if ready.is_empty() {
            // Transient cycle: force-admit the unprocessed block with the
            // fewest non-removed in-subset parents, ties by ascending id.
            let forced = members
                .iter()
                .copied()
                .filter(|id| !removed.contains(id))
                .min_by_key(|&id| (remaining_parents(id, &removed), id));

            match forced {
                Some(id) => {
                    warn!(block = id, "breaking dependency cycle by force-admitting block");
                    ready.insert(id);
                }
                None => break,
            }
        }

        while let Some(&current) = ready.iter().next() {
            ready.remove(&current);

            result.push(current);
            removed.insert(current);

            for &child in graph.child_ids(current) {
                if members.contains(&child)
                    && !removed.contains(&child)
                    && remaining_parents(child, &removed) == 0
                {
                    ready.insert(child);
                }
            }
        }
    }

    Ok(result)
}
