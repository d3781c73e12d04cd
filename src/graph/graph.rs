// src/graph/graph.rs

use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};

use tracing::debug;

use crate::errors::{Result, SkillGridError};
use crate::snapshot::Block;
use crate::types::BlockId;

/// Adjacency-indexed view over one snapshot's blocks.
///
/// Built once per view fetch and rebuilt on every edit; edits never splice
/// the adjacency maps in place, so no transient invariant violations are
/// observable. Nodes are kept in a `BTreeMap` so that every iteration, and
/// with it every downstream layout decision, happens in ascending id order.
///
/// The graph is expected acyclic in steady state, but every query tolerates
/// transient cycles introduced by concurrent edits: traversals carry a
/// visited set and never recurse unboundedly.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    nodes: BTreeMap<BlockId, Block>,
    parents: BTreeMap<BlockId, Vec<BlockId>>,
    children: BTreeMap<BlockId, Vec<BlockId>>,
}

impl Graph {
    /// Build the graph from owned blocks in O(n + e).
    ///
    /// Parent/child references pointing at blocks missing from the input are
    /// dropped silently (logged at debug): partial and incremental snapshot
    /// data is expected.
    pub fn build(blocks: Vec<Block>) -> Self {
        let mut nodes: BTreeMap<BlockId, Block> = BTreeMap::new();
        for block in blocks {
            nodes.insert(block.id, block);
        }

        let mut parents: BTreeMap<BlockId, Vec<BlockId>> = BTreeMap::new();
        let mut children: BTreeMap<BlockId, Vec<BlockId>> = BTreeMap::new();
        let mut dropped = 0usize;

        for (id, block) in nodes.iter() {
            let known_parents: Vec<BlockId> = block
                .parents
                .iter()
                .copied()
                .filter(|p| nodes.contains_key(p))
                .collect();
            let known_children: Vec<BlockId> = block
                .children
                .iter()
                .copied()
                .filter(|c| nodes.contains_key(c))
                .collect();

            dropped += block.parents.len() - known_parents.len();
            dropped += block.children.len() - known_children.len();

            parents.insert(*id, known_parents);
            children.insert(*id, known_children);
        }

        if dropped > 0 {
            debug!(dropped, "dropped dangling edge references while building graph");
        }

        Self {
            nodes,
            parents,
            children,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: BlockId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Look up a block; unknown ids are a caller error and fail fast.
    pub fn block(&self, id: BlockId) -> Result<&Block> {
        self.nodes.get(&id).ok_or(SkillGridError::UnknownBlock(id))
    }

    pub(crate) fn lookup(&self, id: BlockId) -> Option<&Block> {
        self.nodes.get(&id)
    }

    /// All blocks in ascending id order.
    pub fn blocks(&self) -> impl Iterator<Item = &Block> {
        self.nodes.values()
    }

    /// All block ids in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = BlockId> + '_ {
        self.nodes.keys().copied()
    }

    /// Direct parents of a block. O(1); unknown ids fail fast.
    pub fn parents(&self, id: BlockId) -> Result<&[BlockId]> {
        self.parents
            .get(&id)
            .map(|v| v.as_slice())
            .ok_or(SkillGridError::UnknownBlock(id))
    }

    /// Direct children of a block. O(1); unknown ids fail fast.
    pub fn children(&self, id: BlockId) -> Result<&[BlockId]> {
        self.children
            .get(&id)
            .map(|v| v.as_slice())
            .ok_or(SkillGridError::UnknownBlock(id))
    }

    pub(crate) fn parent_ids(&self, id: BlockId) -> &[BlockId] {
        self.parents.get(&id).map(|v| v.as_slice()).unwrap_or(&[])
    }

    pub(crate) fn child_ids(&self, id: BlockId) -> &[BlockId] {
        self.children.get(&id).map(|v| v.as_slice()).unwrap_or(&[])
    }

    /// Whether `parent` is a direct parent of `of`.
    pub fn is_parent(&self, parent: BlockId, of: BlockId) -> Result<bool> {
        self.block(parent)?;
        Ok(self.parents(of)?.contains(&parent))
    }

    /// Whether `ancestor` is `of` itself or reachable over parent edges.
    pub fn is_ancestor(&self, ancestor: BlockId, of: BlockId) -> Result<bool> {
        self.block(ancestor)?;
        self.block(of)?;
        Ok(self.reaches(of, ancestor, |id| self.parent_ids(id)))
    }

    /// Whether `descendant` is `of` itself or reachable over child edges.
    pub fn is_descendant(&self, descendant: BlockId, of: BlockId) -> Result<bool> {
        self.block(descendant)?;
        self.block(of)?;
        Ok(self.reaches(of, descendant, |id| self.child_ids(id)))
    }

    fn reaches<'a, F>(&'a self, from: BlockId, to: BlockId, next: F) -> bool
    where
        F: Fn(BlockId) -> &'a [BlockId],
    {
        let mut visited: HashSet<BlockId> = HashSet::new();
        let mut stack = vec![from];
        while let Some(current) = stack.pop() {
            if !visited.insert(current) {
                continue;
            }
            if current == to {
                return true;
            }
            stack.extend(next(current).iter().copied());
        }
        false
    }

    /// BFS union of all ancestors (inclusive) of the seed set, in ascending
    /// id order.
    pub fn ancestors_of(&self, seeds: &[BlockId]) -> Result<Vec<BlockId>> {
        for &seed in seeds {
            self.block(seed)?;
        }

        let mut visited: HashSet<BlockId> = HashSet::new();
        let mut queue: VecDeque<BlockId> = seeds.iter().copied().collect();
        while let Some(current) = queue.pop_front() {
            if !visited.insert(current) {
                continue;
            }
            queue.extend(self.parent_ids(current).iter().copied());
        }

        Ok(self.ids().filter(|id| visited.contains(id)).collect())
    }

    /// Common ancestors of `a` and `b`, reduced to the nearest frontier:
    /// any member that is an ancestor of another member is discarded.
    pub fn common_ancestors(&self, a: BlockId, b: BlockId) -> Result<Vec<BlockId>> {
        let of_a: HashSet<BlockId> = self.ancestors_of(&[a])?.into_iter().collect();
        let of_b: HashSet<BlockId> = self.ancestors_of(&[b])?.into_iter().collect();

        let common: Vec<BlockId> = self
            .ids()
            .filter(|id| of_a.contains(id) && of_b.contains(id))
            .collect();

        let frontier = common
            .iter()
            .copied()
            .filter(|&candidate| {
                !common.iter().any(|&other| {
                    other != candidate
                        && self.reaches(other, candidate, |id| self.parent_ids(id))
                })
            })
            .collect();

        Ok(frontier)
    }

    /// Shortest path from `descendant` up to `ancestor` over parent edges,
    /// returned ancestor-first. `Ok(None)` if the ancestor is unreachable.
    pub fn shortest_path_to_ancestor(
        &self,
        descendant: BlockId,
        ancestor: BlockId,
    ) -> Result<Option<Vec<BlockId>>> {
        self.block(descendant)?;
        self.block(ancestor)?;

        let mut queue: VecDeque<BlockId> = VecDeque::from([descendant]);
        let mut prev: HashMap<BlockId, BlockId> = HashMap::new();
        let mut visited: HashSet<BlockId> = HashSet::new();

        while let Some(current) = queue.pop_front() {
            if !visited.insert(current) {
                continue;
            }
            if current == ancestor {
                break;
            }
            for &parent in self.parent_ids(current) {
                prev.entry(parent).or_insert(current);
                queue.push_back(parent);
            }
        }

        if !visited.contains(&ancestor) {
            return Ok(None);
        }

        let mut path = Vec::new();
        let mut current = ancestor;
        while current != descendant {
            path.push(current);
            // prev is populated for every visited block below the ancestor.
            match prev.get(&current) {
                Some(&towards) => current = towards,
                None => return Ok(None),
            }
        }
        path.push(current);

        Ok(Some(path))
    }

    /// All (parent, child) edges, flattened in ascending parent id order.
    pub fn edges(&self) -> Vec<(BlockId, BlockId)> {
        let mut edges = Vec::new();
        for (id, children) in self.children.iter() {
            for child in children {
                edges.push((*id, *child));
            }
        }
        edges
    }
}
