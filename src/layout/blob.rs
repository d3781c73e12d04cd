// src/layout/blob.rs

//! Group blob composition.
//!
//! A blob is the rendered region of one group: its members' cells plus the
//! filler cells needed to keep the outline contiguous, with per-cell
//! neighbour flags (which outline edges to draw) and label positions (one
//! per visually separate island).

use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};

use crate::snapshot::Group;
use crate::types::{BlockId, GroupId, Point};

/// Same-group occupancy of the 8 surrounding cells. Drives which outline
/// edges and corner joins the renderer draws.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Neighbours {
    pub top: bool,
    pub right: bool,
    pub bottom: bool,
    pub left: bool,
    pub top_right: bool,
    pub bottom_right: bool,
    pub bottom_left: bool,
    pub top_left: bool,
}

/// One claimed cell of a blob. `block` is `None` for filler cells.
#[derive(Debug, Clone)]
pub struct Allocation {
    pub point: Point,
    pub neighbours: Neighbours,
    pub show_name: bool,
    pub block: Option<BlockId>,
}

/// The composed visual region of one group.
#[derive(Debug, Clone)]
pub struct Blob {
    pub group: GroupId,
    pub name: String,
    /// Top-left corner of the bounding rectangle over visible members.
    pub min: Point,
    /// Bottom-right corner of the bounding rectangle over visible members.
    pub max: Point,
    pub allocations: Vec<Allocation>,
}

/// Shared occupancy grid with a stable cell encoding (`x + y * width`), so
/// claim order and BFS order are reproducible.
struct OccupancyGrid {
    width: u32,
    occupied: HashMap<u64, GroupId>,
}

impl OccupancyGrid {
    fn new(width: u32) -> Self {
        Self {
            width,
            occupied: HashMap::new(),
        }
    }

    fn encode(&self, p: Point) -> u64 {
        p.x as u64 + p.y as u64 * self.width as u64
    }

    fn is_occupied(&self, p: Point) -> bool {
        self.occupied.contains_key(&self.encode(p))
    }

    fn occupant(&self, p: Point) -> Option<GroupId> {
        self.occupied.get(&self.encode(p)).copied()
    }

    fn occupy(&mut self, p: Point, group: GroupId) {
        let key = self.encode(p);
        self.occupied.insert(key, group);
    }
}

/// Compose the blob of every group with at least one visible member.
///
/// `positions` maps each visible, placed block to its cell; visibility is
/// decided by the caller. Group members without a position are skipped, and
/// a group with zero positioned members yields no blob.
///
/// Groups claim contested cells smallest bounding rectangle first; area ties
/// keep the input group order (stable sort). The returned blobs are in
/// that claim order.
pub fn compose_blobs(groups: &[Group], positions: &BTreeMap<BlockId, Point>) -> Vec<Blob> {
    let mut blobs: Vec<Blob> = groups
        .iter()
        .filter_map(|group| {
            let members: Vec<(BlockId, Point)> = group
                .blocks
                .iter()
                .filter_map(|id| positions.get(id).map(|p| (*id, *p)))
                .collect();
            if members.is_empty() {
                return None;
            }

            let min = Point::new(
                members.iter().map(|(_, p)| p.x).min().unwrap_or(0),
                members.iter().map(|(_, p)| p.y).min().unwrap_or(0),
            );
            let max = Point::new(
                members.iter().map(|(_, p)| p.x).max().unwrap_or(0),
                members.iter().map(|(_, p)| p.y).max().unwrap_or(0),
            );

            let allocations = members
                .into_iter()
                .map(|(id, point)| Allocation {
                    point,
                    neighbours: Neighbours::default(),
                    show_name: false,
                    block: Some(id),
                })
                .collect();

            Some(Blob {
                group: group.id,
                name: group.name.clone(),
                min,
                max,
                allocations,
            })
        })
        .collect();

    blobs.sort_by_key(area);

    if blobs.is_empty() {
        return blobs;
    }

    let width = blobs
        .iter()
        .flat_map(|b| b.allocations.iter())
        .map(|a| a.point.x)
        .max()
        .unwrap_or(0)
        + 1;
    let mut grid = OccupancyGrid::new(width);

    // Member cells first, then each blob (smallest rectangle first) claims
    // whatever is still free inside its bounding rectangle as filler.
    for blob in &blobs {
        for alloc in &blob.allocations {
            grid.occupy(alloc.point, blob.group);
        }
    }

    for blob in blobs.iter_mut() {
        for x in blob.min.x..=blob.max.x {
            for y in blob.min.y..=blob.max.y {
                let p = Point::new(x, y);
                if grid.is_occupied(p) {
                    continue;
                }
                grid.occupy(p, blob.group);
                blob.allocations.push(Allocation {
                    point: p,
                    neighbours: Neighbours::default(),
                    show_name: false,
                    block: None,
                });
            }
        }
    }

    for blob in blobs.iter_mut() {
        for alloc in blob.allocations.iter_mut() {
            alloc.neighbours = neighbour_flags(alloc.point, blob.group, &grid);
        }
    }

    for blob in blobs.iter_mut() {
        finish_islands(blob, &grid);
    }

    blobs
}

fn area(blob: &Blob) -> u64 {
    let w = (blob.max.x - blob.min.x + 1) as u64;
    let h = (blob.max.y - blob.min.y + 1) as u64;
    w * h
}

/// Bounds are checked at the left, top and right grid edges; the grid is
/// unbounded downwards.
fn neighbour_flags(p: Point, group: GroupId, grid: &OccupancyGrid) -> Neighbours {
    let same = |x: i64, y: i64| -> bool {
        if x < 0 || y < 0 || x >= grid.width as i64 {
            return false;
        }
        grid.occupant(Point::new(x as u32, y as u32)) == Some(group)
    };
    let (x, y) = (p.x as i64, p.y as i64);

    Neighbours {
        top: same(x, y - 1),
        right: same(x + 1, y),
        bottom: same(x, y + 1),
        left: same(x - 1, y),
        top_right: same(x + 1, y - 1),
        bottom_right: same(x + 1, y + 1),
        bottom_left: same(x - 1, y + 1),
        top_left: same(x - 1, y - 1),
    }
}

/// Split a blob into 4-connected islands, pick a label cell per island
/// (top-most, then left-most) and drop islands made purely of filler cells,
/// which exist only to pad a different island's rectangle.
fn finish_islands(blob: &mut Blob, grid: &OccupancyGrid) {
    let index_at: HashMap<u64, usize> = blob
        .allocations
        .iter()
        .enumerate()
        .map(|(i, a)| (grid.encode(a.point), i))
        .collect();

    let mut visited: HashSet<usize> = HashSet::new();
    let mut islands: Vec<Vec<usize>> = Vec::new();

    for start in 0..blob.allocations.len() {
        if visited.contains(&start) {
            continue;
        }

        let mut island: Vec<usize> = Vec::new();
        let mut queue: VecDeque<usize> = VecDeque::from([start]);

        while let Some(i) = queue.pop_front() {
            if !visited.insert(i) {
                continue;
            }
            island.push(i);

            let p = blob.allocations[i].point;
            for (dx, dy) in [(0i64, -1i64), (1, 0), (0, 1), (-1, 0)] {
                let (nx, ny) = (p.x as i64 + dx, p.y as i64 + dy);
                if nx < 0 || ny < 0 || nx >= grid.width as i64 {
                    continue;
                }
                let np = Point::new(nx as u32, ny as u32);
                if grid.occupant(np) != Some(blob.group) {
                    continue;
                }
                if let Some(&j) = index_at.get(&grid.encode(np)) {
                    if !visited.contains(&j) {
                        queue.push_back(j);
                    }
                }
            }
        }

        islands.push(island);
    }

    let mut pruned: HashSet<usize> = HashSet::new();
    for island in &islands {
        let label = island
            .iter()
            .copied()
            .min_by_key(|&i| (blob.allocations[i].point.y, blob.allocations[i].point.x));
        if let Some(i) = label {
            blob.allocations[i].show_name = true;
        }

        if island.iter().all(|&i| blob.allocations[i].block.is_none()) {
            pruned.extend(island.iter().copied());
        }
    }

    if !pruned.is_empty() {
        let mut index = 0;
        blob.allocations.retain(|_| {
            let keep = !pruned.contains(&index);
            index += 1;
            keep
        });
    }
}
