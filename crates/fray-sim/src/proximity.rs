//! Per-tick spatial pair query.
//!
//! An R-tree is bulk-loaded from the tick's alive snapshot and queried once
//! per agent for neighbors within the kill range.  Keeping only pairs with
//! `slot_a < slot_b` yields every unordered pair exactly once per tick.
//!
//! Bulk load is O(n log n) and each radius query O(log n + hits), which beats
//! the naive all-pairs scan well before the roster reaches a few hundred
//! agents; at the default 50 it is simply not slower.

use fray_world::Npc;
use rstar::{AABB, PointDistance, RTree, RTreeObject};

// ── R-tree snapshot entry ─────────────────────────────────────────────────────

/// Entry stored in the spatial index: a 2-D point with the snapshot slot it
/// came from.
#[derive(Clone)]
struct SnapshotEntry {
    point: [f32; 2],
    slot:  usize,
}

impl RTreeObject for SnapshotEntry {
    type Envelope = AABB<[f32; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for SnapshotEntry {
    /// Squared Euclidean distance, matching `locate_within_distance`'s
    /// squared-radius convention.
    fn distance_2(&self, point: &[f32; 2]) -> f32 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        dx * dx + dy * dy
    }
}

// ── Pair query ────────────────────────────────────────────────────────────────

/// All unordered snapshot-slot pairs `(a, b)` with `a < b` whose positions
/// are within `range` of each other.  Each pair appears exactly once.
pub fn pairs_in_range(snapshot: &[Npc], range: f32) -> Vec<(usize, usize)> {
    if snapshot.len() < 2 {
        return Vec::new();
    }
    let entries: Vec<SnapshotEntry> = snapshot
        .iter()
        .enumerate()
        .map(|(slot, npc)| SnapshotEntry { point: [npc.pos.x, npc.pos.y], slot })
        .collect();
    let tree = RTree::bulk_load(entries);
    let range_sq = range * range;

    query_pairs(snapshot, &tree, range_sq)
}

#[cfg(not(feature = "parallel"))]
fn query_pairs(
    snapshot: &[Npc],
    tree:     &RTree<SnapshotEntry>,
    range_sq: f32,
) -> Vec<(usize, usize)> {
    let mut pairs = Vec::new();
    for (slot, npc) in snapshot.iter().enumerate() {
        for entry in tree.locate_within_distance([npc.pos.x, npc.pos.y], range_sq) {
            if entry.slot > slot {
                pairs.push((slot, entry.slot));
            }
        }
    }
    pairs
}

#[cfg(feature = "parallel")]
fn query_pairs(
    snapshot: &[Npc],
    tree:     &RTree<SnapshotEntry>,
    range_sq: f32,
) -> Vec<(usize, usize)> {
    use rayon::prelude::*;

    snapshot
        .par_iter()
        .enumerate()
        .flat_map_iter(|(slot, npc)| {
            tree.locate_within_distance([npc.pos.x, npc.pos.y], range_sq)
                .filter(move |entry| entry.slot > slot)
                .map(move |entry| (slot, entry.slot))
                .collect::<Vec<_>>()
                .into_iter()
        })
        .collect()
}
