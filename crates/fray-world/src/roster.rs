//! `Roster` — the insertion-ordered NPC arena.
//!
//! # Id discipline
//!
//! Ids come from a monotonic counter and are never reassigned: after a
//! removal the id is simply retired.  Cross-thread handles are therefore
//! always safe to hold — resolving a retired id through [`Roster::get`]
//! misses instead of aliasing a newer agent.
//!
//! # Bounds
//!
//! Every roster carries the bounds its positions must satisfy.  `add`
//! rejects out-of-bounds requests; `set_position` clamps, so the invariant
//! "every position lies within bounds" survives arbitrary mutation orders.

use std::str::FromStr;

use fray_core::{GridBounds, NpcId, Position, Species};
use rustc_hash::{FxHashMap, FxHashSet};

use crate::{Npc, WorldError, WorldResult};

/// Coordinate bound of the manual-entry (editor) API: 0..=500 per axis.
pub const EDITOR_BOUND: u32 = 500;

/// The agent registry: an insertion-ordered collection of [`Npc`]s with
/// stable ids and an id → slot index.
pub struct Roster {
    npcs:    Vec<Npc>,
    index:   FxHashMap<NpcId, usize>,
    next_id: u32,
    bounds:  GridBounds,
}

impl Roster {
    /// An empty roster whose positions must lie within `bounds`.
    pub fn new(bounds: GridBounds) -> Self {
        Self {
            npcs:    Vec::new(),
            index:   FxHashMap::default(),
            next_id: 0,
            bounds,
        }
    }

    /// An empty roster with the manual-entry coordinate bound (0..=500 on
    /// both axes).
    pub fn with_editor_bounds() -> Self {
        Self::new(GridBounds::new(EDITOR_BOUND + 1, EDITOR_BOUND + 1))
    }

    #[inline]
    pub fn bounds(&self) -> GridBounds {
        self.bounds
    }

    // ── Insertion ─────────────────────────────────────────────────────────

    /// Append a new NPC in insertion order.
    ///
    /// Rejects coordinates outside the roster's bounds without touching the
    /// collection.
    pub fn add(&mut self, species: Species, name: &str, x: f32, y: f32) -> WorldResult<NpcId> {
        let pos = Position::new(x, y);
        if !self.bounds.contains(pos) {
            return Err(WorldError::OutOfBounds {
                x,
                y,
                max_x: self.bounds.max_x(),
                max_y: self.bounds.max_y(),
            });
        }
        let id = NpcId(self.next_id);
        self.next_id += 1;
        self.index.insert(id, self.npcs.len());
        self.npcs.push(Npc::new(id, species, name.to_owned(), pos));
        Ok(id)
    }

    /// [`add`](Self::add), but with the species given as a text tag.
    ///
    /// Rejects unknown tags before validating coordinates.
    pub fn add_tagged(&mut self, tag: &str, name: &str, x: f32, y: f32) -> WorldResult<NpcId> {
        let species = Species::from_str(tag)
            .map_err(|_| WorldError::UnknownSpecies(tag.to_owned()))?;
        self.add(species, name, x, y)
    }

    // ── Removal ───────────────────────────────────────────────────────────

    /// Remove every NPC whose id is in `ids`, compacting the collection
    /// while preserving the relative order of survivors.  Removed ids stay
    /// retired.  Returns the number removed.
    pub fn remove(&mut self, ids: &FxHashSet<NpcId>) -> usize {
        let before = self.npcs.len();
        self.npcs.retain(|npc| !ids.contains(&npc.id));
        self.rebuild_index();
        before - self.npcs.len()
    }

    /// Drop every NPC.  Retired ids stay retired (the counter is not reset),
    /// so ids from before the clear cannot come back.
    pub fn clear(&mut self) {
        self.npcs.clear();
        self.index.clear();
    }

    fn rebuild_index(&mut self) {
        self.index.clear();
        for (slot, npc) in self.npcs.iter().enumerate() {
            self.index.insert(npc.id, slot);
        }
    }

    // ── Lookup ────────────────────────────────────────────────────────────

    #[inline]
    pub fn get(&self, id: NpcId) -> Option<&Npc> {
        self.index.get(&id).map(|&slot| &self.npcs[slot])
    }

    #[inline]
    pub fn get_mut(&mut self, id: NpcId) -> Option<&mut Npc> {
        self.index.get(&id).map(|&slot| &mut self.npcs[slot])
    }

    #[inline]
    pub fn contains(&self, id: NpcId) -> bool {
        self.index.contains_key(&id)
    }

    /// All NPCs in insertion order, dead ones included.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &Npc> {
        self.npcs.iter()
    }

    /// Mutable iteration in insertion order.  The movement worker uses this
    /// for its one-exclusive-batch-per-tick displacement pass.
    #[inline]
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Npc> {
        self.npcs.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.npcs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.npcs.is_empty()
    }

    pub fn alive_count(&self) -> usize {
        self.npcs.iter().filter(|n| n.alive).count()
    }

    /// Consistent clones of every living NPC, in roster order.
    ///
    /// Callers that need a point-in-time view across lock releases take this
    /// copy rather than holding references into the arena.
    pub fn snapshot_alive(&self) -> Vec<Npc> {
        self.npcs.iter().filter(|n| n.alive).cloned().collect()
    }

    // ── Mutation ──────────────────────────────────────────────────────────

    /// Move `id` to `pos`, clamped into bounds.  No-op if the id is retired
    /// or the NPC is dead.
    pub fn set_position(&mut self, id: NpcId, pos: Position) {
        let bounds = self.bounds;
        if let Some(npc) = self.get_mut(id) {
            if npc.alive {
                npc.pos = bounds.clamp(pos);
            }
        }
    }

    /// Mark `id` dead.  One-way: there is no resurrect operation, and a dead
    /// NPC no longer moves.  No-op if the id is retired.
    pub fn kill(&mut self, id: NpcId) {
        if let Some(npc) = self.get_mut(id) {
            npc.alive = false;
        }
    }
}

impl std::fmt::Debug for Roster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Roster")
            .field("len", &self.npcs.len())
            .field("alive", &self.alive_count())
            .field("bounds", &self.bounds)
            .finish()
    }
}
