//! The `Npc` record.

use fray_core::{GridBounds, NpcId, Position, Species};

/// One NPC: identity, species, display name, position, and liveness.
///
/// Plain data — all behavior that varies by species is a pure function of
/// the [`Species`] tag.  `Clone` exists so the roster can hand out
/// consistent snapshots; the roster's copy is the only authoritative one.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Npc {
    pub id:      NpcId,
    pub species: Species,
    pub name:    String,
    pub pos:     Position,
    pub alive:   bool,
}

impl Npc {
    pub(crate) fn new(id: NpcId, species: Species, name: String, pos: Position) -> Self {
        Self { id, species, name, pos, alive: true }
    }

    /// Euclidean distance to `other`.
    #[inline]
    pub fn distance_to(&self, other: &Npc) -> f32 {
        self.pos.distance(other.pos)
    }

    /// `true` if `other` is within `range` of this NPC.
    #[inline]
    pub fn in_range(&self, other: &Npc, range: f32) -> bool {
        self.distance_to(other) <= range
    }

    /// Apply one movement tick: `step_x`/`step_y` (each in `{-1, 0, +1}`)
    /// scaled by this species' step size, then clamped into `bounds`.
    ///
    /// A dead NPC never moves; the call is a no-op.
    pub fn advance(&mut self, step_x: i32, step_y: i32, bounds: GridBounds) {
        if !self.alive {
            return;
        }
        let step = self.species.move_step();
        self.pos = bounds.clamp(Position::new(
            self.pos.x + step_x as f32 * step,
            self.pos.y + step_y as f32 * step,
        ));
    }
}

impl std::fmt::Display for Npc {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.species, self.name)
    }
}
