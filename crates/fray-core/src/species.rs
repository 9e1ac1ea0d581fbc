//! The closed species set and the dominance cycle.
//!
//! # Dominance
//!
//! The three species form a strict 3-cycle:
//!
//! ```text
//!   Orc ──kills──▶ Bear ──kills──▶ Knight ──kills──▶ Orc
//! ```
//!
//! For any two *distinct* species exactly one direction dominates; a species
//! never dominates itself.  Dominance is a pure function over the tags —
//! there is no per-species dispatch and no combat state.

use crate::CoreError;

/// Kill range shared by every species in the current rule set.
pub const KILL_RANGE: f32 = 10.0;

/// One of the three NPC species.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Species {
    Orc,
    Knight,
    Bear,
}

impl Species {
    /// All species, in declaration order.  Used by spawners and reports.
    pub const ALL: [Species; 3] = [Species::Orc, Species::Knight, Species::Bear];

    /// The species this one dominates (its prey in the cycle).
    #[inline]
    pub const fn prey(self) -> Species {
        match self {
            Species::Orc    => Species::Bear,
            Species::Knight => Species::Orc,
            Species::Bear   => Species::Knight,
        }
    }

    /// `true` iff `self` immediately precedes `other` in the dominance cycle.
    ///
    /// Antisymmetric over distinct species and irreflexive — the whole combat
    /// rule set reduces to this one predicate.
    #[inline]
    pub const fn dominates(self, other: Species) -> bool {
        matches!(
            (self, other),
            (Species::Orc, Species::Bear)
                | (Species::Knight, Species::Orc)
                | (Species::Bear, Species::Knight)
        )
    }

    /// Distance covered in one movement tick, in grid units.
    #[inline]
    pub const fn move_step(self) -> f32 {
        match self {
            Species::Orc    => 20.0,
            Species::Knight => 30.0,
            Species::Bear   => 5.0,
        }
    }

    /// Maximum distance at which this species can engage a target.
    ///
    /// Currently the shared [`KILL_RANGE`] constant for all species; kept as
    /// a per-species accessor so a future rule set can vary it.
    #[inline]
    pub const fn kill_range(self) -> f32 {
        KILL_RANGE
    }

    /// Single-character map symbol.
    #[inline]
    pub const fn symbol(self) -> char {
        match self {
            Species::Orc    => 'O',
            Species::Knight => 'K',
            Species::Bear   => 'B',
        }
    }

    /// Canonical tag used by the line codec and displays.
    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            Species::Orc    => "Orc",
            Species::Knight => "Knight",
            Species::Bear   => "Bear",
        }
    }
}

impl std::str::FromStr for Species {
    type Err = CoreError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag {
            "Orc"    => Ok(Species::Orc),
            "Knight" => Ok(Species::Knight),
            "Bear"   => Ok(Species::Bear),
            other    => Err(CoreError::UnknownSpecies(other.to_owned())),
        }
    }
}

impl std::fmt::Display for Species {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
