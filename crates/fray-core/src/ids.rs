//! Strongly typed, zero-cost agent identifier.
//!
//! `NpcId` is `Copy + Ord + Hash` so it can be used as a map key and a sorted
//! collection element without ceremony.  Ids are issued by the roster from a
//! monotonic counter and are **never reused**: a removed id stays retired for
//! the lifetime of the roster, so a stale id held by a worker thread can only
//! miss, never alias a different agent.

use std::fmt;

/// Stable identity of one NPC.
///
/// The inner integer is `pub` for display and test convenience, but it is an
/// opaque handle — unlike an index, it does not change when the roster
/// compacts after removals.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NpcId(pub u32);

impl NpcId {
    /// Sentinel meaning "no valid id" — equivalent to `u32::MAX`.
    pub const INVALID: NpcId = NpcId(u32::MAX);

    /// Cast to `usize` for map/table bookkeeping.
    #[inline(always)]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl Default for NpcId {
    /// Returns the `INVALID` sentinel so uninitialized ids are visibly invalid.
    #[inline(always)]
    fn default() -> Self {
        Self::INVALID
    }
}

impl fmt::Display for NpcId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NpcId({})", self.0)
    }
}

impl From<NpcId> for usize {
    #[inline(always)]
    fn from(id: NpcId) -> usize {
        id.0 as usize
    }
}

impl TryFrom<usize> for NpcId {
    type Error = std::num::TryFromIntError;
    fn try_from(n: usize) -> Result<NpcId, Self::Error> {
        u32::try_from(n).map(NpcId)
    }
}
