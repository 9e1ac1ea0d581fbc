//! `fray-combat` — combat resolution for the gridfray framework.
//!
//! Two resolvers share the dominance rules from `fray-core` but differ in
//! everything else:
//!
//! | Resolver               | Mode                 | Randomness | Threading       |
//! |------------------------|----------------------|------------|-----------------|
//! | [`dice::BattleResolver`] | live simulation    | 2d6 rolls  | dedicated worker |
//! | [`skirmish`]           | scripted/batch       | none       | caller's thread |
//!
//! # Crate layout
//!
//! | Module       | Contents                                                  |
//! |--------------|-----------------------------------------------------------|
//! | [`queue`]    | `Encounter`, `EncounterQueue` — bounded-wait FIFO channel |
//! | [`dice`]     | The live resolver worker and its roll application step    |
//! | [`skirmish`] | Deterministic fixed-point resolution over a whole roster  |
//! | [`sink`]     | `BattleSink`, `Notifier` — ordered result delivery        |

pub mod dice;
pub mod queue;
pub mod sink;
pub mod skirmish;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use dice::BattleResolver;
pub use queue::{Encounter, EncounterQueue};
pub use sink::{BattleSink, MemorySink, Notifier};
pub use skirmish::{SkirmishReport, run_skirmish};
