//! `fray-world` — the shared agent registry for the gridfray framework.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                      |
//! |------------|---------------------------------------------------------------|
//! | [`npc`]    | The `Npc` record and its movement rules                       |
//! | [`roster`] | `Roster` — insertion-ordered arena with stable, retired ids   |
//! | [`shared`] | `SharedRoster` — the reader/writer lock around the roster     |
//! | [`spawn`]  | Random population of a roster from a seeded generator         |
//! | [`codec`]  | `"<Species> <Name> <X> <Y>"` line codec                       |
//! | [`error`]  | `WorldError`, `WorldResult<T>`                                |
//!
//! # Ownership model
//!
//! The roster owns every `Npc` outright.  Other threads hold only `NpcId`s
//! and resolve them through the roster's lock on each use, so a concurrent
//! removal can make a handle miss but never dangle.  Mutation of identity,
//! position, and liveness happens exclusively here, under the write lock.

pub mod codec;
pub mod error;
pub mod npc;
pub mod roster;
pub mod shared;
pub mod spawn;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{WorldError, WorldResult};
pub use npc::Npc;
pub use roster::Roster;
pub use shared::SharedRoster;
pub use spawn::populate_random;
