//! `fray-core` — foundational types for the gridfray battle simulation.
//!
//! This crate is a dependency of every other `fray-*` crate.  It intentionally
//! has no `fray-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module       | Contents                                          |
//! |--------------|---------------------------------------------------|
//! | [`ids`]      | `NpcId` — stable, never-reused agent identifier   |
//! | [`grid`]     | `Position`, `GridBounds`, Euclidean distance      |
//! | [`species`]  | `Species` enum and the dominance cycle            |
//! | [`rng`]      | `SimRng` — explicit, seedable generator           |
//! | [`config`]   | `SimConfig` — immutable bootstrap configuration   |
//! | [`error`]    | `CoreError`, `CoreResult`                         |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                              |
//! |---------|-----------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types. |

pub mod config;
pub mod error;
pub mod grid;
pub mod ids;
pub mod rng;
pub mod species;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::SimConfig;
pub use error::{CoreError, CoreResult};
pub use grid::{GridBounds, Position};
pub use ids::NpcId;
pub use rng::SimRng;
pub use species::{KILL_RANGE, Species};
