//! `fray-output` — everything the simulation shows or stores.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                   |
//! |------------|------------------------------------------------------------|
//! | [`sinks`]  | `ConsoleSink`, `FileSink` — battle result delivery targets |
//! | [`map`]    | Text map and survivor-summary rendering (pure functions)   |
//! | [`report`] | `ConsoleReporter`, `CsvReporter`, `MultiReporter`          |
//! | [`store`]  | Roster save/load in the one-NPC-per-line format            |
//! | [`error`]  | `OutputError`, `OutputResult<T>`                           |
//!
//! The `sqlite` feature adds [`sqlite::SqliteSink`], a battle log backed by
//! a SQLite database.
//!
//! Sinks and reporters follow one rule: an I/O failure is the caller's
//! problem at most, never the simulation's.  Construction returns `Result`;
//! per-result writes store the first error for later retrieval and trace a
//! warning instead of propagating into the resolver thread.

pub mod error;
pub mod map;
pub mod report;
pub mod sinks;
pub mod store;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{OutputError, OutputResult};
pub use report::{ConsoleReporter, CsvReporter, MultiReporter};
pub use sinks::{ConsoleSink, FileSink};
pub use store::{LoadReport, load_roster, save_roster};

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteSink;
