//! Error types for fray-world.

use thiserror::Error;

/// Errors produced by roster operations and the line codec.
///
/// All of these are local and recoverable: an invalid `add` is reported and
/// rejected without mutating the roster, and a malformed persisted line is
/// skipped while the rest of the file still loads.
#[derive(Debug, Error)]
pub enum WorldError {
    #[error("unknown species tag {0:?}")]
    UnknownSpecies(String),

    #[error("coordinates ({x}, {y}) outside bounds [0, {max_x}] x [0, {max_y}]")]
    OutOfBounds { x: f32, y: f32, max_x: f32, max_y: f32 },

    #[error("malformed record {line:?}: {reason}")]
    MalformedRecord { line: String, reason: String },
}

/// Shorthand result type for fray-world.
pub type WorldResult<T> = Result<T, WorldError>;
