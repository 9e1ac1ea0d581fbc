//! Framework error type.
//!
//! Sub-crates define their own error enums and either convert `CoreError`
//! into them via `From` impls or construct their own variants directly.

use thiserror::Error;

/// The top-level error type for `fray-core`.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("unknown species tag {0:?}")]
    UnknownSpecies(String),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for `fray-core`.
pub type CoreResult<T> = Result<T, CoreError>;
