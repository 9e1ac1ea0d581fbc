//! Bootstrap configuration for a simulation run.

use std::time::Duration;

use crate::{CoreError, CoreResult, GridBounds};

/// Top-level simulation configuration.
///
/// Supplied once at construction and immutable thereafter.  Built from a
/// constants block in the application binary; the `serde` feature adds
/// derives for loading from a file instead.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig {
    /// Grid dimensions.  Agent positions stay in `[0, w-1] × [0, h-1]`.
    pub grid: GridBounds,

    /// Number of NPCs spawned at simulation start.
    pub initial_npcs: usize,

    /// Total wall-clock run duration.
    pub duration: Duration,

    /// Movement worker period — one displacement-and-detection pass per tick.
    pub tick_period: Duration,

    /// Master RNG seed.  The same seed reproduces each worker's stream.
    pub seed: u64,
}

impl SimConfig {
    /// Validate the configuration before the driver builds anything from it.
    pub fn validate(&self) -> CoreResult<()> {
        if self.grid.width == 0 || self.grid.height == 0 {
            return Err(CoreError::Config(format!(
                "grid must be non-empty, got {}",
                self.grid
            )));
        }
        if self.tick_period.is_zero() {
            return Err(CoreError::Config("tick period must be non-zero".into()));
        }
        if self.duration.is_zero() {
            return Err(CoreError::Config("run duration must be non-zero".into()));
        }
        Ok(())
    }

    /// Whole seconds in the run budget, rounded up — the number of report
    /// boundaries the driver will cross.
    pub fn duration_secs(&self) -> u64 {
        self.duration.as_secs() + u64::from(self.duration.subsec_nanos() > 0)
    }
}
