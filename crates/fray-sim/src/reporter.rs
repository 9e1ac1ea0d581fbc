//! Periodic reporting callbacks for the driver.

use std::time::Duration;

use fray_core::SimConfig;
use fray_world::Npc;

/// Callbacks invoked by [`SimDriver::run`][crate::SimDriver::run] at key
/// points of a live run.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.  Every callback runs on the driver's
/// calling thread; snapshots passed in are consistent copies taken under the
/// roster's shared lock, so implementations may block on I/O freely.
pub trait SimReporter {
    /// Called once before the workers start, with the freshly populated
    /// roster.
    fn on_start(&mut self, _config: &SimConfig, _initial: &[Npc]) {}

    /// Called once per whole-second boundary with the elapsed second count
    /// and a snapshot of the living roster.
    fn on_second(&mut self, _second: u64, _alive: &[Npc]) {}

    /// Called once after both workers have joined, with the final summary.
    /// No registry mutation can occur after this point.
    fn on_end(&mut self, _report: &SimReport) {}
}

/// A [`SimReporter`] that does nothing.
pub struct NoopReporter;

impl SimReporter for NoopReporter {}

// ── SimReport ─────────────────────────────────────────────────────────────────

/// Final summary of one live run, assembled after the quiescence barrier.
#[derive(Clone, Debug)]
pub struct SimReport {
    /// Wall-clock time actually spent running.
    pub elapsed: Duration,
    /// Roster size at start.
    pub initial_count: usize,
    /// Survivors at the end, in roster order.
    pub survivors: Vec<Npc>,
}

impl SimReport {
    /// Living agents of `species` at the end of the run.
    pub fn survivors_of(&self, species: fray_core::Species) -> usize {
        self.survivors.iter().filter(|n| n.species == species).count()
    }
}
