//! The movement worker: displacement, encounter detection, enqueue.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use fray_combat::{Encounter, EncounterQueue};
use fray_core::{KILL_RANGE, SimRng};
use fray_world::{Npc, SharedRoster};

use crate::proximity::pairs_in_range;

/// The producer-side worker of the live simulation.
///
/// Each tick runs three phases:
///
/// 1. **Displace** — one exclusive roster batch: every alive NPC draws two
///    steps uniform in `{-1, 0, +1}`, scaled by its species step size and
///    clamped into the grid.  Dead NPCs are skipped.  The tick's alive
///    snapshot is taken under the same guard.
/// 2. **Detect** — with the roster lock released, every unordered pair of
///    the snapshot within kill range is evaluated exactly once; pairs where
///    dominance holds become encounters with the dominant side attacking.
/// 3. **Enqueue** — each encounter is pushed, signalling the consumer.
///
/// Pair dedup is per-tick only: a pair that survives resolution can re-enter
/// the queue on a later tick.
pub struct MovementScheduler {
    roster: SharedRoster,
    queue:  Arc<EncounterQueue>,
    rng:    SimRng,
    stop:   Arc<AtomicBool>,
    period: Duration,
}

impl MovementScheduler {
    pub fn new(
        roster: SharedRoster,
        queue:  Arc<EncounterQueue>,
        rng:    SimRng,
        stop:   Arc<AtomicBool>,
        period: Duration,
    ) -> Self {
        Self { roster, queue, rng, stop, period }
    }

    /// Tick until the stop flag is raised.
    ///
    /// A panic inside a tick is caught here at the loop boundary and
    /// degrades to a skipped tick; the worker itself never dies while the
    /// driver believes it is running.
    pub fn run(mut self) {
        while !self.stop.load(Ordering::Relaxed) {
            if panic::catch_unwind(AssertUnwindSafe(|| self.tick())).is_err() {
                tracing::warn!("movement tick panicked; skipping tick");
            }
            thread::sleep(self.period);
        }
    }

    /// One displacement-and-detection pass.
    ///
    /// Public so tests and scripted scenarios can step the world
    /// deterministically without spawning the worker thread.
    pub fn tick(&mut self) {
        let snapshot = {
            let mut roster = self.roster.write();
            let bounds = roster.bounds();
            for npc in roster.iter_mut() {
                if !npc.alive {
                    continue;
                }
                let step_x = self.rng.step();
                let step_y = self.rng.step();
                npc.advance(step_x, step_y, bounds);
            }
            roster.snapshot_alive()
        };
        // Roster lock released; detection works on the tick's snapshot and
        // only the queue's own lock is taken below.
        for encounter in detect_encounters(&snapshot, &mut self.rng) {
            self.queue.push(encounter);
        }
    }
}

/// Evaluate every unordered pair of `snapshot` once; pairs within
/// [`KILL_RANGE`] where dominance holds become encounters.
///
/// When dominance holds in exactly one direction the dominant side attacks.
/// Should it ever hold in both (impossible while the relation is a strict
/// cycle, handled anyway), the attacker is chosen uniformly at random.
pub fn detect_encounters(snapshot: &[Npc], rng: &mut SimRng) -> Vec<Encounter> {
    let mut encounters = Vec::new();
    for (i, j) in pairs_in_range(snapshot, KILL_RANGE) {
        let a = &snapshot[i];
        let b = &snapshot[j];
        let forward = a.species.dominates(b.species);
        let backward = b.species.dominates(a.species);
        let encounter = match (forward, backward) {
            (true, false) => Encounter { attacker: a.id, defender: b.id },
            (false, true) => Encounter { attacker: b.id, defender: a.id },
            (true, true) => {
                if rng.gen_bool(0.5) {
                    Encounter { attacker: a.id, defender: b.id }
                } else {
                    Encounter { attacker: b.id, defender: a.id }
                }
            }
            (false, false) => continue,
        };
        encounters.push(encounter);
    }
    encounters
}
