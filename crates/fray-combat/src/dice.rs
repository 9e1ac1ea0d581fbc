//! The live dice-based battle resolver.
//!
//! # Loop contract
//!
//! One dedicated worker pops encounters with a bounded wait, re-validates
//! them against current roster state under the exclusive lock, and applies
//! a 2d6 contest: `attack > defense` kills the defender, anything else
//! (ties included) leaves it alive.  Exactly one result line per resolved
//! encounter goes out through the notifier, in resolution order, from this
//! thread.
//!
//! Encounters whose world state drifted between enqueue and resolution
//! (either side dead, dominance no longer held) are *stale*: discarded
//! silently with a debug trace.  Staleness is normal traffic, not an error.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use fray_core::{NpcId, SimRng};
use fray_world::{Roster, SharedRoster};

use crate::queue::{Encounter, EncounterQueue};
use crate::sink::Notifier;

/// Bound on every consumer wait; the stop flag is re-checked at least this
/// often.
pub const POP_WAIT: Duration = Duration::from_millis(100);

/// Outcome of applying dice to one still-valid encounter.
#[derive(Clone, Debug, PartialEq)]
pub struct Resolution {
    /// The human-readable result line delivered to sinks.
    pub line: String,
    /// The defender's id if this contest killed it.
    pub killed: Option<NpcId>,
}

/// `true` iff `encounter` is still worth resolving: both sides present and
/// alive, and the attacker dominates the defender.
pub fn is_resolvable(roster: &Roster, encounter: Encounter) -> bool {
    match (roster.get(encounter.attacker), roster.get(encounter.defender)) {
        (Some(attacker), Some(defender)) => {
            attacker.alive && defender.alive && attacker.species.dominates(defender.species)
        }
        _ => false,
    }
}

/// Apply explicit dice to `encounter`.
///
/// Returns `None` if the encounter is stale.  Otherwise mutates the
/// defender's liveness when `attack_roll > defense_roll` and returns the
/// result line.  The caller must hold the roster's exclusive lock for the
/// whole call (taking `&mut Roster` enforces this).
pub fn resolve_with_rolls(
    roster:       &mut Roster,
    encounter:    Encounter,
    attack_roll:  u8,
    defense_roll: u8,
) -> Option<Resolution> {
    if !is_resolvable(roster, encounter) {
        return None;
    }
    // Present and alive per the check above.
    let attacker = roster.get(encounter.attacker)?;
    let defender = roster.get(encounter.defender)?;

    let prefix = format!(
        "Battle: {} {} [{attack_roll}] vs {} {} [{defense_roll}]",
        attacker.species, attacker.name, defender.species, defender.name,
    );
    let defender_name = defender.name.clone();

    if attack_roll > defense_roll {
        roster.kill(encounter.defender);
        Some(Resolution {
            line:   format!("{prefix} -> {defender_name} KILLED!"),
            killed: Some(encounter.defender),
        })
    } else {
        Some(Resolution {
            line:   format!("{prefix} -> {defender_name} DEFENDED!"),
            killed: None,
        })
    }
}

// ── BattleResolver ────────────────────────────────────────────────────────────

/// The consumer-side worker of the live simulation.
pub struct BattleResolver {
    roster:   SharedRoster,
    queue:    Arc<EncounterQueue>,
    notifier: Notifier,
    rng:      SimRng,
    stop:     Arc<AtomicBool>,
    max_wait: Duration,
}

impl BattleResolver {
    pub fn new(
        roster:   SharedRoster,
        queue:    Arc<EncounterQueue>,
        notifier: Notifier,
        rng:      SimRng,
        stop:     Arc<AtomicBool>,
    ) -> Self {
        Self {
            roster,
            queue,
            notifier,
            rng,
            stop,
            max_wait: POP_WAIT,
        }
    }

    /// Consume encounters until the stop flag is raised.
    ///
    /// A panic while resolving (or inside a sink) is caught at the loop
    /// boundary and degrades to a dropped encounter; the worker itself never
    /// dies while the driver believes it is running.
    ///
    /// Returns the notifier so the caller can recover its sinks (and any
    /// errors they stored) after the worker joins.
    pub fn run(mut self) -> Notifier {
        while !self.stop.load(Ordering::Relaxed) {
            let Some(encounter) = self.queue.pop_timeout(self.max_wait) else {
                continue; // timed out — loop to re-check the stop flag
            };
            if panic::catch_unwind(AssertUnwindSafe(|| self.resolve(encounter))).is_err() {
                tracing::warn!("battle resolution panicked; encounter dropped");
            }
        }
        self.notifier
    }

    fn resolve(&mut self, encounter: Encounter) {
        let resolution = {
            let mut roster = self.roster.write();
            if !is_resolvable(&roster, encounter) {
                tracing::debug!(
                    attacker = %encounter.attacker,
                    defender = %encounter.defender,
                    "discarding stale encounter"
                );
                return;
            }
            let attack_roll = self.rng.d6();
            let defense_roll = self.rng.d6();
            resolve_with_rolls(&mut roster, encounter, attack_roll, defense_roll)
        };
        // Sinks run outside the roster lock.
        if let Some(resolution) = resolution {
            self.notifier.broadcast(&resolution.line);
        }
    }
}
