//! Deterministic turn-based resolution over a whole roster.
//!
//! The non-randomized alternative to the dice resolver: given a range
//! threshold, repeat full passes over the roster (in registry order) until a
//! pass yields no new casualties, then remove every casualty in one
//! compaction.
//!
//! # Pass semantics
//!
//! Within a pass, eligibility is judged against the casualty set **as of
//! pass start**: an agent that loses a pair early in the pass still fights
//! its remaining pairs until the pass ends.  Combined with deferred removal
//! this makes the survivor set a pure function of the initial alive set and
//! positions — invariant under any permutation of roster order, which only
//! affects the order result lines are emitted in.  The fixed point is
//! reached in at most `roster.len()` passes: every productive pass moves at
//! least one agent into the monotonically growing casualty set.

use fray_core::NpcId;
use fray_world::Roster;
use rustc_hash::FxHashSet;

use crate::sink::Notifier;

/// What one batch resolution did.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SkirmishReport {
    /// Full passes taken to reach the fixed point (including the final
    /// casualty-free one).
    pub passes: usize,
    /// Agents removed from the roster.
    pub casualties: usize,
    /// Agents remaining after compaction.
    pub survivors: usize,
}

/// Resolve every in-range dominant pair until no new casualties occur, then
/// compact the roster.  One result line per resolved pair goes out through
/// `notifier` in resolution order.
pub fn run_skirmish(roster: &mut Roster, range: f32, notifier: &mut Notifier) -> SkirmishReport {
    let mut casualties: FxHashSet<NpcId> = FxHashSet::default();
    let mut passes = 0;

    loop {
        passes += 1;
        let fallen = resolve_pass(roster, range, &casualties, notifier);
        if fallen.is_empty() {
            break;
        }
        casualties.extend(fallen);
    }

    let removed = roster.remove(&casualties);
    SkirmishReport {
        passes,
        casualties: removed,
        survivors: roster.len(),
    }
}

/// One full pass in roster order, judged against the casualty set as of
/// pass start.  Returns the ids newly lost this pass.
fn resolve_pass(
    roster:     &Roster,
    range:      f32,
    casualties: &FxHashSet<NpcId>,
    notifier:   &mut Notifier,
) -> FxHashSet<NpcId> {
    let mut fallen: FxHashSet<NpcId> = FxHashSet::default();

    let npcs: Vec<&fray_world::Npc> = roster
        .iter()
        .filter(|n| n.alive && !casualties.contains(&n.id))
        .collect();

    for (i, attacker) in npcs.iter().enumerate() {
        for defender in &npcs[i + 1..] {
            if !attacker.in_range(defender, range) {
                continue;
            }

            let forward = attacker.species.dominates(defender.species);
            let backward = defender.species.dominates(attacker.species);
            match (forward, backward) {
                (true, false) => {
                    notifier.broadcast(&format!("{attacker} kills {defender}"));
                    fallen.insert(defender.id);
                }
                (false, true) => {
                    notifier.broadcast(&format!("{defender} kills {attacker}"));
                    fallen.insert(attacker.id);
                }
                // Mutual kill: defined for completeness, unreachable while
                // the dominance relation is a strict cycle.
                (true, true) => {
                    notifier.broadcast(&format!("{attacker} and {defender} kill each other"));
                    fallen.insert(attacker.id);
                    fallen.insert(defender.id);
                }
                (false, false) => {}
            }
        }
    }
    fallen
}
