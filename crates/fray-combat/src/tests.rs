//! Unit and integration tests for fray-combat.

use fray_core::GridBounds;
use fray_world::Roster;

fn grid_roster() -> Roster {
    Roster::new(GridBounds::new(100, 100))
}

/// A sink that forwards every line into an mpsc channel, so tests can read
/// back what a notifier delivered after it was moved into a worker.
struct ChannelSink(std::sync::mpsc::Sender<String>);

impl crate::sink::BattleSink for ChannelSink {
    fn on_result(&mut self, line: &str) {
        let _ = self.0.send(line.to_owned());
    }
}

#[cfg(test)]
mod sinks {
    use super::ChannelSink;
    use crate::sink::{BattleSink, MemorySink, Notifier};

    #[test]
    fn memory_sink_preserves_order() {
        let mut sink = MemorySink::new();
        sink.on_result("first");
        sink.on_result("second");
        assert_eq!(sink.lines(), ["first", "second"]);
    }

    #[test]
    fn broadcast_reaches_every_sink_in_registration_order() {
        let (tx_a, rx_a) = std::sync::mpsc::channel();
        let (tx_b, rx_b) = std::sync::mpsc::channel();

        let mut notifier = Notifier::new();
        notifier.attach(Box::new(ChannelSink(tx_a)));
        notifier.attach(Box::new(ChannelSink(tx_b)));
        assert_eq!(notifier.sink_count(), 2);

        notifier.broadcast("x kills y");
        notifier.broadcast("y defended");

        let a: Vec<String> = rx_a.try_iter().collect();
        let b: Vec<String> = rx_b.try_iter().collect();
        assert_eq!(a, ["x kills y", "y defended"]);
        assert_eq!(b, a);
    }
}

#[cfg(test)]
mod queue {
    use std::sync::Arc;
    use std::thread;
    use std::time::{Duration, Instant};

    use fray_core::NpcId;

    use crate::queue::{Encounter, EncounterQueue};

    fn enc(a: u32, d: u32) -> Encounter {
        Encounter { attacker: NpcId(a), defender: NpcId(d) }
    }

    #[test]
    fn fifo_order() {
        let queue = EncounterQueue::new();
        queue.push(enc(0, 1));
        queue.push(enc(2, 3));
        queue.push(enc(4, 5));

        assert_eq!(queue.len(), 3);
        assert_eq!(queue.pop_timeout(Duration::ZERO), Some(enc(0, 1)));
        assert_eq!(queue.pop_timeout(Duration::ZERO), Some(enc(2, 3)));
        assert_eq!(queue.try_pop(), Some(enc(4, 5)));
        assert!(queue.is_empty());
    }

    #[test]
    fn pop_times_out_on_empty_queue() {
        let queue = EncounterQueue::new();
        let start = Instant::now();
        assert_eq!(queue.pop_timeout(Duration::from_millis(50)), None);
        let waited = start.elapsed();
        assert!(waited >= Duration::from_millis(45), "returned too early: {waited:?}");
        assert!(waited < Duration::from_secs(2), "wait was not bounded: {waited:?}");
    }

    #[test]
    fn push_wakes_a_blocked_consumer() {
        let queue = Arc::new(EncounterQueue::new());
        let consumer = {
            let queue = Arc::clone(&queue);
            thread::spawn(move || queue.pop_timeout(Duration::from_secs(5)))
        };

        thread::sleep(Duration::from_millis(20));
        queue.push(enc(7, 8));
        assert_eq!(consumer.join().unwrap(), Some(enc(7, 8)));
    }
}

#[cfg(test)]
mod dice {
    use fray_core::Species;

    use super::grid_roster;
    use crate::dice::{is_resolvable, resolve_with_rolls};
    use crate::queue::Encounter;

    #[test]
    fn high_attack_roll_kills() {
        let mut roster = grid_roster();
        let orc = roster.add(Species::Orc, "Grum", 0.0, 0.0).unwrap();
        let bear = roster.add(Species::Bear, "Ursa", 5.0, 0.0).unwrap();
        let encounter = Encounter { attacker: orc, defender: bear };

        let resolution = resolve_with_rolls(&mut roster, encounter, 6, 1).unwrap();
        assert_eq!(resolution.killed, Some(bear));
        assert_eq!(resolution.line, "Battle: Orc Grum [6] vs Bear Ursa [1] -> Ursa KILLED!");
        assert!(!roster.get(bear).unwrap().alive);
        assert!(roster.get(orc).unwrap().alive);
    }

    #[test]
    fn low_attack_roll_defends() {
        let mut roster = grid_roster();
        let orc = roster.add(Species::Orc, "Grum", 0.0, 0.0).unwrap();
        let bear = roster.add(Species::Bear, "Ursa", 5.0, 0.0).unwrap();
        let encounter = Encounter { attacker: orc, defender: bear };

        let resolution = resolve_with_rolls(&mut roster, encounter, 1, 6).unwrap();
        assert_eq!(resolution.killed, None);
        assert_eq!(resolution.line, "Battle: Orc Grum [1] vs Bear Ursa [6] -> Ursa DEFENDED!");
        assert!(roster.get(bear).unwrap().alive);
    }

    #[test]
    fn tie_defends() {
        let mut roster = grid_roster();
        let orc = roster.add(Species::Orc, "Grum", 0.0, 0.0).unwrap();
        let bear = roster.add(Species::Bear, "Ursa", 5.0, 0.0).unwrap();
        let encounter = Encounter { attacker: orc, defender: bear };

        let resolution = resolve_with_rolls(&mut roster, encounter, 4, 4).unwrap();
        assert_eq!(resolution.killed, None);
        assert!(roster.get(bear).unwrap().alive);
    }

    #[test]
    fn stale_when_either_side_is_dead() {
        let mut roster = grid_roster();
        let orc = roster.add(Species::Orc, "Grum", 0.0, 0.0).unwrap();
        let bear = roster.add(Species::Bear, "Ursa", 5.0, 0.0).unwrap();
        let encounter = Encounter { attacker: orc, defender: bear };

        roster.kill(orc);
        assert!(!is_resolvable(&roster, encounter));
        assert_eq!(resolve_with_rolls(&mut roster, encounter, 6, 1), None);
        // A dead attacker cannot kill, whatever the dice say.
        assert!(roster.get(bear).unwrap().alive);
    }

    #[test]
    fn stale_when_dominance_does_not_hold() {
        let mut roster = grid_roster();
        let orc = roster.add(Species::Orc, "Grum", 0.0, 0.0).unwrap();
        let knight = roster.add(Species::Knight, "Galahad", 5.0, 0.0).unwrap();

        // Orc does not dominate Knight: never resolvable in this direction.
        let encounter = Encounter { attacker: orc, defender: knight };
        assert!(!is_resolvable(&roster, encounter));
        assert_eq!(resolve_with_rolls(&mut roster, encounter, 6, 1), None);
        assert_eq!(roster.alive_count(), 2);
    }

    #[test]
    fn stale_when_a_side_was_removed() {
        let mut roster = grid_roster();
        let orc = roster.add(Species::Orc, "Grum", 0.0, 0.0).unwrap();
        let bear = roster.add(Species::Bear, "Ursa", 5.0, 0.0).unwrap();
        let encounter = Encounter { attacker: orc, defender: bear };

        roster.remove(&[bear].into_iter().collect());
        assert_eq!(resolve_with_rolls(&mut roster, encounter, 6, 1), None);
    }
}

#[cfg(test)]
mod resolver_worker {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::thread;
    use std::time::Duration;

    use fray_core::{SimRng, Species};
    use fray_world::SharedRoster;

    use super::grid_roster;
    use crate::dice::BattleResolver;
    use crate::queue::{Encounter, EncounterQueue};
    use crate::sink::{MemorySink, Notifier};

    /// End-to-end: encounters pushed by a producer are resolved in order and
    /// the worker honors the stop flag.
    #[test]
    fn worker_resolves_and_stops() {
        let mut roster = grid_roster();
        let orc = roster.add(Species::Orc, "Grum", 0.0, 0.0).unwrap();
        let bear = roster.add(Species::Bear, "Ursa", 5.0, 0.0).unwrap();
        let shared = SharedRoster::new(roster);

        let queue = Arc::new(EncounterQueue::new());
        let stop = Arc::new(AtomicBool::new(false));
        let mut notifier = Notifier::new();
        notifier.attach(Box::new(MemorySink::new()));

        let worker = {
            let resolver = BattleResolver::new(
                shared.clone(),
                Arc::clone(&queue),
                notifier,
                SimRng::new(42),
                Arc::clone(&stop),
            );
            thread::spawn(move || resolver.run())
        };

        // Push the same encounter until the bear falls; every push after the
        // kill is stale and must be discarded.
        for _ in 0..64 {
            queue.push(Encounter { attacker: orc, defender: bear });
        }
        let deadline = std::time::Instant::now() + Duration::from_secs(5);
        while shared.read().alive_count() == 2 && std::time::Instant::now() < deadline {
            thread::sleep(Duration::from_millis(10));
        }

        stop.store(true, Ordering::Relaxed);
        queue.wake_all();
        let _notifier = worker.join().unwrap();

        let roster = shared.read();
        assert!(!roster.get(bear).unwrap().alive, "bear should eventually fall");
        assert!(roster.get(orc).unwrap().alive, "attacker is never at risk");
    }
}

#[cfg(test)]
mod skirmish {
    use fray_core::{GridBounds, SimRng, Species};
    use fray_world::{Roster, populate_random};
    use rustc_hash::FxHashSet;

    use crate::sink::Notifier;
    use crate::skirmish::run_skirmish;

    fn quiet() -> Notifier {
        Notifier::new()
    }

    #[test]
    fn orc_beats_bear_in_range() {
        let mut roster = Roster::new(GridBounds::new(100, 100));
        let orc = roster.add(Species::Orc, "Grum", 0.0, 0.0).unwrap();
        let bear = roster.add(Species::Bear, "Ursa", 5.0, 0.0).unwrap();

        let report = run_skirmish(&mut roster, 5.0, &mut quiet());
        assert_eq!(report.casualties, 1);
        assert_eq!(report.survivors, 1);
        assert!(roster.contains(orc));
        assert!(!roster.contains(bear));
    }

    #[test]
    fn out_of_range_pairs_never_fight() {
        let mut roster = Roster::new(GridBounds::new(100, 100));
        roster.add(Species::Orc, "Grum", 0.0, 0.0).unwrap();
        roster.add(Species::Bear, "Ursa", 50.0, 0.0).unwrap();

        let report = run_skirmish(&mut roster, 10.0, &mut quiet());
        assert_eq!(report.casualties, 0);
        assert_eq!(report.passes, 1);
        assert_eq!(roster.len(), 2);
    }

    #[test]
    fn same_species_never_fight() {
        let mut roster = Roster::new(GridBounds::new(100, 100));
        roster.add(Species::Knight, "Galahad", 0.0, 0.0).unwrap();
        roster.add(Species::Knight, "Lancelot", 1.0, 0.0).unwrap();

        let report = run_skirmish(&mut roster, 10.0, &mut quiet());
        assert_eq!(report.casualties, 0);
        assert_eq!(roster.len(), 2);
    }

    #[test]
    fn emits_one_line_per_resolved_pair() {
        let mut roster = Roster::new(GridBounds::new(100, 100));
        roster.add(Species::Knight, "Galahad", 0.0, 0.0).unwrap();
        roster.add(Species::Orc, "Grum", 3.0, 0.0).unwrap();

        let mut notifier = Notifier::new();
        let (tx, rx) = std::sync::mpsc::channel();
        notifier.attach(Box::new(super::ChannelSink(tx)));

        run_skirmish(&mut roster, 10.0, &mut notifier);
        let lines: Vec<String> = rx.try_iter().collect();
        assert_eq!(lines, vec!["Knight Galahad kills Orc Grum".to_owned()]);
    }

    #[test]
    fn triangle_resolves_to_empty_roster() {
        // All three species in mutual range: every dominant pair resolves in
        // the first pass, so nobody survives.
        let mut roster = Roster::new(GridBounds::new(100, 100));
        roster.add(Species::Orc, "Grum", 0.0, 0.0).unwrap();
        roster.add(Species::Bear, "Ursa", 1.0, 0.0).unwrap();
        roster.add(Species::Knight, "Galahad", 2.0, 0.0).unwrap();

        let report = run_skirmish(&mut roster, 10.0, &mut quiet());
        assert_eq!(report.casualties, 3);
        assert_eq!(roster.len(), 0);
    }

    #[test]
    fn terminates_within_roster_size_passes() {
        let mut roster = Roster::new(GridBounds::new(100, 100));
        let mut rng = SimRng::new(99);
        populate_random(&mut roster, 60, &mut rng);
        let size = roster.len();

        let report = run_skirmish(&mut roster, 10.0, &mut quiet());
        assert!(report.passes <= size, "{} passes for {size} agents", report.passes);
        assert_eq!(report.survivors + report.casualties, size);
    }

    /// The survivor set is a function of the initial alive set and
    /// positions, not of roster order.
    #[test]
    fn survivor_set_is_permutation_invariant() {
        let base: Vec<(Species, &str, f32, f32)> = vec![
            (Species::Orc, "o1", 0.0, 0.0),
            (Species::Bear, "b1", 4.0, 0.0),
            (Species::Knight, "k1", 8.0, 0.0),
            (Species::Orc, "o2", 40.0, 40.0),
            (Species::Bear, "b2", 44.0, 40.0),
            (Species::Knight, "k2", 90.0, 90.0),
            (Species::Bear, "b3", 93.0, 90.0),
        ];

        let survivors_of = |order: &[usize]| -> FxHashSet<String> {
            let mut roster = Roster::new(GridBounds::new(100, 100));
            for &i in order {
                let (species, name, x, y) = base[i];
                roster.add(species, name, x, y).unwrap();
            }
            run_skirmish(&mut roster, 10.0, &mut Notifier::new());
            roster.iter().map(|n| n.name.clone()).collect()
        };

        let reference = survivors_of(&[0, 1, 2, 3, 4, 5, 6]);
        for order in [
            vec![6, 5, 4, 3, 2, 1, 0],
            vec![2, 0, 1, 5, 6, 3, 4],
            vec![4, 6, 0, 2, 5, 1, 3],
        ] {
            assert_eq!(survivors_of(&order), reference, "order {order:?} changed survivors");
        }
    }
}
