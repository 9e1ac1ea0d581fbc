//! The simulation driver: owns the time budget, the workers, and shutdown.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use fray_combat::{BattleResolver, BattleSink, EncounterQueue, Notifier};
use fray_core::{SimConfig, SimRng};
use fray_world::{Roster, SharedRoster, populate_random};

use crate::movement::MovementScheduler;
use crate::reporter::{SimReport, SimReporter};
use crate::SimResult;

/// How often the driver's polling loop wakes to check the clock.
const POLL_PERIOD: Duration = Duration::from_millis(25);

// ── SimBuilder ────────────────────────────────────────────────────────────────

/// Fluent builder for [`SimDriver`].
///
/// Validates the configuration, creates and populates the roster from the
/// seed, and collects the result sinks the battle worker will notify.
///
/// # Example
///
/// ```rust,ignore
/// let mut driver = SimBuilder::new(config)
///     .attach_sink(Box::new(ConsoleSink::new()))
///     .attach_sink(Box::new(FileSink::create("log.txt")?))
///     .build()?;
/// let report = driver.run(&mut reporter)?;
/// ```
pub struct SimBuilder {
    config:   SimConfig,
    notifier: Notifier,
}

impl SimBuilder {
    pub fn new(config: SimConfig) -> Self {
        Self { config, notifier: Notifier::new() }
    }

    /// Register a battle result sink.  Registration order is delivery order.
    pub fn attach_sink(mut self, sink: Box<dyn BattleSink>) -> Self {
        self.notifier.attach(sink);
        self
    }

    /// Validate the config and populate the starting roster.
    pub fn build(self) -> SimResult<SimDriver> {
        self.config.validate()?;
        let mut rng = SimRng::new(self.config.seed);
        let mut roster = Roster::new(self.config.grid);
        populate_random(&mut roster, self.config.initial_npcs, &mut rng);
        Ok(SimDriver {
            roster: SharedRoster::new(roster),
            notifier: Some(self.notifier),
            config: self.config,
            rng,
        })
    }
}

// ── SimDriver ─────────────────────────────────────────────────────────────────

/// Runs one live simulation: starts the movement and battle workers, polls
/// the wall clock for per-second reporting, and guarantees quiescence before
/// the final summary.
pub struct SimDriver {
    config:   SimConfig,
    roster:   SharedRoster,
    notifier: Option<Notifier>,
    rng:      SimRng,
}

impl SimDriver {
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// A handle to the shared roster, e.g. for saving the final state after
    /// the run.
    pub fn roster(&self) -> SharedRoster {
        self.roster.clone()
    }

    /// Run until the configured duration expires.
    ///
    /// Reporting cadence: `reporter.on_start` before the workers spawn, one
    /// `on_second` per whole-second boundary, and `on_end` strictly after
    /// both workers have joined — no worker touches the roster once the
    /// final snapshot is taken.
    pub fn run(&mut self, reporter: &mut dyn SimReporter) -> SimResult<SimReport> {
        let queue = Arc::new(EncounterQueue::new());
        let stop = Arc::new(AtomicBool::new(false));

        let initial = self.roster.snapshot_alive();
        let initial_count = initial.len();
        reporter.on_start(&self.config, &initial);

        let movement = self.spawn_movement(&queue, &stop)?;
        let battle = match self.spawn_battle(&queue, &stop) {
            Ok(handle) => handle,
            Err(err) => {
                // The movement worker is already live; take it down before
                // surfacing the spawn failure.
                stop.store(true, Ordering::Relaxed);
                let _ = movement.join();
                return Err(err);
            }
        };

        let started = Instant::now();
        let mut last_second = 0u64;
        loop {
            let elapsed = started.elapsed();
            if elapsed >= self.config.duration {
                break;
            }
            let second = elapsed.as_secs();
            if second > last_second {
                last_second = second;
                reporter.on_second(second, &self.roster.snapshot_alive());
            }
            thread::sleep(POLL_PERIOD.min(self.config.duration));
        }

        // Shutdown order: stop flag → wake the consumer → join both workers.
        // Only then is the final snapshot taken.
        stop.store(true, Ordering::Relaxed);
        queue.wake_all();
        if movement.join().is_err() {
            tracing::error!("movement worker panicked at shutdown");
        }
        match battle.join() {
            Ok(notifier) => self.notifier = Some(notifier),
            Err(_) => tracing::error!("battle worker panicked at shutdown"),
        }

        let report = SimReport {
            elapsed: started.elapsed(),
            initial_count,
            survivors: self.roster.snapshot_alive(),
        };
        reporter.on_end(&report);
        Ok(report)
    }

    fn spawn_movement(
        &mut self,
        queue: &Arc<EncounterQueue>,
        stop:  &Arc<AtomicBool>,
    ) -> SimResult<JoinHandle<()>> {
        let scheduler = MovementScheduler::new(
            self.roster.clone(),
            Arc::clone(queue),
            self.rng.child(1),
            Arc::clone(stop),
            self.config.tick_period,
        );
        let handle = thread::Builder::new()
            .name("movement".into())
            .spawn(move || scheduler.run())?;
        Ok(handle)
    }

    fn spawn_battle(
        &mut self,
        queue: &Arc<EncounterQueue>,
        stop:  &Arc<AtomicBool>,
    ) -> SimResult<JoinHandle<Notifier>> {
        let resolver = BattleResolver::new(
            self.roster.clone(),
            Arc::clone(queue),
            self.notifier.take().unwrap_or_default(),
            self.rng.child(2),
            Arc::clone(stop),
        );
        let handle = thread::Builder::new()
            .name("battle".into())
            .spawn(move || resolver.run())?;
        Ok(handle)
    }
}
