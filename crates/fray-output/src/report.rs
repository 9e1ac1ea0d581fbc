//! Reporter implementations for the driver's per-second callbacks.

use std::fs::File;
use std::path::Path;

use fray_core::{SimConfig, Species};
use fray_sim::{SimReport, SimReporter};
use fray_world::Npc;

use crate::map::{render_map, render_survivors};
use crate::{OutputError, OutputResult};

// ── ConsoleReporter ───────────────────────────────────────────────────────────

/// Prints the run header, a windowed map each second, and the survivor
/// summary at the end.
#[derive(Default)]
pub struct ConsoleReporter {
    duration_secs: u64,
    grid:          Option<fray_core::GridBounds>,
}

impl ConsoleReporter {
    pub fn new() -> Self {
        Self::default()
    }

    fn print_map(&self, second: u64, alive: &[Npc], grid: fray_core::GridBounds) {
        println!("\n=== GAME MAP ===");
        println!("Time: {second}/{}s", self.duration_secs);
        print!("{}", render_map(alive, grid));
    }
}

impl SimReporter for ConsoleReporter {
    fn on_start(&mut self, config: &SimConfig, initial: &[Npc]) {
        self.duration_secs = config.duration_secs();
        self.grid = Some(config.grid);

        println!("=== NPC BATTLE SIMULATION ===");
        println!("Map size: {}", config.grid);
        println!("Game duration: {} seconds", self.duration_secs);
        println!("Initial NPCs: {}", initial.len());
        println!(
            "Species: {}",
            Species::ALL
                .map(|s| format!("{s} ({})", s.symbol()))
                .join(", ")
        );
        println!(
            "Movement steps: {}",
            Species::ALL
                .map(|s| format!("{s}={}", s.move_step()))
                .join(", ")
        );
        println!("Kill range: {} for all species", fray_core::KILL_RANGE);
        println!("{}", "=".repeat(50));

        self.print_map(0, initial, config.grid);
    }

    fn on_second(&mut self, second: u64, alive: &[Npc]) {
        if let Some(grid) = self.grid {
            self.print_map(second, alive, grid);
        }
    }

    fn on_end(&mut self, report: &SimReport) {
        print!(
            "\n{}",
            render_survivors(self.duration_secs, report.initial_count, &report.survivors)
        );
    }
}

// ── CsvReporter ───────────────────────────────────────────────────────────────

/// Writes one per-second summary row per report boundary:
/// `second,alive,orcs,knights,bears`.
///
/// Write errors are stored internally because reporter callbacks have no
/// return value; check [`take_error`][Self::take_error] after the run.
pub struct CsvReporter {
    writer:     csv::Writer<File>,
    last_error: Option<OutputError>,
}

impl CsvReporter {
    /// Create (or truncate) the summary CSV at `path` and write the header.
    pub fn create(path: impl AsRef<Path>) -> OutputResult<Self> {
        let mut writer = csv::Writer::from_path(path)?;
        writer.write_record(["second", "alive", "orcs", "knights", "bears"])?;
        Ok(Self { writer, last_error: None })
    }

    /// Take the stored write error (if any) after the run.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    fn write_row(&mut self, second: u64, alive: &[Npc]) {
        let count_of = |species: Species| {
            alive
                .iter()
                .filter(|n| n.species == species)
                .count()
                .to_string()
        };
        let result = self
            .writer
            .write_record([
                second.to_string(),
                alive.len().to_string(),
                count_of(Species::Orc),
                count_of(Species::Knight),
                count_of(Species::Bear),
            ])
            .and_then(|()| self.writer.flush().map_err(csv::Error::from));
        if let Err(err) = result {
            tracing::warn!(%err, "summary CSV write failed");
            if self.last_error.is_none() {
                self.last_error = Some(err.into());
            }
        }
    }
}

impl SimReporter for CsvReporter {
    fn on_start(&mut self, _config: &SimConfig, initial: &[Npc]) {
        self.write_row(0, initial);
    }

    fn on_second(&mut self, second: u64, alive: &[Npc]) {
        self.write_row(second, alive);
    }

    fn on_end(&mut self, report: &SimReport) {
        self.write_row(report.elapsed.as_secs(), &report.survivors);
    }
}

// ── MultiReporter ─────────────────────────────────────────────────────────────

/// Fans every callback out to the contained reporters, in order.
#[derive(Default)]
pub struct MultiReporter {
    inner: Vec<Box<dyn SimReporter>>,
}

impl MultiReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(mut self, reporter: Box<dyn SimReporter>) -> Self {
        self.inner.push(reporter);
        self
    }
}

impl SimReporter for MultiReporter {
    fn on_start(&mut self, config: &SimConfig, initial: &[Npc]) {
        for reporter in &mut self.inner {
            reporter.on_start(config, initial);
        }
    }

    fn on_second(&mut self, second: u64, alive: &[Npc]) {
        for reporter in &mut self.inner {
            reporter.on_second(second, alive);
        }
    }

    fn on_end(&mut self, report: &SimReport) {
        for reporter in &mut self.inner {
            reporter.on_end(report);
        }
    }
}
