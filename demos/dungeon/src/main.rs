//! dungeon — the live concurrent NPC battle simulation.
//!
//! Fifty NPCs on a 100×100 grid, moving every 100 ms and fighting by dice
//! for 30 seconds.  Battle results stream to the console and `log.txt`, a
//! map and statistics print every second, per-second summaries land in
//! `summary.csv`, and the final roster is saved to `survivors.txt`.

use std::time::Duration;

use anyhow::Result;
use memory_stats::memory_stats;

use fray_core::{GridBounds, SimConfig};
use fray_output::{
    ConsoleReporter, ConsoleSink, CsvReporter, FileSink, MultiReporter, save_roster,
};
use fray_sim::SimBuilder;

// ── Constants ─────────────────────────────────────────────────────────────────

const MAP_WIDTH:     u32      = 100;
const MAP_HEIGHT:    u32      = 100;
const INITIAL_NPCS:  usize    = 50;
const GAME_DURATION: Duration = Duration::from_secs(30);
const TICK_PERIOD:   Duration = Duration::from_millis(100);
const SEED:          u64      = 42;

const BATTLE_LOG:  &str = "log.txt";
const SUMMARY_CSV: &str = "summary.csv";
const ROSTER_FILE: &str = "survivors.txt";

// ── Memory helper ─────────────────────────────────────────────────────────────

fn mem_mb() -> f64 {
    memory_stats()
        .map(|s| s.physical_mem as f64 / (1024.0 * 1024.0))
        .unwrap_or(0.0)
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let config = SimConfig {
        grid:         GridBounds::new(MAP_WIDTH, MAP_HEIGHT),
        initial_npcs: INITIAL_NPCS,
        duration:     GAME_DURATION,
        tick_period:  TICK_PERIOD,
        seed:         SEED,
    };

    let builder = SimBuilder::new(config)
        .attach_sink(Box::new(ConsoleSink::new()))
        .attach_sink(Box::new(FileSink::create(BATTLE_LOG)?));
    #[cfg(feature = "sqlite")]
    let builder = builder.attach_sink(Box::new(fray_output::SqliteSink::create("battles.db")?));
    let mut driver = builder.build()?;

    let mut reporter = MultiReporter::new()
        .push(Box::new(ConsoleReporter::new()))
        .push(Box::new(CsvReporter::create(SUMMARY_CSV)?));

    let report = driver.run(&mut reporter)?;

    let written = save_roster(&driver.roster().read(), ROSTER_FILE)?;
    println!("\nFinal roster ({written} records) saved to {ROSTER_FILE}");
    println!("Battle log: {BATTLE_LOG}  |  Per-second summary: {SUMMARY_CSV}");
    println!(
        "Survivors: {}/{}  |  Elapsed: {:.1} s  |  Memory: {:.1} MB",
        report.survivors.len(),
        report.initial_count,
        report.elapsed.as_secs_f64(),
        mem_mb(),
    );
    println!("\nSimulation completed!");
    Ok(())
}
