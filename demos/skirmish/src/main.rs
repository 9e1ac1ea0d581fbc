//! skirmish — deterministic batch battle resolution.
//!
//! Loads a roster from a file (or spawns a random one) and resolves it with
//! the turn-based fixed-point resolver: no dice, no threads, same survivors
//! for the same input every time.
//!
//! ```text
//! skirmish [ROSTER_FILE] [RANGE]
//! ```

use std::env;

use anyhow::{Context, Result};

use fray_combat::{Notifier, run_skirmish};
use fray_core::{GridBounds, SimRng};
use fray_output::{ConsoleSink, load_roster};
use fray_world::codec::serialize_line;
use fray_world::{Roster, populate_random};

// ── Constants ─────────────────────────────────────────────────────────────────

const MAP_WIDTH:    u32   = 100;
const MAP_HEIGHT:   u32   = 100;
const RANDOM_NPCS:  usize = 50;
const SEED:         u64   = 42;
const DEFAULT_RANGE: f32  = 20.0;

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let mut args = env::args().skip(1);
    let roster_file = args.next();
    let range: f32 = match args.next() {
        Some(raw) => raw.parse().context("RANGE must be a number")?,
        None => DEFAULT_RANGE,
    };

    let mut roster = Roster::new(GridBounds::new(MAP_WIDTH, MAP_HEIGHT));
    match &roster_file {
        Some(path) => {
            let report = load_roster(&mut roster, path)
                .with_context(|| format!("failed to load roster from {path}"))?;
            println!(
                "Loaded {} NPCs from {path} ({} records skipped)",
                report.loaded, report.skipped
            );
        }
        None => {
            populate_random(&mut roster, RANDOM_NPCS, &mut SimRng::new(SEED));
            println!("Spawned {} random NPCs (seed {SEED})", roster.len());
        }
    }

    println!("Starting battle with range: {range}");
    let mut notifier = Notifier::new();
    notifier.attach(Box::new(ConsoleSink::new()));
    let report = run_skirmish(&mut roster, range, &mut notifier);

    println!(
        "\nBattle finished in {} passes: {} casualties, {} survivors",
        report.passes, report.casualties, report.survivors
    );
    for npc in roster.iter() {
        println!("  {}", serialize_line(npc));
    }
    Ok(())
}
