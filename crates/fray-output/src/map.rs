//! Text rendering of a roster snapshot.
//!
//! Pure functions of the snapshot — no locks, no I/O.  The map view windows
//! onto the bounding box of the living (plus padding) and caps the window at
//! 80×40 so large grids stay readable; cells holding several NPCs show the
//! occupant count as a digit instead of a species symbol.

use std::collections::BTreeMap;
use std::fmt::Write;

use fray_core::{GridBounds, Species};
use fray_world::Npc;
use rustc_hash::FxHashMap;

/// Widest map window the renderer will emit, in cells.
pub const MAX_DISPLAY_WIDTH: i32 = 80;
/// Tallest map window the renderer will emit, in cells.
pub const MAX_DISPLAY_HEIGHT: i32 = 40;

const PADDING: i32 = 5;

// ── Map view ──────────────────────────────────────────────────────────────────

/// Render the windowed map plus the per-species statistics block.
pub fn render_map(alive: &[Npc], bounds: GridBounds) -> String {
    let max_x = bounds.max_x() as i32;
    let max_y = bounds.max_y() as i32;

    // Cell occupancy: count and (last) symbol per integer cell.
    let mut cells: FxHashMap<(i32, i32), (usize, char)> = FxHashMap::default();
    for npc in alive {
        let cell = npc.pos.cell();
        let entry = cells.entry(cell).or_insert((0, npc.species.symbol()));
        entry.0 += 1;
        entry.1 = npc.species.symbol();
    }

    let (x0, x1, y0, y1) = window(alive, max_x, max_y);

    let mut out = String::new();
    let _ = writeln!(
        out,
        "Showing area: X[{x0}-{x1}] Y[{y0}-{y1}]  Full map: {bounds}, Alive NPCs: {}",
        alive.len()
    );

    render_x_ruler(&mut out, x0, x1);
    render_border(&mut out, x0, x1);
    for y in y0..=y1 {
        let _ = write!(out, "{y:2} |");
        for x in x0..=x1 {
            let glyph = match cells.get(&(x, y)) {
                None => '.',
                Some(&(1, symbol)) => symbol,
                Some(&(n, _)) => char::from_digit(n.min(9) as u32, 10).unwrap_or('9'),
            };
            out.push(glyph);
        }
        let _ = writeln!(out, "| {y:2}");
    }
    render_border(&mut out, x0, x1);
    render_x_ruler(&mut out, x0, x1);

    // Statistics block.
    let overlapping = cells.values().filter(|&&(n, _)| n > 1).count();
    let _ = writeln!(out, "\n=== STATISTICS ===");
    let _ = writeln!(out, "Alive NPCs: {}", alive.len());
    for species in Species::ALL {
        let count = alive.iter().filter(|n| n.species == species).count();
        let _ = writeln!(out, "  {species}s: {count} ({})", species.symbol());
    }
    let _ = writeln!(out, "Cells with multiple NPCs: {overlapping} (shown as digits 2-9)");
    out
}

/// Window onto the bounding box of the living plus padding, clamped into the
/// grid and capped at [`MAX_DISPLAY_WIDTH`] × [`MAX_DISPLAY_HEIGHT`]
/// (centered on the box when capping).
fn window(alive: &[Npc], max_x: i32, max_y: i32) -> (i32, i32, i32, i32) {
    let cells: Vec<(i32, i32)> = alive.iter().map(|n| n.pos.cell()).collect();
    let (mut x0, mut x1, mut y0, mut y1) = match cells.first() {
        None => (0, max_x, 0, max_y),
        Some(&(x, y)) => {
            let mut bbox = (x, x, y, y);
            for &(x, y) in &cells[1..] {
                bbox.0 = bbox.0.min(x);
                bbox.1 = bbox.1.max(x);
                bbox.2 = bbox.2.min(y);
                bbox.3 = bbox.3.max(y);
            }
            bbox
        }
    };

    x0 = (x0 - PADDING).max(0);
    x1 = (x1 + PADDING).min(max_x);
    y0 = (y0 - PADDING).max(0);
    y1 = (y1 + PADDING).min(max_y);

    if x1 - x0 + 1 > MAX_DISPLAY_WIDTH {
        let center = (x0 + x1) / 2;
        x0 = (center - MAX_DISPLAY_WIDTH / 2).max(0);
        x1 = (x0 + MAX_DISPLAY_WIDTH - 1).min(max_x);
    }
    if y1 - y0 + 1 > MAX_DISPLAY_HEIGHT {
        let center = (y0 + y1) / 2;
        y0 = (center - MAX_DISPLAY_HEIGHT / 2).max(0);
        y1 = (y0 + MAX_DISPLAY_HEIGHT - 1).min(max_y);
    }
    (x0, x1, y0, y1)
}

fn render_x_ruler(out: &mut String, x0: i32, x1: i32) {
    out.push_str("    ");
    for x in x0..=x1 {
        let _ = write!(out, "{}", (x / 10) % 10);
    }
    out.push('\n');
    out.push_str("    ");
    for x in x0..=x1 {
        let _ = write!(out, "{}", x % 10);
    }
    out.push('\n');
}

fn render_border(out: &mut String, x0: i32, x1: i32) {
    out.push_str("   +");
    for _ in x0..=x1 {
        out.push('-');
    }
    out.push_str("+\n");
}

// ── Survivor summary ──────────────────────────────────────────────────────────

/// Render the end-of-run summary: totals, per-species counts, and survivors
/// grouped by occupied cell.
pub fn render_survivors(duration_secs: u64, initial: usize, survivors: &[Npc]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", "=".repeat(50));
    let _ = writeln!(out, "=== GAME OVER ===");
    let _ = writeln!(out, "Game duration: {duration_secs} seconds");
    let _ = writeln!(out, "Total survivors: {} out of {initial}", survivors.len());
    let _ = writeln!(out, "{}", "=".repeat(50));

    if survivors.is_empty() {
        let _ = writeln!(out, "No survivors! All NPCs have been killed.");
        return out;
    }

    let _ = writeln!(out, "\nSurvivors by species:");
    for species in Species::ALL {
        let count = survivors.iter().filter(|n| n.species == species).count();
        let _ = writeln!(out, "  {species}s: {count}");
    }

    // BTreeMap keeps the position table in a stable, sorted order.
    let mut by_cell: BTreeMap<(i32, i32), Vec<&Npc>> = BTreeMap::new();
    for npc in survivors {
        by_cell.entry(npc.pos.cell()).or_default().push(npc);
    }

    let _ = writeln!(out, "\nSurvivor positions:");
    let _ = writeln!(out, "{}", "-".repeat(60));
    let _ = writeln!(out, "{:<15}{:<10}{:<35}", "Position", "Count", "NPCs");
    let _ = writeln!(out, "{}", "-".repeat(60));
    for (&(x, y), npcs) in &by_cell {
        let names = npcs
            .iter()
            .map(|n| n.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        let _ = writeln!(out, "{:<15}{:<10}{:<35}", format!("({x},{y})"), npcs.len(), names);
    }
    let _ = writeln!(out, "{}", "-".repeat(60));
    let _ = writeln!(out, "\nTotal positions occupied: {}", by_cell.len());

    let crowded = by_cell.values().filter(|npcs| npcs.len() > 1).count();
    if crowded > 0 {
        let _ = writeln!(out, "Cells with multiple NPCs: {crowded}");
    }
    out
}
