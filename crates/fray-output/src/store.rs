//! Roster persistence in the one-NPC-per-line format.
//!
//! Saving overwrites the target fully.  Loading replaces the entire roster;
//! a malformed or out-of-bounds line is a recoverable per-line error — it is
//! skipped with a warning and the rest of the file still loads.  A failure
//! to open the file surfaces as `Err` before any in-memory state changes.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use fray_world::codec::{parse_line, serialize_line};
use fray_world::Roster;

use crate::OutputResult;

/// What a [`load_roster`] call did.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Records admitted to the roster.
    pub loaded: usize,
    /// Lines skipped as malformed, unknown-species, or out-of-bounds.
    pub skipped: usize,
}

/// Write every NPC (dead ones included) to `path`, one line each,
/// overwriting any previous content.  Returns the number of lines written.
pub fn save_roster(roster: &Roster, path: impl AsRef<Path>) -> OutputResult<usize> {
    let mut writer = BufWriter::new(File::create(path)?);
    let mut written = 0;
    for npc in roster.iter() {
        writeln!(writer, "{}", serialize_line(npc))?;
        written += 1;
    }
    writer.flush()?;
    Ok(written)
}

/// Replace the contents of `roster` with the records in `path`.
///
/// The file is read in full before the roster is touched, so any I/O failure
/// leaves the in-memory state unchanged.  Empty lines are ignored; each
/// remaining line must parse and satisfy the roster's bounds, and failures
/// are skipped and counted, never fatal.
pub fn load_roster(roster: &mut Roster, path: impl AsRef<Path>) -> OutputResult<LoadReport> {
    let contents = fs::read_to_string(path)?;

    roster.clear();
    let mut report = LoadReport::default();
    for line in contents.lines() {
        if line.trim().is_empty() {
            continue;
        }
        let admitted = parse_line(line)
            .and_then(|rec| roster.add(rec.species, &rec.name, rec.x, rec.y));
        match admitted {
            Ok(_) => report.loaded += 1,
            Err(err) => {
                tracing::warn!(%err, "skipping roster record");
                report.skipped += 1;
            }
        }
    }
    Ok(report)
}
