//! Battle result sinks.
//!
//! Both sinks are invoked synchronously from the battle worker, so neither
//! may fail loudly: `FileSink` stores its first write error for retrieval
//! with [`FileSink::take_error`] and traces a warning, keeping the
//! resolution loop alive.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use fray_combat::BattleSink;

use crate::{OutputError, OutputResult};

// ── ConsoleSink ───────────────────────────────────────────────────────────────

/// Prints every result line to stdout.
#[derive(Default)]
pub struct ConsoleSink;

impl ConsoleSink {
    pub fn new() -> Self {
        Self
    }
}

impl BattleSink for ConsoleSink {
    fn on_result(&mut self, line: &str) {
        println!("{line}");
    }
}

// ── FileSink ──────────────────────────────────────────────────────────────────

/// Appends every result line to a log file, flushing per line so the log
/// stays current while the simulation runs.
pub struct FileSink {
    writer:     BufWriter<File>,
    last_error: Option<OutputError>,
}

impl FileSink {
    /// Open `path` for appending, creating it if missing.
    pub fn create(path: impl AsRef<Path>) -> OutputResult<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            writer:     BufWriter::new(file),
            last_error: None,
        })
    }

    /// Take the first stored write error (if any) after the run.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    fn store_err(&mut self, result: std::io::Result<()>) {
        if let Err(err) = result {
            tracing::warn!(%err, "battle log write failed");
            if self.last_error.is_none() {
                self.last_error = Some(err.into());
            }
        }
    }
}

impl BattleSink for FileSink {
    fn on_result(&mut self, line: &str) {
        let result = writeln!(self.writer, "{line}").and_then(|()| self.writer.flush());
        self.store_err(result);
    }
}
