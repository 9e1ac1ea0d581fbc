//! SQLite battle log sink (feature `sqlite`).
//!
//! Records one row per result line in a `battle_log` table, in resolution
//! order, inside a single database file.

use std::path::Path;

use fray_combat::BattleSink;
use rusqlite::Connection;

use crate::{OutputError, OutputResult};

/// Writes battle results to a SQLite database.
pub struct SqliteSink {
    conn:       Connection,
    seq:        i64,
    last_error: Option<OutputError>,
}

impl SqliteSink {
    /// Open (or create) the database at `path` and initialise the schema.
    pub fn create(path: impl AsRef<Path>) -> OutputResult<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             CREATE TABLE IF NOT EXISTS battle_log (
                 seq  INTEGER PRIMARY KEY,
                 line TEXT NOT NULL
             );",
        )?;
        let seq: i64 = conn.query_row(
            "SELECT COALESCE(MAX(seq), 0) FROM battle_log",
            [],
            |row| row.get(0),
        )?;
        Ok(Self { conn, seq, last_error: None })
    }

    /// Take the first stored write error (if any) after the run.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Checkpoint the WAL.  Idempotent; call after the workers have joined.
    pub fn finish(&mut self) -> OutputResult<()> {
        self.conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }

    fn store_err(&mut self, result: rusqlite::Result<usize>) {
        if let Err(err) = result {
            tracing::warn!(%err, "battle log insert failed");
            if self.last_error.is_none() {
                self.last_error = Some(err.into());
            }
        }
    }
}

impl BattleSink for SqliteSink {
    fn on_result(&mut self, line: &str) {
        self.seq += 1;
        let result = self.conn.execute(
            "INSERT INTO battle_log (seq, line) VALUES (?1, ?2)",
            rusqlite::params![self.seq, line],
        );
        self.store_err(result);
    }
}
