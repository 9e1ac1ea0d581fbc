//! Battle result delivery.
//!
//! A plain ordered list of sink handles invoked synchronously, in
//! registration order, on whichever thread resolved the battle.  Sinks must
//! therefore be `Send` and tolerate worker-thread invocation; the notifier
//! provides no serialization beyond the calling order.

/// Receives one human-readable line per resolved battle.
pub trait BattleSink: Send {
    fn on_result(&mut self, line: &str);
}

/// Fan-out to every registered sink, in registration order.
#[derive(Default)]
pub struct Notifier {
    sinks: Vec<Box<dyn BattleSink>>,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a sink.  Registration order is delivery order.
    pub fn attach(&mut self, sink: Box<dyn BattleSink>) {
        self.sinks.push(sink);
    }

    /// Deliver one result line to every sink.
    pub fn broadcast(&mut self, line: &str) {
        for sink in &mut self.sinks {
            sink.on_result(line);
        }
    }

    pub fn sink_count(&self) -> usize {
        self.sinks.len()
    }
}

// ── MemorySink ────────────────────────────────────────────────────────────────

/// Collects result lines in memory, preserving delivery order.  Useful in
/// tests and for post-run inspection.
#[derive(Default)]
pub struct MemorySink {
    lines: Vec<String>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }
}

impl BattleSink for MemorySink {
    fn on_result(&mut self, line: &str) {
        self.lines.push(line.to_owned());
    }
}
