//! Pluggable event sinks.

use std::sync::{Arc, Mutex};

use tracing::Level;

use crate::events::{EventKind, RelaxEvent};

/// Trait for event consumers.
pub trait EventSink: Send {
    /// Process a single event.
    fn handle(&mut self, event: &RelaxEvent);

    /// Called when the run ends. Flush buffers, close files, etc.
    fn finalize(&mut self) {}

    /// Returns a human-readable name for this sink.
    fn name(&self) -> &str;
}

/// Collects events in memory. Clones share the same buffer, so a test can
/// keep one handle and give the other to the bus.
#[derive(Clone, Default)]
pub struct VecSink {
    events: Arc<Mutex<Vec<RelaxEvent>>>,
}

impl VecSink {
    /// Creates an empty vec sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything collected so far.
    pub fn events(&self) -> Vec<RelaxEvent> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.events.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl EventSink for VecSink {
    fn handle(&mut self, event: &RelaxEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.clone());
        }
    }

    fn name(&self) -> &str {
        "vec_sink"
    }
}

/// Forwards events to `tracing`.
///
/// Per-pass events go out at `level`; begin/end and topology summaries one
/// level above it so they survive a coarser filter.
pub struct TracingSink {
    level: Level,
}

impl TracingSink {
    /// Creates a new tracing sink at the given log level.
    pub fn new(level: Level) -> Self {
        Self { level }
    }
}

impl EventSink for TracingSink {
    fn handle(&mut self, event: &RelaxEvent) {
        let level = match event.kind {
            EventKind::PassCompleted { .. } => self.level,
            _ => promote(self.level),
        };
        let step = event.step;
        let kind = &event.kind;

        if level == Level::ERROR {
            tracing::error!(step, event = ?kind, "relax_event");
        } else if level == Level::WARN {
            tracing::warn!(step, event = ?kind, "relax_event");
        } else if level == Level::INFO {
            tracing::info!(step, event = ?kind, "relax_event");
        } else if level == Level::DEBUG {
            tracing::debug!(step, event = ?kind, "relax_event");
        } else {
            tracing::trace!(step, event = ?kind, "relax_event");
        }
    }

    fn name(&self) -> &str {
        "tracing_sink"
    }
}

fn promote(level: Level) -> Level {
    if level == Level::TRACE {
        Level::DEBUG
    } else if level == Level::DEBUG {
        Level::INFO
    } else {
        level
    }
}
