//! Event bus — synchronous fan-out to pluggable sinks.
//!
//! Events reach every sink the moment they are emitted, so per-pass
//! progress is visible while a relax call is still running. The bus lives
//! on the thread that drives the solver; sinks never see events out of
//! emission order.

use crate::events::{EventKind, RelaxEvent};
use crate::sinks::EventSink;

/// Dispatches relaxation events to every registered sink.
pub struct EventBus {
    sinks: Vec<Box<dyn EventSink>>,
    /// Disabled bus drops events at `emit`.
    enabled: bool,
    /// Events delivered since creation.
    delivered: u64,
}

impl EventBus {
    /// Creates a new event bus with no sinks.
    pub fn new() -> Self {
        Self {
            sinks: Vec::new(),
            enabled: true,
            delivered: 0,
        }
    }

    /// Registers a sink to receive events.
    pub fn add_sink(&mut self, sink: Box<dyn EventSink>) {
        self.sinks.push(sink);
    }

    /// Enables or disables the bus. Disabled bus drops events silently.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Hands `event` to every sink, in registration order.
    pub fn emit(&mut self, event: RelaxEvent) {
        if !self.enabled {
            return;
        }
        for sink in &mut self.sinks {
            sink.handle(&event);
        }
        self.delivered += 1;
    }

    /// Emitter that tags everything it sends with `step`.
    pub fn step(&mut self, step: u32) -> StepEmitter<'_> {
        StepEmitter { bus: self, step }
    }

    /// Lets every sink finalize. Call once, when the run ends.
    pub fn finish(&mut self) {
        for sink in &mut self.sinks {
            sink.finalize();
        }
    }

    /// Number of events delivered so far. Dropped events do not count.
    pub fn delivered(&self) -> u64 {
        self.delivered
    }

    /// Returns the number of registered sinks.
    pub fn sink_count(&self) -> usize {
        self.sinks.len()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

/// Borrowed view of a bus bound to one step.
pub struct StepEmitter<'a> {
    bus: &'a mut EventBus,
    step: u32,
}

impl StepEmitter<'_> {
    pub fn step(&self) -> u32 {
        self.step
    }

    /// Emits `kind` tagged with this emitter's step.
    pub fn emit(&mut self, kind: EventKind) {
        self.bus.emit(RelaxEvent::new(self.step, kind));
    }
}
