//! # weft-telemetry
//!
//! Event bus for relaxation telemetry. Emits structured events
//! (topology summary, per-pass violation, timing) that are consumed
//! by pluggable sinks as they happen.

pub mod bus;
pub mod events;
pub mod sinks;

pub use bus::{EventBus, StepEmitter};
pub use events::{EventKind, RelaxEvent};
pub use sinks::{EventSink, TracingSink, VecSink};
