//! Relaxation event types.
//!
//! Lightweight value types emitted around constraint setup and each
//! relaxation pass, carrying just enough data for monitoring.

use serde::{Deserialize, Serialize};

/// An event tagged with the simulation step it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelaxEvent {
    /// Step number (0-indexed).
    pub step: u32,
    /// Event payload.
    pub kind: EventKind,
}

/// Event payload variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EventKind {
    /// Constraints were derived from a mesh.
    TopologyBuilt {
        vertices: u32,
        constraints: u32,
        pinned: u32,
    },

    /// A `relax` call started.
    RelaxBegin {
        passes: u32,
        /// Largest rest-length deviation before the first pass.
        initial_violation: f32,
    },

    /// One relaxation pass completed.
    PassCompleted {
        /// Pass number within the step.
        pass: u32,
        /// Largest rest-length deviation after the pass.
        max_violation: f32,
        /// Solves skipped on coincident endpoints during the pass.
        degenerate_skips: u64,
    },

    /// A `relax` call finished.
    RelaxEnd {
        final_violation: f32,
        /// Solves skipped on coincident endpoints.
        degenerate_skips: u64,
        /// Wall-clock time (seconds).
        wall_time: f64,
    },
}

impl RelaxEvent {
    /// Creates a new event for the given step.
    pub fn new(step: u32, kind: EventKind) -> Self {
        Self { step, kind }
    }
}
