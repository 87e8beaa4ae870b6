//! Numeric constants and solver defaults.

/// Default number of relaxation passes per simulation step.
pub const DEFAULT_RELAXATION_PASSES: u32 = 10;

/// Default PBD stiffness. Fraction of a constraint's error corrected per solve.
pub const DEFAULT_STIFFNESS: f32 = 0.5;

/// Default share of the correction absorbed by the first endpoint when
/// neither endpoint is pinned.
pub const DEFAULT_SPLIT_RATIO: f32 = 0.5;

/// Below this length a constraint has no usable direction and is skipped.
pub const DEGENERATE_LENGTH_EPSILON: f32 = 1.0e-7;

/// Height tolerance used to decide whether a vertex belongs to the top row.
pub const DEFAULT_TOP_ROW_TOLERANCE: f32 = 1.0e-5;
