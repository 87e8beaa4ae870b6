//! Solver configuration.
//!
//! Parameters that control relaxation: pass count, stiffness, how the
//! correction is split between two free endpoints, and the pass schedule.

use serde::{Deserialize, Serialize};
use weft_types::constants::{
    DEFAULT_RELAXATION_PASSES, DEFAULT_SPLIT_RATIO, DEFAULT_STIFFNESS, DEGENERATE_LENGTH_EPSILON,
};
use weft_types::{WeftError, WeftResult};

/// Order in which constraints are visited during a relaxation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Schedule {
    /// Gauss-Seidel in construction order, single-threaded.
    #[default]
    Sequential,
    /// Constraints grouped into classes with no shared vertex. Each class is
    /// projected in parallel, then applied before the next class starts.
    Colored,
}

/// Configuration for the constraint solver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Full passes over the constraint set per `relax` call.
    pub relaxation_passes: u32,

    /// Fraction of a constraint's length error corrected per solve, in (0, 1].
    pub stiffness: f32,

    /// Share of the correction taken by the first endpoint when neither
    /// endpoint is pinned, in [0, 1]. The second endpoint takes the rest.
    pub split_ratio: f32,

    /// Constraints whose current length is below this are skipped.
    pub degenerate_epsilon: f32,

    /// Pass schedule.
    pub schedule: Schedule,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            relaxation_passes: DEFAULT_RELAXATION_PASSES,
            stiffness: DEFAULT_STIFFNESS,
            split_ratio: DEFAULT_SPLIT_RATIO,
            degenerate_epsilon: DEGENERATE_LENGTH_EPSILON,
            schedule: Schedule::Sequential,
        }
    }
}

impl SolverConfig {
    /// Creates a config for interactive use (few passes).
    pub fn fast() -> Self {
        Self {
            relaxation_passes: 3,
            ..Default::default()
        }
    }

    /// Creates a high-quality config (more passes, full stiffness).
    pub fn high_quality() -> Self {
        Self {
            relaxation_passes: 40,
            stiffness: 1.0,
            ..Default::default()
        }
    }

    /// Checks that every parameter is in range.
    pub fn validate(&self) -> WeftResult<()> {
        if self.relaxation_passes == 0 {
            return Err(WeftError::InvalidConfig(
                "relaxation_passes must be >= 1".into(),
            ));
        }
        if !(self.stiffness > 0.0 && self.stiffness <= 1.0) {
            return Err(WeftError::InvalidConfig(format!(
                "stiffness must be in (0, 1], got {}",
                self.stiffness
            )));
        }
        if !(0.0..=1.0).contains(&self.split_ratio) {
            return Err(WeftError::InvalidConfig(format!(
                "split_ratio must be in [0, 1], got {}",
                self.split_ratio
            )));
        }
        if !self.degenerate_epsilon.is_finite() || self.degenerate_epsilon < 0.0 {
            return Err(WeftError::InvalidConfig(format!(
                "degenerate_epsilon must be finite and non-negative, got {}",
                self.degenerate_epsilon
            )));
        }
        Ok(())
    }
}
