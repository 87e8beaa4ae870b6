//! Position-based distance constraint projection.
//!
//! The solver corrects a tentative position buffer in place. It is
//! stateless between calls: the constraint set and pinned mask are
//! read-only inputs, and the buffer is exclusively borrowed for the
//! duration of a call only.

use std::time::Instant;

use glam::Vec3;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};
use weft_types::{WeftError, WeftResult};

use crate::config::{Schedule, SolverConfig};
use crate::constraint::{ConstraintSet, DistanceConstraint};

/// What a single solve did to the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SolveOutcome {
    /// Endpoints were projected. A satisfied constraint projects to no movement.
    Corrected,
    /// Endpoints are (nearly) coincident; no direction, nothing moved.
    Degenerate,
    /// Both endpoints are pinned; nothing moved.
    Pinned,
}

/// Summary of a `relax` call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RelaxReport {
    /// Passes performed.
    pub passes: u32,
    /// Constraints processed per pass.
    pub constraint_count: usize,
    /// Largest rest-length deviation before the first pass.
    pub initial_violation: f32,
    /// Largest rest-length deviation after each pass.
    pub pass_violations: Vec<f32>,
    /// Solves skipped because the endpoints coincided, summed over passes.
    pub degenerate_skips: u64,
    /// Wall-clock time (seconds).
    pub wall_time: f64,
}

impl RelaxReport {
    /// Largest deviation after the last pass.
    pub fn final_violation(&self) -> f32 {
        self.pass_violations
            .last()
            .copied()
            .unwrap_or(self.initial_violation)
    }
}

/// Progress after one relaxation pass, handed to the observer of
/// [`ConstraintSolver::relax_with`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PassStats {
    /// Pass number, starting at 0.
    pub pass: u32,
    /// Largest rest-length deviation after the pass.
    pub max_violation: f32,
    /// Solves skipped on coincident endpoints during the pass.
    pub degenerate_skips: u64,
}

/// Endpoint displacements for one constraint.
#[derive(Debug, Clone, Copy)]
enum Projection {
    Move { delta_a: Vec3, delta_b: Vec3 },
    Skip(SolveOutcome),
}

/// Applies distance constraints to a tentative position buffer.
#[derive(Debug, Clone, Default)]
pub struct ConstraintSolver {
    config: SolverConfig,
}

impl ConstraintSolver {
    /// Creates a solver after validating `config`.
    pub fn new(config: SolverConfig) -> WeftResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Corrects one constraint's endpoints in `positions`.
    ///
    /// Moves `a` and `b` along the line between them by `stiffness` times
    /// the length error. A pinned endpoint never moves and the free one
    /// takes the whole displacement; two free endpoints split it by
    /// `split_ratio`. Coincident endpoints are skipped.
    ///
    /// Safe to call in any order and on constraints sharing vertices: it
    /// reads the buffer as left by previous calls (Gauss-Seidel).
    pub fn solve(
        &self,
        constraint: &DistanceConstraint,
        pinned: &[bool],
        positions: &mut [Vec3],
    ) -> WeftResult<SolveOutcome> {
        let len = positions.len().min(pinned.len());
        let hi = constraint.a.max(constraint.b) as usize;
        if hi >= len {
            return Err(WeftError::InvariantViolation(format!(
                "Constraint ({}, {}) is outside the buffer (positions {}, pinned {})",
                constraint.a,
                constraint.b,
                positions.len(),
                pinned.len()
            )));
        }
        Ok(self.solve_unchecked(constraint, pinned, positions))
    }

    /// Runs `relaxation_passes` full passes over `set`.
    ///
    /// The buffer and mask must both cover every vertex the set references
    /// and must have the same length; anything else is an invariant
    /// violation and the buffer is left untouched.
    pub fn relax(
        &self,
        set: &ConstraintSet,
        pinned: &[bool],
        positions: &mut [Vec3],
    ) -> WeftResult<RelaxReport> {
        self.relax_with(set, pinned, positions, |_| {})
    }

    /// [`ConstraintSolver::relax`], calling `on_pass` after every pass.
    ///
    /// The observer runs between passes, so it sees progress while the
    /// call is still running and never overlaps a pass.
    pub fn relax_with<F>(
        &self,
        set: &ConstraintSet,
        pinned: &[bool],
        positions: &mut [Vec3],
        mut on_pass: F,
    ) -> WeftResult<RelaxReport>
    where
        F: FnMut(&PassStats),
    {
        let start = Instant::now();

        if pinned.len() != positions.len() {
            return Err(WeftError::InvariantViolation(format!(
                "Pinned mask length ({}) != position buffer length ({})",
                pinned.len(),
                positions.len()
            )));
        }
        set.check_bounds(positions.len())?;

        let mut report = RelaxReport {
            constraint_count: set.len(),
            initial_violation: set.peak_violation(positions),
            ..Default::default()
        };

        for pass in 0..self.config.relaxation_passes {
            let skipped = match self.config.schedule {
                Schedule::Sequential => self.sequential_pass(set, pinned, positions),
                Schedule::Colored => self.colored_pass(set, pinned, positions),
            };
            let violation = set.peak_violation(positions);
            trace!(pass, violation, skipped, "Relaxation pass");

            report.passes += 1;
            report.degenerate_skips += skipped;
            report.pass_violations.push(violation);

            on_pass(&PassStats {
                pass,
                max_violation: violation,
                degenerate_skips: skipped,
            });
        }

        report.wall_time = start.elapsed().as_secs_f64();

        debug!(
            passes = report.passes,
            constraints = report.constraint_count,
            initial = report.initial_violation,
            final_violation = report.final_violation(),
            degenerate = report.degenerate_skips,
            "Relaxation finished"
        );

        Ok(report)
    }

    /// One Gauss-Seidel pass in construction order. Returns degenerate skips.
    fn sequential_pass(&self, set: &ConstraintSet, pinned: &[bool], positions: &mut [Vec3]) -> u64 {
        let mut skipped = 0;
        for c in set {
            if self.solve_unchecked(c, pinned, positions) == SolveOutcome::Degenerate {
                skipped += 1;
            }
        }
        skipped
    }

    /// One pass by color class. Projections inside a class are computed in
    /// parallel against the same buffer state, then applied in class order.
    fn colored_pass(&self, set: &ConstraintSet, pinned: &[bool], positions: &mut [Vec3]) -> u64 {
        let constraints = set.as_slice();
        let mut skipped = 0;

        for batch in set.coloring().batches() {
            let view: &[Vec3] = &*positions;
            let projections: Vec<(usize, Projection)> = batch
                .par_iter()
                .map(|&ci| (ci, self.project(&constraints[ci], pinned, view)))
                .collect();

            for (ci, projection) in projections {
                if self.apply(&constraints[ci], pinned, positions, projection)
                    == SolveOutcome::Degenerate
                {
                    skipped += 1;
                }
            }
        }
        skipped
    }

    fn solve_unchecked(
        &self,
        constraint: &DistanceConstraint,
        pinned: &[bool],
        positions: &mut [Vec3],
    ) -> SolveOutcome {
        let projection = self.project(constraint, pinned, positions);
        self.apply(constraint, pinned, positions, projection)
    }

    fn project(&self, c: &DistanceConstraint, pinned: &[bool], positions: &[Vec3]) -> Projection {
        let (a, b) = (c.a as usize, c.b as usize);
        let (pinned_a, pinned_b) = (pinned[a], pinned[b]);
        if pinned_a && pinned_b {
            return Projection::Skip(SolveOutcome::Pinned);
        }

        let delta = positions[b] - positions[a];
        let current = delta.length();
        if !(current > self.config.degenerate_epsilon) {
            return Projection::Skip(SolveOutcome::Degenerate);
        }

        let direction = delta / current;
        let correction = direction * ((current - c.rest_length) * self.config.stiffness);

        let (weight_a, weight_b) = match (pinned_a, pinned_b) {
            (true, _) => (0.0, 1.0),
            (_, true) => (1.0, 0.0),
            _ => (self.config.split_ratio, 1.0 - self.config.split_ratio),
        };

        Projection::Move {
            delta_a: correction * weight_a,
            delta_b: -correction * weight_b,
        }
    }

    fn apply(
        &self,
        c: &DistanceConstraint,
        pinned: &[bool],
        positions: &mut [Vec3],
        projection: Projection,
    ) -> SolveOutcome {
        match projection {
            Projection::Skip(outcome) => outcome,
            Projection::Move { delta_a, delta_b } => {
                // Pinned endpoints are never written, so they stay bit-exact.
                if !pinned[c.a as usize] {
                    positions[c.a as usize] += delta_a;
                }
                if !pinned[c.b as usize] {
                    positions[c.b as usize] += delta_b;
                }
                SolveOutcome::Corrected
            }
        }
    }
}
