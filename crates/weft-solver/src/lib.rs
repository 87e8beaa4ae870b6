//! # weft-solver
//!
//! Distance constraints and the position-based relaxation that enforces them.
//!
//! ## Key Types
//!
//! - [`DistanceConstraint`] / [`ConstraintSet`] — One rest-length constraint
//!   per unique vertex pair sharing a face.
//! - [`ConstraintSolver`] — Projects a tentative position buffer toward the
//!   rest lengths, one constraint at a time or in full relaxation passes.
//! - [`SolverConfig`] — Pass count, stiffness, split ratio, schedule.
//! - [`ClothConstraints`] — Everything derived from a mesh at load time.
//!
//! ```text
//! let cloth = ClothConstraints::from_mesh(&mesh, tolerance)?;
//! let solver = ConstraintSolver::new(config)?;
//! loop {
//!     // stepping loop predicts `tentative` from velocities
//!     solver.relax(&cloth.constraints, &cloth.pinned, &mut tentative)?;
//!     // stepping loop derives velocities and commits `tentative`
//! }
//! ```

pub mod coloring;
pub mod config;
pub mod constraint;
pub mod setup;
pub mod solver;

pub use coloring::ConstraintColoring;
pub use config::{Schedule, SolverConfig};
pub use constraint::{ConstraintSet, DistanceConstraint};
pub use setup::ClothConstraints;
pub use solver::{ConstraintSolver, PassStats, RelaxReport, SolveOutcome};
