//! Relax input/output contract types.
//!
//! These types define the I/O boundary of the constraint core. They are
//! serializable for transport and CLI use.

use serde::{Deserialize, Serialize};
use weft_mesh::{TriangleMesh, Vec3};
use weft_solver::{RelaxReport, SolverConfig};
use weft_types::constants::DEFAULT_TOP_ROW_TOLERANCE;

/// Everything needed for one relax call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelaxInput {
    /// Mesh in its rest state. Supplies topology, rest lengths and pins.
    pub mesh: TriangleMesh,

    /// Tentative positions predicted by the stepping loop, one per vertex.
    /// `None` relaxes the rest positions themselves.
    #[serde(default)]
    pub tentative: Option<Vec<[f32; 3]>>,

    /// Solver and pin parameters.
    #[serde(default)]
    pub config: RelaxConfig,
}

impl RelaxInput {
    /// Input that relaxes `tentative` against `mesh` with default settings.
    pub fn new(mesh: TriangleMesh, tentative: Option<Vec<[f32; 3]>>) -> Self {
        Self {
            mesh,
            tentative,
            config: RelaxConfig::default(),
        }
    }

    /// The buffer the solver will correct.
    pub fn tentative_positions(&self) -> Vec<Vec3> {
        match &self.tentative {
            Some(positions) => positions.iter().map(|&p| Vec3::from_array(p)).collect(),
            None => self.mesh.rest_positions(),
        }
    }
}

/// Solver and pin parameters, loadable from TOML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelaxConfig {
    /// Relaxation parameters.
    pub solver: SolverConfig,
    /// Height tolerance for top-row pin selection.
    pub top_row_tolerance: f32,
}

impl Default for RelaxConfig {
    fn default() -> Self {
        Self {
            solver: SolverConfig::default(),
            top_row_tolerance: DEFAULT_TOP_ROW_TOLERANCE,
        }
    }
}

/// Result of a relax call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelaxOutput {
    /// Corrected positions, one per vertex.
    pub positions: Vec<[f32; 3]>,
    /// Indices of pinned vertices, ascending.
    pub pinned: Vec<u32>,
    /// Number of distance constraints applied.
    pub constraint_count: usize,
    /// Pass-by-pass diagnostics.
    pub report: RelaxReport,
}
