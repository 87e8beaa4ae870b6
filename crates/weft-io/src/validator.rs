//! Input validation.
//!
//! Checks relax inputs before the solver receives them, catching data-level
//! errors early with clear diagnostics.

use weft_types::{WeftError, WeftResult};

use crate::contract::{RelaxConfig, RelaxInput};

/// Validates a complete relax input.
///
/// Checks:
/// - Mesh buffers (SoA consistency, valid indices)
/// - Tentative buffer length matches the mesh and holds finite values
/// - Configuration values are in range
pub fn validate_input(input: &RelaxInput) -> WeftResult<()> {
    input.mesh.validate_buffers()?;

    if let Some(tentative) = &input.tentative {
        if tentative.len() != input.mesh.vertex_count() {
            return Err(WeftError::InvalidMesh(format!(
                "Tentative buffer length ({}) != vertex count ({})",
                tentative.len(),
                input.mesh.vertex_count()
            )));
        }
        if let Some(i) = tentative
            .iter()
            .position(|p| p.iter().any(|c| !c.is_finite()))
        {
            return Err(WeftError::InvalidMesh(format!(
                "Tentative position {} is not finite",
                i
            )));
        }
    }

    validate_config(&input.config)
}

/// Validates relax parameters.
pub fn validate_config(config: &RelaxConfig) -> WeftResult<()> {
    config.solver.validate()?;

    if !config.top_row_tolerance.is_finite() || config.top_row_tolerance < 0.0 {
        return Err(WeftError::InvalidConfig(format!(
            "top_row_tolerance must be finite and non-negative, got {}",
            config.top_row_tolerance
        )));
    }

    Ok(())
}
