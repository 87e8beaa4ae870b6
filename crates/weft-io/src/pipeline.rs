//! Load → relax → report.
//!
//! Derives constraints from the input's rest mesh and relaxes its tentative
//! buffer once, streaming progress to the telemetry bus as passes complete.

use tracing::info;
use weft_solver::{ClothConstraints, ConstraintSolver};
use weft_telemetry::{EventBus, EventKind};
use weft_types::WeftResult;

use crate::contract::{RelaxInput, RelaxOutput};
use crate::validator::validate_input;

/// Runs one relax call described by `input`.
///
/// With a `bus`, sinks receive (tagged with `step`) a topology summary,
/// a begin event, one event per pass as it finishes, and an end event.
pub fn run_relax(
    input: &RelaxInput,
    step: u32,
    bus: Option<&mut EventBus>,
) -> WeftResult<RelaxOutput> {
    validate_input(input)?;

    let cloth = ClothConstraints::from_mesh(&input.mesh, input.config.top_row_tolerance)?;
    let solver = ConstraintSolver::new(input.config.solver.clone())?;
    let mut telemetry = bus.map(|bus| bus.step(step));

    if let Some(t) = telemetry.as_mut() {
        t.emit(EventKind::TopologyBuilt {
            vertices: cloth.vertex_count() as u32,
            constraints: cloth.constraints.len() as u32,
            pinned: cloth.pinned_count() as u32,
        });
    }

    let mut positions = input.tentative_positions();

    if let Some(t) = telemetry.as_mut() {
        t.emit(EventKind::RelaxBegin {
            passes: solver.config().relaxation_passes,
            initial_violation: cloth.constraints.max_violation(&positions)?,
        });
    }

    let report = solver.relax_with(&cloth.constraints, &cloth.pinned, &mut positions, |stats| {
        if let Some(t) = telemetry.as_mut() {
            t.emit(EventKind::PassCompleted {
                pass: stats.pass,
                max_violation: stats.max_violation,
                degenerate_skips: stats.degenerate_skips,
            });
        }
    })?;

    if let Some(t) = telemetry.as_mut() {
        t.emit(EventKind::RelaxEnd {
            final_violation: report.final_violation(),
            degenerate_skips: report.degenerate_skips,
            wall_time: report.wall_time,
        });
    }

    info!(
        step,
        passes = report.passes,
        initial = report.initial_violation,
        final_violation = report.final_violation(),
        "Relaxed tentative buffer"
    );

    Ok(RelaxOutput {
        positions: positions.iter().map(|p| p.to_array()).collect(),
        pinned: cloth.pins.pinned_vertices().iter().map(|v| v.0).collect(),
        constraint_count: cloth.constraints.len(),
        report,
    })
}
