//! Integration tests for weft-io.

use approx::assert_relative_eq;
use weft_io::files::parse_config;
use weft_io::validator::validate_config;
use weft_io::{run_relax, validate_input, RelaxConfig, RelaxInput, RelaxOutput};
use weft_mesh::generators::{quad_grid, single_triangle};
use weft_solver::Schedule;
use weft_telemetry::{EventBus, EventKind, VecSink};
use weft_types::WeftError;

fn sagged_grid_input() -> RelaxInput {
    let mesh = quad_grid(4, 4, 2.0, 2.0);
    let tentative = mesh
        .rest_positions()
        .iter()
        .enumerate()
        .map(|(i, p)| {
            // Top row (first five vertices) stays where it is.
            let sag = if i < 5 { 0.0 } else { 0.2 };
            [p.x, p.y - sag, p.z]
        })
        .collect();
    RelaxInput::new(mesh, Some(tentative))
}

// ─── Contract Tests ───────────────────────────────────────────

#[test]
fn input_json_roundtrip() {
    let input = sagged_grid_input();
    let json = serde_json::to_string(&input).unwrap();
    let recovered: RelaxInput = serde_json::from_str(&json).unwrap();
    assert_eq!(recovered.mesh, input.mesh);
    assert_eq!(recovered.tentative, input.tentative);
    assert_eq!(recovered.config, input.config);
}

#[test]
fn input_without_tentative_or_config_uses_rest_state() {
    let json = r#"{
        "mesh": {
            "pos_x": [0.0, 1.0, 0.0],
            "pos_y": [0.0, 0.0, 1.0],
            "pos_z": [0.0, 0.0, 0.0],
            "indices": [0, 1, 2]
        }
    }"#;
    let input: RelaxInput = serde_json::from_str(json).unwrap();
    assert!(input.tentative.is_none());
    assert_eq!(input.config, RelaxConfig::default());
    assert_eq!(input.tentative_positions(), input.mesh.rest_positions());
}

#[test]
fn config_from_partial_toml() {
    let config = parse_config(
        r#"
        top_row_tolerance = 0.001

        [solver]
        relaxation_passes = 25
        schedule = "colored"
        "#,
    )
    .unwrap();
    assert_relative_eq!(config.top_row_tolerance, 0.001);
    assert_eq!(config.solver.relaxation_passes, 25);
    assert_eq!(config.solver.schedule, Schedule::Colored);
}

#[test]
fn malformed_toml_is_serialization_error() {
    let err = parse_config("solver = 3").unwrap_err();
    assert!(matches!(err, WeftError::Serialization(_)));
}

// ─── Validation Tests ─────────────────────────────────────────

#[test]
fn valid_input_passes() {
    assert!(validate_input(&sagged_grid_input()).is_ok());
}

#[test]
fn tentative_length_mismatch_rejected() {
    let mut input = sagged_grid_input();
    if let Some(t) = input.tentative.as_mut() {
        t.pop();
    }
    assert!(matches!(
        validate_input(&input),
        Err(WeftError::InvalidMesh(_))
    ));
}

#[test]
fn non_finite_tentative_rejected() {
    let mut input = sagged_grid_input();
    if let Some(t) = input.tentative.as_mut() {
        t[7][1] = f32::NAN;
    }
    assert!(validate_input(&input).is_err());
}

#[test]
fn bad_mesh_error_is_reported_once() {
    let mut input = sagged_grid_input();
    input.mesh.indices[4] = 99;
    let err = validate_input(&input).unwrap_err();
    assert!(matches!(err, WeftError::InvalidMesh(_)));
    assert_eq!(err.to_string().matches("Invalid mesh").count(), 1, "{err}");
}

#[test]
fn collapsed_triangle_is_accepted() {
    let mut input = RelaxInput::new(quad_grid(1, 1, 1.0, 1.0), None);
    input.mesh.indices.extend_from_slice(&[2, 2, 3]);
    assert!(validate_input(&input).is_ok());

    let output = run_relax(&input, 0, None).unwrap();
    assert_eq!(output.positions.len(), 4);
}

#[test]
fn negative_tolerance_rejected() {
    let config = RelaxConfig {
        top_row_tolerance: -1.0,
        ..Default::default()
    };
    assert!(matches!(
        validate_config(&config),
        Err(WeftError::InvalidConfig(_))
    ));
}

// ─── Pipeline Tests ───────────────────────────────────────────

#[test]
fn relax_keeps_top_row_and_reduces_violation() {
    let input = sagged_grid_input();
    let output = run_relax(&input, 0, None).unwrap();

    assert_eq!(output.pinned, vec![0, 1, 2, 3, 4]);
    assert_eq!(output.constraint_count, 56);
    assert_eq!(output.positions.len(), 25);

    let tentative = input.tentative.as_ref().unwrap();
    for &v in &output.pinned {
        assert_eq!(output.positions[v as usize], tentative[v as usize]);
    }
    assert!(output.report.final_violation() < output.report.initial_violation);
}

#[test]
fn relax_of_rest_state_changes_nothing() {
    let input = RelaxInput::new(single_triangle(), None);
    let output = run_relax(&input, 0, None).unwrap();
    assert_eq!(output.positions, vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]);
    assert_relative_eq!(output.report.final_violation(), 0.0);
}

#[test]
fn relax_emits_topology_and_pass_events() {
    let mut bus = EventBus::new();
    let sink = VecSink::new();
    bus.add_sink(Box::new(sink.clone()));

    let output = run_relax(&sagged_grid_input(), 4, Some(&mut bus)).unwrap();
    bus.finish();

    let events = sink.events();
    // topology + begin + one per pass + end
    assert_eq!(events.len(), 3 + output.report.passes as usize);
    assert_eq!(bus.delivered(), events.len() as u64);
    assert!(events.iter().all(|e| e.step == 4));
    assert!(matches!(
        events[0].kind,
        EventKind::TopologyBuilt { vertices: 25, constraints: 56, pinned: 5 }
    ));
    assert!(matches!(events.last().unwrap().kind, EventKind::RelaxEnd { .. }));
}

#[test]
fn pass_events_match_the_report() {
    let mut bus = EventBus::new();
    let sink = VecSink::new();
    bus.add_sink(Box::new(sink.clone()));

    let report = run_relax(&sagged_grid_input(), 0, Some(&mut bus))
        .unwrap()
        .report;
    let events = sink.events();

    match events[1].kind {
        EventKind::RelaxBegin {
            passes,
            initial_violation,
        } => {
            assert_eq!(passes, report.passes);
            assert_relative_eq!(initial_violation, report.initial_violation);
        }
        ref other => panic!("expected RelaxBegin, got {other:?}"),
    }

    let passes: Vec<(u32, f32)> = events
        .iter()
        .filter_map(|e| match e.kind {
            EventKind::PassCompleted {
                pass,
                max_violation,
                ..
            } => Some((pass, max_violation)),
            _ => None,
        })
        .collect();
    let expected: Vec<(u32, f32)> = report
        .pass_violations
        .iter()
        .enumerate()
        .map(|(i, &v)| (i as u32, v))
        .collect();
    assert_eq!(passes, expected);
}

#[test]
fn disabled_bus_receives_nothing() {
    let mut bus = EventBus::new();
    let sink = VecSink::new();
    bus.add_sink(Box::new(sink.clone()));
    bus.set_enabled(false);

    run_relax(&sagged_grid_input(), 0, Some(&mut bus)).unwrap();
    assert!(sink.is_empty());
}

#[test]
fn output_json_roundtrip() {
    let output = run_relax(&sagged_grid_input(), 0, None).unwrap();
    let json = serde_json::to_string(&output).unwrap();
    let recovered: RelaxOutput = serde_json::from_str(&json).unwrap();
    assert_eq!(recovered.positions, output.positions);
    assert_eq!(recovered.pinned, output.pinned);
}
