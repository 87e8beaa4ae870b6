//! CLI command implementations.

use tracing::Level;
use weft_io::files::{read_config, read_json, write_json};
use weft_io::validator::validate_config;
use weft_io::{run_relax, validate_input, RelaxInput};
use weft_mesh::generators::quad_grid;
use weft_mesh::TriangleMesh;
use weft_solver::ClothConstraints;
use weft_telemetry::{EventBus, TracingSink};

/// Write a procedural sheet.
pub fn generate(
    cols: usize,
    rows: usize,
    width: f32,
    height: f32,
    output: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let mesh = quad_grid(cols, rows, width, height);
    write_json(output, &mesh)?;
    println!(
        "Wrote {} ({} verts, {} tris)",
        output,
        mesh.vertex_count(),
        mesh.triangle_count()
    );
    Ok(())
}

/// Print topology, pins and constraints of a mesh.
pub fn inspect(path: &str, tolerance: f32) -> Result<(), Box<dyn std::error::Error>> {
    println!("weft Mesh Inspector");
    println!("───────────────────");
    println!();

    let mesh: TriangleMesh = read_json(path)?;
    let cloth = ClothConstraints::from_mesh(&mesh, tolerance)?;

    println!("Vertices:     {}", mesh.vertex_count());
    println!("Triangles:    {}", mesh.triangle_count());
    println!("Connected:    {}", cloth.neighbors.len());
    println!("Constraints:  {}", cloth.constraints.len());
    println!("Symmetric:    {}", cloth.neighbors.is_symmetric());
    if let Err(e) = mesh.validate() {
        println!("Warning:      {e}");
    }
    println!("Color classes: {}", cloth.constraints.coloring().batch_count());
    println!();

    let describe = |v: Option<weft_types::VertexId>| match v {
        Some(v) => format!("{v} at {:?}", mesh.position(v.index())),
        None => "none".to_string(),
    };
    println!("Top-left:     {}", describe(cloth.pins.top_left));
    println!("Top-right:    {}", describe(cloth.pins.top_right));
    match cloth.pins.max_height {
        Some(h) => println!("Top row:      {} verts at y = {:.4}", cloth.pins.top_row.len(), h),
        None => println!("Top row:      empty"),
    }
    println!("Pinned total: {}", cloth.pinned_count());

    if !cloth.constraints.is_empty() {
        let (min, max) = cloth
            .constraints
            .iter()
            .map(|c| c.rest_length)
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), l| (lo.min(l), hi.max(l)));
        println!("Rest lengths: [{:.4}, {:.4}]", min, max);
    }

    Ok(())
}

/// Relax a tentative buffer and write corrected positions.
pub fn relax(
    input_path: &str,
    config_path: Option<&str>,
    output_path: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut input: RelaxInput = read_json(input_path)?;
    if let Some(path) = config_path {
        input.config = read_config(path)?;
    }

    let mut bus = EventBus::new();
    bus.add_sink(Box::new(TracingSink::new(Level::DEBUG)));

    let output = run_relax(&input, 0, Some(&mut bus))?;
    bus.finish();

    let report = &output.report;
    println!("Constraints:  {}", output.constraint_count);
    println!("Pinned:       {}", output.pinned.len());
    println!("Passes:       {}", report.passes);
    println!("Violation:    {:.6e} -> {:.6e}", report.initial_violation, report.final_violation());
    if report.degenerate_skips > 0 {
        println!("Degenerate:   {} skipped solves", report.degenerate_skips);
    }
    println!("Wall time:    {:.3}ms", report.wall_time * 1000.0);

    if let Some(path) = output_path {
        write_json(path, &output)?;
        println!("Results written to: {path}");
    }

    Ok(())
}

/// Validate a config or mesh / relax input.
pub fn validate(path: &str) -> Result<(), Box<dyn std::error::Error>> {
    println!("weft Validator");
    println!("──────────────");
    println!();

    if path.ends_with(".toml") {
        println!("Validating config: {path}");
        let config = read_config(path)?;
        match validate_config(&config) {
            Ok(()) => println!("✅ Config is valid."),
            Err(e) => println!("❌ Config validation failed: {e}"),
        }
    } else if path.ends_with(".json") {
        let value: serde_json::Value = read_json(path)?;
        if value.get("mesh").is_some() {
            println!("Validating relax input: {path}");
            let input: RelaxInput = serde_json::from_value(value)?;
            match validate_input(&input) {
                Ok(()) => println!("✅ Input is valid ({} verts).", input.mesh.vertex_count()),
                Err(e) => println!("❌ Input validation failed: {e}"),
            }
        } else {
            println!("Validating mesh: {path}");
            let mesh: TriangleMesh = serde_json::from_value(value)?;
            match mesh.validate() {
                Ok(()) => println!(
                    "✅ Mesh is valid ({} verts, {} tris).",
                    mesh.vertex_count(),
                    mesh.triangle_count()
                ),
                Err(e) => println!("❌ Mesh validation failed: {e}"),
            }
        }
    } else {
        println!("Unsupported file format. Use .toml (config) or .json (mesh or relax input).");
    }

    Ok(())
}
