//! Integration tests for weft-types.

use weft_types::{VertexId, WeftError};

// ─── ID Tests ──────────────────────────────────────────────────

#[test]
fn vertex_id_index() {
    let id = VertexId(42);
    assert_eq!(id.index(), 42);
}

#[test]
fn vertex_id_ordering_follows_raw_index() {
    let mut ids = vec![VertexId(3), VertexId(0), VertexId(2)];
    ids.sort();
    assert_eq!(ids, vec![VertexId(0), VertexId(2), VertexId(3)]);
}

#[test]
fn vertex_id_display() {
    assert_eq!(VertexId(7).to_string(), "v7");
}

#[test]
fn ids_are_serializable() {
    let id = VertexId(100);
    let json = serde_json::to_string(&id).unwrap();
    let deserialized: VertexId = serde_json::from_str(&json).unwrap();
    assert_eq!(id, deserialized);
}

// ─── Error Tests ──────────────────────────────────────────────

#[test]
fn error_display() {
    let err = WeftError::InvalidMesh("index 9 out of range".into());
    assert!(err.to_string().contains("index 9"));
}

#[test]
fn invariant_violation_display() {
    let err = WeftError::InvariantViolation("constraint 3 references vertex 12".into());
    let msg = err.to_string();
    assert!(msg.starts_with("Invariant violation"));
    assert!(msg.contains("vertex 12"));
}

#[test]
fn io_error_converts() {
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.json");
    let err: WeftError = io.into();
    assert!(matches!(err, WeftError::Io(_)));
}
