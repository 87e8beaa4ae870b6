//! # weft-types
//!
//! Shared types, identifiers, error types, and numeric constants
//! for the weft cloth constraint engine.
//!
//! This crate has zero domain logic — it defines the vocabulary
//! that the mesh, solver and I/O crates share.

pub mod constants;
pub mod error;
pub mod ids;

pub use error::{WeftError, WeftResult};
pub use ids::VertexId;
