//! # weft-mesh
//!
//! Triangle mesh representation with Structure-of-Arrays (SoA) layout,
//! plus the load-time analyses the constraint solver depends on.
//!
//! ## Key Types
//!
//! - [`TriangleMesh`] — Rest positions in contiguous SoA buffers and a flat
//!   triangle index buffer.
//! - [`NeighborMap`] — Per-vertex set of vertices sharing at least one face.
//! - [`PinSelection`] — Top-left, top-right and top-row anchor vertices.
//! - Procedural quad grids for tests and demos.

pub mod generators;
pub mod mesh;
pub mod pins;
pub mod topology;

pub use glam::Vec3;
pub use mesh::TriangleMesh;
pub use pins::{select_pins, PinSelection};
pub use topology::{build_neighbor_map, NeighborMap};
