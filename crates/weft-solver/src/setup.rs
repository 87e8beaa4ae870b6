//! Load-time derivation of everything the solver needs from a mesh.

use tracing::info;
use weft_mesh::{select_pins, NeighborMap, PinSelection, TriangleMesh};
use weft_types::{VertexId, WeftResult};

use crate::constraint::ConstraintSet;

/// Immutable per-mesh solver inputs.
///
/// Computed once from the rest state and kept apart from the mesh, so the
/// solver can be driven without any mesh at hand. Rebuild it if the mesh
/// topology changes; never during steady-state simulation.
#[derive(Debug, Clone)]
pub struct ClothConstraints {
    /// Vertex adjacency from shared faces.
    pub neighbors: NeighborMap,
    /// Anchor vertices.
    pub pins: PinSelection,
    /// `pins` as a per-vertex mask.
    pub pinned: Vec<bool>,
    /// One distance constraint per adjacent pair.
    pub constraints: ConstraintSet,
}

impl ClothConstraints {
    /// Extracts topology, pins and constraints from `mesh`.
    ///
    /// An empty mesh yields empty outputs. A collapsed triangle contributes
    /// only its remaining edge. Inconsistent buffers or out-of-range indices
    /// are rejected.
    pub fn from_mesh(mesh: &TriangleMesh, top_row_tolerance: f32) -> WeftResult<Self> {
        mesh.validate_buffers()?;

        let rest = mesh.rest_positions();
        let neighbors = NeighborMap::from_mesh(mesh)?;
        let pins = select_pins(&rest, top_row_tolerance);
        let pinned = pins.pinned_mask(mesh.vertex_count());
        let constraints = ConstraintSet::build(&neighbors, &rest)?;

        info!(
            vertices = mesh.vertex_count(),
            triangles = mesh.triangle_count(),
            constraints = constraints.len(),
            pinned = pinned.iter().filter(|&&p| p).count(),
            "Cloth constraints ready"
        );

        Ok(Self {
            neighbors,
            pins,
            pinned,
            constraints,
        })
    }

    /// Number of vertices the pinned mask covers.
    pub fn vertex_count(&self) -> usize {
        self.pinned.len()
    }

    pub fn is_pinned(&self, v: VertexId) -> bool {
        self.pinned.get(v.index()).copied().unwrap_or(false)
    }

    /// Number of pinned vertices.
    pub fn pinned_count(&self) -> usize {
        self.pinned.iter().filter(|&&p| p).count()
    }
}
