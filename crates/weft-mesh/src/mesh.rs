//! Core triangle mesh type with SoA (Structure of Arrays) layout.
//!
//! The SoA layout stores each coordinate channel contiguously:
//! - `pos_x: [x0, x1, x2, ...]`
//! - `pos_y: [y0, y1, y2, ...]`
//! - `pos_z: [z0, z1, z2, ...]`
//!
//! Positions held here are the *rest* state. The solver never writes them;
//! it corrects a separate tentative buffer owned by the stepping loop.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use weft_types::{WeftError, WeftResult};

/// A triangle mesh stored in Structure-of-Arrays layout.
///
/// Vertex indices are stable for the lifetime of the mesh; nothing in the
/// engine renumbers them after construction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TriangleMesh {
    /// X coordinates of all vertices.
    pub pos_x: Vec<f32>,
    /// Y coordinates of all vertices. Y is the height axis.
    pub pos_y: Vec<f32>,
    /// Z coordinates of all vertices.
    pub pos_z: Vec<f32>,

    /// Triangle indices — each triangle is [v0, v1, v2].
    /// Stored flat: `[t0v0, t0v1, t0v2, t1v0, t1v1, t1v2, ...]`
    pub indices: Vec<u32>,
}

impl TriangleMesh {
    /// Returns the number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.pos_x.len()
    }

    /// Returns the number of triangles.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Returns the position of vertex `i` as `[x, y, z]`.
    #[inline]
    pub fn position(&self, i: usize) -> [f32; 3] {
        [self.pos_x[i], self.pos_y[i], self.pos_z[i]]
    }

    /// Returns the position as a `glam::Vec3`.
    #[inline]
    pub fn position_vec3(&self, i: usize) -> Vec3 {
        Vec3::new(self.pos_x[i], self.pos_y[i], self.pos_z[i])
    }

    /// Returns the three vertex indices of triangle `t`.
    #[inline]
    pub fn triangle(&self, t: usize) -> [u32; 3] {
        let base = t * 3;
        [self.indices[base], self.indices[base + 1], self.indices[base + 2]]
    }

    /// Iterates over faces as index slices.
    pub fn faces(&self) -> impl Iterator<Item = &[u32]> + '_ {
        self.indices.chunks_exact(3)
    }

    /// Sets the position of vertex `i`.
    #[inline]
    pub fn set_position(&mut self, i: usize, x: f32, y: f32, z: f32) {
        self.pos_x[i] = x;
        self.pos_y[i] = y;
        self.pos_z[i] = z;
    }

    /// Gathers the rest positions into an AoS buffer.
    ///
    /// This is the layout the constraint builder and solver work on.
    pub fn rest_positions(&self) -> Vec<Vec3> {
        (0..self.vertex_count()).map(|i| self.position_vec3(i)).collect()
    }

    /// Overwrites the rest positions from an AoS buffer.
    ///
    /// Used by the stepping loop to commit corrected positions as the new
    /// rest state.
    pub fn write_positions(&mut self, positions: &[Vec3]) -> WeftResult<()> {
        if positions.len() != self.vertex_count() {
            return Err(WeftError::InvalidMesh(format!(
                "Position buffer length ({}) != vertex count ({})",
                positions.len(),
                self.vertex_count()
            )));
        }
        for (i, p) in positions.iter().enumerate() {
            self.set_position(i, p.x, p.y, p.z);
        }
        Ok(())
    }

    /// Creates an empty mesh with pre-allocated capacity.
    pub fn with_capacity(vertex_capacity: usize, triangle_capacity: usize) -> Self {
        Self {
            pos_x: Vec::with_capacity(vertex_capacity),
            pos_y: Vec::with_capacity(vertex_capacity),
            pos_z: Vec::with_capacity(vertex_capacity),
            indices: Vec::with_capacity(triangle_capacity * 3),
        }
    }

    /// Checks that the buffers describe a mesh at all.
    ///
    /// - All SoA arrays have the same length
    /// - The index count is a multiple of 3
    /// - Triangle indices are within bounds
    ///
    /// Collapsed triangles (a repeated index) pass: topology extraction
    /// skips the self link and keeps the remaining edge. An empty mesh is
    /// valid.
    pub fn validate_buffers(&self) -> WeftResult<()> {
        let n = self.pos_x.len();

        if self.pos_y.len() != n || self.pos_z.len() != n {
            return Err(WeftError::InvalidMesh(
                "Position arrays have inconsistent lengths".into(),
            ));
        }

        if self.indices.len() % 3 != 0 {
            return Err(WeftError::InvalidMesh(
                "Index count is not divisible by 3".into(),
            ));
        }

        for (i, &idx) in self.indices.iter().enumerate() {
            if idx as usize >= n {
                return Err(WeftError::InvalidMesh(format!(
                    "Index {} at position {} is out of range (vertex count: {})",
                    idx, i, n
                )));
            }
        }

        Ok(())
    }

    /// Strict integrity check: [`TriangleMesh::validate_buffers`] plus no
    /// degenerate triangles (repeated vertex indices).
    pub fn validate(&self) -> WeftResult<()> {
        self.validate_buffers()?;

        for t in 0..self.triangle_count() {
            let [a, b, c] = self.triangle(t);
            if a == b || b == c || a == c {
                return Err(WeftError::InvalidMesh(format!(
                    "Triangle {} has repeated vertex indices: [{}, {}, {}]",
                    t, a, b, c
                )));
            }
        }

        Ok(())
    }
}
