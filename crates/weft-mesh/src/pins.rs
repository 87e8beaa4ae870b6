//! Anchor (pin) selection.
//!
//! A hanging sheet is held by its top edge: the highest row of vertices
//! plus two corner anchors. Selection runs once on the rest positions and
//! the result never changes during simulation.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use tracing::debug;
use weft_types::VertexId;

/// Vertices held fixed in space.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PinSelection {
    /// Top-left anchor.
    pub top_left: Option<VertexId>,
    /// Top-right anchor.
    pub top_right: Option<VertexId>,
    /// Every vertex whose height matches the maximum height, in index order.
    pub top_row: Vec<VertexId>,
    /// The maximum height found by the scan.
    pub max_height: Option<f32>,
}

impl PinSelection {
    /// All pinned vertices, sorted and deduplicated.
    pub fn pinned_vertices(&self) -> Vec<VertexId> {
        let mut pinned: Vec<VertexId> = self
            .top_left
            .iter()
            .chain(self.top_right.iter())
            .chain(self.top_row.iter())
            .copied()
            .collect();
        pinned.sort_unstable();
        pinned.dedup();
        pinned
    }

    /// Returns true if `v` is one of the anchors or in the top row.
    pub fn is_pinned(&self, v: VertexId) -> bool {
        self.top_left == Some(v) || self.top_right == Some(v) || self.top_row.contains(&v)
    }

    /// Per-vertex pinning flags (`true` = pinned), the form the solver consumes.
    ///
    /// Pins at or beyond `vertex_count` are ignored.
    pub fn pinned_mask(&self, vertex_count: usize) -> Vec<bool> {
        let mut mask = vec![false; vertex_count];
        for v in self.pinned_vertices() {
            if let Some(slot) = mask.get_mut(v.index()) {
                *slot = true;
            }
        }
        mask
    }
}

/// Selects the pinned vertices of a sheet from its rest positions.
///
/// Single scan in index order, tracking the best height seen so far. The
/// horizontal extrema only move while the current vertex is at or above
/// that best height:
///
/// - `x <= min_x` makes it the top-left anchor;
/// - otherwise `x >= max_x` makes it the top-right anchor.
///
/// So a vertex can only become an anchor if it is the highest seen *at the
/// time it is visited*. The result therefore depends on vertex order; this
/// is the tie-break rule, not an accident.
///
/// A second pass collects the top row: every vertex within
/// `top_row_tolerance` of the final maximum height. A tolerance of `0.0`
/// gives exact comparison.
pub fn select_pins(positions: &[Vec3], top_row_tolerance: f32) -> PinSelection {
    let mut max_y = f32::NEG_INFINITY;
    let mut min_x = f32::INFINITY;
    let mut max_x = f32::NEG_INFINITY;
    let mut top_left = None;
    let mut top_right = None;

    for (i, p) in positions.iter().enumerate() {
        if p.y >= max_y {
            max_y = p.y;

            if p.x <= min_x {
                min_x = p.x;
                top_left = Some(VertexId(i as u32));
            } else if p.x >= max_x {
                max_x = p.x;
                top_right = Some(VertexId(i as u32));
            }
        }
    }

    if positions.is_empty() || !max_y.is_finite() {
        return PinSelection::default();
    }

    let tolerance = top_row_tolerance.max(0.0);
    let top_row: Vec<VertexId> = positions
        .iter()
        .enumerate()
        .filter(|(_, p)| (p.y - max_y).abs() <= tolerance)
        .map(|(i, _)| VertexId(i as u32))
        .collect();

    debug!(
        max_height = max_y,
        top_row = top_row.len(),
        top_left = ?top_left,
        top_right = ?top_right,
        "Selected pins"
    );

    PinSelection {
        top_left,
        top_right,
        top_row,
        max_height: Some(max_y),
    }
}
