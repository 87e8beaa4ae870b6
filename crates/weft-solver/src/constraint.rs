//! Distance constraints and their construction from mesh adjacency.

use std::collections::HashSet;
use std::sync::OnceLock;

use glam::Vec3;
use serde::{Deserialize, Serialize};
use tracing::debug;
use weft_mesh::NeighborMap;
use weft_types::{WeftError, WeftResult};

use crate::coloring::ConstraintColoring;

/// Keeps two vertices at their rest distance.
///
/// The pair is unordered for solving purposes; `a` and `b` are stored so the
/// solver can index the position buffer directly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistanceConstraint {
    pub a: u32,
    pub b: u32,
    /// Distance between `a` and `b` at construction. Never changes.
    pub rest_length: f32,
}

impl DistanceConstraint {
    /// Creates a constraint whose rest length is the current distance
    /// between `a` and `b` in `rest_positions`.
    pub fn new(a: u32, b: u32, rest_positions: &[Vec3]) -> WeftResult<Self> {
        let pa = lookup(rest_positions, a)?;
        let pb = lookup(rest_positions, b)?;
        Ok(Self {
            a,
            b,
            rest_length: pa.distance(pb),
        })
    }

    /// The pair as `(min, max)`.
    #[inline]
    pub fn canonical_pair(&self) -> (u32, u32) {
        (self.a.min(self.b), self.a.max(self.b))
    }

    /// Distance between the endpoints in `positions`, or `None` if either
    /// endpoint is outside the buffer.
    #[inline]
    pub fn current_length(&self, positions: &[Vec3]) -> Option<f32> {
        let pa = positions.get(self.a as usize)?;
        let pb = positions.get(self.b as usize)?;
        Some(pa.distance(*pb))
    }

    /// Absolute deviation from the rest length, or `None` if either
    /// endpoint is outside the buffer.
    #[inline]
    pub fn violation(&self, positions: &[Vec3]) -> Option<f32> {
        self.current_length(positions)
            .map(|length| (length - self.rest_length).abs())
    }

    /// Deviation for a buffer already known to cover both endpoints.
    #[inline]
    pub(crate) fn violation_unchecked(&self, positions: &[Vec3]) -> f32 {
        let length = positions[self.a as usize].distance(positions[self.b as usize]);
        (length - self.rest_length).abs()
    }
}

fn lookup(positions: &[Vec3], v: u32) -> WeftResult<Vec3> {
    positions.get(v as usize).copied().ok_or_else(|| {
        WeftError::InvariantViolation(format!(
            "Vertex {} is outside the rest-position buffer (length {})",
            v,
            positions.len()
        ))
    })
}

/// All distance constraints of a mesh, in a fixed processing order.
///
/// Rebuilt only when topology changes. Read-only while solving, so one set
/// can be shared by any number of solver calls.
#[derive(Debug, Clone, Default)]
pub struct ConstraintSet {
    constraints: Vec<DistanceConstraint>,
    coloring: OnceLock<ConstraintColoring>,
}

impl ConstraintSet {
    /// Builds one constraint per unique unordered pair in `neighbors`.
    ///
    /// Pairs are emitted in ascending source-vertex order, then neighbor
    /// insertion order. A pair listed from both endpoints is emitted once;
    /// a pair listed from only one endpoint is still emitted.
    ///
    /// Returns [`WeftError::InvariantViolation`] if the map references a
    /// vertex outside `rest_positions`.
    pub fn build(neighbors: &NeighborMap, rest_positions: &[Vec3]) -> WeftResult<Self> {
        let mut seen: HashSet<(u32, u32)> = HashSet::new();
        let mut constraints = Vec::new();

        for (v, ns) in neighbors.iter() {
            for &n in ns {
                let pair = (v.min(n), v.max(n));
                if pair.0 == pair.1 || !seen.insert(pair) {
                    continue;
                }
                constraints.push(DistanceConstraint::new(pair.0, pair.1, rest_positions)?);
            }
        }

        debug!(
            vertices = neighbors.len(),
            constraints = constraints.len(),
            "Built distance constraints"
        );

        Ok(Self::from_constraints(constraints))
    }

    /// Wraps an explicit constraint list. Order is kept as given.
    pub fn from_constraints(constraints: Vec<DistanceConstraint>) -> Self {
        Self {
            constraints,
            coloring: OnceLock::new(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[DistanceConstraint] {
        &self.constraints
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DistanceConstraint> {
        self.constraints.iter()
    }

    pub fn get(&self, i: usize) -> Option<&DistanceConstraint> {
        self.constraints.get(i)
    }

    /// Largest vertex index referenced, if any.
    pub fn max_vertex(&self) -> Option<u32> {
        self.constraints.iter().map(|c| c.a.max(c.b)).max()
    }

    /// Fails if any constraint references a vertex at or beyond `vertex_count`.
    pub fn check_bounds(&self, vertex_count: usize) -> WeftResult<()> {
        for (i, c) in self.constraints.iter().enumerate() {
            let hi = c.a.max(c.b);
            if hi as usize >= vertex_count {
                return Err(WeftError::InvariantViolation(format!(
                    "Constraint {} references vertex {} (buffer length {})",
                    i, hi, vertex_count
                )));
            }
        }
        Ok(())
    }

    /// Largest absolute rest-length deviation over the set. Zero when empty.
    ///
    /// A buffer that does not cover every referenced vertex is an invariant
    /// violation.
    pub fn max_violation(&self, positions: &[Vec3]) -> WeftResult<f32> {
        self.check_bounds(positions.len())?;
        Ok(self.peak_violation(positions))
    }

    /// [`ConstraintSet::max_violation`] without the bounds check.
    pub(crate) fn peak_violation(&self, positions: &[Vec3]) -> f32 {
        self.constraints
            .iter()
            .map(|c| c.violation_unchecked(positions))
            .fold(0.0, f32::max)
    }

    /// Vertex-disjoint classes for the colored schedule. Computed on first use.
    pub fn coloring(&self) -> &ConstraintColoring {
        self.coloring
            .get_or_init(|| ConstraintColoring::build(&self.constraints))
    }
}

impl<'a> IntoIterator for &'a ConstraintSet {
    type Item = &'a DistanceConstraint;
    type IntoIter = std::slice::Iter<'a, DistanceConstraint>;

    fn into_iter(self) -> Self::IntoIter {
        self.constraints.iter()
    }
}
