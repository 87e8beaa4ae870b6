//! Graph coloring for parallel-safe relaxation.
//!
//! Greedy coloring of the constraint conflict graph: two constraints
//! conflict when they share a vertex. Constraints of one color touch
//! disjoint vertices, so their corrections can be computed concurrently
//! and applied without write conflicts.

use crate::constraint::DistanceConstraint;

/// Constraint indices grouped into vertex-disjoint batches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConstraintColoring {
    /// Constraint indices reordered so each batch is contiguous.
    /// Within a batch, construction order is preserved.
    order: Vec<usize>,
    /// Offsets into `order` where each batch starts, plus a final end offset.
    batch_offsets: Vec<usize>,
}

impl ConstraintColoring {
    /// Colors `constraints` in construction order, giving each the lowest
    /// color not used by an already-colored constraint sharing a vertex.
    pub fn build(constraints: &[DistanceConstraint]) -> Self {
        if constraints.is_empty() {
            return Self {
                order: Vec::new(),
                batch_offsets: vec![0],
            };
        }

        let vertex_count = constraints
            .iter()
            .map(|c| c.a.max(c.b) as usize + 1)
            .max()
            .unwrap_or(0);

        // Vertex → constraint adjacency
        let mut vertex_to_constraints: Vec<Vec<usize>> = vec![Vec::new(); vertex_count];
        for (ci, c) in constraints.iter().enumerate() {
            vertex_to_constraints[c.a as usize].push(ci);
            if c.b != c.a {
                vertex_to_constraints[c.b as usize].push(ci);
            }
        }

        // `stamp[color] == ci` marks the color as taken for constraint ci.
        let mut colors = vec![usize::MAX; constraints.len()];
        let mut stamp: Vec<usize> = Vec::new();

        for (ci, c) in constraints.iter().enumerate() {
            for v in [c.a, c.b] {
                for &other in &vertex_to_constraints[v as usize] {
                    let color = colors[other];
                    if color != usize::MAX {
                        stamp[color] = ci;
                    }
                }
            }

            let color = (0..stamp.len())
                .find(|&color| stamp[color] != ci)
                .unwrap_or(stamp.len());
            if color == stamp.len() {
                stamp.push(usize::MAX);
            }
            colors[ci] = color;
        }

        let mut batches: Vec<Vec<usize>> = vec![Vec::new(); stamp.len()];
        for (ci, &color) in colors.iter().enumerate() {
            batches[color].push(ci);
        }

        let mut order = Vec::with_capacity(constraints.len());
        let mut batch_offsets = vec![0usize];
        for batch in &batches {
            order.extend_from_slice(batch);
            batch_offsets.push(order.len());
        }

        Self {
            order,
            batch_offsets,
        }
    }

    /// Number of color classes.
    pub fn batch_count(&self) -> usize {
        self.batch_offsets.len().saturating_sub(1)
    }

    /// Constraint indices of batch `i`.
    pub fn batch(&self, i: usize) -> &[usize] {
        &self.order[self.batch_offsets[i]..self.batch_offsets[i + 1]]
    }

    /// Iterates over batches in color order.
    pub fn batches(&self) -> impl Iterator<Item = &[usize]> + '_ {
        (0..self.batch_count()).map(move |i| self.batch(i))
    }

    /// Total number of colored constraints.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
