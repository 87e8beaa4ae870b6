//! Strongly-typed vertex identifier.
//!
//! Raw `u32` indices are used inside hot loops; `VertexId` is what the
//! public topology and pinning APIs hand out.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Index into the vertex (position) buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct VertexId(pub u32);

impl VertexId {
    /// Returns the raw index as `usize` for buffer indexing.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl From<u32> for VertexId {
    fn from(val: u32) -> Self {
        Self(val)
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}
