//! Mesh topology queries.
//!
//! Builds the vertex adjacency relation from the face list. Two vertices
//! are neighbors when they co-occur in at least one face; for triangles
//! this is exactly the edge graph.

use std::collections::BTreeMap;

use tracing::debug;
use weft_types::{WeftError, WeftResult};

use crate::mesh::TriangleMesh;

/// Per-vertex neighbor sets, derived from face connectivity.
///
/// Built once when a mesh is loaded (or after its topology changes).
/// A vertex never lists itself and never lists a neighbor twice.
/// Vertices that appear in no face have no entry; [`NeighborMap::neighbors`]
/// reports them as having no neighbors.
///
/// Entries are keyed by ascending vertex index and each set keeps insertion
/// order, so iteration is reproducible for a given face order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NeighborMap {
    entries: BTreeMap<u32, Vec<u32>>,
}

impl NeighborMap {
    /// Builds the neighbor map of a triangle mesh.
    pub fn from_mesh(mesh: &TriangleMesh) -> WeftResult<Self> {
        build_neighbor_map(mesh.faces(), mesh.vertex_count())
    }

    /// Returns the neighbors of `v`, or an empty slice if `v` is in no face.
    pub fn neighbors(&self, v: u32) -> &[u32] {
        self.entries.get(&v).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Returns true if `v` appears in at least one face.
    pub fn contains(&self, v: u32) -> bool {
        self.entries.contains_key(&v)
    }

    /// Number of vertices with an entry.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates `(vertex, neighbors)` in ascending vertex order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &[u32])> + '_ {
        self.entries.iter().map(|(&v, ns)| (v, ns.as_slice()))
    }

    /// Inserts `b` into `a`'s set. Returns false for self-links and duplicates.
    pub fn insert(&mut self, a: u32, b: u32) -> bool {
        if a == b {
            return false;
        }
        let set = self.entries.entry(a).or_default();
        if set.contains(&b) {
            return false;
        }
        set.push(b);
        true
    }

    /// Number of distinct unordered pairs `{a, b}` in the map.
    pub fn pair_count(&self) -> usize {
        let mut pairs: Vec<(u32, u32)> = self
            .iter()
            .flat_map(|(v, ns)| ns.iter().map(move |&n| (v.min(n), v.max(n))))
            .collect();
        pairs.sort_unstable();
        pairs.dedup();
        pairs.len()
    }

    /// Returns every directed link `a -> b` whose reverse `b -> a` is missing.
    pub fn asymmetric_links(&self) -> Vec<(u32, u32)> {
        self.iter()
            .flat_map(|(v, ns)| ns.iter().map(move |&n| (v, n)))
            .filter(|&(v, n)| !self.neighbors(n).contains(&v))
            .collect()
    }

    /// Returns true if `b ∈ N(a)` implies `a ∈ N(b)` for every entry.
    pub fn is_symmetric(&self) -> bool {
        self.asymmetric_links().is_empty()
    }

    /// Adds every missing reverse link. Returns the number of links added.
    pub fn symmetrize(&mut self) -> usize {
        let missing = self.asymmetric_links();
        for &(a, b) in &missing {
            self.insert(b, a);
        }
        missing.len()
    }
}

/// Builds a [`NeighborMap`] from an arbitrary face list.
///
/// Faces may be triangles or larger polygons. For each face, every vertex
/// gains every *other* vertex of that face as a neighbor.
///
/// Returns [`WeftError::InvariantViolation`] if a face references a vertex
/// at or beyond `vertex_count`. An empty face list yields an empty map.
pub fn build_neighbor_map<'a, I>(faces: I, vertex_count: usize) -> WeftResult<NeighborMap>
where
    I: IntoIterator<Item = &'a [u32]>,
{
    let mut map = NeighborMap::default();
    let mut face_count = 0usize;

    for (f, face) in faces.into_iter().enumerate() {
        face_count += 1;
        if let Some(&bad) = face.iter().find(|&&v| v as usize >= vertex_count) {
            return Err(WeftError::InvariantViolation(format!(
                "Face {} references vertex {} (vertex count: {})",
                f, bad, vertex_count
            )));
        }

        for &v in face {
            // A vertex present in a face always gets an entry, even if the
            // face is degenerate and contributes no neighbor.
            map.entries.entry(v).or_default();
            for &n in face {
                map.insert(v, n);
            }
        }
    }

    debug!(
        faces = face_count,
        vertices = map.len(),
        "Built neighbor map"
    );

    Ok(map)
}
