//! Ear-clipping triangulation for concave rings

use crate::geometry::Coord;

/// Triangulate a ring with ear clipping, handling concave boundaries the fan
/// cannot. Exterior ring only; holes are not consulted.
///
/// Returns local index triples into the ring, same contract as
/// `fan_triangulate`.
pub fn earcut_triangulate(ring: &[Coord]) -> Vec<[u32; 3]> {
    let mut flat_coords: Vec<f64> = Vec::with_capacity(ring.len() * 2);
    for c in ring {
        flat_coords.push(c.x);
        flat_coords.push(c.y);
    }

    let indices = earcutr::earcut(&flat_coords, &[], 2).unwrap_or_default();
    indices
        .chunks_exact(3)
        .map(|tri| [tri[0] as u32, tri[1] as u32, tri[2] as u32])
        .collect()
}
