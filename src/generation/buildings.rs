//! Extruded building-footprint generation
//!
//! Duplicates each polygon ring into a bottom (z = 0) and top (z = height)
//! ring and triangulates walls plus caps, with the feature's attribute value
//! as the extrusion height. Rings tessellate in parallel; their base indices
//! are fixed by a sequential prefix sum first, so the output ordering does
//! not depend on scheduling.

use rayon::prelude::*;

use crate::geometry::{Feature, Geometry, MeshBuffers, Ring};
use crate::tessellation::extrude_ring;

/// Fixed RGBA applied to every extruded vertex
pub const BUILDING_COLOR: [f32; 4] = [0.3, 0.3, 0.5, 1.0];

/// Build the extruded prism mesh from polygonal features.
///
/// Non-polygon features are skipped per-feature (logged, never aborting the
/// batch).
pub fn build_buildings(features: &[Feature]) -> MeshBuffers {
    let mut rings: Vec<(&Ring, f32)> = Vec::new();
    for feature in features {
        match &feature.geometry {
            Geometry::Polygon(ring) => rings.push((ring, feature.value as f32)),
            Geometry::MultiPolygon(polys) => {
                rings.extend(polys.iter().map(|ring| (ring, feature.value as f32)));
            }
            other => {
                log::warn!("skipping unsupported geometry for extrusion: {}", other.kind());
            }
        }
    }
    rings.retain(|(ring, _)| !ring.is_empty());

    // Base index per ring: prefix sum of 2 * ring length, fixed before the
    // parallel stage so later rings land at deterministic offsets.
    let mut bases = Vec::with_capacity(rings.len());
    let mut next_base = 0u32;
    for (ring, _) in &rings {
        bases.push(next_base);
        next_base += 2 * ring.len() as u32;
    }

    let parts: Vec<(Vec<[f32; 3]>, Vec<[u32; 3]>)> = rings
        .par_iter()
        .zip(bases.par_iter())
        .map(|(&(ring, height), &base)| {
            let mut positions = Vec::with_capacity(ring.len() * 2);
            for c in ring {
                positions.push([c.x as f32, c.y as f32, 0.0]);
            }
            for c in ring {
                positions.push([c.x as f32, c.y as f32, height]);
            }
            (positions, extrude_ring(base, ring.len()))
        })
        .collect();

    let mut mesh = MeshBuffers::default();
    let mut triangles = Vec::new();
    for (positions, ring_triangles) in parts {
        mesh.colors
            .extend(std::iter::repeat_n(BUILDING_COLOR, positions.len()));
        mesh.positions.extend(positions);
        triangles.extend(ring_triangles);
    }
    mesh.triangles = (!triangles.is_empty()).then_some(triangles);
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Coord;

    fn square() -> Ring {
        vec![
            Coord { x: 0.0, y: 0.0 },
            Coord { x: 1.0, y: 0.0 },
            Coord { x: 1.0, y: 1.0 },
            Coord { x: 0.0, y: 1.0 },
        ]
    }

    #[test]
    fn test_square_prism() {
        let features = vec![Feature {
            geometry: Geometry::Polygon(square()),
            value: 5.0,
        }];
        let mesh = build_buildings(&features);

        assert_eq!(mesh.positions.len(), 8);
        assert_eq!(mesh.colors.len(), 8);
        assert!(mesh.colors.iter().all(|&c| c == BUILDING_COLOR));
        // Bottom ring at z = 0, top ring at z = height
        assert!(mesh.positions[..4].iter().all(|p| p[2] == 0.0));
        assert!(mesh.positions[4..].iter().all(|p| p[2] == 5.0));

        let triangles = mesh.triangles.unwrap();
        assert_eq!(triangles.len(), 12);
        assert!(triangles.iter().all(|tri| tri.iter().all(|&i| i < 8)));
    }

    #[test]
    fn test_non_polygons_are_skipped() {
        let features = vec![
            Feature {
                geometry: Geometry::Point(Coord { x: 9.0, y: 9.0 }),
                value: 1.0,
            },
            Feature {
                geometry: Geometry::Polygon(square()),
                value: 3.0,
            },
            Feature {
                geometry: Geometry::LineString(vec![
                    Coord { x: 0.0, y: 0.0 },
                    Coord { x: 1.0, y: 1.0 },
                ]),
                value: 2.0,
            },
        ];
        let mesh = build_buildings(&features);
        // Only the polygon contributes
        assert_eq!(mesh.positions.len(), 8);
        assert_eq!(mesh.triangles.unwrap().len(), 12);
    }

    #[test]
    fn test_multiple_rings_get_disjoint_bases() {
        let features = vec![Feature {
            geometry: Geometry::MultiPolygon(vec![square(), square()]),
            value: 2.0,
        }];
        let mesh = build_buildings(&features);

        assert_eq!(mesh.positions.len(), 16);
        let triangles = mesh.triangles.unwrap();
        assert_eq!(triangles.len(), 24);
        // First ring's triangles stay under 8, second ring's start at 8
        assert!(triangles[..12].iter().all(|tri| tri.iter().all(|&i| i < 8)));
        assert!(triangles[12..]
            .iter()
            .all(|tri| tri.iter().all(|&i| (8..16).contains(&i))));
    }

    #[test]
    fn test_no_polygons_yields_empty_mesh() {
        let features = vec![Feature {
            geometry: Geometry::Point(Coord { x: 0.0, y: 0.0 }),
            value: 1.0,
        }];
        let mesh = build_buildings(&features);
        assert!(mesh.positions.is_empty());
        assert!(mesh.triangles.is_none());
    }
}
