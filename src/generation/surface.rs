//! Flat attribute-surface generation
//!
//! Builds a z = 0 mesh from a feature sequence: one vertex per point
//! feature, fan- or earcut-triangulated polygon rings, and GL_LINES
//! segments for line strings. Every vertex of a ring repeats the ring's
//! mapped color (per-ring broadcast, applied after triangulation).

use crate::geometry::{with_alpha, Coord, Feature, Geometry, LineBuffers, MeshBuffers};
use crate::tessellation::{earcut_triangulate, fan_triangulate};

use super::Triangulation;

/// Attribute range over the whole feature sequence, used to normalize the
/// color ramp.
fn attribute_range(features: &[Feature]) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for feature in features {
        min = min.min(feature.value);
        max = max.max(feature.value);
    }
    (min, max)
}

/// Append one polygon ring: vertices at z = 0, triangles offset by the
/// ring's base index, ring color broadcast to every vertex.
fn add_ring(
    mesh: &mut MeshBuffers,
    triangles: &mut Vec<[u32; 3]>,
    ring: &[Coord],
    color: [f32; 4],
    mode: Triangulation,
) {
    if ring.is_empty() {
        return; // no-op contribution, not an error
    }

    let base = mesh.positions.len() as u32;
    let local = match mode {
        Triangulation::Fan => fan_triangulate(ring.len()),
        Triangulation::Earcut => earcut_triangulate(ring),
    };

    for c in ring {
        mesh.positions.push([c.x as f32, c.y as f32, 0.0]);
        mesh.colors.push(color);
    }
    for [a, b, c] in local {
        triangles.push([base + a, base + b, base + c]);
    }
}

/// Build the flat surface mesh (and optional line set) from features.
///
/// `ramp` is the scalar-to-RGB collaborator, normalized over the attribute
/// range of the whole sequence; alpha is composed as 1.0. Returns the line
/// set only when at least one line string contributed to it.
pub fn build_surface<F>(
    features: &[Feature],
    mode: Triangulation,
    ramp: F,
) -> (MeshBuffers, Option<LineBuffers>)
where
    F: Fn(f64, f64, f64) -> [f32; 3],
{
    let (min_attr, max_attr) = attribute_range(features);

    let mut mesh = MeshBuffers::default();
    let mut triangles: Vec<[u32; 3]> = Vec::new();
    let mut lines = LineBuffers::default();

    for feature in features {
        let color = with_alpha(ramp(feature.value, min_attr, max_attr));
        match &feature.geometry {
            Geometry::Point(c) => {
                mesh.positions.push([c.x as f32, c.y as f32, 0.0]);
                mesh.colors.push(color);
            }
            Geometry::Polygon(ring) => {
                add_ring(&mut mesh, &mut triangles, ring, color, mode);
            }
            Geometry::MultiPolygon(rings) => {
                for ring in rings {
                    add_ring(&mut mesh, &mut triangles, ring, color, mode);
                }
            }
            Geometry::LineString(points) => {
                if points.len() < 2 {
                    log::debug!("skipping line string with {} points", points.len());
                    continue;
                }
                let base = lines.positions.len() as u32;
                for c in points {
                    lines.positions.push([c.x as f32, c.y as f32, 0.0]);
                    lines.colors.push(color);
                }
                for i in 0..points.len() as u32 - 1 {
                    lines.segments.push([base + i, base + i + 1]);
                }
            }
        }
    }

    mesh.triangles = (!triangles.is_empty()).then_some(triangles);
    let lines = (!lines.positions.is_empty()).then_some(lines);
    (mesh, lines)
}
