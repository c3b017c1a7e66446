//! Mesh generation from attribute-carrying features
//!
//! Drives the tessellation module over a feature sequence and assembles the
//! vertex/color/index buffers handed to the scene encoder.
//!
//! # Submodules
//! - `surface` - Flat attribute surface (points, fan/earcut polygons, lines)
//! - `buildings` - Extruded prisms with the attribute as height

mod surface;
mod buildings;

pub use surface::build_surface;
pub use buildings::{build_buildings, BUILDING_COLOR};

/// Flat-polygon triangulation mode for the surface builder.
///
/// `Fan` is the producer's documented behavior and assumes convex rings;
/// `Earcut` handles concave boundaries at the cost of a real triangulation
/// pass per ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Triangulation {
    #[default]
    Fan,
    Earcut,
}
