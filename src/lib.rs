//! geoglb: attribute-carrying 2D vector geometry to binary glTF meshes
//!
//! Turns a sequence of (geometry, scalar attribute) features into a colored
//! 3D mesh packed as a single binary glTF (GLB) container, and decodes such
//! containers back into typed arrays. Two product variants are supported:
//! a flat attribute surface (points and fan-triangulated polygons, colored
//! by a heatmap ramp) and extruded building footprints (the attribute as
//! prism height).
//!
//! Reading geometry sources (shapefiles etc.) is a collaborator's job; this
//! crate starts at `Feature` slices and ends at GLB bytes.
//!
//! # Example
//! ```no_run
//! use geoglb::{build_surface, heatmap_color, write_glb, Coord, Feature, Geometry, Triangulation};
//!
//! let features = vec![Feature {
//!     geometry: Geometry::Point(Coord { x: 12.5, y: 3.0 }),
//!     value: 42.0,
//! }];
//! let (mesh, lines) = build_surface(&features, Triangulation::Fan, heatmap_color);
//! write_glb(&mesh, lines.as_ref(), "surface.glb")?;
//! # Ok::<(), geoglb::EncodeError>(())
//! ```

pub mod geometry;
pub mod tessellation;
pub mod generation;
pub mod scene;

pub use geometry::{heatmap_color, with_alpha, Coord, Feature, Geometry, LineBuffers, MeshBuffers, Ring};
pub use generation::{build_buildings, build_surface, Triangulation, BUILDING_COLOR};
pub use scene::{
    decode_glb, decode_glb_bytes, encode_glb, write_glb, DecodeError, DecodedScene, EncodeError,
    IndexData,
};
