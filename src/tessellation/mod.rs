//! Tessellation module for polygon rings
//!
//! Converts a closed ring into triangle index triples, either flat (triangle
//! fan, or ear clipping for concave rings) or extruded into a prism with
//! walls and caps. Triangulators emit local indices; callers offset them by
//! the ring's base index in the shared vertex array.
//!
//! # Submodules
//! - `fan` - Anchor-vertex triangle fan (the default flat mode)
//! - `earcut` - Ear-clipping triangulation for concave rings
//! - `extrude` - Prism walls and caps for extruded footprints

mod fan;
mod earcut;
mod extrude;

pub use fan::fan_triangulate;
pub use earcut::earcut_triangulate;
pub use extrude::extrude_ring;
