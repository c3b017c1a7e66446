//! Geometry module for attribute-carrying vector features
//!
//! This module provides the input geometry model (points, line strings,
//! polygon rings) and the packed mesh buffer types handed to the scene
//! encoder.
//!
//! # Submodules
//! - `types` - Core geometric primitives (Coord, Geometry, Feature, mesh buffers)
//! - `colors` - Scalar-to-color mapping for attribute values

mod types;
mod colors;

pub use types::{
    Coord,
    Ring,
    Geometry,
    Feature,
    MeshBuffers,
    LineBuffers,
};

pub use colors::{
    heatmap_color,
    with_alpha,
};
