//! Core geometry types for attribute-carrying vector features
//!
//! Input coordinates stay in f64 (geo sources are double precision) and are
//! narrowed to f32 when mesh buffers are built.

/// A 2D coordinate in source units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coord {
    pub x: f64,
    pub y: f64,
}

/// Ordered closed sequence of coordinates forming one polygon boundary.
/// Exterior only; interior rings (holes) are not consulted.
pub type Ring = Vec<Coord>;

/// Supported input geometry
///
/// Polygons carry their exterior ring only. Source rings usually repeat the
/// first coordinate as the last; the mesh builders keep that closing vertex.
#[derive(Debug, Clone)]
pub enum Geometry {
    Point(Coord),
    LineString(Vec<Coord>),
    Polygon(Ring),
    MultiPolygon(Vec<Ring>),
}

impl Geometry {
    /// Short name for diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            Geometry::Point(_) => "Point",
            Geometry::LineString(_) => "LineString",
            Geometry::Polygon(_) => "Polygon",
            Geometry::MultiPolygon(_) => "MultiPolygon",
        }
    }
}

/// One geometry paired with its scalar attribute value
#[derive(Debug, Clone)]
pub struct Feature {
    pub geometry: Geometry,
    pub value: f64,
}

/// Triangle-mesh arrays ready for packing
///
/// `positions` and `colors` are parallel (same length). `triangles` is the
/// tagged index state: `None` means the mesh is unindexed (point/line only),
/// distinct from `Some` with zero triangles.
#[derive(Debug, Clone, Default)]
pub struct MeshBuffers {
    pub positions: Vec<[f32; 3]>,
    pub colors: Vec<[f32; 4]>,
    pub triangles: Option<Vec<[u32; 3]>>,
}

/// GL_LINES arrays for the optional second primitive set
///
/// `segments` holds index pairs into the line set's own vertex range.
#[derive(Debug, Clone, Default)]
pub struct LineBuffers {
    pub positions: Vec<[f32; 3]>,
    pub colors: Vec<[f32; 4]>,
    pub segments: Vec<[u32; 2]>,
}
