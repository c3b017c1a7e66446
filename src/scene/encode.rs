//! Container encoder: metadata bookkeeping and GLB framing
//!
//! Builds the scene/node/mesh/accessor/bufferView/buffer records describing
//! one packed blob, frames metadata + blob as a GLB byte stream, and writes
//! it atomically (full assembly in memory, temp file, rename).

use std::fs;
use std::path::Path;

use byteorder::{LittleEndian, WriteBytesExt};
use indexmap::IndexMap;

use crate::geometry::{LineBuffers, MeshBuffers};

use super::document::{
    Accessor, Asset, Buffer, BufferView, Mesh, Node, Primitive, Root, Scene, CHUNK_BIN, CHUNK_JSON,
    COMPONENT_FLOAT, COMPONENT_UNSIGNED_INT, GLB_MAGIC, GLB_VERSION, MODE_LINES, MODE_TRIANGLES,
    TARGET_ARRAY_BUFFER, TARGET_ELEMENT_ARRAY_BUFFER,
};
use super::error::EncodeError;
use super::pack::{BufferPacker, ByteRange};

/// Componentwise min/max across all rows of a float attribute.
fn component_min_max<const N: usize>(rows: &[[f32; N]]) -> (Vec<f32>, Vec<f32>) {
    let mut min = [f32::INFINITY; N];
    let mut max = [f32::NEG_INFINITY; N];
    for row in rows {
        for (i, &v) in row.iter().enumerate() {
            min[i] = min[i].min(v);
            max[i] = max[i].max(v);
        }
    }
    (min.to_vec(), max.to_vec())
}

/// Arena state grown while primitives are encoded
#[derive(Default)]
struct MetadataArena {
    accessors: Vec<Accessor>,
    buffer_views: Vec<BufferView>,
}

impl MetadataArena {
    fn push_view(&mut self, range: ByteRange, target: u32) -> usize {
        let index = self.buffer_views.len();
        self.buffer_views.push(BufferView {
            buffer: 0,
            byte_offset: range.offset,
            byte_length: range.length,
            target: Some(target),
        });
        index
    }

    fn push_float_accessor<const N: usize>(
        &mut self,
        view: usize,
        rows: &[[f32; N]],
        accessor_type: &str,
    ) -> usize {
        let (min, max) = component_min_max(rows);
        let index = self.accessors.len();
        self.accessors.push(Accessor {
            buffer_view: Some(view),
            byte_offset: 0,
            component_type: COMPONENT_FLOAT,
            count: rows.len(),
            accessor_type: accessor_type.to_string(),
            min,
            max,
        });
        index
    }

    fn push_index_accessor(&mut self, view: usize, scalar_count: usize) -> usize {
        let index = self.accessors.len();
        self.accessors.push(Accessor {
            buffer_view: Some(view),
            byte_offset: 0,
            component_type: COMPONENT_UNSIGNED_INT,
            count: scalar_count,
            accessor_type: "SCALAR".to_string(),
            min: Vec::new(),
            max: Vec::new(),
        });
        index
    }
}

/// Pack one position/color/index triad and record its metadata.
///
/// `index_rows` flattened to scalars; `None` (or zero rows) omits the index
/// accessor and bufferView entirely and the primitive falls back to
/// line-list mode. When indices are present the primitive draws in
/// `indexed_mode` (triangles for the surface set, lines for the line set).
fn push_primitive<const I: usize>(
    packer: &mut BufferPacker,
    arena: &mut MetadataArena,
    positions: &[[f32; 3]],
    colors: &[[f32; 4]],
    index_rows: Option<&[[u32; I]]>,
    indexed_mode: u32,
) -> Primitive {
    let position_range = packer.push_f32_rows(positions);
    let position_view = arena.push_view(position_range, TARGET_ARRAY_BUFFER);
    let position_accessor = arena.push_float_accessor(position_view, positions, "VEC3");

    let color_range = packer.push_f32_rows(colors);
    let color_view = arena.push_view(color_range, TARGET_ARRAY_BUFFER);
    let color_accessor = arena.push_float_accessor(color_view, colors, "VEC4");

    let mut attributes = IndexMap::new();
    attributes.insert("POSITION".to_string(), position_accessor);
    attributes.insert("COLOR_0".to_string(), color_accessor);

    let indices = index_rows.filter(|rows| !rows.is_empty()).map(|rows| {
        let range = packer.push_u32_rows(rows);
        let view = arena.push_view(range, TARGET_ELEMENT_ARRAY_BUFFER);
        arena.push_index_accessor(view, rows.len() * I)
    });

    let mode = if indices.is_some() { indexed_mode } else { MODE_LINES };
    Primitive {
        attributes,
        indices,
        mode: Some(mode),
    }
}

/// Encode mesh buffers (plus an optional GL_LINES set) into GLB bytes.
///
/// The mesh must have at least one vertex; an empty vertex array aborts with
/// `EncodeError::EmptyVertexBuffer` before any metadata is built.
pub fn encode_glb(mesh: &MeshBuffers, lines: Option<&LineBuffers>) -> Result<Vec<u8>, EncodeError> {
    if mesh.positions.is_empty() {
        return Err(EncodeError::EmptyVertexBuffer);
    }

    let mut packer = BufferPacker::new();
    let mut arena = MetadataArena::default();

    let surface = push_primitive(
        &mut packer,
        &mut arena,
        &mesh.positions,
        &mesh.colors,
        mesh.triangles.as_deref(),
        MODE_TRIANGLES,
    );

    let mut primitives = vec![surface];
    if let Some(lines) = lines.filter(|l| !l.positions.is_empty()) {
        primitives.push(push_primitive(
            &mut packer,
            &mut arena,
            &lines.positions,
            &lines.colors,
            Some(lines.segments.as_slice()),
            MODE_LINES,
        ));
    }

    let root = Root {
        asset: Asset {
            version: "2.0".to_string(),
            generator: Some(concat!("geoglb ", env!("CARGO_PKG_VERSION")).to_string()),
        },
        scene: Some(0),
        scenes: vec![Scene { nodes: vec![0] }],
        nodes: vec![Node { mesh: Some(0) }],
        meshes: vec![Mesh { primitives }],
        accessors: arena.accessors,
        buffer_views: arena.buffer_views,
        buffers: vec![Buffer {
            byte_length: packer.len(),
            uri: None,
        }],
    };

    frame_glb(&root, &packer.into_blob())
}

/// Frame metadata + blob as a GLB byte stream.
///
/// Header, then the JSON chunk space-padded to 4 bytes, then the binary
/// chunk zero-padded to 4 bytes; the header's total length covers all three.
pub fn frame_glb(root: &Root, blob: &[u8]) -> Result<Vec<u8>, EncodeError> {
    let json = serde_json::to_vec(root)?;
    let json_padding = (4 - json.len() % 4) % 4;
    let bin_padding = (4 - blob.len() % 4) % 4;
    let total_len = 12 + 8 + json.len() + json_padding + 8 + blob.len() + bin_padding;

    let mut out = Vec::with_capacity(total_len);
    out.write_u32::<LittleEndian>(GLB_MAGIC)?;
    out.write_u32::<LittleEndian>(GLB_VERSION)?;
    out.write_u32::<LittleEndian>(total_len as u32)?;

    out.write_u32::<LittleEndian>((json.len() + json_padding) as u32)?;
    out.write_u32::<LittleEndian>(CHUNK_JSON)?;
    out.extend_from_slice(&json);
    out.extend(std::iter::repeat_n(b' ', json_padding));

    out.write_u32::<LittleEndian>((blob.len() + bin_padding) as u32)?;
    out.write_u32::<LittleEndian>(CHUNK_BIN)?;
    out.extend_from_slice(blob);
    out.extend(std::iter::repeat_n(0u8, bin_padding));

    Ok(out)
}

/// Encode and write a container file.
///
/// Bytes are fully assembled first, written to a sibling temp file and
/// renamed into place, so an I/O failure never leaves a partial file at the
/// destination.
pub fn write_glb<P: AsRef<Path>>(
    mesh: &MeshBuffers,
    lines: Option<&LineBuffers>,
    path: P,
) -> Result<(), EncodeError> {
    let bytes = encode_glb(mesh, lines)?;
    let path = path.as_ref();
    let tmp = path.with_extension("glb.tmp");

    let written = fs::write(&tmp, &bytes).and_then(|()| fs::rename(&tmp, path));
    if let Err(e) = written {
        let _ = fs::remove_file(&tmp);
        return Err(EncodeError::Io(e));
    }
    log::debug!("wrote {} bytes to {}", bytes.len(), path.display());
    Ok(())
}
