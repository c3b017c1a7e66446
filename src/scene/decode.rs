//! Container decoder: GLB parsing and accessor range slicing
//!
//! Walks mesh 0 / primitive 0 of the metadata, slices each accessor's byte
//! range out of the binary chunk and reinterprets it as typed arrays. A
//! range that does not reshape cleanly fails that buffer alone; the other
//! buffers still decode.

use std::fs;
use std::io::Cursor;
use std::path::Path;

use byteorder::{LittleEndian, ReadBytesExt};

use super::document::{Accessor, Root, CHUNK_BIN, CHUNK_JSON, GLB_MAGIC, GLB_VERSION};
use super::error::DecodeError;

/// Tagged index state of a decoded primitive.
///
/// `Unindexed` means the primitive declared no index accessor at all, which
/// is distinct from an indexed primitive with zero triangles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexData {
    Indexed(Vec<[u32; 3]>),
    Unindexed,
}

/// Arrays recovered from one container.
///
/// Each field is `None` only when that buffer's byte range failed to
/// reshape; the matching `RangeMismatch` is recorded in `issues`. Buffers
/// decode independently, so a corrupt index range still yields positions
/// and colors.
#[derive(Debug)]
pub struct DecodedScene {
    pub positions: Option<Vec<[f32; 3]>>,
    pub colors: Option<Vec<[f32; 4]>>,
    pub triangles: Option<IndexData>,
    pub issues: Vec<DecodeError>,
}

/// Split a GLB byte stream into parsed metadata and the binary chunk.
pub fn parse_container(data: &[u8]) -> Result<(Root, &[u8]), DecodeError> {
    let mut cursor = Cursor::new(data);

    let magic = cursor
        .read_u32::<LittleEndian>()
        .map_err(|_| DecodeError::Truncated("header"))?;
    if magic != GLB_MAGIC {
        return Err(DecodeError::BadMagic(magic));
    }
    let version = cursor
        .read_u32::<LittleEndian>()
        .map_err(|_| DecodeError::Truncated("header"))?;
    if version != GLB_VERSION {
        return Err(DecodeError::UnsupportedVersion(version));
    }
    let declared_len = cursor
        .read_u32::<LittleEndian>()
        .map_err(|_| DecodeError::Truncated("header"))? as usize;
    if declared_len > data.len() {
        return Err(DecodeError::Truncated("container body"));
    }

    let mut json_chunk: Option<&[u8]> = None;
    let mut bin_chunk: Option<&[u8]> = None;

    while (cursor.position() as usize) + 8 <= data.len() {
        let chunk_len = cursor
            .read_u32::<LittleEndian>()
            .map_err(|_| DecodeError::Truncated("chunk header"))? as usize;
        let chunk_type = cursor
            .read_u32::<LittleEndian>()
            .map_err(|_| DecodeError::Truncated("chunk header"))?;
        let start = cursor.position() as usize;
        let end = start
            .checked_add(chunk_len)
            .filter(|&end| end <= data.len())
            .ok_or(DecodeError::Truncated("chunk body"))?;

        match chunk_type {
            CHUNK_JSON => json_chunk = Some(&data[start..end]),
            CHUNK_BIN => bin_chunk = Some(&data[start..end]),
            _ => {} // unknown chunk types are skipped per the format
        }
        cursor.set_position(end as u64);
    }

    let json_chunk = json_chunk.ok_or(DecodeError::MissingJsonChunk)?;
    let root: Root = serde_json::from_slice(json_chunk)?;
    let blob = bin_chunk.ok_or(DecodeError::MissingBinaryChunk)?;
    Ok((root, blob))
}

/// Resolve an accessor's byte slice inside the blob.
///
/// The window is `[view.byteOffset + accessor.byteOffset,
/// view.byteOffset + view.byteLength)`, clamped to the blob; a window that
/// claims more bytes than exist simply comes back short and fails the
/// element-count check in the caller.
fn accessor_slice<'a>(
    root: &'a Root,
    blob: &'a [u8],
    accessor_index: usize,
) -> Result<(&'a Accessor, &'a [u8]), DecodeError> {
    let accessor = root
        .accessors
        .get(accessor_index)
        .ok_or(DecodeError::IndexOutOfRange {
            kind: "accessor",
            index: accessor_index,
        })?;
    let view_index = accessor
        .buffer_view
        .ok_or(DecodeError::DetachedAccessor(accessor_index))?;
    let view = root
        .buffer_views
        .get(view_index)
        .ok_or(DecodeError::IndexOutOfRange {
            kind: "bufferView",
            index: view_index,
        })?;

    let end = view.byte_offset.saturating_add(view.byte_length).min(blob.len());
    let start = view.byte_offset.saturating_add(accessor.byte_offset).min(end);
    Ok((accessor, &blob[start..end]))
}

/// Reinterpret an accessor's range as rows of `N` little-endian f32s.
fn read_f32_rows<const N: usize>(
    root: &Root,
    blob: &[u8],
    accessor_index: usize,
    buffer: &'static str,
) -> Result<Vec<[f32; N]>, DecodeError> {
    let (accessor, slice) = accessor_slice(root, blob, accessor_index)?;
    let elem = N * 4;
    let need = accessor.count.checked_mul(elem);
    if slice.len() % elem != 0 || need.map_or(true, |need| need > slice.len()) {
        return Err(DecodeError::RangeMismatch {
            buffer,
            len: slice.len(),
            count: accessor.count,
            elem,
        });
    }

    let mut rows = Vec::with_capacity(accessor.count);
    for chunk in slice[..accessor.count * elem].chunks_exact(elem) {
        let mut row = [0.0f32; N];
        for (component, bytes) in row.iter_mut().zip(chunk.chunks_exact(4)) {
            *component = f32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
        }
        rows.push(row);
    }
    Ok(rows)
}

/// Reinterpret an index accessor's range as u32 triples.
///
/// The scalar count must land on a triangle boundary and the range must be
/// a whole number of 12-byte triples; anything else is a localized
/// `RangeMismatch` for the index buffer.
fn read_u32_triples(
    root: &Root,
    blob: &[u8],
    accessor_index: usize,
) -> Result<Vec<[u32; 3]>, DecodeError> {
    let (accessor, slice) = accessor_slice(root, blob, accessor_index)?;
    let need = accessor.count.checked_mul(4);
    if slice.len() % 12 != 0
        || accessor.count % 3 != 0
        || need.map_or(true, |need| need > slice.len())
    {
        return Err(DecodeError::RangeMismatch {
            buffer: "indices",
            len: slice.len(),
            count: accessor.count,
            elem: 12,
        });
    }

    let mut triples = Vec::with_capacity(accessor.count / 3);
    for chunk in slice[..accessor.count * 4].chunks_exact(12) {
        triples.push([
            u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]),
            u32::from_le_bytes([chunk[4], chunk[5], chunk[6], chunk[7]]),
            u32::from_le_bytes([chunk[8], chunk[9], chunk[10], chunk[11]]),
        ]);
    }
    Ok(triples)
}

/// Decode mesh 0 / primitive 0 of a parsed container.
fn decode_primitive(root: &Root, blob: &[u8]) -> Result<DecodedScene, DecodeError> {
    let mesh = root.meshes.first().ok_or(DecodeError::IndexOutOfRange {
        kind: "mesh",
        index: 0,
    })?;
    let primitive = mesh
        .primitives
        .first()
        .ok_or(DecodeError::IndexOutOfRange {
            kind: "primitive",
            index: 0,
        })?;

    let mut scene = DecodedScene {
        positions: None,
        colors: None,
        triangles: None,
        issues: Vec::new(),
    };

    let position_accessor = *primitive
        .attributes
        .get("POSITION")
        .ok_or(DecodeError::MissingAttribute("POSITION"))?;
    match read_f32_rows::<3>(root, blob, position_accessor, "positions") {
        Ok(rows) => scene.positions = Some(rows),
        Err(e @ DecodeError::RangeMismatch { .. }) => scene.issues.push(e),
        Err(e) => return Err(e),
    }

    let color_accessor = *primitive
        .attributes
        .get("COLOR_0")
        .ok_or(DecodeError::MissingAttribute("COLOR_0"))?;
    match read_f32_rows::<4>(root, blob, color_accessor, "colors") {
        Ok(rows) => scene.colors = Some(rows),
        Err(e @ DecodeError::RangeMismatch { .. }) => scene.issues.push(e),
        Err(e) => return Err(e),
    }

    match primitive.indices {
        None => scene.triangles = Some(IndexData::Unindexed),
        Some(index_accessor) => match read_u32_triples(root, blob, index_accessor) {
            Ok(triples) => scene.triangles = Some(IndexData::Indexed(triples)),
            Err(e @ DecodeError::RangeMismatch { .. }) => scene.issues.push(e),
            Err(e) => return Err(e),
        },
    }

    Ok(scene)
}

/// Decode a container from bytes.
pub fn decode_glb_bytes(data: &[u8]) -> Result<DecodedScene, DecodeError> {
    let (root, blob) = parse_container(data)?;
    decode_primitive(&root, blob)
}

/// Read and decode a container file.
pub fn decode_glb<P: AsRef<Path>>(path: P) -> Result<DecodedScene, DecodeError> {
    let data = fs::read(path)?;
    decode_glb_bytes(&data)
}
