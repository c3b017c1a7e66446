//! Typed failures for the scene-container codec

use std::io;
use thiserror::Error;

/// Errors that can occur while building or writing a container
#[derive(Error, Debug)]
pub enum EncodeError {
    /// Nothing to draw; encoding aborts before any output is produced.
    #[error("vertex array is empty")]
    EmptyVertexBuffer,

    #[error("metadata serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Errors that can occur while parsing a container
///
/// `RangeMismatch` is localized to one buffer and never aborts the decode of
/// the others; every other variant is a container-level failure.
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("not a GLB container (magic {0:#010x})")]
    BadMagic(u32),

    #[error("unsupported container version {0}")]
    UnsupportedVersion(u32),

    #[error("container truncated in {0}")]
    Truncated(&'static str),

    #[error("container has no JSON chunk")]
    MissingJsonChunk,

    #[error("container has no binary chunk")]
    MissingBinaryChunk,

    #[error("metadata parse failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{kind} index {index} out of range")]
    IndexOutOfRange { kind: &'static str, index: usize },

    #[error("accessor {0} references no bufferView")]
    DetachedAccessor(usize),

    #[error("primitive declares no {0} attribute")]
    MissingAttribute(&'static str),

    /// The byte range implied by accessor + bufferView does not reshape
    /// cleanly into the expected elements.
    #[error("{buffer} byte range of {len} bytes does not reshape cleanly (accessor count {count}, element size {elem})")]
    RangeMismatch {
        buffer: &'static str,
        len: usize,
        count: usize,
        elem: usize,
    },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
