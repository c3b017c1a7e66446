//! Binary scene-container (GLB) codec
//!
//! Packs mesh buffers into a single glTF 2.0 binary container and decodes
//! such containers back into typed arrays. One buffer per file; accessors,
//! bufferViews and buffers cross-reference each other by integer index into
//! arena vectors, never by pointer.
//!
//! # Submodules
//! - `document` - Container metadata records and format constants
//! - `pack` - Concatenation of typed arrays into the binary blob
//! - `encode` - Metadata bookkeeping and GLB framing/writing
//! - `decode` - GLB parsing and accessor range slicing
//! - `error` - Typed encode/decode failures

pub mod document;

mod pack;
mod encode;
mod decode;
mod error;

pub use pack::{BufferPacker, ByteRange};

pub use encode::{
    encode_glb,
    frame_glb,
    write_glb,
};

pub use decode::{
    decode_glb,
    decode_glb_bytes,
    parse_container,
    DecodedScene,
    IndexData,
};

pub use error::{DecodeError, EncodeError};
