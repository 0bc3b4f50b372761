//! GLB binary container
//!
//! A GLB file packs the JSON document and an optional binary buffer into a
//! single little-endian envelope:
//!
//! ```text
//! header:  magic "glTF" | version 2 | total length      (3 x u32)
//! chunk 0: length | "JSON" | UTF-8 text, space padded
//! chunk 1: length | "BIN\0" | payload, zero padded      (optional)
//! ```
//!
//! Every chunk starts and ends on a 4-byte boundary. The binary chunk is the
//! data of the buffer that has no `uri`.
//!
//! Resources are addressed by name through the [`StreamReader`] and
//! [`StreamWriter`] traits so the container code never touches the
//! filesystem directly; [`FileStreams`] maps names to files under a root
//! directory.

mod reader;
mod stream;
mod writer;

pub use reader::{GlbResourceReader, read_glb};
pub use stream::{FileStreams, StreamReader, StreamWriter};
pub use writer::{GlbResourceWriter, write_glb};

/// `glTF` in little-endian byte order
pub const GLB_MAGIC: u32 = 0x4654_6C67;

/// Container version written and accepted
pub const GLB_VERSION: u32 = 2;

/// Chunk type of the JSON chunk (`JSON`)
pub const CHUNK_TYPE_JSON: u32 = 0x4E4F_534A;

/// Chunk type of the binary chunk (`BIN\0`)
pub const CHUNK_TYPE_BIN: u32 = 0x004E_4942;

pub(crate) const HEADER_LENGTH: usize = 12;
pub(crate) const CHUNK_HEADER_LENGTH: usize = 8;

/// The two payloads of a GLB file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlbContainer {
    /// JSON document text, without padding
    pub json: String,
    /// Binary chunk, including any trailing padding
    pub bin: Option<Vec<u8>>,
}

/// Round `length` up to the next multiple of four
pub(crate) fn align4(length: usize) -> usize {
    length.div_ceil(4) * 4
}
