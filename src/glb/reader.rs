//! GLB envelope reading

use std::io::Read;

use crate::error::{Error, Result};
use crate::model::BufferView;

use super::{
    CHUNK_HEADER_LENGTH, CHUNK_TYPE_BIN, CHUNK_TYPE_JSON, GLB_MAGIC, GLB_VERSION, GlbContainer,
    HEADER_LENGTH, StreamReader,
};

fn read_u32(bytes: &[u8], offset: usize) -> Result<u32> {
    bytes
        .get(offset..offset + 4)
        .and_then(|slice| slice.try_into().ok())
        .map(u32::from_le_bytes)
        .ok_or_else(|| Error::Container(format!("unexpected end of data at byte {}", offset)))
}

/// Parse a GLB envelope
///
/// Chunks after the binary chunk, and chunks of unknown type, are skipped.
///
/// # Errors
///
/// [`Error::Container`] for a wrong magic number or version, a declared
/// length that does not match the data, a first chunk that is not JSON, or a
/// chunk running past the end of the file.
pub fn read_glb<R: Read>(mut reader: R) -> Result<GlbContainer> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;

    let magic = read_u32(&bytes, 0)?;
    if magic != GLB_MAGIC {
        return Err(Error::Container(format!("bad magic number {:#010x}", magic)));
    }
    let version = read_u32(&bytes, 4)?;
    if version != GLB_VERSION {
        return Err(Error::Container(format!("unsupported version {}", version)));
    }
    let length = read_u32(&bytes, 8)? as usize;
    if length > bytes.len() {
        return Err(Error::Container(format!(
            "declared length {} exceeds the {} bytes available",
            length,
            bytes.len()
        )));
    }
    let bytes = &bytes[..length];

    let mut container = GlbContainer::default();
    let mut offset = HEADER_LENGTH;
    let mut first = true;
    while offset < bytes.len() {
        let chunk_length = read_u32(bytes, offset)? as usize;
        let chunk_type = read_u32(bytes, offset + 4)?;
        let start = offset + CHUNK_HEADER_LENGTH;
        let data = start
            .checked_add(chunk_length)
            .and_then(|end| bytes.get(start..end))
            .ok_or_else(|| {
                Error::Container(format!("chunk at byte {} runs past the end of the file", offset))
            })?;

        match chunk_type {
            CHUNK_TYPE_JSON if first => {
                let text = std::str::from_utf8(data)
                    .map_err(|e| Error::Container(format!("JSON chunk is not UTF-8: {}", e)))?;
                container.json = text.trim_end_matches([' ', '\0']).to_string();
            }
            _ if first => {
                return Err(Error::Container(format!(
                    "first chunk has type {:#010x}, expected JSON",
                    chunk_type
                )));
            }
            CHUNK_TYPE_BIN if container.bin.is_none() => container.bin = Some(data.to_vec()),
            other => log::trace!("Skipping GLB chunk of type {:#010x}", other),
        }

        first = false;
        offset = start + chunk_length;
    }

    if first {
        return Err(Error::Container("missing JSON chunk".to_string()));
    }
    Ok(container)
}

/// Reads a GLB resource and serves its JSON and binary payloads
#[derive(Debug, Clone)]
pub struct GlbResourceReader {
    container: GlbContainer,
}

impl GlbResourceReader {
    /// Open the resource called `uri` through `streams`
    pub fn open<S: StreamReader>(streams: &S, uri: &str) -> Result<Self> {
        Self::from_reader(streams.input_stream(uri)?)
    }

    /// Read a GLB envelope from any reader
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(Self {
            container: read_glb(reader)?,
        })
    }

    /// JSON document text
    pub fn json(&self) -> &str {
        &self.container.json
    }

    /// Binary chunk, if present
    pub fn bin(&self) -> Option<&[u8]> {
        self.container.bin.as_deref()
    }

    /// Bytes covered by a buffer view of the embedded buffer
    pub fn buffer_view_data(&self, view: &BufferView) -> Result<&[u8]> {
        let bin = self
            .bin()
            .ok_or_else(|| Error::Container("no binary chunk".to_string()))?;
        let out_of_range = || {
            Error::Container(format!(
                "buffer view {} (offset {}, length {}) exceeds the {}-byte binary chunk",
                view.id,
                view.byte_offset,
                view.byte_length,
                bin.len()
            ))
        };
        let start = usize::try_from(view.byte_offset).map_err(|_| out_of_range())?;
        let length = usize::try_from(view.byte_length).map_err(|_| out_of_range())?;
        let end = start.checked_add(length).ok_or_else(out_of_range)?;
        bin.get(start..end).ok_or_else(out_of_range)
    }

    /// Take ownership of both payloads
    pub fn into_container(self) -> GlbContainer {
        self.container
    }
}
