//! GLB envelope writing

use std::io::Write;

use crate::error::{Error, Result};

use super::{
    CHUNK_HEADER_LENGTH, CHUNK_TYPE_BIN, CHUNK_TYPE_JSON, GLB_MAGIC, GLB_VERSION, HEADER_LENGTH,
    StreamWriter, align4,
};

fn write_chunk<W: Write>(writer: &mut W, chunk_type: u32, data: &[u8], pad: u8) -> Result<()> {
    let padded = align4(data.len());
    writer.write_all(&(padded as u32).to_le_bytes())?;
    writer.write_all(&chunk_type.to_le_bytes())?;
    writer.write_all(data)?;
    writer.write_all(&vec![pad; padded - data.len()])?;
    Ok(())
}

/// Write a GLB envelope holding `json` and an optional binary chunk
///
/// Returns the writer so callers can keep using it.
///
/// # Errors
///
/// [`Error::Container`] if the envelope would exceed the 4 GiB limit of the
/// format, [`Error::Io`] on write failure.
pub fn write_glb<W: Write>(mut writer: W, json: &str, bin: Option<&[u8]>) -> Result<W> {
    let mut total = HEADER_LENGTH + CHUNK_HEADER_LENGTH + align4(json.len());
    if let Some(bin) = bin {
        total += CHUNK_HEADER_LENGTH + align4(bin.len());
    }
    let total = u32::try_from(total)
        .map_err(|_| Error::Container(format!("{} bytes exceed the GLB size limit", total)))?;

    writer.write_all(&GLB_MAGIC.to_le_bytes())?;
    writer.write_all(&GLB_VERSION.to_le_bytes())?;
    writer.write_all(&total.to_le_bytes())?;

    write_chunk(&mut writer, CHUNK_TYPE_JSON, json.as_bytes(), b' ')?;
    if let Some(bin) = bin {
        write_chunk(&mut writer, CHUNK_TYPE_BIN, bin, 0)?;
    }
    writer.flush()?;

    log::debug!(
        "Wrote GLB container: {} bytes ({} JSON, {} binary)",
        total,
        json.len(),
        bin.map_or(0, <[u8]>::len)
    );
    Ok(writer)
}

/// Collects binary payload for the embedded buffer and writes the GLB file
///
/// # Example
///
/// ```no_run
/// use libgltf::glb::{FileStreams, GlbResourceWriter};
///
/// let mut writer = GlbResourceWriter::new(FileStreams::new("out"));
/// let positions = writer.write_bytes(&[0u8; 36]);
/// let indices = writer.write_bytes(&[0u8; 6]);
/// assert_eq!((positions, indices), (0, 36));
/// writer.flush(r#"{"asset":{"version":"2.0"}}"#, "scene.glb")?;
/// # Ok::<(), libgltf::Error>(())
/// ```
#[derive(Debug)]
pub struct GlbResourceWriter<S: StreamWriter> {
    streams: S,
    bin: Vec<u8>,
}

impl<S: StreamWriter> GlbResourceWriter<S> {
    /// Create a writer with an empty binary payload
    pub fn new(streams: S) -> Self {
        Self {
            streams,
            bin: Vec::new(),
        }
    }

    /// Append `data` at the next 4-byte boundary and return its offset
    pub fn write_bytes(&mut self, data: &[u8]) -> u64 {
        let offset = align4(self.bin.len());
        self.bin.resize(offset, 0);
        self.bin.extend_from_slice(data);
        offset as u64
    }

    /// Length of the binary payload written so far
    pub fn byte_length(&self) -> u64 {
        self.bin.len() as u64
    }

    /// Binary payload written so far
    pub fn bin(&self) -> &[u8] {
        &self.bin
    }

    /// Write the GLB envelope to the resource called `uri`
    ///
    /// The binary chunk is omitted when nothing was written.
    pub fn flush(&self, json: &str, uri: &str) -> Result<()> {
        let stream = self.streams.output_stream(uri)?;
        let bin = (!self.bin.is_empty()).then_some(self.bin.as_slice());
        write_glb(stream, json, bin)?;
        Ok(())
    }

    /// The stream resolver this writer was built with
    pub fn streams(&self) -> &S {
        &self.streams
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_layout() {
        let bytes = write_glb(Vec::new(), "{}", Some(&[1, 2, 3])).unwrap();
        assert_eq!(bytes.len(), 12 + 8 + 4 + 8 + 4);
        assert_eq!(&bytes[0..4], b"glTF");
        assert_eq!(u32::from_le_bytes(bytes[8..12].try_into().unwrap()), 36);
        assert_eq!(&bytes[12..16], &4u32.to_le_bytes());
        assert_eq!(&bytes[16..20], b"JSON");
        assert_eq!(&bytes[20..24], b"{}  ");
        assert_eq!(&bytes[28..32], b"BIN\0");
        assert_eq!(&bytes[32..36], &[1, 2, 3, 0]);
    }

    #[test]
    fn test_json_only_envelope() {
        let bytes = write_glb(Vec::new(), "{\"a\":1}", None).unwrap();
        assert_eq!(bytes.len(), 12 + 8 + 8);
    }
}
