//! Chunk framing: 4-byte big-endian length, 4-byte type, data, 4-byte CRC

use std::io::Write;

use crate::crc::chunk_crc;
use crate::error::PngError;

/// One chunk borrowed from an in-memory stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chunk<'a> {
    pub kind: [u8; 4],
    pub data: &'a [u8],
}

impl<'a> Chunk<'a> {
    /// Critical chunks have an uppercase first letter; decoders must understand them
    pub fn is_critical(&self) -> bool {
        self.kind[0].is_ascii_uppercase()
    }

    /// Type code as text, for diagnostics
    pub fn name(&self) -> String {
        String::from_utf8_lossy(&self.kind).into_owned()
    }
}

fn read_u32_be(bytes: &[u8]) -> u32 {
    u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}

/// Iterator over the chunks following the signature.
///
/// Each chunk's CRC is verified before it is yielded. The iterator stops
/// after the first error.
pub struct ChunkReader<'a> {
    bytes: &'a [u8],
    pos: usize,
    failed: bool,
}

impl<'a> ChunkReader<'a> {
    /// `bytes` starts at the first chunk (signature already consumed)
    pub fn new(bytes: &'a [u8]) -> Self {
        Self {
            bytes,
            pos: 0,
            failed: false,
        }
    }

    fn read_chunk(&mut self) -> Result<Chunk<'a>, PngError> {
        let rest = &self.bytes[self.pos..];
        if rest.len() < 8 {
            return Err(PngError::Malformed(format!(
                "truncated chunk header at offset {}",
                self.pos
            )));
        }
        let length = read_u32_be(&rest[0..4]) as usize;
        let kind = [rest[4], rest[5], rest[6], rest[7]];
        let end = length
            .checked_add(12)
            .filter(|&end| end <= rest.len())
            .ok_or_else(|| {
                PngError::Malformed(format!(
                    "{} chunk declares {} bytes but the stream ends early",
                    String::from_utf8_lossy(&kind),
                    length
                ))
            })?;

        let chunk = Chunk {
            kind,
            data: &rest[8..8 + length],
        };
        let stored = read_u32_be(&rest[8 + length..end]);
        let computed = chunk_crc(&chunk.kind, chunk.data);
        if stored != computed {
            return Err(PngError::ChecksumMismatch {
                chunk: chunk.name(),
                stored,
                computed,
            });
        }

        self.pos += end;
        Ok(chunk)
    }
}

impl<'a> Iterator for ChunkReader<'a> {
    type Item = Result<Chunk<'a>, PngError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.pos >= self.bytes.len() {
            return None;
        }
        let result = self.read_chunk();
        if result.is_err() {
            self.failed = true;
        }
        Some(result)
    }
}

/// Frame `data` as a chunk of type `kind` and write it
pub fn write_chunk<W: Write>(writer: &mut W, kind: &[u8; 4], data: &[u8]) -> Result<(), PngError> {
    let length = u32::try_from(data.len()).map_err(|_| {
        PngError::Malformed(format!(
            "{} chunk of {} bytes exceeds the 2^32 length field",
            String::from_utf8_lossy(kind),
            data.len()
        ))
    })?;
    writer.write_all(&length.to_be_bytes())?;
    writer.write_all(kind)?;
    writer.write_all(data)?;
    writer.write_all(&chunk_crc(kind, data).to_be_bytes())?;
    Ok(())
}
