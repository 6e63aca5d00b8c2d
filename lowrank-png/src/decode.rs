//! PNG stream to luma matrix

use std::io::Read;
use std::path::Path;

use flate2::read::ZlibDecoder;
use lowrank_svd::Matrix;

use crate::chunk::ChunkReader;
use crate::error::PngError;
use crate::filter::unfilter_scanlines;
use crate::header::{ColorType, ImageHeader};
use crate::PNG_SIGNATURE;

/// A decoded image: its header and one value in [0, 255] per pixel
#[derive(Debug, Clone)]
pub struct Image {
    pub header: ImageHeader,
    /// height × width
    pub pixels: Matrix,
}

impl Image {
    pub fn width(&self) -> usize {
        self.header.width as usize
    }

    pub fn height(&self) -> usize {
        self.header.height as usize
    }
}

/// ITU-R BT.601 luma
fn luma(r: u8, g: u8, b: u8) -> f64 {
    0.299 * r as f64 + 0.587 * g as f64 + 0.114 * b as f64
}

/// Decode a complete PNG held in memory
pub fn decode_png(bytes: &[u8]) -> Result<Image, PngError> {
    if bytes.len() < PNG_SIGNATURE.len() || bytes[..PNG_SIGNATURE.len()] != PNG_SIGNATURE {
        return Err(PngError::BadSignature);
    }

    let mut header: Option<ImageHeader> = None;
    let mut compressed = Vec::new();
    let mut seen_end = false;

    for chunk in ChunkReader::new(&bytes[PNG_SIGNATURE.len()..]) {
        let chunk = chunk?;
        match (&chunk.kind, header.is_some()) {
            (b"IHDR", false) => {
                let parsed = ImageHeader::parse(chunk.data)?;
                parsed.check_supported()?;
                log::info!(
                    "PNG header: {}x{}, bit depth {}, color type {:?}, interlace {}",
                    parsed.width,
                    parsed.height,
                    parsed.bit_depth,
                    parsed.color_type,
                    parsed.interlace_method
                );
                header = Some(parsed);
            }
            (b"IHDR", true) => {
                return Err(PngError::Malformed("duplicate IHDR chunk".to_string()));
            }
            (_, false) => {
                return Err(PngError::Malformed(format!(
                    "first chunk is {}, expected IHDR",
                    chunk.name()
                )));
            }
            (b"IDAT", true) => compressed.extend_from_slice(chunk.data),
            (b"IEND", true) => {
                seen_end = true;
                break;
            }
            // A suggested palette is allowed in truecolor images and not needed here
            (b"PLTE", true) => {}
            _ if !chunk.is_critical() => {
                log::debug!("Skipping ancillary {} chunk ({} bytes)", chunk.name(), chunk.data.len());
            }
            _ => {
                return Err(PngError::Unsupported(format!(
                    "unknown critical chunk {}",
                    chunk.name()
                )));
            }
        }
    }

    let header = header.ok_or_else(|| PngError::Malformed("no IHDR chunk".to_string()))?;
    if !seen_end {
        return Err(PngError::Malformed("missing IEND chunk".to_string()));
    }
    if compressed.is_empty() {
        return Err(PngError::Malformed("no IDAT chunk".to_string()));
    }

    let mut inflated = Vec::new();
    ZlibDecoder::new(&compressed[..])
        .read_to_end(&mut inflated)
        .map_err(|e| PngError::Decompression(e.to_string()))?;

    let (width, height) = (header.width as usize, header.height as usize);
    let bpp = header.bytes_per_pixel();
    let raw = unfilter_scanlines(&inflated, height, header.stride(), bpp)?;

    let pixels = Matrix::from_fn([height, width], |idx| {
        let at = (idx[0] * width + idx[1]) * bpp;
        match header.color_type {
            ColorType::Rgb | ColorType::Rgba => luma(raw[at], raw[at + 1], raw[at + 2]),
            _ => raw[at] as f64,
        }
    });

    Ok(Image { header, pixels })
}

/// Read and decode a PNG file
pub fn read_png<P: AsRef<Path>>(path: P) -> Result<Image, PngError> {
    let bytes = std::fs::read(path)?;
    decode_png(&bytes)
}
