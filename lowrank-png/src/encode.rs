//! Matrix to 8-bit grayscale PNG stream

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use flate2::write::ZlibEncoder;
use flate2::Compression;
use lowrank_svd::Matrix;

use crate::chunk::write_chunk;
use crate::error::PngError;
use crate::header::ImageHeader;
use crate::PNG_SIGNATURE;

/// Clamp to [0, 255] and round half up
pub fn quantize(value: f64) -> u8 {
    // NaN saturates to 0 in the cast
    (value.clamp(0.0, 255.0) + 0.5) as u8
}

/// Encode `image` as an 8-bit grayscale PNG.
///
/// Only the extents of `header` are used and they must match the matrix
/// (height × width); the output header is always 8-bit grayscale with every
/// method set to 0, whatever the source image was.
pub fn encode_png<W: Write>(
    mut writer: W,
    image: &Matrix,
    header: &ImageHeader,
) -> Result<(), PngError> {
    let (rows, cols) = *image.shape();
    if header.height as usize != rows || header.width as usize != cols {
        return Err(PngError::Malformed(format!(
            "header declares {}x{} pixels but the matrix is {}x{}",
            header.width, header.height, cols, rows
        )));
    }
    if rows == 0 || cols == 0 {
        return Err(PngError::Malformed(format!(
            "cannot encode an empty {}x{} image",
            cols, rows
        )));
    }

    let out_header = ImageHeader::grayscale(header.width, header.height);

    let mut scanlines = Vec::with_capacity(rows * (cols + 1));
    for i in 0..rows {
        scanlines.push(0); // filter type None
        for j in 0..cols {
            scanlines.push(quantize(image[[i, j]]));
        }
    }
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::best());
    encoder.write_all(&scanlines)?;
    let compressed = encoder.finish()?;

    writer.write_all(&PNG_SIGNATURE)?;
    write_chunk(&mut writer, b"IHDR", &out_header.to_bytes())?;
    write_chunk(&mut writer, b"IDAT", &compressed)?;
    write_chunk(&mut writer, b"IEND", &[])?;

    log::debug!(
        "Encoded {}x{} grayscale PNG ({} compressed bytes)",
        cols,
        rows,
        compressed.len()
    );
    Ok(())
}

/// Encode `image` and write it to `path`, replacing any existing file
pub fn write_png<P: AsRef<Path>>(
    path: P,
    image: &Matrix,
    header: &ImageHeader,
) -> Result<(), PngError> {
    let mut writer = BufWriter::new(File::create(path)?);
    encode_png(&mut writer, image, header)?;
    writer.flush()?;
    Ok(())
}
