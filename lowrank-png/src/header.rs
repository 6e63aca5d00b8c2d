//! IHDR contents

use crate::error::PngError;

/// Pixel layout declared in IHDR
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ColorType {
    Grayscale = 0,
    Rgb = 2,
    Indexed = 3,
    GrayscaleAlpha = 4,
    Rgba = 6,
}

impl ColorType {
    /// Samples per pixel
    pub fn channels(self) -> usize {
        match self {
            ColorType::Grayscale | ColorType::Indexed => 1,
            ColorType::GrayscaleAlpha => 2,
            ColorType::Rgb => 3,
            ColorType::Rgba => 4,
        }
    }
}

impl TryFrom<u8> for ColorType {
    type Error = PngError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(ColorType::Grayscale),
            2 => Ok(ColorType::Rgb),
            3 => Ok(ColorType::Indexed),
            4 => Ok(ColorType::GrayscaleAlpha),
            6 => Ok(ColorType::Rgba),
            other => Err(PngError::Malformed(format!("invalid color type {}", other))),
        }
    }
}

/// The seven IHDR fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageHeader {
    pub width: u32,
    pub height: u32,
    pub bit_depth: u8,
    pub color_type: ColorType,
    pub compression_method: u8,
    pub filter_method: u8,
    pub interlace_method: u8,
}

impl ImageHeader {
    /// Length of the IHDR payload
    pub const LEN: usize = 13;

    /// Largest width or height the format allows, 2^31 − 1
    pub const MAX_EXTENT: u32 = i32::MAX as u32;

    /// Header for an 8-bit grayscale image
    pub fn grayscale(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            bit_depth: 8,
            color_type: ColorType::Grayscale,
            compression_method: 0,
            filter_method: 0,
            interlace_method: 0,
        }
    }

    /// Parse and sanity-check an IHDR payload.
    ///
    /// Violations of the format itself are [`PngError::Malformed`]; valid
    /// layouts this crate does not decode are left to [`Self::check_supported`].
    pub fn parse(data: &[u8]) -> Result<Self, PngError> {
        if data.len() != Self::LEN {
            return Err(PngError::Malformed(format!(
                "IHDR is {} bytes, expected {}",
                data.len(),
                Self::LEN
            )));
        }
        let header = Self {
            width: u32::from_be_bytes([data[0], data[1], data[2], data[3]]),
            height: u32::from_be_bytes([data[4], data[5], data[6], data[7]]),
            bit_depth: data[8],
            color_type: ColorType::try_from(data[9])?,
            compression_method: data[10],
            filter_method: data[11],
            interlace_method: data[12],
        };

        if header.width == 0 || header.height == 0 {
            return Err(PngError::Malformed(format!(
                "zero image extent {}x{}",
                header.width, header.height
            )));
        }
        if header.width > Self::MAX_EXTENT || header.height > Self::MAX_EXTENT {
            return Err(PngError::Malformed(format!(
                "image extent {}x{} exceeds 2^31 - 1",
                header.width, header.height
            )));
        }
        if header.compression_method != 0 {
            return Err(PngError::Malformed(format!(
                "unknown compression method {}",
                header.compression_method
            )));
        }
        if header.filter_method != 0 {
            return Err(PngError::Malformed(format!(
                "unknown filter method {}",
                header.filter_method
            )));
        }
        if header.interlace_method > 1 {
            return Err(PngError::Malformed(format!(
                "unknown interlace method {}",
                header.interlace_method
            )));
        }
        Ok(header)
    }

    /// Reject layouts the decoder does not handle: anything but 8-bit,
    /// interlaced images, and palette images
    pub fn check_supported(&self) -> Result<(), PngError> {
        if self.bit_depth != 8 {
            return Err(PngError::Unsupported(format!(
                "bit depth {} (only 8 is decoded)",
                self.bit_depth
            )));
        }
        if self.interlace_method != 0 {
            return Err(PngError::Unsupported("Adam7 interlacing".to_string()));
        }
        if self.color_type == ColorType::Indexed {
            return Err(PngError::Unsupported("palette images".to_string()));
        }
        Ok(())
    }

    /// Serialize as an IHDR payload
    pub fn to_bytes(&self) -> [u8; 13] {
        let mut out = [0u8; 13];
        out[0..4].copy_from_slice(&self.width.to_be_bytes());
        out[4..8].copy_from_slice(&self.height.to_be_bytes());
        out[8] = self.bit_depth;
        out[9] = self.color_type as u8;
        out[10] = self.compression_method;
        out[11] = self.filter_method;
        out[12] = self.interlace_method;
        out
    }

    /// Bytes per scanline excluding the filter-type byte
    pub fn stride(&self) -> usize {
        (self.width as usize).saturating_mul(self.bytes_per_pixel())
    }

    /// Bytes per complete pixel (8-bit samples)
    pub fn bytes_per_pixel(&self) -> usize {
        self.color_type.channels()
    }
}
