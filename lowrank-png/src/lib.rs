//! # lowrank-png: 8-bit PNG images as dense matrices
//!
//! Decoding accepts non-interlaced 8-bit grayscale, grayscale+alpha, RGB and
//! RGBA images and produces one luma value per pixel. Encoding always writes
//! an 8-bit grayscale image.
//!
//! ```no_run
//! use lowrank_png::{read_png, write_png};
//!
//! let image = read_png("input.png")?;
//! write_png("copy.png", &image.pixels, &image.header)?;
//! # Ok::<(), lowrank_png::PngError>(())
//! ```

pub mod chunk;
pub mod crc;
pub mod decode;
pub mod encode;
pub mod error;
pub mod filter;
pub mod header;

pub use decode::{Image, decode_png, read_png};
pub use encode::{encode_png, quantize, write_png};
pub use error::PngError;
pub use header::{ColorType, ImageHeader};

pub use lowrank_svd::Matrix;

/// Every PNG stream starts with these eight bytes
pub const PNG_SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];
