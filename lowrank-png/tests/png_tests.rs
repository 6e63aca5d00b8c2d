//! Decoder and encoder tests over hand-assembled PNG streams

use flate2::write::ZlibEncoder;
use flate2::Compression;
use lowrank_png::chunk::write_chunk;
use lowrank_png::filter::paeth;
use lowrank_png::{
    ColorType, ImageHeader, Matrix, PNG_SIGNATURE, PngError, decode_png, encode_png, read_png,
    write_png,
};
use std::io::Write;

fn zlib(data: &[u8]) -> Vec<u8> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap()
}

/// Apply filter `kind` to one scanline (the encoder direction)
fn filter_row(kind: u8, row: &[u8], prev: &[u8], bpp: usize) -> Vec<u8> {
    let mut out = vec![kind];
    for i in 0..row.len() {
        let a = if i >= bpp { row[i - bpp] } else { 0 };
        let b = prev[i];
        let c = if i >= bpp { prev[i - bpp] } else { 0 };
        let pred = match kind {
            0 => 0,
            1 => a,
            2 => b,
            3 => ((a as u16 + b as u16) / 2) as u8,
            4 => paeth(a, b, c),
            _ => unreachable!(),
        };
        out.push(row[i].wrapping_sub(pred));
    }
    out
}

struct PngBuilder {
    bytes: Vec<u8>,
}

impl PngBuilder {
    fn new(header: &ImageHeader) -> Self {
        let mut bytes = PNG_SIGNATURE.to_vec();
        write_chunk(&mut bytes, b"IHDR", &header.to_bytes()).unwrap();
        Self { bytes }
    }

    fn chunk(mut self, kind: &[u8; 4], data: &[u8]) -> Self {
        write_chunk(&mut self.bytes, kind, data).unwrap();
        self
    }

    fn finish(self) -> Vec<u8> {
        self.chunk(b"IEND", &[]).bytes
    }
}

fn rows_4x5() -> Vec<Vec<u8>> {
    (0..5)
        .map(|y| (0..4).map(|x| ((y * 53 + x * 31 + x * y * 7) % 256) as u8).collect())
        .collect()
}

#[test]
fn test_every_filter_type() {
    let rows = rows_4x5();
    let mut stream = Vec::new();
    let zero = vec![0u8; 4];
    for (y, row) in rows.iter().enumerate() {
        let prev = if y == 0 { &zero } else { &rows[y - 1] };
        stream.extend(filter_row(y as u8, row, prev, 1));
    }

    let header = ImageHeader::grayscale(4, 5);
    let bytes = PngBuilder::new(&header).chunk(b"IDAT", &zlib(&stream)).finish();
    let image = decode_png(&bytes).unwrap();

    assert_eq!(*image.pixels.shape(), (5, 4));
    for (y, row) in rows.iter().enumerate() {
        for (x, &value) in row.iter().enumerate() {
            assert_eq!(image.pixels[[y, x]], value as f64, "pixel ({}, {})", y, x);
        }
    }
}

#[test]
fn test_rgba_paeth_rows() {
    // 2x2 RGBA, both rows Paeth-filtered with 4-byte pixels
    let rows: Vec<Vec<u8>> = vec![
        vec![255, 0, 0, 255, 0, 255, 0, 128],
        vec![0, 0, 255, 0, 100, 100, 100, 255],
    ];
    let zero = vec![0u8; 8];
    let mut stream = filter_row(4, &rows[0], &zero, 4);
    stream.extend(filter_row(4, &rows[1], &rows[0], 4));

    let header = ImageHeader {
        color_type: ColorType::Rgba,
        ..ImageHeader::grayscale(2, 2)
    };
    let bytes = PngBuilder::new(&header).chunk(b"IDAT", &zlib(&stream)).finish();
    let image = decode_png(&bytes).unwrap();

    let expected = [
        [0.299 * 255.0, 0.587 * 255.0],
        [0.114 * 255.0, 0.299 * 100.0 + 0.587 * 100.0 + 0.114 * 100.0],
    ];
    for y in 0..2 {
        for x in 0..2 {
            assert!((image.pixels[[y, x]] - expected[y][x]).abs() < 1e-9);
        }
    }
}

#[test]
fn test_split_idat_and_ancillary_chunks() {
    let rows = rows_4x5();
    let stream: Vec<u8> = rows.iter().flat_map(|r| filter_row(0, r, r, 1)).collect();
    let compressed = zlib(&stream);
    let (first, second) = compressed.split_at(compressed.len() / 2);

    let header = ImageHeader::grayscale(4, 5);
    let bytes = PngBuilder::new(&header)
        .chunk(b"pHYs", &[0, 0, 11, 19, 0, 0, 11, 19, 1])
        .chunk(b"IDAT", first)
        .chunk(b"tEXt", b"Comment\0split stream")
        .chunk(b"IDAT", second)
        .finish();
    let image = decode_png(&bytes).unwrap();
    assert_eq!(image.pixels[[4, 3]], rows[4][3] as f64);
}

#[test]
fn test_unknown_critical_chunk() {
    let header = ImageHeader::grayscale(1, 1);
    let bytes = PngBuilder::new(&header)
        .chunk(b"XYZW", &[1, 2])
        .chunk(b"IDAT", &zlib(&[0, 1]))
        .finish();
    assert!(matches!(decode_png(&bytes), Err(PngError::Unsupported(_))));
}

#[test]
fn test_checksum_mismatch() {
    let header = ImageHeader::grayscale(1, 1);
    let mut bytes = PngBuilder::new(&header)
        .chunk(b"IDAT", &zlib(&[0, 1]))
        .finish();
    // Flip the last byte of the IHDR CRC
    bytes[8 + 8 + 13 + 3] ^= 0x01;
    match decode_png(&bytes) {
        Err(PngError::ChecksumMismatch { chunk, stored, computed }) => {
            assert_eq!(chunk, "IHDR");
            assert_ne!(stored, computed);
        }
        other => panic!("expected checksum mismatch, got {:?}", other.map(|i| i.header)),
    }
}

#[test]
fn test_ihdr_must_come_first() {
    let mut bytes = PNG_SIGNATURE.to_vec();
    write_chunk(&mut bytes, b"tEXt", b"a\0b").unwrap();
    write_chunk(&mut bytes, b"IHDR", &ImageHeader::grayscale(1, 1).to_bytes()).unwrap();
    write_chunk(&mut bytes, b"IEND", &[]).unwrap();
    assert!(matches!(decode_png(&bytes), Err(PngError::Malformed(_))));
}

#[test]
fn test_palette_and_deep_images_rejected() {
    let palette = ImageHeader {
        color_type: ColorType::Indexed,
        ..ImageHeader::grayscale(1, 1)
    };
    let bytes = PngBuilder::new(&palette)
        .chunk(b"PLTE", &[0, 0, 0])
        .chunk(b"IDAT", &zlib(&[0, 0]))
        .finish();
    assert!(matches!(decode_png(&bytes), Err(PngError::Unsupported(_))));

    let deep = ImageHeader {
        bit_depth: 16,
        ..ImageHeader::grayscale(1, 1)
    };
    let bytes = PngBuilder::new(&deep)
        .chunk(b"IDAT", &zlib(&[0, 0, 0]))
        .finish();
    assert!(matches!(decode_png(&bytes), Err(PngError::Unsupported(_))));
}

#[test]
fn test_truncated_image_data() {
    let header = ImageHeader::grayscale(4, 5);
    let bytes = PngBuilder::new(&header)
        .chunk(b"IDAT", &zlib(&[0, 1, 2, 3, 4]))
        .finish();
    assert!(matches!(decode_png(&bytes), Err(PngError::Malformed(_))));
}

#[test]
fn test_encoder_clamps_and_rounds() {
    let values = [-20.0, 0.4, 0.5, 99.5, 254.5, 300.0];
    let image = Matrix::from_fn([2, 3], |idx| values[idx[0] * 3 + idx[1]]);
    let mut buf = Vec::new();
    encode_png(&mut buf, &image, &ImageHeader::grayscale(3, 2)).unwrap();

    let decoded = decode_png(&buf).unwrap();
    let expected = [0.0, 0.0, 1.0, 100.0, 255.0, 255.0];
    for i in 0..2 {
        for j in 0..3 {
            assert_eq!(decoded.pixels[[i, j]], expected[i * 3 + j]);
        }
    }
}

#[test]
fn test_encoder_rewrites_color_header_as_grayscale() {
    let rgb = ImageHeader {
        color_type: ColorType::Rgb,
        ..ImageHeader::grayscale(2, 2)
    };
    let image = Matrix::from_elem([2, 2], 42.0);
    let mut buf = Vec::new();
    encode_png(&mut buf, &image, &rgb).unwrap();

    let decoded = decode_png(&buf).unwrap();
    assert_eq!(decoded.header.color_type, ColorType::Grayscale);
    assert_eq!(decoded.header.bit_depth, 8);
}

#[test]
fn test_file_round_trip() {
    let path = std::env::temp_dir().join(format!("lowrank-png-{}.png", std::process::id()));
    let image = Matrix::from_fn([6, 9], |idx| (idx[0] * 9 + idx[1]) as f64 * 4.0);
    let header = ImageHeader::grayscale(9, 6);

    write_png(&path, &image, &header).unwrap();
    let decoded = read_png(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(decoded.width(), 9);
    assert_eq!(decoded.height(), 6);
    assert_eq!(decoded.pixels[[5, 8]], 53.0 * 4.0);
}

#[test]
fn test_missing_file() {
    let err = read_png("/nonexistent/lowrank/input.png").unwrap_err();
    assert!(matches!(err, PngError::Io(_)));
}
