//! Reversal of the five PNG scanline filters

use crate::error::PngError;

/// Per-scanline filter selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum FilterType {
    None = 0,
    Sub = 1,
    Up = 2,
    Average = 3,
    Paeth = 4,
}

impl TryFrom<u8> for FilterType {
    type Error = PngError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(FilterType::None),
            1 => Ok(FilterType::Sub),
            2 => Ok(FilterType::Up),
            3 => Ok(FilterType::Average),
            4 => Ok(FilterType::Paeth),
            other => Err(PngError::Malformed(format!("invalid filter type {}", other))),
        }
    }
}

/// Paeth predictor: whichever of left, up, upper-left is closest to left + up − upper-left
pub fn paeth(a: u8, b: u8, c: u8) -> u8 {
    let p = a as i16 + b as i16 - c as i16;
    let pa = (p - a as i16).abs();
    let pb = (p - b as i16).abs();
    let pc = (p - c as i16).abs();
    if pa <= pb && pa <= pc {
        a
    } else if pb <= pc {
        b
    } else {
        c
    }
}

/// Undo one filtered scanline in place, given the already reconstructed row above
fn unfilter_row(kind: FilterType, row: &mut [u8], prev: &[u8], bpp: usize) {
    match kind {
        FilterType::None => {}
        FilterType::Sub => {
            for i in bpp..row.len() {
                row[i] = row[i].wrapping_add(row[i - bpp]);
            }
        }
        FilterType::Up => {
            for (x, &up) in row.iter_mut().zip(prev) {
                *x = x.wrapping_add(up);
            }
        }
        FilterType::Average => {
            for i in 0..row.len() {
                let left = if i >= bpp { row[i - bpp] as u16 } else { 0 };
                let avg = ((left + prev[i] as u16) / 2) as u8;
                row[i] = row[i].wrapping_add(avg);
            }
        }
        FilterType::Paeth => {
            for i in 0..row.len() {
                let (left, upper_left) = if i >= bpp {
                    (row[i - bpp], prev[i - bpp])
                } else {
                    (0, 0)
                };
                row[i] = row[i].wrapping_add(paeth(left, prev[i], upper_left));
            }
        }
    }
}

/// Reconstruct raw pixel bytes from the inflated image stream.
///
/// `data` holds `height` scanlines of one filter-type byte followed by
/// `stride` filtered bytes. Trailing bytes beyond the last scanline are
/// ignored. Returns `height · stride` unfiltered bytes.
pub fn unfilter_scanlines(
    data: &[u8],
    height: usize,
    stride: usize,
    bpp: usize,
) -> Result<Vec<u8>, PngError> {
    let too_large = || {
        PngError::Malformed(format!(
            "{} scanlines of {} bytes overflow the address space",
            height, stride
        ))
    };
    let expected = stride
        .checked_add(1)
        .and_then(|line| line.checked_mul(height))
        .ok_or_else(too_large)?;
    if data.len() < expected {
        return Err(PngError::Malformed(format!(
            "image data holds {} bytes, expected {}",
            data.len(),
            expected
        )));
    }

    // Cannot overflow: height * stride < height * (stride + 1)
    let mut out = vec![0u8; height * stride];
    let zero_row = vec![0u8; stride];
    for y in 0..height {
        let line = &data[y * (stride + 1)..(y + 1) * (stride + 1)];
        let kind = FilterType::try_from(line[0])?;

        let (done, rest) = out.split_at_mut(y * stride);
        let row = &mut rest[..stride];
        row.copy_from_slice(&line[1..]);
        let prev = if y == 0 { &zero_row[..] } else { &done[(y - 1) * stride..] };
        unfilter_row(kind, row, prev, bpp);
    }
    Ok(out)
}
