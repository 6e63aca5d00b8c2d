//! CRC-32 (ISO 3309) as used by PNG chunk trailers

use once_cell::sync::Lazy;

/// Byte-indexed lookup table for the reflected polynomial 0xedb88320
static CRC_TABLE: Lazy<[u32; 256]> = Lazy::new(|| {
    let mut table = [0u32; 256];
    for (n, entry) in table.iter_mut().enumerate() {
        let mut c = n as u32;
        for _ in 0..8 {
            c = if c & 1 != 0 {
                0xedb8_8320 ^ (c >> 1)
            } else {
                c >> 1
            };
        }
        *entry = c;
    }
    table
});

/// Feed `bytes` into a running (pre-inverted) CRC register
pub fn update_crc(crc: u32, bytes: &[u8]) -> u32 {
    let table = &*CRC_TABLE;
    bytes.iter().fold(crc, |c, &b| {
        table[((c ^ b as u32) & 0xff) as usize] ^ (c >> 8)
    })
}

/// CRC-32 of a byte string
pub fn crc32(bytes: &[u8]) -> u32 {
    update_crc(0xffff_ffff, bytes) ^ 0xffff_ffff
}

/// CRC stored in a chunk trailer: computed over the type code and the data
pub fn chunk_crc(kind: &[u8; 4], data: &[u8]) -> u32 {
    update_crc(update_crc(0xffff_ffff, kind), data) ^ 0xffff_ffff
}
