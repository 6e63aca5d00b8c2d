/// Errors raised while reading or writing PNG streams
#[derive(Debug, thiserror::Error)]
pub enum PngError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Not a PNG stream: signature mismatch")]
    BadSignature,

    #[error("Malformed PNG: {0}")]
    Malformed(String),

    #[error("Unsupported PNG: {0}")]
    Unsupported(String),

    #[error("CRC mismatch in {chunk} chunk: stored {stored:#010x}, computed {computed:#010x}")]
    ChecksumMismatch {
        chunk: String,
        stored: u32,
        computed: u32,
    },

    #[error("Image data failed to decompress: {0}")]
    Decompression(String),
}
