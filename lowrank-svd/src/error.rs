//! Error types shared by every stage of the pipeline

/// Errors from matrix operations, decomposition and reconstruction
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LinalgError {
    #[error("Dimension mismatch: cannot combine {lhs:?} with {rhs:?}")]
    DimensionMismatch {
        lhs: (usize, usize),
        rhs: (usize, usize),
    },

    #[error("Invalid dimensions {rows}x{cols}: both extents must be positive")]
    InvalidDimensions { rows: usize, cols: usize },

    #[error("Invalid tolerance {0}: must be finite and positive")]
    InvalidTolerance(f64),

    #[error("Invalid rank {0}: target rank must be positive")]
    InvalidRank(usize),

    #[error("Incomplete decomposition: {0}")]
    IncompleteDecomposition(String),

    #[error("Jacobi eigensolver did not converge after {rotations} rotations (largest off-diagonal {off_diagonal:e})")]
    NonConvergence { rotations: usize, off_diagonal: f64 },

    #[error("Buffer holds {actual} values, expected {expected}")]
    BufferSize { expected: usize, actual: usize },
}
