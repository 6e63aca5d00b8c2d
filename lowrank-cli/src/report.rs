//! Reconstruction error as reported on stdout

use lowrank_svd::matrix::subtract;
use lowrank_svd::{LinalgError, Matrix, frobenius_norm};

/// Frobenius norm of `original − trunc(a_k)`.
///
/// Each reconstructed value is truncated toward zero before the difference is
/// taken, so the figure measures the integer pixel grid the reconstruction
/// collapses to rather than the real-valued A_k.
pub fn truncated_error(original: &Matrix, a_k: &Matrix) -> Result<f64, LinalgError> {
    let (m, n) = *a_k.shape();
    let truncated = Matrix::from_fn([m, n], |idx| a_k[[idx[0], idx[1]]].trunc());
    Ok(frobenius_norm(&subtract(original, &truncated)?))
}

/// The norm spread over every pixel of a width × height image
pub fn per_pixel(norm: f64, width: usize, height: usize) -> f64 {
    norm / (width * height) as f64
}
