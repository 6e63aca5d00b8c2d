//! Result validation utilities

use crate::matrix::frobenius_norm;
use crate::svd::Decomposition;
use crate::svd::basis::orthogonality_defect;
use crate::Matrix;

/// Validate SVD result
///
/// Checks that the decomposition A = U * S * V^T is correct
/// and that U and V are orthogonal matrices.
pub fn validate_svd(original: &Matrix, svd: &Decomposition, tolerance: f64) -> bool {
    let (m, n) = *original.shape();

    // Check dimensions
    if *svd.u.shape() != (m, m) || *svd.s.shape() != (m, n) || *svd.v.shape() != (n, n) {
        return false;
    }

    // Check that U is orthogonal (U^T * U = I)
    if !is_orthonormal(&svd.u, tolerance) {
        return false;
    }

    // Check that V is orthogonal (V^T * V = I)
    if !is_orthonormal(&svd.v, tolerance) {
        return false;
    }

    // Check that singular values are non-negative and sorted
    if !singular_values_valid(&svd.singular_values(), tolerance) {
        return false;
    }

    // Check reconstruction: A ≈ U * S * V^T
    let orig_norm = frobenius_norm(original);
    let diff_norm = reconstruction_error(original, svd);
    if orig_norm == 0.0 {
        diff_norm < tolerance
    } else {
        diff_norm < tolerance * orig_norm
    }
}

/// Check that the columns of a matrix are orthonormal (Qᵗ·Q ≈ I)
///
/// A matrix holding NaN never passes.
pub fn is_orthonormal(matrix: &Matrix, tolerance: f64) -> bool {
    orthogonality_defect(matrix) <= tolerance
}

/// Check that singular values are non-negative and sorted descending
pub fn singular_values_valid(s: &[f64], tolerance: f64) -> bool {
    if s.iter().any(|&x| x < -tolerance || x.is_nan()) {
        return false;
    }
    s.windows(2).all(|w| w[0] >= w[1] - tolerance)
}

/// Frobenius norm of A − U·S·Vᵗ
pub fn reconstruction_error(original: &Matrix, svd: &Decomposition) -> f64 {
    let (m, n) = *original.shape();
    let s = svd.singular_values();

    let mut diff_norm_sq = 0.0;
    for i in 0..m {
        for j in 0..n {
            let mut reconstructed = 0.0;
            for (l, &sigma) in s.iter().enumerate() {
                reconstructed += svd.u[[i, l]] * sigma * svd.v[[j, l]];
            }
            let diff = original[[i, j]] - reconstructed;
            diff_norm_sq += diff * diff;
        }
    }

    diff_norm_sq.sqrt()
}
