//! Rank-k approximation from a computed decomposition
//!
//! A_k = Σ_{t<k} σ_t · u_t · v_tᵗ, the best rank-k approximation of A in the
//! Frobenius and spectral norms (Eckart–Young).

use crate::error::LinalgError;
use crate::matrix::zeros;
use crate::svd::Decomposition;
use crate::Matrix;

/// Rank-k approximation of an m × n matrix from its decomposition
///
/// Checks are applied in order: the factors must match m and n, both
/// dimensions must be positive, and `k` must be at least one. A `k` above
/// min(m, n) is clamped, so the result is then the full reconstruction.
///
/// # Errors
/// * [`LinalgError::IncompleteDecomposition`] if U, S or V is mis-shaped
/// * [`LinalgError::InvalidDimensions`] if m or n is zero
/// * [`LinalgError::InvalidRank`] if `k == 0`
pub fn low_rank_approx(
    m: usize,
    n: usize,
    svd: &Decomposition,
    k: usize,
) -> Result<Matrix, LinalgError> {
    svd.check_shapes(m, n)?;
    if m == 0 || n == 0 {
        return Err(LinalgError::InvalidDimensions { rows: m, cols: n });
    }
    if k == 0 {
        return Err(LinalgError::InvalidRank(k));
    }

    let r = m.min(n);
    let k = k.min(r);

    let mut a_k = zeros(m, n);
    for t in 0..k {
        let sigma = svd.s[[t, t]];
        if sigma == 0.0 {
            continue;
        }
        for i in 0..m {
            let scaled = sigma * svd.u[[i, t]];
            for j in 0..n {
                a_k[[i, j]] += scaled * svd.v[[j, t]];
            }
        }
    }

    log::debug!("Built rank-{} approximation of {}x{} matrix", k, m, n);
    Ok(a_k)
}

/// Frobenius error ‖A − A_k‖ predicted by the discarded singular values,
/// sqrt(Σ_{i≥k} σ_i²)
pub fn truncation_error(svd: &Decomposition, k: usize) -> f64 {
    svd.singular_values()
        .iter()
        .skip(k)
        .map(|s| s * s)
        .sum::<f64>()
        .sqrt()
}
