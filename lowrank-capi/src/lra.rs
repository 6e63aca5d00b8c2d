//! Rank-k reconstruction from caller-held factor buffers

use std::panic::{AssertUnwindSafe, catch_unwind};

use lowrank_svd::{Decomposition, low_rank_approx};

use crate::utils::{copy_matrix_to_c_array, matrix_from_c_array};
use crate::{
    LRA_INCOMPLETE_DECOMPOSITION, LRA_INTERNAL_ERROR, LRA_INVALID_ARGUMENT,
    LRA_INVALID_DIMENSIONS, LRA_INVALID_RANK, LRA_SUCCESS, StatusCode, status_from_error,
};

/// Rank-k approximation A_k = Σ_{t<k} σ_t · u_t · v_tᵗ from raw factors
///
/// # Arguments
/// * `m`, `n` - Extents of the original matrix
/// * `u` - U, m × m row-major
/// * `s` - S, m × n row-major with the singular values on the diagonal
/// * `v` - V, n × n row-major
/// * `k` - Target rank; values above min(m, n) are clamped
/// * `out` - Pre-allocated array of `m * n` doubles (row-major)
///
/// # Returns
/// * `LRA_SUCCESS` (0) on success
/// * `LRA_INCOMPLETE_DECOMPOSITION` (-4) if any factor pointer is null
/// * `LRA_INVALID_DIMENSIONS` (-2) if m or n is not positive
/// * `LRA_INVALID_RANK` (-3) if `k <= 0`
/// * `LRA_INVALID_ARGUMENT` (-6) if `out` is null
/// * `LRA_INTERNAL_ERROR` (-7) if internal panic occurs
#[unsafe(no_mangle)]
pub extern "C" fn lra_low_rank_approx(
    m: libc::c_int,
    n: libc::c_int,
    u: *const f64,
    s: *const f64,
    v: *const f64,
    k: libc::c_int,
    out: *mut f64,
) -> StatusCode {
    if out.is_null() {
        return LRA_INVALID_ARGUMENT;
    }
    if u.is_null() || s.is_null() || v.is_null() {
        return LRA_INCOMPLETE_DECOMPOSITION;
    }
    if m <= 0 || n <= 0 {
        return LRA_INVALID_DIMENSIONS;
    }
    if k <= 0 {
        return LRA_INVALID_RANK;
    }
    let (m, n) = (m as usize, n as usize);

    let result = catch_unwind(AssertUnwindSafe(|| unsafe {
        let u = matrix_from_c_array(m, m, u)?;
        let s = matrix_from_c_array(m, n, s)?;
        let v = matrix_from_c_array(n, n, v)?;
        let decomposition = Decomposition::from_parts(m, n, Some(u), Some(s), Some(v))
            .map_err(|e| status_from_error(&e))?;
        let a_k = low_rank_approx(m, n, &decomposition, k as usize)
            .map_err(|e| status_from_error(&e))?;
        copy_matrix_to_c_array(&a_k, out);
        Ok::<(), StatusCode>(())
    }));

    match result {
        Ok(Ok(())) => LRA_SUCCESS,
        Ok(Err(code)) => code,
        Err(_) => LRA_INTERNAL_ERROR,
    }
}
