//! Decomposition handle API

use std::panic::{AssertUnwindSafe, catch_unwind};

use lowrank_svd::svd;

use crate::types::lra_svd;
use crate::utils::{copy_matrix_to_c_array, dims_from_c, matrix_from_c_array};
use crate::{
    LRA_INTERNAL_ERROR, LRA_INVALID_ARGUMENT, LRA_INVALID_RANK, LRA_SUCCESS, StatusCode,
    status_from_error,
};

// Generate common opaque type functions: release, clone, is_assigned
impl_opaque_type_common!(svd);

/// Compute the SVD of an m × n row-major matrix
///
/// # Arguments
/// * `m`, `n` - Extents of A
/// * `a` - Row-major array of `m * n` doubles
/// * `status` - Pointer to store status code
///
/// # Returns
/// * Handle to the decomposition, or NULL on failure
/// * Status code:
///   - `LRA_SUCCESS` (0) on success
///   - `LRA_INVALID_DIMENSIONS` (-2) if m or n is not positive
///   - `LRA_NON_CONVERGENCE` (-5) if the eigensolver exhausts its rotation budget
///   - `LRA_INVALID_ARGUMENT` (-6) if `a` is null
///   - `LRA_INTERNAL_ERROR` (-7) if internal panic occurs
///
/// # Safety
/// The caller must ensure `status` is a valid pointer.
/// The returned pointer must be freed with `lra_svd_release()`.
///
/// # Example (C)
/// ```c
/// int status;
/// lra_svd* svd = lra_svd_new(rows, cols, pixels, &status);
/// lra_svd_low_rank_approx(svd, 20, approx);
/// lra_svd_release(svd);
/// ```
#[unsafe(no_mangle)]
pub extern "C" fn lra_svd_new(
    m: libc::c_int,
    n: libc::c_int,
    a: *const f64,
    status: *mut StatusCode,
) -> *mut lra_svd {
    if status.is_null() {
        return std::ptr::null_mut();
    }
    let fail = |code: StatusCode| -> *mut lra_svd {
        unsafe { *status = code; }
        std::ptr::null_mut()
    };

    let (m, n) = match dims_from_c(m, n) {
        Ok(dims) => dims,
        Err(code) => return fail(code),
    };
    if a.is_null() {
        return fail(LRA_INVALID_ARGUMENT);
    }

    let result = catch_unwind(AssertUnwindSafe(|| unsafe {
        let a = matrix_from_c_array(m, n, a)?;
        let decomposition = svd(&a).map_err(|e| status_from_error(&e))?;
        Ok::<_, StatusCode>(Box::into_raw(Box::new(lra_svd::new(decomposition))))
    }));

    match result {
        Ok(Ok(ptr)) => {
            unsafe { *status = LRA_SUCCESS; }
            ptr
        }
        Ok(Err(code)) => fail(code),
        Err(_) => fail(LRA_INTERNAL_ERROR),
    }
}

/// Get the extents m and n of the decomposed matrix
#[unsafe(no_mangle)]
pub extern "C" fn lra_svd_get_dims(
    svd: *const lra_svd,
    m: *mut libc::c_int,
    n: *mut libc::c_int,
) -> StatusCode {
    if svd.is_null() || m.is_null() || n.is_null() {
        return LRA_INVALID_ARGUMENT;
    }

    let result = catch_unwind(AssertUnwindSafe(|| unsafe {
        let (rows, cols) = (*svd).dims();
        *m = rows as libc::c_int;
        *n = cols as libc::c_int;
        LRA_SUCCESS
    }));

    result.unwrap_or(LRA_INTERNAL_ERROR)
}

/// Copy U (m × m, row-major) into `out`
#[unsafe(no_mangle)]
pub extern "C" fn lra_svd_get_u(svd: *const lra_svd, out: *mut f64) -> StatusCode {
    if svd.is_null() || out.is_null() {
        return LRA_INVALID_ARGUMENT;
    }

    let result = catch_unwind(AssertUnwindSafe(|| unsafe {
        copy_matrix_to_c_array((*svd).u(), out);
        LRA_SUCCESS
    }));

    result.unwrap_or(LRA_INTERNAL_ERROR)
}

/// Copy S (m × n, row-major, singular values on the diagonal) into `out`
#[unsafe(no_mangle)]
pub extern "C" fn lra_svd_get_s(svd: *const lra_svd, out: *mut f64) -> StatusCode {
    if svd.is_null() || out.is_null() {
        return LRA_INVALID_ARGUMENT;
    }

    let result = catch_unwind(AssertUnwindSafe(|| unsafe {
        copy_matrix_to_c_array((*svd).s(), out);
        LRA_SUCCESS
    }));

    result.unwrap_or(LRA_INTERNAL_ERROR)
}

/// Copy V (n × n, row-major) into `out`
#[unsafe(no_mangle)]
pub extern "C" fn lra_svd_get_v(svd: *const lra_svd, out: *mut f64) -> StatusCode {
    if svd.is_null() || out.is_null() {
        return LRA_INVALID_ARGUMENT;
    }

    let result = catch_unwind(AssertUnwindSafe(|| unsafe {
        copy_matrix_to_c_array((*svd).v(), out);
        LRA_SUCCESS
    }));

    result.unwrap_or(LRA_INTERNAL_ERROR)
}

/// Copy the min(m, n) singular values, in descending order, into `out`
#[unsafe(no_mangle)]
pub extern "C" fn lra_svd_get_singular_values(svd: *const lra_svd, out: *mut f64) -> StatusCode {
    if svd.is_null() || out.is_null() {
        return LRA_INVALID_ARGUMENT;
    }

    let result = catch_unwind(AssertUnwindSafe(|| unsafe {
        let values = (*svd).decomposition().singular_values();
        std::ptr::copy_nonoverlapping(values.as_ptr(), out, values.len());
        LRA_SUCCESS
    }));

    result.unwrap_or(LRA_INTERNAL_ERROR)
}

/// Report whether basis completion accepted a non-orthogonal fallback vector
///
/// Stores 1 in `flag` if it did, 0 otherwise.
#[unsafe(no_mangle)]
pub extern "C" fn lra_svd_has_fallback(svd: *const lra_svd, flag: *mut libc::c_int) -> StatusCode {
    if svd.is_null() || flag.is_null() {
        return LRA_INVALID_ARGUMENT;
    }

    let result = catch_unwind(AssertUnwindSafe(|| unsafe {
        *flag = (*svd).decomposition().has_fallback() as libc::c_int;
        LRA_SUCCESS
    }));

    result.unwrap_or(LRA_INTERNAL_ERROR)
}

/// Rank-k reconstruction from a decomposition handle
///
/// # Arguments
/// * `svd` - Decomposition handle
/// * `k` - Target rank; values above min(m, n) are clamped
/// * `out` - Pre-allocated array of `m * n` doubles (row-major)
///
/// # Returns
/// * `LRA_SUCCESS` (0) on success
/// * `LRA_INVALID_RANK` (-3) if `k <= 0`
/// * `LRA_INVALID_ARGUMENT` (-6) if a pointer is null
/// * `LRA_INTERNAL_ERROR` (-7) if internal panic occurs
#[unsafe(no_mangle)]
pub extern "C" fn lra_svd_low_rank_approx(
    svd: *const lra_svd,
    k: libc::c_int,
    out: *mut f64,
) -> StatusCode {
    if svd.is_null() || out.is_null() {
        return LRA_INVALID_ARGUMENT;
    }
    if k <= 0 {
        return LRA_INVALID_RANK;
    }

    let result = catch_unwind(AssertUnwindSafe(|| unsafe {
        let a_k = (*svd)
            .decomposition()
            .low_rank(k as usize)
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
