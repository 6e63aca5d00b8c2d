//! Matrix operations over row-major C buffers

use std::panic::{AssertUnwindSafe, catch_unwind};

use lowrank_svd::{frobenius_norm, multiply, normalize, transpose};

use crate::utils::{copy_matrix_to_c_array, dims_from_c, matrix_from_c_array};
use crate::{LRA_INTERNAL_ERROR, LRA_INVALID_ARGUMENT, LRA_SUCCESS, StatusCode, status_from_error};

/// Matrix product C = A · B
///
/// # Arguments
/// * `a_rows`, `a_cols`, `a` - Left operand (row-major)
/// * `b_rows`, `b_cols`, `b` - Right operand (row-major)
/// * `out` - Pre-allocated array of `a_rows * b_cols` doubles
///
/// # Returns
/// * `LRA_SUCCESS` (0) on success
/// * `LRA_DIMENSION_MISMATCH` (-1) if `a_cols != b_rows`
/// * `LRA_INVALID_DIMENSIONS` (-2) if any extent is not positive
/// * `LRA_INVALID_ARGUMENT` (-6) if a pointer is null
/// * `LRA_INTERNAL_ERROR` (-7) if internal panic occurs
#[unsafe(no_mangle)]
pub extern "C" fn lra_multiply(
    a_rows: libc::c_int,
    a_cols: libc::c_int,
    a: *const f64,
    b_rows: libc::c_int,
    b_cols: libc::c_int,
    b: *const f64,
    out: *mut f64,
) -> StatusCode {
    if a.is_null() || b.is_null() || out.is_null() {
        return LRA_INVALID_ARGUMENT;
    }
    let ((m1, n1), (m2, n2)) = match (dims_from_c(a_rows, a_cols), dims_from_c(b_rows, b_cols)) {
        (Ok(da), Ok(db)) => (da, db),
        (Err(code), _) | (_, Err(code)) => return code,
    };

    let result = catch_unwind(AssertUnwindSafe(|| unsafe {
        let a = matrix_from_c_array(m1, n1, a)?;
        let b = matrix_from_c_array(m2, n2, b)?;
        let c = multiply(&a, &b).map_err(|e| status_from_error(&e))?;
        copy_matrix_to_c_array(&c, out);
        Ok::<(), StatusCode>(())
    }));

    match result {
        Ok(Ok(())) => LRA_SUCCESS,
        Ok(Err(code)) => code,
        Err(_) => LRA_INTERNAL_ERROR,
    }
}

/// Transpose an m × n matrix into an n × m output
///
/// # Returns
/// * `LRA_SUCCESS` (0) on success
/// * `LRA_INVALID_DIMENSIONS` (-2) if m or n is not positive
/// * `LRA_INVALID_ARGUMENT` (-6) if a pointer is null
/// * `LRA_INTERNAL_ERROR` (-7) if internal panic occurs
#[unsafe(no_mangle)]
pub extern "C" fn lra_transpose(
    m: libc::c_int,
    n: libc::c_int,
    a: *const f64,
    out: *mut f64,
) -> StatusCode {
    if a.is_null() || out.is_null() {
        return LRA_INVALID_ARGUMENT;
    }
    let (m, n) = match dims_from_c(m, n) {
        Ok(dims) => dims,
        Err(code) => return code,
    };

    let result = catch_unwind(AssertUnwindSafe(|| unsafe {
        let a = matrix_from_c_array(m, n, a)?;
        copy_matrix_to_c_array(&transpose(&a), out);
        Ok::<(), StatusCode>(())
    }));

    match result {
        Ok(Ok(())) => LRA_SUCCESS,
        Ok(Err(code)) => code,
        Err(_) => LRA_INTERNAL_ERROR,
    }
}

/// Frobenius norm of an m × n matrix
#[unsafe(no_mangle)]
pub extern "C" fn lra_frobenius_norm(
    m: libc::c_int,
    n: libc::c_int,
    a: *const f64,
    norm: *mut f64,
) -> StatusCode {
    if a.is_null() || norm.is_null() {
        return LRA_INVALID_ARGUMENT;
    }
    let (m, n) = match dims_from_c(m, n) {
        Ok(dims) => dims,
        Err(code) => return code,
    };

    let result = catch_unwind(AssertUnwindSafe(|| unsafe {
        let a = matrix_from_c_array(m, n, a)?;
        *norm = frobenius_norm(&a);
        Ok::<(), StatusCode>(())
    }));

    match result {
        Ok(Ok(())) => LRA_SUCCESS,
        Ok(Err(code)) => code,
        Err(_) => LRA_INTERNAL_ERROR,
    }
}

/// Normalize a vector of `len` doubles in place
///
/// A zero vector has no direction; every component becomes NaN.
#[unsafe(no_mangle)]
pub extern "C" fn lra_normalize(len: libc::c_int, v: *mut f64) -> StatusCode {
    if v.is_null() || len < 0 {
        return LRA_INVALID_ARGUMENT;
    }

    let result = catch_unwind(AssertUnwindSafe(|| unsafe {
        let slice = std::slice::from_raw_parts_mut(v, len as usize);
        normalize(slice);
    }));

    match result {
        Ok(()) => LRA_SUCCESS,
        Err(_) => LRA_INTERNAL_ERROR,
    }
}
