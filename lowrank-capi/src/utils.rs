//! Conversions between C buffers and matrices

use lowrank_svd::Matrix;
use lowrank_svd::matrix::{from_row_major, to_row_major};

use crate::{LRA_INVALID_ARGUMENT, LRA_INVALID_DIMENSIONS, StatusCode};

/// Validate a pair of C extents; both must be positive
pub fn dims_from_c(m: libc::c_int, n: libc::c_int) -> Result<(usize, usize), StatusCode> {
    if m <= 0 || n <= 0 {
        return Err(LRA_INVALID_DIMENSIONS);
    }
    Ok((m as usize, n as usize))
}

/// Copy an m × n row-major C array into a matrix
///
/// # Safety
/// A non-null `data` must point to at least `m · n` readable doubles.
pub unsafe fn matrix_from_c_array(
    m: usize,
    n: usize,
    data: *const f64,
) -> Result<Matrix, StatusCode> {
    if data.is_null() {
        return Err(LRA_INVALID_ARGUMENT);
    }
    let slice = unsafe { std::slice::from_raw_parts(data, m * n) };
    from_row_major(m, n, slice).map_err(|e| crate::status_from_error(&e))
}

/// Copy a matrix into a row-major C array
///
/// # Safety
/// `out` must have space for every element of `matrix`.
pub unsafe fn copy_matrix_to_c_array(matrix: &Matrix, out: *mut f64) {
    let flat = to_row_major(matrix);
    unsafe { std::ptr::copy_nonoverlapping(flat.as_ptr(), out, flat.len()) };
}
