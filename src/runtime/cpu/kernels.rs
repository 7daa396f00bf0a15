//! CPU kernels for the operations under verification
//!
//! These run the same sequential arithmetic the contract specifies, on
//! raw device pointers (which, for the CPU runtime, are host-addressable).
//! All argument validation happens in the dispatching client; kernels
//! assume well-formed input.

use crate::dtype::Element;
use crate::formats::{Direction, IndexBase};

/// Apply the Givens rotation to sparse x and dense y, in storage order
///
/// # Safety
/// - `x_val` and `x_ind` must be valid for `nnz` elements
/// - every `x_ind[i] - idx_base` must be a valid index into `y`
pub unsafe fn roti_kernel<T: Element>(
    nnz: usize,
    x_val: *mut T,
    x_ind: *const i64,
    y: *mut T,
    c: T,
    s: T,
    idx_base: IndexBase,
) {
    let x_val = unsafe { std::slice::from_raw_parts_mut(x_val, nnz) };
    let x_ind = unsafe { std::slice::from_raw_parts(x_ind, nnz) };
    let offset = idx_base.offset();

    for i in 0..nnz {
        let idx = (x_ind[i] - offset) as usize;
        let xv = x_val[i];
        let yv = unsafe { *y.add(idx) };

        x_val[i] = c * xv + s * yv;
        unsafe {
            *y.add(idx) = c * yv - s * xv;
        }
    }
}

/// Expand GEBSR blocks into flat CSR coordinates
///
/// Emits rows in order; within a row, blocks in stored order, each
/// contributing `col_block_dim` consecutive columns. Output length is
/// nnzb x block area; explicit zeros inside blocks are kept.
///
/// # Safety
/// - `bsr_row_ptr` must be valid for `mb + 1` elements, monotonic, with
///   endpoints consistent with `bsr_base`
/// - `bsr_col_ind` and `bsr_val` must be valid for the block count and
///   block count x block area respectively
/// - `csr_row_ptr` must be valid for `mb * row_block_dim + 1` elements,
///   `csr_col_ind` and `csr_val` for block count x block area
#[allow(clippy::too_many_arguments)]
pub unsafe fn gebsr2csr_kernel<T: Element>(
    dir: Direction,
    mb: i64,
    row_block_dim: i64,
    col_block_dim: i64,
    bsr_base: IndexBase,
    bsr_val: *const T,
    bsr_row_ptr: *const i64,
    bsr_col_ind: *const i64,
    csr_base: IndexBase,
    csr_val: *mut T,
    csr_row_ptr: *mut i64,
    csr_col_ind: *mut i64,
) {
    let bsr_off = bsr_base.offset();
    let csr_off = csr_base.offset();
    let area = (row_block_dim * col_block_dim) as usize;

    let bsr_row_ptr = unsafe { std::slice::from_raw_parts(bsr_row_ptr, mb as usize + 1) };
    let nnzb = (bsr_row_ptr[mb as usize] - bsr_off) as usize;
    let bsr_col_ind = unsafe { std::slice::from_raw_parts(bsr_col_ind, nnzb) };
    let bsr_val = unsafe { std::slice::from_raw_parts(bsr_val, nnzb * area) };

    let m = (mb * row_block_dim) as usize;
    let csr_row_ptr = unsafe { std::slice::from_raw_parts_mut(csr_row_ptr, m + 1) };
    let csr_col_ind = unsafe { std::slice::from_raw_parts_mut(csr_col_ind, nnzb * area) };
    let csr_val = unsafe { std::slice::from_raw_parts_mut(csr_val, nnzb * area) };

    csr_row_ptr[0] = csr_off;
    let mut pos = 0usize;

    for br in 0..mb as usize {
        let row_begin = (bsr_row_ptr[br] - bsr_off) as usize;
        let row_end = (bsr_row_ptr[br + 1] - bsr_off) as usize;

        for r in 0..row_block_dim {
            for k in row_begin..row_end {
                let bc = bsr_col_ind[k] - bsr_off;
                for c in 0..col_block_dim {
                    csr_col_ind[pos] = bc * col_block_dim + c + csr_off;
                    csr_val[pos] =
                        bsr_val[k * area + dir.block_offset(r, c, row_block_dim, col_block_dim)];
                    pos += 1;
                }
            }
            let row = br * row_block_dim as usize + r as usize;
            csr_row_ptr[row + 1] = pos as i64 + csr_off;
        }
    }
}
