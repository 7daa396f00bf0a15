//! Host reference implementations used as ground truth
//!
//! Straightforward sequential arithmetic, no blocking or tiling. These
//! assume well-formed input; the case driver rejects malformed cases
//! before the oracle runs.

use crate::dtype::Element;
use crate::formats::{CsrMatrix, GebsrMatrix, IndexBase};

/// Expected result of the Givens rotation, computed in place
///
/// Entries are processed in storage order, so several entries mapping to
/// the same `y` position accumulate sequentially (last write wins per
/// source ordering), matching the library semantics exactly.
pub fn roti<T: Element>(
    x_val: &mut [T],
    x_ind: &[i64],
    y: &mut [T],
    c: T,
    s: T,
    idx_base: IndexBase,
) {
    let offset = idx_base.offset();

    for i in 0..x_val.len() {
        let idx = (x_ind[i] - offset) as usize;

        let xv = x_val[i];
        let yv = y[idx];

        x_val[i] = c * xv + s * yv;
        y[idx] = c * yv - s * xv;
    }
}

/// Expected result of the GEBSR to CSR expansion
///
/// Re-expresses every block element at (block_row, block_col), intra-block
/// position (r, c), as the flat coordinate
/// `(block_row * row_block_dim + r, block_col * col_block_dim + c)`,
/// keeping explicit zeros, adjusting from the source base to `csr_base`,
/// and reading blocks per the matrix's intra-block layout.
pub fn gebsr_to_csr<T: Element>(a: &GebsrMatrix<T>, csr_base: IndexBase) -> CsrMatrix<T> {
    let src_off = a.base.offset();
    let dst_off = csr_base.offset();
    let area = a.block_area();
    let nnz = a.nnzb() as usize * area;

    let mut row_ptr = Vec::with_capacity(a.rows() as usize + 1);
    let mut col_ind = Vec::with_capacity(nnz);
    let mut val = Vec::with_capacity(nnz);
    row_ptr.push(dst_off);

    for br in 0..a.mb as usize {
        let begin = (a.row_ptr[br] - src_off) as usize;
        let end = (a.row_ptr[br + 1] - src_off) as usize;

        for r in 0..a.row_block_dim {
            for k in begin..end {
                let bc = a.col_ind[k] - src_off;
                for c in 0..a.col_block_dim {
                    col_ind.push(bc * a.col_block_dim + c + dst_off);
                    val.push(
                        a.val[k * area
                            + a.dir.block_offset(r, c, a.row_block_dim, a.col_block_dim)],
                    );
                }
            }
            row_ptr.push(val.len() as i64 + dst_off);
        }
    }

    // Structurally valid by construction; skip re-validation
    CsrMatrix {
        nrow: a.rows(),
        ncol: a.cols(),
        row_ptr,
        col_ind,
        val,
        base: csr_base,
    }
}
