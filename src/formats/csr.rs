//! Host-side CSR matrix: struct, validation, block decomposition

use super::{Direction, GebsrMatrix, IndexBase};
use crate::dtype::Element;
use crate::error::{Error, Result};

use std::collections::BTreeMap;

/// CSR (Compressed Sparse Row) matrix held in host memory
///
/// Stored indices carry the matrix's [`IndexBase`]; every consumer adjusts
/// by `base.offset()` before using them as array positions.
#[derive(Debug, Clone)]
pub struct CsrMatrix<T> {
    /// Number of rows
    pub nrow: i64,
    /// Number of columns
    pub ncol: i64,
    /// Row pointers (length: nrow + 1), base-adjusted
    pub row_ptr: Vec<i64>,
    /// Column index of each stored entry, base-adjusted
    pub col_ind: Vec<i64>,
    /// Value of each stored entry
    pub val: Vec<T>,
    /// Index base of `row_ptr` and `col_ind`
    pub base: IndexBase,
}

impl<T: Element> CsrMatrix<T> {
    /// Create a CSR matrix, validating its structure
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - `nrow` or `ncol` is negative
    /// - `row_ptr` length != nrow + 1, or its endpoints disagree with the
    ///   base and the entry count
    /// - `col_ind` and `val` have different lengths
    /// - a column index is outside the declared base's valid range
    pub fn new(
        nrow: i64,
        ncol: i64,
        row_ptr: Vec<i64>,
        col_ind: Vec<i64>,
        val: Vec<T>,
        base: IndexBase,
    ) -> Result<Self> {
        if nrow < 0 {
            return Err(Error::invalid_size("nrow", nrow));
        }
        if ncol < 0 {
            return Err(Error::invalid_size("ncol", ncol));
        }
        if row_ptr.len() != nrow as usize + 1 {
            return Err(Error::invalid_value(
                "row_ptr",
                format!("length {} != nrow + 1 = {}", row_ptr.len(), nrow + 1),
            ));
        }
        if col_ind.len() != val.len() {
            return Err(Error::invalid_value(
                "col_ind",
                format!("length {} != values length {}", col_ind.len(), val.len()),
            ));
        }

        let offset = base.offset();
        let nnz = val.len() as i64;
        if row_ptr[0] != offset || row_ptr[nrow as usize] - offset != nnz {
            return Err(Error::invalid_value(
                "row_ptr",
                format!(
                    "endpoints [{}, {}] disagree with base {} and nnz {}",
                    row_ptr[0],
                    row_ptr[nrow as usize],
                    base,
                    nnz
                ),
            ));
        }
        for w in row_ptr.windows(2) {
            if w[1] < w[0] {
                return Err(Error::invalid_value("row_ptr", "not monotonic".to_string()));
            }
        }
        for &c in &col_ind {
            if c < offset || c - offset >= ncol {
                return Err(Error::invalid_value(
                    "col_ind",
                    format!("index {} out of range for {} columns ({})", c, ncol, base),
                ));
            }
        }

        Ok(Self {
            nrow,
            ncol,
            row_ptr,
            col_ind,
            val,
            base,
        })
    }

    /// Number of stored entries
    #[inline]
    pub fn nnz(&self) -> i64 {
        self.val.len() as i64
    }

    /// Re-express the matrix under a different index base
    ///
    /// Returns a copy with `row_ptr` and `col_ind` shifted; values and
    /// pattern are untouched. Loading a file with a requested base goes
    /// through here.
    pub fn to_base(&self, base: IndexBase) -> Self {
        let delta = base.offset() - self.base.offset();
        Self {
            nrow: self.nrow,
            ncol: self.ncol,
            row_ptr: self.row_ptr.iter().map(|p| p + delta).collect(),
            col_ind: self.col_ind.iter().map(|c| c + delta).collect(),
            val: self.val.clone(),
            base,
        }
    }

    /// Decompose into GEBSR blocks of `row_block_dim` x `col_block_dim`
    ///
    /// Rows and columns are padded up to whole blocks; every block touched
    /// by at least one entry is stored densely, zero-filled, with its
    /// elements laid out per `dir`. This is the block decomposition applied
    /// to file-loaded matrices before they enter the pipeline.
    ///
    /// # Errors
    ///
    /// Returns `InvalidValue` if either block dimension is < 1.
    pub fn to_gebsr(
        &self,
        dir: Direction,
        row_block_dim: i64,
        col_block_dim: i64,
        base: IndexBase,
    ) -> Result<GebsrMatrix<T>> {
        if row_block_dim < 1 {
            return Err(Error::invalid_value(
                "row_block_dim",
                format!("{row_block_dim} < 1"),
            ));
        }
        if col_block_dim < 1 {
            return Err(Error::invalid_value(
                "col_block_dim",
                format!("{col_block_dim} < 1"),
            ));
        }

        let mb = (self.nrow + row_block_dim - 1) / row_block_dim;
        let nb = (self.ncol + col_block_dim - 1) / col_block_dim;
        let area = (row_block_dim * col_block_dim) as usize;
        let src_offset = self.base.offset();
        let dst_offset = base.offset();

        let mut row_ptr = Vec::with_capacity(mb as usize + 1);
        let mut col_ind = Vec::new();
        let mut val = Vec::new();
        row_ptr.push(dst_offset);

        for br in 0..mb {
            // Gather this block row's blocks, ordered by block column
            let mut blocks: BTreeMap<i64, Vec<T>> = BTreeMap::new();
            for r in 0..row_block_dim {
                let row = br * row_block_dim + r;
                if row >= self.nrow {
                    break;
                }
                let start = (self.row_ptr[row as usize] - src_offset) as usize;
                let end = (self.row_ptr[row as usize + 1] - src_offset) as usize;
                for k in start..end {
                    let col = self.col_ind[k] - src_offset;
                    let bc = col / col_block_dim;
                    let c = col % col_block_dim;
                    let block = blocks.entry(bc).or_insert_with(|| vec![T::zero(); area]);
                    block[dir.block_offset(r, c, row_block_dim, col_block_dim)] = self.val[k];
                }
            }

            for (bc, block) in blocks {
                col_ind.push(bc + dst_offset);
                val.extend_from_slice(&block);
            }
            row_ptr.push(col_ind.len() as i64 + dst_offset);
        }

        GebsrMatrix::new(
            mb,
            nb,
            row_block_dim,
            col_block_dim,
            dir,
            base,
            row_ptr,
            col_ind,
            val,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_csr() -> CsrMatrix<f64> {
        // [1, 0, 2]
        // [0, 0, 3]
        // [4, 5, 0]
        CsrMatrix::new(
            3,
            3,
            vec![0, 2, 3, 5],
            vec![0, 2, 2, 0, 1],
            vec![1.0, 2.0, 3.0, 4.0, 5.0],
            IndexBase::Zero,
        )
        .unwrap()
    }

    #[test]
    fn test_csr_creation() {
        let csr = sample_csr();
        assert_eq!(csr.nnz(), 5);
        assert_eq!(csr.nrow, 3);
        assert_eq!(csr.ncol, 3);
    }

    #[test]
    fn test_csr_invalid_row_ptr() {
        let result = CsrMatrix::new(
            3,
            3,
            vec![0, 2, 3], // wrong length
            vec![0, 2, 2, 0, 1],
            vec![1.0, 2.0, 3.0, 4.0, 5.0],
            IndexBase::Zero,
        );
        assert!(matches!(result, Err(Error::InvalidValue { arg: "row_ptr", .. })));
    }

    #[test]
    fn test_csr_negative_dim() {
        let result = CsrMatrix::<f64>::new(-1, 3, vec![0], vec![], vec![], IndexBase::Zero);
        assert!(matches!(result, Err(Error::InvalidSize { arg: "nrow", .. })));
    }

    #[test]
    fn test_csr_base_mismatch() {
        // base-1 matrix whose row_ptr starts at 0
        let result = CsrMatrix::new(
            1,
            2,
            vec![0, 1],
            vec![1],
            vec![1.0],
            IndexBase::One,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_csr_to_base() {
        let one = sample_csr().to_base(IndexBase::One);
        assert_eq!(one.row_ptr, vec![1, 3, 4, 6]);
        assert_eq!(one.col_ind, vec![1, 3, 3, 1, 2]);
        assert_eq!(one.base, IndexBase::One);

        let back = one.to_base(IndexBase::Zero);
        assert_eq!(back.row_ptr, sample_csr().row_ptr);
        assert_eq!(back.col_ind, sample_csr().col_ind);
    }

    #[test]
    fn test_csr_to_gebsr_2x2() {
        let gebsr = sample_csr()
            .to_gebsr(Direction::Row, 2, 2, IndexBase::Zero)
            .unwrap();

        // 3x3 padded to 4x4: 2x2 block grid
        assert_eq!(gebsr.mb, 2);
        assert_eq!(gebsr.nb, 2);
        // Block row 0 touches block cols 0 and 1; block row 1 touches col 0
        assert_eq!(gebsr.row_ptr, vec![0, 2, 3]);
        assert_eq!(gebsr.col_ind, vec![0, 1, 0]);
        // Block (0,0) row-major: [1, 0, 0, 0]; block (0,1): [2, 0, 3, 0]
        assert_eq!(&gebsr.val[0..4], &[1.0, 0.0, 0.0, 0.0]);
        assert_eq!(&gebsr.val[4..8], &[2.0, 0.0, 3.0, 0.0]);
        // Block (1,0): row 2 = [4, 5], padding row = zeros
        assert_eq!(&gebsr.val[8..12], &[4.0, 5.0, 0.0, 0.0]);
    }

    #[test]
    fn test_csr_to_gebsr_rejects_bad_block_dim() {
        let csr = sample_csr();
        assert!(csr.to_gebsr(Direction::Row, 0, 2, IndexBase::Zero).is_err());
        assert!(csr.to_gebsr(Direction::Row, 2, -1, IndexBase::Zero).is_err());
    }
}
