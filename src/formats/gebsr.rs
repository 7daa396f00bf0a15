//! Host-side GEBSR matrix: struct, validation, getters

use super::{Direction, IndexBase};
use crate::dtype::Element;
use crate::error::{Error, Result};

/// GEBSR (general block sparse row) matrix held in host memory
///
/// Blocks are `row_block_dim` x `col_block_dim` dense tiles stored at
/// block-grid coordinates; `dir` fixes the element order inside each tile.
/// BSR is the `row_block_dim == col_block_dim` special case.
#[derive(Debug, Clone)]
pub struct GebsrMatrix<T> {
    /// Number of block rows
    pub mb: i64,
    /// Number of block columns
    pub nb: i64,
    /// Rows per block
    pub row_block_dim: i64,
    /// Columns per block
    pub col_block_dim: i64,
    /// Intra-block element order
    pub dir: Direction,
    /// Index base of `row_ptr` and `col_ind`
    pub base: IndexBase,
    /// Block row pointers (length: mb + 1), base-adjusted
    pub row_ptr: Vec<i64>,
    /// Block column index of each stored block, base-adjusted
    pub col_ind: Vec<i64>,
    /// Dense block values (length: nnzb * row_block_dim * col_block_dim)
    pub val: Vec<T>,
}

impl<T: Element> GebsrMatrix<T> {
    /// Create a GEBSR matrix, validating its structure
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - `mb` or `nb` is negative, or a block dimension is < 1
    /// - `row_ptr` length != mb + 1, or its endpoints disagree with the
    ///   base and the block count
    /// - `val` length != nnzb * block area
    /// - a block column index is outside the declared base's valid range
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        mb: i64,
        nb: i64,
        row_block_dim: i64,
        col_block_dim: i64,
        dir: Direction,
        base: IndexBase,
        row_ptr: Vec<i64>,
        col_ind: Vec<i64>,
        val: Vec<T>,
    ) -> Result<Self> {
        if mb < 0 {
            return Err(Error::invalid_size("mb", mb));
        }
        if nb < 0 {
            return Err(Error::invalid_size("nb", nb));
        }
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
        if row_ptr.len() != mb as usize + 1 {
            return Err(Error::invalid_value(
                "row_ptr",
                format!("length {} != mb + 1 = {}", row_ptr.len(), mb + 1),
            ));
        }

        let offset = base.offset();
        let nnzb = col_ind.len() as i64;
        if row_ptr[0] != offset || row_ptr[mb as usize] - offset != nnzb {
            return Err(Error::invalid_value(
                "row_ptr",
                format!(
                    "endpoints [{}, {}] disagree with base {} and nnzb {}",
                    row_ptr[0],
                    row_ptr[mb as usize],
                    base,
                    nnzb
                ),
            ));
        }
        let area = (row_block_dim * col_block_dim) as usize;
        if val.len() != col_ind.len() * area {
            return Err(Error::invalid_value(
                "val",
                format!(
                    "length {} != nnzb {} * block area {}",
                    val.len(),
                    nnzb,
                    area
                ),
            ));
        }
        for &c in &col_ind {
            if c < offset || c - offset >= nb {
                return Err(Error::invalid_value(
                    "col_ind",
                    format!("block index {} out of range for {} block columns ({})", c, nb, base),
                ));
            }
        }

        Ok(Self {
            mb,
            nb,
            row_block_dim,
            col_block_dim,
            dir,
            base,
            row_ptr,
            col_ind,
            val,
        })
    }

    /// Number of stored blocks
    #[inline]
    pub fn nnzb(&self) -> i64 {
        self.col_ind.len() as i64
    }

    /// Elements per block
    #[inline]
    pub fn block_area(&self) -> usize {
        (self.row_block_dim * self.col_block_dim) as usize
    }

    /// Row count of the expanded (padded) matrix
    #[inline]
    pub fn rows(&self) -> i64 {
        self.mb * self.row_block_dim
    }

    /// Column count of the expanded (padded) matrix
    #[inline]
    pub fn cols(&self) -> i64 {
        self.nb * self.col_block_dim
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gebsr_creation() {
        // 2x2 block grid of 2x3 blocks, one block per row
        let gebsr = GebsrMatrix::new(
            2,
            2,
            2,
            3,
            Direction::Row,
            IndexBase::Zero,
            vec![0, 1, 2],
            vec![0, 1],
            vec![1.0f32; 12],
        )
        .unwrap();
        assert_eq!(gebsr.nnzb(), 2);
        assert_eq!(gebsr.block_area(), 6);
        assert_eq!(gebsr.rows(), 4);
        assert_eq!(gebsr.cols(), 6);
    }

    #[test]
    fn test_gebsr_rejects_short_values() {
        let result = GebsrMatrix::new(
            1,
            1,
            2,
            2,
            Direction::Row,
            IndexBase::Zero,
            vec![0, 1],
            vec![0],
            vec![1.0f32; 3], // needs 4
        );
        assert!(matches!(result, Err(Error::InvalidValue { arg: "val", .. })));
    }

    #[test]
    fn test_gebsr_rejects_bad_block_col() {
        let result = GebsrMatrix::new(
            1,
            1,
            1,
            1,
            Direction::Row,
            IndexBase::One,
            vec![1, 2],
            vec![3], // out of range for nb = 1, base 1
            vec![1.0f64],
        );
        assert!(matches!(result, Err(Error::InvalidValue { arg: "col_ind", .. })));
    }

    #[test]
    fn test_gebsr_base_one_endpoints() {
        let gebsr = GebsrMatrix::new(
            1,
            2,
            1,
            1,
            Direction::Column,
            IndexBase::One,
            vec![1, 3],
            vec![1, 2],
            vec![4.0f64, 5.0],
        )
        .unwrap();
        assert_eq!(gebsr.nnzb(), 2);
    }
}
