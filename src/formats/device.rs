//! Device-resident mirrors of the host matrix types
//!
//! Mirrors are produced by explicit upload and read back by explicit
//! download; they never alias host memory. Buffers are dropped with the
//! struct at case end.

use super::{CsrMatrix, GebsrMatrix, IndexBase};
use crate::dtype::Element;
use crate::error::Result;
use crate::runtime::{DeviceBuffer, Runtime};

/// A GEBSR matrix with its buffers in device memory
#[derive(Debug)]
pub struct DeviceGebsr<T: Element, R: Runtime> {
    /// Block row pointers (mb + 1 entries)
    pub row_ptr: DeviceBuffer<i64, R>,
    /// Block column indices (nnzb entries)
    pub col_ind: DeviceBuffer<i64, R>,
    /// Dense block values (nnzb x block area entries)
    pub val: DeviceBuffer<T, R>,
}

impl<T: Element, R: Runtime> DeviceGebsr<T, R> {
    /// Upload a host GEBSR matrix
    pub fn upload(host: &GebsrMatrix<T>, device: &R::Device) -> Result<Self> {
        Ok(Self {
            row_ptr: DeviceBuffer::from_slice(&host.row_ptr, device, "bsr_row_ptr")?,
            col_ind: DeviceBuffer::from_slice(&host.col_ind, device, "bsr_col_ind")?,
            val: DeviceBuffer::from_slice(&host.val, device, "bsr_val")?,
        })
    }
}

/// A CSR matrix with its buffers in device memory
///
/// Used as the output side of the expansion: buffers are pre-sized and
/// zeroed, filled by the library call, then downloaded for comparison.
#[derive(Debug)]
pub struct DeviceCsr<T: Element, R: Runtime> {
    /// Row pointers (nrow + 1 entries)
    pub row_ptr: DeviceBuffer<i64, R>,
    /// Column indices (nnz entries)
    pub col_ind: DeviceBuffer<i64, R>,
    /// Entry values (nnz entries)
    pub val: DeviceBuffer<T, R>,
}

impl<T: Element, R: Runtime> DeviceCsr<T, R> {
    /// Allocate zeroed output buffers for `nrow` rows and `nnz` entries
    pub fn alloc(nrow: i64, nnz: usize, device: &R::Device) -> Result<Self> {
        Ok(Self {
            row_ptr: DeviceBuffer::alloc(nrow as usize + 1, device, "csr_row_ptr")?,
            col_ind: DeviceBuffer::alloc(nnz, device, "csr_col_ind")?,
            val: DeviceBuffer::alloc(nnz, device, "csr_val")?,
        })
    }

    /// Download into a validated host CSR matrix
    pub fn download(&self, nrow: i64, ncol: i64, base: IndexBase) -> Result<CsrMatrix<T>> {
        CsrMatrix::new(
            nrow,
            ncol,
            self.row_ptr.to_vec(),
            self.col_ind.to_vec(),
            self.val.to_vec(),
            base,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::Direction;
    use crate::runtime::Runtime as _;
    use crate::runtime::cpu::CpuRuntime;

    #[test]
    fn test_gebsr_upload_round_trip() {
        let device = CpuRuntime::default_device();
        let host = GebsrMatrix::new(
            1,
            2,
            1,
            2,
            Direction::Row,
            IndexBase::Zero,
            vec![0, 2],
            vec![0, 1],
            vec![1.0f32, 2.0, 3.0, 4.0],
        )
        .unwrap();

        let dev = DeviceGebsr::<f32, CpuRuntime>::upload(&host, &device).unwrap();
        assert_eq!(dev.row_ptr.to_vec(), host.row_ptr);
        assert_eq!(dev.col_ind.to_vec(), host.col_ind);
        assert_eq!(dev.val.to_vec(), host.val);
    }

    #[test]
    fn test_csr_alloc_and_download_empty_rows() {
        let device = CpuRuntime::default_device();
        let dev = DeviceCsr::<f64, CpuRuntime>::alloc(2, 0, &device).unwrap();
        // Zeroed row pointers form a valid empty base-0 matrix
        let host = dev.download(2, 3, IndexBase::Zero).unwrap();
        assert_eq!(host.nnz(), 0);
        assert_eq!(host.row_ptr, vec![0, 0, 0]);
    }
}
