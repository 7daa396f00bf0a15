//! The fixed call contract of the device sparse library
//!
//! The library under verification is an external collaborator; this module
//! publishes the exact surface the harness drives. A backend participates
//! by implementing [`SparseBlas`] for its runtime's client type. The CPU
//! reference implementation lives in
//! [`runtime::cpu`](crate::runtime::cpu).
//!
//! Nullable arguments are `Option`s: the invalid-argument probe set passes
//! `None` at each required position in turn and expects a precise status
//! per argument. Scalar residency is explicit per call through
//! [`ScalarArg`], so both invocation paths of a case are referentially
//! transparent rather than depending on sticky handle state.

mod handle;
mod status;

pub use handle::Handle;
pub use status::Status;

use crate::dtype::Element;
use crate::formats::{Direction, IndexBase};
use crate::runtime::{DeviceBuffer, Runtime};

/// A scalar operand, resident on the host or on the device
///
/// Device-resident scalars are single-element buffers; the backend reads
/// them through a device copy before use. The dual-path invoker runs every
/// operation once with each variant.
#[derive(Debug)]
pub enum ScalarArg<'a, T: Element, R: Runtime> {
    /// Scalar supplied as a host-resident value
    Host(&'a T),
    /// Scalar supplied as a device-resident single-element buffer
    Device(&'a DeviceBuffer<T, R>),
}

impl<'a, T: Element, R: Runtime> ScalarArg<'a, T, R> {
    /// Resolve the scalar to a host value
    ///
    /// Returns `None` for a zero-length device buffer, which backends
    /// treat as a missing required argument.
    pub fn read(&self) -> Option<T> {
        match self {
            ScalarArg::Host(v) => Some(**v),
            ScalarArg::Device(buf) => buf.to_vec().first().copied(),
        }
    }

    /// Returns true if the scalar is device-resident
    pub fn is_device(&self) -> bool {
        matches!(self, ScalarArg::Device(_))
    }
}

/// What a backend tolerates, consulted by the invalid-argument probes
///
/// Some vendor backends accept null pointers where the contract says
/// `InvalidPointer`; probing them would report false failures. The flag
/// replaces a compile-time platform check with an explicit capability.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlasCapabilities {
    /// Backend accepts null required buffers without reporting
    /// `InvalidPointer`
    pub tolerates_null_args: bool,
}

/// Operations of the device sparse library under verification
///
/// One method per routine, with the fixed signature the harness drives:
/// (handle, size parameters, typed buffers, index-base and direction
/// enums) in, [`Status`] out. Implementations must validate arguments in
/// this order: handle, sizes, block dimensions, buffers, scalars; and must
/// quick-return `Success` for zero-sized problems without touching any
/// buffer.
pub trait SparseBlas<R: Runtime> {
    /// What this backend tolerates
    fn capabilities(&self) -> BlasCapabilities {
        BlasCapabilities::default()
    }

    /// Apply a Givens rotation to a sparse vector and a dense vector
    ///
    /// For each stored entry `i` with `idx = x_ind[i] - idx_base`:
    ///
    /// ```text
    /// x_val[i] = c * x_val[i] + s * y[idx]
    /// y[idx]   = c * y[idx]   - s * x_val[i] (pre-update value)
    /// ```
    ///
    /// applied in storage order; entries sharing an index accumulate
    /// sequentially, last write wins per source ordering.
    #[allow(clippy::too_many_arguments)]
    fn roti<T: Element>(
        &self,
        handle: Option<&Handle<R>>,
        nnz: i64,
        x_val: Option<&mut DeviceBuffer<T, R>>,
        x_ind: Option<&DeviceBuffer<i64, R>>,
        y: Option<&mut DeviceBuffer<T, R>>,
        c: Option<ScalarArg<'_, T, R>>,
        s: Option<ScalarArg<'_, T, R>>,
        idx_base: IndexBase,
    ) -> Status;

    /// Expand a GEBSR matrix into CSR
    ///
    /// Every element (r, c) of every stored block at (block_row,
    /// block_col) lands at the flat coordinate
    /// `(block_row * row_block_dim + r, block_col * col_block_dim + c)`,
    /// value preserved (explicit zeros included), adjusting between
    /// `bsr_base` and `csr_base` and honoring `dir` for the intra-block
    /// layout. Output buffers must be pre-sized by the caller:
    /// `csr_row_ptr` holds `mb * row_block_dim + 1` entries, `csr_val` and
    /// `csr_col_ind` hold `nnzb * row_block_dim * col_block_dim`.
    #[allow(clippy::too_many_arguments)]
    fn gebsr2csr<T: Element>(
        &self,
        handle: Option<&Handle<R>>,
        dir: Direction,
        mb: i64,
        nb: i64,
        bsr_base: IndexBase,
        bsr_val: Option<&DeviceBuffer<T, R>>,
        bsr_row_ptr: Option<&DeviceBuffer<i64, R>>,
        bsr_col_ind: Option<&DeviceBuffer<i64, R>>,
        row_block_dim: i64,
        col_block_dim: i64,
        csr_base: IndexBase,
        csr_val: Option<&mut DeviceBuffer<T, R>>,
        csr_row_ptr: Option<&mut DeviceBuffer<i64, R>>,
        csr_col_ind: Option<&mut DeviceBuffer<i64, R>>,
    ) -> Status;
}
