//! Dual-path invocation of the operation under test
//!
//! Every full case runs the same logical operation twice: once with
//! host-resident scalar operands, once with device-resident ones, on two
//! independent copies of all mutable operands so the paths cannot
//! cross-contaminate. Degenerate cases (zero or negative sizes) instead
//! run a single invocation against an expected status, with small
//! non-empty buffers in every slot.

use super::generator::RotiData;
use crate::blas::{Handle, ScalarArg, SparseBlas, Status};
use crate::dtype::Element;
use crate::error::{Error, Result};
use crate::formats::device::{DeviceCsr, DeviceGebsr};
use crate::formats::{CsrMatrix, Direction, GebsrMatrix, IndexBase};
use crate::runtime::{DeviceBuffer, Runtime, RuntimeClient};

/// Buffer length used for probes that never read their buffers
pub const SAFE_SIZE: usize = 100;

/// Check a returned status against the one the case expects
pub fn expect_status(call: &'static str, expected: Status, got: Status) -> Result<()> {
    if got == expected {
        Ok(())
    } else {
        Err(Error::unexpected_status(call, expected, got))
    }
}

/// Downloaded outputs of both rotation paths
#[derive(Debug)]
pub struct RotiOutputs<T> {
    /// x values after the host-scalar invocation
    pub x_host: Vec<T>,
    /// y after the host-scalar invocation
    pub y_host: Vec<T>,
    /// x values after the device-scalar invocation
    pub x_device: Vec<T>,
    /// y after the device-scalar invocation
    pub y_device: Vec<T>,
}

/// Run the rotation through both invocation paths
///
/// Uploads the generated data once per path (identical logical inputs),
/// plus one shared index buffer; both invocations must report `Success`.
/// Downloads complete before this returns, so the outputs are safe to
/// compare immediately.
pub fn run_roti_dual<T, R, B>(
    blas: &B,
    device: &R::Device,
    data: &RotiData<T>,
    c: T,
    s: T,
    idx_base: IndexBase,
) -> Result<RotiOutputs<T>>
where
    T: Element,
    R: Runtime,
    B: SparseBlas<R> + RuntimeClient<R>,
{
    let handle = Handle::<R>::new(device);
    let nnz = data.x_val.len() as i64;

    let x_ind = DeviceBuffer::from_slice(&data.x_ind, device, "x_ind")?;
    let mut x_val_1 = DeviceBuffer::from_slice(&data.x_val, device, "x_val_1")?;
    let mut x_val_2 = DeviceBuffer::from_slice(&data.x_val, device, "x_val_2")?;
    let mut y_1 = DeviceBuffer::from_slice(&data.y, device, "y_1")?;
    let mut y_2 = DeviceBuffer::from_slice(&data.y, device, "y_2")?;
    let d_c = DeviceBuffer::from_slice(&[c], device, "c")?;
    let d_s = DeviceBuffer::from_slice(&[s], device, "s")?;

    let status = blas.roti(
        Some(&handle),
        nnz,
        Some(&mut x_val_1),
        Some(&x_ind),
        Some(&mut y_1),
        Some(ScalarArg::Host(&c)),
        Some(ScalarArg::Host(&s)),
        idx_base,
    );
    expect_status("roti(host scalars)", Status::Success, status)?;

    let status = blas.roti(
        Some(&handle),
        nnz,
        Some(&mut x_val_2),
        Some(&x_ind),
        Some(&mut y_2),
        Some(ScalarArg::Device(&d_c)),
        Some(ScalarArg::Device(&d_s)),
        idx_base,
    );
    expect_status("roti(device scalars)", Status::Success, status)?;

    // Hard synchronization point before any host-side read
    blas.synchronize();

    Ok(RotiOutputs {
        x_host: x_val_1.to_vec(),
        y_host: y_1.to_vec(),
        x_device: x_val_2.to_vec(),
        y_device: y_2.to_vec(),
    })
}

/// Single-invocation probe for degenerate rotation sizes
///
/// Allocates `SAFE_SIZE` buffers in every slot, invokes once with host
/// scalars, and checks the returned status; no outputs are compared.
pub fn probe_roti_status<T, R, B>(
    blas: &B,
    device: &R::Device,
    nnz: i64,
    idx_base: IndexBase,
    expected: Status,
) -> Result<()>
where
    T: Element,
    R: Runtime,
    B: SparseBlas<R>,
{
    let handle = Handle::<R>::new(device);

    let mut x_val = DeviceBuffer::<T, R>::alloc(SAFE_SIZE, device, "x_val")?;
    let x_ind = DeviceBuffer::<i64, R>::alloc(SAFE_SIZE, device, "x_ind")?;
    let mut y = DeviceBuffer::<T, R>::alloc(SAFE_SIZE, device, "y")?;
    let c = T::from_f64(3.7);
    let s = T::from_f64(1.2);

    let status = blas.roti(
        Some(&handle),
        nnz,
        Some(&mut x_val),
        Some(&x_ind),
        Some(&mut y),
        Some(ScalarArg::Host(&c)),
        Some(ScalarArg::Host(&s)),
        idx_base,
    );
    expect_status("roti(degenerate size)", expected, status)
}

/// Run the expansion through both invocation paths
///
/// The conversion takes no scalar operands, so the two paths differ only
/// in their independent output buffer sets; both must report `Success`.
/// Returns the downloaded, validated CSR result of each path.
pub fn run_gebsr2csr_dual<T, R, B>(
    blas: &B,
    device: &R::Device,
    a: &GebsrMatrix<T>,
    csr_base: IndexBase,
) -> Result<(CsrMatrix<T>, CsrMatrix<T>)>
where
    T: Element,
    R: Runtime,
    B: SparseBlas<R> + RuntimeClient<R>,
{
    let handle = Handle::<R>::new(device);
    let dev_a = DeviceGebsr::<T, R>::upload(a, device)?;

    let nrow = a.rows();
    let nnz = a.nnzb() as usize * a.block_area();
    let mut out_1 = DeviceCsr::<T, R>::alloc(nrow, nnz, device)?;
    let mut out_2 = DeviceCsr::<T, R>::alloc(nrow, nnz, device)?;

    for (label, out) in [
        ("gebsr2csr(host path)", &mut out_1),
        ("gebsr2csr(device path)", &mut out_2),
    ] {
        let status = blas.gebsr2csr(
            Some(&handle),
            a.dir,
            a.mb,
            a.nb,
            a.base,
            Some(&dev_a.val),
            Some(&dev_a.row_ptr),
            Some(&dev_a.col_ind),
            a.row_block_dim,
            a.col_block_dim,
            csr_base,
            Some(&mut out.val),
            Some(&mut out.row_ptr),
            Some(&mut out.col_ind),
        );
        expect_status(label, Status::Success, status)?;
    }

    // Hard synchronization point before any host-side read
    blas.synchronize();

    let ncol = a.cols();
    Ok((
        out_1.download(nrow, ncol, csr_base)?,
        out_2.download(nrow, ncol, csr_base)?,
    ))
}

/// Single-invocation probe for degenerate expansion parameters
#[allow(clippy::too_many_arguments)]
pub fn probe_gebsr2csr_status<T, R, B>(
    blas: &B,
    device: &R::Device,
    dir: Direction,
    mb: i64,
    nb: i64,
    row_block_dim: i64,
    col_block_dim: i64,
    bsr_base: IndexBase,
    csr_base: IndexBase,
    expected: Status,
) -> Result<()>
where
    T: Element,
    R: Runtime,
    B: SparseBlas<R>,
{
    let handle = Handle::<R>::new(device);

    let bsr_val = DeviceBuffer::<T, R>::alloc(SAFE_SIZE, device, "bsr_val")?;
    let bsr_row_ptr = DeviceBuffer::<i64, R>::alloc(SAFE_SIZE, device, "bsr_row_ptr")?;
    let bsr_col_ind = DeviceBuffer::<i64, R>::alloc(SAFE_SIZE, device, "bsr_col_ind")?;
    let mut csr_val = DeviceBuffer::<T, R>::alloc(SAFE_SIZE, device, "csr_val")?;
    let mut csr_row_ptr = DeviceBuffer::<i64, R>::alloc(SAFE_SIZE, device, "csr_row_ptr")?;
    let mut csr_col_ind = DeviceBuffer::<i64, R>::alloc(SAFE_SIZE, device, "csr_col_ind")?;

    let status = blas.gebsr2csr(
        Some(&handle),
        dir,
        mb,
        nb,
        bsr_base,
        Some(&bsr_val),
        Some(&bsr_row_ptr),
        Some(&bsr_col_ind),
        row_block_dim,
        col_block_dim,
        csr_base,
        Some(&mut csr_val),
        Some(&mut csr_row_ptr),
        Some(&mut csr_col_ind),
    );
    expect_status("gebsr2csr(degenerate size)", expected, status)
}
