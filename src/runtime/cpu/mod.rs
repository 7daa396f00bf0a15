//! CPU reference backend
//!
//! Implements the [`Runtime`](crate::runtime::Runtime) memory contract and
//! the [`SparseBlas`](crate::blas::SparseBlas) operation contract in
//! software. "Device" memory is separate zeroed heap allocations, so device
//! buffers never alias the host vectors that feed them; the operations run
//! the same sequential arithmetic a well-behaved device library performs.
//!
//! This backend is what makes the harness exercisable end-to-end without
//! hardware; it is also the strict reference for argument validation
//! (`tolerates_null_args` is false).

mod blas;
mod client;
mod device;
mod kernels;
mod runtime;

pub use client::CpuClient;
pub use device::CpuDevice;
pub use runtime::CpuRuntime;
