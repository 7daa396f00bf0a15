//! # sparsecheck
//!
//! **Correctness validation for sparse linear algebra routines that run on
//! device accelerators.**
//!
//! sparsecheck compares device-computed results against an independent
//! host-side reference. The crate is built around a generic verification
//! harness that:
//!
//! - generates or loads sparse matrix inputs across storage formats
//!   (CSR, BSR, GEBSR) and numeric types (real/complex, single/double),
//! - drives the same logical operation through two invocation conventions
//!   (host-resident vs device-resident scalar operands),
//! - computes the expected output with a straightforward sequential oracle,
//! - compares every output buffer element-wise, reporting the first
//!   divergence.
//!
//! The device sparse BLAS library itself is an external collaborator: it is
//! reached through the [`blas::SparseBlas`] call contract and the
//! [`runtime::Runtime`] memory contract. A [`runtime::cpu::CpuRuntime`]
//! reference backend implements both in software, so the harness runs
//! end-to-end without hardware; a real GPU backend plugs in by implementing
//! the same two traits.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use sparsecheck::prelude::*;
//! use sparsecheck::harness::cases::{self, run_isolated};
//!
//! let device = CpuRuntime::default_device();
//! let client = CpuRuntime::default_client(&device);
//!
//! let reports: Vec<_> = cases::roti_cases()
//!     .iter()
//!     .map(|p| {
//!         run_isolated(format!("roti_{p}"), DType::F64, || {
//!             cases::run_roti_case::<f64, _, _>(&client, &device, p)
//!         })
//!     })
//!     .collect();
//! cases::assert_all_passed(&reports);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod blas;
pub mod dtype;
pub mod error;
pub mod formats;
pub mod harness;
pub mod matio;
pub mod runtime;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::blas::{Handle, ScalarArg, SparseBlas, Status};
    pub use crate::dtype::{DType, Element};
    pub use crate::error::{Error, Result};
    pub use crate::formats::{CsrMatrix, Direction, GebsrMatrix, IndexBase};
    pub use crate::runtime::cpu::CpuRuntime;
    pub use crate::runtime::{Device, DeviceBuffer, Runtime, RuntimeClient};
}
