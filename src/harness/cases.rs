//! Case descriptors, cross-product enumeration, and the isolated driver
//!
//! Each case is an immutable parameter tuple, fully determining one
//! comparison run, executed independently end-to-end: a failing case is
//! reported and never aborts its siblings. Domains deliberately include
//! negative dimensions and zero/negative block dimensions so the
//! invalid-size and invalid-value paths are exercised by enumeration, not
//! only by the dedicated bad-argument probes.

use super::{compare, generator, invoker, oracle};
use crate::blas::{SparseBlas, Status};
use crate::dtype::{DType, Element};
use crate::error::Result;
use crate::formats::{Direction, IndexBase};
use crate::matio;
use crate::runtime::{Runtime, RuntimeClient};

use std::fmt;
use std::path::Path;
use std::time::{Duration, Instant};

use tracing::{debug, warn};

/// The fixed real-world matrix corpus, by file name
pub const MATRIX_FILES: [&str; 7] = [
    "nos1.bin", "nos2.bin", "nos3.bin", "nos4.bin", "nos5.bin", "nos6.bin", "nos7.bin",
];

/// Parameters of one rotation case
#[derive(Debug, Clone, Copy)]
pub struct RotiParams {
    /// Dense vector length
    pub n: i64,
    /// Stored entry count (negative values probe the invalid-size path)
    pub nnz: i64,
    /// Rotation cosine-like scalar
    pub c: f64,
    /// Rotation sine-like scalar
    pub s: f64,
    /// Index base of the sparse vector
    pub base: IndexBase,
}

impl fmt::Display for RotiParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "n{}_nnz{}_c{}_s{}_{}",
            self.n, self.nnz, self.c, self.s, self.base
        )
    }
}

/// Parameters of one expansion case over a generated matrix
#[derive(Debug, Clone, Copy)]
pub struct Gebsr2CsrParams {
    /// Row count of the full matrix (negative values probe invalid-size)
    pub m: i64,
    /// Column count of the full matrix
    pub n: i64,
    /// Rows per block (non-positive values probe invalid-value)
    pub row_block_dim: i64,
    /// Columns per block
    pub col_block_dim: i64,
    /// Index base of the GEBSR input
    pub bsr_base: IndexBase,
    /// Index base of the CSR output
    pub csr_base: IndexBase,
    /// Intra-block layout
    pub dir: Direction,
}

impl fmt::Display for Gebsr2CsrParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "m{}_n{}_rb{}_cb{}_{}_{}_{}",
            self.m,
            self.n,
            self.row_block_dim,
            self.col_block_dim,
            self.bsr_base,
            self.csr_base,
            self.dir
        )
    }
}

/// Parameters of one expansion case over a corpus matrix
#[derive(Debug, Clone, Copy)]
pub struct Gebsr2CsrFileParams {
    /// Corpus file name
    pub filename: &'static str,
    /// Rows per block
    pub row_block_dim: i64,
    /// Columns per block
    pub col_block_dim: i64,
    /// Index base the file is loaded with and the GEBSR input uses
    pub bsr_base: IndexBase,
    /// Index base of the CSR output
    pub csr_base: IndexBase,
    /// Intra-block layout
    pub dir: Direction,
}

impl fmt::Display for Gebsr2CsrFileParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}_rb{}_cb{}_{}_{}_{}",
            self.filename,
            self.row_block_dim,
            self.col_block_dim,
            self.bsr_base,
            self.csr_base,
            self.dir
        )
    }
}

/// Cross product of the rotation parameter domains
pub fn roti_cases() -> Vec<RotiParams> {
    let nnz_range = [-1i64, 0, 100, 2500];
    let scalar_range = [(3.7, 1.2), (1.0, -0.5)];
    let base_range = [IndexBase::Zero, IndexBase::One];

    let mut cases = Vec::new();
    for &nnz in &nnz_range {
        for &(c, s) in &scalar_range {
            for &base in &base_range {
                let n = if nnz > 0 { nnz * 4 } else { 100 };
                cases.push(RotiParams { n, nnz, c, s, base });
            }
        }
    }
    cases
}

/// Cross product of the expansion parameter domains
pub fn gebsr2csr_cases() -> Vec<Gebsr2CsrParams> {
    let m_range = [-1i64, 0, 87, 512];
    let n_range = [-3i64, 62, 293];
    let row_block_dim_range = [0i64, 2, 8];
    let col_block_dim_range = [-1i64, 3, 8];
    let bsr_base_range = [IndexBase::One];
    let csr_base_range = [IndexBase::Zero];
    let dir_range = [Direction::Row, Direction::Column];

    let mut cases = Vec::new();
    for &m in &m_range {
        for &n in &n_range {
            for &row_block_dim in &row_block_dim_range {
                for &col_block_dim in &col_block_dim_range {
                    for &bsr_base in &bsr_base_range {
                        for &csr_base in &csr_base_range {
                            for &dir in &dir_range {
                                cases.push(Gebsr2CsrParams {
                                    m,
                                    n,
                                    row_block_dim,
                                    col_block_dim,
                                    bsr_base,
                                    csr_base,
                                    dir,
                                });
                            }
                        }
                    }
                }
            }
        }
    }
    cases
}

/// Cross product of the corpus matrices with their block/base/direction
/// domains
pub fn gebsr2csr_file_cases() -> Vec<Gebsr2CsrFileParams> {
    let row_block_dim_range = [2i64, 3];
    let col_block_dim_range = [3i64, 4];
    let dir_range = [Direction::Row, Direction::Column];

    let mut cases = Vec::new();
    for &filename in &MATRIX_FILES {
        for &row_block_dim in &row_block_dim_range {
            for &col_block_dim in &col_block_dim_range {
                for &dir in &dir_range {
                    cases.push(Gebsr2CsrFileParams {
                        filename,
                        row_block_dim,
                        col_block_dim,
                        bsr_base: IndexBase::One,
                        csr_base: IndexBase::One,
                        dir,
                    });
                }
            }
        }
    }
    cases
}

/// Outcome of one isolated case
#[derive(Debug)]
pub enum CaseOutcome {
    /// The case ran and every check held
    Passed,
    /// The case failed; siblings keep running
    Failed(crate::error::Error),
}

/// Per-case record produced by [`run_isolated`]
#[derive(Debug)]
pub struct CaseReport {
    /// Case identifier: operation and parameter tuple
    pub name: String,
    /// Numeric type the case ran over
    pub dtype: DType,
    /// Wall-clock time of the full pipeline for this case
    pub elapsed: Duration,
    /// Pass/fail verdict
    pub outcome: CaseOutcome,
}

impl CaseReport {
    /// Returns true if the case passed
    pub fn passed(&self) -> bool {
        matches!(self.outcome, CaseOutcome::Passed)
    }
}

/// Run one case in isolation, capturing its failure instead of
/// propagating it
pub fn run_isolated(
    name: String,
    dtype: DType,
    case: impl FnOnce() -> Result<()>,
) -> CaseReport {
    let start = Instant::now();
    let outcome = match case() {
        Ok(()) => CaseOutcome::Passed,
        Err(e) => {
            warn!(case = %name, dtype = %dtype, error = %e, "case failed");
            CaseOutcome::Failed(e)
        }
    };
    let elapsed = start.elapsed();
    debug!(case = %name, dtype = %dtype, ?elapsed, passed = matches!(outcome, CaseOutcome::Passed), "case finished");

    CaseReport {
        name,
        dtype,
        elapsed,
        outcome,
    }
}

/// Count (passed, failed) over a report list
pub fn summarize(reports: &[CaseReport]) -> (usize, usize) {
    let passed = reports.iter().filter(|r| r.passed()).count();
    (passed, reports.len() - passed)
}

/// Panic with a summary if any case in the list failed
///
/// # Panics
///
/// Panics naming the first failing case and the failure count; the panic
/// is the aggregate verdict, raised only after every case has run.
pub fn assert_all_passed(reports: &[CaseReport]) {
    let (passed, failed) = summarize(reports);
    if failed > 0 {
        let first = reports
            .iter()
            .find_map(|r| match &r.outcome {
                CaseOutcome::Failed(e) => Some(format!("{} [{}]: {}", r.name, r.dtype, e)),
                CaseOutcome::Passed => None,
            })
            .unwrap_or_default();
        panic!("{failed} of {} cases failed (first: {first})", passed + failed);
    }
}

/// Run one rotation case end-to-end
///
/// Degenerate sizes take the single-invocation probe path; everything
/// else runs both invocation paths and compares each of the four output
/// buffers against the oracle.
pub fn run_roti_case<T, R, B>(blas: &B, device: &R::Device, p: &RotiParams) -> Result<()>
where
    T: Element,
    R: Runtime,
    B: SparseBlas<R> + RuntimeClient<R>,
{
    if p.nnz <= 0 {
        let expected = if p.nnz < 0 {
            Status::InvalidSize
        } else {
            Status::Success
        };
        return invoker::probe_roti_status::<T, R, B>(blas, device, p.nnz, p.base, expected);
    }

    let data = generator::roti_data::<T>(p.nnz as usize, p.n, p.base);
    let c = T::from_f64(p.c);
    let s = T::from_f64(p.s);

    let out = invoker::run_roti_dual(blas, device, &data, c, s, p.base)?;

    let mut x_gold = data.x_val.clone();
    let mut y_gold = data.y.clone();
    oracle::roti(&mut x_gold, &data.x_ind, &mut y_gold, c, s, p.base);

    compare::check("x_val (host scalars)", &x_gold, &out.x_host)?;
    compare::check("x_val (device scalars)", &x_gold, &out.x_device)?;
    compare::check("y (host scalars)", &y_gold, &out.y_host)?;
    compare::check("y (device scalars)", &y_gold, &out.y_device)?;
    Ok(())
}

/// Run one generated expansion case end-to-end
pub fn run_gebsr2csr_case<T, R, B>(blas: &B, device: &R::Device, p: &Gebsr2CsrParams) -> Result<()>
where
    T: Element,
    R: Runtime,
    B: SparseBlas<R> + RuntimeClient<R>,
{
    // Degenerate parameters: single invocation against the expected
    // classification, mirroring the contract's validation order
    if p.m < 0 || p.n < 0 {
        return invoker::probe_gebsr2csr_status::<T, R, B>(
            blas,
            device,
            p.dir,
            p.m,
            p.n,
            p.row_block_dim,
            p.col_block_dim,
            p.bsr_base,
            p.csr_base,
            Status::InvalidSize,
        );
    }
    if p.m == 0 || p.n == 0 {
        return invoker::probe_gebsr2csr_status::<T, R, B>(
            blas,
            device,
            p.dir,
            p.m,
            p.n,
            p.row_block_dim,
            p.col_block_dim,
            p.bsr_base,
            p.csr_base,
            Status::Success,
        );
    }
    if p.row_block_dim < 1 || p.col_block_dim < 1 {
        return invoker::probe_gebsr2csr_status::<T, R, B>(
            blas,
            device,
            p.dir,
            p.m,
            p.n,
            p.row_block_dim,
            p.col_block_dim,
            p.bsr_base,
            p.csr_base,
            Status::InvalidValue,
        );
    }

    let mb = (p.m + p.row_block_dim - 1) / p.row_block_dim;
    let nb = (p.n + p.col_block_dim - 1) / p.col_block_dim;
    let a = generator::gebsr_random::<T>(
        mb,
        nb,
        p.row_block_dim,
        p.col_block_dim,
        p.dir,
        p.bsr_base,
    );

    let (host_path, device_path) = invoker::run_gebsr2csr_dual(blas, device, &a, p.csr_base)?;
    let gold = oracle::gebsr_to_csr(&a, p.csr_base);

    compare::check("csr_row_ptr (host path)", &gold.row_ptr, &host_path.row_ptr)?;
    compare::check("csr_col_ind (host path)", &gold.col_ind, &host_path.col_ind)?;
    compare::check("csr_val (host path)", &gold.val, &host_path.val)?;
    compare::check("csr_row_ptr (device path)", &gold.row_ptr, &device_path.row_ptr)?;
    compare::check("csr_col_ind (device path)", &gold.col_ind, &device_path.col_ind)?;
    compare::check("csr_val (device path)", &gold.val, &device_path.val)?;
    Ok(())
}

/// Run one corpus-backed expansion case end-to-end
///
/// Loads the named matrix with the case's index base, decomposes it into
/// GEBSR blocks, then follows the same dual-path pipeline as generated
/// cases.
pub fn run_gebsr2csr_file_case<T, R, B>(
    blas: &B,
    device: &R::Device,
    corpus: &Path,
    p: &Gebsr2CsrFileParams,
) -> Result<()>
where
    T: Element,
    R: Runtime,
    B: SparseBlas<R> + RuntimeClient<R>,
{
    let path = corpus.join(p.filename);
    let csr = matio::read_csr::<T>(&path, p.bsr_base)?;
    let a = csr.to_gebsr(p.dir, p.row_block_dim, p.col_block_dim, p.bsr_base)?;

    let (host_path, device_path) = invoker::run_gebsr2csr_dual(blas, device, &a, p.csr_base)?;
    let gold = oracle::gebsr_to_csr(&a, p.csr_base);

    compare::check("csr_row_ptr (host path)", &gold.row_ptr, &host_path.row_ptr)?;
    compare::check("csr_col_ind (host path)", &gold.col_ind, &host_path.col_ind)?;
    compare::check("csr_val (host path)", &gold.val, &host_path.val)?;
    compare::check("csr_row_ptr (device path)", &gold.row_ptr, &device_path.row_ptr)?;
    compare::check("csr_col_ind (device path)", &gold.col_ind, &device_path.col_ind)?;
    compare::check("csr_val (device path)", &gold.val, &device_path.val)?;
    Ok(())
}
