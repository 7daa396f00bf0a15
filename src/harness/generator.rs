//! Deterministic input generation
//!
//! Every generation function seeds its own RNG, so regenerating with the
//! same parameters reproduces byte-identical data. One generation is
//! therefore shared between the gold, host-path, and device-path copies of
//! a case.

use crate::dtype::Element;
use crate::formats::{CsrMatrix, Direction, GebsrMatrix, IndexBase};

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::index::sample;
use rand::Rng;
use rand_distr::{Distribution, Uniform};

/// Fixed generation seed
pub const SEED: u64 = 12345;

/// Inputs for one rotation case
#[derive(Debug, Clone)]
pub struct RotiData<T> {
    /// Indices of the sparse vector's stored entries, base-adjusted,
    /// strictly increasing
    pub x_ind: Vec<i64>,
    /// Values of the sparse vector's stored entries
    pub x_val: Vec<T>,
    /// The dense vector
    pub y: Vec<T>,
}

/// Sample `nnz` distinct positions of an `n`-element vector
///
/// Returned indices are strictly increasing and carry the requested base.
/// Requires `nnz <= n`.
pub fn init_index(rng: &mut StdRng, nnz: usize, n: i64, base: IndexBase) -> Vec<i64> {
    let mut picked = sample(rng, n as usize, nnz).into_vec();
    picked.sort_unstable();
    picked.into_iter().map(|i| i as i64 + base.offset()).collect()
}

/// Fill a vector with values uniform over [1, 10)
///
/// Complex types get independently sampled real and imaginary parts.
pub fn init_values<T: Element>(rng: &mut StdRng, len: usize) -> Vec<T> {
    let dist = Uniform::new(1.0, 10.0).unwrap();
    (0..len)
        .map(|_| {
            let re = dist.sample(rng);
            let im = dist.sample(rng);
            T::from_parts(re, im)
        })
        .collect()
}

/// Generate the inputs for one rotation case
///
/// Deterministic in (`nnz`, `n`, `base`): indices first, then x values,
/// then y values, all from one freshly seeded stream.
pub fn roti_data<T: Element>(nnz: usize, n: i64, base: IndexBase) -> RotiData<T> {
    debug_assert!(nnz as i64 <= n, "nnz must not exceed the dense length");
    let mut rng = StdRng::seed_from_u64(SEED);

    let x_ind = init_index(&mut rng, nnz, n, base);
    let x_val = init_values(&mut rng, nnz);
    let y = init_values(&mut rng, n as usize);

    RotiData { x_ind, x_val, y }
}

/// Generate a random GEBSR matrix with `mb` x `nb` block grid
///
/// Each block row stores between 1 and min(`nb`, 5) blocks at distinct,
/// increasing block columns; block values are dense and non-zero, laid out
/// per `dir`. Deterministic in all parameters. Requires `mb >= 1`,
/// `nb >= 1` and block dimensions >= 1.
pub fn gebsr_random<T: Element>(
    mb: i64,
    nb: i64,
    row_block_dim: i64,
    col_block_dim: i64,
    dir: Direction,
    base: IndexBase,
) -> GebsrMatrix<T> {
    let mut rng = StdRng::seed_from_u64(SEED);
    let offset = base.offset();
    let area = (row_block_dim * col_block_dim) as usize;
    let max_per_row = nb.min(5) as usize;

    let mut row_ptr = Vec::with_capacity(mb as usize + 1);
    let mut col_ind = Vec::new();
    row_ptr.push(offset);

    for _ in 0..mb {
        let k = rng.random_range(1..=max_per_row);
        let mut cols = sample(&mut rng, nb as usize, k).into_vec();
        cols.sort_unstable();
        col_ind.extend(cols.into_iter().map(|c| c as i64 + offset));
        row_ptr.push(col_ind.len() as i64 + offset);
    }

    let val = init_values(&mut rng, col_ind.len() * area);

    GebsrMatrix {
        mb,
        nb,
        row_block_dim,
        col_block_dim,
        dir,
        base,
        row_ptr,
        col_ind,
        val,
    }
}

/// Generate a random CSR matrix
///
/// Each row stores between 0 and min(`ncol`, 6) entries. The seed is a
/// parameter so a corpus of distinct fixture matrices can be produced;
/// generation is deterministic in (`nrow`, `ncol`, `base`, `seed`).
pub fn csr_random<T: Element>(nrow: i64, ncol: i64, base: IndexBase, seed: u64) -> CsrMatrix<T> {
    let mut rng = StdRng::seed_from_u64(seed);
    let offset = base.offset();
    let max_per_row = ncol.min(6) as usize;

    let mut row_ptr = Vec::with_capacity(nrow as usize + 1);
    let mut col_ind = Vec::new();
    row_ptr.push(offset);

    for _ in 0..nrow {
        let k = rng.random_range(0..=max_per_row);
        let mut cols = sample(&mut rng, ncol as usize, k).into_vec();
        cols.sort_unstable();
        col_ind.extend(cols.into_iter().map(|c| c as i64 + offset));
        row_ptr.push(col_ind.len() as i64 + offset);
    }

    let val = init_values(&mut rng, col_ind.len());

    CsrMatrix {
        nrow,
        ncol,
        row_ptr,
        col_ind,
        val,
        base,
    }
}
