//! Binary matrix file corpus
//!
//! The corpus format is a little-endian dump of a base-0 CSR matrix:
//!
//! ```text
//! magic   8 bytes  "SPCHKCSR"
//! nrow    i64
//! ncol    i64
//! nnz     i64
//! row_ptr i64 x (nrow + 1)
//! col_ind i64 x nnz
//! val     f64 x nnz
//! ```
//!
//! Values are stored as f64 regardless of the dtype a case runs over; the
//! loader narrows through [`Element::from_f64`] and applies the caller's
//! requested index base.

use crate::dtype::Element;
use crate::error::{Error, Result};
use crate::formats::{CsrMatrix, IndexBase};

use std::fs;
use std::path::{Path, PathBuf};

/// File magic identifying the corpus format
pub const MAGIC: &[u8; 8] = b"SPCHKCSR";

/// Environment variable naming the corpus directory
pub const MATRIX_DIR_ENV: &str = "SPARSECHECK_MATRIX_DIR";

/// Resolve the corpus directory
///
/// An explicit path wins; otherwise the `SPARSECHECK_MATRIX_DIR`
/// environment variable is consulted. Returns `None` when neither names a
/// directory, which callers treat as "no corpus available".
pub fn corpus_dir(explicit: Option<&Path>) -> Option<PathBuf> {
    let dir = match explicit {
        Some(p) => p.to_path_buf(),
        None => PathBuf::from(std::env::var_os(MATRIX_DIR_ENV)?),
    };
    dir.is_dir().then_some(dir)
}

/// Write a matrix to the corpus format
///
/// The matrix is normalized to base 0 on disk; whatever base it carries in
/// memory is not persisted.
pub fn write_csr(path: &Path, m: &CsrMatrix<f64>) -> Result<()> {
    let m = m.to_base(IndexBase::Zero);

    let mut bytes = Vec::with_capacity(
        MAGIC.len() + 3 * 8 + (m.row_ptr.len() + m.col_ind.len() + m.val.len()) * 8,
    );
    bytes.extend_from_slice(MAGIC);
    bytes.extend_from_slice(&m.nrow.to_le_bytes());
    bytes.extend_from_slice(&m.ncol.to_le_bytes());
    bytes.extend_from_slice(&m.nnz().to_le_bytes());
    for p in &m.row_ptr {
        bytes.extend_from_slice(&p.to_le_bytes());
    }
    for c in &m.col_ind {
        bytes.extend_from_slice(&c.to_le_bytes());
    }
    for v in &m.val {
        bytes.extend_from_slice(&v.to_le_bytes());
    }

    fs::write(path, bytes).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Read a matrix from the corpus format, with the requested index base
pub fn read_csr_f64(path: &Path, base: IndexBase) -> Result<CsrMatrix<f64>> {
    let bytes = fs::read(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut reader = Reader {
        path,
        bytes: &bytes,
        pos: 0,
    };

    let magic = reader.take(8)?;
    if magic != MAGIC {
        return Err(reader.malformed("bad magic"));
    }

    let nrow = reader.read_i64()?;
    let ncol = reader.read_i64()?;
    let nnz = reader.read_i64()?;
    if nrow < 0 || ncol < 0 || nnz < 0 {
        return Err(reader.malformed("negative dimension in header"));
    }

    let row_ptr = reader.read_i64_vec(nrow as usize + 1)?;
    let col_ind = reader.read_i64_vec(nnz as usize)?;
    let val = reader.read_f64_vec(nnz as usize)?;
    if reader.pos != bytes.len() {
        return Err(reader.malformed("trailing bytes after values"));
    }

    let csr = CsrMatrix::new(nrow, ncol, row_ptr, col_ind, val, IndexBase::Zero)
        .map_err(|e| Error::MalformedFile {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
    Ok(csr.to_base(base))
}

/// Read a matrix, narrowing the stored f64 values to `T`
pub fn read_csr<T: Element>(path: &Path, base: IndexBase) -> Result<CsrMatrix<T>> {
    let m = read_csr_f64(path, base)?;
    Ok(CsrMatrix {
        nrow: m.nrow,
        ncol: m.ncol,
        row_ptr: m.row_ptr,
        col_ind: m.col_ind,
        val: m.val.iter().map(|&v| T::from_f64(v)).collect(),
        base: m.base,
    })
}

struct Reader<'a> {
    path: &'a Path,
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn malformed(&self, reason: &str) -> Error {
        Error::MalformedFile {
            path: self.path.to_path_buf(),
            reason: reason.to_string(),
        }
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8]> {
        if self.pos + len > self.bytes.len() {
            return Err(self.malformed("unexpected end of file"));
        }
        let out = &self.bytes[self.pos..self.pos + len];
        self.pos += len;
        Ok(out)
    }

    fn read_i64(&mut self) -> Result<i64> {
        let raw = self.take(8)?;
        Ok(i64::from_le_bytes(raw.try_into().expect("8-byte slice")))
    }

    fn read_i64_vec(&mut self, len: usize) -> Result<Vec<i64>> {
        let raw = self.take(len * 8)?;
        Ok(raw
            .chunks_exact(8)
            .map(|c| i64::from_le_bytes(c.try_into().expect("8-byte chunk")))
            .collect())
    }

    fn read_f64_vec(&mut self, len: usize) -> Result<Vec<f64>> {
        let raw = self.take(len * 8)?;
        Ok(raw
            .chunks_exact(8)
            .map(|c| f64::from_le_bytes(c.try_into().expect("8-byte chunk")))
            .collect())
    }
}
