//! Error types for sparsecheck

use crate::blas::Status;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using sparsecheck's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building inputs or verifying a case
///
/// Library [`Status`] codes are data, not errors: the harness checks the
/// status returned by every invocation and converts an unexpected one into
/// [`Error::UnexpectedStatus`] naming the offending call.
#[derive(Error, Debug)]
pub enum Error {
    /// Negative or inconsistent dimension
    #[error("Invalid size: {arg} = {value}")]
    InvalidSize {
        /// The argument name
        arg: &'static str,
        /// The offending value
        value: i64,
    },

    /// Bad block dimension or scalar configuration
    #[error("Invalid value for '{arg}': {reason}")]
    InvalidValue {
        /// The argument name
        arg: &'static str,
        /// Reason for invalidity
        reason: String,
    },

    /// Required buffer missing
    #[error("Required buffer '{arg}' is null")]
    InvalidPointer {
        /// The argument name
        arg: &'static str,
    },

    /// Missing library context
    #[error("Library handle is null or invalid")]
    InvalidHandle,

    /// Host or device memory exhausted; fatal for the current case
    #[error("Allocation of {size} bytes failed for '{what}'")]
    AllocFailed {
        /// What the allocation was for
        what: &'static str,
        /// Requested size in bytes
        size: usize,
    },

    /// Oracle vs. computed divergence
    #[error("Mismatch in '{buffer}' at index {index}: expected {expected}, got {actual}")]
    Mismatch {
        /// Which output buffer diverged
        buffer: String,
        /// First differing index
        index: usize,
        /// Expected (oracle) value, debug-formatted
        expected: String,
        /// Actual (computed) value, debug-formatted
        actual: String,
    },

    /// A library call returned a status other than the expected one
    #[error("Call '{call}' returned {got}, expected {expected}")]
    UnexpectedStatus {
        /// The offending call
        call: &'static str,
        /// The status the case expected
        expected: Status,
        /// The status the library returned
        got: Status,
    },

    /// I/O failure while reading or writing a matrix file
    #[error("I/O error on {path:?}")]
    Io {
        /// The file involved
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Matrix file exists but its contents are not well-formed
    #[error("Malformed matrix file {path:?}: {reason}")]
    MalformedFile {
        /// The file involved
        path: PathBuf,
        /// What was wrong with it
        reason: String,
    },
}

impl Error {
    /// Create an invalid-size error
    pub fn invalid_size(arg: &'static str, value: i64) -> Self {
        Self::InvalidSize { arg, value }
    }

    /// Create an invalid-value error
    pub fn invalid_value(arg: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            arg,
            reason: reason.into(),
        }
    }

    /// Create an unexpected-status error for a named call
    pub fn unexpected_status(call: &'static str, expected: Status, got: Status) -> Self {
        Self::UnexpectedStatus {
            call,
            expected,
            got,
        }
    }
}
