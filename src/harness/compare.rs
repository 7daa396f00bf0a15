//! Exact element-wise comparison
//!
//! Both operations under test preserve exact arithmetic (the rotation
//! applies the identical sequential formula the oracle does; the expansion
//! is pure reassignment), so comparison is bit-exact per element for every
//! numeric type. The first divergence is reported with both values.

use crate::error::{Error, Result};

use bytemuck::Pod;
use std::fmt::Debug;

/// Verdict for one output buffer
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ComparisonResult<T> {
    /// All elements are bit-identical
    Match,
    /// First diverging element
    Mismatch {
        /// Index of the first difference
        index: usize,
        /// Expected (oracle) value
        expected: T,
        /// Actual (computed) value
        actual: T,
    },
}

/// Compare two equal-length sequences bit-exactly
///
/// # Panics
///
/// Panics on a length mismatch; the harness always compares buffers it
/// sized identically, so unequal lengths are a harness bug.
pub fn compare_exact<T: Pod + Debug>(expected: &[T], actual: &[T]) -> ComparisonResult<T> {
    assert_eq!(
        expected.len(),
        actual.len(),
        "compare_exact: buffer length mismatch"
    );

    for (i, (e, a)) in expected.iter().zip(actual.iter()).enumerate() {
        if bytemuck::bytes_of(e) != bytemuck::bytes_of(a) {
            return ComparisonResult::Mismatch {
                index: i,
                expected: *e,
                actual: *a,
            };
        }
    }

    ComparisonResult::Match
}

/// Compare one named output buffer, turning a divergence into an error
pub fn check<T: Pod + Debug>(buffer: &str, expected: &[T], actual: &[T]) -> Result<()> {
    match compare_exact(expected, actual) {
        ComparisonResult::Match => Ok(()),
        ComparisonResult::Mismatch {
            index,
            expected,
            actual,
        } => Err(Error::Mismatch {
            buffer: buffer.to_string(),
            index,
            expected: format!("{expected:?}"),
            actual: format!("{actual:?}"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dtype::Complex128;

    #[test]
    fn test_compare_match() {
        let a = vec![1.0f64, 2.0, 3.0];
        assert_eq!(compare_exact(&a, &a.clone()), ComparisonResult::Match);
    }

    #[test]
    fn test_compare_reports_first_mismatch() {
        let expected = vec![1.0f32, 2.0, 3.0, 4.0];
        let actual = vec![1.0f32, 2.5, 3.5, 4.0];

        match compare_exact(&expected, &actual) {
            ComparisonResult::Mismatch {
                index,
                expected,
                actual,
            } => {
                assert_eq!(index, 1);
                assert_eq!(expected, 2.0);
                assert_eq!(actual, 2.5);
            }
            ComparisonResult::Match => panic!("expected a mismatch"),
        }
    }

    #[test]
    fn test_compare_is_bitwise() {
        // -0.0 == 0.0 numerically, but the bits differ
        let expected = vec![0.0f64];
        let actual = vec![-0.0f64];
        assert!(matches!(
            compare_exact(&expected, &actual),
            ComparisonResult::Mismatch { index: 0, .. }
        ));
    }

    #[test]
    fn test_check_formats_complex_error() {
        let expected = vec![Complex128::new(1.0, 2.0)];
        let actual = vec![Complex128::new(1.0, -2.0)];

        let err = check("y (device scalars)", &expected, &actual).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("y (device scalars)"));
        assert!(msg.contains("index 0"));
    }

    #[test]
    fn test_check_integer_buffers() {
        let expected = vec![0i64, 2, 4];
        assert!(check("csr_row_ptr", &expected, &[0, 2, 4]).is_ok());
        assert!(check("csr_row_ptr", &expected, &[0, 2, 5]).is_err());
    }
}
