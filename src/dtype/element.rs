//! Element trait for mapping Rust types to DType

use super::{Complex64, Complex128, DType};
use bytemuck::{Pod, Zeroable};
use std::fmt::Debug;
use std::ops::{Add, Mul, Sub};

/// Trait for types the harness can verify
///
/// This trait connects Rust's type system to the runtime dtype naming, and
/// carries exactly the arithmetic the oracle and the reference kernels
/// need.
///
/// # Bounds
/// - `Copy + Send + Sync + 'static` - Basic trait requirements
/// - `Pod + Zeroable` - Safe memory transmutation (bytemuck), required for
///   device copies and for the bit-exact comparator
/// - `Add + Sub + Mul` - The rotation formula `c*x + s*y` / `c*y - s*x`
/// - `PartialEq + Debug` - Mismatch reporting
pub trait Element:
    Copy
    + Clone
    + Send
    + Sync
    + Pod
    + Zeroable
    + Debug
    + PartialEq
    + 'static
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
{
    /// The corresponding DType for this Rust type
    const DTYPE: DType;

    /// Zero value
    fn zero() -> Self;

    /// One value
    fn one() -> Self;

    /// Convert from f64 to this type
    ///
    /// For complex types this creates a real number (imaginary part = 0);
    /// scalar case parameters such as `c = 3.7` are lifted this way for
    /// every instantiation.
    fn from_f64(v: f64) -> Self;

    /// Build a value from real and imaginary parts
    ///
    /// Real types ignore `im`; the input generator uses this so one
    /// sampling path fills both real and complex buffers.
    fn from_parts(re: f64, im: f64) -> Self;
}

impl Element for f32 {
    const DTYPE: DType = DType::F32;

    #[inline]
    fn zero() -> Self {
        0.0
    }

    #[inline]
    fn one() -> Self {
        1.0
    }

    #[inline]
    fn from_f64(v: f64) -> Self {
        v as f32
    }

    #[inline]
    fn from_parts(re: f64, _im: f64) -> Self {
        re as f32
    }
}

impl Element for f64 {
    const DTYPE: DType = DType::F64;

    #[inline]
    fn zero() -> Self {
        0.0
    }

    #[inline]
    fn one() -> Self {
        1.0
    }

    #[inline]
    fn from_f64(v: f64) -> Self {
        v
    }

    #[inline]
    fn from_parts(re: f64, _im: f64) -> Self {
        re
    }
}

impl Element for Complex64 {
    const DTYPE: DType = DType::Complex64;

    #[inline]
    fn zero() -> Self {
        Self::ZERO
    }

    #[inline]
    fn one() -> Self {
        Self::ONE
    }

    /// Creates a real complex number (im = 0)
    #[inline]
    fn from_f64(v: f64) -> Self {
        Self::new(v as f32, 0.0)
    }

    #[inline]
    fn from_parts(re: f64, im: f64) -> Self {
        Self::new(re as f32, im as f32)
    }
}

impl Element for Complex128 {
    const DTYPE: DType = DType::Complex128;

    #[inline]
    fn zero() -> Self {
        Self::ZERO
    }

    #[inline]
    fn one() -> Self {
        Self::ONE
    }

    /// Creates a real complex number (im = 0)
    #[inline]
    fn from_f64(v: f64) -> Self {
        Self::new(v, 0.0)
    }

    #[inline]
    fn from_parts(re: f64, im: f64) -> Self {
        Self::new(re, im)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_dtype() {
        assert_eq!(f32::DTYPE, DType::F32);
        assert_eq!(f64::DTYPE, DType::F64);
        assert_eq!(Complex64::DTYPE, DType::Complex64);
        assert_eq!(Complex128::DTYPE, DType::Complex128);
    }

    #[test]
    fn test_element_conversions() {
        assert_eq!(f32::from_f64(2.5), 2.5f32);
        assert_eq!(Complex128::from_f64(3.7), Complex128::new(3.7, 0.0));
        assert_eq!(Complex64::from_parts(1.0, -2.0), Complex64::new(1.0, -2.0));
        assert_eq!(f64::from_parts(1.0, -2.0), 1.0);
    }

    #[test]
    fn test_element_rotation_formula() {
        // The exact expression the oracle evaluates, at one point
        fn rotate<T: Element>(x: T, y: T, c: T, s: T) -> (T, T) {
            (c * x + s * y, c * y - s * x)
        }

        let (nx, ny) = rotate(1.0f64, 2.0f64, 3.7, 1.2);
        assert_eq!(nx, 3.7 + 2.4);
        assert_eq!(ny, 7.4 - 1.2);

        let (zx, zy) = rotate(
            Complex128::new(1.0, 0.0),
            Complex128::new(0.0, 1.0),
            Complex128::from_f64(2.0),
            Complex128::from_f64(0.5),
        );
        assert_eq!(zx, Complex128::new(2.0, 0.5));
        assert_eq!(zy, Complex128::new(-0.5, 2.0));
    }
}
