//! Complex number types for the complex instantiations of the harness
//!
//! Complex numbers are stored in interleaved format (re, im), matching the
//! layout device sparse libraries expect for their complex entry points.

use bytemuck::{Pod, Zeroable};
use std::ops::{Add, Mul, Sub};

/// Macro to implement a complex number type with the operations the
/// harness needs
///
/// This avoids code duplication between Complex64 and Complex128.
macro_rules! impl_complex {
    ($name:ident, $float:ty, $doc_bits:literal) => {
        #[doc = concat!($doc_bits, "-bit complex number, interleaved (re, im) layout")]
        #[repr(C)]
        #[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
        pub struct $name {
            /// Real part
            pub re: $float,
            /// Imaginary part
            pub im: $float,
        }

        impl $name {
            /// Zero complex number
            pub const ZERO: Self = Self { re: 0.0, im: 0.0 };

            /// One (real unit)
            pub const ONE: Self = Self { re: 1.0, im: 0.0 };

            /// Create a new complex number
            #[inline]
            pub const fn new(re: $float, im: $float) -> Self {
                Self { re, im }
            }
        }

        impl Add for $name {
            type Output = Self;

            #[inline]
            fn add(self, rhs: Self) -> Self {
                Self {
                    re: self.re + rhs.re,
                    im: self.im + rhs.im,
                }
            }
        }

        impl Sub for $name {
            type Output = Self;

            #[inline]
            fn sub(self, rhs: Self) -> Self {
                Self {
                    re: self.re - rhs.re,
                    im: self.im - rhs.im,
                }
            }
        }

        impl Mul for $name {
            type Output = Self;

            #[inline]
            fn mul(self, rhs: Self) -> Self {
                Self {
                    re: self.re * rhs.re - self.im * rhs.im,
                    im: self.re * rhs.im + self.im * rhs.re,
                }
            }
        }
    };
}

impl_complex!(Complex64, f32, "64");
impl_complex!(Complex128, f64, "128");
