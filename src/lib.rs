//! Predicated vector kernels on an emulated fixed-width SIMD unit.
//!
//! The crate reformulates scalar routines (absolute value, clamped integer
//! exponentiation and array reduction) as masked vector programs. Branches
//! become complementary masks and data-dependent loops become a per-lane
//! predicate that is recomputed every iteration.
//!
//! ```rust
//! use maskly::simd::traits::{SimdAbs, SimdSum};
//!
//! let values = [-3.0f32, 2.0, 0.0, -0.5];
//! assert_eq!(values.as_slice().vector_abs(), vec![3.0, 2.0, 0.0, 0.5]);
//!
//! // the sum kernel needs a whole number of chunks
//! let ones = [1.0f32; 64];
//! assert_eq!(ones.as_slice().vector_sum(), 64.0);
//! ```

pub mod error;
pub mod simd;

pub use error::{MasklyError, Result};
pub use simd::traits::{SimdAbs, SimdClampedExp, SimdSum};

/// Default vector width, configured at build time through `MASKLY_VECTOR_WIDTH`.
pub const VECTOR_WIDTH: usize = parse_width(env!("MASKLY_VECTOR_WIDTH"));

const fn parse_width(raw: &str) -> usize {
    let bytes = raw.as_bytes();
    let mut width = 0usize;
    let mut i = 0;

    while i < bytes.len() {
        assert!(bytes[i].is_ascii_digit(), "vector width must be numeric");
        width = width * 10 + (bytes[i] - b'0') as usize;
        i += 1;
    }

    assert!(width.is_power_of_two(), "vector width must be a power of two");
    width
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_width() {
        assert_eq!(parse_width("1"), 1);
        assert_eq!(parse_width("4"), 4);
        assert_eq!(parse_width("16"), 16);
    }

    #[test]
    fn test_configured_width_is_power_of_two() {
        assert!(VECTOR_WIDTH.is_power_of_two());
    }
}
