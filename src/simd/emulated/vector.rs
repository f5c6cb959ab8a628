//! W-lane vector registers of the emulated unit.
//!
//! [`VecReg`] plays the role an `__m256` or `float32x4_t` plays for a hardware
//! target: a fixed number of packed scalar lanes. Registers carry no size of
//! their own; which lanes are meaningful is decided by the mask each
//! instruction runs under.
//!
//! # Lane types
//!
//! Any numeric type implementing [`Lane`] can populate a register. The kernels
//! use [`VecF32`] for values and [`VecI32`] for exponents.

use std::fmt::Debug;
use std::ops::Index;

use num::Num;

/// Scalar types that can live in a vector lane.
pub trait Lane: Num + Copy + PartialOrd + Debug + Send + Sync {}

impl<T> Lane for T where T: Num + Copy + PartialOrd + Debug + Send + Sync {}

/// Vector register holding `W` lanes of `T`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct VecReg<T: Lane, const W: usize> {
    pub(crate) lanes: [T; W],
}

/// Register of `W` packed `f32` lanes.
pub type VecF32<const W: usize> = VecReg<f32, W>;

/// Register of `W` packed `i32` lanes.
pub type VecI32<const W: usize> = VecReg<i32, W>;

impl<T: Lane, const W: usize> VecReg<T, W> {
    /// Number of lanes in the register.
    pub const LANE_COUNT: usize = W;

    /// Register with every lane set to `value`.
    #[inline(always)]
    pub fn splat(value: T) -> Self {
        Self { lanes: [value; W] }
    }

    /// Register with every lane set to zero.
    #[inline(always)]
    pub fn zero() -> Self {
        Self::splat(T::zero())
    }

    #[inline(always)]
    pub fn from_lanes(lanes: [T; W]) -> Self {
        Self { lanes }
    }

    #[inline(always)]
    pub fn lanes(&self) -> &[T; W] {
        &self.lanes
    }

    #[inline(always)]
    pub fn to_vec(self) -> Vec<T> {
        self.lanes.to_vec()
    }
}

impl<T: Lane, const W: usize> Default for VecReg<T, W> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<T: Lane, const W: usize> Index<usize> for VecReg<T, W> {
    type Output = T;

    #[inline(always)]
    fn index(&self, lane: usize) -> &Self::Output {
        &self.lanes[lane]
    }
}

impl<T: Lane, const W: usize> From<[T; W]> for VecReg<T, W> {
    fn from(lanes: [T; W]) -> Self {
        Self::from_lanes(lanes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_splat_and_index() {
        let v = VecF32::<4>::splat(1.5);
        assert_eq!(v.lanes(), &[1.5; 4]);
        assert_eq!(v[3], 1.5);
        assert_eq!(VecF32::<4>::LANE_COUNT, 4);
    }

    #[test]
    fn test_zero_is_default() {
        assert_eq!(VecI32::<8>::default(), VecI32::<8>::zero());
        assert_eq!(VecI32::<8>::zero().to_vec(), vec![0; 8]);
    }
}
