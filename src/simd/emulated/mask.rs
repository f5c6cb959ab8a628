//! W-lane predicate masks.
//!
//! A [`Mask`] selects which lanes of a vector instruction take effect. Masks are
//! produced by comparisons, combined with [`Mask::and`] and [`Mask::not`], and
//! consumed by every predicated instruction of the
//! [`VectorUnit`](super::unit::VectorUnit).
//!
//! Masks are plain values: building or combining them outside a unit is free
//! and is not recorded by the logger. The unit's `init_ones`, `mask_not`,
//! `mask_and` and `cntbits` wrappers are the logged equivalents.

use std::fmt;

/// Per-lane boolean predicate over `W` lanes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Mask<const W: usize> {
    lanes: [bool; W],
}

impl<const W: usize> Mask<W> {
    /// Every lane active.
    #[inline(always)]
    pub fn all() -> Self {
        Self { lanes: [true; W] }
    }

    /// No lane active.
    #[inline(always)]
    pub fn none() -> Self {
        Self { lanes: [false; W] }
    }

    /// Activates the first `k` lanes. Values of `k` above `W` saturate to `W`.
    #[inline(always)]
    pub fn first(k: usize) -> Self {
        let mut lanes = [false; W];
        lanes.iter_mut().take(k).for_each(|lane| *lane = true);
        Self { lanes }
    }

    #[inline(always)]
    pub fn from_lanes(lanes: [bool; W]) -> Self {
        Self { lanes }
    }

    #[inline(always)]
    pub fn lanes(&self) -> &[bool; W] {
        &self.lanes
    }

    #[inline(always)]
    pub fn is_set(&self, lane: usize) -> bool {
        self.lanes[lane]
    }

    /// Complement over all `W` lanes.
    ///
    /// The result is not restricted to any enclosing mask; an "else" branch is
    /// `outer.and(&inner.not())`.
    #[inline(always)]
    pub fn not(&self) -> Self {
        let mut lanes = self.lanes;
        lanes.iter_mut().for_each(|lane| *lane = !*lane);
        Self { lanes }
    }

    #[inline(always)]
    pub fn and(&self, other: &Self) -> Self {
        let mut lanes = self.lanes;
        lanes
            .iter_mut()
            .zip(other.lanes.iter())
            .for_each(|(lane, &o)| *lane &= o);
        Self { lanes }
    }

    /// Number of active lanes.
    #[inline(always)]
    pub fn count(&self) -> usize {
        self.lanes.iter().filter(|&&lane| lane).count()
    }

    #[inline(always)]
    pub fn any(&self) -> bool {
        self.lanes.iter().any(|&lane| lane)
    }

    /// Returns `true` when every lane active in `self` is also active in `outer`.
    #[inline(always)]
    pub fn is_subset_of(&self, outer: &Self) -> bool {
        self.lanes
            .iter()
            .zip(outer.lanes.iter())
            .all(|(&inner, &outer)| !inner || outer)
    }

    /// Indices of the active lanes, in ascending order.
    #[inline(always)]
    pub fn active(&self) -> impl Iterator<Item = usize> + '_ {
        self.lanes
            .iter()
            .enumerate()
            .filter_map(|(i, &lane)| lane.then_some(i))
    }
}

impl<const W: usize> Default for Mask<W> {
    fn default() -> Self {
        Self::none()
    }
}

/// Renders the mask as `*` for active lanes and `_` for inactive ones.
impl<const W: usize> fmt::Display for Mask<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &lane in &self.lanes {
            f.write_str(if lane { "*" } else { "_" })?;
        }
        Ok(())
    }
}
