//! The emulated fixed-width predicated vector unit.
//!
//! [`VectorUnit`] exposes the instruction set the kernels are written against.
//! Its conventions follow the masked AVX-512 intrinsics (`_mm512_mask_*`):
//!
//! - every state-changing instruction takes an explicit [`Mask`]; there is no
//!   implicit "current mask",
//! - instructions return a fresh register; lanes outside the mask are copied
//!   from the `src` operand, so `x = unit.vmul(x, &m, x, y)` updates only the
//!   lanes selected by `m`,
//! - comparisons return a mask whose lanes outside the governing mask are
//!   cleared, so derived masks never escape their enclosing predicate,
//! - loads and stores touch exactly the active lanes of the slice they are
//!   given. An active lane past the end of the slice is a bounds violation and
//!   panics instead of reading or writing foreign memory.
//!
//! Each instruction is recorded by the unit's [`Logger`].

use super::logger::{Logger, Stats};
use super::mask::Mask;
use super::vector::{Lane, VecF32, VecI32, VecReg};

/// Predicated vector unit with `W` lanes.
///
/// `W` must be a power of two.
#[derive(Clone, Debug)]
pub struct VectorUnit<const W: usize> {
    logger: Logger,
}

impl<const W: usize> Default for VectorUnit<W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const W: usize> VectorUnit<W> {
    /// Unit that only counts instructions.
    ///
    /// # Panics
    ///
    /// Panics if `W` is not a power of two.
    pub fn new() -> Self {
        assert!(
            W.is_power_of_two(),
            "Vector width must be a power of two, got {W}"
        );

        Self {
            logger: Logger::new(W),
        }
    }

    /// Unit that counts instructions and keeps a per-instruction trace.
    pub fn with_trace() -> Self {
        let mut unit = Self::new();
        unit.logger = Logger::with_trace(W);
        unit
    }

    #[inline(always)]
    pub const fn width(&self) -> usize {
        W
    }

    pub fn logger(&self) -> &Logger {
        &self.logger
    }

    pub fn stats(&self) -> Stats {
        self.logger.stats()
    }

    pub fn reset_log(&mut self) {
        self.logger.reset();
    }

    // ---- Masks ----

    /// Mask with the first `k` lanes active. Not logged: building a constant
    /// mask issues no vector instruction.
    #[inline(always)]
    pub fn init_ones(&self, k: usize) -> Mask<W> {
        Mask::first(k)
    }

    #[inline(always)]
    pub fn mask_not(&mut self, mask: &Mask<W>) -> Mask<W> {
        self.logger.record("masknot", &Mask::<W>::all());
        mask.not()
    }

    #[inline(always)]
    pub fn mask_and(&mut self, a: &Mask<W>, b: &Mask<W>) -> Mask<W> {
        self.logger.record("maskand", &Mask::<W>::all());
        a.and(b)
    }

    /// Number of active lanes in `mask`.
    #[inline(always)]
    pub fn cntbits(&mut self, mask: &Mask<W>) -> usize {
        self.logger.record("cntbits", &Mask::<W>::all());
        mask.count()
    }

    // ---- Broadcast, load, store ----

    /// Broadcasts `value` into every lane.
    #[inline(always)]
    pub fn vset<T: Lane>(&mut self, value: T) -> VecReg<T, W> {
        self.logger.record("vset", &Mask::<W>::all());
        VecReg::splat(value)
    }

    /// Writes `value` into the lanes selected by `mask`.
    #[inline(always)]
    pub fn vset_masked<T: Lane>(
        &mut self,
        src: VecReg<T, W>,
        mask: &Mask<W>,
        value: T,
    ) -> VecReg<T, W> {
        self.logger.record("vset", mask);
        Self::select(src, mask, |_| value)
    }

    /// Loads `mem[i]` into lane `i` for every active lane.
    ///
    /// # Panics
    ///
    /// Panics if an active lane lies beyond `mem.len()`.
    #[inline(always)]
    pub fn vload<T: Lane>(&mut self, src: VecReg<T, W>, mask: &Mask<W>, mem: &[T]) -> VecReg<T, W> {
        self.logger.record("vload", mask);
        Self::select(src, mask, |i| mem[i])
    }

    /// Stores lane `i` of `a` into `mem[i]` for every active lane.
    ///
    /// # Panics
    ///
    /// Panics if an active lane lies beyond `mem.len()`.
    #[inline(always)]
    pub fn vstore<T: Lane>(&mut self, mem: &mut [T], mask: &Mask<W>, a: VecReg<T, W>) {
        self.logger.record("vstore", mask);
        for i in mask.active() {
            mem[i] = a.lanes[i];
        }
    }

    // ---- Arithmetic ----

    #[inline(always)]
    pub fn vadd<T: Lane>(
        &mut self,
        src: VecReg<T, W>,
        mask: &Mask<W>,
        a: VecReg<T, W>,
        b: VecReg<T, W>,
    ) -> VecReg<T, W> {
        self.logger.record("vadd", mask);
        Self::select(src, mask, |i| a.lanes[i] + b.lanes[i])
    }

    #[inline(always)]
    pub fn vsub<T: Lane>(
        &mut self,
        src: VecReg<T, W>,
        mask: &Mask<W>,
        a: VecReg<T, W>,
        b: VecReg<T, W>,
    ) -> VecReg<T, W> {
        self.logger.record("vsub", mask);
        Self::select(src, mask, |i| a.lanes[i] - b.lanes[i])
    }

    #[inline(always)]
    pub fn vmul<T: Lane>(
        &mut self,
        src: VecReg<T, W>,
        mask: &Mask<W>,
        a: VecReg<T, W>,
        b: VecReg<T, W>,
    ) -> VecReg<T, W> {
        self.logger.record("vmult", mask);
        Self::select(src, mask, |i| a.lanes[i] * b.lanes[i])
    }

    #[inline(always)]
    pub fn vbitand(
        &mut self,
        src: VecI32<W>,
        mask: &Mask<W>,
        a: VecI32<W>,
        b: VecI32<W>,
    ) -> VecI32<W> {
        self.logger.record("vbitand", mask);
        Self::select(src, mask, |i| a.lanes[i] & b.lanes[i])
    }

    /// Arithmetic right shift of each lane of `a` by the matching lane of `b`.
    ///
    /// Shift counts are taken modulo 32. For non-negative lanes this is the
    /// same as a logical shift.
    #[inline(always)]
    pub fn vshiftright(
        &mut self,
        src: VecI32<W>,
        mask: &Mask<W>,
        a: VecI32<W>,
        b: VecI32<W>,
    ) -> VecI32<W> {
        self.logger.record("vshiftright", mask);
        Self::select(src, mask, |i| a.lanes[i].wrapping_shr(b.lanes[i] as u32))
    }

    // ---- Comparisons ----

    /// `a < b` on the lanes of `mask`; other lanes are cleared.
    #[inline(always)]
    pub fn vlt<T: Lane>(&mut self, mask: &Mask<W>, a: VecReg<T, W>, b: VecReg<T, W>) -> Mask<W> {
        self.logger.record("vlt", mask);
        Self::compare(mask, |i| a.lanes[i] < b.lanes[i])
    }

    /// `a > b` on the lanes of `mask`; other lanes are cleared.
    #[inline(always)]
    pub fn vgt<T: Lane>(&mut self, mask: &Mask<W>, a: VecReg<T, W>, b: VecReg<T, W>) -> Mask<W> {
        self.logger.record("vgt", mask);
        Self::compare(mask, |i| a.lanes[i] > b.lanes[i])
    }

    /// `a == b` on the lanes of `mask`; other lanes are cleared.
    #[inline(always)]
    pub fn veq<T: Lane>(&mut self, mask: &Mask<W>, a: VecReg<T, W>, b: VecReg<T, W>) -> Mask<W> {
        self.logger.record("veq", mask);
        Self::compare(mask, |i| a.lanes[i] == b.lanes[i])
    }

    // ---- Horizontal ----

    /// Adds adjacent lane pairs and writes each sum into both lanes of its pair:
    /// `[a0+a1, a0+a1, a2+a3, a2+a3, ...]`.
    #[inline(always)]
    pub fn hadd(&mut self, a: VecF32<W>) -> VecF32<W> {
        self.logger.record("hadd", &Mask::<W>::all());

        let mut lanes = a.lanes;
        for pair in lanes.chunks_exact_mut(2) {
            let sum = pair[0] + pair[1];
            pair[0] = sum;
            pair[1] = sum;
        }

        VecReg { lanes }
    }

    /// Moves even lanes to the first half and odd lanes to the second half:
    /// `[a0, a2, a4, ..., a1, a3, a5, ...]`.
    #[inline(always)]
    pub fn interleave(&mut self, a: VecF32<W>) -> VecF32<W> {
        self.logger.record("interleave", &Mask::<W>::all());

        let half = W / 2;
        let mut lanes = a.lanes;
        for (i, lane) in lanes.iter_mut().enumerate() {
            *lane = if i < half {
                a.lanes[2 * i]
            } else {
                a.lanes[2 * (i - half) + 1]
            };
        }

        VecReg { lanes }
    }

    #[inline(always)]
    fn select<T: Lane>(
        src: VecReg<T, W>,
        mask: &Mask<W>,
        lane: impl Fn(usize) -> T,
    ) -> VecReg<T, W> {
        let mut out = src;
        for i in mask.active() {
            out.lanes[i] = lane(i);
        }
        out
    }

    #[inline(always)]
    fn compare(mask: &Mask<W>, pred: impl Fn(usize) -> bool) -> Mask<W> {
        let mut lanes = [false; W];
        for i in mask.active() {
            lanes[i] = pred(i);
        }
        Mask::from_lanes(lanes)
    }
}
