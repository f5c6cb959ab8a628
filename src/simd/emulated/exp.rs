//! Clamped integer exponentiation.
//!
//! Computes `min(base^exponent, 4.18)` by binary exponentiation, so the work
//! per element grows with `log2(exponent)` rather than with the exponent.
//!
//! The vector version turns the scalar `while (y > 0)` loop into a per-lane
//! predicate. Each lane leaves the loop as soon as its own exponent reaches
//! zero, and the chunk keeps iterating while any lane is still looping. The
//! squaring of `x` and the shift of `exp` run on every active lane, including
//! lanes that already finished: their `result` is no longer multiplied, so the
//! extra work cannot change their output.

use log::debug;
use rayon::{
    iter::{IndexedParallelIterator, ParallelIterator},
    slice::{ParallelSlice, ParallelSliceMut},
};

use crate::{
    error::{check_operand, check_output, Result},
    simd::{
        emulated::{
            unit::VectorUnit,
            vector::{VecF32, VecI32},
        },
        traits::SimdClampedExp,
        utils::{active_lanes, chunk_count, par_block_len},
    },
    VECTOR_WIDTH,
};

/// Upper bound applied to every result. Compared with a strict `>`.
pub const EXP_CLAMP: f32 = 4.18;

/// Scalar reference of the clamped exponentiation.
///
/// Negative exponents never enter the loop and yield `1.0`.
pub fn clamped_exp_serial(values: &[f32], exponents: &[i32], output: &mut [f32]) {
    assert!(
        exponents.len() >= values.len() && output.len() >= values.len(),
        "Exponents and output must hold at least {} elements",
        values.len()
    );

    for ((&x, &y), out) in values.iter().zip(exponents).zip(output.iter_mut()) {
        let mut result = 1.0f32;
        let mut xpower = x;
        let mut y = y;

        while y > 0 {
            if y & 0x1 != 0 {
                result *= xpower;
            }
            xpower *= xpower;
            y >>= 1;
        }

        *out = if result > EXP_CLAMP { EXP_CLAMP } else { result };
    }
}

/// Masked vector clamped exponentiation:
/// `output[i] = min(values[i]^exponents[i], 4.18)` for every `i < values.len()`.
///
/// Exponents are expected to be non-negative. A negative exponent is never
/// selected by the loop predicate and leaves its lane at `1.0`.
///
/// # Panics
///
/// Panics if `exponents` or `output` is shorter than `values`.
pub fn clamped_exp_vector<const W: usize>(
    unit: &mut VectorUnit<W>,
    values: &[f32],
    exponents: &[i32],
    output: &mut [f32],
) {
    if let Err(err) = try_clamped_exp_vector(unit, values, exponents, output) {
        panic!("{err}");
    }
}

/// Fallible form of [`clamped_exp_vector`].
pub fn try_clamped_exp_vector<const W: usize>(
    unit: &mut VectorUnit<W>,
    values: &[f32],
    exponents: &[i32],
    output: &mut [f32],
) -> Result<()> {
    check_operand(values.len(), exponents)?;
    check_output(values.len(), output)?;

    debug!(
        "clamped_exp: n={}, width={W}, chunks={}",
        values.len(),
        chunk_count(values.len(), W)
    );

    clamped_exp_chunks(unit, values, exponents, output);
    Ok(())
}

fn clamped_exp_chunks<const W: usize>(
    unit: &mut VectorUnit<W>,
    values: &[f32],
    exponents: &[i32],
    output: &mut [f32],
) {
    let size = values.len();

    let zero = unit.vset(0i32);
    let one = unit.vset(1i32);
    let bound = unit.vset(EXP_CLAMP);

    let mut x = VecF32::<W>::zero();
    let mut exp = VecI32::<W>::zero();

    for start in (0..size).step_by(W) {
        let active = unit.init_ones(active_lanes(size, start, W));

        x = unit.vload(x, &active, &values[start..]);
        exp = unit.vload(exp, &active, &exponents[start..]);
        let mut result = unit.vset(1.0f32);

        // while (y > 0)
        let mut looping = unit.vgt(&active, exp, zero);
        while unit.cntbits(&looping) > 0 {
            // if (y & 0x1)
            let low_bit = unit.vbitand(VecI32::<W>::zero(), &active, exp, one);
            let bit_clear = unit.veq(&active, low_bit, zero);
            let bit_set = unit.mask_not(&bit_clear);
            let bit_set = unit.mask_and(&bit_set, &looping);
            result = unit.vmul(result, &bit_set, result, x);

            x = unit.vmul(x, &active, x, x);
            exp = unit.vshiftright(exp, &active, exp, one);

            looping = unit.vgt(&active, exp, zero);
        }

        let clamp = unit.vgt(&active, result, bound);
        result = unit.vset_masked(result, &clamp, EXP_CLAMP);

        unit.vstore(&mut output[start..], &active, result);
    }
}

fn parallel_clamped_exp<const W: usize>(a: &[f32], e: &[i32]) -> Vec<f32> {
    assert!(
        e.len() >= a.len(),
        "Exponents must hold at least {} elements",
        a.len()
    );

    let mut c = vec![0.0f32; a.len()];

    let block = par_block_len(W);

    c.par_chunks_mut(block)
        .zip(a.par_chunks(block))
        .zip(e[..a.len()].par_chunks(block))
        .for_each(|((c_block, a_block), e_block)| {
            let mut unit = VectorUnit::<W>::new();
            clamped_exp_chunks(&mut unit, a_block, e_block, c_block);
        });

    c
}

impl<'b> SimdClampedExp<&'b [i32]> for &[f32] {
    type Output = Vec<f32>;

    #[inline(always)]
    fn vector_clamped_exp(self, exponents: &'b [i32]) -> Self::Output {
        let mut unit = VectorUnit::<VECTOR_WIDTH>::new();
        let mut c = vec![0.0f32; self.len()];
        clamped_exp_vector(&mut unit, self, exponents, &mut c);
        c
    }

    #[inline(always)]
    fn par_vector_clamped_exp(self, exponents: &'b [i32]) -> Self::Output {
        parallel_clamped_exp::<VECTOR_WIDTH>(self, exponents)
    }

    #[inline(always)]
    fn scalar_clamped_exp(self, exponents: &'b [i32]) -> Self::Output {
        let mut c = vec![0.0f32; self.len()];
        clamped_exp_serial(self, exponents, &mut c);
        c
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loop_runs_for_longest_exponent() {
        let mut unit = VectorUnit::<4>::with_trace();
        let values = [1.5f32, 1.0, 1.1, 0.5];
        // bit lengths 0, 1, 3, 5
        let exponents = [0, 1, 5, 16];
        let mut out = [0.0f32; 4];

        clamped_exp_vector(&mut unit, &values, &exponents, &mut out);

        let loop_tests = unit
            .logger()
            .entries()
            .iter()
            .filter(|e| e.instruction == "cntbits")
            .count();
        // five iterations plus the failing test
        assert_eq!(loop_tests, 6);

        let multiplies: Vec<_> = unit
            .logger()
            .entries()
            .iter()
            .filter(|e| e.instruction == "vmult")
            .map(|e| e.mask.as_str())
            .collect();
        // result *= x, then x *= x, per iteration
        assert_eq!(
            multiplies,
            vec!["_**_", "****", "____", "****", "__*_", "****", "____", "****", "___*", "****"]
        );

        let mut expected = [0.0f32; 4];
        clamped_exp_serial(&values, &exponents, &mut expected);
        assert_eq!(out, expected);
    }

    #[test]
    fn test_clamp_is_strict() {
        let mut unit = VectorUnit::<2>::new();
        let values = [EXP_CLAMP, 4.0];
        let exponents = [1, 1];
        let mut out = [0.0f32; 2];

        clamped_exp_vector(&mut unit, &values, &exponents, &mut out);

        assert_eq!(out, [EXP_CLAMP, 4.0]);
    }

    #[test]
    fn test_negative_exponent_stays_one() {
        let mut unit = VectorUnit::<4>::new();
        let mut out = [0.0f32; 2];
        clamped_exp_vector(&mut unit, &[3.0, 0.5], &[-3, -1], &mut out);
        assert_eq!(out, [1.0, 1.0]);

        let mut serial = [0.0f32; 2];
        clamped_exp_serial(&[3.0, 0.5], &[-3, -1], &mut serial);
        assert_eq!(serial, [1.0, 1.0]);
    }

    #[test]
    fn test_short_exponents_are_reported() {
        let mut unit = VectorUnit::<4>::new();
        let mut out = [0.0f32; 3];
        let err = try_clamped_exp_vector(&mut unit, &[1.0, 2.0, 3.0], &[1], &mut out).unwrap_err();
        assert_eq!(
            err,
            crate::MasklyError::LengthMismatch {
                expected: 3,
                actual: 1
            }
        );
    }

    #[test]
    fn test_parallel_matches_serial() {
        let size = par_block_len(4) + 5;
        let a: Vec<f32> = (0..size).map(|i| 0.9 + (i % 7) as f32 * 0.05).collect();
        let e: Vec<i32> = (0..size).map(|i| (i % 13) as i32).collect();

        let par = parallel_clamped_exp::<4>(&a, &e);
        let mut seq = vec![0.0f32; size];
        clamped_exp_serial(&a, &e, &mut seq);

        assert_eq!(par, seq);
    }
}
