use log::debug;
use rayon::{iter::ParallelIterator, slice::ParallelSlice};

use crate::{
    error::{check_multiple_of_width, Result},
    simd::{
        emulated::{mask::Mask, unit::VectorUnit, vector::VecF32},
        traits::SimdSum,
        utils::par_block_len,
    },
    VECTOR_WIDTH,
};

/// Scalar reference sum.
pub fn array_sum_serial(values: &[f32]) -> f32 {
    let mut sum = 0.0f32;
    for &x in values {
        sum += x;
    }
    sum
}

/// Vector sum of `values`.
///
/// Only whole chunks are supported: `values.len()` must be a multiple of `W`.
/// There is no tail handling.
///
/// # Panics
///
/// Panics if `values.len() % W != 0`.
pub fn array_sum_vector<const W: usize>(unit: &mut VectorUnit<W>, values: &[f32]) -> f32 {
    try_array_sum_vector(unit, values).unwrap_or_else(|err| panic!("{err}"))
}

/// Fallible form of [`array_sum_vector`].
pub fn try_array_sum_vector<const W: usize>(
    unit: &mut VectorUnit<W>,
    values: &[f32],
) -> Result<f32> {
    check_multiple_of_width(values.len(), W)?;

    debug!(
        "array_sum: n={}, width={W}, chunks={}",
        values.len(),
        values.len() / W
    );

    Ok(sum_chunks(unit, values))
}

fn sum_chunks<const W: usize>(unit: &mut VectorUnit<W>, values: &[f32]) -> f32 {
    let all = Mask::<W>::all();

    let mut acc = unit.vset(0.0f32);
    let mut chunk = VecF32::<W>::zero();

    for start in (0..values.len()).step_by(W) {
        chunk = unit.vload(chunk, &all, &values[start..]);
        acc = unit.vadd(acc, &all, acc, chunk);
    }

    // log2(W) rounds, each halving the number of distinct partial sums
    let mut width = W / 2;
    while width > 0 {
        acc = unit.hadd(acc);
        acc = unit.interleave(acc);
        width /= 2;
    }

    let mut scratch = [0.0f32; W];
    unit.vstore(&mut scratch, &all, acc);
    scratch[0]
}

fn parallel_sum<const W: usize>(a: &[f32]) -> f32 {
    if let Err(err) = check_multiple_of_width(a.len(), W) {
        panic!("{err}");
    }

    a.par_chunks(par_block_len(W))
        .map(|block| {
            let mut unit = VectorUnit::<W>::new();
            sum_chunks(&mut unit, block)
        })
        .sum()
}

impl SimdSum for &[f32] {
    type Output = f32;

    #[inline(always)]
    fn vector_sum(self) -> Self::Output {
        let mut unit = VectorUnit::<VECTOR_WIDTH>::new();
        array_sum_vector(&mut unit, self)
    }

    #[inline(always)]
    fn par_vector_sum(self) -> Self::Output {
        parallel_sum::<VECTOR_WIDTH>(self)
    }

    #[inline(always)]
    fn scalar_sum(self) -> Self::Output {
        array_sum_serial(self)
    }
}
