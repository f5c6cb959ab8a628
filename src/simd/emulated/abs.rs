use log::debug;
use rayon::{
    iter::{IndexedParallelIterator, ParallelIterator},
    slice::{ParallelSlice, ParallelSliceMut},
};

use crate::{
    error::{check_output, Result},
    simd::{
        emulated::{unit::VectorUnit, vector::VecF32},
        traits::SimdAbs,
        utils::{active_lanes, chunk_count, par_block_len},
    },
    VECTOR_WIDTH,
};

/// Scalar reference: `output[i] = |values[i]|` through an explicit branch.
pub fn abs_serial(values: &[f32], output: &mut [f32]) {
    assert!(
        output.len() >= values.len(),
        "Output must hold at least {} elements",
        values.len()
    );

    for (&x, out) in values.iter().zip(output.iter_mut()) {
        *out = if x < 0.0 { -x } else { x };
    }
}

/// Masked vector absolute value: `output[i] = |values[i]|` for every `i < values.len()`.
///
/// Elements of `output` past `values.len()` are left untouched.
///
/// # Panics
///
/// Panics if `output` is shorter than `values`.
pub fn abs_vector<const W: usize>(unit: &mut VectorUnit<W>, values: &[f32], output: &mut [f32]) {
    if let Err(err) = try_abs_vector(unit, values, output) {
        panic!("{err}");
    }
}

/// Fallible form of [`abs_vector`].
pub fn try_abs_vector<const W: usize>(
    unit: &mut VectorUnit<W>,
    values: &[f32],
    output: &mut [f32],
) -> Result<()> {
    check_output(values.len(), output)?;

    debug!(
        "abs: n={}, width={W}, chunks={}",
        values.len(),
        chunk_count(values.len(), W)
    );

    abs_chunks(unit, values, output);
    Ok(())
}

// if (x < 0) { out = -x } else { out = x }
fn abs_chunks<const W: usize>(unit: &mut VectorUnit<W>, values: &[f32], output: &mut [f32]) {
    let size = values.len();

    let zero = unit.vset(0.0f32);
    let mut x = VecF32::<W>::zero();
    let mut result = VecF32::<W>::zero();

    for start in (0..size).step_by(W) {
        let active = unit.init_ones(active_lanes(size, start, W));

        x = unit.vload(x, &active, &values[start..]);

        let negative = unit.vlt(&active, x, zero);
        result = unit.vsub(result, &negative, zero, x);

        let not_negative = unit.mask_not(&negative);
        let not_negative = unit.mask_and(&not_negative, &active);
        result = unit.vload(result, &not_negative, &values[start..]);

        unit.vstore(&mut output[start..], &active, result);
    }
}

fn parallel_abs<const W: usize>(a: &[f32]) -> Vec<f32> {
    let mut c = vec![0.0f32; a.len()];

    let block = par_block_len(W);

    c.par_chunks_mut(block)
        .zip(a.par_chunks(block))
        .for_each(|(c_block, a_block)| {
            let mut unit = VectorUnit::<W>::new();
            abs_chunks(&mut unit, a_block, c_block);
        });

    c
}

impl SimdAbs for &[f32] {
    type Output = Vec<f32>;

    #[inline(always)]
    fn vector_abs(self) -> Self::Output {
        let mut unit = VectorUnit::<VECTOR_WIDTH>::new();
        let mut c = vec![0.0f32; self.len()];
        abs_vector(&mut unit, self, &mut c);
        c
    }

    #[inline(always)]
    fn par_vector_abs(self) -> Self::Output {
        parallel_abs::<VECTOR_WIDTH>(self)
    }

    #[inline(always)]
    fn scalar_abs(self) -> Self::Output {
        let mut c = vec![0.0f32; self.len()];
        abs_serial(self, &mut c);
        c
    }
}
