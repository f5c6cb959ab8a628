/// Element-wise absolute value.
pub trait SimdAbs {
    type Output;

    /// Masked vector kernel on a single unit of width [`VECTOR_WIDTH`](crate::VECTOR_WIDTH).
    fn vector_abs(self) -> Self::Output;
    /// Masked vector kernel over disjoint blocks on the rayon pool.
    fn par_vector_abs(self) -> Self::Output;
    fn scalar_abs(self) -> Self::Output;
}

/// Element-wise `min(base^exponent, 4.18)` with non-negative integer exponents.
pub trait SimdClampedExp<Rhs> {
    type Output;

    fn vector_clamped_exp(self, exponents: Rhs) -> Self::Output;
    fn par_vector_clamped_exp(self, exponents: Rhs) -> Self::Output;
    fn scalar_clamped_exp(self, exponents: Rhs) -> Self::Output;
}

/// Sum of all elements.
///
/// The vector variants require the length to be a multiple of
/// [`VECTOR_WIDTH`](crate::VECTOR_WIDTH) and panic otherwise.
pub trait SimdSum {
    type Output;

    fn vector_sum(self) -> Self::Output;
    fn par_vector_sum(self) -> Self::Output;
    fn scalar_sum(self) -> Self::Output;
}
