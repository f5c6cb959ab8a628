/// Number of vector chunks handed to one rayon task by the `par_*` variants.
///
/// Every parallel block is a whole number of chunks, so only the final block
/// of a slice can end in a partial chunk.
pub(crate) const PAR_CHUNKS_PER_TASK: usize = 1024;

/// Length of one parallel block for a unit of width `width`.
#[inline(always)]
pub(crate) fn par_block_len(width: usize) -> usize {
    width * PAR_CHUNKS_PER_TASK
}

/// Number of chunks needed to cover `len` elements, the last one possibly partial.
#[inline(always)]
pub(crate) fn chunk_count(len: usize, width: usize) -> usize {
    len.div_ceil(width)
}

/// Active lanes of the chunk starting at `start`: `min(width, len - start)`.
#[inline(always)]
pub(crate) fn active_lanes(len: usize, start: usize, width: usize) -> usize {
    debug_assert!(start < len, "chunk start {start} outside length {len}");
    (len - start).min(width)
}
