use maskly::simd::traits::{SimdAbs, SimdClampedExp, SimdSum};
use maskly::VECTOR_WIDTH;

#[test]
fn test_parallel_abs_small_array() {
    let data = vec![1.0f32, -2.0, 3.0, -4.0, -5.0];
    let result = data.as_slice().par_vector_abs();
    let expected = vec![1.0f32, 2.0, 3.0, 4.0, 5.0];

    assert_eq!(result, expected, "par_vector_abs failed");
}

#[test]
fn test_parallel_abs_large_array() {
    let data: Vec<f32> = (0..100_003)
        .map(|i| if i % 2 == 0 { i as f32 } else { -(i as f32) })
        .collect();
    let result = data.as_slice().par_vector_abs();

    assert_eq!(result.len(), data.len());
    for (i, &val) in result.iter().enumerate() {
        assert_eq!(val, i as f32, "par_vector_abs large array failed at index {i}");
    }
}

#[test]
fn test_parallel_abs_empty() {
    let data: Vec<f32> = Vec::new();
    assert!(data.as_slice().par_vector_abs().is_empty());
}

#[test]
fn test_parallel_clamped_exp_large_array() {
    let size = 50_001;
    let bases: Vec<f32> = (0..size).map(|i| if i % 2 == 0 { 2.0 } else { 0.5 }).collect();
    let exponents: Vec<i32> = (0..size).map(|i| (i % 4) as i32).collect();

    let result = bases.as_slice().par_vector_clamped_exp(exponents.as_slice());

    for (i, &val) in result.iter().enumerate() {
        let expected = bases[i].powi(exponents[i]).min(4.18);
        assert_eq!(val, expected, "par_vector_clamped_exp failed at index {i}");
    }
}

#[test]
fn test_parallel_sum_large_array() {
    let size = VECTOR_WIDTH * 25_000;
    let data = vec![0.5f32; size];

    let sum = data.as_slice().par_vector_sum();

    assert_eq!(sum, size as f32 * 0.5);
}

#[test]
fn test_parallel_matches_sequential() {
    let size = VECTOR_WIDTH * 4_099;
    let data: Vec<f32> = (0..size).map(|i| ((i % 17) as f32 - 8.0) * 0.25).collect();

    assert_eq!(data.as_slice().par_vector_abs(), data.as_slice().vector_abs());
    assert_eq!(data.as_slice().par_vector_sum(), data.as_slice().scalar_sum());
}
