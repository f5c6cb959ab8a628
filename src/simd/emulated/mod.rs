//! Emulated fixed-width predicated vector unit and the kernels built on it.
//!
//! This module plays the part a hardware backend such as AVX2 or NEON plays
//! elsewhere: it owns the register type, the instruction set and the
//! kernels written against them. The difference is that every instruction is
//! predicated by an explicit mask and counted by a logger, so the cost of
//! divergent control flow is visible.
//!
//! # Available types
//!
//! - [`mask::Mask`]: W-lane predicate
//! - [`vector::VecReg`]: W-lane register ([`vector::VecF32`], [`vector::VecI32`])
//! - [`unit::VectorUnit`]: the instruction set
//! - [`logger::Logger`]: utilization counters and instruction trace
//!
//! # Kernels
//!
//! - [`abs::abs_vector`]: branch as complementary masks
//! - [`exp::clamped_exp_vector`]: data-dependent loop as a per-lane predicate
//! - [`sum::array_sum_vector`]: horizontal reduction over whole chunks
//!
//! # Usage example
//!
//! ```rust
//! use maskly::simd::emulated::{abs::abs_vector, unit::VectorUnit};
//!
//! let mut unit = VectorUnit::<4>::with_trace();
//! let values = [-3.0f32, 2.0, 0.0, -0.5, 7.0];
//! let mut output = [0.0f32; 5];
//!
//! abs_vector(&mut unit, &values, &mut output);
//!
//! assert_eq!(output, [3.0, 2.0, 0.0, 0.5, 7.0]);
//! println!("{}", unit.stats());
//! println!("{}", unit.logger().render_trace());
//! ```

pub mod logger;

pub mod mask;

pub mod unit;

pub mod vector;

pub mod abs;

pub mod exp;

pub mod sum;
