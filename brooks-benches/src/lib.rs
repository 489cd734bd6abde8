//! Benchmark support crate for brooks.
//!
//! Provides seeded graph fixtures and parameter types used by the Criterion
//! benchmarks of the greedy colouring, the Brooks classifier and checker, and
//! the batch runner.

pub mod error;
pub mod fixtures;
pub mod params;
