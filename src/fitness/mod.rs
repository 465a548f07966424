//! Fitness evaluation and benchmarks
//!
//! This module provides the fitness-function contract, the evaluation
//! context shared by individuals and the benchmark functions.

pub mod benchmarks;
pub mod traits;

pub mod prelude {
    pub use super::benchmarks::*;
    pub use super::traits::*;
}
