//! Genetic operators
//!
//! This module provides selection, crossover, and mutation operators.

pub mod binary;
pub mod continuous;
pub mod mutation;
pub mod selection;
pub mod traits;

pub mod prelude {
    pub use super::binary::{BinaryCrossover, BinaryCrossoverKind};
    pub use super::continuous::{ContinuousCrossover, ContinuousCrossoverKind};
    pub use super::mutation::*;
    pub use super::selection::*;
    pub use super::traits::*;
}
