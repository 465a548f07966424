//! Chromosome abstractions and implementations
//!
//! This module provides the `Chromosome` trait, the binary and continuous
//! chromosome types and the binary decoding rules.

pub mod bit_string;
pub mod bounds;
pub mod encoding;
pub mod real_vector;
pub mod traits;

pub mod prelude {
    pub use super::bit_string::*;
    pub use super::bounds::*;
    pub use super::encoding::*;
    pub use super::real_vector::*;
    pub use super::traits::*;
}
