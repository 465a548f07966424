//! # sga-variation
//!
//! A variation-operator testbed for simple genetic algorithms.
//!
//! The library evolves fixed-size populations over binary (optionally gray
//! coded) or real-valued chromosomes with roulette-wheel selection and one of
//! fourteen interchangeable crossover operators, so that the operators can be
//! compared on the same benchmark functions.
//!
//! ## Core Concepts
//!
//! - **Individuals stay consistent**: phenotype, objective and transferral
//!   are recomputed whenever a chromosome changes
//! - **Operators by id**: binary crossovers 1..=9, continuous crossovers 1..=5,
//!   chosen once when the population is built
//! - **Explicit randomness**: every random draw goes through a caller-supplied
//!   generator, so seeded runs are reproducible
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use sga_variation::prelude::*;
//! use rand::SeedableRng;
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(42);
//!
//! let mut population =
//!     BinaryPopulation::with_function(Arc::new(SineRipple::new()), 5, 20, false, &mut rng)?;
//! for _ in 0..20 {
//!     population.select(&mut rng);
//!     population.reproduce(&mut rng)?;
//! }
//! println!("{}", population.best().unwrap());
//! ```

pub mod config;
pub mod error;
pub mod experiment;
pub mod fitness;
pub mod genome;
pub mod operators;
pub mod population;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::*;
    pub use crate::error::*;
    pub use crate::experiment::*;
    pub use crate::fitness::prelude::*;
    pub use crate::genome::prelude::*;
    pub use crate::operators::prelude::*;
    pub use crate::population::prelude::*;
}
