//! Fitness traits
//!
//! This module defines the contract a benchmark objective has to satisfy and
//! the [`Evaluator`] that couples it with a chromosome encoding.

use std::fmt::Debug;
use std::sync::Arc;

use crate::genome::bounds::Bounds;
use crate::genome::encoding::Encoding;

/// Objective function consumed by the GA core
///
/// Every variable shares the same bounds. Minimization problems supply a
/// transferral that maps raw objective values onto a strictly positive
/// selection weight; maximization problems use the objective directly.
pub trait FitnessFunction: Debug + Send + Sync {
    /// Display name
    fn name(&self) -> &'static str;

    /// `true` for maximization, `false` for minimization
    fn is_maximize(&self) -> bool;

    /// Dimensionality of the problem
    fn num_vars(&self) -> usize;

    /// Bits per variable for binary encodings
    fn genes_per_var(&self) -> usize;

    /// Lower search bound shared by every variable
    fn lower_bound(&self) -> f64;

    /// Upper search bound shared by every variable
    fn upper_bound(&self) -> f64;

    /// Evaluate a decoded phenotype
    fn evaluate(&self, phenotype: &[f64]) -> f64;

    /// Map a raw minimization value onto a positive weight scale
    fn transferral(&self, raw_fitness: f64) -> f64 {
        raw_fitness
    }

    /// Best achievable objective value (reporting only)
    fn optimal_value(&self) -> f64;

    /// Search bounds as a [`Bounds`] value
    fn bounds(&self) -> Bounds {
        Bounds::new(self.lower_bound(), self.upper_bound())
    }
}

/// Decoding and evaluation context shared by every individual of a population
#[derive(Clone, Debug)]
pub struct Evaluator {
    function: Arc<dyn FitnessFunction>,
    encoding: Encoding,
}

impl Evaluator {
    /// Create an evaluator for the given function
    pub fn new(function: Arc<dyn FitnessFunction>, gray_coding: bool) -> Self {
        let encoding = Encoding::new(
            function.num_vars(),
            function.genes_per_var(),
            function.bounds(),
        )
        .with_gray_coding(gray_coding);
        Self { function, encoding }
    }

    /// The wrapped fitness function
    pub fn function(&self) -> &Arc<dyn FitnessFunction> {
        &self.function
    }

    /// Chromosome layout derived from the function
    pub fn encoding(&self) -> &Encoding {
        &self.encoding
    }

    /// Search bounds
    pub fn bounds(&self) -> Bounds {
        self.encoding.bounds
    }

    /// Whether the wrapped function is maximized
    pub fn is_maximize(&self) -> bool {
        self.function.is_maximize()
    }

    /// Objective value and transferral value of a phenotype
    pub fn score(&self, phenotype: &[f64]) -> (f64, f64) {
        let objective = self.function.evaluate(phenotype);
        let transferral = if self.function.is_maximize() {
            objective
        } else {
            self.function.transferral(objective)
        };
        (objective, transferral)
    }

    /// Whether objective `a` is better than objective `b`
    pub fn is_better(&self, a: f64, b: f64) -> bool {
        if self.is_maximize() {
            a > b
        } else {
            a < b
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fitness::benchmarks::{Sphere, SineRipple};

    #[test]
    fn test_evaluator_encoding_from_function() {
        let evaluator = Evaluator::new(Arc::new(Sphere::new()), true);
        let encoding = evaluator.encoding();
        assert_eq!(encoding.num_vars, 5);
        assert_eq!(encoding.genes_per_var, 14);
        assert_eq!(encoding.bounds, Bounds::new(-5.0, 5.0));
        assert!(encoding.gray_coding);
    }

    #[test]
    fn test_score_maximize_uses_objective() {
        let evaluator = Evaluator::new(Arc::new(SineRipple::new()), false);
        let (objective, transferral) = evaluator.score(&[0.0]);
        assert_eq!(objective, 2.0);
        assert_eq!(transferral, objective);
    }

    #[test]
    fn test_score_minimize_applies_transferral() {
        let evaluator = Evaluator::new(Arc::new(Sphere::new()), false);
        let (objective, transferral) = evaluator.score(&[1.0, 1.0, 0.0, 0.0, 0.0]);
        assert_eq!(objective, 2.0);
        assert_eq!(transferral, 125.0 - 2.0);
    }

    #[test]
    fn test_is_better_respects_direction() {
        let max = Evaluator::new(Arc::new(SineRipple::new()), false);
        assert!(max.is_better(3.0, 2.0));
        let min = Evaluator::new(Arc::new(Sphere::new()), false);
        assert!(min.is_better(2.0, 3.0));
    }
}
