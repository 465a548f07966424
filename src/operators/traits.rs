//! Operator traits
//!
//! This module defines the core operator traits for genetic algorithms.

use rand::Rng;

use crate::error::{EvoResult, GenomeError};
use crate::fitness::traits::Evaluator;
use crate::genome::traits::Chromosome;
use crate::population::individual::Individual;

/// Selection operator trait
///
/// Selects individuals from a population for reproduction.
pub trait SelectionOperator<C: Chromosome>: Send + Sync {
    /// Select a single individual from the population
    ///
    /// Returns the index of the selected individual.
    fn select<R: Rng + ?Sized>(&self, population: &[Individual<C>], rng: &mut R) -> usize;

    /// Select multiple individuals from the population
    fn select_many<R: Rng + ?Sized>(
        &self,
        population: &[Individual<C>],
        count: usize,
        rng: &mut R,
    ) -> Vec<usize> {
        (0..count).map(|_| self.select(population, rng)).collect()
    }
}

/// Crossover operator trait
///
/// Combines genetic material from two (or three) parents into exactly two
/// children. Parents are never modified; children are built from copies.
pub trait CrossoverOperator<C: Chromosome>: Send + Sync {
    /// Apply crossover and produce two offspring
    ///
    /// `parent_c` is only consulted by operators whose
    /// [`parents_required`](Self::parents_required) is 3.
    fn crossover<R: Rng + ?Sized>(
        &self,
        parent_a: &Individual<C>,
        parent_b: &Individual<C>,
        parent_c: Option<&Individual<C>>,
        evaluator: &Evaluator,
        rng: &mut R,
    ) -> EvoResult<(Individual<C>, Individual<C>)>;

    /// Number of parents consumed per mating
    fn parents_required(&self) -> usize {
        2
    }

    /// Probability that crossover is applied to a mating pair
    fn crossover_probability(&self) -> f64;

    /// Display name of the operator
    fn name(&self) -> &'static str;
}

/// Mutation operator trait
///
/// Applies random changes to an individual in place; the individual is
/// re-evaluated whenever its chromosome changed.
pub trait MutationOperator<C: Chromosome>: Send + Sync {
    /// Apply mutation to an individual
    fn mutate<R: Rng + ?Sized>(
        &self,
        individual: &mut Individual<C>,
        evaluator: &Evaluator,
        rng: &mut R,
    ) -> Result<(), GenomeError>;

    /// Get the mutation probability per gene
    fn mutation_probability(&self) -> f64;
}
