//! Population type
//!
//! This module provides the Population container together with the
//! select/reproduce generation cycle.

use std::sync::Arc;

use rand::Rng;
use tracing::{debug, warn};

use crate::config::GaConfig;
use crate::error::{EvoResult, EvolutionError, OperatorError};
use crate::fitness::traits::{Evaluator, FitnessFunction};
use crate::genome::bit_string::BitString;
use crate::genome::real_vector::RealVector;
use crate::genome::traits::Chromosome;
use crate::operators::binary::BinaryCrossover;
use crate::operators::continuous::ContinuousCrossover;
use crate::operators::mutation::{BitFlipMutation, UniformMutation};
use crate::operators::selection::RouletteSelection;
use crate::operators::traits::{CrossoverOperator, MutationOperator, SelectionOperator};
use crate::population::individual::Individual;

/// A fixed-size population with its mating pool and variation operators
///
/// One generation is `select` followed by `reproduce`. Between the two calls
/// the mating pool holds clones of the selected members; otherwise it is
/// empty.
#[derive(Clone, Debug)]
pub struct Population<C, X, M>
where
    C: Chromosome,
    X: CrossoverOperator<C>,
    M: MutationOperator<C>,
{
    members: Vec<Individual<C>>,
    mating_pool: Vec<Individual<C>>,
    evaluator: Evaluator,
    selection: RouletteSelection,
    crossover: X,
    mutation: M,
    generation: usize,
    fallback_pairs: usize,
}

/// Population of bit-string individuals
pub type BinaryPopulation = Population<BitString, BinaryCrossover, BitFlipMutation>;

/// Population of real-vector individuals
pub type ContinuousPopulation = Population<RealVector, ContinuousCrossover, UniformMutation>;

impl<C, X, M> Population<C, X, M>
where
    C: Chromosome,
    X: CrossoverOperator<C>,
    M: MutationOperator<C>,
{
    /// Create a random population of `size` members
    pub fn new<R: Rng + ?Sized>(
        evaluator: Evaluator,
        crossover: X,
        mutation: M,
        size: usize,
        rng: &mut R,
    ) -> EvoResult<Self> {
        validate_size(size, crossover.parents_required())?;
        let members = (0..size)
            .map(|_| Individual::random(rng, &evaluator))
            .collect::<Result<Vec<_>, _>>()?;
        Self::assemble(members, evaluator, crossover, mutation)
    }

    /// Create a population from existing members
    pub fn from_members(
        members: Vec<Individual<C>>,
        evaluator: Evaluator,
        crossover: X,
        mutation: M,
    ) -> EvoResult<Self> {
        validate_size(members.len(), crossover.parents_required())?;
        Self::assemble(members, evaluator, crossover, mutation)
    }

    fn assemble(
        members: Vec<Individual<C>>,
        evaluator: Evaluator,
        crossover: X,
        mutation: M,
    ) -> EvoResult<Self> {
        let mut population = Self {
            members,
            mating_pool: Vec::new(),
            evaluator,
            selection: RouletteSelection::new(),
            crossover,
            mutation,
            generation: 0,
            fallback_pairs: 0,
        };
        population.compute_relative_fitness()?;
        Ok(population)
    }

    /// Normalize every member's selection weight by the population total
    ///
    /// Fails when the total weight is zero, negative or not finite.
    pub fn compute_relative_fitness(&mut self) -> EvoResult<()> {
        if self.members.is_empty() {
            return Err(EvolutionError::EmptyPopulation);
        }

        let maximize = self.evaluator.is_maximize();
        let total: f64 = self
            .members
            .iter()
            .map(|m| m.selection_weight(maximize))
            .sum();
        if !total.is_finite() || total <= 0.0 {
            return Err(EvolutionError::Numerical(format!(
                "total selection weight is {}",
                total
            )));
        }

        for member in &mut self.members {
            let share = member.selection_weight(maximize) / total;
            member.set_relative_fitness(share);
        }
        Ok(())
    }

    /// Fill the mating pool by roulette-wheel selection with replacement
    pub fn select<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let picks = self.selection.select_many(&self.members, self.members.len(), rng);
        self.mating_pool = picks.into_iter().map(|i| self.members[i].clone()).collect();
    }

    /// Replace the population with the offspring of the mating pool
    ///
    /// Adjacent pool members are paired, crossed over and both children are
    /// mutated. For three-parent operators a random pool member other than
    /// the pair acts as the voting parent. A pair whose crossover exhausts
    /// its rejection cap passes on unchanged copies of itself and is counted
    /// in [`fallback_pairs`](Self::fallback_pairs). The pool is empty
    /// afterwards and relative fitness is recomputed.
    pub fn reproduce<R: Rng + ?Sized>(&mut self, rng: &mut R) -> EvoResult<()> {
        let size = self.members.len();
        if self.mating_pool.len() != size {
            return Err(EvolutionError::MatingPoolNotFilled {
                expected: size,
                actual: self.mating_pool.len(),
            });
        }

        let pool = std::mem::take(&mut self.mating_pool);
        let three_parents = self.crossover.parents_required() == 3;
        let mut offspring = Vec::with_capacity(size);

        for i in (0..size).step_by(2) {
            let children = if three_parents {
                let j = loop {
                    let candidate = rng.gen_range(0..size);
                    if candidate != i && candidate != i + 1 {
                        break candidate;
                    }
                };
                self.crossover.crossover(
                    &pool[i],
                    &pool[j],
                    Some(&pool[i + 1]),
                    &self.evaluator,
                    rng,
                )
            } else {
                self.crossover
                    .crossover(&pool[i], &pool[i + 1], None, &self.evaluator, rng)
            };

            let (mut child_a, mut child_b) = match children {
                Ok(children) => children,
                Err(EvolutionError::Operator(OperatorError::RejectionLimitExceeded {
                    operator,
                    attempts,
                })) => {
                    warn!(
                        generation = self.generation,
                        pair = i / 2,
                        operator,
                        attempts,
                        "crossover gave up, keeping the mating pair"
                    );
                    self.fallback_pairs += 1;
                    (pool[i].clone(), pool[i + 1].clone())
                }
                Err(e) => return Err(e),
            };

            self.mutation.mutate(&mut child_a, &self.evaluator, rng)?;
            self.mutation.mutate(&mut child_b, &self.evaluator, rng)?;
            offspring.push(child_a);
            offspring.push(child_b);
        }

        self.members = offspring;
        self.generation += 1;
        self.compute_relative_fitness()?;

        debug!(
            generation = self.generation,
            best = self.best().map(|b| b.objective()),
            mean = self.mean_objective(),
            "generation reproduced"
        );
        Ok(())
    }

    /// Run one full generation: `select` then `reproduce`
    pub fn step<R: Rng + ?Sized>(&mut self, rng: &mut R) -> EvoResult<()> {
        self.select(rng);
        self.reproduce(rng)
    }

    /// Current members
    pub fn members(&self) -> &[Individual<C>] {
        &self.members
    }

    /// Mating pool (empty outside a select/reproduce cycle)
    pub fn mating_pool(&self) -> &[Individual<C>] {
        &self.mating_pool
    }

    /// Decoding and evaluation context
    pub fn evaluator(&self) -> &Evaluator {
        &self.evaluator
    }

    /// Configured crossover operator
    pub fn crossover(&self) -> &X {
        &self.crossover
    }

    /// Configured mutation operator
    pub fn mutation(&self) -> &M {
        &self.mutation
    }

    /// Number of completed generations
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Mating pairs so far that kept copies of themselves because crossover
    /// hit its rejection cap
    pub fn fallback_pairs(&self) -> usize {
        self.fallback_pairs
    }

    /// Number of members
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Check if the population has no members
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Member with the best objective value
    pub fn best(&self) -> Option<&Individual<C>> {
        self.members.iter().reduce(|best, m| {
            if self.evaluator.is_better(m.objective(), best.objective()) {
                m
            } else {
                best
            }
        })
    }

    /// Member with the worst objective value
    pub fn worst(&self) -> Option<&Individual<C>> {
        self.members.iter().reduce(|worst, m| {
            if self.evaluator.is_better(worst.objective(), m.objective()) {
                m
            } else {
                worst
            }
        })
    }

    /// Mean objective value over all members
    pub fn mean_objective(&self) -> f64 {
        if self.members.is_empty() {
            return 0.0;
        }
        self.members.iter().map(|m| m.objective()).sum::<f64>() / self.members.len() as f64
    }
}

impl BinaryPopulation {
    /// Create a random bit-string population
    ///
    /// Unknown operator ids fall back to single point crossover. Crossover
    /// and mutation use the default probabilities of [`GaConfig`].
    pub fn with_function<R: Rng + ?Sized>(
        function: Arc<dyn FitnessFunction>,
        crossover_id: u32,
        size: usize,
        gray_coding: bool,
        rng: &mut R,
    ) -> EvoResult<Self> {
        let config = GaConfig::default()
            .with_population_size(size)
            .with_gray_coding(gray_coding);
        Self::from_config(function, crossover_id, &config, rng)
    }

    /// Create a random bit-string population from a configuration
    pub fn from_config<R: Rng + ?Sized>(
        function: Arc<dyn FitnessFunction>,
        crossover_id: u32,
        config: &GaConfig,
        rng: &mut R,
    ) -> EvoResult<Self> {
        config.validate()?;
        let evaluator = Evaluator::new(function, config.gray_coding);
        let crossover = BinaryCrossover::from_id_or_default(crossover_id)
            .with_probability(config.crossover_probability);
        let mutation = BitFlipMutation::new().with_probability(config.mutation_probability);
        Self::new(evaluator, crossover, mutation, config.population_size, rng)
    }
}

impl ContinuousPopulation {
    /// Create a random real-vector population
    ///
    /// Unknown operator ids fall back to whole arithmetic crossover.
    pub fn with_function<R: Rng + ?Sized>(
        function: Arc<dyn FitnessFunction>,
        crossover_id: u32,
        size: usize,
        rng: &mut R,
    ) -> EvoResult<Self> {
        let config = GaConfig::default().with_population_size(size);
        Self::from_config(function, crossover_id, &config, rng)
    }

    /// Create a random real-vector population from a configuration
    pub fn from_config<R: Rng + ?Sized>(
        function: Arc<dyn FitnessFunction>,
        crossover_id: u32,
        config: &GaConfig,
        rng: &mut R,
    ) -> EvoResult<Self> {
        config.validate()?;
        let evaluator = Evaluator::new(function, false);
        let crossover = ContinuousCrossover::from_id_or_default(crossover_id)
            .with_probability(config.crossover_probability)
            .with_max_attempts(config.max_rejection_attempts);
        let mutation = UniformMutation::new().with_probability(config.mutation_probability);
        Self::new(evaluator, crossover, mutation, config.population_size, rng)
    }
}

fn validate_size(size: usize, parents_required: usize) -> EvoResult<()> {
    if size == 0 || size % 2 != 0 {
        return Err(EvolutionError::Configuration(format!(
            "population size must be even and non-zero, got {}",
            size
        )));
    }
    if parents_required == 3 && size < 4 {
        return Err(EvolutionError::Configuration(format!(
            "three parent crossover needs at least 4 members, got {}",
            size
        )));
    }
    Ok(())
}
