//! GA configuration
//!
//! Run parameters shared by population construction and the experiment
//! driver.

use serde::{Deserialize, Serialize};

use crate::error::{EvoResult, EvolutionError};

/// Configuration for a GA experiment
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GaConfig {
    /// Population size (even, for pairwise mating)
    pub population_size: usize,
    /// Generations per trial
    pub max_generations: usize,
    /// Independent trials per experiment
    pub trials: usize,
    /// Probability that a mating pair is recombined
    pub crossover_probability: f64,
    /// Per-gene mutation probability
    pub mutation_probability: f64,
    /// Decode bit strings as reflected binary gray code
    pub gray_coding: bool,
    /// Cap on rejected samples in heuristic and blend crossover
    pub max_rejection_attempts: usize,
    /// Base seed; trial `t` is seeded with `seed + t`. Entropy when `None`.
    pub seed: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 20,
            max_generations: 20,
            trials: 30,
            crossover_probability: 0.8,
            mutation_probability: 0.01,
            gray_coding: false,
            max_rejection_attempts: 1000,
            seed: None,
        }
    }
}

impl GaConfig {
    /// Set the population size
    pub fn with_population_size(mut self, population_size: usize) -> Self {
        self.population_size = population_size;
        self
    }

    /// Set the number of generations per trial
    pub fn with_max_generations(mut self, max_generations: usize) -> Self {
        self.max_generations = max_generations;
        self
    }

    /// Set the number of trials
    pub fn with_trials(mut self, trials: usize) -> Self {
        self.trials = trials;
        self
    }

    /// Set the crossover probability
    pub fn with_crossover_probability(mut self, probability: f64) -> Self {
        self.crossover_probability = probability;
        self
    }

    /// Set the per-gene mutation probability
    pub fn with_mutation_probability(mut self, probability: f64) -> Self {
        self.mutation_probability = probability;
        self
    }

    /// Enable or disable gray decoding
    pub fn with_gray_coding(mut self, gray_coding: bool) -> Self {
        self.gray_coding = gray_coding;
        self
    }

    /// Set the rejection-sampling cap
    pub fn with_max_rejection_attempts(mut self, attempts: usize) -> Self {
        self.max_rejection_attempts = attempts;
        self
    }

    /// Set the base seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check the configuration for values the GA cannot run with
    pub fn validate(&self) -> EvoResult<()> {
        if self.population_size == 0 || self.population_size % 2 != 0 {
            return Err(EvolutionError::Configuration(format!(
                "population size must be even and non-zero, got {}",
                self.population_size
            )));
        }
        for (name, p) in [
            ("crossover probability", self.crossover_probability),
            ("mutation probability", self.mutation_probability),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(EvolutionError::Configuration(format!(
                    "{} must be in [0, 1], got {}",
                    name, p
                )));
            }
        }
        if self.max_rejection_attempts == 0 {
            return Err(EvolutionError::Configuration(
                "rejection cap must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
