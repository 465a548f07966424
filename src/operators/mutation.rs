//! Mutation operators
//!
//! Per-gene mutation for the binary and continuous representations. Both
//! operators re-evaluate the individual once after all changes.

use rand::Rng;

use crate::error::GenomeError;
use crate::fitness::traits::Evaluator;
use crate::genome::bit_string::BitString;
use crate::genome::real_vector::RealVector;
use crate::operators::traits::MutationOperator;
use crate::population::individual::{BinaryIndividual, ContinuousIndividual};

/// Uniform mutation
///
/// Replaces genes with random values within bounds.
#[derive(Clone, Debug)]
pub struct UniformMutation {
    /// Per-gene mutation probability (default: 1/n)
    pub mutation_probability: Option<f64>,
}

impl UniformMutation {
    /// Create a new uniform mutation
    pub fn new() -> Self {
        Self {
            mutation_probability: None,
        }
    }

    /// Set a fixed mutation probability per gene
    pub fn with_probability(mut self, probability: f64) -> Self {
        assert!(
            (0.0..=1.0).contains(&probability),
            "Probability must be in [0, 1]"
        );
        self.mutation_probability = Some(probability);
        self
    }
}

impl Default for UniformMutation {
    fn default() -> Self {
        Self::new()
    }
}

impl MutationOperator<RealVector> for UniformMutation {
    fn mutate<R: Rng + ?Sized>(
        &self,
        individual: &mut ContinuousIndividual,
        evaluator: &Evaluator,
        rng: &mut R,
    ) -> Result<(), GenomeError> {
        let n = individual.genes().len();
        let prob = self.mutation_probability.unwrap_or(1.0 / n as f64);
        let bounds = evaluator.bounds();

        let mut replacements = Vec::new();
        for i in 0..n {
            if rng.gen::<f64>() < prob {
                replacements.push((i, bounds.sample(rng)));
            }
        }

        if replacements.is_empty() {
            return Ok(());
        }
        individual.modify(evaluator, |genes| {
            for (i, value) in replacements {
                genes[i] = value;
            }
        })
    }

    fn mutation_probability(&self) -> f64 {
        self.mutation_probability.unwrap_or(1.0)
    }
}

/// Bit-flip mutation for bit strings
///
/// Flips each bit with a given probability.
#[derive(Clone, Debug)]
pub struct BitFlipMutation {
    /// Per-bit mutation probability (default: 1/n)
    pub mutation_probability: Option<f64>,
}

impl BitFlipMutation {
    /// Create a new bit-flip mutation
    pub fn new() -> Self {
        Self {
            mutation_probability: None,
        }
    }

    /// Set a fixed mutation probability per bit
    pub fn with_probability(mut self, probability: f64) -> Self {
        assert!(
            (0.0..=1.0).contains(&probability),
            "Probability must be in [0, 1]"
        );
        self.mutation_probability = Some(probability);
        self
    }
}

impl Default for BitFlipMutation {
    fn default() -> Self {
        Self::new()
    }
}

impl MutationOperator<BitString> for BitFlipMutation {
    fn mutate<R: Rng + ?Sized>(
        &self,
        individual: &mut BinaryIndividual,
        evaluator: &Evaluator,
        rng: &mut R,
    ) -> Result<(), GenomeError> {
        let n = individual.genes().len();
        let prob = self.mutation_probability.unwrap_or(1.0 / n as f64);

        let flips: Vec<usize> = (0..n).filter(|_| rng.gen::<f64>() < prob).collect();
        if flips.is_empty() {
            return Ok(());
        }
        individual.modify(evaluator, |bits| {
            for i in flips {
                bits[i] = !bits[i];
            }
        })
    }

    fn mutation_probability(&self) -> f64 {
        self.mutation_probability.unwrap_or(1.0)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::fitness::benchmarks::{Sphere, SineRipple};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_bit_flip_zero_probability() {
        let evaluator = Evaluator::new(Arc::new(SineRipple::new()), false);
        let mut rng = StdRng::seed_from_u64(1);
        let original = BinaryIndividual::random(&mut rng, &evaluator).unwrap();
        let mut individual = original.clone();
        BitFlipMutation::new()
            .with_probability(0.0)
            .mutate(&mut individual, &evaluator, &mut rng)
            .unwrap();
        assert_eq!(individual, original);
    }

    #[test]
    fn test_bit_flip_all() {
        let evaluator = Evaluator::new(Arc::new(SineRipple::new()), false);
        let mut individual = BinaryIndividual::from_genes(vec![false; 12], &evaluator).unwrap();
        let mut rng = StdRng::seed_from_u64(2);
        BitFlipMutation::new()
            .with_probability(1.0)
            .mutate(&mut individual, &evaluator, &mut rng)
            .unwrap();
        assert!(individual.genes().iter().all(|&b| b));
        assert_eq!(individual.phenotype()[0], 4095.0 / 4096.0 * 3.0 - 1.0);
        assert_eq!(individual.genotype(), Some("111111111111"));
    }

    #[test]
    fn test_bit_flip_rate() {
        let evaluator = Evaluator::new(Arc::new(Sphere::new()), false);
        let mut rng = StdRng::seed_from_u64(3);
        let mutation = BitFlipMutation::new().with_probability(0.1);
        let mut flipped = 0;
        for _ in 0..100 {
            let original = BinaryIndividual::random(&mut rng, &evaluator).unwrap();
            let mut individual = original.clone();
            mutation.mutate(&mut individual, &evaluator, &mut rng).unwrap();
            flipped += original
                .genes()
                .iter()
                .zip(individual.genes())
                .filter(|(a, b)| a != b)
                .count();
        }
        // 100 individuals × 70 bits × 0.1
        assert!(flipped > 550 && flipped < 850, "flipped {} bits", flipped);
    }

    #[test]
    fn test_uniform_stays_in_bounds() {
        let evaluator = Evaluator::new(Arc::new(Sphere::new()), false);
        let mut individual = ContinuousIndividual::from_genes(vec![0.0; 5], &evaluator).unwrap();
        let mut rng = StdRng::seed_from_u64(4);
        UniformMutation::new()
            .with_probability(1.0)
            .mutate(&mut individual, &evaluator, &mut rng)
            .unwrap();
        assert!(individual.genes().iter().all(|&x| (-5.0..5.0).contains(&x)));
        assert!(individual.genes().iter().any(|&x| x != 0.0));
        let expected: f64 = individual.genes().iter().map(|x| x * x).sum();
        assert_eq!(individual.objective(), expected);
    }

    #[test]
    fn test_default_probability_is_one_over_n() {
        let evaluator = Evaluator::new(Arc::new(Sphere::new()), false);
        let mut rng = StdRng::seed_from_u64(5);
        let mut changed = 0;
        for _ in 0..200 {
            let mut individual = ContinuousIndividual::from_genes(vec![0.0; 5], &evaluator).unwrap();
            UniformMutation::default()
                .mutate(&mut individual, &evaluator, &mut rng)
                .unwrap();
            changed += individual.genes().iter().filter(|&&x| x != 0.0).count();
        }
        // expect one gene per individual on average
        assert!(changed > 150 && changed < 250, "changed {} genes", changed);
    }
}
