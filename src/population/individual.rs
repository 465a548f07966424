//! Individual type
//!
//! An individual owns one chromosome together with everything derived from
//! it. The chromosome is private: every change goes through
//! [`Individual::modify`], which re-decodes and re-evaluates before the
//! individual can be read again.

use std::fmt;

use rand::Rng;
use serde::Serialize;

use crate::error::GenomeError;
use crate::fitness::traits::Evaluator;
use crate::genome::bit_string::BitString;
use crate::genome::real_vector::RealVector;
use crate::genome::traits::Chromosome;

/// A candidate solution with its decoded and evaluated state
///
/// Individuals serialize for reporting but are never deserialized, since a
/// loaded copy would bypass evaluation.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(bound = "")]
pub struct Individual<C: Chromosome> {
    chromosome: C,
    phenotype: Vec<f64>,
    objective: f64,
    transferral: f64,
    relative_fitness: f64,
    genotype: Option<String>,
    maximize: bool,
}

/// Individual over a binary or gray-coded bit string
pub type BinaryIndividual = Individual<BitString>;

/// Individual over a real-valued vector
pub type ContinuousIndividual = Individual<RealVector>;

impl<C: Chromosome> Individual<C> {
    /// Create an individual from a chromosome, decoding and evaluating it
    pub fn new(chromosome: C, evaluator: &Evaluator) -> Result<Self, GenomeError> {
        let expected = C::expected_len(evaluator.encoding());
        if chromosome.len() != expected {
            return Err(GenomeError::DimensionMismatch {
                expected,
                actual: chromosome.len(),
            });
        }

        let mut individual = Self {
            chromosome,
            phenotype: Vec::new(),
            objective: 0.0,
            transferral: 0.0,
            relative_fitness: 0.0,
            genotype: None,
            maximize: evaluator.is_maximize(),
        };
        individual.update_values(evaluator)?;
        Ok(individual)
    }

    /// Create an individual with a random chromosome
    pub fn random<R: Rng + ?Sized>(rng: &mut R, evaluator: &Evaluator) -> Result<Self, GenomeError> {
        Self::new(C::generate(rng, evaluator.encoding()), evaluator)
    }

    /// Create an individual from raw genes
    pub fn from_genes(genes: Vec<C::Gene>, evaluator: &Evaluator) -> Result<Self, GenomeError> {
        Self::new(C::from_genes(genes), evaluator)
    }

    /// Change the chromosome in place and recompute all derived values
    pub fn modify<F>(&mut self, evaluator: &Evaluator, edit: F) -> Result<(), GenomeError>
    where
        F: FnOnce(&mut [C::Gene]),
    {
        edit(self.chromosome.genes_mut());
        self.update_values(evaluator)
    }

    /// Decode and evaluate the current chromosome again
    pub fn update_values(&mut self, evaluator: &Evaluator) -> Result<(), GenomeError> {
        let encoding = evaluator.encoding();
        let phenotype = self.chromosome.phenotype(encoding)?;
        let (objective, transferral) = evaluator.score(&phenotype);
        self.genotype = self.chromosome.genotype(encoding);
        self.phenotype = phenotype;
        self.objective = objective;
        self.transferral = transferral;
        self.maximize = evaluator.is_maximize();
        Ok(())
    }

    /// The stored chromosome
    pub fn chromosome(&self) -> &C {
        &self.chromosome
    }

    /// The chromosome genes
    pub fn genes(&self) -> &[C::Gene] {
        self.chromosome.genes()
    }

    /// Take the chromosome out of this individual
    pub fn into_chromosome(self) -> C {
        self.chromosome
    }

    /// Decoded variable values
    pub fn phenotype(&self) -> &[f64] {
        &self.phenotype
    }

    /// Raw objective value
    pub fn objective(&self) -> f64 {
        self.objective
    }

    /// Transferral value (equal to the objective for maximization problems)
    pub fn transferral(&self) -> f64 {
        self.transferral
    }

    /// Share of the population's total selection weight
    pub fn relative_fitness(&self) -> f64 {
        self.relative_fitness
    }

    pub(crate) fn set_relative_fitness(&mut self, relative_fitness: f64) {
        self.relative_fitness = relative_fitness;
    }

    /// Value fed into fitness-proportionate selection
    pub fn selection_weight(&self, maximize: bool) -> f64 {
        if maximize {
            self.objective
        } else {
            self.transferral
        }
    }

    /// Genotype string, most significant bit first (binary chromosomes only)
    pub fn genotype(&self) -> Option<&str> {
        self.genotype.as_deref()
    }
}

impl<C: Chromosome> fmt::Display for Individual<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  Objective Value: {}", self.objective)?;
        let values: Vec<String> = self.phenotype.iter().map(|v| v.to_string()).collect();
        writeln!(f, "  Real Values: [{}]", values.join(", "))?;
        write!(f, "  Relative Fitness: {}", self.relative_fitness)?;
        if let Some(genotype) = &self.genotype {
            write!(f, "\n  Genotype: {}", genotype)?;
        }
        if !self.maximize {
            write!(f, "\n  Fitness Transferral: {}", self.transferral)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::fitness::benchmarks::{Sphere, SineRipple};
    use crate::fitness::traits::FitnessFunction;
    use approx::assert_abs_diff_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn sine_ripple() -> Evaluator {
        Evaluator::new(Arc::new(SineRipple::new()), false)
    }

    fn reference_bits() -> Vec<bool> {
        vec![
            true, true, false, true, false, true, true, false, false, true, false, true,
        ]
    }

    #[test]
    fn test_random_individual_within_bounds() {
        let mut rng = StdRng::seed_from_u64(1);
        let evaluator = sine_ripple();
        for _ in 0..50 {
            let individual = BinaryIndividual::random(&mut rng, &evaluator).unwrap();
            let x = individual.phenotype()[0];
            assert!(x >= -1.0 && x < 2.0);
        }
    }

    #[test]
    fn test_reference_chromosome() {
        let individual = BinaryIndividual::from_genes(reference_bits(), &sine_ripple()).unwrap();
        assert_abs_diff_eq!(individual.phenotype()[0], 0.953369, epsilon = 0.0008);
        assert_abs_diff_eq!(individual.objective(), 1.051966, epsilon = 0.0008);
        assert_eq!(individual.genotype(), Some("101001101011"));
        assert_eq!(individual.transferral(), individual.objective());
    }

    #[test]
    fn test_wrong_length_rejected() {
        let err = BinaryIndividual::from_genes(vec![true; 10], &sine_ripple()).unwrap_err();
        assert_eq!(
            err,
            GenomeError::DimensionMismatch {
                expected: 12,
                actual: 10
            }
        );
    }

    #[test]
    fn test_modify_recomputes_everything() {
        let evaluator = sine_ripple();
        let mut individual = BinaryIndividual::from_genes(vec![false; 12], &evaluator).unwrap();
        assert_eq!(individual.phenotype()[0], -1.0);

        individual
            .modify(&evaluator, |genes| genes[11] = true)
            .unwrap();

        // bit 11 weighs 2^11 = half the range
        assert_eq!(individual.phenotype()[0], 0.5);
        assert_eq!(individual.objective(), SineRipple::new().evaluate(&[0.5]));
        assert_eq!(individual.genotype(), Some("100000000000"));
    }

    #[test]
    fn test_clone_is_idempotent() {
        let mut rng = StdRng::seed_from_u64(9);
        let evaluator = Evaluator::new(Arc::new(Sphere::new()), true);
        let original = BinaryIndividual::random(&mut rng, &evaluator).unwrap();
        let mut copy = original.clone();
        copy.update_values(&evaluator).unwrap();
        assert_eq!(copy.phenotype(), original.phenotype());
        assert_eq!(copy.objective(), original.objective());
        assert_eq!(copy.transferral(), original.transferral());
    }

    #[test]
    fn test_continuous_individual_minimization() {
        let evaluator = Evaluator::new(Arc::new(Sphere::new()), false);
        let individual =
            ContinuousIndividual::from_genes(vec![1.0, 0.0, 0.0, 0.0, 2.0], &evaluator).unwrap();
        assert_eq!(individual.phenotype(), &[1.0, 0.0, 0.0, 0.0, 2.0]);
        assert_eq!(individual.objective(), 5.0);
        assert_eq!(individual.transferral(), 120.0);
        assert_eq!(individual.selection_weight(false), 120.0);
        assert_eq!(individual.selection_weight(true), 5.0);
        assert!(individual.genotype().is_none());
    }

    #[test]
    fn test_display_lists_values() {
        let individual = BinaryIndividual::from_genes(reference_bits(), &sine_ripple()).unwrap();
        let text = individual.to_string();
        assert!(text.contains("Objective Value"));
        assert!(text.contains("Genotype: 101001101011"));
        assert!(!text.contains("Fitness Transferral"));
    }

    #[test]
    fn test_serializes_evaluated_state() {
        let individual = BinaryIndividual::from_genes(reference_bits(), &sine_ripple()).unwrap();
        let json = serde_json::to_value(&individual).unwrap();
        assert_eq!(json["genotype"], "101001101011");
        assert_eq!(json["objective"], individual.objective());
        assert_eq!(json["maximize"], true);
    }

    #[test]
    fn test_display_transferral_for_minimization() {
        let evaluator = Evaluator::new(Arc::new(Sphere::new()), false);
        // 62.5 = 125 - 62.5, so objective and transferral coincide
        let individual =
            ContinuousIndividual::from_genes(vec![5.0, 5.0, 2.5, 2.5, 0.0], &evaluator).unwrap();
        assert_eq!(individual.objective(), individual.transferral());
        let text = individual.to_string();
        assert!(text.contains("Fitness Transferral: 62.5"));
        assert!(!text.contains("Genotype"));
    }
}
