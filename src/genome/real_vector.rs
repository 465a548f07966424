//! Real-valued vector chromosome
//!
//! Continuous individuals store their phenotype directly, one gene per
//! variable.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::GenomeError;
use crate::genome::encoding::Encoding;
use crate::genome::traits::Chromosome;

/// Fixed-length real-valued vector chromosome
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RealVector {
    /// The genes (values) of this chromosome
    genes: Vec<f64>,
}

impl Chromosome for RealVector {
    type Gene = f64;

    fn genes(&self) -> &[f64] {
        &self.genes
    }

    fn genes_mut(&mut self) -> &mut [f64] {
        &mut self.genes
    }

    fn from_genes(genes: Vec<f64>) -> Self {
        Self { genes }
    }

    fn expected_len(encoding: &Encoding) -> usize {
        encoding.num_vars
    }

    fn generate<R: Rng + ?Sized>(rng: &mut R, encoding: &Encoding) -> Self {
        let genes = (0..encoding.num_vars)
            .map(|_| encoding.bounds.sample(rng))
            .collect();
        Self { genes }
    }

    fn phenotype(&self, encoding: &Encoding) -> Result<Vec<f64>, GenomeError> {
        if self.genes.len() != encoding.num_vars {
            return Err(GenomeError::DimensionMismatch {
                expected: encoding.num_vars,
                actual: self.genes.len(),
            });
        }
        Ok(self.genes.clone())
    }
}
