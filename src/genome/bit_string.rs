//! Bit string chromosome
//!
//! This module provides the fixed-length bit string used by binary and
//! gray-coded individuals.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::GenomeError;
use crate::genome::encoding::Encoding;
use crate::genome::traits::Chromosome;

/// Fixed-length bit string chromosome
///
/// Variables are stored as consecutive blocks, each least significant bit
/// first.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BitString {
    /// The bits of this chromosome
    bits: Vec<bool>,
}

impl Chromosome for BitString {
    type Gene = bool;

    fn genes(&self) -> &[bool] {
        &self.bits
    }

    fn genes_mut(&mut self) -> &mut [bool] {
        &mut self.bits
    }

    fn from_genes(genes: Vec<bool>) -> Self {
        Self { bits: genes }
    }

    fn expected_len(encoding: &Encoding) -> usize {
        encoding.total_bits()
    }

    fn generate<R: Rng + ?Sized>(rng: &mut R, encoding: &Encoding) -> Self {
        let bits = (0..encoding.total_bits()).map(|_| rng.gen()).collect();
        Self { bits }
    }

    fn phenotype(&self, encoding: &Encoding) -> Result<Vec<f64>, GenomeError> {
        encoding.decode_bits(&self.bits)
    }

    fn genotype(&self, encoding: &Encoding) -> Option<String> {
        Some(encoding.genotype(&self.bits))
    }
}
