//! Core chromosome trait
//!
//! This module defines the `Chromosome` trait shared by the binary and
//! continuous representations.

use std::fmt::Debug;

use rand::Rng;
use serde::{de::DeserializeOwned, Serialize};

use crate::error::GenomeError;
use crate::genome::encoding::Encoding;

/// Stored genetic material of one candidate solution
///
/// A chromosome is a flat sequence of genes. It knows how to generate itself
/// at random and how to turn itself into the real-valued phenotype handed to
/// the fitness function; everything else lives in the operators.
pub trait Chromosome:
    Clone + Debug + PartialEq + Send + Sync + Serialize + DeserializeOwned + 'static
{
    /// The type of a single gene
    type Gene: Copy + PartialEq + Debug + Send + Sync;

    /// Get the genes as a slice
    fn genes(&self) -> &[Self::Gene];

    /// Get the genes as a mutable slice
    fn genes_mut(&mut self) -> &mut [Self::Gene];

    /// Create from a vector of genes
    fn from_genes(genes: Vec<Self::Gene>) -> Self;

    /// Number of genes this representation needs under `encoding`
    fn expected_len(encoding: &Encoding) -> usize;

    /// Generate a random chromosome for the given encoding
    fn generate<R: Rng + ?Sized>(rng: &mut R, encoding: &Encoding) -> Self;

    /// Decode into one real value per variable
    fn phenotype(&self, encoding: &Encoding) -> Result<Vec<f64>, GenomeError>;

    /// Human-readable genotype, if the representation has one
    fn genotype(&self, _encoding: &Encoding) -> Option<String> {
        None
    }

    /// Number of genes
    fn len(&self) -> usize {
        self.genes().len()
    }

    /// Check if the chromosome has no genes
    fn is_empty(&self) -> bool {
        self.genes().is_empty()
    }
}
