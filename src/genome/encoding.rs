//! Chromosome layout and binary decoding
//!
//! A binary chromosome is `num_vars` consecutive blocks of `genes_per_var`
//! bits. Within a block bit `i` carries weight `2^i`; the genotype string
//! prints each block most-significant bit first.

use serde::{Deserialize, Serialize};

use crate::error::GenomeError;
use crate::genome::bounds::Bounds;

/// Largest block width that still fits the integer used for decoding
pub const MAX_BITS_PER_VAR: usize = 64;

/// Shape of a chromosome and how it maps onto the search space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Encoding {
    /// Number of decision variables
    pub num_vars: usize,
    /// Bits per variable (binary chromosomes only)
    pub genes_per_var: usize,
    /// Interval shared by every variable
    pub bounds: Bounds,
    /// Interpret each block as reflected binary gray code
    pub gray_coding: bool,
}

impl Encoding {
    /// Create a plain binary encoding
    pub fn new(num_vars: usize, genes_per_var: usize, bounds: Bounds) -> Self {
        Self {
            num_vars,
            genes_per_var,
            bounds,
            gray_coding: false,
        }
    }

    /// Enable or disable gray coding
    pub fn with_gray_coding(mut self, gray_coding: bool) -> Self {
        self.gray_coding = gray_coding;
        self
    }

    /// Total number of bits in a binary chromosome
    pub fn total_bits(&self) -> usize {
        self.num_vars * self.genes_per_var
    }

    /// Decode a flat bit sequence into one real value per variable
    pub fn decode_bits(&self, bits: &[bool]) -> Result<Vec<f64>, GenomeError> {
        if self.genes_per_var == 0 || self.genes_per_var > MAX_BITS_PER_VAR {
            return Err(GenomeError::InvalidStructure(format!(
                "{} bits per variable cannot be decoded",
                self.genes_per_var
            )));
        }
        if bits.len() != self.total_bits() {
            return Err(GenomeError::DimensionMismatch {
                expected: self.total_bits(),
                actual: bits.len(),
            });
        }

        Ok(bits
            .chunks(self.genes_per_var)
            .map(|block| {
                let raw = bits_to_integer(block);
                let value = if self.gray_coding {
                    gray_decode(raw)
                } else {
                    raw
                };
                scale(value, block.len(), &self.bounds)
            })
            .collect())
    }

    /// Render a flat bit sequence with each variable most-significant bit first
    pub fn genotype(&self, bits: &[bool]) -> String {
        let width = self.genes_per_var.max(1);
        bits.chunks(width)
            .flat_map(|block| block.iter().rev())
            .map(|&bit| if bit { '1' } else { '0' })
            .collect()
    }
}

/// Read a block as an unsigned integer, bit `i` weighing `2^i`
///
/// Blocks wider than 64 bits keep only their low 64 bits.
pub fn bits_to_integer(bits: &[bool]) -> u64 {
    bits.iter()
        .take(MAX_BITS_PER_VAR)
        .enumerate()
        .filter(|(_, bit)| **bit)
        .fold(0u64, |acc, (i, _)| acc | (1u64 << i))
}

/// Write the low `length` bits of an integer, least significant first
pub fn integer_to_bits(value: u64, length: usize) -> Vec<bool> {
    (0..length)
        .map(|i| i < MAX_BITS_PER_VAR && (value >> i) & 1 == 1)
        .collect()
}

/// Binary to reflected binary gray code
pub fn gray_encode(value: u64) -> u64 {
    value ^ (value >> 1)
}

/// Reflected binary gray code back to binary
pub fn gray_decode(gray: u64) -> u64 {
    let mut value = gray;
    let mut shift = 1;
    while shift < MAX_BITS_PER_VAR {
        value ^= value >> shift;
        shift <<= 1;
    }
    value
}

/// Map an integer of `length` bits onto `[lower, upper)`
pub fn scale(value: u64, length: usize, bounds: &Bounds) -> f64 {
    let levels = 2f64.powi(length as i32);
    value as f64 / levels * bounds.range() + bounds.lower
}
