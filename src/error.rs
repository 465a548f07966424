//! Error types for sga-variation
//!
//! This module defines all error types used throughout the library.

use thiserror::Error;

/// Error type for chromosome operations
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GenomeError {
    /// Invalid chromosome structure
    #[error("Invalid chromosome structure: {0}")]
    InvalidStructure(String),

    /// Dimension mismatch
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
}

/// Error type for operator failures
#[derive(Debug, Error, Clone, PartialEq)]
pub enum OperatorError {
    /// Crossover operation failed
    #[error("Crossover failed: {0}")]
    CrossoverFailed(String),

    /// No operator is registered under the given id
    #[error("Unknown operator id: {0}")]
    UnknownOperator(u32),

    /// A rejection-sampling loop never produced an in-bounds sample
    #[error("{operator} gave up after {attempts} rejected samples")]
    RejectionLimitExceeded {
        operator: &'static str,
        attempts: usize,
    },
}

/// Top-level error type for evolution operations
#[derive(Debug, Error)]
pub enum EvolutionError {
    /// Genome error
    #[error("Genome error: {0}")]
    Genome(#[from] GenomeError),

    /// Operator error
    #[error("Operator error: {0}")]
    Operator(#[from] OperatorError),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// Numerical instability
    #[error("Numerical instability: {0}")]
    Numerical(String),

    /// Empty population
    #[error("Empty population")]
    EmptyPopulation,

    /// `reproduce` was called without a preceding `select`
    #[error("Mating pool has {actual} members, expected {expected}")]
    MatingPoolNotFilled { expected: usize, actual: usize },
}

/// Result type alias for evolution operations
pub type EvoResult<T> = Result<T, EvolutionError>;
