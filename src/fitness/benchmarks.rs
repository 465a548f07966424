//! Benchmark fitness functions
//!
//! The three test problems of the variation-operator study: one
//! maximization problem with a rippled landscape and two minimization
//! problems with fixed transferral constants.

use std::f64::consts::{E, PI};

use crate::fitness::traits::FitnessFunction;

/// f(x) = x·sin(10πx) + 2, maximized on [-1, 2]
///
/// Single variable, 12 bits (worst-case quantization error ≈ 0.00073).
#[derive(Clone, Debug, Default)]
pub struct SineRipple;

impl SineRipple {
    /// Create the function
    pub fn new() -> Self {
        Self
    }
}

impl FitnessFunction for SineRipple {
    fn name(&self) -> &'static str {
        "SineRipple"
    }

    fn is_maximize(&self) -> bool {
        true
    }

    fn num_vars(&self) -> usize {
        1
    }

    fn genes_per_var(&self) -> usize {
        12
    }

    fn lower_bound(&self) -> f64 {
        -1.0
    }

    fn upper_bound(&self) -> f64 {
        2.0
    }

    fn evaluate(&self, phenotype: &[f64]) -> f64 {
        let x = phenotype.first().copied().unwrap_or_default();
        x * (10.0 * PI * x).sin() + 2.0
    }

    fn optimal_value(&self) -> f64 {
        3.85
    }
}

/// Sphere function: f(x) = Σxᵢ², minimized on [-5, 5]⁵
///
/// Five variables, 14 bits each.
#[derive(Clone, Debug, Default)]
pub struct Sphere;

impl Sphere {
    /// Create the function
    pub fn new() -> Self {
        Self
    }
}

impl FitnessFunction for Sphere {
    fn name(&self) -> &'static str {
        "Sphere"
    }

    fn is_maximize(&self) -> bool {
        false
    }

    fn num_vars(&self) -> usize {
        5
    }

    fn genes_per_var(&self) -> usize {
        14
    }

    fn lower_bound(&self) -> f64 {
        -5.0
    }

    fn upper_bound(&self) -> f64 {
        5.0
    }

    fn evaluate(&self, phenotype: &[f64]) -> f64 {
        phenotype.iter().map(|x| x * x).sum()
    }

    /// `n·upper² − f`, the largest value Σxᵢ² reaches inside the bounds
    fn transferral(&self, raw_fitness: f64) -> f64 {
        let c = self.num_vars() as f64 * self.upper_bound().powi(2);
        c - raw_fitness
    }

    fn optimal_value(&self) -> f64 {
        0.0
    }
}

/// Ackley function, minimized on [-20, 30]²
///
/// Two variables, 16 bits each.
#[derive(Clone, Debug, Default)]
pub struct Ackley;

impl Ackley {
    /// Create the function
    pub fn new() -> Self {
        Self
    }
}

impl FitnessFunction for Ackley {
    fn name(&self) -> &'static str {
        "Ackley"
    }

    fn is_maximize(&self) -> bool {
        false
    }

    fn num_vars(&self) -> usize {
        2
    }

    fn genes_per_var(&self) -> usize {
        16
    }

    fn lower_bound(&self) -> f64 {
        -20.0
    }

    fn upper_bound(&self) -> f64 {
        30.0
    }

    fn evaluate(&self, phenotype: &[f64]) -> f64 {
        let n = self.num_vars() as f64;
        let sum_sq: f64 = phenotype.iter().map(|x| x * x).sum();
        let sum_cos: f64 = phenotype.iter().map(|x| (2.0 * PI * x).cos()).sum();
        -20.0 * (-0.2 * (sum_sq / n).sqrt()).exp() - (sum_cos / n).exp() + 20.0 + E
    }

    // Covers the search space but is not the global maximum of the function.
    fn transferral(&self, raw_fitness: f64) -> f64 {
        25.0 - raw_fitness
    }

    fn optimal_value(&self) -> f64 {
        0.0
    }
}
