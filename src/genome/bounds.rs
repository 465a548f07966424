//! Search-space bounds
//!
//! Every variable of a problem shares the same closed interval, so a single
//! [`Bounds`] value describes the whole search space.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Closed interval shared by all variables of a problem
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    /// Lower bound (inclusive)
    pub lower: f64,
    /// Upper bound (inclusive)
    pub upper: f64,
}

impl Bounds {
    /// Create new bounds
    ///
    /// # Panics
    /// Panics if lower > upper
    pub fn new(lower: f64, upper: f64) -> Self {
        assert!(
            lower <= upper,
            "Invalid bounds: lower ({}) must be <= upper ({})",
            lower,
            upper
        );
        Self { lower, upper }
    }

    /// Get the range (upper - lower)
    pub fn range(&self) -> f64 {
        self.upper - self.lower
    }

    /// Check if a value is within bounds
    pub fn contains(&self, value: f64) -> bool {
        value >= self.lower && value <= self.upper
    }

    /// Check that every value of a vector lies within bounds
    pub fn contains_all(&self, values: &[f64]) -> bool {
        values.iter().all(|&v| self.contains(v))
    }

    /// Map a fraction in [0, 1] onto the interval
    pub fn denormalize(&self, fraction: f64) -> f64 {
        fraction * self.range() + self.lower
    }

    /// Draw a value uniformly from `[lower, upper)`
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.denormalize(rng.gen::<f64>())
    }
}
