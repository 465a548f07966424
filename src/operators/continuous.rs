//! Continuous crossover operators
//!
//! Five recombination schemes over real-valued chromosomes. The linear and
//! heuristic variants need fitness information, so unlike the binary family
//! they work on evaluated individuals rather than raw gene slices.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

use crate::error::{EvoResult, OperatorError};
use crate::fitness::traits::Evaluator;
use crate::genome::bounds::Bounds;
use crate::genome::real_vector::RealVector;
use crate::operators::traits::CrossoverOperator;
use crate::population::individual::ContinuousIndividual;

/// The continuous crossover variants, addressed by their numeric ids 1..=5
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContinuousCrossoverKind {
    /// One mixing weight shared by every gene
    WholeArithmetic,
    /// A fresh mixing weight per gene
    LocalArithmetic,
    /// Three linear combinations, the weakest discarded
    Linear,
    /// Extrapolation from the worse parent past the better one
    Heuristic,
    /// BLX-α sampling around each parent pair
    Blend,
}

impl ContinuousCrossoverKind {
    /// Every variant in id order
    pub const ALL: [ContinuousCrossoverKind; 5] = [
        Self::WholeArithmetic,
        Self::LocalArithmetic,
        Self::Linear,
        Self::Heuristic,
        Self::Blend,
    ];

    /// Look up a variant by numeric id
    pub fn from_id(id: u32) -> Result<Self, OperatorError> {
        match id {
            1..=5 => Ok(Self::ALL[id as usize - 1]),
            _ => Err(OperatorError::UnknownOperator(id)),
        }
    }

    /// Look up a variant by numeric id, falling back to whole arithmetic
    pub fn from_id_or_default(id: u32) -> Self {
        Self::from_id(id).unwrap_or_else(|_| {
            warn!(id, "unknown continuous crossover id, using whole arithmetic crossover");
            Self::WholeArithmetic
        })
    }

    /// Numeric id
    pub fn id(self) -> u32 {
        match self {
            Self::WholeArithmetic => 1,
            Self::LocalArithmetic => 2,
            Self::Linear => 3,
            Self::Heuristic => 4,
            Self::Blend => 5,
        }
    }

    /// Display name
    pub fn name(self) -> &'static str {
        match self {
            Self::WholeArithmetic => "whole arithmetic crossover",
            Self::LocalArithmetic => "local arithmetic crossover",
            Self::Linear => "linear crossover",
            Self::Heuristic => "heuristic crossover",
            Self::Blend => "blend crossover",
        }
    }
}

/// Gated continuous crossover
#[derive(Clone, Debug)]
pub struct ContinuousCrossover {
    /// Which variant to apply
    pub kind: ContinuousCrossoverKind,
    /// Probability that a mating pair is recombined at all
    pub crossover_probability: f64,
    /// Interval extension factor for blend crossover
    pub alpha: f64,
    /// Upper limit on rejected samples per child gene (heuristic, blend)
    pub max_attempts: usize,
}

impl ContinuousCrossover {
    /// Create a crossover of the given kind with probability 0.8 and α = 0.5
    pub fn new(kind: ContinuousCrossoverKind) -> Self {
        Self {
            kind,
            crossover_probability: 0.8,
            alpha: 0.5,
            max_attempts: 1000,
        }
    }

    /// Create the crossover registered under `id`
    pub fn from_id(id: u32) -> Result<Self, OperatorError> {
        ContinuousCrossoverKind::from_id(id).map(Self::new)
    }

    /// Create the crossover registered under `id`, or whole arithmetic crossover
    pub fn from_id_or_default(id: u32) -> Self {
        Self::new(ContinuousCrossoverKind::from_id_or_default(id))
    }

    /// Set the crossover probability
    pub fn with_probability(mut self, probability: f64) -> Self {
        assert!(
            (0.0..=1.0).contains(&probability),
            "Probability must be in [0, 1]"
        );
        self.crossover_probability = probability;
        self
    }

    /// Set the blend extension factor
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        assert!(alpha >= 0.0, "Alpha must be non-negative");
        self.alpha = alpha;
        self
    }

    /// Set the rejection-sampling cap
    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        assert!(max_attempts > 0, "At least one attempt is required");
        self.max_attempts = max_attempts;
        self
    }
}

impl CrossoverOperator<RealVector> for ContinuousCrossover {
    fn crossover<R: Rng + ?Sized>(
        &self,
        parent_a: &ContinuousIndividual,
        parent_b: &ContinuousIndividual,
        _parent_c: Option<&ContinuousIndividual>,
        evaluator: &Evaluator,
        rng: &mut R,
    ) -> EvoResult<(ContinuousIndividual, ContinuousIndividual)> {
        if parent_a.genes().len() != parent_b.genes().len() {
            return Err(OperatorError::CrossoverFailed(
                "Parent dimensions do not match".to_string(),
            )
            .into());
        }

        if rng.gen::<f64>() >= self.crossover_probability {
            return Ok((parent_a.clone(), parent_b.clone()));
        }

        let bounds = evaluator.bounds();
        let (child_a, child_b) = match self.kind {
            ContinuousCrossoverKind::WholeArithmetic => {
                arithmetic(parent_a.genes(), parent_b.genes(), false, rng)
            }
            ContinuousCrossoverKind::LocalArithmetic => {
                arithmetic(parent_a.genes(), parent_b.genes(), true, rng)
            }
            ContinuousCrossoverKind::Linear => {
                return linear(parent_a, parent_b, evaluator);
            }
            ContinuousCrossoverKind::Heuristic => {
                let (better, worse) = if parent_a.transferral() >= parent_b.transferral() {
                    (parent_a.genes(), parent_b.genes())
                } else {
                    (parent_b.genes(), parent_a.genes())
                };
                heuristic(better, worse, &bounds, self.max_attempts, rng)?
            }
            ContinuousCrossoverKind::Blend => blend(
                parent_a.genes(),
                parent_b.genes(),
                self.alpha,
                &bounds,
                self.max_attempts,
                rng,
            )?,
        };

        Ok((
            ContinuousIndividual::from_genes(child_a, evaluator)?,
            ContinuousIndividual::from_genes(child_b, evaluator)?,
        ))
    }

    fn crossover_probability(&self) -> f64 {
        self.crossover_probability
    }

    fn name(&self) -> &'static str {
        self.kind.name()
    }
}

/// Arithmetic crossover
///
/// `y1 = a·x1 + (1 − a)·x2` and `y2 = (1 − a)·x1 + a·x2` with `a ~ U[0, 1)`.
/// The local variant draws a new `a` for every gene.
pub fn arithmetic<R: Rng + ?Sized>(
    x1: &[f64],
    x2: &[f64],
    local: bool,
    rng: &mut R,
) -> (Vec<f64>, Vec<f64>) {
    let mut a = rng.gen::<f64>();
    let mut child_a = Vec::with_capacity(x1.len());
    let mut child_b = Vec::with_capacity(x1.len());
    for (&p, &q) in x1.iter().zip(x2) {
        if local {
            a = rng.gen::<f64>();
        }
        child_a.push(a * p + (1.0 - a) * q);
        child_b.push((1.0 - a) * p + a * q);
    }
    (child_a, child_b)
}

/// Linear crossover
///
/// Builds the midpoint and the two reflections `1.5·x1 − 0.5·x2` and
/// `−0.5·x1 + 1.5·x2`. Reflected genes that leave the bounds fall back to
/// the midpoint gene. The candidate with the lowest transferral is dropped
/// and the other two are returned in generation order.
pub fn linear(
    parent_a: &ContinuousIndividual,
    parent_b: &ContinuousIndividual,
    evaluator: &Evaluator,
) -> EvoResult<(ContinuousIndividual, ContinuousIndividual)> {
    let bounds = evaluator.bounds();
    let n = parent_a.genes().len();
    let mut mid = Vec::with_capacity(n);
    let mut ahead = Vec::with_capacity(n);
    let mut behind = Vec::with_capacity(n);

    for (&x1, &x2) in parent_a.genes().iter().zip(parent_b.genes()) {
        let y1 = 0.5 * x1 + 0.5 * x2;
        let y2 = 1.5 * x1 - 0.5 * x2;
        let y3 = -0.5 * x1 + 1.5 * x2;
        mid.push(y1);
        ahead.push(if bounds.contains(y2) { y2 } else { y1 });
        behind.push(if bounds.contains(y3) { y3 } else { y1 });
    }

    let mut candidates = vec![
        ContinuousIndividual::from_genes(mid, evaluator)?,
        ContinuousIndividual::from_genes(ahead, evaluator)?,
        ContinuousIndividual::from_genes(behind, evaluator)?,
    ];

    // ties drop the later candidate
    let mut weakest = 0;
    for (i, candidate) in candidates.iter().enumerate().skip(1) {
        if candidate.transferral() <= candidates[weakest].transferral() {
            weakest = i;
        }
    }
    candidates.remove(weakest);

    let second = candidates.pop();
    let first = candidates.pop();
    match (first, second) {
        (Some(first), Some(second)) => Ok((first, second)),
        _ => Err(OperatorError::CrossoverFailed("linear crossover lost a candidate".to_string()).into()),
    }
}

/// Heuristic crossover
///
/// Each child is `better + β·(better − worse)` with `β ~ U[0.8, 1.2)`,
/// resampled until every gene is inside the bounds.
pub fn heuristic<R: Rng + ?Sized>(
    better: &[f64],
    worse: &[f64],
    bounds: &Bounds,
    max_attempts: usize,
    rng: &mut R,
) -> Result<(Vec<f64>, Vec<f64>), OperatorError> {
    let sample = |rng: &mut R| -> Result<Vec<f64>, OperatorError> {
        for attempt in 0..max_attempts {
            let beta = rng.gen_range(0.8..1.2);
            let child: Vec<f64> = better
                .iter()
                .zip(worse)
                .map(|(&b, &w)| b + beta * (b - w))
                .collect();
            if bounds.contains_all(&child) {
                return Ok(child);
            }
            trace!(attempt, beta, "heuristic crossover sample out of bounds");
        }
        Err(OperatorError::RejectionLimitExceeded {
            operator: "heuristic crossover",
            attempts: max_attempts,
        })
    };

    let child_a = sample(rng)?;
    let child_b = sample(rng)?;
    Ok((child_a, child_b))
}

/// Blend crossover (BLX-α)
///
/// For each gene with parents `x1 ≤ x2` and `d = x2 − x1`, both children draw
/// from `[x1 − α·d, x2 + α·d]`, resampling until the value is inside the
/// bounds.
pub fn blend<R: Rng + ?Sized>(
    x1: &[f64],
    x2: &[f64],
    alpha: f64,
    bounds: &Bounds,
    max_attempts: usize,
    rng: &mut R,
) -> Result<(Vec<f64>, Vec<f64>), OperatorError> {
    let mut child_a = Vec::with_capacity(x1.len());
    let mut child_b = Vec::with_capacity(x1.len());

    for (&p, &q) in x1.iter().zip(x2) {
        let (low, high) = if p <= q { (p, q) } else { (q, p) };
        let d = high - low;
        let (from, to) = (low - alpha * d, high + alpha * d);
        child_a.push(sample_in_bounds(from, to, bounds, max_attempts, rng)?);
        child_b.push(sample_in_bounds(from, to, bounds, max_attempts, rng)?);
    }

    Ok((child_a, child_b))
}

fn sample_in_bounds<R: Rng + ?Sized>(
    from: f64,
    to: f64,
    bounds: &Bounds,
    max_attempts: usize,
    rng: &mut R,
) -> Result<f64, OperatorError> {
    for attempt in 0..max_attempts {
        let value = rng.gen_range(from..=to);
        if bounds.contains(value) {
            return Ok(value);
        }
        trace!(attempt, value, "blend crossover sample out of bounds");
    }
    Err(OperatorError::RejectionLimitExceeded {
        operator: "blend crossover",
        attempts: max_attempts,
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::error::EvolutionError;
    use crate::fitness::benchmarks::{Ackley, Sphere};
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn sphere() -> Evaluator {
        Evaluator::new(Arc::new(Sphere::new()), false)
    }

    #[test]
    fn test_from_id() {
        assert_eq!(
            ContinuousCrossoverKind::from_id(1).unwrap(),
            ContinuousCrossoverKind::WholeArithmetic
        );
        assert_eq!(
            ContinuousCrossoverKind::from_id(5).unwrap(),
            ContinuousCrossoverKind::Blend
        );
        assert_eq!(
            ContinuousCrossoverKind::from_id(6),
            Err(OperatorError::UnknownOperator(6))
        );
        assert_eq!(
            ContinuousCrossoverKind::from_id_or_default(0),
            ContinuousCrossoverKind::WholeArithmetic
        );
        for kind in ContinuousCrossoverKind::ALL {
            assert_eq!(ContinuousCrossoverKind::from_id(kind.id()).unwrap(), kind);
        }
    }

    #[test]
    fn test_arithmetic_preserves_sums() {
        let mut rng = StdRng::seed_from_u64(1);
        let x1 = [1.0, -2.0, 3.5];
        let x2 = [0.0, 4.0, -1.5];
        for local in [false, true] {
            let (y1, y2) = arithmetic(&x1, &x2, local, &mut rng);
            for i in 0..3 {
                assert_relative_eq!(y1[i] + y2[i], x1[i] + x2[i], epsilon = 1e-12);
                let (lo, hi) = (x1[i].min(x2[i]), x1[i].max(x2[i]));
                assert!(y1[i] >= lo && y1[i] <= hi);
            }
        }
    }

    #[test]
    fn test_whole_arithmetic_shares_weight() {
        let mut rng = StdRng::seed_from_u64(2);
        let (y1, _) = arithmetic(&[1.0, 1.0], &[0.0, 0.0], false, &mut rng);
        assert_eq!(y1[0], y1[1]);
    }

    #[test]
    fn test_linear_drops_weakest() {
        let evaluator = sphere();
        let a = ContinuousIndividual::from_genes(vec![1.0, 1.0, 1.0, 1.0, 1.0], &evaluator).unwrap();
        let b = ContinuousIndividual::from_genes(vec![3.0, 3.0, 3.0, 3.0, 3.0], &evaluator).unwrap();
        let (x, y) = linear(&a, &b, &evaluator).unwrap();

        // midpoint 2, reflection 0 and 4: the 4s are the weakest
        assert_eq!(x.genes(), &[2.0; 5]);
        assert_eq!(y.genes(), &[0.0; 5]);
    }

    #[test]
    fn test_linear_replaces_out_of_bounds_with_midpoint() {
        let evaluator = sphere();
        let a = ContinuousIndividual::from_genes(vec![4.0, 0.0, 0.0, 0.0, 0.0], &evaluator).unwrap();
        let b = ContinuousIndividual::from_genes(vec![-4.0, 0.0, 0.0, 0.0, 0.0], &evaluator).unwrap();
        let (x, y) = linear(&a, &b, &evaluator).unwrap();
        // both reflections leave [-5, 5] so all candidates are the midpoint
        assert_eq!(x.genes(), &[0.0; 5]);
        assert_eq!(y.genes(), &[0.0; 5]);
    }

    #[test]
    fn test_heuristic_extrapolates_from_better() {
        let bounds = Bounds::new(-5.0, 5.0);
        let mut rng = StdRng::seed_from_u64(3);
        let (x, y) = heuristic(&[1.0, 1.0], &[0.0, 0.0], &bounds, 1000, &mut rng).unwrap();
        for child in [x, y] {
            for v in child {
                assert!(v >= 1.8 && v < 2.2);
            }
        }
    }

    #[test]
    fn test_heuristic_gives_up() {
        let bounds = Bounds::new(-5.0, 5.0);
        let mut rng = StdRng::seed_from_u64(4);
        let err = heuristic(&[5.0], &[-5.0], &bounds, 25, &mut rng).unwrap_err();
        assert_eq!(
            err,
            OperatorError::RejectionLimitExceeded {
                operator: "heuristic crossover",
                attempts: 25
            }
        );
    }

    #[test]
    fn test_blend_within_extended_interval() {
        let bounds = Bounds::new(-20.0, 30.0);
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..100 {
            let (x, y) = blend(&[2.0, 10.0], &[0.0, 10.0], 0.5, &bounds, 1000, &mut rng).unwrap();
            assert!(x[0] >= -1.0 && x[0] <= 3.0);
            assert!(y[0] >= -1.0 && y[0] <= 3.0);
            // identical parents give a degenerate interval
            assert_eq!(x[1], 10.0);
            assert_eq!(y[1], 10.0);
        }
    }

    #[test]
    fn test_blend_respects_bounds() {
        let bounds = Bounds::new(-5.0, 5.0);
        let mut rng = StdRng::seed_from_u64(6);
        for _ in 0..100 {
            let (x, y) = blend(&[5.0], &[-5.0], 0.5, &bounds, 1000, &mut rng).unwrap();
            assert!(bounds.contains(x[0]));
            assert!(bounds.contains(y[0]));
        }
    }

    #[test]
    fn test_heuristic_operator_surfaces_rejection() {
        let evaluator = Evaluator::new(Arc::new(Ackley::new()), false);
        let a = ContinuousIndividual::from_genes(vec![30.0, 30.0], &evaluator).unwrap();
        let b = ContinuousIndividual::from_genes(vec![-20.0, -20.0], &evaluator).unwrap();
        let op = ContinuousCrossover::new(ContinuousCrossoverKind::Heuristic)
            .with_probability(1.0)
            .with_max_attempts(10);
        let mut rng = StdRng::seed_from_u64(7);
        let err = op.crossover(&a, &b, None, &evaluator, &mut rng).unwrap_err();
        assert!(matches!(
            err,
            EvolutionError::Operator(OperatorError::RejectionLimitExceeded { .. })
        ));
    }

    #[test]
    fn test_gate_closed_returns_copies() {
        let evaluator = sphere();
        let a = ContinuousIndividual::from_genes(vec![1.0; 5], &evaluator).unwrap();
        let b = ContinuousIndividual::from_genes(vec![-1.0; 5], &evaluator).unwrap();
        let mut rng = StdRng::seed_from_u64(8);
        for kind in ContinuousCrossoverKind::ALL {
            let op = ContinuousCrossover::new(kind).with_probability(0.0);
            let (x, y) = op.crossover(&a, &b, None, &evaluator, &mut rng).unwrap();
            assert_eq!(x, a);
            assert_eq!(y, b);
        }
    }
}
