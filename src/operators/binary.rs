//! Binary crossover operators
//!
//! Nine crossover variants over bit strings. The pure bit-level functions
//! work on slices and return two new child gene vectors; [`BinaryCrossover`]
//! wraps them with the crossover-probability gate and re-evaluation.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{EvoResult, OperatorError};
use crate::fitness::traits::Evaluator;
use crate::genome::bit_string::BitString;
use crate::operators::traits::CrossoverOperator;
use crate::population::individual::BinaryIndividual;

/// The binary crossover variants, addressed by their numeric ids 1..=9
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BinaryCrossoverKind {
    /// One random cut point, tails exchanged
    SinglePoint,
    /// Two distinct cut points, middle segment exchanged
    DualPoint,
    /// Single point with the cut restricted to the differing region
    SinglePointReducedSurrogate,
    /// Dual point with the cuts restricted to the differing region
    DualPointReducedSurrogate,
    /// Both parents joined into a ring and read in opposite directions
    Ring,
    /// Every position exchanged with probability one half
    Uniform,
    /// Single point over a random permutation of the positions
    Shuffle,
    /// Shuffle with the cut restricted to the differing region
    ShuffleReducedSurrogate,
    /// Majority vote between three parents
    ThreeParent,
}

impl BinaryCrossoverKind {
    /// Every variant in id order
    pub const ALL: [BinaryCrossoverKind; 9] = [
        Self::SinglePoint,
        Self::DualPoint,
        Self::SinglePointReducedSurrogate,
        Self::DualPointReducedSurrogate,
        Self::Ring,
        Self::Uniform,
        Self::Shuffle,
        Self::ShuffleReducedSurrogate,
        Self::ThreeParent,
    ];

    /// Look up a variant by numeric id
    pub fn from_id(id: u32) -> Result<Self, OperatorError> {
        match id {
            1..=9 => Ok(Self::ALL[id as usize - 1]),
            _ => Err(OperatorError::UnknownOperator(id)),
        }
    }

    /// Look up a variant by numeric id, falling back to single point
    pub fn from_id_or_default(id: u32) -> Self {
        Self::from_id(id).unwrap_or_else(|_| {
            warn!(id, "unknown binary crossover id, using single point crossover");
            Self::SinglePoint
        })
    }

    /// Numeric id
    pub fn id(self) -> u32 {
        match self {
            Self::SinglePoint => 1,
            Self::DualPoint => 2,
            Self::SinglePointReducedSurrogate => 3,
            Self::DualPointReducedSurrogate => 4,
            Self::Ring => 5,
            Self::Uniform => 6,
            Self::Shuffle => 7,
            Self::ShuffleReducedSurrogate => 8,
            Self::ThreeParent => 9,
        }
    }

    /// Display name
    pub fn name(self) -> &'static str {
        match self {
            Self::SinglePoint => "single point crossover",
            Self::DualPoint => "dual point crossover",
            Self::SinglePointReducedSurrogate => "single point crossover with reduced surrogate",
            Self::DualPointReducedSurrogate => "dual point crossover with reduced surrogate",
            Self::Ring => "ring crossover",
            Self::Uniform => "uniform crossover",
            Self::Shuffle => "shuffle crossover",
            Self::ShuffleReducedSurrogate => "shuffle crossover with reduced surrogate",
            Self::ThreeParent => "three parent crossover",
        }
    }

    /// Number of parents the variant consumes
    pub fn parents_required(self) -> usize {
        match self {
            Self::ThreeParent => 3,
            _ => 2,
        }
    }
}

/// Gated binary crossover
#[derive(Clone, Debug)]
pub struct BinaryCrossover {
    /// Which variant to apply
    pub kind: BinaryCrossoverKind,
    /// Probability that a mating pair is recombined at all
    pub crossover_probability: f64,
}

impl BinaryCrossover {
    /// Create a crossover of the given kind with probability 0.8
    pub fn new(kind: BinaryCrossoverKind) -> Self {
        Self {
            kind,
            crossover_probability: 0.8,
        }
    }

    /// Create the crossover registered under `id`
    pub fn from_id(id: u32) -> Result<Self, OperatorError> {
        BinaryCrossoverKind::from_id(id).map(Self::new)
    }

    /// Create the crossover registered under `id`, or single point crossover
    pub fn from_id_or_default(id: u32) -> Self {
        Self::new(BinaryCrossoverKind::from_id_or_default(id))
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

    /// Recombine raw bit slices without the probability gate
    ///
    /// `c` is required by [`BinaryCrossoverKind::ThreeParent`] and ignored
    /// otherwise.
    pub fn recombine<R: Rng + ?Sized>(
        &self,
        a: &[bool],
        b: &[bool],
        c: Option<&[bool]>,
        rng: &mut R,
    ) -> Result<(Vec<bool>, Vec<bool>), OperatorError> {
        if a.len() != b.len() {
            return Err(OperatorError::CrossoverFailed(
                "Parent lengths do not match".to_string(),
            ));
        }

        let children = match self.kind {
            BinaryCrossoverKind::SinglePoint => single_point(a, b, false, rng),
            BinaryCrossoverKind::DualPoint => dual_point(a, b, false, rng),
            BinaryCrossoverKind::SinglePointReducedSurrogate => single_point(a, b, true, rng),
            BinaryCrossoverKind::DualPointReducedSurrogate => dual_point(a, b, true, rng),
            BinaryCrossoverKind::Ring => ring(a, b, rng),
            BinaryCrossoverKind::Uniform => uniform(a, b, rng),
            BinaryCrossoverKind::Shuffle => shuffle(a, b, false, rng),
            BinaryCrossoverKind::ShuffleReducedSurrogate => shuffle(a, b, true, rng),
            BinaryCrossoverKind::ThreeParent => {
                let c = c.ok_or_else(|| {
                    OperatorError::CrossoverFailed("three parent crossover needs a third parent".to_string())
                })?;
                if c.len() != a.len() {
                    return Err(OperatorError::CrossoverFailed(
                        "Parent lengths do not match".to_string(),
                    ));
                }
                three_parent(a, b, c)
            }
        };
        Ok(children)
    }
}

impl CrossoverOperator<BitString> for BinaryCrossover {
    /// For three parent crossover `parent_b` is the voting parent and the
    /// children default to copies of `parent_a` and `parent_c`.
    fn crossover<R: Rng + ?Sized>(
        &self,
        parent_a: &BinaryIndividual,
        parent_b: &BinaryIndividual,
        parent_c: Option<&BinaryIndividual>,
        evaluator: &Evaluator,
        rng: &mut R,
    ) -> EvoResult<(BinaryIndividual, BinaryIndividual)> {
        let second = match (self.kind, parent_c) {
            (BinaryCrossoverKind::ThreeParent, Some(c)) => c,
            (BinaryCrossoverKind::ThreeParent, None) => {
                return Err(OperatorError::CrossoverFailed(
                    "three parent crossover needs a third parent".to_string(),
                )
                .into())
            }
            _ => parent_b,
        };

        if rng.gen::<f64>() >= self.crossover_probability {
            return Ok((parent_a.clone(), second.clone()));
        }

        let (child_a, child_b) = self.recombine(
            parent_a.genes(),
            parent_b.genes(),
            parent_c.map(|c| c.genes()),
            rng,
        )?;

        Ok((
            BinaryIndividual::from_genes(child_a, evaluator)?,
            BinaryIndividual::from_genes(child_b, evaluator)?,
        ))
    }

    fn parents_required(&self) -> usize {
        self.kind.parents_required()
    }

    fn crossover_probability(&self) -> f64 {
        self.crossover_probability
    }

    fn name(&self) -> &'static str {
        self.kind.name()
    }
}

/// Cut-point range confined to the region where two parents differ
///
/// `order` lists the positions to scan (identity when `None`). The lower
/// bound is the first index in `1..n-1` whose position differs; the upper
/// bound is the largest index above it whose predecessor position differs.
/// Parents that are identical in that region give the full range `(0, n-1)`.
pub fn reduced_surrogate_bounds(a: &[bool], b: &[bool], order: Option<&[usize]>) -> (usize, usize) {
    let n = a.len().min(b.len());
    let full = (0, n.saturating_sub(1));
    if n < 2 {
        return full;
    }

    let position = |i: usize| order.map_or(i, |o| o[i]);
    let differs = |i: usize| a[position(i)] != b[position(i)];

    let Some(lower) = (1..n - 1).find(|&i| differs(i)) else {
        return full;
    };
    match (lower + 1..n).rev().find(|&i| differs(i - 1)) {
        Some(upper) if upper > lower => (lower, upper),
        _ => full,
    }
}

/// Exchange every position after one cut point
pub fn single_point<R: Rng + ?Sized>(
    a: &[bool],
    b: &[bool],
    reduced: bool,
    rng: &mut R,
) -> (Vec<bool>, Vec<bool>) {
    let mut child_a = a.to_vec();
    let mut child_b = b.to_vec();
    let n = a.len();
    if n < 2 {
        return (child_a, child_b);
    }

    let (lower, upper) = if reduced {
        reduced_surrogate_bounds(a, b, None)
    } else {
        (1, n - 1)
    };
    let cut = rng.gen_range(lower..=upper);
    for j in cut + 1..n {
        std::mem::swap(&mut child_a[j], &mut child_b[j]);
    }
    (child_a, child_b)
}

/// Exchange the segment `[cp1, cp2)` between two distinct cut points
pub fn dual_point<R: Rng + ?Sized>(
    a: &[bool],
    b: &[bool],
    reduced: bool,
    rng: &mut R,
) -> (Vec<bool>, Vec<bool>) {
    let mut child_a = a.to_vec();
    let mut child_b = b.to_vec();
    let n = a.len();
    if n < 2 {
        return (child_a, child_b);
    }

    let (lower, upper) = if reduced {
        reduced_surrogate_bounds(a, b, None)
    } else {
        (1, n - 1)
    };
    // a single admissible cut point leaves no segment to exchange
    if lower == upper {
        return (child_a, child_b);
    }

    let first = rng.gen_range(lower..=upper);
    let second = loop {
        let candidate = rng.gen_range(lower..=upper);
        if candidate != first {
            break candidate;
        }
    };
    let (cp1, cp2) = (first.min(second), first.max(second));
    for j in cp1..cp2 {
        std::mem::swap(&mut child_a[j], &mut child_b[j]);
    }
    (child_a, child_b)
}

/// Ring crossover
///
/// The parents are concatenated into a ring of `2n` bits. From a random cut
/// the first child reads `n` bits clockwise and the second child reads `n`
/// bits counter-clockwise.
pub fn ring<R: Rng + ?Sized>(a: &[bool], b: &[bool], rng: &mut R) -> (Vec<bool>, Vec<bool>) {
    let n = a.len();
    if n < 2 {
        return (a.to_vec(), b.to_vec());
    }

    let ring: Vec<bool> = a.iter().chain(b.iter()).copied().collect();
    let size = ring.len() as isize;
    let cut = rng.gen_range(1..n) as isize;

    let child_a = (0..n as isize)
        .map(|i| ring[(cut + i).rem_euclid(size) as usize])
        .collect();
    let child_b = (0..n as isize)
        .map(|i| ring[(cut - i).rem_euclid(size) as usize])
        .collect();
    (child_a, child_b)
}

/// Exchange each position independently with probability one half
pub fn uniform<R: Rng + ?Sized>(a: &[bool], b: &[bool], rng: &mut R) -> (Vec<bool>, Vec<bool>) {
    let mut child_a = a.to_vec();
    let mut child_b = b.to_vec();
    for j in 0..a.len() {
        if rng.gen::<f64>() < 0.5 {
            std::mem::swap(&mut child_a[j], &mut child_b[j]);
        }
    }
    (child_a, child_b)
}

/// Single point crossover applied through a random permutation of positions
pub fn shuffle<R: Rng + ?Sized>(
    a: &[bool],
    b: &[bool],
    reduced: bool,
    rng: &mut R,
) -> (Vec<bool>, Vec<bool>) {
    let mut child_a = a.to_vec();
    let mut child_b = b.to_vec();
    let n = a.len();
    if n < 2 {
        return (child_a, child_b);
    }

    let mut order: Vec<usize> = (0..n).collect();
    order.shuffle(rng);

    let (lower, upper) = if reduced {
        reduced_surrogate_bounds(a, b, Some(&order))
    } else {
        (1, n - 1)
    };
    let cut = rng.gen_range(lower..=upper);
    for &position in &order[cut + 1..] {
        std::mem::swap(&mut child_a[position], &mut child_b[position]);
    }
    (child_a, child_b)
}

/// Three parent crossover
///
/// Where `a` agrees with the voting parent `b` the first child keeps `a`,
/// otherwise it takes `c`. Where `c` agrees with `b` the second child keeps
/// `c`, otherwise it takes `a`.
pub fn three_parent(a: &[bool], b: &[bool], c: &[bool]) -> (Vec<bool>, Vec<bool>) {
    let child_a = a
        .iter()
        .zip(b)
        .zip(c)
        .map(|((&x, &v), &z)| if x == v { x } else { z })
        .collect();
    let child_b = a
        .iter()
        .zip(b)
        .zip(c)
        .map(|((&x, &v), &z)| if z == v { z } else { x })
        .collect();
    (child_a, child_b)
}
