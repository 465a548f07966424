//! Selection operators
//!
//! Fitness-proportionate (roulette-wheel) selection over the relative
//! fitness values maintained by the population.

use rand::Rng;

use crate::genome::traits::Chromosome;
use crate::operators::traits::SelectionOperator;
use crate::population::individual::Individual;

/// Roulette wheel selection with replacement
///
/// Each member owns the slice `[low, low + relative_fitness)` of the unit
/// interval. A uniform draw picks the member whose slice contains it; when
/// accumulated rounding leaves the draw past the last slice, the last member
/// is chosen.
#[derive(Clone, Debug, Default)]
pub struct RouletteSelection;

impl RouletteSelection {
    /// Create a new roulette selection
    pub fn new() -> Self {
        Self
    }

    /// Index of the slice containing `draw`
    pub fn spin(relative_fitness: impl IntoIterator<Item = f64>, draw: f64) -> Option<usize> {
        let mut low = 0.0;
        let mut last = None;
        for (index, share) in relative_fitness.into_iter().enumerate() {
            let high = low + share;
            if draw >= low && draw < high {
                return Some(index);
            }
            low = high;
            last = Some(index);
        }
        last
    }
}

impl<C: Chromosome> SelectionOperator<C> for RouletteSelection {
    fn select<R: Rng + ?Sized>(&self, population: &[Individual<C>], rng: &mut R) -> usize {
        assert!(!population.is_empty(), "Population cannot be empty");

        let draw = rng.gen::<f64>();
        Self::spin(population.iter().map(|i| i.relative_fitness()), draw)
            .unwrap_or(population.len() - 1)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::fitness::benchmarks::SineRipple;
    use crate::fitness::traits::Evaluator;
    use crate::genome::bit_string::BitString;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_spin_slices() {
        let shares = [0.25, 0.5, 0.25];
        assert_eq!(RouletteSelection::spin(shares, 0.0), Some(0));
        assert_eq!(RouletteSelection::spin(shares, 0.2499), Some(0));
        assert_eq!(RouletteSelection::spin(shares, 0.25), Some(1));
        assert_eq!(RouletteSelection::spin(shares, 0.74), Some(1));
        assert_eq!(RouletteSelection::spin(shares, 0.75), Some(2));
    }

    #[test]
    fn test_spin_falls_back_to_last() {
        // shares sum to slightly less than 1
        let shares = [0.3333, 0.3333, 0.3333];
        assert_eq!(RouletteSelection::spin(shares, 0.99999), Some(2));
        assert_eq!(RouletteSelection::spin(Vec::<f64>::new(), 0.5), None);
    }

    #[test]
    fn test_spin_skips_zero_share() {
        let shares = [0.0, 1.0];
        assert_eq!(RouletteSelection::spin(shares, 0.0), Some(1));
    }

    #[test]
    fn test_select_follows_relative_fitness() {
        let evaluator = Evaluator::new(Arc::new(SineRipple::new()), false);
        let mut population: Vec<Individual<BitString>> = (0..4)
            .map(|_| Individual::from_genes(vec![false; 12], &evaluator).unwrap())
            .collect();
        for (i, ind) in population.iter_mut().enumerate() {
            ind.set_relative_fitness(if i == 2 { 1.0 } else { 0.0 });
        }

        let mut rng = StdRng::seed_from_u64(17);
        let picks = RouletteSelection::new().select_many(&population, 50, &mut rng);
        assert_eq!(picks.len(), 50);
        assert!(picks.iter().all(|&p| p == 2));
    }

    #[test]
    fn test_select_distribution_roughly_proportional() {
        let evaluator = Evaluator::new(Arc::new(SineRipple::new()), false);
        let mut population: Vec<Individual<BitString>> = (0..2)
            .map(|_| Individual::from_genes(vec![false; 12], &evaluator).unwrap())
            .collect();
        population[0].set_relative_fitness(0.2);
        population[1].set_relative_fitness(0.8);

        let mut rng = StdRng::seed_from_u64(23);
        let picks = RouletteSelection::new().select_many(&population, 10_000, &mut rng);
        let ones = picks.iter().filter(|&&p| p == 1).count();
        assert!(ones > 7_500 && ones < 8_500, "picked member 1 {} times", ones);
    }
}
