//! Multi-trial experiment driver
//!
//! Runs independent populations for a fixed number of generations and
//! summarizes the best, worst and mean objective values seen across every
//! trial and generation.

use std::fmt;
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::GaConfig;
use crate::error::EvoResult;
use crate::fitness::traits::{Evaluator, FitnessFunction};
use crate::genome::traits::Chromosome;
use crate::operators::traits::{CrossoverOperator, MutationOperator};
use crate::population::individual::Individual;
use crate::population::population::{BinaryPopulation, ContinuousPopulation, Population};

/// Copy of an individual's observable state at one point of a run
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IndividualSnapshot {
    /// Trial the individual was observed in
    pub trial: usize,
    /// Generation the individual was observed in
    pub generation: usize,
    /// Decoded variable values
    pub phenotype: Vec<f64>,
    /// Objective value
    pub objective: f64,
    /// Transferral value
    pub transferral: f64,
    /// MSB-first genotype for binary chromosomes
    pub genotype: Option<String>,
}

impl IndividualSnapshot {
    fn capture<C: Chromosome>(individual: &Individual<C>, trial: usize, generation: usize) -> Self {
        Self {
            trial,
            generation,
            phenotype: individual.phenotype().to_vec(),
            objective: individual.objective(),
            transferral: individual.transferral(),
            genotype: individual.genotype().map(str::to_string),
        }
    }
}

impl fmt::Display for IndividualSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "trial {} generation {}: objective {:.6} at {:?}",
            self.trial, self.generation, self.objective, self.phenotype
        )?;
        if let Some(genotype) = &self.genotype {
            write!(f, " ({})", genotype)?;
        }
        Ok(())
    }
}

/// Summary of a finished experiment
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExperimentReport {
    /// Name of the fitness function
    pub function: String,
    /// Name of the crossover operator
    pub operator: String,
    /// Whether the function is maximized
    pub maximize: bool,
    /// Known optimum of the function
    pub optimal_value: f64,
    /// Number of trials run
    pub trials: usize,
    /// Generations per trial
    pub generations: usize,
    /// Members per population
    pub population_size: usize,
    /// Best individual over all observations
    pub best: Option<IndividualSnapshot>,
    /// Worst individual over all observations
    pub worst: Option<IndividualSnapshot>,
    /// Mean objective over all observations
    pub mean_objective: f64,
    /// Mean transferral over all observations (minimization only)
    pub mean_transferral: Option<f64>,
    /// Mating pairs, over all trials, passed on unchanged because crossover
    /// hit its rejection cap
    #[serde(default)]
    pub fallback_pairs: usize,
}

impl fmt::Display for ExperimentReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} with {}", self.function, self.operator)?;
        writeln!(
            f,
            "  {} trials x {} generations x {} members",
            self.trials, self.generations, self.population_size
        )?;
        if let Some(best) = &self.best {
            writeln!(f, "  best:  {}", best)?;
        }
        if let Some(worst) = &self.worst {
            writeln!(f, "  worst: {}", worst)?;
        }
        write!(f, "  mean objective: {:.6}", self.mean_objective)?;
        if let Some(mean) = self.mean_transferral {
            write!(f, "\n  mean transferral: {:.6}", mean)?;
        }
        if self.fallback_pairs > 0 {
            write!(f, "\n  pairs kept after rejected crossover: {}", self.fallback_pairs)?;
        }
        write!(f, "\n  optimum: {}", self.optimal_value)
    }
}

/// Per-trial accumulator
#[derive(Clone, Debug)]
struct TrialSummary {
    best: Option<IndividualSnapshot>,
    worst: Option<IndividualSnapshot>,
    objective_sum: f64,
    transferral_sum: f64,
    observations: usize,
    fallback_pairs: usize,
}

impl TrialSummary {
    fn new() -> Self {
        Self {
            best: None,
            worst: None,
            objective_sum: 0.0,
            transferral_sum: 0.0,
            observations: 0,
            fallback_pairs: 0,
        }
    }

    fn observe<C: Chromosome>(
        &mut self,
        members: &[Individual<C>],
        evaluator: &Evaluator,
        trial: usize,
        generation: usize,
    ) {
        for member in members {
            self.objective_sum += member.objective();
            self.transferral_sum += member.transferral();
            self.observations += 1;

            let better = self
                .best
                .as_ref()
                .map_or(true, |b| evaluator.is_better(member.objective(), b.objective));
            if better {
                self.best = Some(IndividualSnapshot::capture(member, trial, generation));
            }
            let worse = self
                .worst
                .as_ref()
                .map_or(true, |w| evaluator.is_better(w.objective, member.objective()));
            if worse {
                self.worst = Some(IndividualSnapshot::capture(member, trial, generation));
            }
        }
    }

    fn merge(mut self, other: TrialSummary, evaluator: &Evaluator) -> Self {
        self.objective_sum += other.objective_sum;
        self.transferral_sum += other.transferral_sum;
        self.observations += other.observations;
        self.fallback_pairs += other.fallback_pairs;
        self.best = match (self.best, other.best) {
            (Some(a), Some(b)) if evaluator.is_better(b.objective, a.objective) => Some(b),
            (Some(a), _) => Some(a),
            (None, b) => b,
        };
        self.worst = match (self.worst, other.worst) {
            (Some(a), Some(b)) if evaluator.is_better(a.objective, b.objective) => Some(b),
            (Some(a), _) => Some(a),
            (None, b) => b,
        };
        self
    }
}

/// Repeated GA runs on one fitness function
#[derive(Clone, Debug)]
pub struct Experiment {
    function: Arc<dyn FitnessFunction>,
    config: GaConfig,
}

impl Experiment {
    /// Create an experiment with the default configuration
    pub fn new(function: Arc<dyn FitnessFunction>) -> Self {
        Self {
            function,
            config: GaConfig::default(),
        }
    }

    /// Replace the configuration
    pub fn with_config(mut self, config: GaConfig) -> Self {
        self.config = config;
        self
    }

    /// The active configuration
    pub fn config(&self) -> &GaConfig {
        &self.config
    }

    /// Run every trial with a binary population and the given crossover id
    pub fn run_binary(&self, crossover_id: u32) -> EvoResult<ExperimentReport> {
        self.config.validate()?;
        let function = Arc::clone(&self.function);
        let config = self.config.clone();
        self.run_with(move |rng| {
            BinaryPopulation::from_config(Arc::clone(&function), crossover_id, &config, rng)
        })
    }

    /// Run every trial with a continuous population and the given crossover id
    pub fn run_continuous(&self, crossover_id: u32) -> EvoResult<ExperimentReport> {
        self.config.validate()?;
        let function = Arc::clone(&self.function);
        let config = self.config.clone();
        self.run_with(move |rng| {
            ContinuousPopulation::from_config(Arc::clone(&function), crossover_id, &config, rng)
        })
    }

    /// Run every trial with populations built by `build`
    pub fn run_with<C, X, M, B>(&self, build: B) -> EvoResult<ExperimentReport>
    where
        C: Chromosome,
        X: CrossoverOperator<C>,
        M: MutationOperator<C>,
        B: Fn(&mut StdRng) -> EvoResult<Population<C, X, M>> + Send + Sync,
    {
        let run_trial = |trial: usize| -> EvoResult<(TrialSummary, &'static str)> {
            let mut rng = self.trial_rng(trial);
            let mut population = build(&mut rng)?;
            let mut summary = TrialSummary::new();

            for generation in 0..self.config.max_generations {
                summary.observe(population.members(), population.evaluator(), trial, generation);
                population.step(&mut rng)?;
            }
            summary.fallback_pairs = population.fallback_pairs();

            info!(
                trial,
                best = summary.best.as_ref().map(|b| b.objective),
                fallback_pairs = summary.fallback_pairs,
                operator = population.crossover().name(),
                "trial finished"
            );
            Ok((summary, population.crossover().name()))
        };

        #[cfg(feature = "parallel")]
        let results: Vec<(TrialSummary, &'static str)> = (0..self.config.trials)
            .into_par_iter()
            .map(run_trial)
            .collect::<EvoResult<_>>()?;

        #[cfg(not(feature = "parallel"))]
        let results: Vec<(TrialSummary, &'static str)> = (0..self.config.trials)
            .map(run_trial)
            .collect::<EvoResult<_>>()?;

        let evaluator = Evaluator::new(Arc::clone(&self.function), self.config.gray_coding);
        let operator = results.first().map(|(_, name)| *name).unwrap_or_default();
        let summary = results
            .into_iter()
            .map(|(summary, _)| summary)
            .fold(TrialSummary::new(), |acc, s| acc.merge(s, &evaluator));

        let observations = summary.observations.max(1) as f64;
        let maximize = self.function.is_maximize();
        Ok(ExperimentReport {
            function: self.function.name().to_string(),
            operator: operator.to_string(),
            maximize,
            optimal_value: self.function.optimal_value(),
            trials: self.config.trials,
            generations: self.config.max_generations,
            population_size: self.config.population_size,
            best: summary.best,
            worst: summary.worst,
            mean_objective: summary.objective_sum / observations,
            mean_transferral: (!maximize).then(|| summary.transferral_sum / observations),
            fallback_pairs: summary.fallback_pairs,
        })
    }

    fn trial_rng(&self, trial: usize) -> StdRng {
        match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(trial as u64)),
            None => StdRng::from_entropy(),
        }
    }
}
