//! Generational search driving a placement population to convergence.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use log::{debug, info, warn};
use rayon::prelude::*;

use crate::discovery::SnapshotProvider;
use crate::error::OptimizationError;
use crate::schema::{
    Chromosome, EvolutionHistory, GenerationProgress, OptimizationResult, OptimizationStats,
    OptimizerConfig, OptimizerPhase, ReplacementStrategy, ServiceCatalog, StopReason,
};

use super::chromosome::{PlacementRng, chromosome_distance};
use super::fitness::{FitnessEvaluator, LatencyModel, SyntheticLatency};
use super::selection::{rank, select_parents};
use super::validation::uncovered_services;

/// Optimizer that runs the generational loop over one catalog snapshot.
///
/// Each generation evaluates every chromosome, breeds the two best-ranked
/// into two mutated children and writes them back into the population.
pub struct PlacementOptimizer {
    config: OptimizerConfig,
    seed: u64,
    rng: PlacementRng,
    evaluator: FitnessEvaluator<Box<dyn LatencyModel + Send>>,
    population: Vec<Chromosome>,
    history: EvolutionHistory,
    generation: usize,
    best_fitness: u64,
    evaluations: u64,
    phase: OptimizerPhase,
    cancelled: Arc<AtomicBool>,
}

impl PlacementOptimizer {
    /// Create a new optimizer. Fails on an invalid configuration.
    pub fn new(config: OptimizerConfig) -> Result<Self, OptimizationError> {
        config.validate()?;

        let seed = config.random_seed.unwrap_or_else(rand::random);
        let mut rng = PlacementRng::new(seed);
        let latency: Box<dyn LatencyModel + Send> = Box::new(SyntheticLatency::new(
            rng.next_seed(),
            config.fitness.latency_range,
        )?);
        let evaluator = FitnessEvaluator::new(config.fitness.clone(), latency);

        Ok(Self {
            config,
            seed,
            rng,
            evaluator,
            population: Vec::new(),
            history: EvolutionHistory::default(),
            generation: 0,
            best_fitness: u64::MAX,
            evaluations: 0,
            phase: OptimizerPhase::Initializing,
            cancelled: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Replace the synthetic latency source, e.g. with a deterministic one.
    pub fn with_latency_model<L>(mut self, latency: L) -> Self
    where
        L: LatencyModel + Send + 'static,
    {
        self.evaluator = FitnessEvaluator::new(self.config.fitness.clone(), Box::new(latency));
        self
    }

    /// Get cancellation handle.
    pub fn cancel_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancelled)
    }

    /// Seed driving this optimizer's random stream.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn phase(&self) -> OptimizerPhase {
        self.phase
    }

    pub fn population(&self) -> &[Chromosome] {
        &self.population
    }

    /// Build the initial population of random chromosomes.
    pub fn initialize(&mut self, catalog: &ServiceCatalog) -> Result<(), OptimizationError> {
        self.population.clear();
        self.history = EvolutionHistory::default();
        self.generation = 0;
        self.best_fitness = u64::MAX;
        self.evaluations = 0;
        self.phase = OptimizerPhase::Initializing;

        if catalog.is_empty() {
            self.phase = OptimizerPhase::Failed;
            return Err(OptimizationError::EmptyCatalog);
        }

        for _ in 0..self.config.population_size {
            let chromosome = self.rng.random_chromosome(catalog);
            self.population.push(chromosome);
        }
        debug!(
            "initialized {} chromosomes over {} services (seed {})",
            self.population.len(),
            catalog.len(),
            self.seed
        );

        self.phase = OptimizerPhase::Evolving;
        Ok(())
    }

    /// Score every chromosome. Scores are never reused across calls.
    fn evaluate_population(&mut self, catalog: &ServiceCatalog) -> Vec<u64> {
        self.evaluations += self.population.len() as u64;
        self.population
            .iter()
            .map(|c| self.evaluator.evaluate(c, catalog))
            .collect()
    }

    /// Run a single generation step.
    fn step_generation(
        &mut self,
        catalog: &ServiceCatalog,
    ) -> Result<GenerationProgress, OptimizationError> {
        let scores = self.evaluate_population(catalog);

        let (parent1, parent2) = select_parents(&self.population, &scores)?;
        let (mut child1, mut child2) = self.rng.crossover(parent1, parent2)?;
        self.rng.mutate(&mut child1, catalog, self.config.mutation_rate);
        self.rng.mutate(&mut child2, catalog, self.config.mutation_rate);

        let generation_best = scores.iter().copied().min().unwrap_or(u64::MAX);
        self.best_fitness = self.best_fitness.min(generation_best);
        let avg_fitness =
            scores.iter().map(|&s| u128::from(s)).sum::<u128>() as f64 / scores.len() as f64;
        let diversity = self.compute_diversity();

        self.replace(&scores, child1, child2);
        self.generation += 1;

        self.history.best_fitness.push(generation_best);
        self.history.avg_fitness.push(avg_fitness);
        self.history.diversity.push(diversity);

        info!(
            "generation {}/{} | best fitness: {}",
            self.generation, self.config.generations, generation_best
        );

        Ok(GenerationProgress {
            generation: self.generation,
            total_generations: self.config.generations,
            generation_best,
            best_fitness: self.best_fitness,
            avg_fitness,
            diversity,
            phase: self.phase,
        })
    }

    /// Write the children back according to the replacement strategy.
    fn replace(&mut self, scores: &[u64], child1: Chromosome, child2: Chromosome) {
        let n = self.population.len();
        match self.config.replacement {
            ReplacementStrategy::Positional => {
                self.population[n - 2] = child1;
                self.population[n - 1] = child2;
            }
            ReplacementStrategy::Elitist => {
                let order = rank(scores);
                if n == 2 {
                    // Only one slot is not the best.
                    self.population[order[1]] = child1;
                } else {
                    self.population[order[n - 1]] = child1;
                    self.population[order[n - 2]] = child2;
                }
            }
        }
        debug!("children written back ({:?})", self.config.replacement);
    }

    /// Mean pairwise Hamming distance across the population.
    fn compute_diversity(&self) -> f64 {
        if self.population.len() < 2 {
            return 0.0;
        }

        let mut total = 0usize;
        let mut count = 0usize;
        for i in 0..self.population.len() {
            for j in (i + 1)..self.population.len() {
                total += chromosome_distance(&self.population[i], &self.population[j]);
                count += 1;
            }
        }
        total as f64 / count as f64
    }

    /// Check if evolution should stop.
    fn should_stop(&self, started: Instant) -> Option<StopReason> {
        if self.cancelled.load(Ordering::Relaxed) {
            return Some(StopReason::Cancelled);
        }

        if self.generation >= self.config.generations {
            return Some(StopReason::MaxGenerations);
        }

        if let Some(ms) = self.config.deadline_ms
            && started.elapsed() >= Duration::from_millis(ms)
        {
            return Some(StopReason::DeadlineExceeded);
        }

        None
    }

    /// Pick the lowest-fitness chromosome of the final population.
    ///
    /// The population is re-evaluated; the first chromosome wins ties.
    fn converge(&mut self, catalog: &ServiceCatalog) -> (Chromosome, u64) {
        self.phase = OptimizerPhase::Converged;
        let scores = self.evaluate_population(catalog);
        let (index, fitness) = scores
            .iter()
            .copied()
            .enumerate()
            .min_by_key(|&(_, score)| score)
            .unwrap_or((0, u64::MAX));
        (self.population[index].clone(), fitness)
    }

    /// Run evolution with progress callback.
    pub fn run_with_callback<F>(
        &mut self,
        catalog: &ServiceCatalog,
        mut callback: F,
    ) -> Result<OptimizationResult, OptimizationError>
    where
        F: FnMut(&GenerationProgress),
    {
        let started = Instant::now();

        self.initialize(catalog)?;

        let stop_reason = loop {
            if let Some(reason) = self.should_stop(started) {
                break reason;
            }
            match self.step_generation(catalog) {
                Ok(progress) => callback(&progress),
                Err(err) => {
                    self.phase = OptimizerPhase::Failed;
                    return Err(err);
                }
            }
        };

        if stop_reason != StopReason::MaxGenerations {
            warn!(
                "stopped after {}/{} generations: {:?}",
                self.generation, self.config.generations, stop_reason
            );
        }

        let (best, fitness) = self.converge(catalog);
        self.best_fitness = self.best_fitness.min(fitness);

        let uncovered = uncovered_services(&best, catalog);
        if !uncovered.is_empty() {
            warn!("no fault-tolerant solution found; uncovered services: {uncovered:?}");
            self.phase = OptimizerPhase::Failed;
            return Err(OptimizationError::NoFaultTolerantSolution {
                best,
                fitness,
                uncovered,
            });
        }

        info!("converged with fitness {fitness} after {} generations", self.generation);

        Ok(OptimizationResult {
            best,
            fitness,
            stats: OptimizationStats {
                generations: self.generation,
                total_evaluations: self.evaluations,
                best_fitness_seen: self.best_fitness,
                elapsed_seconds: started.elapsed().as_secs_f64(),
                seed: self.seed,
                stop_reason,
            },
            history: self.history.clone(),
        })
    }

    /// Run the optimization (blocking).
    pub fn optimize(
        &mut self,
        catalog: &ServiceCatalog,
    ) -> Result<OptimizationResult, OptimizationError> {
        self.run_with_callback(catalog, |_| {})
    }

    /// Fetch a snapshot from the provider, then optimize it.
    pub fn optimize_from<P>(&mut self, provider: &P) -> Result<OptimizationResult, OptimizationError>
    where
        P: SnapshotProvider + ?Sized,
    {
        let catalog = provider.snapshot()?;
        self.optimize(&catalog)
    }
}

/// Run one independent optimization per seed, in parallel.
///
/// Every run owns its own random stream, so each outcome matches a
/// sequential run with the same seed. Results follow the order of `seeds`.
pub fn explore_seeds(
    config: &OptimizerConfig,
    catalog: &ServiceCatalog,
    seeds: &[u64],
) -> Vec<Result<OptimizationResult, OptimizationError>> {
    seeds
        .par_iter()
        .map(|&seed| {
            let config = OptimizerConfig {
                random_seed: Some(seed),
                ..config.clone()
            };
            PlacementOptimizer::new(config)?.optimize(catalog)
        })
        .collect()
}
