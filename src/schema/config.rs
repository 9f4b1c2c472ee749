//! Configuration types for a placement optimization run.

use serde::{Deserialize, Serialize};

/// Top-level optimizer configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizerConfig {
    /// Number of chromosomes kept in the population (at least 2).
    #[serde(default = "default_population_size")]
    pub population_size: usize,
    /// Number of generations to evolve (at least 1).
    #[serde(default = "default_generations")]
    pub generations: usize,
    /// Per-gene mutation probability (0.0-1.0).
    #[serde(default = "default_mutation_rate")]
    pub mutation_rate: f32,
    /// Which population slots the children overwrite.
    #[serde(default)]
    pub replacement: ReplacementStrategy,
    /// Fitness cost constants.
    #[serde(default)]
    pub fitness: FitnessConfig,
    /// Wall-clock budget in milliseconds, checked between generations.
    #[serde(default)]
    pub deadline_ms: Option<u64>,
    /// Random seed for reproducibility.
    #[serde(default)]
    pub random_seed: Option<u64>,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            population_size: default_population_size(),
            generations: default_generations(),
            mutation_rate: default_mutation_rate(),
            replacement: ReplacementStrategy::default(),
            fitness: FitnessConfig::default(),
            deadline_ms: None,
            random_seed: None,
        }
    }
}

fn default_population_size() -> usize {
    20
}
fn default_generations() -> usize {
    100
}
fn default_mutation_rate() -> f32 {
    0.2
}

/// How children are written back into the population each generation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum ReplacementStrategy {
    /// Overwrite the last two slots, whatever they hold. The best individual
    /// may be lost.
    #[default]
    Positional,
    /// Overwrite the two worst-ranked slots and never the best-ranked one.
    Elitist,
}

/// Cost constants used by the fitness evaluator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FitnessConfig {
    /// Cost of a pair where either service has no node.
    #[serde(default = "default_absent_penalty")]
    pub absent_penalty: u64,
    /// Cost of a pair co-located on the same node.
    #[serde(default = "default_colocation_cost")]
    pub colocation_cost: u64,
    /// Inclusive range of synthetic latency between distinct nodes.
    #[serde(default = "default_latency_range")]
    pub latency_range: (u64, u64),
    /// Cost per service beyond the number of distinct nodes used.
    #[serde(default = "default_diversity_weight")]
    pub diversity_weight: u64,
}

impl Default for FitnessConfig {
    fn default() -> Self {
        Self {
            absent_penalty: default_absent_penalty(),
            colocation_cost: default_colocation_cost(),
            latency_range: default_latency_range(),
            diversity_weight: default_diversity_weight(),
        }
    }
}

fn default_absent_penalty() -> u64 {
    1000
}
fn default_colocation_cost() -> u64 {
    5
}
fn default_latency_range() -> (u64, u64) {
    (40, 100)
}
fn default_diversity_weight() -> u64 {
    50
}

impl OptimizerConfig {
    /// Validate configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population_size < 2 {
            return Err(ConfigError::PopulationTooSmall(self.population_size));
        }
        if self.generations == 0 {
            return Err(ConfigError::NoGenerations);
        }
        if !self.mutation_rate.is_finite() || !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(ConfigError::InvalidMutationRate(self.mutation_rate));
        }
        let (min, max) = self.fitness.latency_range;
        if min > max {
            return Err(ConfigError::InvalidLatencyRange { min, max });
        }
        Ok(())
    }
}

/// Configuration validation errors.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("Population size must be at least 2 (got {0})")]
    PopulationTooSmall(usize),
    #[error("Generation count must be at least 1")]
    NoGenerations,
    #[error("Mutation rate must be within [0, 1] (got {0})")]
    InvalidMutationRate(f32),
    #[error("Latency range min ({min}) > max ({max})")]
    InvalidLatencyRange { min: u64, max: u64 },
}
