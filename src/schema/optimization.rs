//! Progress and result types for a placement optimization run.

use serde::{Deserialize, Serialize};

use super::Chromosome;

/// Lifecycle phase of the optimizer.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum OptimizerPhase {
    /// Building the initial population.
    #[default]
    Initializing,
    /// Running generations.
    Evolving,
    /// Generation budget spent; best solution chosen.
    Converged,
    /// Run ended without a usable solution.
    Failed,
}

/// Progress update emitted after every generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationProgress {
    /// Generations completed so far (1-based after the first step).
    pub generation: usize,
    /// Total generations planned.
    pub total_generations: usize,
    /// Minimum fitness among this generation's evaluations.
    pub generation_best: u64,
    /// Lowest fitness seen across all generations.
    pub best_fitness: u64,
    /// Average fitness of this generation's evaluations.
    pub avg_fitness: f64,
    /// Mean pairwise Hamming distance across the population.
    pub diversity: f64,
    /// Current phase.
    pub phase: OptimizerPhase,
}

/// Per-generation history for analysis.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct EvolutionHistory {
    /// Best fitness per generation.
    pub best_fitness: Vec<u64>,
    /// Average fitness per generation.
    pub avg_fitness: Vec<f64>,
    /// Diversity per generation.
    pub diversity: Vec<f64>,
}

/// Reason the generational loop stopped.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum StopReason {
    /// Ran the configured number of generations.
    MaxGenerations,
    /// Cancelled through the cancel handle.
    Cancelled,
    /// Wall-clock deadline passed.
    DeadlineExceeded,
}

/// Statistics from a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizationStats {
    /// Generations actually run.
    pub generations: usize,
    /// Total chromosome evaluations, including the final one.
    pub total_evaluations: u64,
    /// Lowest fitness seen during the run.
    pub best_fitness_seen: u64,
    /// Time taken (in seconds).
    pub elapsed_seconds: f64,
    /// Seed that drove the run's random stream.
    pub seed: u64,
    /// Reason for stopping.
    pub stop_reason: StopReason,
}

/// A fault-tolerant placement found by the optimizer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizationResult {
    /// Best chromosome of the final population.
    pub best: Chromosome,
    /// Its fitness at the final evaluation.
    pub fitness: u64,
    /// Run statistics.
    pub stats: OptimizationStats,
    /// Per-generation history.
    pub history: EvolutionHistory,
}
