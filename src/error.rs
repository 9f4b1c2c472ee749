//! Error types for optimization runs.

use crate::discovery::DiscoveryError;
use crate::schema::{Chromosome, ConfigError};

/// Precondition failures of the genetic operators.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum OperatorError {
    #[error("Chromosome lengths differ ({left} vs {right})")]
    LengthMismatch { left: usize, right: usize },
    #[error("Selection needs at least 2 chromosomes (got {0})")]
    PopulationTooSmall(usize),
    #[error("Got {scores} scores for {population} chromosomes")]
    ScoreCountMismatch { population: usize, scores: usize },
}

/// Why a run produced no placement.
#[derive(Debug, thiserror::Error)]
pub enum OptimizationError {
    /// The snapshot had no services; no population was built.
    #[error("Service catalog is empty; nothing to place")]
    EmptyCatalog,
    /// The best chromosome after all generations leaves a service uncovered.
    #[error("No fault-tolerant solution found (best fitness {fitness}, uncovered: {uncovered:?})")]
    NoFaultTolerantSolution {
        best: Chromosome,
        fitness: u64,
        uncovered: Vec<String>,
    },
    #[error("Invalid optimizer configuration: {0}")]
    InvalidConfig(#[from] ConfigError),
    #[error("Service snapshot unavailable: {0}")]
    Discovery(#[from] DiscoveryError),
    #[error(transparent)]
    Operator(#[from] OperatorError),
}
