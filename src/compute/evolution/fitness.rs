//! Fitness evaluation for placement chromosomes.
//!
//! Fitness is a cost: lower is better. Every unordered pair of genes adds
//! either the absent penalty, the co-location cost, or a synthetic latency
//! between two distinct nodes; a diversity penalty is added once on top.
//!
//! Evaluation visits every pair of genes, so it is O(n²) in the number of
//! services. That is fine for the tens of services a snapshot usually holds
//! and is the first thing to revisit for catalogs in the thousands.

use rand::prelude::*;
use rand_distr::Uniform;

use crate::schema::{Chromosome, ConfigError, FitnessConfig, ServiceCatalog};

/// Source of inter-node latency used by the evaluator.
///
/// Called once per pair of distinct nodes on every evaluation; results must
/// not be cached between calls.
pub trait LatencyModel {
    fn latency(&mut self, from: &str, to: &str) -> u64;
}

impl LatencyModel for Box<dyn LatencyModel + Send> {
    fn latency(&mut self, from: &str, to: &str) -> u64 {
        (**self).latency(from, to)
    }
}

/// The same latency for every pair of distinct nodes.
#[derive(Debug, Clone, Copy)]
pub struct ConstantLatency(pub u64);

impl LatencyModel for ConstantLatency {
    fn latency(&mut self, _from: &str, _to: &str) -> u64 {
        self.0
    }
}

/// Uniform random latency within an inclusive range, re-sampled per call.
pub struct SyntheticLatency {
    rng: StdRng,
    range: Uniform<u64>,
}

impl SyntheticLatency {
    pub fn new(seed: u64, (min, max): (u64, u64)) -> Result<Self, ConfigError> {
        if min > max {
            return Err(ConfigError::InvalidLatencyRange { min, max });
        }
        Ok(Self {
            rng: StdRng::seed_from_u64(seed),
            range: Uniform::new_inclusive(min, max),
        })
    }
}

impl LatencyModel for SyntheticLatency {
    fn latency(&mut self, _from: &str, _to: &str) -> u64 {
        self.range.sample(&mut self.rng)
    }
}

/// Scores chromosomes against a catalog.
pub struct FitnessEvaluator<L = SyntheticLatency> {
    config: FitnessConfig,
    latency: L,
}

impl<L: LatencyModel> FitnessEvaluator<L> {
    /// Create a new fitness evaluator.
    pub fn new(config: FitnessConfig, latency: L) -> Self {
        Self { config, latency }
    }

    /// Evaluate a chromosome. Lower is better; saturates at `u64::MAX`.
    pub fn evaluate(&mut self, chromosome: &Chromosome, catalog: &ServiceCatalog) -> u64 {
        let genes = chromosome.genes();
        let mut total = 0u64;

        for (i, a) in genes.iter().enumerate() {
            for b in &genes[i + 1..] {
                let cost = match (a, b) {
                    (None, _) | (_, None) => self.config.absent_penalty,
                    (Some(a), Some(b)) if a == b => self.config.colocation_cost,
                    (Some(a), Some(b)) => self.latency.latency(a, b),
                };
                total = total.saturating_add(cost);
            }
        }

        let crowded = catalog.len().saturating_sub(chromosome.distinct_nodes()) as u64;
        total.saturating_add(crowded.saturating_mul(self.config.diversity_weight))
    }
}
