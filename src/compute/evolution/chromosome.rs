//! Chromosome manipulation utilities for evolutionary search.
//!
//! Provides random generation, crossover, and mutation operations.

use rand::prelude::*;

use crate::error::OperatorError;
use crate::schema::{Chromosome, ServiceCatalog};

/// Random number generator wrapper for chromosome operations.
///
/// Each optimization run owns one, so concurrent runs never share a stream.
pub struct PlacementRng {
    rng: StdRng,
}

impl PlacementRng {
    /// Create from seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Pick one candidate per service, uniformly at random.
    ///
    /// Services without candidates get an absent gene.
    pub fn random_chromosome(&mut self, catalog: &ServiceCatalog) -> Chromosome {
        catalog
            .iter()
            .map(|entry| entry.candidates.choose(&mut self.rng).cloned())
            .collect::<Vec<_>>()
            .into()
    }

    /// Uniform crossover: every gene is an independent coin flip deciding
    /// which child inherits which parent's allele.
    pub fn crossover(
        &mut self,
        parent1: &Chromosome,
        parent2: &Chromosome,
    ) -> Result<(Chromosome, Chromosome), OperatorError> {
        if parent1.len() != parent2.len() {
            return Err(OperatorError::LengthMismatch {
                left: parent1.len(),
                right: parent2.len(),
            });
        }

        let mut child1 = Vec::with_capacity(parent1.len());
        let mut child2 = Vec::with_capacity(parent2.len());

        for (a, b) in parent1.genes().iter().zip(parent2.genes()) {
            if self.rng.gen_bool(0.5) {
                child1.push(a.clone());
                child2.push(b.clone());
            } else {
                child1.push(b.clone());
                child2.push(a.clone());
            }
        }

        Ok((child1.into(), child2.into()))
    }

    /// Mutate a chromosome in place.
    ///
    /// With probability `rate` each gene is redrawn from its service's
    /// candidates. Genes whose service has no candidates are left as they are.
    pub fn mutate(&mut self, chromosome: &mut Chromosome, catalog: &ServiceCatalog, rate: f32) {
        for (gene, entry) in chromosome.genes_mut().iter_mut().zip(catalog.iter()) {
            if self.rng.r#gen::<f32>() < rate
                && let Some(node) = entry.candidates.choose(&mut self.rng)
            {
                *gene = Some(node.clone());
            }
        }
    }

    /// Generate next u64 for seeding child RNGs.
    pub fn next_seed(&mut self) -> u64 {
        self.rng.r#gen()
    }
}

/// Hamming distance: number of positions holding different alleles.
///
/// Positions beyond the shorter chromosome count as different.
pub fn chromosome_distance(c1: &Chromosome, c2: &Chromosome) -> usize {
    let differing = c1
        .genes()
        .iter()
        .zip(c2.genes())
        .filter(|(a, b)| a != b)
        .count();
    differing + c1.len().abs_diff(c2.len())
}
