//! Post-optimization fault-tolerance check.
//!
//! A service counts as covered when any gene of the chromosome, at any
//! position, holds one of that service's candidate nodes. Position *i* is not
//! required to cover service *i*, so two services sharing a candidate node can
//! both be covered by a single gene.

use std::collections::HashSet;

use crate::schema::{Chromosome, ServiceCatalog};

/// Services with no candidate node present anywhere in the chromosome, in
/// catalog order.
pub fn uncovered_services(chromosome: &Chromosome, catalog: &ServiceCatalog) -> Vec<String> {
    let placed: HashSet<&str> = chromosome
        .genes()
        .iter()
        .flatten()
        .map(String::as_str)
        .collect();

    catalog
        .iter()
        .filter(|entry| !entry.candidates.iter().any(|n| placed.contains(n.as_str())))
        .map(|entry| entry.service.clone())
        .collect()
}

/// True when every catalog service is covered by the chromosome.
pub fn validate_fault_tolerance(chromosome: &Chromosome, catalog: &ServiceCatalog) -> bool {
    uncovered_services(chromosome, catalog).is_empty()
}
