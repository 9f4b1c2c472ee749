//! Property tests for the genetic operators.

use std::collections::HashMap;

use placement_ga::compute::{
    ConstantLatency, FitnessEvaluator, PlacementRng, select_parents, validate_fault_tolerance,
};
use placement_ga::schema::{Chromosome, FitnessConfig, ServiceCatalog, ServiceEntry};
use proptest::prelude::*;

/// Catalogs of up to 8 services drawing from a pool of 6 nodes; some
/// services may have no candidates at all.
fn catalog_strategy() -> impl Strategy<Value = ServiceCatalog> {
    catalog_with_candidates(0)
}

fn catalog_with_candidates(min: usize) -> impl Strategy<Value = ServiceCatalog> {
    prop::collection::vec(prop::collection::vec(0u8..6, min..4), 1..8).prop_map(|lists| {
        let entries = lists
            .into_iter()
            .enumerate()
            .map(|(i, nodes)| {
                ServiceEntry::new(format!("svc-{i}"), nodes.into_iter().map(|n| format!("n{n}")))
            })
            .collect();
        ServiceCatalog::new(entries).unwrap()
    })
}

proptest! {
    #[test]
    fn random_chromosome_genes_come_from_candidates(catalog in catalog_strategy(), seed: u64) {
        let chromosome = PlacementRng::new(seed).random_chromosome(&catalog);

        prop_assert_eq!(chromosome.len(), catalog.len());
        for (gene, entry) in chromosome.genes().iter().zip(catalog.iter()) {
            match gene {
                Some(node) => prop_assert!(entry.candidates.contains(node)),
                None => prop_assert!(entry.candidates.is_empty()),
            }
        }
    }

    #[test]
    fn crossover_only_recombines_parent_alleles(catalog in catalog_strategy(), seed: u64) {
        let mut rng = PlacementRng::new(seed);
        let p1 = rng.random_chromosome(&catalog);
        let p2 = rng.random_chromosome(&catalog);

        let (c1, c2) = rng.crossover(&p1, &p2).unwrap();

        prop_assert_eq!(c1.len(), p1.len());
        prop_assert_eq!(c2.len(), p1.len());
        for i in 0..p1.len() {
            let parents = [&p1.genes()[i], &p2.genes()[i]];
            let children = [&c1.genes()[i], &c2.genes()[i]];
            prop_assert!(
                children == parents || children == [parents[1], parents[0]],
                "position {} is not a recombination", i
            );
        }
    }

    #[test]
    fn zero_rate_mutation_is_identity(catalog in catalog_strategy(), seed: u64) {
        let mut rng = PlacementRng::new(seed);
        let original = rng.random_chromosome(&catalog);
        let mut mutated = original.clone();

        rng.mutate(&mut mutated, &catalog, 0.0);
        prop_assert_eq!(mutated, original);
    }

    #[test]
    fn full_rate_mutation_redraws_every_gene(catalog in catalog_strategy(), seed: u64) {
        let mut rng = PlacementRng::new(seed);
        let mut chromosome = Chromosome::absent(catalog.len());

        rng.mutate(&mut chromosome, &catalog, 1.0);

        for (gene, entry) in chromosome.genes().iter().zip(catalog.iter()) {
            match gene {
                Some(node) => prop_assert!(entry.candidates.contains(node)),
                None => prop_assert!(entry.candidates.is_empty()),
            }
        }
    }

    #[test]
    fn selection_returns_two_lowest(scores in prop::collection::vec(0u64..5000, 2..20)) {
        let population: Vec<Chromosome> = (0..scores.len())
            .map(|i| [Some(format!("n{i}"))].into_iter().collect())
            .collect();
        let index: HashMap<&Chromosome, usize> =
            population.iter().enumerate().map(|(i, c)| (c, i)).collect();

        let (p1, p2) = select_parents(&population, &scores).unwrap();
        let (i1, i2) = (index[p1], index[p2]);

        prop_assert_ne!(i1, i2);
        prop_assert!(scores[i1] <= scores[i2]);
        for (i, score) in scores.iter().enumerate() {
            if i != i1 && i != i2 {
                prop_assert!(scores[i2] <= *score);
            }
        }
    }

    #[test]
    fn absent_genes_never_lower_fitness(
        catalog in catalog_strategy(),
        seed: u64,
        latency in 40u64..=100,
        slot in any::<prop::sample::Index>(),
    ) {
        let mut evaluator = FitnessEvaluator::new(FitnessConfig::default(), ConstantLatency(latency));
        let chromosome = PlacementRng::new(seed).random_chromosome(&catalog);

        let mut genes = chromosome.clone().into_genes();
        let at = slot.index(genes.len());
        genes[at] = None;
        let degraded = Chromosome::new(genes);

        prop_assert!(
            evaluator.evaluate(&degraded, &catalog) >= evaluator.evaluate(&chromosome, &catalog)
        );
    }

    #[test]
    fn own_candidates_always_validate(catalog in catalog_with_candidates(1), seed: u64) {
        let chromosome = PlacementRng::new(seed).random_chromosome(&catalog);
        prop_assert!(validate_fault_tolerance(&chromosome, &catalog));
    }
}
