//! End-to-end optimization runs over small catalogs.

use placement_ga::compute::ConstantLatency;
use placement_ga::schema::{OptimizerPhase, ReplacementStrategy, StopReason};
use placement_ga::{
    JsonFileSnapshot, OptimizationError, OptimizerConfig, PlacementOptimizer, ServiceCatalog,
    StaticSnapshot, explore_seeds, validate_fault_tolerance,
};

fn config(population_size: usize, generations: usize, seed: u64) -> OptimizerConfig {
    OptimizerConfig {
        population_size,
        generations,
        random_seed: Some(seed),
        ..Default::default()
    }
}

#[test]
fn two_service_catalog_terminates() {
    let catalog =
        ServiceCatalog::from_pairs([("A", vec!["n1", "n2"]), ("B", vec!["n2", "n3"])]).unwrap();

    for seed in 0..20 {
        let mut optimizer = PlacementOptimizer::new(config(4, 5, seed)).unwrap();
        match optimizer.optimize(&catalog) {
            Ok(result) => {
                assert_eq!(result.best.len(), 2);
                assert!(validate_fault_tolerance(&result.best, &catalog));
                assert_eq!(result.stats.seed, seed);
            }
            Err(OptimizationError::NoFaultTolerantSolution { best, .. }) => {
                assert_eq!(best.len(), 2);
            }
            Err(other) => panic!("unexpected failure: {other}"),
        }
    }
}

#[test]
fn empty_catalog_is_reported() {
    let mut optimizer = PlacementOptimizer::new(config(4, 5, 1)).unwrap();
    let provider = StaticSnapshot::new(ServiceCatalog::default());

    let err = optimizer.optimize_from(&provider).unwrap_err();
    assert!(matches!(err, OptimizationError::EmptyCatalog));
    assert!(optimizer.population().is_empty());
    assert_eq!(optimizer.phase(), OptimizerPhase::Failed);
}

#[test]
fn unavailable_snapshot_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let provider = JsonFileSnapshot::new(dir.path().join("missing.json"));
    let mut optimizer = PlacementOptimizer::new(config(4, 5, 1)).unwrap();

    let err = optimizer.optimize_from(&provider).unwrap_err();
    assert!(matches!(err, OptimizationError::Discovery(_)));
}

#[test]
fn elitist_search_converges_on_cheapest_layout() {
    // Four services, each free to use any of four nodes, flat latency 40.
    // Full co-location costs 6 * 5 + 3 * 50 = 180, below every other layout
    // (a full spread costs 6 * 40 = 240).
    let nodes = ["n1", "n2", "n3", "n4"];
    let catalog = ServiceCatalog::from_pairs(
        ["a", "b", "c", "d"].into_iter().map(|s| (s, nodes.to_vec())),
    )
    .unwrap();
    let config = OptimizerConfig {
        replacement: ReplacementStrategy::Elitist,
        ..config(20, 300, 7)
    };

    let mut optimizer = PlacementOptimizer::new(config)
        .unwrap()
        .with_latency_model(ConstantLatency(40));
    let result = optimizer.optimize(&catalog).unwrap();

    // Deterministic scores plus elitism: the best never gets worse.
    let best = &result.history.best_fitness;
    assert!(best.windows(2).all(|w| w[1] <= w[0]));
    assert!(result.fitness <= best[0]);

    assert_eq!(result.fitness, 180);
    assert_eq!(result.best.distinct_nodes(), 1);
    assert_eq!(result.stats.stop_reason, StopReason::MaxGenerations);
}

#[test]
fn seed_exploration_runs_independently() {
    let catalog = ServiceCatalog::from_pairs([
        ("gateway", vec!["n1", "n2", "n3"]),
        ("orders", vec!["n2", "n3"]),
        ("billing", vec!["n3", "n4"]),
    ])
    .unwrap();
    let seeds = [11, 12, 13, 14];

    let results = explore_seeds(&config(6, 10, 0), &catalog, &seeds);

    assert_eq!(results.len(), seeds.len());
    for (seed, result) in seeds.iter().zip(&results) {
        let result = result.as_ref().unwrap();
        assert_eq!(result.stats.seed, *seed);
        assert_eq!(result.best.len(), 3);
    }
}
