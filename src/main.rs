//! Placement GA CLI - Optimize a service placement from JSON files.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use placement_ga::{
    JsonFileSnapshot, OptimizationError, OptimizerConfig, PlacementOptimizer, ServiceCatalog,
    SnapshotProvider, schema::ServiceEntry,
};

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() > 1 && args[1] == "--example" {
        print_example();
        return ExitCode::SUCCESS;
    }

    if args.len() < 2 {
        eprintln!("Usage: {} <catalog.json> [config.json]", args[0]);
        eprintln!();
        eprintln!("Search for a low-latency, fault-tolerant service placement.");
        eprintln!();
        eprintln!("Arguments:");
        eprintln!("  catalog.json  Ordered list of services and their candidate nodes");
        eprintln!("  config.json   Optimizer configuration (default: built-in settings)");
        eprintln!();
        eprintln!("Example inputs are printed with the --example flag.");
        return ExitCode::FAILURE;
    }

    let provider = JsonFileSnapshot::new(&args[1]);
    let catalog = match provider.snapshot() {
        Ok(catalog) => catalog,
        Err(e) => {
            eprintln!("Error loading catalog: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let config = match args.get(2).map(PathBuf::from) {
        Some(path) => {
            let config_str = match fs::read_to_string(&path) {
                Ok(s) => s,
                Err(e) => {
                    eprintln!("Error reading config file: {}", e);
                    return ExitCode::FAILURE;
                }
            };
            match serde_json::from_str::<OptimizerConfig>(&config_str) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("Error parsing config: {}", e);
                    return ExitCode::FAILURE;
                }
            }
        }
        None => OptimizerConfig::default(),
    };

    println!("Service Placement Optimization");
    println!("==============================");
    println!("Services: {}", catalog.len());
    println!("Nodes: {}", catalog.nodes().len());
    println!(
        "Population: {}, generations: {}, mutation rate: {}",
        config.population_size, config.generations, config.mutation_rate
    );
    println!();

    let mut optimizer = match PlacementOptimizer::new(config) {
        Ok(optimizer) => optimizer,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    println!("Seed: {}", optimizer.seed());

    match optimizer.optimize(&catalog) {
        Ok(result) => {
            println!();
            println!("Best node configuration:");
            print_assignments(&result.best, &catalog);
            println!();
            println!("Best fitness (latency): {}", result.fitness);
            println!("Fault tolerance validation: PASS");
            println!(
                "Time: {:.3}s ({} generations, {} evaluations)",
                result.stats.elapsed_seconds,
                result.stats.generations,
                result.stats.total_evaluations
            );
            ExitCode::SUCCESS
        }
        Err(OptimizationError::NoFaultTolerantSolution {
            best,
            fitness,
            uncovered,
        }) => {
            println!();
            println!("Best candidate (fitness {}):", fitness);
            print_assignments(&best, &catalog);
            println!();
            println!("Fault tolerance validation: FAIL");
            println!("Uncovered services: {}", uncovered.join(", "));
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn print_assignments(best: &placement_ga::Chromosome, catalog: &ServiceCatalog) {
    for (service, node) in best.assignments(catalog) {
        println!("  {:<24} -> {}", service, node.unwrap_or("<unassigned>"));
    }
}

fn print_example() {
    let catalog = vec![
        ServiceEntry::new("gateway", ["node-1", "node-2"]),
        ServiceEntry::new("orders", ["node-2", "node-3"]),
        ServiceEntry::new("billing", ["node-3", "node-4"]),
    ];
    let config = OptimizerConfig {
        random_seed: Some(42),
        ..Default::default()
    };

    println!("catalog.json:");
    match serde_json::to_string_pretty(&catalog) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Error serializing catalog: {}", e),
    }
    println!();
    println!("config.json:");
    match serde_json::to_string_pretty(&config) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Error serializing config: {}", e),
    }
}
