//! Evolutionary search for service placement.
//!
//! A chromosome holds one node per service, in catalog order. The search
//! evolves a fixed-size population toward low inter-node latency and then
//! checks that the winner keeps every service covered.
//!
//! # Overview
//!
//! - **Chromosome Operations** (`chromosome`): Random generation, uniform
//!   crossover, and per-gene mutation
//! - **Fitness** (`fitness`): Pairwise latency cost with absent and diversity
//!   penalties, drawn from a pluggable latency model
//! - **Selection** (`selection`): Rank-based choice of the two parents
//! - **Validation** (`validation`): Fault-tolerance coverage check
//! - **Search** (`search`): The generational loop and parallel seed exploration
//!
//! # Example
//!
//! ```rust,no_run
//! use placement_ga::compute::evolution::PlacementOptimizer;
//! use placement_ga::schema::{OptimizerConfig, ServiceCatalog};
//!
//! let catalog = ServiceCatalog::from_pairs([
//!     ("orders", vec!["node-a", "node-b"]),
//!     ("billing", vec!["node-b", "node-c"]),
//! ])?;
//!
//! let mut optimizer = PlacementOptimizer::new(OptimizerConfig::default())?;
//! let result = optimizer.run_with_callback(&catalog, |progress| {
//!     println!("Generation {}: best fitness = {}",
//!         progress.generation, progress.generation_best);
//! })?;
//!
//! for (service, node) in result.best.assignments(&catalog) {
//!     println!("{service} -> {node:?}");
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod chromosome;
mod fitness;
mod search;
mod selection;
mod validation;

pub use chromosome::{PlacementRng, chromosome_distance};
pub use fitness::{ConstantLatency, FitnessEvaluator, LatencyModel, SyntheticLatency};
pub use search::{PlacementOptimizer, explore_seeds};
pub use selection::{rank, select_parents};
pub use validation::{uncovered_services, validate_fault_tolerance};
