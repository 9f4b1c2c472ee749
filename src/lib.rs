//! Placement GA - Genetic-algorithm search for service placement.
//!
//! This crate assigns every service of a discovery snapshot to one of its
//! candidate nodes, searching for low inter-node latency while keeping each
//! service represented in the final placement.
//!
//! # Architecture
//!
//! The crate is split into these modules:
//!
//! - `schema`: Catalog, chromosome, configuration and result types
//! - `compute`: The evolutionary search (operators, fitness, generational loop)
//! - `discovery`: The `SnapshotProvider` seam that supplies catalogs
//! - `error`: Run failure taxonomy
//!
//! Latency between distinct nodes is synthetic: a uniform draw from a fixed
//! range, re-sampled on every evaluation. Identical chromosomes can therefore
//! score differently from one generation to the next.
//!
//! # Example
//!
//! ```rust,no_run
//! use placement_ga::{OptimizationError, OptimizerConfig, PlacementOptimizer, ServiceCatalog};
//!
//! let catalog = ServiceCatalog::from_pairs([
//!     ("A", vec!["n1", "n2"]),
//!     ("B", vec!["n2", "n3"]),
//! ])?;
//!
//! let config = OptimizerConfig {
//!     population_size: 4,
//!     generations: 5,
//!     random_seed: Some(42),
//!     ..Default::default()
//! };
//!
//! match PlacementOptimizer::new(config)?.optimize(&catalog) {
//!     Ok(result) => println!("best placement: {:?}", result.best),
//!     Err(OptimizationError::NoFaultTolerantSolution { uncovered, .. }) => {
//!         println!("uncovered services: {uncovered:?}");
//!     }
//!     Err(err) => return Err(err.into()),
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod compute;
pub mod discovery;
pub mod error;
pub mod schema;

// Re-export commonly used types
pub use compute::{PlacementOptimizer, explore_seeds, validate_fault_tolerance};
pub use discovery::{DiscoveryError, JsonFileSnapshot, SnapshotProvider, StaticSnapshot};
pub use error::{OperatorError, OptimizationError};
pub use schema::{Chromosome, OptimizationResult, OptimizerConfig, ServiceCatalog};
