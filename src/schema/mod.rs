//! Schema module - Catalog, chromosome, configuration and result types.

mod catalog;
mod chromosome;
mod config;
mod optimization;

pub use catalog::*;
pub use chromosome::*;
pub use config::*;
pub use optimization::*;
