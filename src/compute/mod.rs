//! Compute module - Search algorithms for service placement.

pub mod evolution;

pub use evolution::*;
