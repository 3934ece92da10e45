//! CLI command implementations.

pub mod pvalue;
pub mod qubo;
pub mod solution;
pub mod timing;
pub mod version;
