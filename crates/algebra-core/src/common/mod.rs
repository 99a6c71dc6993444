pub mod config;
pub mod constants;

pub use config::{AlgorithmLimits, HarnessPolicy, PolicyError};
