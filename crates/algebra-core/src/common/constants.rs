//! Shared defaults for the harness and the guarded algorithms.

/// Absolute tolerance used when both compared results are numeric.
pub const DEFAULT_EPSILON: f64 = 1.0e-6;

pub const DEFAULT_INPUT_EXTENSION: &str = ".in";
pub const DEFAULT_OUTPUT_EXTENSION: &str = ".out";

/// Largest input the exponential Fibonacci recursion accepts.
pub const NAIVE_FIBONACCI_MAX_INPUT: u64 = 50;

/// Largest input the linear sieve accepts before its tables get too large.
pub const LINEAR_SIEVE_MAX_INPUT: u64 = 100_000_000;

/// Result text of the naive Fibonacci refusal.
pub const NAIVE_FIBONACCI_REFUSAL: &str = "0";

/// Result text of the linear sieve refusal.
pub const LINEAR_SIEVE_REFUSAL: &str = "-1";

pub const MAX_SUPPORTED_ARITY: usize = 2;

pub const REPORT_SEPARATOR: &str = "=======================================================";
