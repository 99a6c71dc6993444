pub mod fibonacci;
pub mod matrix;
pub mod power;
pub mod primes;

pub use fibonacci::{FibonacciError, fib_golden_ratio, fib_iter, fib_matrix, fib_naive};
pub use matrix::{Matrix, MatrixElement, MatrixError};
pub use power::{pow_mult, pow_naive, pow_two_factor};
pub use primes::{
    SieveError, integer_sqrt, is_prime_by_known_primes, is_prime_naive, prime_count_div_prime,
    prime_count_naive, prime_count_sieve, prime_count_sieve_compact, prime_count_sieve_linear,
};

use crate::common::constants::DEFAULT_EPSILON;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct AbsoluteTolerance {
    epsilon: f64,
}

impl AbsoluteTolerance {
    pub const fn new(epsilon: f64) -> Self {
        Self { epsilon }
    }

    pub const fn epsilon(&self) -> f64 {
        self.epsilon
    }
}

impl Default for AbsoluteTolerance {
    fn default() -> Self {
        Self::new(DEFAULT_EPSILON)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToleranceComparison {
    pub abs_diff: f64,
    pub passes: bool,
}

/// Strict comparison: a difference equal to epsilon fails.
pub fn compare_within_tolerance(
    expected: f64,
    actual: f64,
    tolerance: AbsoluteTolerance,
) -> ToleranceComparison {
    let abs_diff = (actual - expected).abs();
    ToleranceComparison {
        abs_diff,
        passes: abs_diff < tolerance.epsilon,
    }
}

/// Parses `text` as a number only when the whole string is consumed.
///
/// Surrounding whitespace is not trimmed, so `" 4"` and `"1 2"` are not numbers.
pub fn parse_full_number(text: &str) -> Option<f64> {
    if text.is_empty() {
        return None;
    }
    text.parse::<f64>().ok()
}

pub fn format_numeric(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }

    if value == f64::INFINITY {
        return "inf".to_string();
    }

    if value == f64::NEG_INFINITY {
        return "-inf".to_string();
    }

    format!("{}", value)
}
