//! Catalog of the numeric algorithms that can be bound to a fixture run.
//!
//! Every algorithm takes its arguments as text, the way fixture lines
//! arrive, and renders its answer as text for the comparator.

use crate::common::AlgorithmLimits;
use crate::common::constants::{LINEAR_SIEVE_REFUSAL, NAIVE_FIBONACCI_REFUSAL};
use crate::domain::AlgebraError;
use crate::harness::FunctionBinding;
use crate::numerics::{
    SieveError, fib_golden_ratio, fib_iter, fib_matrix, fib_naive, format_numeric, integer_sqrt,
    is_prime_naive, pow_mult, pow_naive, pow_two_factor, prime_count_div_prime,
    prime_count_naive, prime_count_sieve, prime_count_sieve_compact, prime_count_sieve_linear,
};
use serde::Serialize;
use std::fmt::Display;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AlgorithmSpec {
    pub name: &'static str,
    pub arity: usize,
    pub description: &'static str,
}

pub const ALGORITHMS: [AlgorithmSpec; 14] = [
    AlgorithmSpec {
        name: "pow-naive",
        arity: 2,
        description: "base^exponent by repeated multiplication",
    },
    AlgorithmSpec {
        name: "pow-mult",
        arity: 2,
        description: "base^exponent by squaring to the largest power of two, then stepping",
    },
    AlgorithmSpec {
        name: "pow-two-factor",
        arity: 2,
        description: "base^exponent by binary exponentiation",
    },
    AlgorithmSpec {
        name: "fib-naive",
        arity: 1,
        description: "F(n) by plain recursion, refuses large n",
    },
    AlgorithmSpec {
        name: "fib-iter",
        arity: 1,
        description: "F(n) by iteration in 128-bit integers",
    },
    AlgorithmSpec {
        name: "fib-golden-ratio",
        arity: 1,
        description: "F(n) by Binet's formula",
    },
    AlgorithmSpec {
        name: "fib-matrix",
        arity: 1,
        description: "F(n) by fast power of [[0,1],[1,1]]",
    },
    AlgorithmSpec {
        name: "is-prime-naive",
        arity: 1,
        description: "1 when n is prime, 0 otherwise, by trial division",
    },
    AlgorithmSpec {
        name: "prime-count-naive",
        arity: 1,
        description: "pi(n) by naive trial division",
    },
    AlgorithmSpec {
        name: "prime-count-div-prime",
        arity: 1,
        description: "pi(n) by division through known primes",
    },
    AlgorithmSpec {
        name: "prime-count-sieve",
        arity: 1,
        description: "pi(n) by the sieve of Eratosthenes",
    },
    AlgorithmSpec {
        name: "prime-count-sieve-linear",
        arity: 1,
        description: "pi(n) by the linear sieve, refuses large n",
    },
    AlgorithmSpec {
        name: "prime-count-sieve-compact",
        arity: 1,
        description: "pi(n) by a bit packed sieve of Eratosthenes",
    },
    AlgorithmSpec {
        name: "isqrt",
        arity: 1,
        description: "largest r with r*r <= n",
    },
];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("unknown algorithm '{name}' (known: {known})")]
    UnknownAlgorithm { name: String, known: String },
}

impl From<CatalogError> for AlgebraError {
    fn from(error: CatalogError) -> Self {
        AlgebraError::input_validation("INPUT.UNKNOWN_ALGORITHM", error.to_string())
    }
}

pub fn find_algorithm(name: &str) -> Option<&'static AlgorithmSpec> {
    ALGORITHMS.iter().find(|spec| spec.name == name)
}

pub fn algorithm_names() -> impl Iterator<Item = &'static str> {
    ALGORITHMS.iter().map(|spec| spec.name)
}

/// Builds the fixture binding for a catalog algorithm.
pub fn binding_for(name: &str, limits: &AlgorithmLimits) -> Result<FunctionBinding, CatalogError> {
    let naive_fibonacci_limit = limits.naive_fibonacci_max_input;
    let linear_sieve_limit = limits.linear_sieve_max_input;

    let binding = match name {
        "pow-naive" => FunctionBinding::binary(name, |base, exponent| {
            power(base, exponent, pow_naive)
        }),
        "pow-mult" => FunctionBinding::binary(name, |base, exponent| {
            power(base, exponent, pow_mult)
        }),
        "pow-two-factor" => FunctionBinding::binary(name, |base, exponent| {
            power(base, exponent, pow_two_factor)
        }),
        "fib-naive" => FunctionBinding::unary(name, move |n| {
            with_index(n, |n| match fib_naive(n, naive_fibonacci_limit) {
                Ok(value) => value.to_string(),
                Err(error) => refuse(&error, NAIVE_FIBONACCI_REFUSAL),
            })
        }),
        "fib-iter" => FunctionBinding::unary(name, |n| {
            with_index(n, |n| match fib_iter(n) {
                Ok(value) => value.to_string(),
                Err(error) => {
                    tracing::warn!(%error, "iterative fibonacci overflowed");
                    error.to_string()
                }
            })
        }),
        "fib-golden-ratio" => FunctionBinding::unary(name, |n| {
            with_index(n, |n| fib_golden_ratio(n).to_string())
        }),
        "fib-matrix" => {
            FunctionBinding::unary(name, |n| with_index(n, |n| fib_matrix(n).to_string()))
        }
        "is-prime-naive" => FunctionBinding::unary(name, |n| {
            with_index(n, |n| u8::from(is_prime_naive(n)).to_string())
        }),
        "prime-count-naive" => FunctionBinding::unary(name, |n| {
            with_index(n, |n| prime_count_naive(n).to_string())
        }),
        "prime-count-div-prime" => FunctionBinding::unary(name, |n| {
            with_index(n, |n| prime_count_div_prime(n).to_string())
        }),
        "prime-count-sieve" => FunctionBinding::unary(name, |n| {
            with_index(n, |n| render_count(prime_count_sieve(n)))
        }),
        "prime-count-sieve-linear" => FunctionBinding::unary(name, move |n| {
            with_index(n, |n| render_count(prime_count_sieve_linear(n, linear_sieve_limit)))
        }),
        "prime-count-sieve-compact" => FunctionBinding::unary(name, |n| {
            with_index(n, |n| render_count(prime_count_sieve_compact(n)))
        }),
        "isqrt" => FunctionBinding::unary(name, |n| with_index(n, |n| integer_sqrt(n).to_string())),
        _ => {
            return Err(CatalogError::UnknownAlgorithm {
                name: name.to_string(),
                known: algorithm_names().collect::<Vec<_>>().join(", "),
            });
        }
    };
    Ok(binding)
}

fn power(base: &str, exponent: &str, pow: fn(f64, u64) -> f64) -> String {
    let base = match parse_argument::<f64>(base) {
        Ok(base) => base,
        Err(message) => return message,
    };
    with_index(exponent, |exponent| format_numeric(pow(base, exponent)))
}

fn with_index(text: &str, compute: impl FnOnce(u64) -> String) -> String {
    match parse_argument::<u64>(text) {
        Ok(n) => compute(n),
        Err(message) => message,
    }
}

fn parse_argument<T: FromStr>(text: &str) -> Result<T, String> {
    text.trim()
        .parse::<T>()
        .map_err(|_| format!("invalid argument '{text}'"))
}

// A table that cannot be allocated is reported as text by every sieve.
fn render_count(count: Result<usize, SieveError>) -> String {
    match count {
        Ok(count) => count.to_string(),
        Err(error @ SieveError::InputTooLarge { .. }) => refuse(&error, LINEAR_SIEVE_REFUSAL),
        Err(error @ SieveError::TableTooLarge { .. }) => {
            tracing::warn!(%error, "sieve table could not be allocated");
            error.to_string()
        }
    }
}

fn refuse(error: &impl Display, sentinel: &str) -> String {
    tracing::warn!(%error, sentinel, "algorithm refused its input");
    sentinel.to_string()
}
