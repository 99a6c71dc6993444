//! Fibonacci numbers, F(0) = 0, F(1) = 1.

use super::matrix::Matrix;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FibonacciError {
    #[error("input {n} exceeds the limit {limit} of the naive recursion")]
    InputTooLarge { n: u64, limit: u64 },
    #[error("F({n}) does not fit in 128 bits")]
    Overflow { n: u64 },
}

/// Plain two-way recursion; refuses inputs above `limit`.
pub fn fib_naive(n: u64, limit: u64) -> Result<u64, FibonacciError> {
    if n > limit {
        return Err(FibonacciError::InputTooLarge { n, limit });
    }
    Ok(fib_recursive(n))
}

fn fib_recursive(n: u64) -> u64 {
    if n < 2 {
        return n;
    }
    fib_recursive(n - 1).wrapping_add(fib_recursive(n - 2))
}

pub fn fib_iter(n: u64) -> Result<u128, FibonacciError> {
    if n == 0 {
        return Ok(0);
    }

    let mut previous: u128 = 0;
    let mut current: u128 = 1;
    for _ in 1..n {
        let next = previous
            .checked_add(current)
            .ok_or(FibonacciError::Overflow { n })?;
        previous = current;
        current = next;
    }
    Ok(current)
}

/// Binet's formula rounded to the nearest integer.
///
/// Exact up to roughly F(70); beyond that `f64` precision runs out and the
/// cast saturates at `u64::MAX`.
pub fn fib_golden_ratio(n: u64) -> u64 {
    let sqrt5 = 5.0_f64.sqrt();
    let phi = (1.0 + sqrt5) / 2.0;
    let exponent = i32::try_from(n).unwrap_or(i32::MAX);
    (phi.powi(exponent) / sqrt5 + 0.5) as u64
}

/// Upper-left entry of `[[0, 1], [1, 1]]^(n + 1)`.
///
/// Arithmetic wraps, so the value is exact while F(n) fits in `u64`.
pub fn fib_matrix(n: u64) -> u64 {
    if n < 2 {
        return n;
    }
    let q = Matrix::from_array([[0u64, 1], [1, 1]]);
    q.pow(n.saturating_add(1))[(0, 0)]
}

#[cfg(test)]
mod tests {
    use super::{FibonacciError, fib_golden_ratio, fib_iter, fib_matrix, fib_naive};

    const FIRST: [u64; 15] = [0, 1, 1, 2, 3, 5, 8, 13, 21, 34, 55, 89, 144, 233, 377];

    #[test]
    fn variants_agree_on_small_inputs() {
        for (n, expected) in FIRST.iter().enumerate() {
            let n = n as u64;
            assert_eq!(fib_naive(n, 50), Ok(*expected), "naive F({n})");
            assert_eq!(fib_iter(n), Ok(u128::from(*expected)), "iter F({n})");
            assert_eq!(fib_golden_ratio(n), *expected, "golden F({n})");
            assert_eq!(fib_matrix(n), *expected, "matrix F({n})");
        }
    }

    #[test]
    fn naive_refuses_above_limit() {
        assert_eq!(
            fib_naive(51, 50),
            Err(FibonacciError::InputTooLarge { n: 51, limit: 50 })
        );
        assert_eq!(fib_naive(20, 20), Ok(6765));
    }

    #[test]
    fn matrix_stays_exact_up_to_u64_range() {
        assert_eq!(fib_matrix(90), 2_880_067_194_370_816_120);
        assert_eq!(fib_matrix(93), 12_200_160_415_121_876_738);
        assert_eq!(u128::from(fib_matrix(93)), fib_iter(93).expect("fits u128"));
    }

    #[test]
    fn iter_reports_overflow_past_u128() {
        assert!(fib_iter(186).is_ok());
        assert_eq!(fib_iter(187), Err(FibonacciError::Overflow { n: 187 }));
    }
}
