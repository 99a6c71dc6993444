//! Three ways to raise a float to a non-negative integer power.

/// `exponent` multiplications.
pub fn pow_naive(base: f64, exponent: u64) -> f64 {
    let mut result = 1.0;
    for _ in 0..exponent {
        result *= base;
    }
    result
}

/// Squares up to the largest power of two not above `exponent`, then
/// multiplies the remaining factors one at a time.
pub fn pow_mult(base: f64, exponent: u64) -> f64 {
    if exponent == 0 {
        return 1.0;
    }

    let mut squarings = 0u32;
    let mut two_power = 1u64;
    let mut remaining = exponent;
    while remaining > 1 {
        squarings += 1;
        two_power *= 2;
        remaining /= 2;
    }

    let mut result = base;
    for _ in 0..squarings {
        result *= result;
    }
    for _ in 0..(exponent - two_power) {
        result *= base;
    }
    result
}

/// Binary exponentiation over the bits of `exponent`.
pub fn pow_two_factor(base: f64, exponent: u64) -> f64 {
    let mut result = 1.0;
    let mut current = base;
    let mut exponent = exponent;
    while exponent > 0 {
        if exponent % 2 == 1 {
            result *= current;
        }
        current *= current;
        exponent /= 2;
    }
    result
}
