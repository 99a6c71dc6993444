//! Primality tests and prime counting, pi(n) = number of primes <= n.

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SieveError {
    #[error("refusing to run the memory intensive linear sieve on input {n} (limit {limit})")]
    InputTooLarge { n: u64, limit: u64 },
    #[error("cannot allocate a sieve table for input {n}")]
    TableTooLarge { n: u64 },
}

/// Largest `r` with `r * r <= n`.
pub fn integer_sqrt(n: u64) -> u64 {
    if n < 2 {
        return n;
    }
    let mut root = (n as f64).sqrt() as u64;
    while root.checked_mul(root).is_none_or(|square| square > n) {
        root -= 1;
    }
    while (root + 1).checked_mul(root + 1).is_some_and(|square| square <= n) {
        root += 1;
    }
    root
}

/// Trial division by every integer in `2..n`.
pub fn is_prime_naive(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    (2..n).all(|divisor| n % divisor != 0)
}

pub fn prime_count_naive(n: u64) -> usize {
    (2..=n).filter(|candidate| is_prime_naive(*candidate)).count()
}

/// Trial division by the already known primes up to `sqrt(n)`.
///
/// `primes` must hold every prime below `n` in ascending order, starting with 2.
/// A newly found prime is appended.
pub fn is_prime_by_known_primes(n: u64, primes: &mut Vec<u64>) -> bool {
    if n < 2 {
        return false;
    }
    if n == 2 {
        return true;
    }

    let bound = integer_sqrt(n);
    let composite = primes
        .iter()
        .take_while(|prime| **prime <= bound)
        .any(|prime| n % prime == 0);
    if composite {
        return false;
    }
    primes.push(n);
    true
}

pub fn prime_count_div_prime(n: u64) -> usize {
    let mut primes = vec![2];
    (2..=n)
        .filter(|candidate| is_prime_by_known_primes(*candidate, &mut primes))
        .count()
}

/// Sieve of Eratosthenes over one byte per number.
pub fn prime_count_sieve(n: u64) -> Result<usize, SieveError> {
    if n < 2 {
        return Ok(0);
    }

    let limit = to_index(n)?;
    let mut is_prime = allocate_filled(n, table_len(n, limit)?, 1u8)?;
    is_prime[0] = 0;
    is_prime[1] = 0;

    let mut i = 2;
    while i * i <= limit {
        if is_prime[i] == 1 {
            for multiple in (i * i..=limit).step_by(i) {
                is_prime[multiple] = 0;
            }
        }
        i += 1;
    }

    Ok(is_prime.iter().filter(|flag| **flag == 1).count())
}

/// Linear sieve keeping the least prime factor of every number.
///
/// Needs a `usize` per number, so inputs above `limit` are refused.
pub fn prime_count_sieve_linear(n: u64, limit: u64) -> Result<usize, SieveError> {
    if n > limit {
        return Err(SieveError::InputTooLarge { n, limit });
    }
    if n < 2 {
        return Ok(0);
    }

    let last = to_index(n)?;
    let mut least_factor = allocate_filled(n, table_len(n, last)?, 0usize)?;
    let mut primes: Vec<usize> = Vec::new();
    for i in 2..=last {
        if least_factor[i] == 0 {
            least_factor[i] = i;
            primes.push(i);
        }
        for &prime in &primes {
            if prime > least_factor[i] || i * prime > last {
                break;
            }
            least_factor[i * prime] = prime;
        }
    }

    Ok(primes.len())
}

/// Sieve of Eratosthenes over a packed bit set, one bit per number.
pub fn prime_count_sieve_compact(n: u64) -> Result<usize, SieveError> {
    if n < 2 {
        return Ok(0);
    }

    let limit = to_index(n)?;
    let mut bits = BitSet::filled(n, table_len(n, limit)?)?;
    bits.clear(0);
    bits.clear(1);

    let mut i = 2;
    while i * i <= limit {
        if bits.get(i) {
            for multiple in (i * i..=limit).step_by(i) {
                bits.clear(multiple);
            }
        }
        i += 1;
    }

    Ok(bits.count_ones())
}

fn to_index(n: u64) -> Result<usize, SieveError> {
    usize::try_from(n).map_err(|_| SieveError::TableTooLarge { n })
}

// Tables are indexed by every number in `0..=last`.
fn table_len(n: u64, last: usize) -> Result<usize, SieveError> {
    last.checked_add(1).ok_or(SieveError::TableTooLarge { n })
}

fn allocate_filled<T: Clone>(n: u64, len: usize, value: T) -> Result<Vec<T>, SieveError> {
    let mut table = Vec::new();
    table
        .try_reserve_exact(len)
        .map_err(|_| SieveError::TableTooLarge { n })?;
    table.resize(len, value);
    Ok(table)
}

struct BitSet {
    words: Vec<u64>,
    len: usize,
}

impl BitSet {
    fn filled(n: u64, len: usize) -> Result<Self, SieveError> {
        let mut words = allocate_filled(n, len.div_ceil(64), u64::MAX)?;
        let tail = len % 64;
        if tail != 0 {
            if let Some(last) = words.last_mut() {
                *last = (1u64 << tail) - 1;
            }
        }
        Ok(Self { words, len })
    }

    fn get(&self, index: usize) -> bool {
        index < self.len && self.words[index / 64] & (1u64 << (index % 64)) != 0
    }

    fn clear(&mut self, index: usize) {
        self.words[index / 64] &= !(1u64 << (index % 64));
    }

    fn count_ones(&self) -> usize {
        self.words.iter().map(|word| word.count_ones() as usize).sum()
    }
}
