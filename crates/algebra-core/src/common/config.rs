//! Harness policy: comparator tolerance and algorithm refusal thresholds.
//!
//! The policy is an optional JSON document; every key falls back to the
//! defaults in [`super::constants`].

use super::constants::{DEFAULT_EPSILON, LINEAR_SIEVE_MAX_INPUT, NAIVE_FIBONACCI_MAX_INPUT};
use crate::domain::AlgebraError;
use crate::numerics::AbsoluteTolerance;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

const POLICY_KEYS: [&str; 3] = ["epsilon", "naiveFibonacciMaxInput", "linearSieveMaxInput"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct AlgorithmLimits {
    #[serde(rename = "naiveFibonacciMaxInput", default = "default_naive_fibonacci")]
    pub naive_fibonacci_max_input: u64,
    #[serde(rename = "linearSieveMaxInput", default = "default_linear_sieve")]
    pub linear_sieve_max_input: u64,
}

impl Default for AlgorithmLimits {
    fn default() -> Self {
        Self {
            naive_fibonacci_max_input: NAIVE_FIBONACCI_MAX_INPUT,
            linear_sieve_max_input: LINEAR_SIEVE_MAX_INPUT,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct HarnessPolicy {
    #[serde(default = "default_epsilon")]
    pub epsilon: f64,
    #[serde(flatten)]
    pub limits: AlgorithmLimits,
}

impl Default for HarnessPolicy {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_EPSILON,
            limits: AlgorithmLimits::default(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PolicyError {
    #[error("failed to read harness policy '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse harness policy '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("harness policy epsilon must be finite and positive, got {0}")]
    InvalidEpsilon(f64),
    #[error("harness policy '{}' has unknown key(s): {}", path.display(), keys.join(", "))]
    UnknownKeys { path: PathBuf, keys: Vec<String> },
}

impl HarnessPolicy {
    pub fn from_path(policy_path: impl AsRef<Path>) -> Result<Self, PolicyError> {
        let policy_path = policy_path.as_ref();
        let content = fs::read_to_string(policy_path).map_err(|source| PolicyError::Read {
            path: policy_path.to_path_buf(),
            source,
        })?;
        Self::parse(&content, policy_path)
    }

    pub fn from_json(policy_json: &str) -> Result<Self, PolicyError> {
        Self::parse(policy_json, Path::new("<inline-policy>"))
    }

    pub fn tolerance(&self) -> AbsoluteTolerance {
        AbsoluteTolerance::new(self.epsilon)
    }

    fn parse(content: &str, origin: &Path) -> Result<Self, PolicyError> {
        let parse_error = |source: serde_json::Error| PolicyError::Parse {
            path: origin.to_path_buf(),
            source,
        };
        let document: Value = serde_json::from_str(content).map_err(parse_error)?;
        // `deny_unknown_fields` does not combine with the flattened limits.
        if let Value::Object(entries) = &document {
            let keys: Vec<String> = entries
                .keys()
                .filter(|key| !POLICY_KEYS.contains(&key.as_str()))
                .cloned()
                .collect();
            if !keys.is_empty() {
                return Err(PolicyError::UnknownKeys {
                    path: origin.to_path_buf(),
                    keys,
                });
            }
        }

        let policy: Self = serde_json::from_value(document).map_err(parse_error)?;
        if !policy.epsilon.is_finite() || policy.epsilon <= 0.0 {
            return Err(PolicyError::InvalidEpsilon(policy.epsilon));
        }
        Ok(policy)
    }
}

impl From<PolicyError> for AlgebraError {
    fn from(error: PolicyError) -> Self {
        let message = error.to_string();
        match error {
            PolicyError::Read { .. } => AlgebraError::io_system("IO.POLICY_ACCESS", message),
            PolicyError::Parse { .. }
            | PolicyError::InvalidEpsilon(_)
            | PolicyError::UnknownKeys { .. } => {
                AlgebraError::input_validation("INPUT.POLICY", message)
            }
        }
    }
}

fn default_epsilon() -> f64 {
    DEFAULT_EPSILON
}

fn default_naive_fibonacci() -> u64 {
    NAIVE_FIBONACCI_MAX_INPUT
}

fn default_linear_sieve() -> u64 {
    LINEAR_SIEVE_MAX_INPUT
}
