mod errors;

pub use errors::{AlgebraError, ErrorCategory};

use serde::Serialize;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::time::Duration;

/// An input/output file pair sharing one base name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fixture {
    pub name: String,
    pub input_path: PathBuf,
    pub output_path: PathBuf,
}

impl Fixture {
    pub fn new(
        name: impl Into<String>,
        input_path: impl Into<PathBuf>,
        output_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            name: name.into(),
            input_path: input_path.into(),
            output_path: output_path.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Passed,
    Failed,
}

impl Verdict {
    pub const fn from_passed(passed: bool) -> Self {
        if passed { Self::Passed } else { Self::Failed }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Passed => "PASSED",
            Self::Failed => "FAILED",
        }
    }
}

impl Display for Verdict {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str((*self).as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestCaseResult {
    pub fixture_name: String,
    pub input: Vec<String>,
    pub actual: String,
    pub expected: String,
    pub verdict: Verdict,
    pub elapsed: Duration,
    pub reason: Option<String>,
}

impl TestCaseResult {
    pub fn passed(&self) -> bool {
        self.verdict == Verdict::Passed
    }

    /// Raw input as echoed in the failure report.
    pub fn raw_input(&self) -> String {
        self.input.join(" ")
    }
}
