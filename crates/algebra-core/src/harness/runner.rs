use super::binding::{BindingError, FunctionBinding};
use super::comparator::ResultComparator;
use super::discovery::{DiscoveryError, DiscoveryOptions, discover_fixtures};
use super::report::{RunReport, render_case};
use super::timer::DurationLogger;
use crate::common::constants::{DEFAULT_INPUT_EXTENSION, DEFAULT_OUTPUT_EXTENSION};
use crate::domain::{AlgebraError, Fixture, TestCaseResult, Verdict};
use crate::numerics::AbsoluteTolerance;
use std::fs;
use std::io::{self, Stdout, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct RunnerConfig {
    pub folder: PathBuf,
    pub input_extension: String,
    pub output_extension: String,
    pub include_globs: Vec<String>,
    pub tolerance: AbsoluteTolerance,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            folder: PathBuf::from("fixtures"),
            input_extension: DEFAULT_INPUT_EXTENSION.to_string(),
            output_extension: DEFAULT_OUTPUT_EXTENSION.to_string(),
            include_globs: Vec::new(),
            tolerance: AbsoluteTolerance::default(),
        }
    }
}

impl RunnerConfig {
    pub fn new(folder: impl Into<PathBuf>) -> Self {
        Self {
            folder: folder.into(),
            ..Self::default()
        }
    }

    fn discovery_options(&self) -> DiscoveryOptions {
        DiscoveryOptions {
            input_marker: self.input_extension.clone(),
            output_extension: self.output_extension.clone(),
            include_globs: self.include_globs.clone(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum HarnessError {
    #[error(transparent)]
    Discovery(#[from] DiscoveryError),
    #[error(transparent)]
    Binding(#[from] BindingError),
    #[error("fixture '{fixture}' supplies {found} input line(s) but '{function}' expects {expected}")]
    InsufficientArguments {
        fixture: String,
        function: String,
        expected: usize,
        found: usize,
    },
    #[error("failed to read fixture file '{}': {source}", path.display())]
    ReadFixture { path: PathBuf, source: io::Error },
    #[error("failed to write run output: {source}")]
    WriteOutput { source: io::Error },
}

impl From<HarnessError> for AlgebraError {
    fn from(error: HarnessError) -> Self {
        match error {
            HarnessError::Discovery(error) => error.into(),
            HarnessError::Binding(error) => error.into(),
            HarnessError::InsufficientArguments { .. } => {
                AlgebraError::input_validation("INPUT.FIXTURE_ARGUMENTS", error.to_string())
            }
            HarnessError::ReadFixture { .. } => {
                AlgebraError::io_system("IO.FIXTURE_READ", error.to_string())
            }
            HarnessError::WriteOutput { .. } => {
                AlgebraError::io_system("IO.RUN_OUTPUT", error.to_string())
            }
        }
    }
}

/// Runs one function against every fixture of a folder.
///
/// Each fixture gets a timing line and a PASSED/FAILED block on the
/// runner's output stream. A failing fixture does not stop the run; fixture
/// files that cannot be read or supply too few arguments do.
pub struct TestRunner<W: Write = Stdout> {
    config: RunnerConfig,
    comparator: ResultComparator,
    out: W,
}

impl TestRunner<Stdout> {
    pub fn new(config: RunnerConfig) -> Self {
        Self::with_writer(config, io::stdout())
    }
}

impl<W: Write> TestRunner<W> {
    pub fn with_writer(config: RunnerConfig, out: W) -> Self {
        let comparator = ResultComparator::new(config.tolerance);
        Self {
            config,
            comparator,
            out,
        }
    }

    pub fn into_writer(self) -> W {
        self.out
    }

    pub fn run(&mut self, binding: &FunctionBinding) -> Result<RunReport, HarnessError> {
        let fixtures = discover_fixtures(&self.config.folder, &self.config.discovery_options())?;
        tracing::info!(
            function = binding.name(),
            folder = %self.config.folder.display(),
            fixtures = fixtures.len(),
            "starting fixture run"
        );

        let mut cases = Vec::with_capacity(fixtures.len());
        for fixture in &fixtures {
            let case = self.run_fixture(fixture, binding)?;
            self.out
                .write_all(render_case(&case).as_bytes())
                .and_then(|()| self.out.flush())
                .map_err(|source| HarnessError::WriteOutput { source })?;
            cases.push(case);
        }

        let report = RunReport::new(binding.name(), &self.config.folder, cases);
        tracing::info!(
            function = binding.name(),
            passed = report.passed_fixture_count,
            failed = report.failed_fixture_count,
            "fixture run finished"
        );
        Ok(report)
    }

    fn run_fixture(
        &mut self,
        fixture: &Fixture,
        binding: &FunctionBinding,
    ) -> Result<TestCaseResult, HarnessError> {
        let input = read_input_lines(&fixture.input_path)?;
        let expected = read_expected_line(&fixture.output_path)?;

        binding
            .check_arguments(input.len())
            .map_err(|_| HarnessError::InsufficientArguments {
                fixture: fixture.name.clone(),
                function: binding.name().to_string(),
                expected: binding.arity(),
                found: input.len(),
            })?;

        let label = format!("{} [{}]: ", binding.name(), input.join(", "));
        let timer = DurationLogger::with_writer(label, &mut self.out);
        let invocation = binding.invoke(input.as_slice());
        let elapsed = timer.finish();
        let actual = invocation?;

        let Some(expected) = expected else {
            tracing::warn!(
                fixture = %fixture.name,
                output = %fixture.output_path.display(),
                "expected output file is missing"
            );
            return Ok(TestCaseResult {
                fixture_name: fixture.name.clone(),
                input,
                actual,
                expected: String::new(),
                verdict: Verdict::Failed,
                elapsed,
                reason: Some(format!(
                    "missing expected output '{}'",
                    fixture.output_path.display()
                )),
            });
        };

        let comparison = self.comparator.compare(&actual, &expected);
        tracing::debug!(
            fixture = %fixture.name,
            mode = ?comparison.mode,
            abs_diff = ?comparison.abs_diff,
            passed = comparison.passed,
            "compared fixture result"
        );

        Ok(TestCaseResult {
            fixture_name: fixture.name.clone(),
            input,
            actual,
            expected,
            verdict: Verdict::from_passed(comparison.passed),
            elapsed,
            reason: None,
        })
    }
}

fn read_input_lines(path: &Path) -> Result<Vec<String>, HarnessError> {
    let content = fs::read_to_string(path).map_err(|source| HarnessError::ReadFixture {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(content.lines().map(str::to_owned).collect())
}

// `None` when the output file does not exist; an empty file expects "".
fn read_expected_line(path: &Path) -> Result<Option<String>, HarnessError> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content.lines().next().unwrap_or_default().to_string())),
        Err(source) if source.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(HarnessError::ReadFixture {
            path: path.to_path_buf(),
            source,
        }),
    }
}
