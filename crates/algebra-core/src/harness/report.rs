use crate::common::constants::REPORT_SEPARATOR;
use crate::domain::{AlgebraError, TestCaseResult};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub generated_at_unix_seconds: u64,
    pub function_name: String,
    pub folder: String,
    pub passed: bool,
    pub fixture_count: usize,
    pub passed_fixture_count: usize,
    pub failed_fixture_count: usize,
    pub total_elapsed: Duration,
    pub cases: Vec<TestCaseResult>,
}

impl RunReport {
    pub fn new(function_name: &str, folder: &Path, cases: Vec<TestCaseResult>) -> Self {
        let fixture_count = cases.len();
        let passed_fixture_count = cases.iter().filter(|case| case.passed()).count();
        let failed_fixture_count = fixture_count - passed_fixture_count;
        let total_elapsed = cases.iter().map(|case| case.elapsed).sum();

        Self {
            generated_at_unix_seconds: current_unix_timestamp_seconds(),
            function_name: function_name.to_string(),
            folder: normalize_path(folder),
            passed: failed_fixture_count == 0,
            fixture_count,
            passed_fixture_count,
            failed_fixture_count,
            total_elapsed,
            cases,
        }
    }

    pub fn failed_cases(&self) -> impl Iterator<Item = &TestCaseResult> {
        self.cases.iter().filter(|case| !case.passed())
    }
}

/// Console block for one fixture, separator included.
pub fn render_case(case: &TestCaseResult) -> String {
    let mut lines = vec![format!("{}: {}", case.fixture_name, case.verdict)];
    if case.passed() {
        lines.push(format!("\tExpected: {}", case.expected));
        lines.push(format!("\tResult: {}", case.actual));
    } else {
        lines.push(format!("\tINPUT: {}", case.raw_input()));
        lines.push(format!("\tSHOULD BE: {}", case.expected));
        lines.push(format!("\tRESULT: {}", case.actual));
        if let Some(reason) = &case.reason {
            lines.push(format!("\tREASON: {}", reason));
        }
    }
    lines.push(String::new());
    lines.push(REPORT_SEPARATOR.to_string());
    format!("{}\n\n", lines.join("\n"))
}

pub fn render_human_summary(report: &RunReport) -> String {
    let mut lines = Vec::new();
    let status = if report.passed { "PASS" } else { "FAIL" };
    lines.push(format!(
        "Run status for {}: {}",
        report.function_name, status
    ));
    lines.push(format!(
        "Fixtures: {} total ({} passed, {} failed) in {:?}",
        report.fixture_count,
        report.passed_fixture_count,
        report.failed_fixture_count,
        report.total_elapsed
    ));
    for case in report.failed_cases() {
        lines.push(format!(
            "  failed: {} (expected '{}', got '{}')",
            case.fixture_name, case.expected, case.actual
        ));
    }
    lines.join("\n")
}

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("failed to create report directory '{}': {source}", path.display())]
    ReportDirectory {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to serialize report '{}': {source}", path.display())]
    SerializeReport {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("failed to write report '{}': {source}", path.display())]
    WriteReport {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl From<ReportError> for AlgebraError {
    fn from(error: ReportError) -> Self {
        let message = error.to_string();
        match error {
            ReportError::ReportDirectory { .. } | ReportError::WriteReport { .. } => {
                AlgebraError::io_system("IO.REPORT_FILESYSTEM", message)
            }
            ReportError::SerializeReport { .. } => AlgebraError::internal("SYS.REPORT", message),
        }
    }
}

pub fn write_report_file(report_path: &Path, report: &RunReport) -> Result<(), ReportError> {
    if let Some(parent_dir) = report_path.parent() {
        fs::create_dir_all(parent_dir).map_err(|source| ReportError::ReportDirectory {
            path: parent_dir.to_path_buf(),
            source,
        })?;
    }

    let report_json =
        serde_json::to_string_pretty(report).map_err(|source| ReportError::SerializeReport {
            path: report_path.to_path_buf(),
            source,
        })?;
    fs::write(report_path, report_json).map_err(|source| ReportError::WriteReport {
        path: report_path.to_path_buf(),
        source,
    })
}

fn current_unix_timestamp_seconds() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |duration| duration.as_secs())
}

fn normalize_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}
