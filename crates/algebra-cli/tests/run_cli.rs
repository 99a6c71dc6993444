use serde_json::Value;
use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn algebra_rs(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_algebra-rs"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("algebra-rs should launch")
}

fn write_fixture(dir: &Path, name: &str, input: &str, output: &str) {
    fs::write(dir.join(format!("{name}.in")), input).expect("input should be written");
    fs::write(dir.join(format!("{name}.out")), output).expect("output should be written");
}

fn path_arg(path: &Path) -> &str {
    path.to_str().expect("temp paths should be UTF-8")
}

#[test]
fn run_command_succeeds_when_every_fixture_passes() {
    let temp = TempDir::new().expect("tempdir should be created");
    write_fixture(temp.path(), "case1", "16\n", "4\n");
    write_fixture(temp.path(), "case2", "17\n", "4\n");
    let report_path = temp.path().join("report/run.json");

    let output = algebra_rs(&[
        "run",
        "isqrt",
        "--fixtures",
        path_arg(temp.path()),
        "--report",
        path_arg(&report_path),
    ]);

    assert!(
        output.status.success(),
        "command should succeed, stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("isqrt [16]: "));
    assert!(stdout.contains("case1: PASSED\n\tExpected: 4\n\tResult: 4\n"));
    assert!(stdout.contains("Run status for isqrt: PASS"));

    let parsed: Value = serde_json::from_str(
        &fs::read_to_string(&report_path).expect("report should be written"),
    )
    .expect("report should be valid JSON");
    assert_eq!(parsed["fixture_count"], Value::from(2));
    assert_eq!(parsed["passed"], Value::Bool(true));
}

#[test]
fn run_command_reports_failures_with_exit_code_one() {
    let temp = TempDir::new().expect("tempdir should be created");
    write_fixture(temp.path(), "case1", "25\n", "4\n");
    write_fixture(temp.path(), "case2", "16\n", "4\n");

    let output = algebra_rs(&["run", "isqrt", "--fixtures", path_arg(temp.path())]);

    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("case1: FAILED\n\tINPUT: 25\n\tSHOULD BE: 4\n\tRESULT: 5\n"));
    assert!(stdout.contains("case2: PASSED"));
}

#[test]
fn run_command_accepts_policy_and_filters() {
    let temp = TempDir::new().expect("tempdir should be created");
    let fixtures = temp.path().join("fixtures");
    fs::create_dir(&fixtures).expect("fixture dir should be created");
    write_fixture(&fixtures, "small1", "2\n10\n", "1024.000000\n");
    write_fixture(&fixtures, "large1", "2\n1000\n", "0\n");
    let policy_path = temp.path().join("policy.json");
    fs::write(&policy_path, r#"{ "epsilon": 0.01 }"#).expect("policy should be written");

    let output = algebra_rs(&[
        "run",
        "pow-two-factor",
        "--fixtures",
        path_arg(&fixtures),
        "--only",
        "small*",
        "--policy",
        path_arg(&policy_path),
    ]);

    assert!(
        output.status.success(),
        "command should succeed, stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("small1: PASSED"));
    assert!(!stdout.contains("large1"));
}

#[test]
fn short_fixture_input_is_fatal() {
    let temp = TempDir::new().expect("tempdir should be created");
    write_fixture(temp.path(), "case1", "2\n", "4\n");

    let output = algebra_rs(&["run", "pow-naive", "--fixtures", path_arg(temp.path())]);

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("INPUT.FIXTURE_ARGUMENTS"), "stderr: {stderr}");
}

#[test]
fn missing_fixture_directory_is_an_input_error() {
    let temp = TempDir::new().expect("tempdir should be created");
    let absent = temp.path().join("absent");

    let output = algebra_rs(&["run", "isqrt", "--fixtures", path_arg(&absent)]);

    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("INPUT.FIXTURE_DIRECTORY"));
}

#[test]
fn unknown_algorithm_is_rejected() {
    let temp = TempDir::new().expect("tempdir should be created");
    let output = algebra_rs(&["run", "bogosort", "--fixtures", path_arg(temp.path())]);

    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("unknown algorithm 'bogosort'"));
}

#[test]
fn list_command_prints_catalog() {
    let output = algebra_rs(&["list"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("prime-count-sieve-linear"));
    assert!(stdout.contains("pow-two-factor"));

    let output = algebra_rs(&["list", "--json"]);
    let parsed: Value =
        serde_json::from_slice(&output.stdout).expect("catalog should be valid JSON");
    let entries = parsed.as_array().expect("catalog should be an array");
    assert_eq!(entries.len(), 14);
    assert!(
        entries
            .iter()
            .any(|entry| entry["name"] == "fib-matrix" && entry["arity"] == 1)
    );
}

#[test]
fn eval_command_prints_timing_then_result() {
    let output = algebra_rs(&["eval", "fib-matrix", "90"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let mut lines = stdout.lines();
    assert!(
        lines
            .next()
            .is_some_and(|line| line.starts_with("fib-matrix [90]: "))
    );
    assert_eq!(lines.next(), Some("2880067194370816120"));
}

#[test]
fn usage_errors_exit_with_input_code() {
    let output = algebra_rs(&["run"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("INPUT.CLI_USAGE"));
}
