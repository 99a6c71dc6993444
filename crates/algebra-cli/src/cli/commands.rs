use super::CliError;
use algebra_core::algorithms::{ALGORITHMS, binding_for};
use algebra_core::common::HarnessPolicy;
use algebra_core::common::constants::{DEFAULT_INPUT_EXTENSION, DEFAULT_OUTPUT_EXTENSION};
use algebra_core::domain::AlgebraError;
use algebra_core::harness::{
    DurationLogger, RunnerConfig, TestRunner, render_human_summary, write_report_file,
};
use anyhow::Context;
use std::path::PathBuf;

#[derive(clap::Args)]
pub(super) struct RunArgs {
    /// Catalog name of the algorithm under test
    algorithm: String,

    /// Directory holding the fixture pairs
    #[arg(long)]
    fixtures: PathBuf,

    /// Marker identifying input files
    #[arg(long, default_value = DEFAULT_INPUT_EXTENSION)]
    input_ext: String,

    /// Extension of expected output files
    #[arg(long, default_value = DEFAULT_OUTPUT_EXTENSION)]
    output_ext: String,

    /// Only run input files matching this glob (repeatable)
    #[arg(long = "only", value_name = "GLOB")]
    only: Vec<String>,

    /// Harness policy JSON path
    #[arg(long)]
    policy: Option<PathBuf>,

    /// JSON report output path
    #[arg(long)]
    report: Option<PathBuf>,
}

#[derive(clap::Args)]
pub(super) struct ListArgs {
    /// Print the catalog as JSON
    #[arg(long)]
    json: bool,
}

#[derive(clap::Args)]
pub(super) struct EvalArgs {
    /// Catalog name of the algorithm
    algorithm: String,

    /// Arguments in fixture order
    #[arg(allow_hyphen_values = true)]
    args: Vec<String>,
}

pub(super) fn run_fixtures_command(args: RunArgs) -> Result<i32, CliError> {
    let policy = match &args.policy {
        Some(path) => HarnessPolicy::from_path(path).map_err(AlgebraError::from)?,
        None => HarnessPolicy::default(),
    };
    tracing::debug!(?policy, "harness policy resolved");
    let binding = binding_for(&args.algorithm, &policy.limits).map_err(AlgebraError::from)?;

    let config = RunnerConfig {
        folder: args.fixtures,
        input_extension: args.input_ext,
        output_extension: args.output_ext,
        include_globs: args.only,
        tolerance: policy.tolerance(),
    };
    let mut runner = TestRunner::new(config);
    let report = runner.run(&binding).map_err(AlgebraError::from)?;

    println!("{}", render_human_summary(&report));
    if let Some(report_path) = &args.report {
        write_report_file(report_path, &report).map_err(AlgebraError::from)?;
        println!("JSON report: {}", report_path.display());
    }

    if report.passed { Ok(0) } else { Ok(1) }
}

pub(super) fn run_list_command(args: ListArgs) -> Result<i32, CliError> {
    if args.json {
        let catalog =
            serde_json::to_string_pretty(&ALGORITHMS).context("failed to serialize catalog")?;
        println!("{}", catalog);
        return Ok(0);
    }

    let name_width = ALGORITHMS
        .iter()
        .map(|spec| spec.name.len())
        .max()
        .unwrap_or_default();
    for spec in &ALGORITHMS {
        println!(
            "{:<name_width$}  {}  {}",
            spec.name, spec.arity, spec.description
        );
    }
    Ok(0)
}

pub(super) fn run_eval_command(args: EvalArgs) -> Result<i32, CliError> {
    let policy = HarnessPolicy::default();
    let binding = binding_for(&args.algorithm, &policy.limits).map_err(AlgebraError::from)?;
    binding
        .check_arguments(args.args.len())
        .map_err(AlgebraError::from)?;

    let label = format!("{} [{}]: ", binding.name(), args.args.join(", "));
    let timer = DurationLogger::new(label);
    let result = binding.invoke(args.args.as_slice());
    timer.finish();

    println!("{}", result.map_err(AlgebraError::from)?);
    Ok(0)
}
