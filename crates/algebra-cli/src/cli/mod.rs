mod commands;

use algebra_core::domain::AlgebraError;
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Logs go to stderr so the fixture report on stdout stays clean.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

pub fn run_from_env() -> i32 {
    let args = std::env::args().skip(1).collect::<Vec<_>>();

    match run(args) {
        Ok(code) => code,
        Err(error) => {
            let diagnostic = error.as_algebra_error();
            eprintln!("{}", diagnostic.diagnostic_line());
            if let Some(summary_line) = diagnostic.fatal_exit_line() {
                eprintln!("{}", summary_line);
            }
            diagnostic.exit_code()
        }
    }
}

pub fn run<I, S>(args: I) -> Result<i32, CliError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let full_args = std::iter::once("algebra-rs".to_string())
        .chain(args.into_iter().map(Into::into))
        .collect::<Vec<_>>();

    match Cli::try_parse_from(&full_args) {
        Ok(cli) => dispatch_parsed(cli.command),
        Err(err) => match err.kind() {
            clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
                print!("{}", err);
                Ok(0)
            }
            _ => Err(CliError::Usage(err.to_string())),
        },
    }
}

#[derive(Parser)]
#[command(
    name = "algebra-rs",
    version,
    about = "Fixture driven test harness for algebraic algorithms"
)]
struct Cli {
    #[command(subcommand)]
    command: CliCommand,
}

#[derive(clap::Subcommand)]
enum CliCommand {
    /// Run an algorithm against every fixture of a directory
    Run(commands::RunArgs),
    /// List the available algorithms
    List(commands::ListArgs),
    /// Evaluate an algorithm once on the given arguments
    Eval(commands::EvalArgs),
}

fn dispatch_parsed(command: CliCommand) -> Result<i32, CliError> {
    match command {
        CliCommand::Run(args) => commands::run_fixtures_command(args),
        CliCommand::List(args) => commands::run_list_command(args),
        CliCommand::Eval(args) => commands::run_eval_command(args),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{0}")]
    Usage(String),
    #[error("{0}")]
    Compute(AlgebraError),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl CliError {
    fn as_algebra_error(&self) -> AlgebraError {
        match self {
            Self::Usage(message) => {
                AlgebraError::input_validation("INPUT.CLI_USAGE", message.trim_end().to_string())
            }
            Self::Compute(error) => error.clone(),
            Self::Internal(error) => AlgebraError::internal("SYS.CLI", format!("{error:#}")),
        }
    }
}

impl From<AlgebraError> for CliError {
    fn from(error: AlgebraError) -> Self {
        Self::Compute(error)
    }
}
