mod binding;
mod comparator;
mod discovery;
mod report;
mod runner;
mod timer;

pub use binding::{BindingError, FixtureCallable, FunctionBinding};
pub use comparator::{Comparison, ComparisonMode, ResultComparator};
pub use discovery::{
    DiscoveryError, DiscoveryOptions, alpha_numeric_order, discover_fixtures, first_digit_run,
};
pub use report::{
    ReportError, RunReport, render_case, render_human_summary, write_report_file,
};
pub use runner::{HarnessError, RunnerConfig, TestRunner};
pub use timer::{DurationLogger, render_duration_line};
