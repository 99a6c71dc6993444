use crate::domain::{AlgebraError, Fixture};
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::cmp::Ordering;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct DiscoveryOptions {
    pub input_marker: String,
    pub output_extension: String,
    pub include_globs: Vec<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum DiscoveryError {
    #[error("fixture directory '{}' does not exist", path.display())]
    MissingDirectory { path: PathBuf },
    #[error("failed to read fixture directory '{}': {source}", path.display())]
    ReadDirectory {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("input marker must not be empty")]
    EmptyMarker,
    #[error("invalid fixture glob '{pattern}': {source}")]
    InvalidGlob {
        pattern: String,
        source: globset::Error,
    },
}

impl From<DiscoveryError> for AlgebraError {
    fn from(error: DiscoveryError) -> Self {
        let message = error.to_string();
        match error {
            DiscoveryError::MissingDirectory { .. } => {
                AlgebraError::input_validation("INPUT.FIXTURE_DIRECTORY", message)
            }
            DiscoveryError::ReadDirectory { .. } => {
                AlgebraError::io_system("IO.FIXTURE_DIRECTORY", message)
            }
            DiscoveryError::EmptyMarker | DiscoveryError::InvalidGlob { .. } => {
                AlgebraError::input_validation("INPUT.FIXTURE_FILTER", message)
            }
        }
    }
}

/// Lists the fixtures of `folder` whose file name contains the input marker,
/// in [`alpha_numeric_order`].
pub fn discover_fixtures(
    folder: impl AsRef<Path>,
    options: &DiscoveryOptions,
) -> Result<Vec<Fixture>, DiscoveryError> {
    let folder = folder.as_ref();
    if options.input_marker.is_empty() {
        return Err(DiscoveryError::EmptyMarker);
    }
    if !folder.is_dir() {
        return Err(DiscoveryError::MissingDirectory {
            path: folder.to_path_buf(),
        });
    }
    let include = compile_globs(&options.include_globs)?;

    let directory = fs::read_dir(folder).map_err(|source| DiscoveryError::ReadDirectory {
        path: folder.to_path_buf(),
        source,
    })?;

    let mut inputs = Vec::new();
    for entry in directory {
        let entry = entry.map_err(|source| DiscoveryError::ReadDirectory {
            path: folder.to_path_buf(),
            source,
        })?;
        let entry_path = entry.path();
        let file_type = entry
            .file_type()
            .map_err(|source| DiscoveryError::ReadDirectory {
                path: entry_path.clone(),
                source,
            })?;
        if !file_type.is_file() {
            continue;
        }

        let Some(file_name) = entry.file_name().to_str().map(str::to_owned) else {
            tracing::warn!(path = %entry_path.display(), "skipping fixture with non UTF-8 name");
            continue;
        };
        if !file_name.contains(options.input_marker.as_str()) {
            continue;
        }
        if let Some(include) = &include {
            if !include.is_match(&file_name) {
                continue;
            }
        }
        inputs.push(file_name);
    }

    inputs.sort_by(|left, right| alpha_numeric_order(left, right));

    let fixtures = inputs
        .into_iter()
        .map(|file_name| {
            let name = fixture_base_name(&file_name, &options.input_marker);
            let output_path = folder.join(format!("{}{}", name, options.output_extension));
            Fixture::new(name, folder.join(&file_name), output_path)
        })
        .collect::<Vec<_>>();

    tracing::debug!(
        folder = %folder.display(),
        count = fixtures.len(),
        "discovered fixtures"
    );
    Ok(fixtures)
}

/// Orders by the first run of digits when both names have one, otherwise
/// lexicographically. Equal numbers fall back to the lexicographic order.
pub fn alpha_numeric_order(left: &str, right: &str) -> Ordering {
    match (first_digit_run(left), first_digit_run(right)) {
        (Some(left_digits), Some(right_digits)) => {
            compare_digit_runs(left_digits, right_digits).then_with(|| left.cmp(right))
        }
        _ => left.cmp(right),
    }
}

/// First maximal run of ASCII digits in `text`.
pub fn first_digit_run(text: &str) -> Option<&str> {
    let start = text.find(|c: char| c.is_ascii_digit())?;
    let rest = &text[start..];
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    Some(&rest[..end])
}

// Compares decimal digit strings by value without parsing, so runs longer
// than any integer type still order correctly.
fn compare_digit_runs(left: &str, right: &str) -> Ordering {
    let left = strip_leading_zeros(left);
    let right = strip_leading_zeros(right);
    left.len().cmp(&right.len()).then_with(|| left.cmp(right))
}

fn strip_leading_zeros(digits: &str) -> &str {
    let trimmed = digits.trim_start_matches('0');
    if trimmed.is_empty() { "0" } else { trimmed }
}

fn fixture_base_name(file_name: &str, input_marker: &str) -> String {
    if let Some(stripped) = file_name.strip_suffix(input_marker) {
        return stripped.to_string();
    }
    Path::new(file_name)
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| file_name.to_string())
}

fn compile_globs(patterns: &[String]) -> Result<Option<GlobSet>, DiscoveryError> {
    if patterns.is_empty() {
        return Ok(None);
    }

    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern).map_err(|source| DiscoveryError::InvalidGlob {
            pattern: pattern.clone(),
            source,
        })?;
        builder.add(glob);
    }
    builder
        .build()
        .map(Some)
        .map_err(|source| DiscoveryError::InvalidGlob {
            pattern: patterns.join(", "),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::{
        DiscoveryError, DiscoveryOptions, alpha_numeric_order, discover_fixtures,
        first_digit_run,
    };
    use std::cmp::Ordering;
    use std::fs;
    use tempfile::TempDir;

    fn options(include_globs: &[&str]) -> DiscoveryOptions {
        DiscoveryOptions {
            input_marker: ".in".to_string(),
            output_extension: ".out".to_string(),
            include_globs: include_globs.iter().map(|glob| glob.to_string()).collect(),
        }
    }

    #[test]
    fn numeric_runs_order_by_value() {
        assert_eq!(alpha_numeric_order("case2.in", "case10.in"), Ordering::Less);
        assert_eq!(alpha_numeric_order("test.10.in", "test.9.in"), Ordering::Greater);
        assert_eq!(alpha_numeric_order("a007.in", "b7.in"), Ordering::Less);
        assert_eq!(
            alpha_numeric_order("case99999999999999999999999.in", "case100000000000000000000000.in"),
            Ordering::Less
        );
    }

    #[test]
    fn missing_digits_fall_back_to_lexicographic() {
        assert_eq!(alpha_numeric_order("beta.in", "alpha.in"), Ordering::Greater);
        assert_eq!(alpha_numeric_order("zeta.in", "case1.in"), Ordering::Greater);
        assert_eq!(alpha_numeric_order("case1.in", "zeta.in"), Ordering::Less);
        assert_eq!(alpha_numeric_order("b1.in", "a.in"), Ordering::Greater);
    }

    #[test]
    fn first_digit_run_is_maximal() {
        assert_eq!(first_digit_run("test.123.in"), Some("123"));
        assert_eq!(first_digit_run("x12y34"), Some("12"));
        assert_eq!(first_digit_run("none.in"), None);
    }

    #[test]
    fn discovers_inputs_in_natural_order() {
        let temp = TempDir::new().expect("tempdir should be created");
        for name in ["case10.in", "case2.in", "case1.in", "case1.out", "notes.txt"] {
            fs::write(temp.path().join(name), "1\n").expect("fixture should be written");
        }
        fs::create_dir(temp.path().join("nested.in")).expect("dir should be created");

        let fixtures = discover_fixtures(temp.path(), &options(&[])).expect("discovery succeeds");
        let names = fixtures
            .iter()
            .map(|fixture| fixture.name.as_str())
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["case1", "case2", "case10"]);
        assert_eq!(fixtures[0].output_path, temp.path().join("case1.out"));
        assert_eq!(fixtures[2].input_path, temp.path().join("case10.in"));
    }

    #[test]
    fn equal_numbers_keep_both_fixtures() {
        let temp = TempDir::new().expect("tempdir should be created");
        for name in ["test1.in", "case1.in"] {
            fs::write(temp.path().join(name), "1\n").expect("fixture should be written");
        }

        let fixtures = discover_fixtures(temp.path(), &options(&[])).expect("discovery succeeds");
        assert_eq!(fixtures.len(), 2);
        assert_eq!(fixtures[0].name, "case1");
        assert_eq!(fixtures[1].name, "test1");
    }

    #[test]
    fn include_globs_restrict_inputs() {
        let temp = TempDir::new().expect("tempdir should be created");
        for name in ["small1.in", "small2.in", "large1.in"] {
            fs::write(temp.path().join(name), "1\n").expect("fixture should be written");
        }

        let fixtures =
            discover_fixtures(temp.path(), &options(&["small*"])).expect("discovery succeeds");
        assert_eq!(fixtures.len(), 2);
        assert!(fixtures.iter().all(|fixture| fixture.name.starts_with("small")));

        let error = discover_fixtures(temp.path(), &options(&["small[", "x"]))
            .expect_err("invalid glob should fail");
        assert!(matches!(error, DiscoveryError::InvalidGlob { .. }));
    }

    #[test]
    fn missing_directory_is_an_error() {
        let temp = TempDir::new().expect("tempdir should be created");
        let error = discover_fixtures(temp.path().join("absent"), &options(&[]))
            .expect_err("missing directory should fail");
        assert!(matches!(error, DiscoveryError::MissingDirectory { .. }));
    }
}
