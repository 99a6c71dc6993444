use crate::numerics::{AbsoluteTolerance, compare_within_tolerance, parse_full_number};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonMode {
    ExactText,
    NumericTolerance,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Comparison {
    pub mode: ComparisonMode,
    pub passed: bool,
    pub abs_diff: Option<f64>,
}

/// Decides whether an actual result matches the expected one.
///
/// When both strings parse completely as numbers they are compared with the
/// owned absolute tolerance; otherwise the texts must be identical.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ResultComparator {
    tolerance: AbsoluteTolerance,
}

impl ResultComparator {
    pub const fn new(tolerance: AbsoluteTolerance) -> Self {
        Self { tolerance }
    }

    pub const fn tolerance(&self) -> AbsoluteTolerance {
        self.tolerance
    }

    pub fn matches(&self, actual: &str, expected: &str) -> bool {
        self.compare(actual, expected).passed
    }

    pub fn compare(&self, actual: &str, expected: &str) -> Comparison {
        match (parse_full_number(actual), parse_full_number(expected)) {
            (Some(actual_value), Some(expected_value)) => {
                let comparison =
                    compare_within_tolerance(expected_value, actual_value, self.tolerance);
                Comparison {
                    mode: ComparisonMode::NumericTolerance,
                    // identical text covers NaN and infinities
                    passed: comparison.passes || actual == expected,
                    abs_diff: Some(comparison.abs_diff),
                }
            }
            _ => Comparison {
                mode: ComparisonMode::ExactText,
                passed: actual == expected,
                abs_diff: None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ComparisonMode, ResultComparator};
    use crate::numerics::AbsoluteTolerance;

    #[test]
    fn numeric_values_within_tolerance_match() {
        let comparator = ResultComparator::default();
        assert!(comparator.matches("1.0000001", "1.0000002"));
        assert!(comparator.matches("4", "4.0"));
        assert!(comparator.matches("1024", "1024.000000"));
        assert!(!comparator.matches("1.0", "1.1"));
        assert!(!comparator.matches("1.000001", "1.000003"));
    }

    #[test]
    fn multi_token_lines_compare_as_text() {
        let comparator = ResultComparator::default();
        assert!(comparator.matches("1 2", "1 2"));
        assert!(!comparator.matches("1 2", "1 3"));
        assert!(!comparator.matches("1 2", "1  2"));
        assert_eq!(
            comparator.compare("1 2", "1 2").mode,
            ComparisonMode::ExactText
        );
    }

    #[test]
    fn comparison_is_reflexive() {
        let comparator = ResultComparator::default();
        for text in ["", "4", "-0.5", "NaN", "inf", "hello world", " 7 ", "1e400"] {
            assert!(comparator.matches(text, text), "'{text}' should match itself");
        }
    }

    #[test]
    fn empty_strings_match_as_text() {
        let comparison = ResultComparator::default().compare("", "");
        assert!(comparison.passed);
        assert_eq!(comparison.mode, ComparisonMode::ExactText);
        assert_eq!(comparison.abs_diff, None);
    }

    #[test]
    fn tolerance_is_configurable() {
        let loose = ResultComparator::new(AbsoluteTolerance::new(0.5));
        assert!(loose.matches("1.0", "1.4"));
        assert!(!loose.matches("1.0", "1.6"));
        assert_eq!(loose.tolerance().epsilon(), 0.5);
    }

    #[test]
    fn mixed_numeric_and_text_falls_back_to_text() {
        let comparator = ResultComparator::default();
        assert!(!comparator.matches("4", "four"));
        assert!(!comparator.matches("4", " 4"));
    }
}
