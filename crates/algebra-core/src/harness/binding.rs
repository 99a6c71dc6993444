use crate::common::constants::MAX_SUPPORTED_ARITY;
use crate::domain::AlgebraError;
use std::fmt::{Debug, Formatter};

pub type FixtureCallable = dyn Fn(&[&str]) -> String + Send + Sync;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BindingError {
    #[error("function '{name}' declares arity {arity}, at most {max} argument(s) are supported")]
    UnsupportedArity {
        name: String,
        arity: usize,
        max: usize,
    },
    #[error("function '{name}' expects {expected} argument(s) but {found} were supplied")]
    MissingArguments {
        name: String,
        expected: usize,
        found: usize,
    },
}

impl From<BindingError> for AlgebraError {
    fn from(error: BindingError) -> Self {
        AlgebraError::input_validation("INPUT.HARNESS_ARITY", error.to_string())
    }
}

/// A named function under test with a fixed arity.
///
/// The callable always receives exactly `arity` argument strings.
pub struct FunctionBinding {
    name: String,
    arity: usize,
    callable: Box<FixtureCallable>,
}

impl FunctionBinding {
    pub fn new<F>(name: impl Into<String>, arity: usize, callable: F) -> Result<Self, BindingError>
    where
        F: Fn(&[&str]) -> String + Send + Sync + 'static,
    {
        let name = name.into();
        if arity > MAX_SUPPORTED_ARITY {
            return Err(BindingError::UnsupportedArity {
                name,
                arity,
                max: MAX_SUPPORTED_ARITY,
            });
        }
        Ok(Self {
            name,
            arity,
            callable: Box::new(callable),
        })
    }

    pub fn nullary<F>(name: impl Into<String>, callable: F) -> Self
    where
        F: Fn() -> String + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            arity: 0,
            callable: Box::new(move |_| callable()),
        }
    }

    pub fn unary<F>(name: impl Into<String>, callable: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            arity: 1,
            callable: Box::new(move |args| callable(args[0])),
        }
    }

    pub fn binary<F>(name: impl Into<String>, callable: F) -> Self
    where
        F: Fn(&str, &str) -> String + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            arity: 2,
            callable: Box::new(move |args| callable(args[0], args[1])),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn arity(&self) -> usize {
        self.arity
    }

    /// Checks that `supplied` arguments are enough for this binding.
    pub fn check_arguments(&self, supplied: usize) -> Result<(), BindingError> {
        if supplied < self.arity {
            return Err(BindingError::MissingArguments {
                name: self.name.clone(),
                expected: self.arity,
                found: supplied,
            });
        }
        Ok(())
    }

    /// Calls the function with the first `arity` arguments.
    pub fn invoke<S: AsRef<str>>(&self, arguments: &[S]) -> Result<String, BindingError> {
        self.check_arguments(arguments.len())?;
        let selected = arguments[..self.arity]
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<&str>>();
        Ok((self.callable)(&selected))
    }
}

impl Debug for FunctionBinding {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FunctionBinding")
            .field("name", &self.name)
            .field("arity", &self.arity)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::{BindingError, FunctionBinding};

    #[test]
    fn rejects_unsupported_arity_at_binding_time() {
        let error = FunctionBinding::new("ternary", 3, |args| args.join(","))
            .expect_err("arity 3 should be rejected");
        assert_eq!(
            error,
            BindingError::UnsupportedArity {
                name: "ternary".to_string(),
                arity: 3,
                max: 2
            }
        );
    }

    #[test]
    fn passes_exactly_arity_arguments() {
        let binding =
            FunctionBinding::new("count", 1, |args| args.len().to_string()).expect("arity 1");
        assert_eq!(binding.invoke(&["a", "b", "c"]), Ok("1".to_string()));

        let concat = FunctionBinding::binary("concat", |left, right| format!("{left}{right}"));
        assert_eq!(concat.invoke(&["x", "y", "z"]), Ok("xy".to_string()));

        let constant = FunctionBinding::nullary("answer", || "42".to_string());
        assert_eq!(constant.invoke::<&str>(&[]), Ok("42".to_string()));
        assert_eq!(constant.invoke(&["ignored"]), Ok("42".to_string()));
    }

    #[test]
    fn missing_arguments_are_reported_not_padded() {
        let binding = FunctionBinding::binary("pow", |base, exponent| format!("{base}^{exponent}"));
        let error = binding
            .invoke(&["2".to_string()])
            .expect_err("one argument is not enough");
        assert_eq!(
            error,
            BindingError::MissingArguments {
                name: "pow".to_string(),
                expected: 2,
                found: 1
            }
        );
    }

    #[test]
    fn debug_output_names_the_binding() {
        let binding = FunctionBinding::unary("isqrt", |value| value.to_string());
        let rendered = format!("{binding:?}");
        assert!(rendered.contains("isqrt"));
        assert!(rendered.contains("arity: 1"));
    }
}
