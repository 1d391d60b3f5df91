use std::any::{Any, type_name};
use std::error::Error as StdError;
use std::fmt::{self, Debug};
use std::panic::{AssertUnwindSafe, catch_unwind};

use crate::failure::{AssertResult, ensure, failure};

type BoxError = Box<dyn StdError + Send + Sync>;

/// Outcome of an operation under test: either it returns normally, or it
/// produces an error value.
pub trait Outcome {
    fn into_error(self) -> Option<BoxError>;
}

impl Outcome for () {
    fn into_error(self) -> Option<BoxError> {
        None
    }
}

impl<T, E> Outcome for Result<T, E>
where
    E: Into<BoxError>,
{
    fn into_error(self) -> Option<BoxError> {
        self.err().map(Into::into)
    }
}

/// What an operation raised.
enum Raised {
    Error(BoxError),
    Panic(Box<dyn Any + Send>),
}

impl Raised {
    fn is<X: StdError + 'static>(&self) -> bool {
        match self {
            Raised::Error(err) => err.is::<X>(),
            Raised::Panic(payload) => payload.is::<X>(),
        }
    }
}

impl fmt::Display for Raised {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Raised::Error(err) => write!(f, "{err:?}: {err}"),
            Raised::Panic(payload) => {
                if let Some(text) = payload.downcast_ref::<&str>() {
                    write!(f, "panic: {text}")
                } else if let Some(text) = payload.downcast_ref::<String>() {
                    write!(f, "panic: {text}")
                } else {
                    f.write_str("panic")
                }
            }
        }
    }
}

/// Runs `operation` inside an unwind boundary.
fn capture<F, O>(operation: F) -> Option<Raised>
where
    F: FnOnce() -> O,
    O: Outcome,
{
    match catch_unwind(AssertUnwindSafe(operation)) {
        Ok(outcome) => outcome.into_error().map(Raised::Error),
        Err(payload) => Some(Raised::Panic(payload)),
    }
}

/// Passes when `operation` returns an error or panics.
pub fn assert_throws<F, O>(operation: F, message: Option<&str>) -> AssertResult
where
    F: FnOnce() -> O,
    O: Outcome,
{
    ensure(
        capture(operation).is_some(),
        message,
        "Expected function to throw an exception but none was thrown",
        String::new,
    )
}

/// Passes when `operation` raises an error of type `X`, either as the
/// returned error or as the panic payload.
pub fn assert_function_throws<X, F, O>(operation: F, message: Option<&str>) -> AssertResult
where
    X: StdError + 'static,
    F: FnOnce() -> O,
    O: Outcome,
{
    let default = "The function does not throw the expected exception.";
    match capture(operation) {
        None => Err(failure(
            message,
            default,
            "Expected exception, but none was thrown.".to_string(),
        )),
        Some(raised) => ensure(raised.is::<X>(), message, default, || {
            format!(
                "Expected exception: {}, but was: {raised}",
                type_name::<X>()
            )
        }),
    }
}

pub fn assert_function_does_not_throw<F, O>(operation: F, message: Option<&str>) -> AssertResult
where
    F: FnOnce() -> O,
    O: Outcome,
{
    match capture(operation) {
        None => Ok(()),
        Some(raised) => Err(failure(
            message,
            "Expected no exception, but caught an exception.",
            format!("Expected no exception, but caught: {raised}"),
        )),
    }
}

/// Calls `operation` once and compares its return value. Panics propagate.
pub fn assert_function_returns<T, F>(
    expected: T,
    operation: F,
    message: Option<&str>,
) -> AssertResult
where
    T: PartialEq + Debug,
    F: FnOnce() -> T,
{
    let result = operation();
    ensure(
        result == expected,
        message,
        "Function does not return the expected value.",
        || format!("Expected return: {expected:?}, but was: {result:?}"),
    )
}
