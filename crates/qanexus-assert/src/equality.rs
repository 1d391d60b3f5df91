use std::fmt::Debug;

use serde::Serialize;

use crate::failure::{AssertResult, ensure};
use crate::value::Value;

/// Values that may be absent.
pub trait Nullish {
    fn is_nullish(&self) -> bool;
}

impl Nullish for Value {
    fn is_nullish(&self) -> bool {
        Value::is_nullish(self)
    }
}

impl<T> Nullish for Option<T> {
    fn is_nullish(&self) -> bool {
        self.is_none()
    }
}

impl<T: Nullish + ?Sized> Nullish for &T {
    fn is_nullish(&self) -> bool {
        (**self).is_nullish()
    }
}

pub fn assert_equals<T>(actual: T, expected: T, message: Option<&str>) -> AssertResult
where
    T: PartialEq + Debug,
{
    ensure(actual == expected, message, "Values are not equal", || {
        format!("Expected: {expected:?}, but was: {actual:?}")
    })
}

/// Fails when both sides are equal. Two absent values count as equal.
pub fn assert_not_equals<T>(actual: T, expected: T, message: Option<&str>) -> AssertResult
where
    T: PartialEq + Debug,
{
    ensure(
        actual != expected,
        message,
        "Expected objects to be different but both were null or equal",
        || format!("Both were: {actual:?}"),
    )
}

/// Compares the canonical JSON serialization of both sides.
///
/// Object keys are compared in enumeration order, so two maps holding the same
/// entries in a different order are reported as different.
pub fn assert_deep_equals<T>(actual: &T, expected: &T, message: Option<&str>) -> AssertResult
where
    T: Serialize + ?Sized,
{
    let left = canonical(actual);
    let right = canonical(expected);
    ensure(left == right, message, "Values are not deeply equal", || {
        format!("Expected: {right}, but was: {left}")
    })
}

pub fn assert_not_deep_equals<T>(actual: &T, expected: &T, message: Option<&str>) -> AssertResult
where
    T: Serialize + ?Sized,
{
    let left = canonical(actual);
    let right = canonical(expected);
    ensure(
        left != right,
        message,
        "Expected objects to be different",
        || format!("Both were deeply equal: {left}"),
    )
}

fn canonical<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|err| format!("<unserializable: {err}>"))
}

pub fn assert_is_true(condition: bool, message: Option<&str>) -> AssertResult {
    ensure(condition, message, "Expected true but was false", String::new)
}

pub fn assert_is_false(condition: bool, message: Option<&str>) -> AssertResult {
    ensure(!condition, message, "Expected false but was true", String::new)
}

pub fn assert_is_null_or_undefined<T: Nullish>(value: T, message: Option<&str>) -> AssertResult {
    ensure(
        value.is_nullish(),
        message,
        "Expected null or undefined but was defined",
        String::new,
    )
}

pub fn assert_is_not_null_or_undefined<T: Nullish>(
    value: T,
    message: Option<&str>,
) -> AssertResult {
    ensure(
        !value.is_nullish(),
        message,
        "Expected defined object but was null or undefined",
        String::new,
    )
}
