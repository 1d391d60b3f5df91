use std::fmt::Display;
use std::ops::Rem;

use crate::failure::{AssertResult, ensure};

pub fn assert_greater_than<T>(value: T, reference: T, message: Option<&str>) -> AssertResult
where
    T: PartialOrd + Display,
{
    ensure(
        value > reference,
        message,
        "Actual value is <= Expected value",
        || format!("Expected: {value} > {reference}"),
    )
}

pub fn assert_greater_than_or_equal<T>(
    value: T,
    reference: T,
    message: Option<&str>,
) -> AssertResult
where
    T: PartialOrd + Display,
{
    ensure(
        value >= reference,
        message,
        "Actual value is < Expected value",
        || format!("Expected: {value} >= {reference}"),
    )
}

pub fn assert_less_than<T>(value: T, reference: T, message: Option<&str>) -> AssertResult
where
    T: PartialOrd + Display,
{
    ensure(
        value < reference,
        message,
        "Actual value is >= Expected value",
        || format!("Expected: {value} < {reference}"),
    )
}

pub fn assert_less_than_or_equal<T>(value: T, reference: T, message: Option<&str>) -> AssertResult
where
    T: PartialOrd + Display,
{
    ensure(
        value <= reference,
        message,
        "Actual value is > Expected value",
        || format!("Expected: {value} <= {reference}"),
    )
}

/// Exclusive bounds: `min < value < max`.
pub fn assert_in_range<T>(value: T, min: T, max: T, message: Option<&str>) -> AssertResult
where
    T: PartialOrd + Display,
{
    ensure(
        min < value && value < max,
        message,
        "Value is out of range",
        || format!("Expected: {min} < {value} < {max}"),
    )
}

pub fn assert_not_in_range<T>(value: T, min: T, max: T, message: Option<&str>) -> AssertResult
where
    T: PartialOrd + Display,
{
    ensure(
        !(min < value && value < max),
        message,
        "Value is in range",
        || format!("Expected: {value} to not be in range ({min}, {max})"),
    )
}

/// Inclusive bounds: `min <= value <= max`.
pub fn assert_in_range_included<T>(value: T, min: T, max: T, message: Option<&str>) -> AssertResult
where
    T: PartialOrd + Display,
{
    ensure(
        min <= value && value <= max,
        message,
        "Value is out of range",
        || format!("Expected: {min} <= {value} <= {max}"),
    )
}

pub fn assert_not_in_range_included<T>(
    value: T,
    min: T,
    max: T,
    message: Option<&str>,
) -> AssertResult
where
    T: PartialOrd + Display,
{
    ensure(
        !(min <= value && value <= max),
        message,
        "Value is in range",
        || format!("Expected: {value} to not be in range [{min}, {max}]"),
    )
}

pub fn assert_zero<T>(value: T, message: Option<&str>) -> AssertResult
where
    T: PartialEq + Default + Display,
{
    ensure(value == T::default(), message, "Value is not zero", || {
        format!("Expected: {value} to be zero")
    })
}

pub fn assert_not_zero<T>(value: T, message: Option<&str>) -> AssertResult
where
    T: PartialEq + Default + Display,
{
    ensure(value != T::default(), message, "Value is zero", || {
        format!("Expected: {value} not to be zero")
    })
}

pub fn assert_positive<T>(value: T, message: Option<&str>) -> AssertResult
where
    T: PartialOrd + Default + Display,
{
    ensure(value > T::default(), message, "Value is not positive", || {
        format!("Expected: {value} to be positive")
    })
}

pub fn assert_negative<T>(value: T, message: Option<&str>) -> AssertResult
where
    T: PartialOrd + Default + Display,
{
    ensure(value < T::default(), message, "Value is not negative", || {
        format!("Expected: {value} to be negative")
    })
}

/// Passes when `value % 2 == 1`.
///
/// The remainder keeps the sign of the dividend, so negative odd numbers fail.
pub fn assert_odd<T>(value: T, message: Option<&str>) -> AssertResult
where
    T: Copy + Rem<Output = T> + PartialEq + From<u8> + Display,
{
    let two = T::from(2);
    ensure(value % two == T::from(1), message, "Value is not odd", || {
        format!("Expected: {value} to be odd")
    })
}

pub fn assert_even<T>(value: T, message: Option<&str>) -> AssertResult
where
    T: Copy + Rem<Output = T> + PartialEq + From<u8> + Display,
{
    let two = T::from(2);
    ensure(value % two == T::from(0), message, "Value is not even", || {
        format!("Expected: {value} to be even")
    })
}

/// Passes when `value == reference + 1`.
pub fn assert_is_increment_of(value: i64, reference: i64, message: Option<&str>) -> AssertResult {
    ensure(
        reference.checked_add(1) == Some(value),
        message,
        "Value is not an increment",
        || format!("Expected: {value} to be increment of: {reference}"),
    )
}

pub fn assert_is_not_increment_of(
    value: i64,
    reference: i64,
    message: Option<&str>,
) -> AssertResult {
    ensure(
        reference.checked_add(1) != Some(value),
        message,
        "Value is an increment",
        || format!("Expected: {value} to not be increment of: {reference}"),
    )
}

/// Same check as [`assert_is_not_increment_of`].
pub fn assert_not_increment_of(value: i64, reference: i64, message: Option<&str>) -> AssertResult {
    assert_is_not_increment_of(value, reference, message)
}

/// Passes when `value == reference - 1`.
pub fn assert_is_decrement_of(value: i64, reference: i64, message: Option<&str>) -> AssertResult {
    ensure(
        reference.checked_sub(1) == Some(value),
        message,
        "Value is not a decrement",
        || format!("Expected: {value} to be decrement of: {reference}"),
    )
}

pub fn assert_not_decrement_of(value: i64, reference: i64, message: Option<&str>) -> AssertResult {
    ensure(
        reference.checked_sub(1) != Some(value),
        message,
        "Value is a decrement",
        || format!("Expected: {value} not to be decrement of: {reference}"),
    )
}

/// Passes when `|actual - expected| <= delta`.
pub fn assert_close_to(
    actual: f64,
    expected: f64,
    delta: f64,
    message: Option<&str>,
) -> AssertResult {
    ensure(
        (actual - expected).abs() <= delta,
        message,
        "Values are not close",
        || format!("Expected: {actual} to be close to: {expected} within: {delta}"),
    )
}

pub fn assert_not_close_to(
    actual: f64,
    expected: f64,
    delta: f64,
    message: Option<&str>,
) -> AssertResult {
    ensure(
        !((actual - expected).abs() <= delta),
        message,
        "Values are close",
        || format!("Expected: {actual} to not be close to: {expected} within: {delta}"),
    )
}

pub fn assert_prime(value: u64, message: Option<&str>) -> AssertResult {
    ensure(
        qanexus_core::is_prime(value),
        message,
        "Value is not prime",
        || format!("Expected: {value} to be prime"),
    )
}
