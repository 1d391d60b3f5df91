use regex::Regex;

use crate::failure::{AssertResult, ensure, failure};

/// Length is counted in characters, not bytes.
pub fn assert_string_length(value: &str, expected: usize, message: Option<&str>) -> AssertResult {
    let length = value.chars().count();
    ensure(
        length == expected,
        message,
        "Expected length not equal to actual length",
        || format!("Expected length: {expected}, but was: {length}"),
    )
}

pub fn assert_string_contains(value: &str, substring: &str, message: Option<&str>) -> AssertResult {
    ensure(
        value.contains(substring),
        message,
        "String does not contain given substring",
        || format!("String does not contain: {substring}"),
    )
}

pub fn assert_string_starts_with(value: &str, prefix: &str, message: Option<&str>) -> AssertResult {
    ensure(
        value.starts_with(prefix),
        message,
        "String does not start with given prefix",
        || format!("String does not start with: {prefix}"),
    )
}

pub fn assert_string_ends_with(value: &str, suffix: &str, message: Option<&str>) -> AssertResult {
    ensure(
        value.ends_with(suffix),
        message,
        "String does not end with given suffix",
        || format!("String does not end with: {suffix}"),
    )
}

/// The pattern must match the whole string.
pub fn assert_string_matches_regex(
    value: &str,
    pattern: &str,
    message: Option<&str>,
) -> AssertResult {
    let default = "String does not match given pattern";
    let regex = anchored(pattern).map_err(|detail| failure(message, default, detail))?;
    ensure(regex.is_match(value), message, default, || {
        format!("String does not match pattern: {pattern}")
    })
}

pub fn assert_string_not_matches_regex(
    value: &str,
    pattern: &str,
    message: Option<&str>,
) -> AssertResult {
    let default = "String matches given pattern";
    let regex = anchored(pattern).map_err(|detail| failure(message, default, detail))?;
    ensure(!regex.is_match(value), message, default, || {
        format!("String matches pattern: {pattern}")
    })
}

fn anchored(pattern: &str) -> Result<Regex, String> {
    Regex::new(&format!("^(?:{pattern})$"))
        .map_err(|err| format!("Invalid pattern: {pattern}: {err}"))
}

pub fn assert_string_is_empty(value: &str, message: Option<&str>) -> AssertResult {
    ensure(
        value.is_empty(),
        message,
        "Expected empty string, but was not.",
        || format!("Found: {value:?}"),
    )
}

pub fn assert_string_is_not_empty(value: &str, message: Option<&str>) -> AssertResult {
    ensure(
        !value.is_empty(),
        message,
        "Expected non-empty string, but was empty.",
        String::new,
    )
}
