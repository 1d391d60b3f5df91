use crate::failure::{AssertResult, ensure, failure};
use crate::value::Value;

const NOT_AN_OBJECT: &str = "Object is not a valid object or is null.";

pub fn assert_object_has_property(value: &Value, key: &str, message: Option<&str>) -> AssertResult {
    let default = "Missing property or object is invalid or null";
    match value.has_property(key) {
        None => Err(failure(message, default, NOT_AN_OBJECT.to_string())),
        Some(found) => ensure(found, message, default, || {
            format!("Object does not have property: {key}")
        }),
    }
}

/// Own property `key` must exist and equal `expected`.
pub fn assert_has_property_value(
    value: &Value,
    key: &str,
    expected: &Value,
    message: Option<&str>,
) -> AssertResult {
    let default = "Error: the object does not have the property or the property value does not match the expected value";
    if !value.is_object_like() {
        return Err(failure(message, default, NOT_AN_OBJECT.to_string()));
    }
    let Some(actual) = value.property(key) else {
        return Err(failure(
            message,
            default,
            format!("Object does not have property: {key}"),
        ));
    };
    ensure(actual == expected, message, default, || {
        format!("Expected value for '{key}' was {expected}, but got {actual}")
    })
}

/// Fails listing every key of `keys` that `value` lacks.
pub fn assert_object_has_keys(value: &Value, keys: &[&str], message: Option<&str>) -> AssertResult {
    let missing: Vec<&str> = keys
        .iter()
        .copied()
        .filter(|key| !value.has_property(key).unwrap_or(false))
        .collect();
    ensure(missing.is_empty(), message, "Object is missing key(s)", || {
        format!("Object is missing key(s): {}", missing.join(", "))
    })
}

/// Null and undefined fail rather than counting as empty.
pub fn assert_empty_object(value: &Value, message: Option<&str>) -> AssertResult {
    let default = "Error: Object is not empty";
    let detail = match value {
        Value::Null | Value::Undefined => {
            "Expected non-empty object, but got null or undefined."
        }
        Value::Array(items) if !items.is_empty() => "Expected empty array, but was not.",
        Value::Map(entries) if !entries.is_empty() => "Expected empty Map or Set, but was not.",
        Value::Set(items) if !items.is_empty() => "Expected empty Map or Set, but was not.",
        Value::Object(entries) if !entries.is_empty() => "Expected empty object, but was not.",
        Value::String(text) if !text.is_empty() => "Expected empty string, but was not.",
        Value::Bool(_) | Value::Number(_) | Value::Function { .. } => {
            "Object type is not supported."
        }
        other if other.is_empty() == Some(false) => "Expected empty object, but was not.",
        _ => return Ok(()),
    };
    Err(failure(message, default, detail.to_string()))
}

/// Emptiness over objects, arrays, strings, maps and sets. Null and undefined fail.
pub fn assert_object_is_empty(value: &Value, message: Option<&str>) -> AssertResult {
    ensure(
        value.is_empty() == Some(true),
        message,
        "Expected empty object, but was not.",
        || format!("Found: {value}"),
    )
}

pub fn assert_object_is_not_empty(value: &Value, message: Option<&str>) -> AssertResult {
    ensure(
        value.is_empty() == Some(false),
        message,
        "Expected non-empty object, array, or string, but was empty.",
        || format!("Found: {value}"),
    )
}

/// Some own property value of `value` equals `expected`.
pub fn assert_object_includes(
    value: &Value,
    expected: &Value,
    message: Option<&str>,
) -> AssertResult {
    let holds = match value {
        Value::Object(entries) => entries.iter().any(|(_, item)| item == expected),
        Value::Array(items) => items.contains(expected),
        Value::Map(entries) => entries.iter().any(|(_, item)| item == expected),
        Value::Proxy(target) => return assert_object_includes(target, expected, message),
        _ => false,
    };
    ensure(holds, message, "Object does not include value", || {
        format!("Object does not include value: {expected}")
    })
}
