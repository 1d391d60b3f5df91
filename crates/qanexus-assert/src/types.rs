use std::any::{Any, type_name};

use crate::failure::{AssertResult, ensure};
use crate::value::{TypeTag, Value};

/// Passes for numbers other than `NaN`.
pub fn assert_is_number(value: &Value, message: Option<&str>) -> AssertResult {
    let holds = matches!(value, Value::Number(number) if !number.is_nan());
    ensure(holds, message, "Value is not a number", || {
        format!("Expected a number but received {}", value.type_tag())
    })
}

pub fn assert_is_not_number(value: &Value, message: Option<&str>) -> AssertResult {
    let holds = !matches!(value, Value::Number(number) if !number.is_nan());
    ensure(holds, message, "Value is a number", || {
        "Expected not a number but was number".to_string()
    })
}

/// Classifies `value` and compares it against `expected`.
pub fn assert_is_type_of(value: &Value, expected: TypeTag, message: Option<&str>) -> AssertResult {
    let actual = value.type_tag();
    ensure(actual == expected, message, "Type mismatch", || {
        format!("Expected type: {expected}, but was: {actual}")
    })
}

/// Passes when `value` is exactly of type `Expected`.
pub fn assert_is_type_of_class<Expected, Actual>(
    value: &Actual,
    message: Option<&str>,
) -> AssertResult
where
    Expected: Any,
    Actual: Any,
{
    let holds = (value as &dyn Any).is::<Expected>();
    ensure(holds, message, "Type mismatch", || {
        format!(
            "Expected type: {}, but was: {}",
            type_name::<Expected>(),
            type_name::<Actual>()
        )
    })
}

/// Passes when the erased `value` holds an `Expected`.
pub fn assert_instance_of<Expected: Any>(value: &dyn Any, message: Option<&str>) -> AssertResult {
    ensure(
        value.is::<Expected>(),
        message,
        "Object is not an instance of class",
        || format!("Object is not an instance of: {}", type_name::<Expected>()),
    )
}

pub fn assert_is_array(value: &Value, message: Option<&str>) -> AssertResult {
    ensure(
        matches!(value, Value::Array(_)),
        message,
        "Object is not an array",
        String::new,
    )
}

pub fn assert_is_not_array(value: &Value, message: Option<&str>) -> AssertResult {
    ensure(
        !matches!(value, Value::Array(_)),
        message,
        "Object is an array, but should not be",
        String::new,
    )
}

pub fn assert_is_function(value: &Value, message: Option<&str>) -> AssertResult {
    ensure(
        matches!(value, Value::Function { .. }),
        message,
        "Object is not callable",
        || format!("Found: {}", value.type_tag()),
    )
}
