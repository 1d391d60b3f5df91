//! Assertion engine.
//!
//! Every assertion validates one condition and returns
//! `Result<(), AssertionFailure>`. The failure message is always
//! `"{custom-or-default message} {detail}"`, where the detail repeats the
//! compared values. Pass `None` as the message to use the default.
//!
//! ```
//! use qanexus_assert::{Value, assert_object_has_keys};
//!
//! let user = Value::object([("name", Value::from("John")), ("age", Value::from(30))]);
//! let err = assert_object_has_keys(&user, &["name", "email"], None).unwrap_err();
//! assert!(err.message().ends_with("email"));
//! ```

pub mod collections;
pub mod domain;
pub mod equality;
pub mod failure;
pub mod functions;
pub mod numeric;
pub mod objects;
pub mod strings;
pub mod types;
pub mod value;

pub use collections::{
    assert_array_length, assert_collection_contains, assert_collection_is_not_empty,
    assert_collection_length, assert_collection_not_contains, assert_collection_not_same_members,
    assert_collections_same_members, assert_deep_include, assert_disjoint,
    assert_is_collection_empty, assert_nested_include, assert_not_deep_include,
    assert_not_nested_include,
};
pub use domain::{assert_date, assert_date_format, assert_valid_email, assert_valid_url};
pub use equality::{
    Nullish, assert_deep_equals, assert_equals, assert_is_false, assert_is_not_null_or_undefined,
    assert_is_null_or_undefined, assert_is_true, assert_not_deep_equals, assert_not_equals,
};
pub use failure::{
    AssertResult, AssertionFailure, HIGHLIGHT_END, HIGHLIGHT_START, decoration_enabled,
    set_decoration, strip_decoration,
};
pub use functions::{
    Outcome, assert_function_does_not_throw, assert_function_returns, assert_function_throws,
    assert_throws,
};
pub use numeric::{
    assert_close_to, assert_even, assert_greater_than, assert_greater_than_or_equal,
    assert_in_range, assert_in_range_included, assert_is_decrement_of, assert_is_increment_of,
    assert_is_not_increment_of, assert_less_than, assert_less_than_or_equal, assert_negative,
    assert_not_close_to, assert_not_decrement_of, assert_not_in_range,
    assert_not_in_range_included, assert_not_increment_of, assert_not_zero, assert_odd,
    assert_positive, assert_prime, assert_zero,
};
pub use objects::{
    assert_empty_object, assert_has_property_value, assert_object_has_keys,
    assert_object_has_property, assert_object_includes, assert_object_is_empty,
    assert_object_is_not_empty,
};
pub use strings::{
    assert_string_contains, assert_string_ends_with, assert_string_is_empty,
    assert_string_is_not_empty, assert_string_length, assert_string_matches_regex,
    assert_string_not_matches_regex, assert_string_starts_with,
};
pub use types::{
    assert_instance_of, assert_is_array, assert_is_function, assert_is_not_array,
    assert_is_not_number, assert_is_number, assert_is_type_of, assert_is_type_of_class,
};
pub use value::{TypeTag, TypedArray, UnknownTypeTag, Value, format_number};
