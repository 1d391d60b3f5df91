use std::num::ParseIntError;

use chrono::NaiveDate;
use qanexus_assert::*;

#[test]
fn string_length_counts_characters() {
    for text in ["", "abc", "héllo", "日本語"] {
        let len = text.chars().count();
        assert_string_length(text, len, None).expect("exact length");
        assert!(assert_string_length(text, len + 1, None).is_err());
    }
}

#[test]
fn substring_checks() {
    assert_string_contains("hello world", "lo w", None).expect("contains");
    assert_string_starts_with("hello", "he", None).expect("prefix");
    assert_string_ends_with("hello", "llo", None).expect("suffix");
    let err = assert_string_ends_with("hello", "x", Some("bad suffix")).expect_err("suffix");
    assert_eq!(err.message(), "bad suffix String does not end with: x");

    assert_string_is_empty("", None).expect("empty");
    assert_string_is_not_empty(" ", None).expect("space");
    assert!(assert_string_is_empty("a", None).is_err());
}

#[test]
fn regex_match_is_anchored() {
    assert_string_matches_regex("abc123", "[a-z]+[0-9]+", None).expect("full match");
    assert!(assert_string_matches_regex("xabc123", "abc[0-9]+", None).is_err());
    assert!(assert_string_matches_regex("a", "a|b", None).is_ok());
    assert_string_not_matches_regex("abc", "[0-9]+", None).expect("no digits");

    let err = assert_string_matches_regex("abc", "(", None).expect_err("invalid pattern");
    assert!(err.message().contains("Invalid pattern"));
}

#[test]
fn urls_and_emails() {
    assert_valid_url("https://example.com/path?q=1", None).expect("https");
    assert_valid_url("http://localhost:8080", None).expect("http");
    assert!(assert_valid_url("ftp://example.com", None).is_err());
    assert!(assert_valid_url("https://exa mple.com", None).is_err());

    assert_valid_email("first.last+tag@mail.example.org", None).expect("email");
    assert!(assert_valid_email("user@@example.com", None).is_err());
    assert!(assert_valid_email("user@example", None).is_err());
}

#[test]
fn dates_and_date_formats() {
    let moment = NaiveDate::from_ymd_opt(2024, 2, 29).map(Value::from);
    assert_date(&moment.unwrap_or(Value::Null), None).expect("valid date");
    assert!(assert_date(&Value::Date(None), None).is_err());
    assert!(assert_date(&Value::from("2024-02-29"), None).is_err());

    assert_date_format("2024-02-29", "yyyy-MM-dd", None).expect("leap day");
    assert_date_format("29-Feb-2024", "dd-MMM-yyyy", None).expect("month name");
    let err = assert_date_format("2023-02-29", "yyyy-MM-dd", None).expect_err("not leap");
    assert_eq!(
        err.message(),
        "Date does not match format Date does not match format: yyyy-MM-dd"
    );
}

#[test]
fn type_tags_follow_precedence() {
    assert_is_type_of(&Value::Null, TypeTag::Null, None).expect("null");
    assert_is_type_of(&Value::array([1]), TypeTag::Array, None).expect("array");
    assert_is_type_of(&Value::from(TypedArray::Uint8(vec![1])), TypeTag::Uint8Array, None)
        .expect("typed array");
    assert_is_type_of(&Value::from(1), TypeTag::Number, None).expect("number");

    let err = assert_is_type_of(&Value::array([1]), TypeTag::Object, None).expect_err("array");
    assert!(err.message().ends_with("Expected type: object, but was: array"));
}

#[test]
fn number_checks_reject_nan() {
    assert_is_number(&Value::from(1.5), None).expect("number");
    assert!(assert_is_number(&Value::from(f64::NAN), None).is_err());
    assert_is_not_number(&Value::from("1.5"), None).expect("string");
    assert_is_not_number(&Value::from(f64::NAN), None).expect("nan");
}

#[test]
fn array_and_function_tags() {
    assert_is_array(&Value::array([1, 2]), None).expect("array");
    assert_is_not_array(&Value::object([("a", 1)]), None).expect("object");
    assert_is_function(&Value::function("handler"), None).expect("function");
    assert!(assert_is_function(&Value::from("handler"), None).is_err());
}

#[derive(Debug)]
struct Invoice;

#[test]
fn instance_checks_use_concrete_types() {
    assert_instance_of::<Invoice>(&Invoice, None).expect("invoice");
    assert!(assert_instance_of::<String>(&Invoice, None).is_err());

    assert_is_type_of_class::<u32, u32>(&7, None).expect("u32");
    let err = assert_is_type_of_class::<i64, u32>(&7, None).expect_err("u32 is not i64");
    assert!(err.message().ends_with("Expected type: i64, but was: u32"));
}

fn explode() {
    panic!("boom");
}

fn explode_with_payload() {
    std::panic::panic_any(std::fmt::Error);
}

#[test]
fn throws_captures_errors_and_panics() {
    assert_throws(|| "x".parse::<i32>(), None).expect("parse error");
    assert_throws(explode, None).expect("panic");
    let err = assert_throws(|| (), None).expect_err("nothing thrown");
    assert_eq!(
        err.message(),
        "Expected function to throw an exception but none was thrown"
    );
}

#[test]
fn function_throws_checks_error_type() {
    assert_function_throws::<ParseIntError, _, _>(|| "x".parse::<i32>(), None)
        .expect("ParseIntError");
    let err = assert_function_throws::<std::fmt::Error, _, _>(|| "x".parse::<i32>(), None)
        .expect_err("wrong type");
    assert!(err.message().contains("fmt::Error"));

    let err = assert_function_throws::<ParseIntError, _, _>(|| "7".parse::<i32>(), None)
        .expect_err("no error");
    assert!(err.message().ends_with("Expected exception, but none was thrown."));

    assert_function_throws::<std::fmt::Error, _, _>(explode_with_payload, None)
        .expect("panic payload");
}

#[test]
fn does_not_throw_and_returns() {
    assert_function_does_not_throw(|| "7".parse::<i32>(), None).expect("parses");
    let err = assert_function_does_not_throw(|| Err::<(), _>("broken".to_string()), None)
        .expect_err("error");
    assert!(err.message().contains("broken"));

    assert_function_returns(4, || 2 + 2, None).expect("four");
    let err = assert_function_returns(5, || 2 + 2, None).expect_err("five");
    assert!(err.message().ends_with("Expected return: 5, but was: 4"));
}

#[test]
fn decoration_switch_controls_display() {
    let err = assert_is_true(false, None).expect_err("false");
    set_decoration(false);
    assert_eq!(err.to_string(), "Expected true but was false");
    set_decoration(true);
    assert_eq!(err.to_string(), "\x1b[31mExpected true but was false\x1b[0m");
    assert!(decoration_enabled());
}
