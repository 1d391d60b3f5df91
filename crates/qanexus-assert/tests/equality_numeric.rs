use std::collections::BTreeMap;

use qanexus_assert::*;

#[test]
fn equals_is_reflexive_and_accepts_two_absent_values() {
    for value in [-3, 0, 7, i32::MAX] {
        assert_equals(value, value, None).expect("equal ints");
    }
    assert_equals("abc", "abc", None).expect("equal strings");
    assert_equals(None::<i32>, None, None).expect("two absent values are equal");
    assert_equals(Value::Null, Value::Null, None).expect("two nulls are equal");
}

#[test]
fn not_equals_rejects_two_absent_values() {
    let err = assert_not_equals(None::<i32>, None, None).expect_err("both absent");
    assert!(
        err.message()
            .starts_with("Expected objects to be different but both were null or equal")
    );
    assert!(assert_not_equals(Value::Null, Value::Null, None).is_err());
    assert!(assert_not_equals(1, 2, None).is_ok());
}

#[test]
fn failure_message_keeps_custom_text_and_detail() {
    let err = assert_equals(1, 2, Some("totals differ")).expect_err("mismatch");
    assert_eq!(err.message(), "totals differ Expected: 2, but was: 1");
    assert_eq!(strip_decoration(&err.decorated()), err.message());
}

#[test]
fn deep_equals_is_sensitive_to_key_order() {
    let left = Value::object([("a", 1), ("b", 2)]);
    let same = Value::object([("a", 1), ("b", 2)]);
    let reordered = Value::object([("b", 2), ("a", 1)]);

    assert_deep_equals(&left, &same, None).expect("same order");
    assert!(assert_deep_equals(&left, &reordered, None).is_err());
    assert_not_deep_equals(&left, &reordered, None).expect("different order");

    let mut map = BTreeMap::new();
    map.insert("k", vec![1, 2]);
    assert_deep_equals(&map, &map.clone(), None).expect("serde types");
}

#[test]
fn boolean_and_nullish_checks() {
    assert_is_true(1 < 2, None).expect("true");
    assert_is_false(2 < 1, None).expect("false");
    assert_eq!(
        assert_is_true(false, None).expect_err("false").message(),
        "Expected true but was false"
    );
    assert_is_null_or_undefined(None::<u8>, None).expect("none");
    assert_is_null_or_undefined(&Value::Undefined, None).expect("undefined");
    assert!(assert_is_null_or_undefined(Some(0), None).is_err());
    assert_is_not_null_or_undefined(&Value::from(0), None).expect("zero is defined");
}

#[test]
fn ordering_and_ranges() {
    assert_greater_than(3, 2, None).expect("3 > 2");
    assert!(assert_greater_than(2, 2, None).is_err());
    assert_greater_than_or_equal(2, 2, None).expect("2 >= 2");
    assert_less_than(1.5, 2.0, None).expect("1.5 < 2");
    assert_less_than_or_equal(2, 2, None).expect("2 <= 2");

    assert_in_range(5, 1, 10, None).expect("inside");
    assert!(assert_in_range(1, 1, 10, None).is_err());
    assert_in_range_included(1, 1, 10, None).expect("bound included");
    assert_not_in_range(10, 1, 10, None).expect("bound excluded");
    assert!(assert_not_in_range_included(10, 1, 10, None).is_err());

    let err = assert_greater_than(1, 2, None).expect_err("1 > 2");
    assert_eq!(err.message(), "Actual value is <= Expected value Expected: 1 > 2");
}

#[test]
fn sign_and_zero() {
    assert_zero(0, None).expect("zero");
    assert_zero(0.0, None).expect("float zero");
    assert_not_zero(-1, None).expect("non zero");
    assert_positive(0.1, None).expect("positive");
    assert!(assert_positive(0, None).is_err());
    assert_negative(-4, None).expect("negative");
    assert!(assert_negative(0, None).is_err());
}

#[test]
fn parity_uses_signed_remainder() {
    assert_odd(3, None).expect("3 is odd");
    assert_even(-4, None).expect("-4 is even");
    assert!(assert_odd(-3, None).is_err());
    assert!(assert_even(3_u32, None).is_err());
    assert_odd(5.0, None).expect("float odd");
}

#[test]
fn increments_and_decrements() {
    assert_is_increment_of(6, 5, None).expect("6 = 5 + 1");
    assert!(assert_is_increment_of(7, 5, None).is_err());
    assert_is_not_increment_of(7, 5, None).expect("7 != 5 + 1");
    assert!(assert_not_increment_of(6, 5, None).is_err());
    assert!(assert_is_increment_of(i64::MIN, i64::MAX, None).is_err());

    assert_is_decrement_of(4, 5, None).expect("4 = 5 - 1");
    assert!(assert_not_decrement_of(4, 5, None).is_err());
}

#[test]
fn closeness_and_primes() {
    assert_close_to(1.0, 1.05, 0.1, None).expect("within delta");
    assert_close_to(1.0, 1.5, 0.5, None).expect("delta is inclusive");
    assert!(assert_close_to(1.0, 2.0, 0.5, None).is_err());
    assert_not_close_to(1.0, 2.0, 0.5, None).expect("outside delta");
    assert!(assert_not_close_to(f64::NAN, 1.0, 0.5, None).is_ok());

    assert_prime(97, None).expect("97");
    let err = assert_prime(91, None).expect_err("7 * 13");
    assert_eq!(err.message(), "Value is not prime Expected: 91 to be prime");
}
