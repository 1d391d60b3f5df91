use std::fmt::Debug;

use crate::failure::{AssertResult, ensure, failure};
use crate::value::Value;

pub fn assert_collection_contains<T>(
    collection: &[T],
    element: &T,
    message: Option<&str>,
) -> AssertResult
where
    T: PartialEq + Debug,
{
    ensure(
        collection.contains(element),
        message,
        "Collection does not contain element",
        || format!("Collection does not contain: {element:?}"),
    )
}

pub fn assert_collection_not_contains<T>(
    collection: &[T],
    element: &T,
    message: Option<&str>,
) -> AssertResult
where
    T: PartialEq + Debug,
{
    ensure(
        !collection.contains(element),
        message,
        "Collection contains element",
        || format!("Collection contains: {element:?}"),
    )
}

/// Fails when the collections share any element, naming each common one once.
pub fn assert_disjoint<T>(left: &[T], right: &[T], message: Option<&str>) -> AssertResult
where
    T: PartialEq + Debug,
{
    let common = distinct(left.iter().filter(|item| right.contains(*item)));
    ensure(
        common.is_empty(),
        message,
        "Collection are not disjoint there are common elements",
        || {
            format!(
                "Collections are not disjoint; common element(s): {}",
                join_debug(&common)
            )
        },
    )
}

pub fn assert_is_collection_empty<T>(collection: &[T], message: Option<&str>) -> AssertResult {
    ensure(
        collection.is_empty(),
        message,
        "Expected empty collection, but was not.",
        || format!("Found {} element(s)", collection.len()),
    )
}

pub fn assert_collection_is_not_empty<T>(collection: &[T], message: Option<&str>) -> AssertResult {
    ensure(
        !collection.is_empty(),
        message,
        "Expected non-empty collection, but was empty.",
        String::new,
    )
}

pub fn assert_collection_length<T>(
    collection: &[T],
    expected: usize,
    message: Option<&str>,
) -> AssertResult {
    ensure(
        collection.len() == expected,
        message,
        "Expected length is not equal to collection length",
        || format!("Expected length: {expected}, but was: {}", collection.len()),
    )
}

/// Length of arrays and typed arrays, byte length of raw buffers.
pub fn assert_array_length(value: &Value, expected: usize, message: Option<&str>) -> AssertResult {
    let default = "Expected array length is different than actual array length";
    let Some(length) = value.length() else {
        return Err(failure(
            message,
            default,
            format!("Value of type {} has no length", value.type_tag()),
        ));
    };
    ensure(length == expected, message, default, || {
        format!("Expected array length: {expected}, but was: {length}")
    })
}

/// Structural membership.
pub fn assert_deep_include<T>(collection: &[T], element: &T, message: Option<&str>) -> AssertResult
where
    T: PartialEq + Debug,
{
    ensure(
        collection.iter().any(|item| item == element),
        message,
        "Collection does not include object",
        || format!("Collection does not deeply include: {element:?}"),
    )
}

pub fn assert_not_deep_include<T>(
    collection: &[T],
    element: &T,
    message: Option<&str>,
) -> AssertResult
where
    T: PartialEq + Debug,
{
    ensure(
        !collection.iter().any(|item| item == element),
        message,
        "Collection deeply includes object",
        || format!("Collection deeply includes: {element:?}"),
    )
}

/// Passes when some element is an array containing `nested` or an object
/// having `nested` as a key. A null element fails immediately.
pub fn assert_nested_include(
    collection: &[Value],
    nested: &Value,
    message: Option<&str>,
) -> AssertResult {
    for element in collection {
        null_element(element)?;
        if nests(element, nested) {
            return Ok(());
        }
    }
    Err(failure(
        message,
        "Collection does not include nested element or element is null",
        format!(
            "Collection does not include nested element: {}",
            nested.to_json()
        ),
    ))
}

pub fn assert_not_nested_include(
    collection: &[Value],
    nested: &Value,
    message: Option<&str>,
) -> AssertResult {
    for element in collection {
        null_element(element)?;
        if nests(element, nested) {
            return Err(failure(
                message,
                "Collection includes the nested element",
                format!(
                    "Collection includes the nested element: {}",
                    nested.to_json()
                ),
            ));
        }
    }
    Ok(())
}

fn null_element(element: &Value) -> AssertResult {
    ensure(
        !element.is_nullish(),
        None,
        &format!("Element: {element} is null"),
        String::new,
    )
}

fn nests(element: &Value, nested: &Value) -> bool {
    match element {
        Value::Array(items) => items.contains(nested),
        other if other.is_object_like() => nested
            .property_key()
            .and_then(|key| other.has_property(&key))
            .unwrap_or(false),
        _ => false,
    }
}

/// Set equality: ignores order and duplicates.
pub fn assert_collections_same_members<T>(
    left: &[T],
    right: &[T],
    message: Option<&str>,
) -> AssertResult
where
    T: PartialEq + Debug,
{
    ensure(
        same_members(left, right),
        message,
        "Collections do not have the same members",
        || format!("Expected members: {right:?}, but was: {left:?}"),
    )
}

pub fn assert_collection_not_same_members<T>(
    left: &[T],
    right: &[T],
    message: Option<&str>,
) -> AssertResult
where
    T: PartialEq + Debug,
{
    ensure(
        !same_members(left, right),
        message,
        "Collections have the same members",
        || format!("Both hold: {:?}", distinct(left.iter())),
    )
}

fn same_members<T: PartialEq>(left: &[T], right: &[T]) -> bool {
    let left = distinct(left.iter());
    let right = distinct(right.iter());
    left.len() == right.len() && left.iter().all(|item| right.contains(item))
}

fn distinct<'a, T: PartialEq + 'a>(items: impl Iterator<Item = &'a T>) -> Vec<&'a T> {
    let mut unique: Vec<&T> = Vec::new();
    for item in items {
        if !unique.contains(&item) {
            unique.push(item);
        }
    }
    unique
}

fn join_debug<T: Debug>(items: &[&T]) -> String {
    items
        .iter()
        .map(|item| format!("{item:?}"))
        .collect::<Vec<_>>()
        .join(", ")
}
