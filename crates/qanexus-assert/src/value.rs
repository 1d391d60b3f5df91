//! Dynamic value model for the type-discriminating assertions.
//!
//! Most assertions are generic over ordinary Rust types. The checks that
//! classify a value among many runtime species (type tags, emptiness over
//! objects/arrays/strings/maps/sets, nested membership) operate on [`Value`].

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

/// Homogeneous numeric buffers.
#[derive(Debug, Clone, PartialEq)]
pub enum TypedArray {
    Uint8(Vec<u8>),
    Uint16(Vec<u16>),
    Uint32(Vec<u32>),
    Int8(Vec<i8>),
    Int16(Vec<i16>),
    Int32(Vec<i32>),
    Float32(Vec<f32>),
    Float64(Vec<f64>),
}

impl TypedArray {
    pub fn len(&self) -> usize {
        match self {
            TypedArray::Uint8(items) => items.len(),
            TypedArray::Uint16(items) => items.len(),
            TypedArray::Uint32(items) => items.len(),
            TypedArray::Int8(items) => items.len(),
            TypedArray::Int16(items) => items.len(),
            TypedArray::Int32(items) => items.len(),
            TypedArray::Float32(items) => items.len(),
            TypedArray::Float64(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Elements widened to `f64`.
    pub fn to_f64(&self) -> Vec<f64> {
        match self {
            TypedArray::Uint8(items) => items.iter().map(|v| f64::from(*v)).collect(),
            TypedArray::Uint16(items) => items.iter().map(|v| f64::from(*v)).collect(),
            TypedArray::Uint32(items) => items.iter().map(|v| f64::from(*v)).collect(),
            TypedArray::Int8(items) => items.iter().map(|v| f64::from(*v)).collect(),
            TypedArray::Int16(items) => items.iter().map(|v| f64::from(*v)).collect(),
            TypedArray::Int32(items) => items.iter().map(|v| f64::from(*v)).collect(),
            TypedArray::Float32(items) => items.iter().map(|v| f64::from(*v)).collect(),
            TypedArray::Float64(items) => items.clone(),
        }
    }

    fn tag(&self) -> TypeTag {
        match self {
            TypedArray::Uint8(_) => TypeTag::Uint8Array,
            TypedArray::Uint16(_) => TypeTag::Uint16Array,
            TypedArray::Uint32(_) => TypeTag::Uint32Array,
            TypedArray::Int8(_) => TypeTag::Int8Array,
            TypedArray::Int16(_) => TypeTag::Int16Array,
            TypedArray::Int32(_) => TypeTag::Int32Array,
            TypedArray::Float32(_) => TypeTag::Float32Array,
            TypedArray::Float64(_) => TypeTag::Float64Array,
        }
    }
}

/// A runtime value of any supported species.
///
/// Equality is structural: object keys compare regardless of order and `NaN`
/// equals `NaN`.
#[derive(Debug, Clone)]
pub enum Value {
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Vec<Value>),
    TypedArray(TypedArray),
    ArrayBuffer(Vec<u8>),
    Map(Vec<(Value, Value)>),
    Set(Vec<Value>),
    WeakMap,
    WeakSet,
    /// `None` is an invalid date.
    Date(Option<NaiveDateTime>),
    RegExp(String),
    Error { name: String, message: String },
    Promise,
    Proxy(Box<Value>),
    Function { name: String },
    /// Properties in insertion order.
    Object(Vec<(String, Value)>),
}

impl Value {
    pub fn object<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        Value::Object(
            entries
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }

    pub fn array<I, V>(items: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Value::Array(items.into_iter().map(Into::into).collect())
    }

    /// A set; later duplicates are dropped.
    pub fn set<I, V>(items: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let mut unique: Vec<Value> = Vec::new();
        for item in items {
            let item = item.into();
            if !unique.contains(&item) {
                unique.push(item);
            }
        }
        Value::Set(unique)
    }

    /// A map; a repeated key replaces the earlier value in place.
    pub fn map<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<Value>,
        V: Into<Value>,
    {
        let mut pairs: Vec<(Value, Value)> = Vec::new();
        for (key, value) in entries {
            let key = key.into();
            let value = value.into();
            match pairs.iter_mut().find(|(existing, _)| *existing == key) {
                Some(slot) => slot.1 = value,
                None => pairs.push((key, value)),
            }
        }
        Value::Map(pairs)
    }

    pub fn array_buffer(bytes: impl Into<Vec<u8>>) -> Self {
        Value::ArrayBuffer(bytes.into())
    }

    pub fn function(name: impl Into<String>) -> Self {
        Value::Function { name: name.into() }
    }

    pub fn error(name: impl Into<String>, message: impl Into<String>) -> Self {
        Value::Error {
            name: name.into(),
            message: message.into(),
        }
    }

    pub fn regexp(source: impl Into<String>) -> Self {
        Value::RegExp(source.into())
    }

    pub fn is_nullish(&self) -> bool {
        matches!(self, Value::Null | Value::Undefined)
    }

    /// Classifies the value into exactly one [`TypeTag`].
    pub fn type_tag(&self) -> TypeTag {
        match self {
            Value::Null => TypeTag::Null,
            Value::Array(_) => TypeTag::Array,
            Value::TypedArray(array) => array.tag(),
            Value::ArrayBuffer(_) => TypeTag::ArrayBuffer,
            Value::Map(_) => TypeTag::Map,
            Value::Set(_) => TypeTag::Set,
            Value::WeakMap => TypeTag::WeakMap,
            Value::WeakSet => TypeTag::WeakSet,
            Value::Date(_) => TypeTag::Date,
            Value::RegExp(_) => TypeTag::RegExp,
            Value::Error { .. } => TypeTag::Error,
            Value::Promise => TypeTag::Promise,
            Value::Proxy(_) => TypeTag::Proxy,
            Value::Function { .. } => TypeTag::Function,
            Value::Object(_) => TypeTag::Object,
            Value::Undefined => TypeTag::Undefined,
            Value::Bool(_) => TypeTag::Boolean,
            Value::Number(_) => TypeTag::Number,
            Value::String(_) => TypeTag::String,
        }
    }

    /// Whether the value behaves like an object (has properties).
    pub fn is_object_like(&self) -> bool {
        !matches!(
            self,
            Value::Undefined
                | Value::Null
                | Value::Bool(_)
                | Value::Number(_)
                | Value::String(_)
                | Value::Function { .. }
        )
    }

    /// Property-key form of a primitive, used for `key in object` checks.
    pub fn property_key(&self) -> Option<String> {
        match self {
            Value::String(text) => Some(text.clone()),
            Value::Number(number) => Some(format_number(*number)),
            Value::Bool(flag) => Some(flag.to_string()),
            Value::Null => Some("null".to_string()),
            Value::Undefined => Some("undefined".to_string()),
            _ => None,
        }
    }

    /// Whether `key` names a property of this value.
    ///
    /// Returns `None` when the value is not object-like.
    pub fn has_property(&self, key: &str) -> Option<bool> {
        if !self.is_object_like() {
            return None;
        }
        let found = match self {
            Value::Object(entries) => entries.iter().any(|(name, _)| name == key),
            Value::Array(items) => key == "length" || index_below(key, items.len()),
            Value::TypedArray(array) => key == "length" || index_below(key, array.len()),
            Value::ArrayBuffer(_) => key == "byteLength",
            Value::Map(entries) => {
                key == "size"
                    || entries
                        .iter()
                        .any(|(entry, _)| matches!(entry, Value::String(name) if name == key))
            }
            Value::Set(_) => key == "size",
            Value::Error { .. } => key == "name" || key == "message",
            Value::RegExp(_) => key == "source",
            Value::Proxy(target) => target.has_property(key).unwrap_or(false),
            _ => false,
        };
        Some(found)
    }

    /// Own property value for objects, element value for arrays.
    pub fn property(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Object(entries) => entries
                .iter()
                .find(|(name, _)| name == key)
                .map(|(_, value)| value),
            Value::Array(items) => key.parse::<usize>().ok().and_then(|idx| items.get(idx)),
            Value::Map(entries) => entries
                .iter()
                .find(|(entry, _)| matches!(entry, Value::String(name) if name == key))
                .map(|(_, value)| value),
            Value::Proxy(target) => target.property(key),
            _ => None,
        }
    }

    /// Emptiness over objects, arrays, strings, maps and sets.
    ///
    /// Returns `None` for values that have no notion of emptiness.
    pub fn is_empty(&self) -> Option<bool> {
        match self {
            Value::String(text) => Some(text.is_empty()),
            Value::Array(items) => Some(items.is_empty()),
            Value::Set(items) => Some(items.is_empty()),
            Value::Map(entries) => Some(entries.is_empty()),
            Value::Object(entries) => Some(entries.is_empty()),
            Value::TypedArray(array) => Some(array.is_empty()),
            Value::ArrayBuffer(_)
            | Value::WeakMap
            | Value::WeakSet
            | Value::Date(_)
            | Value::RegExp(_)
            | Value::Error { .. }
            | Value::Promise => Some(true),
            Value::Proxy(target) => target.is_empty(),
            _ => None,
        }
    }

    /// Sequence length, falling back to byte length for raw buffers.
    pub fn length(&self) -> Option<usize> {
        match self {
            Value::Array(items) => Some(items.len()),
            Value::TypedArray(array) => Some(array.len()),
            Value::ArrayBuffer(bytes) => Some(bytes.len()),
            Value::String(text) => Some(text.chars().count()),
            Value::Proxy(target) => target.length(),
            _ => None,
        }
    }

    /// Canonical JSON text. Object keys keep insertion order.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "null".to_string())
    }
}

fn index_below(key: &str, len: usize) -> bool {
    key.parse::<usize>().is_ok_and(|idx| idx < len)
}

/// Formats a number the way a script runtime prints it: integral values
/// without a fractional part.
pub fn format_number(number: f64) -> String {
    if number.is_nan() {
        "NaN".to_string()
    } else if number.is_infinite() {
        let text = if number > 0.0 { "Infinity" } else { "-Infinity" };
        text.to_string()
    } else if number.fract() == 0.0 && number.abs() < 1e21 {
        format!("{number:.0}")
    } else {
        number.to_string()
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) | (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b || (a.is_nan() && b.is_nan()),
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Set(a), Value::Set(b)) => {
                a.len() == b.len() && a.iter().all(|item| b.contains(item))
            }
            (Value::TypedArray(a), Value::TypedArray(b)) => a == b,
            (Value::ArrayBuffer(a), Value::ArrayBuffer(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => {
                a.len() == b.len()
                    && a.iter().all(|(key, value)| {
                        b.iter()
                            .any(|(other_key, other_value)| key == other_key && value == other_value)
                    })
            }
            (Value::WeakMap, Value::WeakMap)
            | (Value::WeakSet, Value::WeakSet)
            | (Value::Promise, Value::Promise) => true,
            (Value::Date(a), Value::Date(b)) => a == b,
            (Value::RegExp(a), Value::RegExp(b)) => a == b,
            (
                Value::Error {
                    name: a_name,
                    message: a_message,
                },
                Value::Error {
                    name: b_name,
                    message: b_message,
                },
            ) => a_name == b_name && a_message == b_message,
            (Value::Proxy(a), Value::Proxy(b)) => a == b,
            (Value::Function { name: a }, Value::Function { name: b }) => a == b,
            (Value::Object(a), Value::Object(b)) => {
                a.len() == b.len()
                    && a.iter().all(|(key, value)| {
                        b.iter()
                            .any(|(other_key, other_value)| key == other_key && value == other_value)
                    })
            }
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => f.write_str("undefined"),
            Value::Null => f.write_str("null"),
            Value::Bool(flag) => write!(f, "{flag}"),
            Value::Number(number) => f.write_str(&format_number(*number)),
            Value::String(text) => f.write_str(text),
            Value::Function { name } => write!(f, "function {name}"),
            Value::Error { name, message } => write!(f, "{name}: {message}"),
            Value::RegExp(source) => write!(f, "/{source}/"),
            other => f.write_str(&other.to_json()),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Undefined | Value::Null | Value::Function { .. } | Value::Date(None) => {
                serializer.serialize_unit()
            }
            Value::Bool(flag) => serializer.serialize_bool(*flag),
            Value::Number(number) => {
                if number.is_finite() && number.fract() == 0.0 && number.abs() < 9.0e15 {
                    serializer.serialize_i64(*number as i64)
                } else {
                    serializer.serialize_f64(*number)
                }
            }
            Value::String(text) => serializer.serialize_str(text),
            Value::Array(items) | Value::Set(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::TypedArray(array) => {
                let items = array.to_f64();
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(&Value::Number(item))?;
                }
                seq.end()
            }
            Value::ArrayBuffer(bytes) => {
                let mut seq = serializer.serialize_seq(Some(bytes.len()))?;
                for byte in bytes {
                    seq.serialize_element(byte)?;
                }
                seq.end()
            }
            Value::Map(entries) => {
                let mut seq = serializer.serialize_seq(Some(entries.len()))?;
                for entry in entries {
                    seq.serialize_element(&[&entry.0, &entry.1])?;
                }
                seq.end()
            }
            Value::WeakMap | Value::WeakSet | Value::Promise => {
                serializer.serialize_map(Some(0))?.end()
            }
            Value::Date(Some(moment)) => {
                serializer.serialize_str(&moment.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string())
            }
            Value::RegExp(source) => serializer.serialize_str(&format!("/{source}/")),
            Value::Error { name, message } => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("name", name)?;
                map.serialize_entry("message", message)?;
                map.end()
            }
            Value::Proxy(target) => target.serialize(serializer),
            Value::Object(entries) => {
                let visible: Vec<&(String, Value)> = entries
                    .iter()
                    .filter(|(_, value)| {
                        !matches!(value, Value::Undefined | Value::Function { .. })
                    })
                    .collect();
                let mut map = serializer.serialize_map(Some(visible.len()))?;
                for (key, value) in visible {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
        }
    }
}

macro_rules! number_from {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::Number(value as f64)
                }
            }
        )*
    };
}

number_from!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Null
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(value: Vec<T>) -> Self {
        Value::array(value)
    }
}

impl From<TypedArray> for Value {
    fn from(value: TypedArray) -> Self {
        Value::TypedArray(value)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(value: NaiveDateTime) -> Self {
        Value::Date(Some(value))
    }
}

impl From<NaiveDate> for Value {
    fn from(value: NaiveDate) -> Self {
        Value::Date(Some(value.and_time(NaiveTime::default())))
    }
}

impl<T: Into<Value>> From<BTreeSet<T>> for Value {
    fn from(value: BTreeSet<T>) -> Self {
        Value::set(value)
    }
}

impl<T: Into<Value>> From<HashSet<T>> for Value {
    fn from(value: HashSet<T>) -> Self {
        Value::set(value)
    }
}

impl<K: Into<Value>, V: Into<Value>> From<BTreeMap<K, V>> for Value {
    fn from(value: BTreeMap<K, V>) -> Self {
        Value::map(value)
    }
}

impl<K: Into<Value>, V: Into<Value>> From<HashMap<K, V>> for Value {
    fn from(value: HashMap<K, V>) -> Self {
        Value::map(value)
    }
}

/// The closed set of runtime species a [`Value`] can be classified into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeTag {
    Null,
    Array,
    Uint8Array,
    Uint16Array,
    Uint32Array,
    Int8Array,
    Int16Array,
    Int32Array,
    Float32Array,
    Float64Array,
    ArrayBuffer,
    Map,
    Set,
    WeakMap,
    WeakSet,
    Date,
    RegExp,
    Error,
    Promise,
    Proxy,
    Function,
    Object,
    Undefined,
    Boolean,
    Number,
    String,
}

impl TypeTag {
    /// Tags in classification precedence order.
    pub const ALL: [TypeTag; 26] = [
        TypeTag::Null,
        TypeTag::Array,
        TypeTag::Uint8Array,
        TypeTag::Uint16Array,
        TypeTag::Uint32Array,
        TypeTag::Int8Array,
        TypeTag::Int16Array,
        TypeTag::Int32Array,
        TypeTag::Float32Array,
        TypeTag::Float64Array,
        TypeTag::ArrayBuffer,
        TypeTag::Map,
        TypeTag::Set,
        TypeTag::WeakMap,
        TypeTag::WeakSet,
        TypeTag::Date,
        TypeTag::RegExp,
        TypeTag::Error,
        TypeTag::Promise,
        TypeTag::Proxy,
        TypeTag::Function,
        TypeTag::Object,
        TypeTag::Undefined,
        TypeTag::Boolean,
        TypeTag::Number,
        TypeTag::String,
    ];

    pub fn name(self) -> &'static str {
        match self {
            TypeTag::Null => "null",
            TypeTag::Array => "array",
            TypeTag::Uint8Array => "Uint8Array",
            TypeTag::Uint16Array => "Uint16Array",
            TypeTag::Uint32Array => "Uint32Array",
            TypeTag::Int8Array => "Int8Array",
            TypeTag::Int16Array => "Int16Array",
            TypeTag::Int32Array => "Int32Array",
            TypeTag::Float32Array => "Float32Array",
            TypeTag::Float64Array => "Float64Array",
            TypeTag::ArrayBuffer => "ArrayBuffer",
            TypeTag::Map => "Map",
            TypeTag::Set => "Set",
            TypeTag::WeakMap => "WeakMap",
            TypeTag::WeakSet => "WeakSet",
            TypeTag::Date => "Date",
            TypeTag::RegExp => "RegExp",
            TypeTag::Error => "Error",
            TypeTag::Promise => "Promise",
            TypeTag::Proxy => "Proxy",
            TypeTag::Function => "function",
            TypeTag::Object => "object",
            TypeTag::Undefined => "undefined",
            TypeTag::Boolean => "boolean",
            TypeTag::Number => "number",
            TypeTag::String => "string",
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a type name is not one of the known tags.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown type tag: {0}")]
pub struct UnknownTypeTag(pub String);

impl FromStr for TypeTag {
    type Err = UnknownTypeTag;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        TypeTag::ALL
            .into_iter()
            .find(|tag| tag.name() == value)
            .ok_or_else(|| UnknownTypeTag(value.to_string()))
    }
}
