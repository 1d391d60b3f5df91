use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use rand::{CryptoRng, RngCore};
use serde_json::{Value, json};

use crate::errors::ConfigurationError;
use crate::params::ParamSpec;
use crate::source::GeneratorDefaults;

pub mod distributions;
pub mod identifiers;
pub mod network;
pub mod primitives;
pub mod semantic;
pub mod temporal;

pub use distributions::Complex;

/// Value produced by a registered generator.
#[derive(Debug, Clone, PartialEq)]
pub enum GeneratedValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Bytes(Vec<u8>),
    List(Vec<GeneratedValue>),
    Complex(Complex),
    Date(NaiveDate),
}

impl GeneratedValue {
    pub fn to_json(&self) -> Value {
        match self {
            GeneratedValue::Bool(value) => Value::Bool(*value),
            GeneratedValue::Int(value) => json!(value),
            GeneratedValue::Float(value) => json!(value),
            GeneratedValue::Text(value) => Value::String(value.clone()),
            GeneratedValue::Bytes(value) => json!(value),
            GeneratedValue::List(values) => {
                Value::Array(values.iter().map(GeneratedValue::to_json).collect())
            }
            GeneratedValue::Complex(value) => json!(value),
            GeneratedValue::Date(value) => Value::String(value.format("%Y-%m-%d").to_string()),
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            GeneratedValue::Int(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            GeneratedValue::Int(value) => Some(*value as f64),
            GeneratedValue::Float(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            GeneratedValue::Text(value) => Some(value.as_str()),
            _ => None,
        }
    }
}

impl fmt::Display for GeneratedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeneratedValue::Bool(value) => write!(f, "{value}"),
            GeneratedValue::Int(value) => write!(f, "{value}"),
            GeneratedValue::Float(value) => write!(f, "{value}"),
            GeneratedValue::Text(value) => f.write_str(value),
            GeneratedValue::Bytes(value) => f.write_str(&hex::encode_upper(value)),
            GeneratedValue::Date(value) => write!(f, "{}", value.format("%Y-%m-%d")),
            GeneratedValue::Complex(value) => write!(f, "{value}"),
            GeneratedValue::List(values) => {
                let parts: Vec<String> = values.iter().map(ToString::to_string).collect();
                write!(f, "[{}]", parts.join(", "))
            }
        }
    }
}

/// Randomness and defaults handed to a generator for one call.
pub struct GeneratorContext<'a> {
    pub secure: &'a mut dyn CryptoRng,
    pub sampler: &'a mut dyn RngCore,
    pub defaults: &'a GeneratorDefaults,
}

/// A named, parameterised value generator.
pub trait Generator: Send + Sync {
    fn id(&self) -> &'static str;

    fn description(&self) -> &'static str;

    fn params(&self) -> &'static [ParamSpec] {
        &[]
    }

    fn generate(
        &self,
        ctx: &mut GeneratorContext<'_>,
        params: Option<&Value>,
    ) -> Result<GeneratedValue, ConfigurationError>;
}

/// Generators keyed by their stable id.
pub struct GeneratorRegistry {
    generators: BTreeMap<&'static str, Box<dyn Generator>>,
}

impl GeneratorRegistry {
    /// Registry holding every built-in generator.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        primitives::register(&mut registry);
        semantic::register(&mut registry);
        temporal::register(&mut registry);
        identifiers::register(&mut registry);
        network::register(&mut registry);
        distributions::register(&mut registry);
        registry
    }

    pub fn empty() -> Self {
        Self {
            generators: BTreeMap::new(),
        }
    }

    /// Adds a generator, replacing any earlier one with the same id.
    pub fn register_generator(&mut self, generator: Box<dyn Generator>) {
        self.generators.insert(generator.id(), generator);
    }

    pub fn generator(&self, id: &str) -> Option<&dyn Generator> {
        self.generators.get(id).map(|generator| generator.as_ref())
    }

    pub fn ids(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.generators.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Generator> {
        self.generators.values().map(|generator| generator.as_ref())
    }

    pub fn len(&self) -> usize {
        self.generators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.generators.is_empty()
    }
}

impl Default for GeneratorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for GeneratorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.generators.keys()).finish()
    }
}
