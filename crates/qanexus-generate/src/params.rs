use serde_json::{Map, Value};

use crate::errors::ConfigurationError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParamKind {
    Int,
    Float,
    String,
    FloatList,
    List,
}

impl ParamKind {
    pub fn name(self) -> &'static str {
        match self {
            ParamKind::Int => "int",
            ParamKind::Float => "float",
            ParamKind::String => "string",
            ParamKind::FloatList => "float[]",
            ParamKind::List => "array",
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct ParamSpec {
    pub key: &'static str,
    pub kind: ParamKind,
    pub required: bool,
}

impl ParamSpec {
    pub const fn new(key: &'static str, kind: ParamKind, required: bool) -> Self {
        Self {
            key,
            kind,
            required,
        }
    }
}

pub struct ParamMap<'a> {
    map: Option<&'a Map<String, Value>>,
}

/// Checks `params` against `specs`: unknown keys, wrong kinds and missing
/// required keys are rejected.
pub fn validate_params<'a>(
    params: Option<&'a Value>,
    specs: &[ParamSpec],
    ctx: &'static str,
) -> Result<ParamMap<'a>, ConfigurationError> {
    let map = match params {
        None | Some(Value::Null) => None,
        Some(Value::Object(map)) => Some(map),
        Some(_) => {
            return Err(ConfigurationError::InvalidParams(format!(
                "{ctx}: params must be a JSON object"
            )));
        }
    };

    if let Some(map) = map {
        for (key, value) in map {
            let Some(spec) = specs.iter().find(|spec| spec.key == key.as_str()) else {
                return Err(ConfigurationError::InvalidParams(format!(
                    "{ctx}: unknown param '{key}'"
                )));
            };
            validate_kind(ctx, key, spec.kind, value)?;
        }
    }

    for spec in specs {
        if spec.required && !map.is_some_and(|map| map.contains_key(spec.key)) {
            return Err(ConfigurationError::InvalidParams(format!(
                "{ctx}: missing required param '{}'",
                spec.key
            )));
        }
    }

    Ok(ParamMap { map })
}

impl<'a> ParamMap<'a> {
    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(Value::as_i64)
    }

    /// Non-negative integer that fits `usize`.
    pub fn get_usize(&self, key: &str) -> Option<usize> {
        self.get(key)
            .and_then(Value::as_u64)
            .and_then(|value| usize::try_from(value).ok())
    }

    pub fn get_u32(&self, key: &str) -> Option<u32> {
        self.get(key)
            .and_then(Value::as_u64)
            .and_then(|value| u32::try_from(value).ok())
    }

    pub fn get_f64(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(Value::as_f64)
    }

    pub fn get_str(&self, key: &str) -> Option<&'a str> {
        self.get(key).and_then(Value::as_str)
    }

    pub fn get_f64_list(&self, key: &str) -> Option<Vec<f64>> {
        self.get(key)
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(Value::as_f64).collect())
    }

    pub fn get_list(&self, key: &str) -> Option<&'a [Value]> {
        self.get(key).and_then(Value::as_array).map(Vec::as_slice)
    }

    fn get(&self, key: &str) -> Option<&'a Value> {
        self.map.and_then(|map| map.get(key))
    }
}

fn validate_kind(
    ctx: &'static str,
    key: &str,
    kind: ParamKind,
    value: &Value,
) -> Result<(), ConfigurationError> {
    let valid = match kind {
        ParamKind::Int => value.as_i64().is_some(),
        ParamKind::Float => value.as_f64().is_some(),
        ParamKind::String => value.is_string(),
        ParamKind::FloatList => value
            .as_array()
            .is_some_and(|items| items.iter().all(|item| item.as_f64().is_some())),
        ParamKind::List => value.is_array(),
    };

    if valid {
        Ok(())
    } else {
        Err(ConfigurationError::InvalidParams(format!(
            "{ctx}: invalid value for param '{key}', expected {}",
            kind.name()
        )))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    const SPECS: &[ParamSpec] = &[
        ParamSpec::new("min", ParamKind::Int, false),
        ParamSpec::new("weights", ParamKind::FloatList, true),
    ];

    #[test]
    fn rejects_unknown_and_mistyped_params() {
        let unknown = json!({"weights": [0.5], "max": 3});
        assert!(matches!(
            validate_params(Some(&unknown), SPECS, "test"),
            Err(ConfigurationError::InvalidParams(msg)) if msg.contains("unknown param 'max'")
        ));

        let mistyped = json!({"weights": [0.5, "x"]});
        assert!(validate_params(Some(&mistyped), SPECS, "test").is_err());

        let missing = json!({"min": 1});
        assert!(matches!(
            validate_params(Some(&missing), SPECS, "test"),
            Err(ConfigurationError::InvalidParams(msg)) if msg.contains("missing required param")
        ));
    }

    #[test]
    fn reads_typed_values() {
        let params = json!({"min": 4, "weights": [0.25, 0.75]});
        let map = match validate_params(Some(&params), SPECS, "test") {
            Ok(map) => map,
            Err(err) => panic!("valid params rejected: {err}"),
        };
        assert_eq!(map.get_i64("min"), Some(4));
        assert_eq!(map.get_usize("min"), Some(4));
        assert_eq!(map.get_f64_list("weights"), Some(vec![0.25, 0.75]));
        assert_eq!(map.get_str("min"), None);
    }
}
