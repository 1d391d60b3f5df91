use qanexus_generate::{ConfigurationError, DataGenerator, GeneratedValue, GeneratorRegistry};
use serde_json::json;

#[test]
fn generator_ids_are_sorted_and_unique() {
    let registry = GeneratorRegistry::new();
    let ids: Vec<&str> = registry.ids().collect();
    assert!(!ids.is_empty());
    assert_eq!(ids.len(), registry.len());

    let mut sorted = ids.clone();
    sorted.sort_unstable();
    sorted.dedup();
    assert_eq!(ids, sorted);

    for id in [
        "primitive.int",
        "primitive.string",
        "semantic.email",
        "semantic.phone",
        "temporal.date",
        "identifier.uuid",
        "network.ipv4",
        "distribution.gaussian",
        "distribution.unique_sequence",
    ] {
        assert!(registry.generator(id).is_some(), "missing {id}");
    }
}

#[test]
fn every_generator_runs_with_default_params() {
    let needs_params = [
        "distribution.choice",
        "distribution.custom",
        "distribution.unique_sequence",
        "primitive.bytes",
        "primitive.hex",
        "semantic.pattern",
    ];
    let mut generator = DataGenerator::seeded(99);
    let ids: Vec<&str> = generator.registry().ids().collect();
    for id in ids {
        let result = generator.generate(id, None);
        if needs_params.contains(&id) {
            assert!(
                matches!(result, Err(ConfigurationError::InvalidParams(_))),
                "{id} should require params"
            );
        } else {
            assert!(result.is_ok(), "{id} failed: {result:?}");
        }
    }
}

#[test]
fn unknown_ids_and_params_are_rejected() {
    let mut generator = DataGenerator::seeded(1);
    assert_eq!(
        generator.generate("primitive.nope", None),
        Err(ConfigurationError::UnknownGenerator("primitive.nope".to_string()))
    );

    let unknown = json!({"min": 1, "maximum": 3});
    assert!(matches!(
        generator.generate("primitive.int", Some(&unknown)),
        Err(ConfigurationError::InvalidParams(msg)) if msg.contains("unknown param 'maximum'")
    ));

    let mistyped = json!({"min": "one"});
    assert!(matches!(
        generator.generate("primitive.int", Some(&mistyped)),
        Err(ConfigurationError::InvalidParams(_))
    ));

    let not_object = json!([1, 2]);
    assert!(generator.generate("primitive.int", Some(&not_object)).is_err());
}

#[test]
fn params_drive_generation() {
    let mut generator = DataGenerator::seeded(2);

    let value = generator
        .generate("primitive.int", Some(&json!({"min": 7, "max": 7})))
        .expect("int");
    assert_eq!(value, GeneratedValue::Int(7));

    let value = generator
        .generate("primitive.string", Some(&json!({"length": 4})))
        .expect("string");
    assert_eq!(value.as_str().map(str::len), Some(4));

    let value = generator
        .generate(
            "distribution.unique_sequence",
            Some(&json!({"min": 1, "max": 3, "length": 3})),
        )
        .expect("sequence");
    let GeneratedValue::List(items) = &value else {
        panic!("expected a list, got {value:?}");
    };
    let mut ints: Vec<i64> = items.iter().filter_map(GeneratedValue::as_i64).collect();
    ints.sort_unstable();
    assert_eq!(ints, vec![1, 2, 3]);

    let value = generator
        .generate("distribution.choice", Some(&json!({"values": ["red"]})))
        .expect("choice");
    assert_eq!(value, GeneratedValue::Text("red".to_string()));

    let value = generator
        .generate("primitive.bytes", Some(&json!({"length": 2})))
        .expect("bytes");
    assert!(matches!(&value, GeneratedValue::Bytes(bytes) if bytes.len() == 2));
    assert_eq!(value.to_json().as_array().map(Vec::len), Some(2));
}

#[test]
fn configuration_errors_surface_through_registry() {
    let mut generator = DataGenerator::seeded(3);

    assert_eq!(
        generator.generate("semantic.phone", Some(&json!({"country": "ZZ"}))),
        Err(ConfigurationError::UnknownCountry("ZZ".to_string()))
    );
    assert_eq!(
        generator.generate("temporal.date", Some(&json!({"format": "MM.yyyy"}))),
        Err(ConfigurationError::UnsupportedDateFormat("MM.yyyy".to_string()))
    );
    assert_eq!(
        generator.generate("identifier.uuid", Some(&json!({"version": "v7"}))),
        Err(ConfigurationError::UnsupportedUuidVersion("v7".to_string()))
    );
    assert!(matches!(
        generator.generate("identifier.uuid", Some(&json!({"version": "v5", "name": "x"}))),
        Err(ConfigurationError::MissingUuidInput("v5"))
    ));
    assert!(matches!(
        generator.generate(
            "distribution.unique_sequence",
            Some(&json!({"min": 0, "max": 1, "length": 5}))
        ),
        Err(ConfigurationError::SequenceTooLong { .. })
    ));
    assert_eq!(
        generator.generate("distribution.choice", Some(&json!({"values": []}))),
        Err(ConfigurationError::EmptyChoices)
    );
}

#[test]
fn generated_values_render_as_json() {
    let mut generator = DataGenerator::seeded(4);
    let complex = generator
        .generate("distribution.complex", None)
        .expect("complex");
    let json = complex.to_json();
    assert!(json.get("real").is_some_and(|v| v.is_f64()));
    assert!(json.get("imaginary").is_some_and(|v| v.is_f64()));

    let date = generator
        .generate("temporal.date.value", Some(&json!({"format": "yyyy-MM-dd"})))
        .expect("date");
    assert!(matches!(date, GeneratedValue::Date(_)));
    assert!(date.to_json().is_string());
}
