use std::env;
use std::path::PathBuf;

use qanexus_assert::{
    AssertionFailure, Value, assert_object_has_keys, assert_valid_email, assert_valid_url,
};

/// Reads a flat JSON object and checks it carries a valid `email` and `homepage`.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = env::args().skip(1);
    let mut record_path: Option<PathBuf> = None;
    let mut no_color = false;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--record" => record_path = args.next().map(PathBuf::from),
            "--no-color" => no_color = true,
            _ => {
                if record_path.is_none() {
                    record_path = Some(PathBuf::from(arg));
                } else {
                    return Err("unexpected argument".into());
                }
            }
        }
    }

    let record_path = record_path.ok_or("missing --record path")?;
    qanexus_assert::set_decoration(!no_color);

    let raw = std::fs::read_to_string(&record_path)?;
    let json: serde_json::Map<String, serde_json::Value> = serde_json::from_str(&raw)?;
    let record = Value::object(
        json.iter()
            .map(|(key, value)| (key.clone(), Value::from(value.as_str().map(str::to_string)))),
    );

    let outcome = check(&record, &json);
    match outcome {
        Ok(()) => println!("record ok: {}", record_path.display()),
        Err(failure) => {
            eprintln!("{failure}");
            std::process::exit(1);
        }
    }
    Ok(())
}

fn check(
    record: &Value,
    json: &serde_json::Map<String, serde_json::Value>,
) -> Result<(), AssertionFailure> {
    assert_object_has_keys(record, &["email", "homepage"], None)?;
    assert_valid_email(field(json, "email"), Some("email field"))?;
    assert_valid_url(field(json, "homepage"), Some("homepage field"))?;
    Ok(())
}

fn field<'a>(json: &'a serde_json::Map<String, serde_json::Value>, key: &str) -> &'a str {
    json.get(key).and_then(|value| value.as_str()).unwrap_or_default()
}
