use qanexus_core::{MONTH_ABBREVIATIONS, PHONE_PATTERNS, SupportedDateFormat};
use serde_json::json;

fn main() -> Result<(), serde_json::Error> {
    let phones: serde_json::Map<String, serde_json::Value> = PHONE_PATTERNS
        .iter()
        .map(|(code, pattern)| ((*code).to_string(), json!(pattern)))
        .collect();
    let tables = json!({
        "date_formats": SupportedDateFormat::ALL,
        "months": MONTH_ABBREVIATIONS,
        "phone_patterns": phones,
    });
    println!("{}", serde_json::to_string_pretty(&tables)?);
    Ok(())
}
