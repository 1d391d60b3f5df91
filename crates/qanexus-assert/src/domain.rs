use std::sync::OnceLock;

use regex::Regex;

use crate::failure::{AssertResult, ensure};
use crate::value::Value;

const URL_PATTERN: &str = r"^https?://\S+$";
const EMAIL_PATTERN: &str =
    r"^[a-zA-Z0-9_+&*-]+(?:\.[a-zA-Z0-9_+&*-]+)*@(?:[a-zA-Z0-9-]+\.)+[a-zA-Z]{2,7}$";

fn url_regex() -> Option<&'static Regex> {
    static URL: OnceLock<Option<Regex>> = OnceLock::new();
    URL.get_or_init(|| Regex::new(URL_PATTERN).ok()).as_ref()
}

fn email_regex() -> Option<&'static Regex> {
    static EMAIL: OnceLock<Option<Regex>> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(EMAIL_PATTERN).ok()).as_ref()
}

/// `http` or `https` scheme followed by a non-whitespace body.
pub fn assert_valid_url(url: &str, message: Option<&str>) -> AssertResult {
    let holds = url_regex().is_some_and(|regex| regex.is_match(url));
    ensure(holds, message, "String is not a valid URL", || {
        format!("Found: {url}")
    })
}

pub fn assert_valid_email(email: &str, message: Option<&str>) -> AssertResult {
    let holds = email_regex().is_some_and(|regex| regex.is_match(email));
    ensure(holds, message, "Email address is not valid", || {
        format!("Found: {email}")
    })
}

/// Passes for valid date values only.
pub fn assert_date(value: &Value, message: Option<&str>) -> AssertResult {
    ensure(
        matches!(value, Value::Date(Some(_))),
        message,
        "Object is not a Date",
        || format!("Found: {}", value.type_tag()),
    )
}

/// Parses `date` with `format`; any parse failure fails the assertion.
pub fn assert_date_format(date: &str, format: &str, message: Option<&str>) -> AssertResult {
    let parsed = qanexus_core::parse_date(date, format);
    ensure(parsed.is_ok(), message, "Date does not match format", || {
        format!("Date does not match format: {format}")
    })
}
