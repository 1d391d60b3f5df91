use std::str::FromStr;

use chrono::NaiveDate;
use qanexus_core::{
    Error, MONTH_ABBREVIATIONS, SupportedDateFormat, country_codes, month_abbreviation,
    parse_date_with_reference, phone_pattern,
};

#[test]
fn supported_formats_round_trip_through_from_str() {
    let patterns: Vec<&str> = SupportedDateFormat::ALL
        .iter()
        .map(|format| format.pattern())
        .collect();
    assert_eq!(
        patterns,
        vec![
            "yyyy-MM-dd",
            "yyyy/MM/dd",
            "yyyy-MMM-dd",
            "yyyy/MMM/dd",
            "dd-MM-yyyy",
            "dd-MMM-yyyy",
            "dd/MMM/yyyy",
        ]
    );
    for pattern in patterns {
        let format = SupportedDateFormat::from_str(pattern).expect("supported");
        assert_eq!(format.to_string(), pattern);
    }
    assert_eq!(
        SupportedDateFormat::from_str("MM/dd/yyyy"),
        Err(Error::UnsupportedFormat("MM/dd/yyyy".to_string()))
    );
}

#[test]
fn supported_formats_serialize_as_patterns() {
    let json = serde_json::to_string(&SupportedDateFormat::DayMonthNameYearSlash)
        .expect("serialize format");
    assert_eq!(json, "\"dd/MMM/yyyy\"");
}

#[test]
fn month_table_has_twelve_entries() {
    assert_eq!(MONTH_ABBREVIATIONS.len(), 12);
    assert_eq!(month_abbreviation(1), Some("Jan"));
    assert_eq!(month_abbreviation(12), Some("Dec"));
    assert_eq!(month_abbreviation(0), None);
    assert_eq!(month_abbreviation(13), None);
}

#[test]
fn named_month_formats_render_abbreviations() {
    let date = NaiveDate::from_ymd_opt(1955, 11, 5).expect("date");
    assert_eq!(
        SupportedDateFormat::YearMonthNameDay.format(date),
        "1955-Nov-05"
    );
    assert_eq!(
        SupportedDateFormat::DayMonthYear.format(date),
        "05-11-1955"
    );
    let reference = NaiveDate::from_ymd_opt(2024, 1, 1).expect("date");
    assert_eq!(
        parse_date_with_reference("05/Nov/1955", "dd/MMM/yyyy", reference),
        Ok(date)
    );
}

#[test]
fn phone_table_covers_common_countries() {
    let codes = country_codes();
    for code in ["FR", "US", "GB", "DE", "BR"] {
        assert!(codes.contains(&code), "missing {code}");
        assert!(phone_pattern(code).is_ok());
    }
}
