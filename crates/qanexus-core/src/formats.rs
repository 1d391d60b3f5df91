use std::fmt;
use std::str::FromStr;

use chrono::format::{Fixed, Item, Numeric, Pad, ParseError, Parsed, parse};
use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Three-letter month abbreviations, indexed by `month - 1`.
pub const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Returns the abbreviation for a 1-based month number.
pub fn month_abbreviation(month: u32) -> Option<&'static str> {
    let idx = usize::try_from(month).ok()?.checked_sub(1)?;
    MONTH_ABBREVIATIONS.get(idx).copied()
}

/// Gregorian leap-year rule.
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in `month` of `year`. Out-of-range months report 31.
pub fn days_in_month(month: u32, year: i32) -> u32 {
    match month {
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

/// The date patterns accepted by the date generators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SupportedDateFormat {
    #[serde(rename = "yyyy-MM-dd")]
    YearMonthDay,
    #[serde(rename = "yyyy/MM/dd")]
    YearMonthDaySlash,
    #[serde(rename = "yyyy-MMM-dd")]
    YearMonthNameDay,
    #[serde(rename = "yyyy/MMM/dd")]
    YearMonthNameDaySlash,
    #[serde(rename = "dd-MM-yyyy")]
    DayMonthYear,
    #[serde(rename = "dd-MMM-yyyy")]
    DayMonthNameYear,
    #[serde(rename = "dd/MMM/yyyy")]
    DayMonthNameYearSlash,
}

impl SupportedDateFormat {
    pub const ALL: [SupportedDateFormat; 7] = [
        SupportedDateFormat::YearMonthDay,
        SupportedDateFormat::YearMonthDaySlash,
        SupportedDateFormat::YearMonthNameDay,
        SupportedDateFormat::YearMonthNameDaySlash,
        SupportedDateFormat::DayMonthYear,
        SupportedDateFormat::DayMonthNameYear,
        SupportedDateFormat::DayMonthNameYearSlash,
    ];

    pub fn pattern(self) -> &'static str {
        match self {
            SupportedDateFormat::YearMonthDay => "yyyy-MM-dd",
            SupportedDateFormat::YearMonthDaySlash => "yyyy/MM/dd",
            SupportedDateFormat::YearMonthNameDay => "yyyy-MMM-dd",
            SupportedDateFormat::YearMonthNameDaySlash => "yyyy/MMM/dd",
            SupportedDateFormat::DayMonthYear => "dd-MM-yyyy",
            SupportedDateFormat::DayMonthNameYear => "dd-MMM-yyyy",
            SupportedDateFormat::DayMonthNameYearSlash => "dd/MMM/yyyy",
        }
    }

    /// Token sequence of the pattern. Supported patterns always tokenize.
    pub fn tokens(self) -> Vec<DateToken> {
        tokenize(self.pattern()).unwrap_or_default()
    }

    /// Renders `date` with this pattern.
    pub fn format(self, date: NaiveDate) -> String {
        let tokens = self.tokens();
        date.format_with_items(tokens.iter().map(DateToken::item)).to_string()
    }
}

impl fmt::Display for SupportedDateFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.pattern())
    }
}

impl FromStr for SupportedDateFormat {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        SupportedDateFormat::ALL
            .into_iter()
            .find(|format| format.pattern() == value)
            .ok_or_else(|| Error::UnsupportedFormat(value.to_string()))
    }
}

/// A single element of a date-format pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateToken {
    /// `yyyy`
    Year,
    /// `yy`
    ShortYear,
    /// `MMM`
    MonthName,
    /// `MM`
    Month,
    /// `M`
    MonthUnpadded,
    /// `dd`
    Day,
    /// `d`
    DayUnpadded,
    /// `HH` / `H`
    Hour { padded: bool },
    /// `mm` / `m`
    Minute { padded: bool },
    /// `ss` / `s`
    Second { padded: bool },
    Literal(String),
}

const TOKENS: &[(&str, DateToken)] = &[
    ("yyyy", DateToken::Year),
    ("yy", DateToken::ShortYear),
    ("MMM", DateToken::MonthName),
    ("MM", DateToken::Month),
    ("M", DateToken::MonthUnpadded),
    ("dd", DateToken::Day),
    ("d", DateToken::DayUnpadded),
    ("HH", DateToken::Hour { padded: true }),
    ("H", DateToken::Hour { padded: false }),
    ("mm", DateToken::Minute { padded: true }),
    ("m", DateToken::Minute { padded: false }),
    ("ss", DateToken::Second { padded: true }),
    ("s", DateToken::Second { padded: false }),
];

/// Splits a pattern into tokens, longest token first.
///
/// Text between single quotes is literal (`''` is a quote). Any other
/// unquoted ASCII letter that is not a token rejects the pattern.
pub fn tokenize(format: &str) -> Result<Vec<DateToken>> {
    let mut tokens = Vec::new();
    let mut literal = String::new();
    let mut rest = format;

    'outer: while let Some(ch) = rest.chars().next() {
        if ch == '\'' {
            let body = &rest[1..];
            if let Some(stripped) = body.strip_prefix('\'') {
                literal.push('\'');
                rest = stripped;
                continue;
            }
            let end = body
                .find('\'')
                .ok_or_else(|| Error::UnsupportedFormat(format.to_string()))?;
            literal.push_str(&body[..end]);
            rest = &body[end + 1..];
            continue;
        }

        for (text, token) in TOKENS {
            if let Some(stripped) = rest.strip_prefix(text) {
                if !literal.is_empty() {
                    tokens.push(DateToken::Literal(std::mem::take(&mut literal)));
                }
                tokens.push(token.clone());
                rest = stripped;
                continue 'outer;
            }
        }

        if ch.is_ascii_alphabetic() {
            return Err(Error::UnsupportedFormat(format.to_string()));
        }
        literal.push(ch);
        rest = &rest[ch.len_utf8()..];
    }

    if !literal.is_empty() {
        tokens.push(DateToken::Literal(literal));
    }
    Ok(tokens)
}

/// Parses `value` against `format`, using today as the reference date for
/// components the format does not mention.
pub fn parse_date(value: &str, format: &str) -> Result<NaiveDate> {
    parse_date_with_reference(value, format, Local::now().date_naive())
}

/// Parses `value` against `format`.
///
/// A missing year comes from `reference`; once a year is given, a missing
/// month or day starts at 1, and once a month is given a missing day is 1.
/// A two-digit year maps to 1970..=2069.
pub fn parse_date_with_reference(
    value: &str,
    format: &str,
    reference: NaiveDate,
) -> Result<NaiveDate> {
    let tokens = tokenize(format)?;
    let failed = |_: ParseError| Error::Parse {
        value: value.to_string(),
        format: format.to_string(),
    };

    let mut parsed = Parsed::new();
    parse(&mut parsed, value, tokens.iter().map(DateToken::item)).map_err(failed)?;

    let has_year = tokens
        .iter()
        .any(|token| matches!(token, DateToken::Year | DateToken::ShortYear));
    let has_month = tokens.iter().any(|token| {
        matches!(
            token,
            DateToken::MonthName | DateToken::Month | DateToken::MonthUnpadded
        )
    });
    let has_day = tokens
        .iter()
        .any(|token| matches!(token, DateToken::Day | DateToken::DayUnpadded));

    if !has_year {
        parsed.set_year(i64::from(reference.year())).map_err(failed)?;
    }
    if !has_month {
        let month = if has_year { 1 } else { reference.month() };
        parsed.set_month(i64::from(month)).map_err(failed)?;
    }
    if !has_day {
        let day = if has_year || has_month { 1 } else { reference.day() };
        parsed.set_day(i64::from(day)).map_err(failed)?;
    }

    parsed.to_naive_date().map_err(failed)
}

impl DateToken {
    fn item(&self) -> Item<'_> {
        let pad = |padded: bool| if padded { Pad::Zero } else { Pad::None };
        match self {
            DateToken::Year => Item::Numeric(Numeric::Year, Pad::Zero),
            DateToken::ShortYear => Item::Numeric(Numeric::YearMod100, Pad::Zero),
            DateToken::MonthName => Item::Fixed(Fixed::ShortMonthName),
            DateToken::Month => Item::Numeric(Numeric::Month, Pad::Zero),
            DateToken::MonthUnpadded => Item::Numeric(Numeric::Month, Pad::None),
            DateToken::Day => Item::Numeric(Numeric::Day, Pad::Zero),
            DateToken::DayUnpadded => Item::Numeric(Numeric::Day, Pad::None),
            DateToken::Hour { padded } => Item::Numeric(Numeric::Hour, pad(*padded)),
            DateToken::Minute { padded } => Item::Numeric(Numeric::Minute, pad(*padded)),
            DateToken::Second { padded } => Item::Numeric(Numeric::Second, pad(*padded)),
            DateToken::Literal(text) => Item::Literal(text.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap_or_default()
    }

    #[test]
    fn leap_years_follow_gregorian_rule() {
        assert!(is_leap_year(2000));
        assert!(is_leap_year(1996));
        assert!(!is_leap_year(1900));
        assert!(!is_leap_year(1999));
        assert_eq!(days_in_month(2, 1900), 28);
        assert_eq!(days_in_month(2, 1904), 29);
        assert_eq!(days_in_month(9, 1950), 30);
        assert_eq!(days_in_month(12, 1950), 31);
    }

    #[test]
    fn tokenizer_prefers_longest_token() {
        let tokens = tokenize("dd-MMM-yyyy").expect("tokenize");
        assert_eq!(
            tokens,
            vec![
                DateToken::Day,
                DateToken::Literal("-".to_string()),
                DateToken::MonthName,
                DateToken::Literal("-".to_string()),
                DateToken::Year,
            ]
        );
    }

    #[test]
    fn tokenizer_rejects_unknown_letters() {
        assert!(matches!(
            tokenize("not-a-format"),
            Err(Error::UnsupportedFormat(_))
        ));
        assert!(tokenize("'at' HH:mm").is_ok());
    }

    #[test]
    fn parses_every_supported_format() {
        let date = NaiveDate::from_ymd_opt(1984, 2, 29).expect("date");
        for format in SupportedDateFormat::ALL {
            let text = format.format(date);
            let parsed = parse_date_with_reference(&text, format.pattern(), reference())
                .unwrap_or_else(|err| panic!("{format}: {err}"));
            assert_eq!(parsed, date);
        }
    }

    #[test]
    fn rejects_impossible_dates_and_trailing_input() {
        assert!(parse_date_with_reference("1983-02-29", "yyyy-MM-dd", reference()).is_err());
        assert!(parse_date_with_reference("1983-02-28x", "yyyy-MM-dd", reference()).is_err());
        assert!(parse_date_with_reference("28-Foo-1983", "dd-MMM-yyyy", reference()).is_err());
    }

    #[test]
    fn missing_components_follow_reference_rules() {
        let parsed = parse_date_with_reference("1990", "yyyy", reference()).expect("parse");
        assert_eq!(parsed, NaiveDate::from_ymd_opt(1990, 1, 1).expect("date"));
        let parsed = parse_date_with_reference("03", "MM", reference()).expect("parse");
        assert_eq!(parsed, NaiveDate::from_ymd_opt(2024, 3, 1).expect("date"));
    }

    #[test]
    fn unpadded_and_two_digit_tokens() {
        let parsed = parse_date_with_reference("7/8/70", "d/M/yy", reference()).expect("parse");
        assert_eq!(parsed, NaiveDate::from_ymd_opt(1970, 8, 7).expect("date"));
        let parsed = parse_date_with_reference("31.12.05", "dd.MM.yy", reference()).expect("parse");
        assert_eq!(parsed, NaiveDate::from_ymd_opt(2005, 12, 31).expect("date"));
    }

    #[test]
    fn time_tokens_are_range_checked() {
        let parsed =
            parse_date_with_reference("1999-01-02 23:59:59", "yyyy-MM-dd HH:mm:ss", reference())
                .expect("parse");
        assert_eq!(parsed, NaiveDate::from_ymd_opt(1999, 1, 2).expect("date"));
        assert!(
            parse_date_with_reference("1999-01-02 24:00:00", "yyyy-MM-dd HH:mm:ss", reference())
                .is_err()
        );
        let parsed = parse_date_with_reference("08:30", "HH:mm", reference()).expect("parse");
        assert_eq!(parsed, reference());
    }

    #[test]
    fn month_names_are_case_insensitive() {
        let parsed =
            parse_date_with_reference("07/aug/1970", "dd/MMM/yyyy", reference()).expect("parse");
        assert_eq!(parsed, NaiveDate::from_ymd_opt(1970, 8, 7).expect("date"));
    }
}
