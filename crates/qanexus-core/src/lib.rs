//! Shared reference data for QA Nexus.
//!
//! This crate holds the immutable lookup tables (month abbreviations,
//! supported date formats, per-country phone patterns) and the date-format
//! token parser used by both the assertion and the generation engines, plus
//! the primality test both of them need.

pub mod error;
pub mod formats;
pub mod numbers;
pub mod phone;

pub use error::{Error, Result};
pub use formats::{
    DateToken, MONTH_ABBREVIATIONS, SupportedDateFormat, days_in_month, is_leap_year,
    month_abbreviation, parse_date, parse_date_with_reference, tokenize,
};
pub use numbers::is_prime;
pub use phone::{PHONE_PATTERNS, country_codes, phone_pattern};
