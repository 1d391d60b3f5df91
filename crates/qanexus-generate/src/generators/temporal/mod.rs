use std::str::FromStr;

use chrono::{DateTime, Datelike, Duration, Local, NaiveDate, SecondsFormat, Utc};
use qanexus_core::{DateToken, SupportedDateFormat, days_in_month, tokenize};
use rand::{CryptoRng, Rng, RngCore};
use serde_json::Value;

use crate::errors::ConfigurationError;
use crate::generators::{GeneratedValue, Generator, GeneratorContext, GeneratorRegistry};
use crate::params::{ParamKind, ParamSpec, validate_params};
use crate::source::DataGenerator;

pub const YEAR_MIN: i32 = 1900;
pub const YEAR_MAX: i32 = 1999;
/// Widest look-back of [`timestamp`], in milliseconds.
pub const TIMESTAMP_SPAN_MS: i64 = 1_000_000_000;
/// Widest look-back of [`unix_timestamp`], in seconds.
pub const UNIX_TIMESTAMP_SPAN_S: i64 = 1_000_000_000;

/// Random date shaped by the tokens of `format`.
///
/// Year, month and day are drawn only when the format mentions them; the
/// others come from `today`. The day never exceeds the month length.
pub fn date_value<G: Rng + ?Sized>(
    rng: &mut G,
    format: &str,
    today: NaiveDate,
) -> Result<NaiveDate, ConfigurationError> {
    let tokens = tokenize(format)?;
    let has = |pred: fn(&DateToken) -> bool| tokens.iter().any(pred);

    let year = if has(|t| matches!(t, DateToken::Year | DateToken::ShortYear)) {
        rng.random_range(YEAR_MIN..=YEAR_MAX)
    } else {
        today.year()
    };
    let month = if has(|t| {
        matches!(
            t,
            DateToken::MonthName | DateToken::Month | DateToken::MonthUnpadded
        )
    }) {
        rng.random_range(1..=12)
    } else {
        today.month()
    };
    let last_day = days_in_month(month, year);
    let day = if has(|t| matches!(t, DateToken::Day | DateToken::DayUnpadded)) {
        rng.random_range(1..=last_day)
    } else {
        today.day().min(last_day)
    };

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
        ConfigurationError::InvalidBounds(format!("no such date: {year}-{month}-{day}"))
    })
}

/// Random date rendered with one of the supported formats.
pub fn date<G: Rng + ?Sized>(
    rng: &mut G,
    format: SupportedDateFormat,
    today: NaiveDate,
) -> Result<String, ConfigurationError> {
    let value = date_value(rng, format.pattern(), today)?;
    Ok(format.format(value))
}

/// `HH:MM:SS`.
pub fn time<G: Rng + ?Sized>(rng: &mut G) -> String {
    let hour: u32 = rng.random_range(0..24);
    let minute: u32 = rng.random_range(0..60);
    let second: u32 = rng.random_range(0..60);
    format!("{hour:02}:{minute:02}:{second:02}")
}

/// RFC 3339 instant (millisecond precision) up to [`TIMESTAMP_SPAN_MS`] before `now`.
pub fn timestamp<G: Rng + ?Sized>(rng: &mut G, now: DateTime<Utc>) -> String {
    let back = Duration::milliseconds(rng.random_range(0..=TIMESTAMP_SPAN_MS));
    (now - back).to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Seconds since the epoch, up to [`UNIX_TIMESTAMP_SPAN_S`] before `now`.
pub fn unix_timestamp<G: Rng + ?Sized>(rng: &mut G, now: DateTime<Utc>) -> i64 {
    now.timestamp() - rng.random_range(0..UNIX_TIMESTAMP_SPAN_S)
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

impl<S, R> DataGenerator<S, R>
where
    S: CryptoRng,
    R: RngCore,
{
    /// Date string. Without a format this is today as `yyyy-MM-dd`; with one,
    /// the format must be a [`SupportedDateFormat`] pattern and the year falls
    /// in 1900..=1999.
    pub fn generate_date(&mut self, format: Option<&str>) -> Result<String, ConfigurationError> {
        match format {
            None => Ok(SupportedDateFormat::YearMonthDay.format(today())),
            Some(pattern) => {
                let format = SupportedDateFormat::from_str(pattern)?;
                date(&mut self.sampler, format, today())
            }
        }
    }

    /// Structured date. `None` is today.
    pub fn generate_date_value(
        &mut self,
        format: Option<&str>,
    ) -> Result<NaiveDate, ConfigurationError> {
        match format {
            None => Ok(today()),
            Some(pattern) => date_value(&mut self.sampler, pattern, today()),
        }
    }

    pub fn generate_time(&mut self) -> String {
        time(&mut self.sampler)
    }

    pub fn generate_timestamp(&mut self) -> String {
        timestamp(&mut self.sampler, Utc::now())
    }

    pub fn generate_unix_timestamp(&mut self) -> i64 {
        unix_timestamp(&mut self.sampler, Utc::now())
    }
}

const FORMAT_PARAMS: &[ParamSpec] = &[ParamSpec::new("format", ParamKind::String, false)];

pub fn register(registry: &mut GeneratorRegistry) {
    registry.register_generator(Box::new(DateGenerator));
    registry.register_generator(Box::new(DateValueGenerator));
    registry.register_generator(Box::new(TimeGenerator));
    registry.register_generator(Box::new(TimestampGenerator));
    registry.register_generator(Box::new(UnixTimestampGenerator));
}

struct DateGenerator;

impl Generator for DateGenerator {
    fn id(&self) -> &'static str {
        "temporal.date"
    }

    fn description(&self) -> &'static str {
        "date string in a supported format (today when format is omitted)"
    }

    fn params(&self) -> &'static [ParamSpec] {
        FORMAT_PARAMS
    }

    fn generate(
        &self,
        ctx: &mut GeneratorContext<'_>,
        params: Option<&Value>,
    ) -> Result<GeneratedValue, ConfigurationError> {
        let params = validate_params(params, FORMAT_PARAMS, "temporal.date")?;
        let text = match params.get_str("format") {
            None => SupportedDateFormat::YearMonthDay.format(today()),
            Some(pattern) => {
                let format = SupportedDateFormat::from_str(pattern)?;
                date(&mut *ctx.sampler, format, today())?
            }
        };
        Ok(GeneratedValue::Text(text))
    }
}

struct DateValueGenerator;

impl Generator for DateValueGenerator {
    fn id(&self) -> &'static str {
        "temporal.date.value"
    }

    fn description(&self) -> &'static str {
        "structured date; components missing from format come from today"
    }

    fn params(&self) -> &'static [ParamSpec] {
        FORMAT_PARAMS
    }

    fn generate(
        &self,
        ctx: &mut GeneratorContext<'_>,
        params: Option<&Value>,
    ) -> Result<GeneratedValue, ConfigurationError> {
        let params = validate_params(params, FORMAT_PARAMS, "temporal.date.value")?;
        let value = match params.get_str("format") {
            None => today(),
            Some(pattern) => date_value(&mut *ctx.sampler, pattern, today())?,
        };
        Ok(GeneratedValue::Date(value))
    }
}

struct TimeGenerator;

impl Generator for TimeGenerator {
    fn id(&self) -> &'static str {
        "temporal.time"
    }

    fn description(&self) -> &'static str {
        "time of day as HH:MM:SS"
    }

    fn generate(
        &self,
        ctx: &mut GeneratorContext<'_>,
        params: Option<&Value>,
    ) -> Result<GeneratedValue, ConfigurationError> {
        validate_params(params, &[], "temporal.time")?;
        Ok(GeneratedValue::Text(time(&mut *ctx.sampler)))
    }
}

struct TimestampGenerator;

impl Generator for TimestampGenerator {
    fn id(&self) -> &'static str {
        "temporal.timestamp"
    }

    fn description(&self) -> &'static str {
        "RFC 3339 UTC instant in the recent past"
    }

    fn generate(
        &self,
        ctx: &mut GeneratorContext<'_>,
        params: Option<&Value>,
    ) -> Result<GeneratedValue, ConfigurationError> {
        validate_params(params, &[], "temporal.timestamp")?;
        Ok(GeneratedValue::Text(timestamp(&mut *ctx.sampler, Utc::now())))
    }
}

struct UnixTimestampGenerator;

impl Generator for UnixTimestampGenerator {
    fn id(&self) -> &'static str {
        "temporal.unix_timestamp"
    }

    fn description(&self) -> &'static str {
        "seconds since the epoch in the recent past"
    }

    fn generate(
        &self,
        ctx: &mut GeneratorContext<'_>,
        params: Option<&Value>,
    ) -> Result<GeneratedValue, ConfigurationError> {
        validate_params(params, &[], "temporal.unix_timestamp")?;
        Ok(GeneratedValue::Int(unix_timestamp(&mut *ctx.sampler, Utc::now())))
    }
}
