use rand::{CryptoRng, Rng, RngCore};
use serde_json::Value;

use crate::errors::ConfigurationError;
use crate::generators::{GeneratedValue, Generator, GeneratorContext, GeneratorRegistry};
use crate::params::{ParamKind, ParamSpec, validate_params};
use crate::source::DataGenerator;

/// Alphabet used by random strings: ASCII letters, digits and `-`.
pub const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789-";

pub const DEFAULT_INT_MIN: i64 = 0;
pub const DEFAULT_INT_MAX: i64 = 100;
pub const DEFAULT_LONG_MIN: i64 = 0;
pub const DEFAULT_LONG_MAX: i64 = 1_000_000_000;
pub const DEFAULT_SHORT_MIN: i16 = 0;
pub const DEFAULT_SHORT_MAX: i16 = i16::MAX;
pub const DEFAULT_FLOAT_DECIMALS: u32 = 2;
pub const DEFAULT_DOUBLE_DECIMALS: u32 = 15;
const PRINTABLE_FIRST: u8 = 32;
const PRINTABLE_LAST: u8 = 126;

pub fn string<G: Rng + ?Sized>(rng: &mut G, length: usize) -> String {
    (0..length)
        .map(|_| char::from(ALPHABET[rng.random_range(0..ALPHABET.len())]))
        .collect()
}

/// Uniform over the inclusive range `[min, max]`.
pub fn int<G: Rng + ?Sized>(rng: &mut G, min: i64, max: i64) -> Result<i64, ConfigurationError> {
    if min > max {
        return Err(ConfigurationError::InvalidBounds(format!(
            "min ({min}) must be <= max ({max})"
        )));
    }
    Ok(rng.random_range(min..=max))
}

pub fn short<G: Rng + ?Sized>(rng: &mut G, min: i16, max: i16) -> Result<i16, ConfigurationError> {
    if min > max {
        return Err(ConfigurationError::InvalidBounds(format!(
            "min ({min}) must be <= max ({max})"
        )));
    }
    Ok(rng.random_range(min..=max))
}

/// Uniform over `[min, max)`, rounded to `decimals` places.
pub fn float<G: Rng + ?Sized>(
    rng: &mut G,
    min: f64,
    max: f64,
    decimals: u32,
) -> Result<f64, ConfigurationError> {
    if !min.is_finite() || !max.is_finite() || min > max {
        return Err(ConfigurationError::InvalidBounds(format!(
            "min ({min}) must be <= max ({max}) and both finite"
        )));
    }
    let unit: f64 = rng.random();
    Ok(round_to(min + unit * (max - min), decimals))
}

fn round_to(value: f64, decimals: u32) -> f64 {
    let Ok(exponent) = i32::try_from(decimals) else {
        return value;
    };
    let factor = 10_f64.powi(exponent);
    if !factor.is_finite() {
        return value;
    }
    let rounded = (value * factor).round() / factor;
    if rounded.is_finite() { rounded } else { value }
}

pub fn bytes<G: Rng + ?Sized>(rng: &mut G, length: usize) -> Vec<u8> {
    let mut buffer = vec![0_u8; length];
    rng.fill_bytes(&mut buffer);
    buffer
}

/// Printable ASCII character (space through `~`).
pub fn printable_char<G: Rng + ?Sized>(rng: &mut G) -> char {
    char::from(rng.random_range(PRINTABLE_FIRST..=PRINTABLE_LAST))
}

/// Uppercase hex string built from `length / 2` random bytes. Odd lengths
/// yield one character less.
pub fn hex_string<G: Rng + ?Sized>(rng: &mut G, length: usize) -> String {
    hex::encode_upper(bytes(rng, length / 2))
}

/// Whether `text` parses as a finite number.
pub fn is_numeric(text: &str) -> bool {
    text.trim().parse::<f64>().is_ok_and(f64::is_finite)
}

impl<S, R> DataGenerator<S, R>
where
    S: CryptoRng,
    R: RngCore,
{
    /// Random string over [`ALPHABET`]; `None` uses the configured default length.
    pub fn generate_string(&mut self, length: Option<usize>) -> String {
        let length = length.unwrap_or(self.defaults.string_length);
        string(&mut self.secure, length)
    }

    pub fn generate_int(&mut self, min: i64, max: i64) -> Result<i64, ConfigurationError> {
        int(&mut self.secure, min, max)
    }

    pub fn generate_long(&mut self, min: i64, max: i64) -> Result<i64, ConfigurationError> {
        int(&mut self.secure, min, max)
    }

    pub fn generate_short(&mut self, min: i16, max: i16) -> Result<i16, ConfigurationError> {
        short(&mut self.secure, min, max)
    }

    pub fn generate_float(
        &mut self,
        min: f64,
        max: f64,
        decimals: u32,
    ) -> Result<f64, ConfigurationError> {
        float(&mut self.secure, min, max, decimals)
    }

    pub fn generate_double(
        &mut self,
        min: f64,
        max: f64,
        decimals: u32,
    ) -> Result<f64, ConfigurationError> {
        float(&mut self.secure, min, max, decimals)
    }

    pub fn generate_boolean(&mut self) -> bool {
        self.secure.random_bool(0.5)
    }

    pub fn generate_byte(&mut self) -> u8 {
        self.secure.random()
    }

    pub fn generate_byte_array(&mut self, length: usize) -> Vec<u8> {
        bytes(&mut self.secure, length)
    }

    pub fn generate_binary_data(&mut self, length: usize) -> Vec<u8> {
        self.generate_byte_array(length)
    }

    pub fn generate_char(&mut self) -> char {
        printable_char(&mut self.secure)
    }

    pub fn generate_hex(&mut self, length: usize) -> String {
        hex_string(&mut self.secure, length)
    }

    /// Integer in `[0, 100]`.
    pub fn generate_random_percentage(&mut self) -> i64 {
        self.secure.random_range(0..=100)
    }
}

const LENGTH_PARAMS: &[ParamSpec] = &[ParamSpec::new("length", ParamKind::Int, false)];
const REQUIRED_LENGTH_PARAMS: &[ParamSpec] = &[ParamSpec::new("length", ParamKind::Int, true)];
const INT_RANGE_PARAMS: &[ParamSpec] = &[
    ParamSpec::new("min", ParamKind::Int, false),
    ParamSpec::new("max", ParamKind::Int, false),
];
const FLOAT_RANGE_PARAMS: &[ParamSpec] = &[
    ParamSpec::new("min", ParamKind::Float, false),
    ParamSpec::new("max", ParamKind::Float, false),
    ParamSpec::new("decimals", ParamKind::Int, false),
];

pub fn register(registry: &mut GeneratorRegistry) {
    registry.register_generator(Box::new(StringGenerator));
    registry.register_generator(Box::new(IntRangeGenerator {
        id: "primitive.int",
        description: "uniform integer in [min, max] (default 0..=100)",
        default_min: DEFAULT_INT_MIN,
        default_max: DEFAULT_INT_MAX,
    }));
    registry.register_generator(Box::new(IntRangeGenerator {
        id: "primitive.long",
        description: "uniform integer in [min, max] (default 0..=1000000000)",
        default_min: DEFAULT_LONG_MIN,
        default_max: DEFAULT_LONG_MAX,
    }));
    registry.register_generator(Box::new(IntRangeGenerator {
        id: "primitive.short",
        description: "uniform 16-bit integer in [min, max] (default 0..=32767)",
        default_min: i64::from(DEFAULT_SHORT_MIN),
        default_max: i64::from(DEFAULT_SHORT_MAX),
    }));
    registry.register_generator(Box::new(FloatRangeGenerator {
        id: "primitive.float",
        description: "uniform float in [min, max) rounded to decimals (default 2)",
        default_decimals: DEFAULT_FLOAT_DECIMALS,
    }));
    registry.register_generator(Box::new(FloatRangeGenerator {
        id: "primitive.double",
        description: "uniform float in [min, max) rounded to decimals (default 15)",
        default_decimals: DEFAULT_DOUBLE_DECIMALS,
    }));
    registry.register_generator(Box::new(BoolGenerator));
    registry.register_generator(Box::new(ByteGenerator));
    registry.register_generator(Box::new(BytesGenerator));
    registry.register_generator(Box::new(CharGenerator));
    registry.register_generator(Box::new(HexGenerator));
    registry.register_generator(Box::new(PercentageGenerator));
}

struct StringGenerator;

impl Generator for StringGenerator {
    fn id(&self) -> &'static str {
        "primitive.string"
    }

    fn description(&self) -> &'static str {
        "alphanumeric-plus-hyphen string of the given length"
    }

    fn params(&self) -> &'static [ParamSpec] {
        LENGTH_PARAMS
    }

    fn generate(
        &self,
        ctx: &mut GeneratorContext<'_>,
        params: Option<&Value>,
    ) -> Result<GeneratedValue, ConfigurationError> {
        let params = validate_params(params, LENGTH_PARAMS, "primitive.string")?;
        let length = match params.get_i64("length") {
            Some(_) => params.get_usize("length").ok_or_else(|| {
                ConfigurationError::InvalidParams(
                    "primitive.string length must be >= 0".to_string(),
                )
            })?,
            None => ctx.defaults.string_length,
        };
        Ok(GeneratedValue::Text(string(&mut *ctx.secure, length)))
    }
}

struct IntRangeGenerator {
    id: &'static str,
    description: &'static str,
    default_min: i64,
    default_max: i64,
}

impl Generator for IntRangeGenerator {
    fn id(&self) -> &'static str {
        self.id
    }

    fn description(&self) -> &'static str {
        self.description
    }

    fn params(&self) -> &'static [ParamSpec] {
        INT_RANGE_PARAMS
    }

    fn generate(
        &self,
        ctx: &mut GeneratorContext<'_>,
        params: Option<&Value>,
    ) -> Result<GeneratedValue, ConfigurationError> {
        let params = validate_params(params, INT_RANGE_PARAMS, self.id)?;
        let min = params.get_i64("min").unwrap_or(self.default_min);
        let max = params.get_i64("max").unwrap_or(self.default_max);
        Ok(GeneratedValue::Int(int(&mut *ctx.secure, min, max)?))
    }
}

struct FloatRangeGenerator {
    id: &'static str,
    description: &'static str,
    default_decimals: u32,
}

impl Generator for FloatRangeGenerator {
    fn id(&self) -> &'static str {
        self.id
    }

    fn description(&self) -> &'static str {
        self.description
    }

    fn params(&self) -> &'static [ParamSpec] {
        FLOAT_RANGE_PARAMS
    }

    fn generate(
        &self,
        ctx: &mut GeneratorContext<'_>,
        params: Option<&Value>,
    ) -> Result<GeneratedValue, ConfigurationError> {
        let params = validate_params(params, FLOAT_RANGE_PARAMS, self.id)?;
        let min = params.get_f64("min").unwrap_or(0.0);
        let max = params.get_f64("max").unwrap_or(1.0);
        let decimals = match params.get_i64("decimals") {
            Some(_) => params.get_u32("decimals").ok_or_else(|| {
                ConfigurationError::InvalidParams(format!("{} decimals must be >= 0", self.id))
            })?,
            None => self.default_decimals,
        };
        Ok(GeneratedValue::Float(float(
            &mut *ctx.secure,
            min,
            max,
            decimals,
        )?))
    }
}

struct BoolGenerator;

impl Generator for BoolGenerator {
    fn id(&self) -> &'static str {
        "primitive.bool"
    }

    fn description(&self) -> &'static str {
        "true or false with equal probability"
    }

    fn generate(
        &self,
        ctx: &mut GeneratorContext<'_>,
        params: Option<&Value>,
    ) -> Result<GeneratedValue, ConfigurationError> {
        validate_params(params, &[], "primitive.bool")?;
        Ok(GeneratedValue::Bool(ctx.secure.random_bool(0.5)))
    }
}

struct ByteGenerator;

impl Generator for ByteGenerator {
    fn id(&self) -> &'static str {
        "primitive.byte"
    }

    fn description(&self) -> &'static str {
        "single byte in [0, 255]"
    }

    fn generate(
        &self,
        ctx: &mut GeneratorContext<'_>,
        params: Option<&Value>,
    ) -> Result<GeneratedValue, ConfigurationError> {
        validate_params(params, &[], "primitive.byte")?;
        let byte: u8 = ctx.secure.random();
        Ok(GeneratedValue::Int(i64::from(byte)))
    }
}

struct BytesGenerator;

impl Generator for BytesGenerator {
    fn id(&self) -> &'static str {
        "primitive.bytes"
    }

    fn description(&self) -> &'static str {
        "random byte array of the given length"
    }

    fn params(&self) -> &'static [ParamSpec] {
        REQUIRED_LENGTH_PARAMS
    }

    fn generate(
        &self,
        ctx: &mut GeneratorContext<'_>,
        params: Option<&Value>,
    ) -> Result<GeneratedValue, ConfigurationError> {
        let params = validate_params(params, REQUIRED_LENGTH_PARAMS, "primitive.bytes")?;
        let length = params.get_usize("length").ok_or_else(|| {
            ConfigurationError::InvalidParams("primitive.bytes length must be >= 0".to_string())
        })?;
        Ok(GeneratedValue::Bytes(bytes(&mut *ctx.secure, length)))
    }
}

struct CharGenerator;

impl Generator for CharGenerator {
    fn id(&self) -> &'static str {
        "primitive.char"
    }

    fn description(&self) -> &'static str {
        "printable ASCII character"
    }

    fn generate(
        &self,
        ctx: &mut GeneratorContext<'_>,
        params: Option<&Value>,
    ) -> Result<GeneratedValue, ConfigurationError> {
        validate_params(params, &[], "primitive.char")?;
        Ok(GeneratedValue::Text(
            printable_char(&mut *ctx.secure).to_string(),
        ))
    }
}

struct HexGenerator;

impl Generator for HexGenerator {
    fn id(&self) -> &'static str {
        "primitive.hex"
    }

    fn description(&self) -> &'static str {
        "uppercase hex string; odd lengths are truncated by one"
    }

    fn params(&self) -> &'static [ParamSpec] {
        REQUIRED_LENGTH_PARAMS
    }

    fn generate(
        &self,
        ctx: &mut GeneratorContext<'_>,
        params: Option<&Value>,
    ) -> Result<GeneratedValue, ConfigurationError> {
        let params = validate_params(params, REQUIRED_LENGTH_PARAMS, "primitive.hex")?;
        let length = params.get_usize("length").ok_or_else(|| {
            ConfigurationError::InvalidParams("primitive.hex length must be >= 0".to_string())
        })?;
        Ok(GeneratedValue::Text(hex_string(&mut *ctx.secure, length)))
    }
}

struct PercentageGenerator;

impl Generator for PercentageGenerator {
    fn id(&self) -> &'static str {
        "primitive.percentage"
    }

    fn description(&self) -> &'static str {
        "integer percentage in [0, 100]"
    }

    fn generate(
        &self,
        ctx: &mut GeneratorContext<'_>,
        params: Option<&Value>,
    ) -> Result<GeneratedValue, ConfigurationError> {
        validate_params(params, &[], "primitive.percentage")?;
        Ok(GeneratedValue::Int(ctx.secure.random_range(0..=100)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounding_respects_decimals() {
        assert_eq!(round_to(1.23456, 2), 1.23);
        assert_eq!(round_to(1.5, 0), 2.0);
        assert_eq!(round_to(1.5, u32::MAX), 1.5);
    }

    #[test]
    fn numeric_detection() {
        assert!(is_numeric("42"));
        assert!(is_numeric(" -3.5e2 "));
        assert!(!is_numeric("abc"));
        assert!(!is_numeric("inf"));
        assert!(!is_numeric("NaN"));
        assert!(!is_numeric(""));
    }
}
