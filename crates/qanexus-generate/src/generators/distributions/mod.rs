use std::collections::HashSet;
use std::f64::consts::TAU;
use std::fmt;

use qanexus_core::is_prime;
use rand::seq::index;
use rand::{CryptoRng, Rng, RngCore};
use serde::Serialize;
use serde_json::Value;

use crate::errors::ConfigurationError;
use crate::generators::primitives;
use crate::generators::{GeneratedValue, Generator, GeneratorContext, GeneratorRegistry};
use crate::params::{ParamKind, ParamSpec, validate_params};
use crate::source::DataGenerator;

/// Tolerance applied when checking that probabilities sum to at most 1.
pub const PROBABILITY_EPSILON: f64 = 1e-9;
/// Below this width a prime range is scanned before sampling from it.
const PRIME_SCAN_WIDTH: u64 = 4096;
/// Largest upper bound accepted by [`prime`]; keeps trial division per
/// candidate in the tens of thousands of steps.
pub const PRIME_MAX: u64 = u32::MAX as u64;

/// Complex number with independently drawn parts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Complex {
    pub real: f64,
    pub imaginary: f64,
}

impl fmt::Display for Complex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.imaginary.is_sign_negative() {
            write!(f, "{} - {}i", self.real, -self.imaginary)
        } else {
            write!(f, "{} + {}i", self.real, self.imaginary)
        }
    }
}

fn finite(name: &str, value: f64) -> Result<f64, ConfigurationError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ConfigurationError::InvalidBounds(format!(
            "{name} must be finite, got {value}"
        )))
    }
}

/// Uniform over `[min, max)`.
fn uniform<G: Rng + ?Sized>(rng: &mut G, min: f64, max: f64) -> Result<f64, ConfigurationError> {
    if finite("min", min)? > finite("max", max)? {
        return Err(ConfigurationError::InvalidBounds(format!(
            "min ({min}) must be <= max ({max})"
        )));
    }
    let unit: f64 = rng.random();
    Ok(min + unit * (max - min))
}

/// Normal deviate via the Box-Muller transform.
pub fn gaussian<G: Rng + ?Sized>(
    rng: &mut G,
    mean: f64,
    std_dev: f64,
) -> Result<f64, ConfigurationError> {
    finite("mean", mean)?;
    if finite("std_dev", std_dev)? < 0.0 {
        return Err(ConfigurationError::InvalidBounds(format!(
            "std_dev must be >= 0, got {std_dev}"
        )));
    }
    // u1 in (0, 1] keeps ln finite.
    let u1 = 1.0 - rng.random::<f64>();
    let u2: f64 = rng.random();
    let z = (-2.0 * u1.ln()).sqrt() * (TAU * u2).cos();
    Ok(mean + z * std_dev)
}

/// Exponential deviate with rate `lambda`, by inverse-CDF sampling.
pub fn exponential<G: Rng + ?Sized>(rng: &mut G, lambda: f64) -> Result<f64, ConfigurationError> {
    if finite("lambda", lambda)? <= 0.0 {
        return Err(ConfigurationError::InvalidBounds(format!(
            "lambda must be > 0, got {lambda}"
        )));
    }
    let unit: f64 = rng.random();
    Ok(-(1.0 - unit).ln() / lambda)
}

/// Index drawn from a discrete distribution.
///
/// A draw beyond the cumulative sum (the probabilities sum to less than 1,
/// or rounding) lands in the last bucket.
pub fn custom_distribution<G: Rng + ?Sized>(
    rng: &mut G,
    probabilities: &[f64],
) -> Result<usize, ConfigurationError> {
    let Some(last) = probabilities.len().checked_sub(1) else {
        return Err(ConfigurationError::InvalidProbabilities(
            "at least one probability is required".to_string(),
        ));
    };
    if let Some(bad) = probabilities
        .iter()
        .find(|p| !p.is_finite() || p.is_sign_negative())
    {
        return Err(ConfigurationError::InvalidProbabilities(format!(
            "probability {bad} is not in [0, 1]"
        )));
    }
    let total: f64 = probabilities.iter().sum();
    if total > 1.0 + PROBABILITY_EPSILON {
        return Err(ConfigurationError::InvalidProbabilities(format!(
            "probabilities sum to {total}, more than 1"
        )));
    }

    let draw: f64 = rng.random();
    let mut cumulative = 0.0;
    for (idx, probability) in probabilities.iter().enumerate() {
        cumulative += probability;
        if draw < cumulative {
            return Ok(idx);
        }
    }
    Ok(last)
}

pub fn from_set<G: Rng + ?Sized, T: Clone>(
    rng: &mut G,
    values: &[T],
) -> Result<T, ConfigurationError> {
    if values.is_empty() {
        return Err(ConfigurationError::EmptyChoices);
    }
    Ok(values[rng.random_range(0..values.len())].clone())
}

/// `length` distinct integers from `[min, max]`, in random order.
pub fn unique_sequence<G: Rng + ?Sized>(
    rng: &mut G,
    min: i64,
    max: i64,
    length: usize,
) -> Result<Vec<i64>, ConfigurationError> {
    if min > max {
        return Err(ConfigurationError::InvalidBounds(format!(
            "min ({min}) must be <= max ({max})"
        )));
    }
    let width = i128::from(max) - i128::from(min) + 1;
    let available = u64::try_from(width).unwrap_or(u64::MAX);
    if i128::try_from(length).map_or(true, |requested| requested > width) {
        return Err(ConfigurationError::SequenceTooLong {
            requested: length,
            available,
        });
    }
    let Ok(span) = usize::try_from(width) else {
        return Ok(sparse_sequence(rng, min, max, length));
    };

    Ok(index::sample(rng, span, length)
        .into_iter()
        .map(|offset| offset_from(min, offset))
        .collect())
}

/// Distinct draws for ranges wider than `usize`, where `length` is a
/// vanishing share of the range.
fn sparse_sequence<G: Rng + ?Sized>(rng: &mut G, min: i64, max: i64, length: usize) -> Vec<i64> {
    let mut seen = HashSet::with_capacity(length);
    let mut values = Vec::with_capacity(length);
    while values.len() < length {
        let value = rng.random_range(min..=max);
        if seen.insert(value) {
            values.push(value);
        }
    }
    values
}

fn offset_from(min: i64, offset: usize) -> i64 {
    let offset = i128::try_from(offset).unwrap_or(i128::MAX);
    i64::try_from(i128::from(min) + offset).unwrap_or(i64::MAX)
}

/// Even integer near `[min, max]`: an odd draw is nudged up by one, so the
/// result may be `max + 1`.
pub fn even<G: Rng + ?Sized>(rng: &mut G, min: i64, max: i64) -> Result<i64, ConfigurationError> {
    let value = primitives::int(rng, min, max)?;
    Ok(if value % 2 != 0 { nudge(value) } else { value })
}

/// Odd integer near `[min, max]`: an even draw is nudged up by one, so the
/// result may be `max + 1`.
pub fn odd<G: Rng + ?Sized>(rng: &mut G, min: i64, max: i64) -> Result<i64, ConfigurationError> {
    let value = primitives::int(rng, min, max)?;
    Ok(if value % 2 == 0 { nudge(value) } else { value })
}

fn nudge(value: i64) -> i64 {
    value.checked_add(1).unwrap_or(value - 1)
}

/// Prime in `[min, max]` by rejection sampling. `max` may not exceed
/// [`PRIME_MAX`].
pub fn prime<G: Rng + ?Sized>(rng: &mut G, min: u64, max: u64) -> Result<u64, ConfigurationError> {
    if max > PRIME_MAX {
        return Err(ConfigurationError::InvalidBounds(format!(
            "prime max ({max}) must be <= {PRIME_MAX}"
        )));
    }
    let low = min.max(2);
    if max < low {
        return Err(ConfigurationError::InvalidBounds(format!(
            "no prime in [{min}, {max}]"
        )));
    }
    // Prime gaps below 2^32 are far shorter than the scan width.
    if max - low < PRIME_SCAN_WIDTH && !(low..=max).any(is_prime) {
        return Err(ConfigurationError::InvalidBounds(format!(
            "no prime in [{min}, {max}]"
        )));
    }
    loop {
        let candidate = rng.random_range(low..=max);
        if is_prime(candidate) {
            return Ok(candidate);
        }
    }
}

pub fn complex<G: Rng + ?Sized>(
    rng: &mut G,
    real: (f64, f64),
    imaginary: (f64, f64),
) -> Result<Complex, ConfigurationError> {
    Ok(Complex {
        real: uniform(rng, real.0, real.1)?,
        imaginary: uniform(rng, imaginary.0, imaginary.1)?,
    })
}

impl<S, R> DataGenerator<S, R>
where
    S: CryptoRng,
    R: RngCore,
{
    pub fn generate_gaussian(
        &mut self,
        mean: f64,
        std_dev: f64,
    ) -> Result<f64, ConfigurationError> {
        gaussian(&mut self.sampler, mean, std_dev)
    }

    pub fn generate_exponential(&mut self, lambda: f64) -> Result<f64, ConfigurationError> {
        exponential(&mut self.sampler, lambda)
    }

    pub fn generate_custom_distribution(
        &mut self,
        probabilities: &[f64],
    ) -> Result<usize, ConfigurationError> {
        custom_distribution(&mut self.sampler, probabilities)
    }

    pub fn generate_from_set<T: Clone>(&mut self, values: &[T]) -> Result<T, ConfigurationError> {
        from_set(&mut self.secure, values)
    }

    pub fn generate_unique_random_sequence(
        &mut self,
        min: i64,
        max: i64,
        length: usize,
    ) -> Result<Vec<i64>, ConfigurationError> {
        unique_sequence(&mut self.sampler, min, max, length)
    }

    pub fn generate_random_even(&mut self, min: i64, max: i64) -> Result<i64, ConfigurationError> {
        even(&mut self.secure, min, max)
    }

    pub fn generate_random_odd(&mut self, min: i64, max: i64) -> Result<i64, ConfigurationError> {
        odd(&mut self.secure, min, max)
    }

    pub fn generate_random_prime(&mut self, min: u64, max: u64) -> Result<u64, ConfigurationError> {
        prime(&mut self.secure, min, max)
    }

    pub fn generate_random_complex(
        &mut self,
        real_min: f64,
        real_max: f64,
        imaginary_min: f64,
        imaginary_max: f64,
    ) -> Result<Complex, ConfigurationError> {
        complex(
            &mut self.sampler,
            (real_min, real_max),
            (imaginary_min, imaginary_max),
        )
    }
}

const GAUSSIAN_PARAMS: &[ParamSpec] = &[
    ParamSpec::new("mean", ParamKind::Float, false),
    ParamSpec::new("std_dev", ParamKind::Float, false),
];
const EXPONENTIAL_PARAMS: &[ParamSpec] = &[ParamSpec::new("lambda", ParamKind::Float, false)];
const CUSTOM_PARAMS: &[ParamSpec] = &[ParamSpec::new(
    "probabilities",
    ParamKind::FloatList,
    true,
)];
const CHOICE_PARAMS: &[ParamSpec] = &[ParamSpec::new("values", ParamKind::List, true)];
const SEQUENCE_PARAMS: &[ParamSpec] = &[
    ParamSpec::new("min", ParamKind::Int, true),
    ParamSpec::new("max", ParamKind::Int, true),
    ParamSpec::new("length", ParamKind::Int, true),
];
const RANGE_PARAMS: &[ParamSpec] = &[
    ParamSpec::new("min", ParamKind::Int, false),
    ParamSpec::new("max", ParamKind::Int, false),
];
const COMPLEX_PARAMS: &[ParamSpec] = &[
    ParamSpec::new("real_min", ParamKind::Float, false),
    ParamSpec::new("real_max", ParamKind::Float, false),
    ParamSpec::new("imaginary_min", ParamKind::Float, false),
    ParamSpec::new("imaginary_max", ParamKind::Float, false),
];

pub fn register(registry: &mut GeneratorRegistry) {
    registry.register_generator(Box::new(GaussianGenerator));
    registry.register_generator(Box::new(ExponentialGenerator));
    registry.register_generator(Box::new(CustomGenerator));
    registry.register_generator(Box::new(ChoiceGenerator));
    registry.register_generator(Box::new(UniqueSequenceGenerator));
    registry.register_generator(Box::new(ParityGenerator { odd: false }));
    registry.register_generator(Box::new(ParityGenerator { odd: true }));
    registry.register_generator(Box::new(PrimeGenerator));
    registry.register_generator(Box::new(ComplexGenerator));
}

struct GaussianGenerator;

impl Generator for GaussianGenerator {
    fn id(&self) -> &'static str {
        "distribution.gaussian"
    }

    fn description(&self) -> &'static str {
        "normal deviate (Box-Muller), default mean 0 and std_dev 1"
    }

    fn params(&self) -> &'static [ParamSpec] {
        GAUSSIAN_PARAMS
    }

    fn generate(
        &self,
        ctx: &mut GeneratorContext<'_>,
        params: Option<&Value>,
    ) -> Result<GeneratedValue, ConfigurationError> {
        let params = validate_params(params, GAUSSIAN_PARAMS, "distribution.gaussian")?;
        let mean = params.get_f64("mean").unwrap_or(0.0);
        let std_dev = params.get_f64("std_dev").unwrap_or(1.0);
        Ok(GeneratedValue::Float(gaussian(
            &mut *ctx.sampler,
            mean,
            std_dev,
        )?))
    }
}

struct ExponentialGenerator;

impl Generator for ExponentialGenerator {
    fn id(&self) -> &'static str {
        "distribution.exponential"
    }

    fn description(&self) -> &'static str {
        "exponential deviate with rate lambda (default 1)"
    }

    fn params(&self) -> &'static [ParamSpec] {
        EXPONENTIAL_PARAMS
    }

    fn generate(
        &self,
        ctx: &mut GeneratorContext<'_>,
        params: Option<&Value>,
    ) -> Result<GeneratedValue, ConfigurationError> {
        let params = validate_params(params, EXPONENTIAL_PARAMS, "distribution.exponential")?;
        let lambda = params.get_f64("lambda").unwrap_or(1.0);
        Ok(GeneratedValue::Float(exponential(&mut *ctx.sampler, lambda)?))
    }
}

struct CustomGenerator;

impl Generator for CustomGenerator {
    fn id(&self) -> &'static str {
        "distribution.custom"
    }

    fn description(&self) -> &'static str {
        "bucket index drawn from the given probabilities"
    }

    fn params(&self) -> &'static [ParamSpec] {
        CUSTOM_PARAMS
    }

    fn generate(
        &self,
        ctx: &mut GeneratorContext<'_>,
        params: Option<&Value>,
    ) -> Result<GeneratedValue, ConfigurationError> {
        let params = validate_params(params, CUSTOM_PARAMS, "distribution.custom")?;
        let probabilities = params.get_f64_list("probabilities").unwrap_or_default();
        let idx = custom_distribution(&mut *ctx.sampler, &probabilities)?;
        Ok(GeneratedValue::Int(i64::try_from(idx).unwrap_or(i64::MAX)))
    }
}

struct ChoiceGenerator;

impl Generator for ChoiceGenerator {
    fn id(&self) -> &'static str {
        "distribution.choice"
    }

    fn description(&self) -> &'static str {
        "one element of the given values, uniformly"
    }

    fn params(&self) -> &'static [ParamSpec] {
        CHOICE_PARAMS
    }

    fn generate(
        &self,
        ctx: &mut GeneratorContext<'_>,
        params: Option<&Value>,
    ) -> Result<GeneratedValue, ConfigurationError> {
        let params = validate_params(params, CHOICE_PARAMS, "distribution.choice")?;
        let values = params.get_list("values").unwrap_or_default();
        let picked = from_set(&mut *ctx.secure, values)?;
        Ok(from_json(&picked))
    }
}

fn from_json(value: &Value) -> GeneratedValue {
    match value {
        Value::Bool(flag) => GeneratedValue::Bool(*flag),
        Value::Number(number) => match number.as_i64() {
            Some(int) => GeneratedValue::Int(int),
            None => GeneratedValue::Float(number.as_f64().unwrap_or(f64::NAN)),
        },
        Value::String(text) => GeneratedValue::Text(text.clone()),
        Value::Array(items) => GeneratedValue::List(items.iter().map(from_json).collect()),
        other => GeneratedValue::Text(other.to_string()),
    }
}

struct UniqueSequenceGenerator;

impl Generator for UniqueSequenceGenerator {
    fn id(&self) -> &'static str {
        "distribution.unique_sequence"
    }

    fn description(&self) -> &'static str {
        "length distinct integers from [min, max]"
    }

    fn params(&self) -> &'static [ParamSpec] {
        SEQUENCE_PARAMS
    }

    fn generate(
        &self,
        ctx: &mut GeneratorContext<'_>,
        params: Option<&Value>,
    ) -> Result<GeneratedValue, ConfigurationError> {
        let params = validate_params(params, SEQUENCE_PARAMS, "distribution.unique_sequence")?;
        let min = params.get_i64("min").unwrap_or_default();
        let max = params.get_i64("max").unwrap_or_default();
        let length = params.get_usize("length").ok_or_else(|| {
            ConfigurationError::InvalidParams(
                "distribution.unique_sequence length must be >= 0".to_string(),
            )
        })?;
        let values = unique_sequence(&mut *ctx.sampler, min, max, length)?;
        Ok(GeneratedValue::List(
            values.into_iter().map(GeneratedValue::Int).collect(),
        ))
    }
}

struct ParityGenerator {
    odd: bool,
}

impl Generator for ParityGenerator {
    fn id(&self) -> &'static str {
        if self.odd {
            "distribution.odd"
        } else {
            "distribution.even"
        }
    }

    fn description(&self) -> &'static str {
        if self.odd {
            "odd integer near [min, max] (may exceed max by one)"
        } else {
            "even integer near [min, max] (may exceed max by one)"
        }
    }

    fn params(&self) -> &'static [ParamSpec] {
        RANGE_PARAMS
    }

    fn generate(
        &self,
        ctx: &mut GeneratorContext<'_>,
        params: Option<&Value>,
    ) -> Result<GeneratedValue, ConfigurationError> {
        let params = validate_params(params, RANGE_PARAMS, self.id())?;
        let min = params.get_i64("min").unwrap_or(primitives::DEFAULT_INT_MIN);
        let max = params.get_i64("max").unwrap_or(primitives::DEFAULT_INT_MAX);
        let value = if self.odd {
            odd(&mut *ctx.secure, min, max)?
        } else {
            even(&mut *ctx.secure, min, max)?
        };
        Ok(GeneratedValue::Int(value))
    }
}

struct PrimeGenerator;

impl Generator for PrimeGenerator {
    fn id(&self) -> &'static str {
        "distribution.prime"
    }

    fn description(&self) -> &'static str {
        "prime in [min, max] (default 2..=100)"
    }

    fn params(&self) -> &'static [ParamSpec] {
        RANGE_PARAMS
    }

    fn generate(
        &self,
        ctx: &mut GeneratorContext<'_>,
        params: Option<&Value>,
    ) -> Result<GeneratedValue, ConfigurationError> {
        let params = validate_params(params, RANGE_PARAMS, "distribution.prime")?;
        let bound = |key: &str, default: u64| match params.get_i64(key) {
            None => Ok(default),
            Some(value) => u64::try_from(value).map_err(|_| {
                ConfigurationError::InvalidBounds(format!("{key} must be >= 0, got {value}"))
            }),
        };
        let min = bound("min", 2)?;
        let max = bound("max", 100)?;
        let value = prime(&mut *ctx.secure, min, max)?;
        let value = i64::try_from(value).map_err(|_| {
            ConfigurationError::InvalidBounds(format!("prime {value} does not fit i64"))
        })?;
        Ok(GeneratedValue::Int(value))
    }
}

struct ComplexGenerator;

impl Generator for ComplexGenerator {
    fn id(&self) -> &'static str {
        "distribution.complex"
    }

    fn description(&self) -> &'static str {
        "complex number with parts uniform over the given ranges (default [0, 1))"
    }

    fn params(&self) -> &'static [ParamSpec] {
        COMPLEX_PARAMS
    }

    fn generate(
        &self,
        ctx: &mut GeneratorContext<'_>,
        params: Option<&Value>,
    ) -> Result<GeneratedValue, ConfigurationError> {
        let params = validate_params(params, COMPLEX_PARAMS, "distribution.complex")?;
        let real = (
            params.get_f64("real_min").unwrap_or(0.0),
            params.get_f64("real_max").unwrap_or(1.0),
        );
        let imaginary = (
            params.get_f64("imaginary_min").unwrap_or(0.0),
            params.get_f64("imaginary_max").unwrap_or(1.0),
        );
        Ok(GeneratedValue::Complex(complex(
            &mut *ctx.sampler,
            real,
            imaginary,
        )?))
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(0x5eed)
    }

    #[test]
    fn gaussian_sample_mean_is_close() {
        let mut rng = rng();
        let n = 20_000;
        let sum: f64 = (0..n)
            .map(|_| gaussian(&mut rng, 10.0, 2.0).expect("valid params"))
            .sum();
        let mean = sum / f64::from(n);
        assert!((mean - 10.0).abs() < 0.1, "mean {mean}");
        assert!(gaussian(&mut rng, 0.0, -1.0).is_err());
    }

    #[test]
    fn exponential_is_non_negative_and_rejects_bad_rate() {
        let mut rng = rng();
        for _ in 0..1_000 {
            assert!(exponential(&mut rng, 0.5).expect("valid rate") >= 0.0);
        }
        assert!(exponential(&mut rng, 0.0).is_err());
        assert!(exponential(&mut rng, f64::NAN).is_err());
    }

    #[test]
    fn custom_distribution_respects_buckets() {
        let mut rng = rng();
        for _ in 0..1_000 {
            assert_eq!(custom_distribution(&mut rng, &[0.0, 1.0, 0.0]), Ok(1));
        }
        // Draws past the cumulative sum fall into the last bucket.
        for _ in 0..1_000 {
            let idx = custom_distribution(&mut rng, &[0.0, 0.0]).expect("valid");
            assert_eq!(idx, 1);
        }
        assert!(custom_distribution(&mut rng, &[]).is_err());
        assert!(custom_distribution(&mut rng, &[0.7, 0.7]).is_err());
        assert!(custom_distribution(&mut rng, &[-0.1, 0.5]).is_err());
    }

    #[test]
    fn prime_requires_a_prime_in_range() {
        let mut rng = rng();
        assert_eq!(
            prime(&mut rng, 24, 28),
            Err(ConfigurationError::InvalidBounds(
                "no prime in [24, 28]".to_string()
            ))
        );
        assert!(prime(&mut rng, 0, 1).is_err());
        assert_eq!(prime(&mut rng, 0, 2), Ok(2));
    }

    #[test]
    fn prime_bound_is_capped() {
        let mut rng = rng();
        assert!(matches!(
            prime(&mut rng, 2, u64::MAX),
            Err(ConfigurationError::InvalidBounds(_))
        ));
        let value = prime(&mut rng, PRIME_MAX - 4, PRIME_MAX).expect("prime near the cap");
        assert_eq!(value, 4_294_967_291);
    }

    #[test]
    fn unique_sequence_spans_the_full_i64_range() {
        let mut rng = rng();
        let values = unique_sequence(&mut rng, i64::MIN, i64::MAX, 3).expect("fits the range");
        assert_eq!(values.len(), 3);
        let distinct: HashSet<i64> = values.iter().copied().collect();
        assert_eq!(distinct.len(), 3);
        assert_eq!(unique_sequence(&mut rng, i64::MIN, i64::MAX, 0), Ok(Vec::new()));
    }

    #[test]
    fn nudge_stays_in_range_at_the_top() {
        assert_eq!(nudge(3), 4);
        assert_eq!(nudge(i64::MAX), i64::MAX - 1);
    }

    #[test]
    fn complex_display() {
        let value = Complex {
            real: 1.5,
            imaginary: -2.0,
        };
        assert_eq!(value.to_string(), "1.5 - 2i");
    }
}
