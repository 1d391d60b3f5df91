use std::fmt;
use std::str::FromStr;

use rand::{CryptoRng, Rng, RngCore};
use serde_json::Value;

use crate::errors::ConfigurationError;
use crate::generators::primitives;
use crate::generators::{GeneratedValue, Generator, GeneratorContext, GeneratorRegistry};
use crate::params::{ParamKind, ParamSpec, validate_params};
use crate::source::DataGenerator;

const PATTERN_MAX_REPEAT: u32 = 32;

/// `{username}@{domain}` with a random username of `username_length`
/// characters. A leading `@` on `domain` is ignored.
pub fn email<G: Rng + ?Sized>(rng: &mut G, domain: &str, username_length: usize) -> String {
    let username = primitives::string(rng, username_length);
    format!("{username}@{}", domain.trim_start_matches('@'))
}

/// Random string matching `pattern`.
pub fn from_pattern<G: Rng + ?Sized>(
    rng: &mut G,
    pattern: &str,
) -> Result<String, ConfigurationError> {
    let regex = rand_regex::Regex::compile(pattern, PATTERN_MAX_REPEAT)
        .map_err(|err| ConfigurationError::InvalidPattern(format!("{pattern}: {err}")))?;
    Ok(rng.sample::<String, _>(&regex))
}

/// Phone number matching the pattern registered for `country_code`.
pub fn phone<G: Rng + ?Sized>(
    rng: &mut G,
    country_code: &str,
) -> Result<String, ConfigurationError> {
    let pattern = qanexus_core::phone_pattern(country_code)?;
    from_pattern(rng, pattern)
}

/// Field kinds that [`DataGenerator::generate_from_format`] can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldFormat {
    Email,
    Phone,
}

impl fmt::Display for FieldFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FieldFormat::Email => "email",
            FieldFormat::Phone => "phone",
        })
    }
}

impl FromStr for FieldFormat {
    type Err = ConfigurationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "email" => Ok(FieldFormat::Email),
            "phone" => Ok(FieldFormat::Phone),
            _ => Err(ConfigurationError::InvalidParams(format!(
                "unknown field format: {value}"
            ))),
        }
    }
}

impl<S, R> DataGenerator<S, R>
where
    S: CryptoRng,
    R: RngCore,
{
    /// Email address; `None` arguments fall back to the configured defaults.
    pub fn generate_email(
        &mut self,
        domain: Option<&str>,
        username_length: Option<usize>,
    ) -> String {
        let domain = domain.unwrap_or(self.defaults.domain()).to_string();
        let length = username_length.unwrap_or(self.defaults.email_username_length);
        email(&mut self.secure, &domain, length)
    }

    /// Phone number for `country_code`, or the configured default country.
    pub fn generate_phone_number(
        &mut self,
        country_code: Option<&str>,
    ) -> Result<String, ConfigurationError> {
        let country = country_code.unwrap_or(&self.defaults.country).to_string();
        phone(&mut self.sampler, &country)
    }

    pub fn generate_from_format(
        &mut self,
        format: FieldFormat,
    ) -> Result<String, ConfigurationError> {
        match format {
            FieldFormat::Email => Ok(self.generate_email(None, None)),
            FieldFormat::Phone => self.generate_phone_number(None),
        }
    }
}

const EMAIL_PARAMS: &[ParamSpec] = &[
    ParamSpec::new("domain", ParamKind::String, false),
    ParamSpec::new("username_length", ParamKind::Int, false),
];

const PHONE_PARAMS: &[ParamSpec] = &[ParamSpec::new("country", ParamKind::String, false)];

const PATTERN_PARAMS: &[ParamSpec] = &[ParamSpec::new("pattern", ParamKind::String, true)];

pub fn register(registry: &mut GeneratorRegistry) {
    registry.register_generator(Box::new(EmailGenerator));
    registry.register_generator(Box::new(PhoneGenerator));
    registry.register_generator(Box::new(PatternGenerator));
}

struct EmailGenerator;

impl Generator for EmailGenerator {
    fn id(&self) -> &'static str {
        "semantic.email"
    }

    fn description(&self) -> &'static str {
        "random username at the given domain"
    }

    fn params(&self) -> &'static [ParamSpec] {
        EMAIL_PARAMS
    }

    fn generate(
        &self,
        ctx: &mut GeneratorContext<'_>,
        params: Option<&Value>,
    ) -> Result<GeneratedValue, ConfigurationError> {
        let params = validate_params(params, EMAIL_PARAMS, "semantic.email")?;
        let domain = params.get_str("domain").unwrap_or(ctx.defaults.domain());
        let length = match params.get_i64("username_length") {
            Some(_) => params.get_usize("username_length").ok_or_else(|| {
                ConfigurationError::InvalidParams(
                    "semantic.email username_length must be >= 0".to_string(),
                )
            })?,
            None => ctx.defaults.email_username_length,
        };
        Ok(GeneratedValue::Text(email(&mut *ctx.secure, domain, length)))
    }
}

struct PhoneGenerator;

impl Generator for PhoneGenerator {
    fn id(&self) -> &'static str {
        "semantic.phone"
    }

    fn description(&self) -> &'static str {
        "phone number matching the country's pattern"
    }

    fn params(&self) -> &'static [ParamSpec] {
        PHONE_PARAMS
    }

    fn generate(
        &self,
        ctx: &mut GeneratorContext<'_>,
        params: Option<&Value>,
    ) -> Result<GeneratedValue, ConfigurationError> {
        let params = validate_params(params, PHONE_PARAMS, "semantic.phone")?;
        let country = params
            .get_str("country")
            .unwrap_or(ctx.defaults.country.as_str());
        Ok(GeneratedValue::Text(phone(&mut *ctx.sampler, country)?))
    }
}

struct PatternGenerator;

impl Generator for PatternGenerator {
    fn id(&self) -> &'static str {
        "semantic.pattern"
    }

    fn description(&self) -> &'static str {
        "string matching a regular expression"
    }

    fn params(&self) -> &'static [ParamSpec] {
        PATTERN_PARAMS
    }

    fn generate(
        &self,
        ctx: &mut GeneratorContext<'_>,
        params: Option<&Value>,
    ) -> Result<GeneratedValue, ConfigurationError> {
        let params = validate_params(params, PATTERN_PARAMS, "semantic.pattern")?;
        let pattern = params.get_str("pattern").unwrap_or_default();
        Ok(GeneratedValue::Text(from_pattern(&mut *ctx.sampler, pattern)?))
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    #[test]
    fn email_uses_requested_shape() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let value = email(&mut rng, "@example.org", 6);
        let (user, domain) = value.split_once('@').unwrap_or_default();
        assert_eq!(user.len(), 6);
        assert_eq!(domain, "example.org");
    }

    #[test]
    fn field_format_parses_case_insensitively() {
        assert_eq!("Email".parse::<FieldFormat>(), Ok(FieldFormat::Email));
        assert_eq!("phone".parse::<FieldFormat>(), Ok(FieldFormat::Phone));
        assert!("fax".parse::<FieldFormat>().is_err());
    }

    #[test]
    fn bad_pattern_is_a_configuration_error() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        assert!(matches!(
            from_pattern(&mut rng, "("),
            Err(ConfigurationError::InvalidPattern(_))
        ));
    }
}
