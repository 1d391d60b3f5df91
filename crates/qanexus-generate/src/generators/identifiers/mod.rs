use std::fmt;
use std::str::FromStr;

use rand::{CryptoRng, Rng, RngCore};
use serde_json::Value;
use uuid::{Builder, Uuid};

use crate::errors::ConfigurationError;
use crate::generators::{GeneratedValue, Generator, GeneratorContext, GeneratorRegistry};
use crate::params::{ParamKind, ParamSpec, validate_params};
use crate::source::DataGenerator;

/// Supported UUID layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum UuidVersion {
    /// Time-based.
    V1,
    /// Name-based, MD5.
    V3,
    /// Random.
    #[default]
    V4,
    /// Name-based, SHA-1.
    V5,
}

impl UuidVersion {
    pub fn as_str(self) -> &'static str {
        match self {
            UuidVersion::V1 => "v1",
            UuidVersion::V3 => "v3",
            UuidVersion::V4 => "v4",
            UuidVersion::V5 => "v5",
        }
    }

    /// v3 and v5 hash a name within a namespace.
    pub fn is_name_based(self) -> bool {
        matches!(self, UuidVersion::V3 | UuidVersion::V5)
    }
}

impl fmt::Display for UuidVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UuidVersion {
    type Err = ConfigurationError;

    /// Accepts `v4`, `V4` and `4` (likewise for 1, 3 and 5).
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let digits = value
            .strip_prefix('v')
            .or_else(|| value.strip_prefix('V'))
            .unwrap_or(value);
        match digits {
            "1" => Ok(UuidVersion::V1),
            "3" => Ok(UuidVersion::V3),
            "4" => Ok(UuidVersion::V4),
            "5" => Ok(UuidVersion::V5),
            _ => Err(ConfigurationError::UnsupportedUuidVersion(value.to_string())),
        }
    }
}

/// Resolves a namespace given as a UUID or as `dns`, `url`, `oid` or `x500`.
pub fn namespace(value: &str) -> Result<Uuid, ConfigurationError> {
    match value.to_ascii_lowercase().as_str() {
        "dns" => Ok(Uuid::NAMESPACE_DNS),
        "url" => Ok(Uuid::NAMESPACE_URL),
        "oid" => Ok(Uuid::NAMESPACE_OID),
        "x500" => Ok(Uuid::NAMESPACE_X500),
        _ => Uuid::parse_str(value)
            .map_err(|_| ConfigurationError::InvalidNamespace(value.to_string())),
    }
}

pub fn uuid_v4<G: Rng + ?Sized>(rng: &mut G) -> Uuid {
    let mut bytes = [0_u8; 16];
    rng.fill_bytes(&mut bytes);
    Builder::from_random_bytes(bytes).into_uuid()
}

/// Time-based UUID with a random node id.
pub fn uuid_v1<G: Rng + ?Sized>(rng: &mut G) -> Uuid {
    let mut node = [0_u8; 6];
    rng.fill_bytes(&mut node);
    Uuid::now_v1(&node)
}

/// UUID of `version`. Name-based versions require a non-empty `name` and
/// `namespace`; the other versions ignore them.
pub fn uuid<G: Rng + ?Sized>(
    rng: &mut G,
    version: UuidVersion,
    name: Option<&str>,
    namespace_value: Option<&str>,
) -> Result<Uuid, ConfigurationError> {
    if !version.is_name_based() {
        return Ok(match version {
            UuidVersion::V1 => uuid_v1(rng),
            _ => uuid_v4(rng),
        });
    }

    let (Some(name), Some(namespace_value)) = (
        name.filter(|name| !name.is_empty()),
        namespace_value.filter(|value| !value.is_empty()),
    ) else {
        return Err(ConfigurationError::MissingUuidInput(version.as_str()));
    };
    let ns = namespace(namespace_value)?;
    Ok(if version == UuidVersion::V3 {
        Uuid::new_v3(&ns, name.as_bytes())
    } else {
        Uuid::new_v5(&ns, name.as_bytes())
    })
}

impl<S, R> DataGenerator<S, R>
where
    S: CryptoRng,
    R: RngCore,
{
    /// Hyphenated lowercase UUID; `None` means a random (v4) UUID.
    pub fn generate_uuid(
        &mut self,
        version: Option<UuidVersion>,
        name: Option<&str>,
        namespace: Option<&str>,
    ) -> Result<String, ConfigurationError> {
        let version = version.unwrap_or_default();
        uuid(&mut self.secure, version, name, namespace).map(|value| value.to_string())
    }
}

const UUID_PARAMS: &[ParamSpec] = &[
    ParamSpec::new("version", ParamKind::String, false),
    ParamSpec::new("name", ParamKind::String, false),
    ParamSpec::new("namespace", ParamKind::String, false),
];

pub fn register(registry: &mut GeneratorRegistry) {
    registry.register_generator(Box::new(UuidGenerator));
}

struct UuidGenerator;

impl Generator for UuidGenerator {
    fn id(&self) -> &'static str {
        "identifier.uuid"
    }

    fn description(&self) -> &'static str {
        "UUID v1, v3, v4 or v5 (v3/v5 need name and namespace)"
    }

    fn params(&self) -> &'static [ParamSpec] {
        UUID_PARAMS
    }

    fn generate(
        &self,
        ctx: &mut GeneratorContext<'_>,
        params: Option<&Value>,
    ) -> Result<GeneratedValue, ConfigurationError> {
        let params = validate_params(params, UUID_PARAMS, "identifier.uuid")?;
        let version = params
            .get_str("version")
            .map(UuidVersion::from_str)
            .transpose()?
            .unwrap_or_default();
        let value = uuid(
            &mut *ctx.secure,
            version,
            params.get_str("name"),
            params.get_str("namespace"),
        )?;
        Ok(GeneratedValue::Text(value.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    #[test]
    fn version_tags_parse() {
        assert_eq!("v4".parse::<UuidVersion>(), Ok(UuidVersion::V4));
        assert_eq!("V1".parse::<UuidVersion>(), Ok(UuidVersion::V1));
        assert_eq!("5".parse::<UuidVersion>(), Ok(UuidVersion::V5));
        assert_eq!(
            "v2".parse::<UuidVersion>(),
            Err(ConfigurationError::UnsupportedUuidVersion("v2".to_string()))
        );
    }

    #[test]
    fn namespace_aliases_and_literals() {
        assert_eq!(namespace("DNS"), Ok(Uuid::NAMESPACE_DNS));
        assert_eq!(
            namespace("6ba7b811-9dad-11d1-80b4-00c04fd430c8"),
            Ok(Uuid::NAMESPACE_URL)
        );
        assert!(matches!(
            namespace("nowhere"),
            Err(ConfigurationError::InvalidNamespace(_))
        ));
    }

    #[test]
    fn time_based_uuid_reports_version_one() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert_eq!(uuid_v1(&mut rng).get_version_num(), 1);
    }

    #[test]
    fn empty_name_or_namespace_counts_as_missing() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert_eq!(
            uuid(&mut rng, UuidVersion::V5, Some(""), Some("dns")),
            Err(ConfigurationError::MissingUuidInput("v5"))
        );
        assert_eq!(
            uuid(&mut rng, UuidVersion::V3, Some(""), Some("")),
            Err(ConfigurationError::MissingUuidInput("v3"))
        );
        assert_eq!(
            uuid(&mut rng, UuidVersion::V3, Some("qa"), Some("")),
            Err(ConfigurationError::MissingUuidInput("v3"))
        );
        assert!(uuid(&mut rng, UuidVersion::V4, Some(""), None).is_ok());
    }

    #[test]
    fn only_v3_and_v5_are_name_based() {
        assert!(UuidVersion::V3.is_name_based());
        assert!(UuidVersion::V5.is_name_based());
        assert!(!UuidVersion::V1.is_name_based());
        assert!(!UuidVersion::V4.is_name_based());
    }
}
