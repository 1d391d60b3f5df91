use rand::{CryptoRng, Rng, RngCore};
use serde_json::Value;

use crate::errors::ConfigurationError;
use crate::generators::{GeneratedValue, Generator, GeneratorContext, GeneratorRegistry};
use crate::params::validate_params;
use crate::source::DataGenerator;

pub fn ipv4<G: Rng + ?Sized>(rng: &mut G) -> String {
    let octets: [u8; 4] = rng.random();
    format!("{}.{}.{}.{}", octets[0], octets[1], octets[2], octets[3])
}

/// Eight colon-separated groups of four uppercase hex digits.
pub fn ipv6<G: Rng + ?Sized>(rng: &mut G) -> String {
    (0..8)
        .map(|_| format!("{:04X}", rng.random::<u16>()))
        .collect::<Vec<_>>()
        .join(":")
}

/// Six colon-separated pairs of uppercase hex digits.
pub fn mac<G: Rng + ?Sized>(rng: &mut G) -> String {
    (0..6)
        .map(|_| format!("{:02X}", rng.random::<u8>()))
        .collect::<Vec<_>>()
        .join(":")
}

/// `#RRGGBB`, uppercase.
pub fn hex_color<G: Rng + ?Sized>(rng: &mut G) -> String {
    format!("#{:06X}", rng.random_range(0..=0x00FF_FFFF_u32))
}

impl<S, R> DataGenerator<S, R>
where
    S: CryptoRng,
    R: RngCore,
{
    pub fn generate_ip_address(&mut self) -> String {
        ipv4(&mut self.sampler)
    }

    pub fn generate_ipv6_address(&mut self) -> String {
        ipv6(&mut self.sampler)
    }

    pub fn generate_mac_address(&mut self) -> String {
        mac(&mut self.sampler)
    }

    pub fn generate_hex_color(&mut self) -> String {
        hex_color(&mut self.sampler)
    }
}

pub fn register(registry: &mut GeneratorRegistry) {
    for kind in [
        AddressKind::Ipv4,
        AddressKind::Ipv6,
        AddressKind::Mac,
        AddressKind::HexColor,
    ] {
        registry.register_generator(Box::new(AddressGenerator { kind }));
    }
}

#[derive(Clone, Copy)]
enum AddressKind {
    Ipv4,
    Ipv6,
    Mac,
    HexColor,
}

struct AddressGenerator {
    kind: AddressKind,
}

impl Generator for AddressGenerator {
    fn id(&self) -> &'static str {
        match self.kind {
            AddressKind::Ipv4 => "network.ipv4",
            AddressKind::Ipv6 => "network.ipv6",
            AddressKind::Mac => "network.mac",
            AddressKind::HexColor => "network.hex_color",
        }
    }

    fn description(&self) -> &'static str {
        match self.kind {
            AddressKind::Ipv4 => "dotted-decimal IPv4 address",
            AddressKind::Ipv6 => "IPv6 address with 8 uppercase hex groups",
            AddressKind::Mac => "MAC address with 6 uppercase hex pairs",
            AddressKind::HexColor => "#RRGGBB color",
        }
    }

    fn generate(
        &self,
        ctx: &mut GeneratorContext<'_>,
        params: Option<&Value>,
    ) -> Result<GeneratedValue, ConfigurationError> {
        validate_params(params, &[], self.id())?;
        let rng = &mut *ctx.sampler;
        let text = match self.kind {
            AddressKind::Ipv4 => ipv4(rng),
            AddressKind::Ipv6 => ipv6(rng),
            AddressKind::Mac => mac(rng),
            AddressKind::HexColor => hex_color(rng),
        };
        Ok(GeneratedValue::Text(text))
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use regex::Regex;

    use super::*;

    fn matches(pattern: &str, value: &str) -> bool {
        Regex::new(pattern).is_ok_and(|re| re.is_match(value))
    }

    #[test]
    fn address_shapes() {
        let mut rng = ChaCha8Rng::seed_from_u64(21);
        for _ in 0..200 {
            let v4 = ipv4(&mut rng);
            assert!(v4.split('.').all(|part| part.parse::<u8>().is_ok()), "{v4}");
            assert_eq!(v4.split('.').count(), 4);
            assert!(matches(r"^([0-9A-F]{4}:){7}[0-9A-F]{4}$", &ipv6(&mut rng)));
            assert!(matches(r"^([0-9A-F]{2}:){5}[0-9A-F]{2}$", &mac(&mut rng)));
            assert!(matches(r"^#[0-9A-F]{6}$", &hex_color(&mut rng)));
        }
    }
}
