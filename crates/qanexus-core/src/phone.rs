use crate::error::{Error, Result};

/// Phone-number patterns keyed by ISO 3166-1 alpha-2 country code.
///
/// Patterns are unanchored and use explicit ASCII classes so they can drive
/// a regex-based string generator; callers anchor them when matching.
pub const PHONE_PATTERNS: &[(&str, &str)] = &[
    ("AR", r"\+54 9 [1-9][0-9] [0-9]{4}-[0-9]{4}"),
    ("AT", r"\+43 6[5-9][0-9] [0-9]{6,7}"),
    ("AU", r"\+61 4[0-9]{2} [0-9]{3} [0-9]{3}"),
    ("BE", r"\+32 4[5-9][0-9] [0-9]{2} [0-9]{2} [0-9]{2}"),
    ("BR", r"\+55 [1-9][0-9] 9[0-9]{4}-[0-9]{4}"),
    ("CA", r"\+1 [2-9][0-9]{2}-[2-9][0-9]{2}-[0-9]{4}"),
    ("CH", r"\+41 7[5-9] [0-9]{3} [0-9]{2} [0-9]{2}"),
    ("CL", r"\+56 9 [0-9]{4} [0-9]{4}"),
    ("CN", r"\+86 1[3-9][0-9] [0-9]{4} [0-9]{4}"),
    ("CO", r"\+57 3[0-9]{2} [0-9]{3} [0-9]{4}"),
    ("CZ", r"\+420 [67][0-9]{2} [0-9]{3} [0-9]{3}"),
    ("DE", r"\+49 1[5-7][0-9] [0-9]{7,8}"),
    ("DK", r"\+45 [2-9][0-9] [0-9]{2} [0-9]{2} [0-9]{2}"),
    ("DZ", r"\+213 [567][0-9]{2} [0-9]{2} [0-9]{2} [0-9]{2}"),
    ("EG", r"\+20 1[0125] [0-9]{4} [0-9]{4}"),
    ("ES", r"\+34 [67][0-9]{2} [0-9]{3} [0-9]{3}"),
    ("FI", r"\+358 4[0-9] [0-9]{3} [0-9]{4}"),
    ("FR", r"(\+33|0)[67][0-9]{8}"),
    ("GB", r"\+44 7[0-9]{3} [0-9]{6}"),
    ("GR", r"\+30 69[0-9] [0-9]{3} [0-9]{4}"),
    ("IE", r"\+353 8[35-9] [0-9]{3} [0-9]{4}"),
    ("IN", r"\+91 [6-9][0-9]{4} [0-9]{5}"),
    ("IT", r"\+39 3[0-9]{2} [0-9]{3} [0-9]{4}"),
    ("JP", r"\+81 [789]0-[0-9]{4}-[0-9]{4}"),
    ("KR", r"\+82 10-[0-9]{4}-[0-9]{4}"),
    ("MA", r"\+212 [67][0-9]{2}-[0-9]{6}"),
    ("MX", r"\+52 1 [0-9]{2} [0-9]{4} [0-9]{4}"),
    ("NG", r"\+234 [789][01][0-9] [0-9]{3} [0-9]{4}"),
    ("NL", r"\+31 6 [0-9]{8}"),
    ("NO", r"\+47 [49][0-9]{2} [0-9]{2} [0-9]{3}"),
    ("NZ", r"\+64 2[0-9] [0-9]{3} [0-9]{4}"),
    ("PL", r"\+48 [4-8][0-9]{2} [0-9]{3} [0-9]{3}"),
    ("PT", r"\+351 9[1236] [0-9]{3} [0-9]{4}"),
    ("RU", r"\+7 9[0-9]{2} [0-9]{3}-[0-9]{2}-[0-9]{2}"),
    ("SE", r"\+46 7[02369] [0-9]{3} [0-9]{2} [0-9]{2}"),
    ("TN", r"\+216 [2459][0-9] [0-9]{3} [0-9]{3}"),
    ("TR", r"\+90 5[0-9]{2} [0-9]{3} [0-9]{2} [0-9]{2}"),
    ("US", r"\+1 \([2-9][0-9]{2}\) [2-9][0-9]{2}-[0-9]{4}"),
    ("ZA", r"\+27 [678][0-9] [0-9]{3} [0-9]{4}"),
];

/// Returns the phone pattern registered for `country_code`.
pub fn phone_pattern(country_code: &str) -> Result<&'static str> {
    PHONE_PATTERNS
        .iter()
        .find(|(code, _)| *code == country_code)
        .map(|(_, pattern)| *pattern)
        .ok_or_else(|| Error::UnknownCountry(country_code.to_string()))
}

/// All country codes with a registered phone pattern.
pub fn country_codes() -> Vec<&'static str> {
    PHONE_PATTERNS.iter().map(|(code, _)| *code).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn country_codes_are_unique_and_sorted() {
        let codes = country_codes();
        let mut sorted = codes.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(codes, sorted);
    }

    #[test]
    fn unknown_country_is_rejected() {
        assert_eq!(
            phone_pattern("XX"),
            Err(Error::UnknownCountry("XX".to_string()))
        );
        assert!(phone_pattern("FR").is_ok());
    }
}
