mod logging;

pub use logging::init_logging;

use std::path::Path;

use qanexus_generate::GeneratorDefaults;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// File read when `--config` is not given, if present in the working directory.
pub const DEFAULT_SETTINGS_FILE: &str = "qanexus.toml";

/// Settings-level errors.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid settings file: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("logging error: {0}")]
    Logging(String),
}

pub type SettingsResult<T> = std::result::Result<T, SettingsError>;

/// Contents of `qanexus.toml`. Command-line flags take precedence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub seed: Option<u64>,
    pub count: Option<usize>,
    pub json: bool,
    pub color: Option<bool>,
    pub defaults: DefaultsSettings,
}

/// Overrides for [`GeneratorDefaults`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DefaultsSettings {
    pub string_length: Option<usize>,
    pub email_domain: Option<String>,
    pub email_username_length: Option<usize>,
    pub country: Option<String>,
}

impl Settings {
    pub fn generator_defaults(&self) -> GeneratorDefaults {
        let base = GeneratorDefaults::default();
        let overrides = &self.defaults;
        GeneratorDefaults {
            string_length: overrides.string_length.unwrap_or(base.string_length),
            email_domain: overrides
                .email_domain
                .clone()
                .unwrap_or(base.email_domain),
            email_username_length: overrides
                .email_username_length
                .unwrap_or(base.email_username_length),
            country: overrides.country.clone().unwrap_or(base.country),
        }
    }
}

pub fn parse_settings(content: &str) -> SettingsResult<Settings> {
    Ok(toml::from_str(content)?)
}

/// Loads `path`, or [`DEFAULT_SETTINGS_FILE`] when it exists, or defaults.
pub fn load_settings(path: Option<&Path>) -> SettingsResult<Settings> {
    let path = match path {
        Some(path) => path,
        None => {
            let fallback = Path::new(DEFAULT_SETTINGS_FILE);
            if !fallback.exists() {
                return Ok(Settings::default());
            }
            fallback
        }
    };
    let content = std::fs::read_to_string(path)?;
    let settings = parse_settings(&content)?;
    tracing::debug!(path = %path.display(), "settings loaded");
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_file() {
        let settings = parse_settings(
            r#"
seed = 7
count = 3
json = true
color = false

[defaults]
email_domain = "qa.example.com"
country = "US"
"#,
        )
        .expect("valid settings");

        assert_eq!(settings.seed, Some(7));
        assert_eq!(settings.count, Some(3));
        assert!(settings.json);
        assert_eq!(settings.color, Some(false));

        let defaults = settings.generator_defaults();
        assert_eq!(defaults.email_domain, "qa.example.com");
        assert_eq!(defaults.country, "US");
        assert_eq!(defaults.string_length, 10);
    }

    #[test]
    fn empty_file_is_default() {
        assert_eq!(parse_settings("").expect("empty"), Settings::default());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(matches!(
            parse_settings("colour = true"),
            Err(SettingsError::Toml(_))
        ));
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let result = load_settings(Some(Path::new("/nonexistent/qanexus.toml")));
        assert!(matches!(result, Err(SettingsError::Io(_))));
    }
}
