use thiserror::Error;

/// Raised when a generator receives invalid or insufficient parameters.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    #[error("invalid country code: {0}")]
    UnknownCountry(String),
    #[error("invalid date format: {0}")]
    UnsupportedDateFormat(String),
    #[error("unsupported UUID type: {0}")]
    UnsupportedUuidVersion(String),
    #[error("namespace and name must be provided for UUID {0}")]
    MissingUuidInput(&'static str),
    #[error("invalid UUID namespace: {0}")]
    InvalidNamespace(String),
    #[error("sequence length {requested} exceeds the range size {available}")]
    SequenceTooLong { requested: usize, available: u64 },
    #[error("invalid bounds: {0}")]
    InvalidBounds(String),
    #[error("cannot choose from an empty set")]
    EmptyChoices,
    #[error("invalid probabilities: {0}")]
    InvalidProbabilities(String),
    #[error("invalid params: {0}")]
    InvalidParams(String),
    #[error("unknown generator: {0}")]
    UnknownGenerator(String),
    #[error("invalid pattern: {0}")]
    InvalidPattern(String),
}

impl From<qanexus_core::Error> for ConfigurationError {
    fn from(err: qanexus_core::Error) -> Self {
        match err {
            qanexus_core::Error::UnknownCountry(code) => ConfigurationError::UnknownCountry(code),
            qanexus_core::Error::UnsupportedFormat(format) => {
                ConfigurationError::UnsupportedDateFormat(format)
            }
            qanexus_core::Error::Parse { value, format } => ConfigurationError::InvalidParams(
                format!("'{value}' does not match format '{format}'"),
            ),
        }
    }
}
