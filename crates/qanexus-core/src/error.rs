use thiserror::Error;

/// Lookup and parsing failures raised by the reference tables.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The format string is not one of the recognised date patterns.
    #[error("invalid date format: {0}")]
    UnsupportedFormat(String),
    /// No phone pattern is registered for the country code.
    #[error("invalid country code: {0}")]
    UnknownCountry(String),
    /// A value could not be parsed with the given format.
    #[error("'{value}' does not match format '{format}'")]
    Parse { value: String, format: String },
}

/// Convenience alias for results returned by the reference tables.
pub type Result<T> = std::result::Result<T, Error>;
