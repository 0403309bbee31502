use thiserror::Error;

/// Errors produced when parsing core identifiers from text.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("Unknown weather name: {0}")]
    UnknownWeather(String),

    #[error("Unknown region name: {0}")]
    UnknownRegion(String),

    #[error("Invalid time bucket '{0}' (expected HH:MM)")]
    InvalidTimeBucket(String),
}
