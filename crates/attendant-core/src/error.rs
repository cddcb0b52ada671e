use thiserror::Error;

/// Top-level error type for the Attendant system.
///
/// Subsystem crates define their own error types and convert into
/// `AttendantError` where they cross crate boundaries, so the `?` operator
/// works seamlessly.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AttendantError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<toml::de::Error> for AttendantError {
    fn from(err: toml::de::Error) -> Self {
        AttendantError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for AttendantError {
    fn from(err: toml::ser::Error) -> Self {
        AttendantError::Config(err.to_string())
    }
}

/// A specialized `Result` type for Attendant operations.
pub type Result<T> = std::result::Result<T, AttendantError>;
