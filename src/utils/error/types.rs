//! Error types for the health engine

use thiserror::Error;

/// Result type alias for the health engine
pub type Result<T> = std::result::Result<T, HealthError>;

/// Main error type for the health engine
///
/// "Not found" and "hidden by group policy" are not errors: lookups report
/// them as `Ok(None)`. Everything here is either a construction-time
/// failure or an evaluation failure raised by a contributor.
#[derive(Error, Debug)]
pub enum HealthError {
    /// A health contributor failed while computing its health
    #[error("Health contributor error: {0}")]
    Contributor(String),

    /// Contributor or group name rejected
    #[error("Invalid name: {0}")]
    InvalidName(String),

    /// A contributor with the same name is already registered
    #[error("A contributor named \"{0}\" has already been registered")]
    DuplicateContributor(String),

    /// Invalid status code
    #[error("Invalid status: {0}")]
    InvalidStatus(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A blocking health check task could not be joined
    #[error("Blocking task failed: {0}")]
    Join(String),
}
