//! Helper functions for creating specific error types

use super::types::HealthError;

/// Helper functions for creating specific errors
impl HealthError {
    pub fn contributor<S: Into<String>>(message: S) -> Self {
        Self::Contributor(message.into())
    }

    pub fn invalid_name<S: Into<String>>(message: S) -> Self {
        Self::InvalidName(message.into())
    }

    pub fn duplicate_contributor<S: Into<String>>(name: S) -> Self {
        Self::DuplicateContributor(name.into())
    }

    pub fn invalid_status<S: Into<String>>(message: S) -> Self {
        Self::InvalidStatus(message.into())
    }

    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation(message.into())
    }

    /// Whether the error was raised by a contributor rather than by setup
    pub fn is_contributor_failure(&self) -> bool {
        matches!(self, Self::Contributor(_) | Self::Join(_))
    }
}
