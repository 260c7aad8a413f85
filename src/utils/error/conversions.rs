//! Type conversions for HealthError

use super::types::HealthError;

impl From<tokio::task::JoinError> for HealthError {
    fn from(err: tokio::task::JoinError) -> Self {
        if err.is_panic() {
            HealthError::Join("health check panicked".to_string())
        } else {
            HealthError::Join(err.to_string())
        }
    }
}
