//! Environment overrides

use super::models::HealthEndpointProperties;
use crate::endpoint::Show;
use crate::utils::error::{HealthError, Result};
use std::env;
use tracing::debug;

impl HealthEndpointProperties {
    /// Apply `HEALTH_*` environment variables
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_env_from(|key| env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable source
    ///
    /// Recognised variables: `HEALTH_SHOW_DETAILS`, `HEALTH_SHOW_COMPONENTS`,
    /// `HEALTH_ROLES` (comma separated) and
    /// `HEALTH_SLOW_INDICATOR_THRESHOLD_MS`.
    pub fn apply_env_from<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(show) = lookup("HEALTH_SHOW_DETAILS") {
            self.show_details = parse_show("HEALTH_SHOW_DETAILS", &show)?;
        }
        if let Some(show) = lookup("HEALTH_SHOW_COMPONENTS") {
            self.show_components = Some(parse_show("HEALTH_SHOW_COMPONENTS", &show)?);
        }
        if let Some(roles) = lookup("HEALTH_ROLES") {
            self.roles = roles
                .split(',')
                .map(str::trim)
                .filter(|role| !role.is_empty())
                .map(String::from)
                .collect();
        }
        if let Some(threshold) = lookup("HEALTH_SLOW_INDICATOR_THRESHOLD_MS") {
            self.slow_indicator_threshold_ms = threshold.trim().parse().map_err(|e| {
                HealthError::Config(format!("Invalid slow indicator threshold: {}", e))
            })?;
        }
        debug!("Applied environment overrides");
        Ok(())
    }
}

fn parse_show(key: &str, value: &str) -> Result<Show> {
    match value.trim().to_ascii_lowercase().replace('-', "_").as_str() {
        "never" => Ok(Show::Never),
        "when_authorized" => Ok(Show::WhenAuthorized),
        "always" => Ok(Show::Always),
        other => Err(HealthError::Config(format!(
            "Invalid value '{}' for {}",
            other, key
        ))),
    }
}
