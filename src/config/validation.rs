//! Configuration validation

use super::models::*;
use crate::endpoint::AdditionalHealthEndpointPath;
use std::collections::HashSet;
use tracing::debug;

/// Validation trait for configuration structures
pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}

impl Validate for HealthEndpointProperties {
    fn validate(&self) -> Result<(), String> {
        debug!("Validating health endpoint configuration");

        self.status.validate()?;

        let mut additional_paths = HashSet::new();
        for (name, group) in &self.group {
            if name.trim().is_empty() {
                return Err("Health group name cannot be empty".to_string());
            }
            if name.contains('/') {
                return Err(format!("Health group name '{}' must not contain '/'", name));
            }
            group
                .validate()
                .map_err(|e| format!("Health group '{}': {}", name, e))?;
            if let Some(path) = &group.additional_path {
                let path = AdditionalHealthEndpointPath::parse(path).map_err(|e| e.to_string())?;
                if !additional_paths.insert(path.clone()) {
                    return Err(format!(
                        "Additional path '{}' is used by more than one health group",
                        path
                    ));
                }
            }
        }

        Ok(())
    }
}

impl Validate for GroupProperties {
    fn validate(&self) -> Result<(), String> {
        let names = self.include.iter().flatten().chain(&self.exclude);
        for name in names {
            if name.trim().is_empty() {
                return Err("Member names cannot be empty".to_string());
            }
        }

        if let Some(path) = &self.additional_path {
            AdditionalHealthEndpointPath::parse(path).map_err(|e| e.to_string())?;
        }

        if let Some(status) = &self.status {
            status.validate()?;
        }

        Ok(())
    }
}

impl Validate for StatusProperties {
    fn validate(&self) -> Result<(), String> {
        for code in &self.order {
            if code.trim().is_empty() {
                return Err("Status order cannot contain an empty code".to_string());
            }
        }

        for (code, http) in &self.http_mapping {
            if code.trim().is_empty() {
                return Err("HTTP mapping cannot contain an empty status code".to_string());
            }
            if !(100..=599).contains(http) {
                return Err(format!(
                    "HTTP mapping for '{}' must be between 100 and 599, got {}",
                    code, http
                ));
            }
        }

        Ok(())
    }
}
