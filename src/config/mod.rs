//! Configuration for the health endpoint
//!
//! This module handles loading, validation, and conversion of the health
//! endpoint properties into groups.

pub mod builder;
pub mod loader;
pub mod models;
pub mod validation;


pub use models::*;
pub use validation::Validate;

use crate::utils::error::{HealthError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// Root configuration document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Health endpoint properties
    #[serde(default)]
    pub health: HealthEndpointProperties,
}

impl Config {
    /// Load configuration from a YAML file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| HealthError::Config(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_yaml_str(&content)?;
        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Parse and validate configuration from a YAML string
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Default configuration overlaid with `HEALTH_*` environment variables
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");
        let mut config = Self::default();
        config.health.apply_env()?;
        config.validate()?;
        Ok(config)
    }

    #[inline]
    pub fn health(&self) -> &HealthEndpointProperties {
        &self.health
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");
        self.health
            .validate()
            .map_err(|e| HealthError::Config(format!("Health endpoint config error: {}", e)))
    }

    /// Convert to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}
