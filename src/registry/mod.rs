//! Contributor registries
//!
//! This module provides the name → contributor stores the health endpoint
//! reads its tree from, together with name validation and generation.

mod name_generator;
mod registry;


// Re-export public types
pub use name_generator::NameGenerator;
pub use registry::{
    HealthContributorRegistry, NameValidator, ReactiveHealthContributorRegistry, Registry,
};
