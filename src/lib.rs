//! # health-rollup
//!
//! Hierarchical health aggregation with group-scoped visibility.
//!
//! Contributors form a tree: leaves compute a [`Health`] and composites own
//! named children. A request addresses a group and a path into that tree;
//! the endpoint resolves the path, evaluates the leaves the group admits,
//! and folds their statuses into one result.
//!
//! ## Features
//!
//! - **Blocking and reactive trees**: one traversal serves both
//! - **Groups**: membership, visibility policy, status ordering and HTTP mapping per group
//! - **Copy-on-write registry**: contributors can be registered at any time
//! - **Slow contributor logging** through `tracing`
//! - **YAML configuration** for groups and endpoint defaults
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use health_rollup::{
//!     ApiVersion, Config, Health, HealthContributor, HealthContributorRegistry,
//!     HealthEndpointWebExtension, Result, SecurityContext,
//! };
//! use std::sync::Arc;
//!
//! fn main() -> Result<()> {
//!     let registry = Arc::new(HealthContributorRegistry::new());
//!     registry.register(
//!         "db",
//!         HealthContributor::indicator(|| -> Result<Health> { Ok(Health::up().build()) }),
//!     )?;
//!
//!     let config = Config::from_yaml_str("health:\n  show_details: always\n")?;
//!     let groups = Arc::new(config.health().build_groups()?);
//!     let endpoint = HealthEndpointWebExtension::new(
//!         registry,
//!         groups,
//!         config.health().slow_indicator_threshold(),
//!     );
//!
//!     let no_path: &[&str] = &[];
//!     let response =
//!         endpoint.health(ApiVersion::V3, None, &SecurityContext::none(), false, no_path)?;
//!     println!("{}: {:?}", response.status(), response.body());
//!     Ok(())
//! }
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod config;
pub mod contributor;
pub mod endpoint;
pub mod health;
pub mod registry;
pub mod utils;

// Re-export main types
pub use config::Config;
pub use utils::error::{HealthError, Result};

pub use contributor::{
    ContributorMap, HealthContributor, HealthIndicator, ReactiveHealthContributor,
    ReactiveHealthIndicator,
};
pub use endpoint::{
    AdditionalHealthEndpointPath, DefaultHealthEndpointGroup, DefaultHealthEndpointGroups,
    EndpointResponse, HealthEndpoint, HealthEndpointGroup, HealthEndpointGroups,
    HealthEndpointSupport, HealthEndpointWebExtension, HealthResult,
    IncludeExcludeMemberPredicate, ReactiveHealthEndpointWebExtension, SecurityContext, Show,
    WebServerNamespace,
};
pub use health::{
    ApiVersion, CompositeHealth, ContributedHealth, Health, HttpCodeStatusMapper,
    SimpleHttpCodeStatusMapper, SimpleStatusAggregator, Status, StatusAggregator,
};
pub use registry::{HealthContributorRegistry, ReactiveHealthContributorRegistry};

// Version information
/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
