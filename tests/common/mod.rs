//! Common test utilities for health-rollup
//!
//! - Contributor, registry and group factories
//! - Assertions over aggregated results

pub mod assertions;

// Re-export commonly used items
pub use assertions::{component, component_names, group_names};
pub use fixtures::{ContributorFactory, GroupsFactory, ReactiveContributorFactory};

/// Path addressing the root of the primary group
pub const ROOT: &[&str] = &[];
