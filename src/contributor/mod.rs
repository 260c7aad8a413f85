//! Health contributors
//!
//! A contributor is either a leaf indicator that computes a [`Health`] or a
//! composite that owns named child contributors. Two parallel hierarchies
//! exist: blocking contributors evaluated on the calling thread and reactive
//! contributors evaluated as futures.
//!
//! [`Health`]: crate::health::Health

mod adapter;
mod blocking;
mod map;
mod reactive;


// Re-export public types
pub use blocking::{HealthContributor, HealthIndicator};
pub use map::{ContributorEntry, ContributorMap, Contributors, validate_name};
pub use reactive::{ReactiveHealthContributor, ReactiveHealthIndicator};
