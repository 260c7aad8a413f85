//! Health endpoint
//!
//! Resolves a request path against the registered contributor tree, scopes
//! it to a group, and aggregates the reachable leaves into a single result.
//! The traversal is written once over [`EndpointContributor`] and serves
//! both blocking and reactive trees.

mod contributor;
mod group;
mod groups;
mod member;
mod path;
mod slow;
mod support;
mod web;


// Re-export public types
pub use contributor::{Blocking, Child, EndpointContributor, HealthFuture, Reactive};
pub use group::{DefaultHealthEndpointGroup, HealthEndpointGroup, SecurityContext, Show};
pub use groups::{
    AdditionalHealthEndpointPath, DefaultHealthEndpointGroups, HealthEndpointGroups,
    WebServerNamespace,
};
pub use member::{IncludeExcludeMemberPredicate, MemberPredicate};
pub use path::{group_relative_name, resolve};
pub use slow::{SlowIndicatorLogger, SlowIndicatorTimer, format_duration};
pub use support::{HealthEndpointSupport, HealthResult};
pub use web::{
    EndpointResponse, HealthEndpoint, HealthEndpointWebExtension,
    ReactiveHealthEndpointWebExtension, default_health,
};
