//! Group-scoped health aggregation

use super::contributor::EndpointContributor;
use super::group::{HealthEndpointGroup, SecurityContext};
use super::groups::{AdditionalHealthEndpointPath, HealthEndpointGroups, WebServerNamespace};
use super::path::{child_name, group_relative_name, resolve};
use super::slow::SlowIndicatorLogger;
use crate::health::ApiVersion;
use crate::registry::Registry;
use crate::utils::error::Result;
use indexmap::IndexMap;
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Health together with the group that produced it
pub struct HealthResult<T> {
    health: T,
    group: Arc<dyn HealthEndpointGroup>,
}

impl<T> HealthResult<T> {
    pub fn new(health: T, group: Arc<dyn HealthEndpointGroup>) -> Self {
        Self { health, group }
    }

    #[inline]
    pub fn health(&self) -> &T {
        &self.health
    }

    #[inline]
    pub fn group(&self) -> &Arc<dyn HealthEndpointGroup> {
        &self.group
    }

    pub fn into_health(self) -> T {
        self.health
    }

    pub fn into_parts(self) -> (T, Arc<dyn HealthEndpointGroup>) {
        (self.health, self.group)
    }
}

impl<T: fmt::Debug> fmt::Debug for HealthResult<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HealthResult")
            .field("health", &self.health)
            .finish_non_exhaustive()
    }
}

/// Resolves group and path, then aggregates the addressed subtree
pub struct HealthEndpointSupport<C: EndpointContributor> {
    registry: Arc<Registry<C::Source>>,
    groups: Arc<dyn HealthEndpointGroups>,
    slow_indicator_logger: SlowIndicatorLogger,
}

/// Per-request settings shared by every level of the recursion
struct Scope<'a> {
    api_version: ApiVersion,
    group: &'a Arc<dyn HealthEndpointGroup>,
    show_components: bool,
    show_details: bool,
}

impl<C: EndpointContributor> HealthEndpointSupport<C> {
    /// Create the support
    ///
    /// `slow_indicator_threshold` enables the slow contributor warning.
    pub fn new(
        registry: Arc<Registry<C::Source>>,
        groups: Arc<dyn HealthEndpointGroups>,
        slow_indicator_threshold: Option<Duration>,
    ) -> Self {
        Self {
            registry,
            groups,
            slow_indicator_logger: SlowIndicatorLogger::new(slow_indicator_threshold),
        }
    }

    pub fn groups(&self) -> &Arc<dyn HealthEndpointGroups> {
        &self.groups
    }

    /// Compute health for a path
    ///
    /// A first segment naming a group (or, with a namespace, one of its
    /// additional paths) scopes the rest of the path to that group;
    /// otherwise the primary group sees the whole path. `Ok(None)` means
    /// the path is unknown, everything below it was filtered out, or the
    /// group hides components from this caller.
    pub fn health<S: AsRef<str>>(
        &self,
        api_version: ApiVersion,
        namespace: Option<WebServerNamespace>,
        security_context: &SecurityContext,
        show_all: bool,
        path: &[S],
    ) -> Result<Option<HealthResult<C::Contribution>>> {
        if let Some(first) = path.first() {
            if let Some(group) = self.group_for(namespace, first.as_ref()) {
                debug!("Health request for group '{}'", first.as_ref());
                return self.group_health(api_version, group, security_context, show_all, path, 1);
            }
        }
        let primary = self.groups.primary();
        self.group_health(api_version, primary, security_context, show_all, path, 0)
    }

    fn group_for(
        &self,
        namespace: Option<WebServerNamespace>,
        segment: &str,
    ) -> Option<Arc<dyn HealthEndpointGroup>> {
        self.groups.get(segment).or_else(|| {
            namespace.and_then(|namespace| {
                let path = AdditionalHealthEndpointPath::of(namespace, segment);
                self.groups.get_by_additional_path(&path)
            })
        })
    }

    fn group_health<S: AsRef<str>>(
        &self,
        api_version: ApiVersion,
        group: Arc<dyn HealthEndpointGroup>,
        security_context: &SecurityContext,
        show_all: bool,
        path: &[S],
        offset: usize,
    ) -> Result<Option<HealthResult<C::Contribution>>> {
        let show_components = show_all || group.show_components(security_context);
        let show_details = show_all || group.show_details(security_context);
        let segments = &path[offset..];
        let is_root = segments.is_empty();
        let is_system_health =
            is_root && offset == 0 && Arc::ptr_eq(&group, &self.groups.primary());
        if !show_components && !is_root {
            debug!("Components hidden by group policy");
            return Ok(None);
        }
        let root = C::root(self.registry.snapshot());
        let Some(contributor) = resolve(root, segments) else {
            return Ok(None);
        };
        let name = group_relative_name(segments);
        let group_names = is_system_health.then(|| self.groups.names());
        let scope = Scope {
            api_version,
            group: &group,
            show_components,
            show_details,
        };
        let health = self.contribution(&scope, &name, &contributor, group_names)?;
        Ok(health.map(|health| HealthResult::new(health, group)))
    }

    fn contribution(
        &self,
        scope: &Scope<'_>,
        name: &str,
        contributor: &C,
        group_names: Option<BTreeSet<String>>,
    ) -> Result<Option<C::Contribution>> {
        if contributor.is_composite() {
            return self.aggregate_contribution(scope, name, contributor, group_names);
        }
        if name.is_empty() || scope.group.is_member(name) {
            return contributor
                .logged_health(name, scope.show_details, &self.slow_indicator_logger)
                .map(Some);
        }
        Ok(None)
    }

    fn aggregate_contribution(
        &self,
        scope: &Scope<'_>,
        name: &str,
        contributor: &C,
        group_names: Option<BTreeSet<String>>,
    ) -> Result<Option<C::Contribution>> {
        let mut contributions = IndexMap::new();
        for child in contributor.children() {
            let child_path = child_name(name, &child.name);
            if let Some(contribution) =
                self.contribution(scope, &child_path, &child.contributor, None)?
            {
                contributions.insert(child.name, contribution);
            }
        }
        if contributions.is_empty() {
            return Ok(None);
        }
        Ok(Some(C::aggregate(
            scope.api_version,
            contributions,
            scope.group.status_aggregator(),
            scope.show_components,
            group_names,
        )))
    }
}

impl<C: EndpointContributor> fmt::Debug for HealthEndpointSupport<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HealthEndpointSupport")
            .field("groups", &self.groups.names())
            .field("slow_indicator_logger", &self.slow_indicator_logger)
            .finish()
    }
}
