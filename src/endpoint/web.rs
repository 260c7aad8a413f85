//! Health endpoint facades

use super::contributor::{Blocking, Reactive};
use super::group::SecurityContext;
use super::groups::{HealthEndpointGroups, WebServerNamespace};
use super::support::{HealthEndpointSupport, HealthResult};
use crate::health::{ApiVersion, ContributedHealth, Health, STATUS_NOT_FOUND, STATUS_OK};
use crate::registry::{HealthContributorRegistry, ReactiveHealthContributorRegistry};
use crate::utils::error::Result;
use std::sync::Arc;
use std::time::Duration;

/// Health reported when nothing contributed at the root
pub fn default_health() -> ContributedHealth {
    Health::up().build().into()
}

/// HTTP status and optional body
#[derive(Debug, Clone, PartialEq)]
pub struct EndpointResponse<T> {
    status: u16,
    body: Option<T>,
}

impl<T> EndpointResponse<T> {
    pub fn new(body: T, status: u16) -> Self {
        Self {
            status,
            body: Some(body),
        }
    }

    pub fn empty(status: u16) -> Self {
        Self { status, body: None }
    }

    #[inline]
    pub fn status(&self) -> u16 {
        self.status
    }

    #[inline]
    pub fn body(&self) -> Option<&T> {
        self.body.as_ref()
    }

    pub fn into_body(self) -> Option<T> {
        self.body
    }
}

fn respond<S: AsRef<str>>(
    result: Option<HealthResult<ContributedHealth>>,
    path: &[S],
) -> EndpointResponse<ContributedHealth> {
    match result {
        Some(result) => {
            let (health, group) = result.into_parts();
            let status = group.http_code_status_mapper().status_code(health.status());
            EndpointResponse::new(health, status)
        }
        None if path.is_empty() => EndpointResponse::new(default_health(), STATUS_OK),
        None => EndpointResponse::empty(STATUS_NOT_FOUND),
    }
}

/// Programmatic access to blocking health
///
/// Everything is shown: no security context is consulted.
pub struct HealthEndpoint {
    support: HealthEndpointSupport<Blocking>,
}

impl HealthEndpoint {
    pub fn new(
        registry: Arc<HealthContributorRegistry>,
        groups: Arc<dyn HealthEndpointGroups>,
        slow_indicator_threshold: Option<Duration>,
    ) -> Self {
        Self {
            support: HealthEndpointSupport::new(registry, groups, slow_indicator_threshold),
        }
    }

    /// System health, `UP` when nothing contributed
    pub fn health(&self) -> Result<ContributedHealth> {
        let no_path: &[&str] = &[];
        Ok(self.health_for_path(no_path)?.unwrap_or_else(default_health))
    }

    /// Health of a group or contributor path
    pub fn health_for_path<S: AsRef<str>>(&self, path: &[S]) -> Result<Option<ContributedHealth>> {
        let result = self.support.health(
            ApiVersion::V3,
            None,
            &SecurityContext::none(),
            true,
            path,
        )?;
        Ok(result.map(HealthResult::into_health))
    }
}

/// Web-facing blocking health, with group visibility and HTTP codes
pub struct HealthEndpointWebExtension {
    support: HealthEndpointSupport<Blocking>,
}

impl HealthEndpointWebExtension {
    pub fn new(
        registry: Arc<HealthContributorRegistry>,
        groups: Arc<dyn HealthEndpointGroups>,
        slow_indicator_threshold: Option<Duration>,
    ) -> Self {
        Self {
            support: HealthEndpointSupport::new(registry, groups, slow_indicator_threshold),
        }
    }

    /// Respond to a health request
    ///
    /// An unmatched empty path answers `UP` with 200, any other unmatched
    /// path answers 404 without a body.
    pub fn health<S: AsRef<str>>(
        &self,
        api_version: ApiVersion,
        namespace: Option<WebServerNamespace>,
        security_context: &SecurityContext,
        show_all: bool,
        path: &[S],
    ) -> Result<EndpointResponse<ContributedHealth>> {
        let result =
            self.support
                .health(api_version, namespace, security_context, show_all, path)?;
        Ok(respond(result, path))
    }
}

/// Web-facing reactive health
pub struct ReactiveHealthEndpointWebExtension {
    support: HealthEndpointSupport<Reactive>,
}

impl ReactiveHealthEndpointWebExtension {
    pub fn new(
        registry: Arc<ReactiveHealthContributorRegistry>,
        groups: Arc<dyn HealthEndpointGroups>,
        slow_indicator_threshold: Option<Duration>,
    ) -> Self {
        Self {
            support: HealthEndpointSupport::new(registry, groups, slow_indicator_threshold),
        }
    }

    /// Respond to a health request once every contributing leaf completed
    pub async fn health<S: AsRef<str>>(
        &self,
        api_version: ApiVersion,
        namespace: Option<WebServerNamespace>,
        security_context: &SecurityContext,
        show_all: bool,
        path: &[S],
    ) -> Result<EndpointResponse<ContributedHealth>> {
        let result =
            self.support
                .health(api_version, namespace, security_context, show_all, path)?;
        let resolved = match result {
            Some(result) => {
                let (health, group) = result.into_parts();
                Some(HealthResult::new(health.await?, group))
            }
            None => None,
        };
        Ok(respond(resolved, path))
    }
}
