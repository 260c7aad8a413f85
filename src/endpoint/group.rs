//! Health endpoint groups and their visibility policy

use super::groups::AdditionalHealthEndpointPath;
use super::member::MemberPredicate;
use crate::health::{
    HttpCodeStatusMapper, SimpleHttpCodeStatusMapper, SimpleStatusAggregator, StatusAggregator,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

/// Caller identity consulted by group visibility policies
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SecurityContext {
    principal: Option<String>,
    roles: HashSet<String>,
}

impl SecurityContext {
    /// Anonymous caller
    pub fn none() -> Self {
        Self::default()
    }

    /// Authenticated caller without roles
    pub fn authenticated<S: Into<String>>(principal: S) -> Self {
        Self {
            principal: Some(principal.into()),
            roles: HashSet::new(),
        }
    }

    pub fn with_role<S: Into<String>>(mut self, role: S) -> Self {
        self.roles.insert(role.into());
        self
    }

    pub fn principal(&self) -> Option<&str> {
        self.principal.as_deref()
    }

    pub fn is_user_in_role(&self, role: &str) -> bool {
        self.roles.contains(role)
    }
}

/// When components or details are shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Show {
    #[default]
    Never,
    /// Shown to authenticated callers holding one of the group roles, or any
    /// authenticated caller when the group has no roles
    #[serde(alias = "when-authorized")]
    WhenAuthorized,
    Always,
}

impl Show {
    pub fn is_shown(self, security_context: &SecurityContext, roles: &HashSet<String>) -> bool {
        match self {
            Show::Never => false,
            Show::Always => true,
            Show::WhenAuthorized => {
                security_context.principal().is_some()
                    && (roles.is_empty()
                        || roles.iter().any(|role| security_context.is_user_in_role(role)))
            }
        }
    }
}

/// A named view over the contributor tree
///
/// Implementations must be immutable and `is_member` must be pure: it is
/// called once per leaf during every aggregation.
pub trait HealthEndpointGroup: Send + Sync {
    /// Whether the slash-joined contributor name belongs to this group
    fn is_member(&self, name: &str) -> bool;

    /// Whether nested components are shown to the caller
    fn show_components(&self, security_context: &SecurityContext) -> bool;

    /// Whether leaf details are shown to the caller
    fn show_details(&self, security_context: &SecurityContext) -> bool;

    fn status_aggregator(&self) -> Arc<dyn StatusAggregator>;

    fn http_code_status_mapper(&self) -> Arc<dyn HttpCodeStatusMapper>;

    /// Extra externally reachable path for this group
    fn additional_path(&self) -> Option<AdditionalHealthEndpointPath>;
}

/// Configurable group implementation
pub struct DefaultHealthEndpointGroup {
    members: Arc<dyn MemberPredicate>,
    status_aggregator: Arc<dyn StatusAggregator>,
    http_code_status_mapper: Arc<dyn HttpCodeStatusMapper>,
    /// Falls back to `show_details` when unset
    show_components: Option<Show>,
    show_details: Show,
    roles: HashSet<String>,
    additional_path: Option<AdditionalHealthEndpointPath>,
}

impl DefaultHealthEndpointGroup {
    /// Create a group with the given membership predicate
    ///
    /// Details are never shown and the default aggregator and HTTP mapper
    /// are used until overridden.
    pub fn new<P>(members: P) -> Self
    where
        P: MemberPredicate + 'static,
    {
        Self {
            members: Arc::new(members),
            status_aggregator: Arc::new(SimpleStatusAggregator::default()),
            http_code_status_mapper: Arc::new(SimpleHttpCodeStatusMapper::default()),
            show_components: None,
            show_details: Show::Never,
            roles: HashSet::new(),
            additional_path: None,
        }
    }

    pub fn with_show_components(mut self, show: Show) -> Self {
        self.show_components = Some(show);
        self
    }

    pub fn with_show_details(mut self, show: Show) -> Self {
        self.show_details = show;
        self
    }

    pub fn with_roles<I, S>(mut self, roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.roles = roles.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_status_aggregator(mut self, aggregator: Arc<dyn StatusAggregator>) -> Self {
        self.status_aggregator = aggregator;
        self
    }

    pub fn with_http_code_status_mapper(mut self, mapper: Arc<dyn HttpCodeStatusMapper>) -> Self {
        self.http_code_status_mapper = mapper;
        self
    }

    pub fn with_additional_path(mut self, path: AdditionalHealthEndpointPath) -> Self {
        self.additional_path = Some(path);
        self
    }
}

impl HealthEndpointGroup for DefaultHealthEndpointGroup {
    fn is_member(&self, name: &str) -> bool {
        self.members.is_member(name)
    }

    fn show_components(&self, security_context: &SecurityContext) -> bool {
        self.show_components
            .unwrap_or(self.show_details)
            .is_shown(security_context, &self.roles)
    }

    fn show_details(&self, security_context: &SecurityContext) -> bool {
        self.show_details.is_shown(security_context, &self.roles)
    }

    fn status_aggregator(&self) -> Arc<dyn StatusAggregator> {
        Arc::clone(&self.status_aggregator)
    }

    fn http_code_status_mapper(&self) -> Arc<dyn HttpCodeStatusMapper> {
        Arc::clone(&self.http_code_status_mapper)
    }

    fn additional_path(&self) -> Option<AdditionalHealthEndpointPath> {
        self.additional_path.clone()
    }
}

impl fmt::Debug for DefaultHealthEndpointGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DefaultHealthEndpointGroup")
            .field("show_components", &self.show_components)
            .field("show_details", &self.show_details)
            .field("roles", &self.roles)
            .field("additional_path", &self.additional_path)
            .finish()
    }
}
