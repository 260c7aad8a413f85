//! Group registry and additional group paths

use super::group::HealthEndpointGroup;
use crate::utils::error::{HealthError, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Web server a request arrived on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WebServerNamespace {
    /// Main application server
    Server,
    /// Separate management server
    Management,
}

impl WebServerNamespace {
    pub fn as_str(&self) -> &'static str {
        match self {
            WebServerNamespace::Server => "server",
            WebServerNamespace::Management => "management",
        }
    }
}

impl FromStr for WebServerNamespace {
    type Err = HealthError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "server" => Ok(WebServerNamespace::Server),
            "management" => Ok(WebServerNamespace::Management),
            other => Err(HealthError::config(format!(
                "Unknown web server namespace '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for WebServerNamespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Extra path, qualified by a server namespace, a group is reachable from
///
/// Written as `namespace:/path`, for example `server:/healthz`. The path is
/// a single segment and always stored with a leading `/`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AdditionalHealthEndpointPath {
    namespace: WebServerNamespace,
    value: String,
}

impl AdditionalHealthEndpointPath {
    /// Path for a namespace and a single segment, with or without leading `/`
    pub fn of(namespace: WebServerNamespace, value: &str) -> Self {
        let value = if value.starts_with('/') {
            value.to_string()
        } else {
            format!("/{}", value)
        };
        Self { namespace, value }
    }

    /// Parse a `namespace:/path` string
    pub fn parse(value: &str) -> Result<Self> {
        let (namespace, path) = value.split_once(':').ok_or_else(|| {
            HealthError::config(format!(
                "Additional path '{}' must contain a namespace prefix such as 'server:'",
                value
            ))
        })?;
        let namespace: WebServerNamespace = namespace.parse()?;
        let segment = path.trim().trim_start_matches('/');
        if segment.is_empty() {
            return Err(HealthError::config(format!(
                "Additional path '{}' must not be empty",
                value
            )));
        }
        if segment.contains('/') {
            return Err(HealthError::config(format!(
                "Additional path '{}' must contain only one segment",
                value
            )));
        }
        Ok(Self::of(namespace, segment))
    }

    #[inline]
    pub fn namespace(&self) -> WebServerNamespace {
        self.namespace
    }

    #[inline]
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn has_namespace(&self, namespace: WebServerNamespace) -> bool {
        self.namespace == namespace
    }
}

impl FromStr for AdditionalHealthEndpointPath {
    type Err = HealthError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for AdditionalHealthEndpointPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.value)
    }
}

/// All configured groups plus the primary group
pub trait HealthEndpointGroups: Send + Sync {
    /// Group used when a request path does not name a group
    fn primary(&self) -> Arc<dyn HealthEndpointGroup>;

    /// Names of the configured groups, not including the primary group
    fn names(&self) -> BTreeSet<String>;

    fn get(&self, name: &str) -> Option<Arc<dyn HealthEndpointGroup>>;

    /// Group reachable from the given additional path
    fn get_by_additional_path(
        &self,
        path: &AdditionalHealthEndpointPath,
    ) -> Option<Arc<dyn HealthEndpointGroup>> {
        self.names()
            .iter()
            .filter_map(|name| self.get(name))
            .find(|group| group.additional_path().as_ref() == Some(path))
    }
}

/// Map-backed group registry
pub struct DefaultHealthEndpointGroups {
    primary: Arc<dyn HealthEndpointGroup>,
    groups: IndexMap<String, Arc<dyn HealthEndpointGroup>>,
}

impl DefaultHealthEndpointGroups {
    /// Create the registry, rejecting group names that cannot be addressed
    pub fn of(
        primary: Arc<dyn HealthEndpointGroup>,
        groups: IndexMap<String, Arc<dyn HealthEndpointGroup>>,
    ) -> Result<Self> {
        for name in groups.keys() {
            if name.trim().is_empty() || name.contains('/') {
                return Err(HealthError::config(format!(
                    "Health group name '{}' must be non-empty and must not contain a '/'",
                    name
                )));
            }
        }
        Ok(Self { primary, groups })
    }

    /// Only a primary group
    pub fn primary_only(primary: Arc<dyn HealthEndpointGroup>) -> Self {
        Self {
            primary,
            groups: IndexMap::new(),
        }
    }
}

impl HealthEndpointGroups for DefaultHealthEndpointGroups {
    fn primary(&self) -> Arc<dyn HealthEndpointGroup> {
        Arc::clone(&self.primary)
    }

    fn names(&self) -> BTreeSet<String> {
        self.groups.keys().cloned().collect()
    }

    fn get(&self, name: &str) -> Option<Arc<dyn HealthEndpointGroup>> {
        self.groups.get(name).cloned()
    }

    fn get_by_additional_path(
        &self,
        path: &AdditionalHealthEndpointPath,
    ) -> Option<Arc<dyn HealthEndpointGroup>> {
        self.groups
            .values()
            .find(|group| group.additional_path().as_ref() == Some(path))
            .cloned()
    }
}

impl fmt::Debug for DefaultHealthEndpointGroups {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DefaultHealthEndpointGroups")
            .field("groups", &self.groups.keys().collect::<Vec<_>>())
            .finish()
    }
}
