//! Health value types

use super::aggregator::StatusAggregator;
use super::status::Status;
use indexmap::IndexMap;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::{BTreeSet, HashSet};

/// Version of the endpoint API a result is presented for
///
/// The aggregation itself is version independent; only the name of the field
/// carrying nested components changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiVersion {
    /// Nested components are exposed under `details`
    V2,
    /// Nested components are exposed under `components`
    #[default]
    V3,
}

impl ApiVersion {
    /// Most recent API version
    pub const LATEST: ApiVersion = ApiVersion::V3;
}

/// Health of a single component, as produced by an indicator
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Health {
    status: Status,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    details: IndexMap<String, serde_json::Value>,
}

impl Health {
    pub fn up() -> HealthBuilder {
        HealthBuilder::new(Status::UP)
    }

    pub fn down() -> HealthBuilder {
        HealthBuilder::new(Status::DOWN)
    }

    pub fn out_of_service() -> HealthBuilder {
        HealthBuilder::new(Status::OUT_OF_SERVICE)
    }

    pub fn unknown() -> HealthBuilder {
        HealthBuilder::new(Status::UNKNOWN)
    }

    pub fn status(status: Status) -> HealthBuilder {
        HealthBuilder::new(status)
    }

    #[inline]
    pub fn get_status(&self) -> &Status {
        &self.status
    }

    #[inline]
    pub fn details(&self) -> &IndexMap<String, serde_json::Value> {
        &self.details
    }

    /// Copy of this health with the details removed
    pub fn without_details(&self) -> Health {
        Health {
            status: self.status.clone(),
            details: IndexMap::new(),
        }
    }
}

/// Builder for [`Health`]
#[derive(Debug, Clone)]
pub struct HealthBuilder {
    status: Status,
    details: IndexMap<String, serde_json::Value>,
}

impl HealthBuilder {
    fn new(status: Status) -> Self {
        Self {
            status,
            details: IndexMap::new(),
        }
    }

    pub fn with_detail<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<serde_json::Value>,
    {
        self.details.insert(key.into(), value.into());
        self
    }

    pub fn with_details<I, K, V>(mut self, details: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<serde_json::Value>,
    {
        for (key, value) in details {
            self.details.insert(key.into(), value.into());
        }
        self
    }

    /// Record an error as the `error` detail and mark the health `DOWN`
    pub fn with_error<E: std::fmt::Display>(mut self, error: E) -> Self {
        self.status = Status::DOWN;
        self.details
            .insert("error".to_string(), serde_json::Value::String(error.to_string()));
        self
    }

    pub fn build(self) -> Health {
        Health {
            status: self.status,
            details: self.details,
        }
    }
}

/// Aggregated health of a composite contributor
///
/// At the system root of the primary group the result also carries the
/// sorted names of all configured groups.
#[derive(Debug, Clone, PartialEq)]
pub struct CompositeHealth {
    status: Status,
    components: Option<IndexMap<String, ContributedHealth>>,
    groups: Option<BTreeSet<String>>,
    api_version: ApiVersion,
}

impl CompositeHealth {
    /// Fold child contributions into a composite result
    ///
    /// The status is the aggregator's verdict over the distinct child
    /// statuses. Children are kept only when `show_components` is set.
    pub fn aggregate(
        api_version: ApiVersion,
        contributions: IndexMap<String, ContributedHealth>,
        aggregator: &dyn StatusAggregator,
        show_components: bool,
        groups: Option<BTreeSet<String>>,
    ) -> Self {
        let statuses: HashSet<Status> = contributions
            .values()
            .map(|component| component.status().clone())
            .collect();
        let status = aggregator.aggregate_status(&statuses);
        Self {
            status,
            components: show_components.then_some(contributions),
            groups,
            api_version,
        }
    }

    #[inline]
    pub fn status(&self) -> &Status {
        &self.status
    }

    /// Child results, `None` when components are hidden
    #[inline]
    pub fn components(&self) -> Option<&IndexMap<String, ContributedHealth>> {
        self.components.as_ref()
    }

    /// Configured group names, present only at the system root
    #[inline]
    pub fn groups(&self) -> Option<&BTreeSet<String>> {
        self.groups.as_ref()
    }

    #[inline]
    pub fn api_version(&self) -> ApiVersion {
        self.api_version
    }
}

impl Serialize for CompositeHealth {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("status", &self.status)?;
        if let Some(components) = self.components.as_ref().filter(|c| !c.is_empty()) {
            let field = match self.api_version {
                ApiVersion::V2 => "details",
                ApiVersion::V3 => "components",
            };
            map.serialize_entry(field, components)?;
        }
        if let Some(groups) = self.groups.as_ref().filter(|g| !g.is_empty()) {
            map.serialize_entry("groups", groups)?;
        }
        map.end()
    }
}

/// Health contributed by either a leaf or a composite
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ContributedHealth {
    Health(Health),
    Composite(CompositeHealth),
}

impl ContributedHealth {
    pub fn status(&self) -> &Status {
        match self {
            ContributedHealth::Health(health) => health.get_status(),
            ContributedHealth::Composite(composite) => composite.status(),
        }
    }

    pub fn as_health(&self) -> Option<&Health> {
        match self {
            ContributedHealth::Health(health) => Some(health),
            ContributedHealth::Composite(_) => None,
        }
    }

    pub fn as_composite(&self) -> Option<&CompositeHealth> {
        match self {
            ContributedHealth::Composite(composite) => Some(composite),
            ContributedHealth::Health(_) => None,
        }
    }
}

impl From<Health> for ContributedHealth {
    fn from(health: Health) -> Self {
        ContributedHealth::Health(health)
    }
}

impl From<CompositeHealth> for ContributedHealth {
    fn from(composite: CompositeHealth) -> Self {
        ContributedHealth::Composite(composite)
    }
}
