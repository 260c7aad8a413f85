//! Health endpoint properties

use crate::endpoint::Show;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Endpoint-wide properties; also the defaults for every group
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthEndpointProperties {
    /// When leaf details are shown
    #[serde(default)]
    pub show_details: Show,
    /// When components are shown; follows `show_details` when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_components: Option<Show>,
    /// Roles allowed to see details when authorized
    #[serde(default)]
    pub roles: Vec<String>,
    /// Leaf evaluations slower than this are logged; `0` disables logging
    #[serde(default = "default_slow_indicator_threshold_ms")]
    pub slow_indicator_threshold_ms: u64,
    /// Status ordering and HTTP mapping
    #[serde(default)]
    pub status: StatusProperties,
    /// Named groups
    #[serde(default)]
    pub group: IndexMap<String, GroupProperties>,
}

impl Default for HealthEndpointProperties {
    fn default() -> Self {
        Self {
            show_details: Show::default(),
            show_components: None,
            roles: Vec::new(),
            slow_indicator_threshold_ms: default_slow_indicator_threshold_ms(),
            status: StatusProperties::default(),
            group: IndexMap::new(),
        }
    }
}

/// Status ordering and HTTP code mapping
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatusProperties {
    /// Status codes from most to least severe; empty keeps the default order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub order: Vec<String>,
    /// Status code to HTTP status; empty keeps the default mapping
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub http_mapping: IndexMap<String, u16>,
}

/// Properties of a single group
///
/// Unset values inherit from [`HealthEndpointProperties`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GroupProperties {
    /// Member names; unset or empty includes everything
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclude: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_details: Option<Show>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_components: Option<Show>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roles: Option<Vec<String>>,
    /// `namespace:/path`, e.g. `server:/readyz`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<StatusProperties>,
}

fn default_slow_indicator_threshold_ms() -> u64 {
    10_000
}
