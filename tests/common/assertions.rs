//! Helpers for inspecting aggregated results

use health_rollup::ContributedHealth;

/// Names of the components of a composite result, empty when hidden
pub fn component_names(health: &ContributedHealth) -> Vec<String> {
    health
        .as_composite()
        .and_then(|composite| composite.components())
        .map(|components| components.keys().cloned().collect())
        .unwrap_or_default()
}

/// A component of a composite result
///
/// Panics when the result is not composite or has no such component.
pub fn component<'a>(health: &'a ContributedHealth, name: &str) -> &'a ContributedHealth {
    health
        .as_composite()
        .and_then(|composite| composite.components())
        .and_then(|components| components.get(name))
        .unwrap_or_else(|| panic!("no component named '{}'", name))
}

/// Group names carried by a composite result
pub fn group_names(health: &ContributedHealth) -> Option<Vec<String>> {
    health
        .as_composite()
        .and_then(|composite| composite.groups())
        .map(|groups| groups.iter().cloned().collect())
}
