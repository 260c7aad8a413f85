//! Contributor name generation

use indexmap::IndexMap;

/// Derives contributor names from component names by stripping suffixes
///
/// Suffix matching is ASCII case-insensitive, and at most one suffix is
/// removed.
#[derive(Debug, Clone)]
pub struct NameGenerator {
    suffixes: Vec<String>,
}

impl NameGenerator {
    /// Strip `HealthIndicator` and `HealthContributor` suffixes
    pub fn without_standard_suffixes() -> Self {
        Self::without_suffixes(["healthindicator", "healthcontributor"])
    }

    /// Strip any of the given suffixes
    pub fn without_suffixes<I, S>(suffixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            suffixes: suffixes.into_iter().map(Into::into).collect(),
        }
    }

    /// Generate the contributor name for a component name
    pub fn generate(&self, component_name: &str) -> String {
        for suffix in &self.suffixes {
            let Some(split) = component_name.len().checked_sub(suffix.len()) else {
                continue;
            };
            if !component_name.is_char_boundary(split) {
                continue;
            }
            if component_name[split..].eq_ignore_ascii_case(suffix) {
                return component_name[..split].to_string();
            }
        }
        component_name.to_string()
    }

    /// Rename every key of a map, keeping the order
    pub fn apply<V>(&self, components: IndexMap<String, V>) -> IndexMap<String, V> {
        components
            .into_iter()
            .map(|(name, value)| (self.generate(&name), value))
            .collect()
    }
}

impl Default for NameGenerator {
    fn default() -> Self {
        Self::without_standard_suffixes()
    }
}
