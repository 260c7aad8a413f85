//! Groups built from properties

use super::models::{GroupProperties, HealthEndpointProperties, StatusProperties};
use super::validation::Validate;
use crate::endpoint::{
    AdditionalHealthEndpointPath, DefaultHealthEndpointGroup, DefaultHealthEndpointGroups,
    EndpointContributor, HealthEndpointGroup, IncludeExcludeMemberPredicate, resolve,
};
use crate::health::{
    HttpCodeStatusMapper, SimpleHttpCodeStatusMapper, SimpleStatusAggregator, StatusAggregator,
};
use crate::registry::Registry;
use crate::utils::error::{HealthError, Result};
use indexmap::IndexMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

impl HealthEndpointProperties {
    /// Slow contributor threshold, `None` when disabled
    pub fn slow_indicator_threshold(&self) -> Option<Duration> {
        (self.slow_indicator_threshold_ms > 0)
            .then(|| Duration::from_millis(self.slow_indicator_threshold_ms))
    }

    /// Group used for requests that do not name a group
    pub fn primary_group(&self) -> DefaultHealthEndpointGroup {
        let mut group = DefaultHealthEndpointGroup::new(IncludeExcludeMemberPredicate::all())
            .with_show_details(self.show_details)
            .with_roles(self.roles.iter().cloned())
            .with_status_aggregator(status_aggregator(&self.status))
            .with_http_code_status_mapper(http_code_status_mapper(&self.status));
        if let Some(show) = self.show_components {
            group = group.with_show_components(show);
        }
        group
    }

    /// Build the primary group and every named group
    ///
    /// Named groups inherit unset visibility, roles and status settings from
    /// the endpoint properties.
    pub fn build_groups(&self) -> Result<DefaultHealthEndpointGroups> {
        self.validate().map_err(HealthError::Validation)?;

        let primary: Arc<dyn HealthEndpointGroup> = Arc::new(self.primary_group());
        let mut groups: IndexMap<String, Arc<dyn HealthEndpointGroup>> = IndexMap::new();
        for (name, properties) in &self.group {
            debug!("Building health group '{}'", name);
            groups.insert(name.clone(), Arc::new(self.named_group(properties)?));
        }
        DefaultHealthEndpointGroups::of(primary, groups)
    }

    fn named_group(&self, properties: &GroupProperties) -> Result<DefaultHealthEndpointGroup> {
        let members = IncludeExcludeMemberPredicate::including(
            properties.include.iter().flatten(),
        )
        .excluding(&properties.exclude);
        let status = properties.status.as_ref().unwrap_or(&self.status);
        let roles = properties.roles.as_ref().unwrap_or(&self.roles);

        let mut group = DefaultHealthEndpointGroup::new(members)
            .with_show_details(properties.show_details.unwrap_or(self.show_details))
            .with_roles(roles.iter().cloned())
            .with_status_aggregator(status_aggregator(status))
            .with_http_code_status_mapper(http_code_status_mapper(status));
        if let Some(show) = properties.show_components.or(self.show_components) {
            group = group.with_show_components(show);
        }
        if let Some(path) = &properties.additional_path {
            group = group.with_additional_path(AdditionalHealthEndpointPath::parse(path)?);
        }
        Ok(group)
    }

    /// Check that every explicitly included or excluded member exists
    ///
    /// Nested members such as `db/primary` are resolved through composites.
    pub fn validate_group_membership<C>(&self, registry: &Registry<C::Source>) -> Result<()>
    where
        C: EndpointContributor,
    {
        for (group_name, properties) in &self.group {
            let included = properties.include.iter().flatten().map(|name| ("Included", name));
            let excluded = properties.exclude.iter().map(|name| ("Excluded", name));
            for (kind, name) in included.chain(excluded) {
                let name = name.trim();
                if name.is_empty() || name == "*" {
                    continue;
                }
                let segments: Vec<&str> = name.split('/').collect();
                let root = C::root(registry.snapshot());
                if resolve(root, &segments).is_none() {
                    return Err(HealthError::Validation(format!(
                        "{} health contributor '{}' in group '{}' does not exist",
                        kind, name, group_name
                    )));
                }
            }
        }
        Ok(())
    }
}

fn status_aggregator(status: &StatusProperties) -> Arc<dyn StatusAggregator> {
    if status.order.is_empty() {
        Arc::new(SimpleStatusAggregator::default())
    } else {
        Arc::new(SimpleStatusAggregator::new(&status.order))
    }
}

fn http_code_status_mapper(status: &StatusProperties) -> Arc<dyn HttpCodeStatusMapper> {
    let mappings = status
        .http_mapping
        .iter()
        .map(|(code, http)| (code.clone(), *http))
        .collect();
    Arc::new(SimpleHttpCodeStatusMapper::new(mappings))
}
